//! Parameter-normalization helpers shared by the adapters.
//!
//! - Keyword and filter joining for the search query
//! - Date-window computation
//! - Endpoint URLs under a configurable base
//! - String truncation for log previews

use chrono::{Days, Local, NaiveDate};
use url::Url;

/// Join keywords with single spaces, preserving order.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(join_keywords(&["mode".into(), "fashion".into()]), "mode fashion");
/// ```
pub fn join_keywords(keywords: &[String]) -> String {
    keywords.join(" ")
}

/// Join a filter list (sources, domains) with commas.
///
/// An empty list yields `""`; the search backend reads that as "no filter".
pub fn join_filter(items: &[String]) -> String {
    items.join(",")
}

/// Today's date in the local timezone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Start of the search window: `today` minus `days_before` days.
///
/// Returns `None` if the result falls outside chrono's calendar range.
pub fn window_start(today: NaiveDate, days_before: u32) -> Option<NaiveDate> {
    today.checked_sub_days(Days::new(u64::from(days_before)))
}

/// Append `segments` to the path of `base`.
///
/// Unlike [`Url::join`], an existing path prefix is kept whether or not it
/// ends in `/`, so `https://gw.example.com/news` becomes
/// `https://gw.example.com/news/v2/everything`.
pub fn endpoint_url(base: &str, segments: &[&str]) -> Result<Url, String> {
    let mut url = Url::parse(base).map_err(|e| e.to_string())?;
    url.path_segments_mut()
        .map_err(|()| "URL cannot be used as a base".to_string())?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Truncate a string for logging purposes.
///
/// Strings longer than `max` characters are cut and suffixed with
/// `"…(+N bytes)"`, where N is the number of bytes dropped.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}…(+{} bytes)", &s[..cut], s.len() - cut),
    }
}
