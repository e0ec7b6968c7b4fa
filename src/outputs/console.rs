//! Plain-text rendering of fetched articles.
//!
//! - Search results: one compact JSON record per line, each followed by a
//!   blank line
//! - Generated results: the first candidate's text, one line per line

use crate::models::{Article, Articles};
use std::io::{self, Write};
use tracing::{instrument, warn};

/// Write `articles` to `out`, returning the number of units written
/// (records for search results, lines for generated text).
#[instrument(level = "info", skip_all)]
pub fn render<W: Write>(articles: &Articles, out: &mut W) -> io::Result<usize> {
    match articles {
        Articles::Search(response) => render_records(&response.articles, out),
        Articles::Generated(response) => {
            if response.first_text().is_none() {
                warn!("Nothing to render: completion has no choices");
            }
            render_lines(&response.lines(), out)
        }
    }
}

fn render_records<W: Write>(records: &[Article], out: &mut W) -> io::Result<usize> {
    for record in records {
        serde_json::to_writer(&mut *out, record)?;
        out.write_all(b"\n\n")?;
    }
    out.flush()?;
    Ok(records.len())
}

fn render_lines<W: Write>(lines: &[&str], out: &mut W) -> io::Result<usize> {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    out.flush()?;
    Ok(lines.len())
}
