//! Command-line interface definitions for news_fetch.
//!
//! The only required input is the optional positional provider selector.
//! Everything else has a default; flags override values from `--config`.

use clap::Parser;

/// Command-line arguments for the news_fetch application.
///
/// Secrets are never taken from flags. They are read from `NEWSAPI_API_KEY`,
/// `OPENAI_ORGANIZATION` and `OPENAI_API_KEY` (a `.env` file is honoured).
///
/// # Examples
///
/// ```sh
/// # Search NewsAPI for the default keywords
/// news_fetch n
///
/// # Search the last week of two domains
/// news_fetch n -k fashion -k week -d 7 --domain vogue.com --domain elle.com
///
/// # Generate "history" articles with OpenAI
/// news_fetch --category history -k mode -k fashion
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Provider selector: `n` for NewsAPI, anything else (or nothing) for OpenAI
    pub provider: Option<String>,

    /// Optional path to config.yaml file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Keyword to search for (repeat for several)
    #[arg(short, long = "keyword", default_values = ["mode", "fashion"])]
    pub keywords: Vec<String>,

    /// Prompt category for the generative backend: people, trend or history
    #[arg(long, default_value = "trend")]
    pub category: String,

    /// NewsAPI source id to restrict the search to (repeatable)
    #[arg(long = "source")]
    pub sources: Vec<String>,

    /// Domain to restrict the search to (repeatable)
    #[arg(long = "domain")]
    pub domains: Vec<String>,

    /// Number of days before today where the search window starts
    #[arg(short, long)]
    pub days_before: Option<u32>,

    /// Article language code
    #[arg(long)]
    pub language: Option<String>,

    /// Sort strategy: relevancy, popularity or publishedAt
    #[arg(long)]
    pub sort_by: Option<String>,

    /// Completion model
    #[arg(long)]
    pub model_engine: Option<String>,

    /// Maximum tokens in the generated completion
    #[arg(long)]
    pub max_tokens: Option<u32>,

    /// Maximum number of generated articles (accepted, not enforced)
    #[arg(long)]
    pub max_results: Option<u32>,
}
