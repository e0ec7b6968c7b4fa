//! # news_fetch
//!
//! Fetches news articles for a set of keywords from one of two backends and
//! prints them:
//!
//! - **NewsAPI** (`news_fetch n`): searches the "everything" endpoint
//! - **OpenAI** (anything else): generates articles with a completion model
//!
//! ## Usage
//!
//! ```sh
//! NEWSAPI_API_KEY=... news_fetch n -k mode -k fashion
//! OPENAI_ORGANIZATION=... OPENAI_API_KEY=... news_fetch --category trend
//! ```
//!
//! ## Flow
//!
//! 1. **Configuration**: CLI flags over an optional YAML file, `.env` loaded
//! 2. **Selection**: the selector token picks a backend and loads its secrets
//! 3. **Fetch**: exactly one backend request
//! 4. **Output**: records or generated lines on stdout
//!
//! Any error ends the run with a non-zero exit code.

use clap::Parser;
use std::error::Error;
use std::io::Write;
use std::process::ExitCode;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod config;
mod credentials;
mod error;
mod models;
mod outputs;
mod providers;
mod utils;

use cli::Cli;
use config::AppConfig;
use models::QueryParameters;
use outputs::console;
use providers::{ArticleRequest, ArticleSource, select_provider};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // --- Tracing init (stderr; stdout carries results) ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();

    // Load .env in local runs; absence is fine.
    match dotenvy::dotenv() {
        Ok(path) => debug!(path = %path.display(), "Loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => {
            error!(error = %e, "Failed to read .env");
            return ExitCode::FAILURE;
        }
    }

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let outcome = run(&args, &mut std::io::stdout().lock()).await;
    let code = report(&outcome);

    let elapsed = start_time.elapsed();
    debug!(millis = elapsed.as_millis() as u64, code, "Execution finished");
    ExitCode::from(code)
}

/// Log the outcome of a run exactly once and map it to a process exit code.
fn report(outcome: &Result<usize, Box<dyn Error>>) -> u8 {
    match outcome {
        Ok(written) => {
            info!(written, "Execution complete");
            0
        }
        Err(e) => {
            error!(error = %e, "news_fetch failed");
            1
        }
    }
}

/// Configure, select a provider, fetch once and render to `out`.
#[instrument(level = "info", skip_all, fields(provider = ?args.provider))]
async fn run<W: Write>(args: &Cli, out: &mut W) -> Result<usize, Box<dyn Error>> {
    let mut config = AppConfig::load(args.config.as_deref()).await?;
    config.apply_cli(args);

    let request = build_request(args, &config)?;
    let provider = select_provider(args.provider.as_deref(), &credentials::from_env, &config)?;

    fetch_and_render(&provider, &request, out).await
}

/// Assemble the single article request from CLI arguments and configuration.
fn build_request(args: &Cli, config: &AppConfig) -> Result<ArticleRequest, error::NewsError> {
    let mut params = QueryParameters::new(args.keywords.iter().cloned())?;
    params.sources = args.sources.clone();
    params.domains = args.domains.clone();
    params.days_before = config.search.days_before;
    params.language = config.search.language.clone();
    params.sort_by = config.search.sort_by.clone();
    Ok(ArticleRequest {
        params,
        category: args.category.clone(),
    })
}

/// Issue the request on `provider` and write the result to `out`.
async fn fetch_and_render<P, W>(
    provider: &P,
    request: &ArticleRequest,
    out: &mut W,
) -> Result<usize, Box<dyn Error>>
where
    P: ArticleSource,
    W: Write,
{
    info!(kind = %provider.kind(), "Fetching articles");
    let articles = provider.fetch_articles(request).await?;
    let written = console::render(&articles, out)?;
    Ok(written)
}
