//! # Latest News Digest
//!
//! Fetches the newest news article for a fixed keyword from the Naver News
//! search API, asks Gemini for a short summary, and saves both as a Markdown
//! document.
//!
//! ## Usage
//!
//! ```sh
//! CLIENT_ID=... CLIENT_SECRET=... GEMINI_KEY=... latest_news_digest
//! ```
//!
//! ## Architecture
//!
//! Each run is one linear pass:
//! 1. **Fetching**: GET the single newest search result
//! 2. **Selecting**: pull title, link, description, and date out of the first item
//! 3. **Summarizing**: POST the rendered item to Gemini and pull out the generated text
//! 4. **Output**: write `news/latest_ai_news_<timestamp>.md`
//!
//! Both responses are read with literal marker matching rather than a JSON
//! parser. A missing field shows up as placeholder text in the document; only
//! network and file system failures stop the run.

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod cli;
mod config;
mod error;
mod models;
mod outputs;
mod pipeline;
mod scrapers;
mod transport;
mod utils;

use cli::Cli;
use config::Config;
use pipeline::Pipeline;
use transport::ReqwestTransport;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("latest_news_digest starting up");

    let args = Cli::parse();
    debug!(output_dir = %args.output_dir, timeout_secs = args.timeout_secs, "Parsed CLI arguments");

    let config = match Config::from_cli(&args) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return Err(e.into());
        }
    };
    debug!(?config, "Loaded configuration");

    let transport = ReqwestTransport::new(config.request_timeout)?;
    match Pipeline::new(&config, &transport).run().await {
        Ok(path) => {
            let elapsed = start_time.elapsed();
            info!(
                path = %path.display(),
                ?elapsed,
                secs = elapsed.as_secs(),
                millis = elapsed.subsec_millis(),
                "Execution complete"
            );
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Pipeline failed; no document written");
            Err(e.into())
        }
    }
}
