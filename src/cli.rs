//! Command-line interface definitions for the news digest.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Every argument can also be provided through an environment variable, which
//! is how credentials are normally supplied. The search keyword is fixed and
//! is not an option.

use clap::Parser;

/// Command-line arguments for the news digest.
///
/// # Examples
///
/// ```sh
/// # Credentials from the environment, output to ./news
/// CLIENT_ID=... CLIENT_SECRET=... GEMINI_KEY=... latest_news_digest
///
/// # Different output directory and a shorter timeout
/// latest_news_digest --output-dir /tmp/news --timeout-secs 10
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Naver search API client id
    #[arg(long, env = "CLIENT_ID", hide_env_values = true)]
    pub client_id: Option<String>,

    /// Naver search API client secret
    #[arg(long, env = "CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,

    /// Gemini API key
    #[arg(long, env = "GEMINI_KEY", hide_env_values = true)]
    pub gemini_key: Option<String>,

    /// Directory the Markdown document is written to
    #[arg(short, long, env = "NEWS_OUTPUT_DIR", default_value = "news")]
    pub output_dir: String,

    /// Timeout for each HTTP request, in seconds
    #[arg(long, env = "HTTP_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,
}
