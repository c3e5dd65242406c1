//! Run configuration injected into the pipeline.
//!
//! [`Config`] gathers credentials, endpoints, and output settings in one
//! value so the pipeline never reads the environment itself. Tests build it
//! directly; the binary builds it from [`Cli`].

use crate::cli::Cli;
use crate::error::{PipelineError, Result};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// The keyword every run searches for.
pub const KEYWORD: &str = "AI";

pub const NAVER_SEARCH_ENDPOINT: &str = "https://openapi.naver.com/v1/search/news";

pub const GEMINI_GENERATE_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";

/// Korea Standard Time. No daylight saving, so a fixed offset is exact.
pub const KST_OFFSET_SECS: i32 = 9 * 3600;

/// Credentials for the Naver search API.
#[derive(Clone)]
pub struct NaverCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl fmt::Debug for NaverCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NaverCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Everything a pipeline run needs besides the transport.
#[derive(Clone)]
pub struct Config {
    pub keyword: String,
    pub naver: NaverCredentials,
    pub gemini_key: String,
    pub search_endpoint: String,
    pub generate_endpoint: String,
    pub output_dir: PathBuf,
    pub request_timeout: Duration,
    /// Offset east of UTC used for the document timestamp.
    pub utc_offset_secs: i32,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("keyword", &self.keyword)
            .field("naver", &self.naver)
            .field("gemini_key", &"<redacted>")
            .field("search_endpoint", &self.search_endpoint)
            .field("generate_endpoint", &self.generate_endpoint)
            .field("output_dir", &self.output_dir)
            .field("request_timeout", &self.request_timeout)
            .field("utc_offset_secs", &self.utc_offset_secs)
            .finish()
    }
}

impl Config {
    /// Build a config with default endpoints, keyword, and time zone.
    pub fn new(
        naver: NaverCredentials,
        gemini_key: impl Into<String>,
        output_dir: impl Into<PathBuf>,
        request_timeout: Duration,
    ) -> Self {
        Self {
            keyword: KEYWORD.to_string(),
            naver,
            gemini_key: gemini_key.into(),
            search_endpoint: NAVER_SEARCH_ENDPOINT.to_string(),
            generate_endpoint: GEMINI_GENERATE_ENDPOINT.to_string(),
            output_dir: output_dir.into(),
            request_timeout,
            utc_offset_secs: KST_OFFSET_SECS,
        }
    }

    /// Build and validate a config from parsed CLI arguments.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Config`] if any credential is missing or blank.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = Self::new(
            NaverCredentials {
                client_id: cli.client_id.clone().unwrap_or_default(),
                client_secret: cli.client_secret.clone().unwrap_or_default(),
            },
            cli.gemini_key.clone().unwrap_or_default(),
            &cli.output_dir,
            Duration::from_secs(cli.timeout_secs),
        );
        config.validate()?;
        Ok(config)
    }

    /// Check that every credential is present.
    ///
    /// Runs before any request so a missing variable fails the run up front
    /// instead of surfacing as an API rejection.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("CLIENT_ID", &self.naver.client_id),
            ("CLIENT_SECRET", &self.naver.client_secret),
            ("GEMINI_KEY", &self.gemini_key),
        ];
        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(PipelineError::Config(format!(
                "missing credentials: {}",
                missing.join(", ")
            )))
        }
    }
}
