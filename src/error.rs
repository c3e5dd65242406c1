//! Fatal error kinds for a pipeline run.
//!
//! Only failures that abort the run live here. Extraction misses (missing
//! markers, missing item braces, missing summary terminator) are ordinary
//! values in [`crate::models`] and never reach this type.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop the pipeline before a document is written.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Required configuration is missing or unusable.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// A request body could not be serialized.
    #[error("Failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),

    /// Connecting, sending, or reading a response body failed.
    ///
    /// `url` has credentials redacted.
    #[error("API request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Creating the output directory or writing the document failed.
    #[error("Failed to write {}: {source}", .path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, PipelineError>;
