//! Markdown document rendering and writing.
//!
//! One run produces one file:
//!
//! ```text
//! <output_dir>/latest_ai_news_<YYYY년 MM월 DD일 HH시 mm분>.md
//! ```
//!
//! The timestamp has minute resolution, so a second run within the same
//! minute replaces the first run's file.

use crate::error::{PipelineError, Result};
use crate::models::Document;
use chrono::{DateTime, FixedOffset, Utc};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, instrument, warn};

const TIMESTAMP_FORMAT: &str = "%Y년 %m월 %d일 %H시 %M분";

/// Format `now` in the zone `utc_offset_secs` east of UTC.
///
/// # Errors
///
/// Returns [`PipelineError::Config`] if the offset is outside ±24h.
pub fn format_timestamp(now: DateTime<Utc>, utc_offset_secs: i32) -> Result<String> {
    let zone = FixedOffset::east_opt(utc_offset_secs).ok_or_else(|| {
        PipelineError::Config(format!("invalid UTC offset: {utc_offset_secs}s"))
    })?;
    Ok(now.with_timezone(&zone).format(TIMESTAMP_FORMAT).to_string())
}

pub fn document_filename(timestamp: &str) -> String {
    format!("latest_ai_news_{timestamp}.md")
}

/// Render a [`Document`] as Markdown.
pub fn document_to_markdown(document: &Document) -> String {
    format!(
        "# 최신 {} 뉴스 요약\n\n## 원본 뉴스\n{}\n\n## 요약\n{}\n",
        document.keyword,
        document.news.to_string().trim_end(),
        document.summary
    )
}

/// Write `document` into `output_dir`, creating the directory if needed.
///
/// The file is written in a single call, so a failure leaves no partial
/// document behind the returned error.
///
/// # Returns
///
/// The path of the written file.
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir.display(), timestamp = %document.timestamp))]
pub async fn write_document(output_dir: &Path, document: &Document) -> Result<PathBuf> {
    fs::create_dir_all(output_dir)
        .await
        .map_err(|source| PipelineError::Storage {
            path: output_dir.to_path_buf(),
            source,
        })?;

    let path = output_dir.join(document_filename(&document.timestamp));
    match fs::try_exists(&path).await {
        Ok(true) => {
            warn!(path = %path.display(), "Document for this minute already exists; overwriting")
        }
        Ok(false) => {}
        // The write below reports anything that actually blocks it.
        Err(e) => debug!(path = %path.display(), error = %e, "Could not check for an existing document"),
    }

    let markdown = document_to_markdown(document);
    fs::write(&path, markdown)
        .await
        .map_err(|source| PipelineError::Storage {
            path: path.clone(),
            source,
        })?;

    info!(path = %path.display(), "Wrote news digest Markdown");
    Ok(path)
}
