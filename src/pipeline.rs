//! End-to-end run: search, select, summarize, persist.
//!
//! A run moves through [`Stage`]s in a fixed order with no retries:
//!
//! ```text
//! Init -> Fetched -> Selected -> Summarized -> Persisted
//! ```
//!
//! Transport and storage failures end the run with an error and nothing is
//! written. Extraction misses do not: they travel on as placeholder text and
//! the document is still written.

use crate::api;
use crate::config::Config;
use crate::error::Result;
use crate::models::{Document, NewsSelection, SearchQuery};
use crate::outputs::markdown;
use crate::scrapers::naver;
use crate::transport::Transport;
use crate::utils::ensure_writable_dir;
use chrono::{DateTime, Utc};
use std::fmt;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, instrument};

/// Progress marker for a run, used in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Init,
    Fetched,
    Selected,
    Summarized,
    Persisted,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Init => "init",
            Stage::Fetched => "fetched",
            Stage::Selected => "selected",
            Stage::Summarized => "summarized",
            Stage::Persisted => "persisted",
        };
        f.write_str(name)
    }
}

/// One pipeline run over an injected config and transport.
pub struct Pipeline<'a, T> {
    config: &'a Config,
    transport: &'a T,
}

impl<'a, T: Transport> Pipeline<'a, T> {
    pub fn new(config: &'a Config, transport: &'a T) -> Self {
        Self { config, transport }
    }

    /// Run the pipeline, stamping the document with the current time.
    pub async fn run(&self) -> Result<PathBuf> {
        self.run_at(Utc::now()).await
    }

    /// Run the pipeline as if it were `now`.
    ///
    /// # Returns
    ///
    /// The path of the written document.
    #[instrument(level = "info", skip_all, fields(keyword = %self.config.keyword))]
    pub async fn run_at(&self, now: DateTime<Utc>) -> Result<PathBuf> {
        let t0 = Instant::now();
        let config = self.config;

        let timestamp = markdown::format_timestamp(now, config.utc_offset_secs)?;
        let query = SearchQuery::new(&config.keyword);
        ensure_writable_dir(&config.output_dir).await?;
        info!(stage = %Stage::Init, query = %query.encoded, %timestamp, "Pipeline initialized");

        let response =
            naver::fetch_latest(self.transport, &config.search_endpoint, &config.naver, &query)
                .await?;
        info!(
            stage = %Stage::Fetched,
            status = response.status,
            success = response.is_success(),
            "Search response received"
        );

        let news = naver::select_first_item(&response.body);
        info!(
            stage = %Stage::Selected,
            found = matches!(news, NewsSelection::Item(_)),
            "First news item selected"
        );

        let news_text = news.to_string();
        let summary = api::summarize(
            self.transport,
            &config.generate_endpoint,
            &config.gemini_key,
            &news_text,
        )
        .await?;
        info!(stage = %Stage::Summarized, "Summary extracted");

        let document = Document {
            keyword: query.keyword,
            news,
            summary,
            timestamp,
        };
        let path = markdown::write_document(&config.output_dir, &document).await?;
        info!(
            stage = %Stage::Persisted,
            path = %path.display(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Pipeline complete"
        );

        Ok(path)
    }
}
