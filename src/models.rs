//! Data models flowing through a single pipeline run.
//!
//! This module defines the values each stage hands to the next:
//! - [`SearchQuery`]: the keyword and its percent-encoded form
//! - [`NewsItem`] / [`NewsSelection`]: what the selector made of the search response
//! - [`SummaryResult`]: what the summary extractor made of the generation response
//! - [`Document`]: everything the writer needs to render one Markdown file
//!
//! "Not found" outcomes are variants here, not errors. They render as visible
//! placeholder text so a run still produces a document.

use std::fmt;

/// Placeholder rendered for a [`NewsItem`] field that was not extracted.
pub const MISSING_FIELD: &str = "N/A";

/// A search keyword together with its URL-safe encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// The keyword as configured.
    pub keyword: String,
    /// The keyword percent-encoded for use in a query string.
    pub encoded: String,
}

impl SearchQuery {
    pub fn new(keyword: &str) -> Self {
        Self {
            keyword: keyword.to_string(),
            encoded: urlencoding::encode(keyword).into_owned(),
        }
    }
}

/// The four fields pulled from the first search result.
///
/// Each field is independently optional; a missing title does not invalidate
/// the link. Defaults are applied only when rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewsItem {
    pub title: Option<String>,
    pub link: Option<String>,
    pub description: Option<String>,
    /// The `pubDate` field, verbatim.
    pub published_at: Option<String>,
}

impl fmt::Display for NewsItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let or_missing = |v: &Option<String>| v.as_deref().unwrap_or(MISSING_FIELD).to_string();
        writeln!(f, "제목: {}", or_missing(&self.title))?;
        writeln!(f, "링크: {}", or_missing(&self.link))?;
        writeln!(f, "설명: {}", or_missing(&self.description))?;
        writeln!(f, "게시일: {}", or_missing(&self.published_at))
    }
}

/// Outcome of selecting the first item from a search response.
///
/// Selection cannot fail: any payload, error-shaped or truncated, maps to one
/// of these two variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewsSelection {
    /// An item was found; some of its fields may still be absent.
    Item(NewsItem),
    /// No `"items":` list, or no `{`/`}` pair after it.
    NoItems,
}

impl fmt::Display for NewsSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NewsSelection::Item(item) => write!(f, "{item}"),
            NewsSelection::NoItems => f.write_str("뉴스 데이터 없음"),
        }
    }
}

/// Outcome of pulling the generated text out of a generation response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryResult {
    Text(String),
    /// The response never mentions `text`.
    FieldNotFound,
    /// `text` was found but no `\n` escape follows it.
    TerminatorNotFound,
}

impl fmt::Display for SummaryResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryResult::Text(text) => f.write_str(text),
            SummaryResult::FieldNotFound => f.write_str("text 필드 없음"),
            SummaryResult::TerminatorNotFound => f.write_str("text 종료 지점 없음"),
        }
    }
}

/// A fully assembled output document.
///
/// Built once from the run's results, then rendered and written.
#[derive(Debug, Clone)]
pub struct Document {
    pub keyword: String,
    pub news: NewsSelection,
    pub summary: SummaryResult,
    /// Human-readable local time of the run, e.g. `2024년 01월 01일 09시 05분`.
    /// Also used in the filename.
    pub timestamp: String,
}
