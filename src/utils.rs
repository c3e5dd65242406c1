//! Utility functions for marker-based extraction, log formatting, and file system checks.
//!
//! This module provides helpers used throughout the application:
//! - Literal marker extraction for JSON-like payloads (no JSON parser involved)
//! - String truncation and credential redaction for logs and error messages
//! - File system validation for the output directory

use crate::error::{PipelineError, Result};
use std::fs as stdfs;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument, warn};

/// Extract the text between two literal markers.
///
/// Finds the first `start_marker` in `source`, then the first `end_marker`
/// at or after the position right after it. The text in between is returned
/// with `\"` unescaped to `"` and `\n` replaced by a single space.
///
/// A missing marker is an ordinary outcome and yields `None`.
///
/// # Limitations
///
/// Matching is literal and takes the first hit. A value that contains the end
/// marker is cut at that point; with `"` as the end marker this includes the
/// quote of an escaped `\"`.
///
/// # Examples
///
/// ```ignore
/// let v = extract_field(r#"{"title":"Hello"}"#, "\"title\":\"", "\"");
/// assert_eq!(v.as_deref(), Some("Hello"));
/// ```
pub fn extract_field(source: &str, start_marker: &str, end_marker: &str) -> Option<String> {
    let start = source.find(start_marker)? + start_marker.len();
    let end = start + source[start..].find(end_marker)?;
    Some(
        source[start..end]
            .replace("\\\"", "\"")
            .replace("\\n", " "),
    )
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut to at most `max` bytes, backing off to the previous
/// character boundary, with an ellipsis and the dropped byte count appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

/// Replace the value of a `key=` query parameter with `<redacted>`.
///
/// Used before a URL is logged or stored in an error.
pub fn redact_key(url: &str) -> String {
    match url.find("key=") {
        Some(pos) => {
            let value_start = pos + "key=".len();
            let value_end = url[value_start..]
                .find('&')
                .map_or(url.len(), |i| value_start + i);
            format!("{}<redacted>{}", &url[..value_start], &url[value_end..])
        }
        None => url.to_string(),
    }
}

/// Ensure a directory exists and is writable.
///
/// This function creates the directory if it doesn't exist, then performs
/// a write test by creating and immediately deleting a probe file.
///
/// # Errors
///
/// Returns [`PipelineError::Storage`] if the directory cannot be created or
/// is not writable.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn ensure_writable_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .await
        .map_err(|source| PipelineError::Storage {
            path: path.to_path_buf(),
            source,
        })?;

    let probe_path = path.join("..__probe_write__");
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            remove_probe(&probe_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(source) => Err(PipelineError::Storage {
            path: probe_path,
            source,
        }),
    }
}

/// Delete the write probe, logging a leftover file instead of failing.
fn remove_probe(probe_path: &Path) -> bool {
    match stdfs::remove_file(probe_path) {
        Ok(()) => true,
        Err(e) => {
            warn!(probe = %probe_path.display(), error = %e, "Failed to remove write probe; file left behind");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_field_simple() {
        let src = r#"{"title":"Hello","link":"http://x"}"#;
        assert_eq!(extract_field(src, "\"title\":\"", "\"").as_deref(), Some("Hello"));
        assert_eq!(extract_field(src, "\"link\":\"", "\"").as_deref(), Some("http://x"));
    }

    #[test]
    fn test_extract_field_missing_start_marker() {
        assert_eq!(extract_field(r#"{"title":"Hello"}"#, "\"pubDate\":\"", "\""), None);
        assert_eq!(extract_field("", "\"title\":\"", "\""), None);
    }

    #[test]
    fn test_extract_field_missing_end_marker() {
        assert_eq!(extract_field(r#"{"title":"unterminated"#, "\"title\":\"", "}"), None);
    }

    #[test]
    fn test_extract_field_end_marker_searched_after_start() {
        // The `"` inside the start marker must not count as the terminator.
        let src = r#""title":"x""#;
        assert_eq!(extract_field(src, "\"title\":\"", "\"").as_deref(), Some("x"));
    }

    #[test]
    fn test_extract_field_empty_value() {
        let src = r#"{"description":""}"#;
        assert_eq!(extract_field(src, "\"description\":\"", "\"").as_deref(), Some(""));
    }

    #[test]
    fn test_extract_field_unescapes_newline() {
        let src = r#"{"description":"line one\nline two"}"#;
        assert_eq!(
            extract_field(src, "\"description\":\"", "\"").as_deref(),
            Some("line one line two")
        );
    }

    #[test]
    fn test_extract_field_unescapes_quote_with_other_end_marker() {
        let src = r#"<b>say \"hi\"</b>"#;
        assert_eq!(extract_field(src, "<b>", "</b>").as_deref(), Some(r#"say "hi""#));
    }

    #[test]
    fn test_extract_field_truncates_at_escaped_quote() {
        // The first `"` wins even when it belongs to an escape sequence.
        let src = r#"{"title":"He said \"no\""}"#;
        assert_eq!(extract_field(src, "\"title\":\"", "\"").as_deref(), Some("He said \\"));
    }

    #[test]
    fn test_extract_field_uses_first_occurrence() {
        let src = r#"{"title":"first"},{"title":"second"}"#;
        assert_eq!(extract_field(src, "\"title\":\"", "\"").as_deref(), Some("first"));
    }

    #[test]
    fn test_extract_field_multibyte_value() {
        let src = r#"{"title":"인공지능 뉴스"}"#;
        assert_eq!(
            extract_field(src, "\"title\":\"", "\"").as_deref(),
            Some("인공지능 뉴스")
        );
    }

    #[test]
    fn test_truncate_for_log_short_string() {
        let s = "Hello, world!";
        assert_eq!(truncate_for_log(s, 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_respects_char_boundary() {
        // Each Hangul syllable is three bytes; a cut at 4 must back off to 3.
        let result = truncate_for_log("뉴스요약", 4);
        assert_eq!(result, "뉴…(+9 bytes)");
    }

    #[test]
    fn test_redact_key() {
        assert_eq!(
            redact_key("https://host/v1/models/m:generateContent?key=SECRET"),
            "https://host/v1/models/m:generateContent?key=<redacted>"
        );
        assert_eq!(
            redact_key("https://host/path?key=SECRET&alt=json"),
            "https://host/path?key=<redacted>&alt=json"
        );
        assert_eq!(redact_key("https://host/path?query=AI"), "https://host/path?query=AI");
    }

    #[tokio::test]
    async fn test_ensure_writable_dir_creates_nested() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("a").join("news");
        ensure_writable_dir(&nested).await.unwrap();
        assert!(nested.is_dir());
        assert!(!nested.join("..__probe_write__").exists());
    }

    #[test]
    fn test_remove_probe_reports_failure() {
        let tmp = tempfile::tempdir().unwrap();
        let probe = tmp.path().join("..__probe_write__");
        std::fs::write(&probe, "").unwrap();

        assert!(remove_probe(&probe));
        assert!(!probe.exists());
        // Already gone: logged, not propagated.
        assert!(!remove_probe(&probe));
    }
}
