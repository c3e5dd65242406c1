//! Gemini summarization call and summary extraction.
//!
//! The request body is built with `serde`, but the response is read the same
//! way as the search response: by literal markers, without a JSON parser.
//!
//! # Request
//!
//! ```text
//! POST <generate-endpoint>?key=<api key>
//! {"contents":[{"parts":[{"text":"<prompt + news text>"}]}]}
//! ```
//!
//! # Response extraction
//!
//! The generated text is taken to start a fixed number of characters after
//! the first `text` in the body and to end at the first escaped newline
//! (`\n`). For Gemini's `"text": "` layout the skip lands exactly on the
//! first character of the value.

use crate::error::Result;
use crate::models::SummaryResult;
use crate::transport::Transport;
use crate::utils::truncate_for_log;
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Instruction placed before the news text.
pub const SUMMARY_PROMPT: &str = "다음 뉴스를 100자 이내로 요약해줘:\n";

const TEXT_MARKER: &str = "text";

/// Characters skipped from the marker position before the marker length is
/// skipped a second time.
const MARKER_SKIP: usize = 4;

/// An escaped newline inside a JSON string: backslash followed by `n`.
const ESCAPED_NEWLINE: &str = "\\n";

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

/// The full prompt sent for `news_text`.
pub fn build_prompt(news_text: &str) -> String {
    format!("{SUMMARY_PROMPT}{news_text}")
}

/// Serialize the `generateContent` request body for `prompt`.
pub fn request_body(prompt: &str) -> Result<String> {
    let request = GenerateContentRequest {
        contents: vec![Content {
            parts: vec![Part {
                text: prompt.to_string(),
            }],
        }],
    };
    Ok(serde_json::to_string(&request)?)
}

pub fn generate_url(endpoint: &str, api_key: &str) -> String {
    format!("{endpoint}?key={}", urlencoding::encode(api_key))
}

/// Ask Gemini to summarize `news_text` and extract the generated text.
///
/// Transport failures are returned as errors. Anything wrong with the
/// response content comes back as a [`SummaryResult`] sentinel.
#[instrument(level = "info", skip_all)]
pub async fn summarize<T: Transport>(
    transport: &T,
    endpoint: &str,
    api_key: &str,
    news_text: &str,
) -> Result<SummaryResult> {
    let t0 = Instant::now();
    let body = request_body(&build_prompt(news_text))?;
    let response = transport
        .post_json(&generate_url(endpoint, api_key), body)
        .await?;

    debug!(
        status = response.status,
        response = %truncate_for_log(&response.body, 2000),
        "Gemini response"
    );

    let summary = extract_summary(&response.body);
    let elapsed_ms = t0.elapsed().as_millis() as u64;
    match &summary {
        SummaryResult::Text(text) => {
            info!(elapsed_ms, chars = text.chars().count(), "Extracted summary")
        }
        sentinel => warn!(elapsed_ms, result = %sentinel, "No summary text in Gemini response"),
    }
    Ok(summary)
}

/// Pull the generated text out of a `generateContent` response body.
///
/// Starting at the first `text`, skips [`MARKER_SKIP`] characters and then
/// the marker's length again, and reads up to the next escaped newline.
/// Skips are counted in characters.
pub fn extract_summary(response: &str) -> SummaryResult {
    let Some(marker_at) = response.find(TEXT_MARKER) else {
        return SummaryResult::FieldNotFound;
    };

    let skip = MARKER_SKIP + TEXT_MARKER.chars().count();
    let Some(start) = advance_chars(response, marker_at, skip) else {
        return SummaryResult::TerminatorNotFound;
    };
    let Some(end) = response[start..].find(ESCAPED_NEWLINE).map(|i| start + i) else {
        return SummaryResult::TerminatorNotFound;
    };

    SummaryResult::Text(response[start..end].replace(ESCAPED_NEWLINE, " "))
}

/// Byte offset reached by moving `n` characters forward from `from`.
///
/// Landing exactly on the end of `s` is allowed; going past it is `None`.
fn advance_chars(s: &str, from: usize, n: usize) -> Option<usize> {
    s[from..]
        .char_indices()
        .map(|(i, _)| from + i)
        .chain(std::iter::once(s.len()))
        .nth(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::testing::CannedTransport;

    const GEMINI_RESPONSE: &str = concat!(
        r#"{  "candidates": [    {      "content": {        "parts": [          {            "#,
        r#""text": "AI 반도체 수출이 늘었다는 소식.\n"          }        ],        "role": "model"      },"#,
        r#"      "finishReason": "STOP"    }  ],  "modelVersion": "gemini-2.0-flash"}"#
    );

    #[test]
    fn test_extract_summary_basic() {
        assert_eq!(
            extract_summary(r#"..."text": "Short summary\n"..."#),
            SummaryResult::Text("Short summary".to_string())
        );
    }

    #[test]
    fn test_extract_summary_joined_gemini_body() {
        assert_eq!(
            extract_summary(GEMINI_RESPONSE),
            SummaryResult::Text("AI 반도체 수출이 늘었다는 소식.".to_string())
        );
    }

    #[test]
    fn test_extract_summary_stops_at_first_escaped_newline() {
        assert_eq!(
            extract_summary(r#"{"text": "first line\nsecond line\n"}"#),
            SummaryResult::Text("first line".to_string())
        );
    }

    #[test]
    fn test_extract_summary_field_not_found() {
        let error_body = r#"{"error": {"code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT"}}"#;
        assert_eq!(extract_summary(error_body), SummaryResult::FieldNotFound);
        assert_eq!(extract_summary(""), SummaryResult::FieldNotFound);
    }

    #[test]
    fn test_extract_summary_terminator_not_found() {
        assert_eq!(
            extract_summary(r#"{"text": "no newline escape"}"#),
            SummaryResult::TerminatorNotFound
        );
    }

    #[test]
    fn test_extract_summary_marker_at_end() {
        // Not enough characters left to skip.
        assert_eq!(extract_summary("text"), SummaryResult::TerminatorNotFound);
        assert_eq!(extract_summary("text\":"), SummaryResult::TerminatorNotFound);
    }

    #[test]
    fn test_extract_summary_skip_lands_exactly_on_end() {
        assert_eq!(extract_summary("text\": \""), SummaryResult::TerminatorNotFound);
    }

    #[test]
    fn test_extract_summary_skip_is_fixed_not_layout_aware() {
        // Without the space after the colon the skip eats the first character.
        assert_eq!(
            extract_summary(r#"{"text":"Short\n"}"#),
            SummaryResult::Text("hort".to_string())
        );
    }

    #[test]
    fn test_extract_summary_skip_counts_characters() {
        // Multibyte characters inside the skipped region must not split a char.
        assert_eq!(
            extract_summary("text한글한글요약\\n"),
            SummaryResult::Text("요약".to_string())
        );
    }

    #[test]
    fn test_advance_chars() {
        assert_eq!(advance_chars("abcdef", 1, 2), Some(3));
        assert_eq!(advance_chars("abc", 0, 3), Some(3));
        assert_eq!(advance_chars("abc", 0, 4), None);
        assert_eq!(advance_chars("가나", 0, 1), Some(3));
    }

    #[test]
    fn test_build_prompt() {
        assert_eq!(build_prompt("제목: A\n"), "다음 뉴스를 100자 이내로 요약해줘:\n제목: A\n");
    }

    #[test]
    fn test_request_body_shape() {
        let body = request_body("line one\nsays \"hi\"").unwrap();
        let value: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(
            value["contents"][0]["parts"][0]["text"],
            serde_json::Value::String("line one\nsays \"hi\"".to_string())
        );
    }

    #[test]
    fn test_generate_url() {
        assert_eq!(
            generate_url("https://example.com/models/m:generateContent", "abc-123_x"),
            "https://example.com/models/m:generateContent?key=abc-123_x"
        );
    }

    #[tokio::test]
    async fn test_summarize_posts_prompt_and_extracts() {
        let transport = CannedTransport::new("", GEMINI_RESPONSE);
        let summary = summarize(&transport, "https://gen.example/m:generateContent", "k", "제목: A\n")
            .await
            .unwrap();
        assert_eq!(
            summary,
            SummaryResult::Text("AI 반도체 수출이 늘었다는 소식.".to_string())
        );

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "POST");
        assert_eq!(requests[0].url, "https://gen.example/m:generateContent?key=k");
        let body: serde_json::Value =
            serde_json::from_str(requests[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body["contents"][0]["parts"][0]["text"],
            serde_json::Value::String(build_prompt("제목: A\n"))
        );
    }

    #[tokio::test]
    async fn test_summarize_error_status_becomes_sentinel() {
        let transport = CannedTransport::with_status(
            200,
            "",
            403,
            r#"{"error": {"code": 403, "message": "denied"}}"#,
        );
        let summary = summarize(&transport, "https://gen.example", "k", "news")
            .await
            .unwrap();
        assert_eq!(summary, SummaryResult::FieldNotFound);
    }
}
