//! HTTP transport used by the pipeline.
//!
//! The pipeline only needs "send a request, give me status and body text".
//! [`Transport`] captures that so tests can substitute canned responses;
//! [`ReqwestTransport`] is the real implementation.
//!
//! Bodies of non-success responses are returned, not turned into errors.
//! Only failures to connect, send, or read are errors.

use crate::error::{PipelineError, Result};
use crate::utils::{redact_key, truncate_for_log};
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};

/// Status code and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// Response body with line terminators removed.
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Minimal request interface the pipeline depends on.
pub trait Transport {
    /// Send a GET request with the given headers.
    async fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse>;

    /// Send a POST request with a JSON body.
    async fn post_json(&self, url: &str, body: String) -> Result<HttpResponse>;
}

/// [`Transport`] backed by a single `reqwest` client.
///
/// The client is dropped with the transport, releasing pooled connections.
#[derive(Debug)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| PipelineError::Client(source.without_url()))?;
        Ok(Self { client })
    }
}

impl Transport for ReqwestTransport {
    #[instrument(level = "info", skip_all, fields(url = %redact_key(url)))]
    async fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<HttpResponse> {
        let t0 = Instant::now();
        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        let response = request
            .send()
            .await
            .map_err(|source| transport_error(url, source))?;
        let res = read_response(url, response).await;
        debug!(elapsed_ms = t0.elapsed().as_millis() as u64, "GET finished");
        res
    }

    #[instrument(level = "info", skip_all, fields(url = %redact_key(url)))]
    async fn post_json(&self, url: &str, body: String) -> Result<HttpResponse> {
        let t0 = Instant::now();
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|source| transport_error(url, source))?;
        let res = read_response(url, response).await;
        debug!(elapsed_ms = t0.elapsed().as_millis() as u64, "POST finished");
        res
    }
}

/// Wrap a request failure, keeping only the redacted URL.
///
/// `reqwest::Error` prints the full request URL, query string included, so
/// it is stripped before the error can reach a log line.
fn transport_error(url: &str, source: reqwest::Error) -> PipelineError {
    PipelineError::Transport {
        url: redact_key(url),
        source: source.without_url(),
    }
}

/// Read the whole body regardless of status.
async fn read_response(url: &str, response: reqwest::Response) -> Result<HttpResponse> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|source| transport_error(url, source))?;

    if !status.is_success() {
        warn!(
            status = status.as_u16(),
            body_preview = %truncate_for_log(&body, 300),
            "API returned non-success status; passing body through"
        );
    }

    Ok(HttpResponse {
        status: status.as_u16(),
        body: join_lines(&body),
    })
}

/// Concatenate the lines of `body`, dropping `\n` and `\r\n` terminators.
///
/// Extraction downstream searches for escaped `\n` sequences and assumes the
/// payload is a single line.
fn join_lines(body: &str) -> String {
    body.lines().collect()
}
