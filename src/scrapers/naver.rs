//! Naver News search client and first-item selector.
//!
//! The search response is not parsed as JSON. The first item is located by
//! literal markers and its fields are pulled out with
//! [`extract_field`](crate::utils::extract_field).
//!
//! # URL Pattern
//!
//! ```text
//! https://openapi.naver.com/v1/search/news?query=<encoded keyword>&sort=date&display=1
//! ```
//!
//! Authentication is two headers, `X-Naver-Client-Id` and
//! `X-Naver-Client-Secret`.

use crate::config::NaverCredentials;
use crate::error::Result;
use crate::models::{NewsItem, NewsSelection, SearchQuery};
use crate::transport::{HttpResponse, Transport};
use crate::utils::extract_field;
use tracing::{debug, info, instrument};

const ITEMS_MARKER: &str = "\"items\":";

/// Build the search URL for the newest single result.
pub fn search_url(endpoint: &str, query: &SearchQuery) -> String {
    format!("{endpoint}?query={}&sort=date&display=1", query.encoded)
}

/// Fetch the raw search response for `query`.
///
/// The body is returned whatever the status code; an error payload is handed
/// to [`select_first_item`] like any other.
#[instrument(level = "info", skip_all, fields(keyword = %query.keyword))]
pub async fn fetch_latest<T: Transport>(
    transport: &T,
    endpoint: &str,
    credentials: &NaverCredentials,
    query: &SearchQuery,
) -> Result<HttpResponse> {
    let url = search_url(endpoint, query);
    let headers = [
        ("X-Naver-Client-Id", credentials.client_id.as_str()),
        ("X-Naver-Client-Secret", credentials.client_secret.as_str()),
    ];
    let response = transport.get(&url, &headers).await?;
    info!(
        status = response.status,
        bytes = response.body.len(),
        "Fetched Naver search response"
    );
    Ok(response)
}

/// Pick the first item out of a search response.
///
/// The item spans from the first `{` after `"items":` to the first `}` after
/// that brace. Brace depth is not tracked, so an item holding a nested object
/// ends at the nested object's closing brace.
///
/// Never fails and never panics: a missing list or missing braces gives
/// [`NewsSelection::NoItems`]. Both braces are ASCII, so the located range
/// always lies on character boundaries.
pub fn select_first_item(search_response: &str) -> NewsSelection {
    let Some(items_at) = search_response.find(ITEMS_MARKER) else {
        debug!("No items marker in search response");
        return NewsSelection::NoItems;
    };
    let after_items = items_at + ITEMS_MARKER.len();

    let Some(open) = search_response[after_items..].find('{').map(|i| after_items + i) else {
        return NewsSelection::NoItems;
    };
    let Some(close) = search_response[open..].find('}').map(|i| open + i) else {
        return NewsSelection::NoItems;
    };
    let item = &search_response[open..=close];

    NewsSelection::Item(NewsItem {
        title: extract_field(item, "\"title\":\"", "\""),
        link: extract_field(item, "\"link\":\"", "\""),
        description: extract_field(item, "\"description\":\"", "\""),
        published_at: extract_field(item, "\"pubDate\":\"", "\""),
    })
}
