//! News search sources.
//!
//! Each source module exports:
//! - `fetch_latest()`: requests the newest result and returns the raw response
//! - `select_first_item()`: turns that raw response into a
//!   [`NewsSelection`](crate::models::NewsSelection) without failing
//!
//! # Supported Sources
//!
//! | Source | Module | Method | Notes |
//! |--------|--------|--------|-------|
//! | Naver News | [`naver`] | Search API | Requires client id and secret headers |

pub mod naver;
