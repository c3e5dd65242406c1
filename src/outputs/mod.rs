//! Output generation.
//!
//! # Submodules
//!
//! - [`markdown`]: renders a [`Document`](crate::models::Document) and writes it to disk
//!
//! # Output Structure
//!
//! ```text
//! news/
//! ├── latest_ai_news_2024년 01월 01일 09시 05분.md
//! └── latest_ai_news_2024년 01월 01일 15시 30분.md
//! ```

pub mod markdown;
