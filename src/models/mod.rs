// src/models/mod.rs

//! Domain models for the crawler.
//!
//! Configuration, per-page and per-letter data, the aggregated report and
//! scoped transport options.

mod config;
mod crawl;
mod page;
mod report;
mod request;
mod shape;

// Re-export all public types
pub use config::{Config, CrawlerConfig, ListingConfig, LoggingConfig, OutputConfig};
pub use crawl::{CrawlConfig, LETTER_PLACEHOLDER, split_alphabet};
pub use page::{LetterResult, PageResult};
pub use report::AggregateReport;
pub use request::{RequestOptions, RequestScope};
pub use shape::PageShape;

/// Option keys understood by the HTTP fetcher.
pub mod request_keys {
    pub use super::request::{HEADER_PREFIX, PROXY, TIMEOUT_SECS, USER_AGENT};
}
