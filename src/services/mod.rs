//! Service layer for the crawler.
//!
//! This module contains the crawl engine:
//! - Page fetching (`PageFetcher`, `HttpFetcher`)
//! - Listing page parsing (`ListingParser`)
//! - Single letter crawls (`LetterCrawler`)
//! - Bounded fan-out over the alphabet (`CrawlCoordinator`)

mod coordinator;
mod fetcher;
mod letters;
mod parser;

#[cfg(test)]
pub(crate) mod testing;

pub use coordinator::{CrawlCoordinator, CrawlOutcome};
pub use fetcher::{HttpFetcher, PageFetcher};
pub use letters::LetterCrawler;
pub use parser::ListingParser;
