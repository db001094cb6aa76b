// src/services/coordinator.rs

//! Runs one letter crawl per alphabet letter with bounded concurrency.

use std::sync::Arc;

use futures::stream::{self, StreamExt};

use crate::error::{AppError, Result};
use crate::models::{CrawlConfig, LetterResult, RequestScope};
use crate::services::{LetterCrawler, ListingParser, PageFetcher};

/// Per-letter outcomes of a run, in completion order.
#[derive(Debug, Default)]
pub struct CrawlOutcome {
    pub results: Vec<LetterResult>,
    /// Failed letters, each wrapped in [`AppError::Letter`]
    pub failures: Vec<AppError>,
}

impl CrawlOutcome {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// All results, or the first failure if any letter failed.
    pub fn into_results(self) -> Result<Vec<LetterResult>> {
        match self.failures.into_iter().next() {
            Some(error) => Err(error),
            None => Ok(self.results),
        }
    }
}

/// Fans letter crawls out over a shared fetcher.
pub struct CrawlCoordinator {
    config: CrawlConfig,
    parser: ListingParser,
    fetcher: Arc<dyn PageFetcher>,
}

impl CrawlCoordinator {
    pub fn new(config: CrawlConfig, fetcher: Arc<dyn PageFetcher>) -> Result<Self> {
        let parser = ListingParser::new(&config.shape)?;
        Ok(Self {
            config,
            parser,
            fetcher,
        })
    }

    /// Crawl every letter, at most `concurrency_limit` at a time.
    ///
    /// Every crawl runs to completion or failure; a failing letter does not
    /// stop the others. Each crawl gets its own snapshot of `scope`.
    pub async fn crawl_all(&self, scope: &RequestScope) -> CrawlOutcome {
        let concurrency = self.config.concurrency_limit.max(1);
        let crawler = LetterCrawler::new(self.fetcher.as_ref(), &self.parser, &self.config);
        let crawler = &crawler;

        log::info!(
            "Crawling {} letters, {} at a time",
            self.config.alphabet.len(),
            concurrency
        );

        let mut letter_stream = stream::iter(self.config.alphabet.iter())
            .map(|letter| {
                let scope = scope.snapshot();
                async move {
                    let result = crawler.crawl(letter, &scope).await;
                    (letter, result)
                }
            })
            .buffer_unordered(concurrency);

        let mut outcome = CrawlOutcome::default();
        while let Some((letter, result)) = letter_stream.next().await {
            match result {
                Ok(letter_result) => outcome.results.push(letter_result),
                Err(error) => {
                    log::warn!("Letter '{}' failed: {}", letter, error);
                    outcome.failures.push(error.for_letter(letter.as_str()));
                }
            }
        }
        outcome
    }
}
