// src/pipeline/collect.rs

//! Crawl → aggregate → write.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;

use crate::error::{AppError, Result};
use crate::models::{AggregateReport, CrawlConfig, CrawlerConfig, PageShape, RequestScope};
use crate::services::{CrawlCoordinator, HttpFetcher, PageFetcher};
use crate::storage::{LocalStorage, ReportStorage};
use crate::utils::log;

/// What to do when some letters fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Fail the run with the first letter error; nothing is written
    #[default]
    Abort,
    /// Write the report for the letters that succeeded
    WritePartial,
}

/// Result of a collect run.
#[derive(Debug)]
pub struct CollectSummary {
    pub report: AggregateReport,
    pub destination: PathBuf,
    /// Letter failures tolerated under [`FailurePolicy::WritePartial`]
    pub failures: Vec<AppError>,
}

/// Crawl every letter of `crawl`, then write the per-letter counts.
pub async fn run_collect(
    crawl: CrawlConfig,
    policy: FailurePolicy,
    scope: &RequestScope,
    fetcher: Arc<dyn PageFetcher>,
    storage: &dyn ReportStorage,
) -> Result<CollectSummary> {
    let start_time = Utc::now();
    let letter_count = crawl.alphabet.len();
    log::header(&format!("Collecting listing counts for {letter_count} letters"));

    log::step(1, 3, "Crawl - walking listing pages");
    let coordinator = CrawlCoordinator::new(crawl, fetcher)?;
    let outcome = coordinator.crawl_all(scope).await;

    let (results, failures) = match policy {
        FailurePolicy::Abort => (outcome.into_results()?, Vec::new()),
        FailurePolicy::WritePartial => {
            for failure in &outcome.failures {
                log::warn(&format!("Skipping failed letter: {failure}"));
            }
            (outcome.results, outcome.failures)
        }
    };

    log::step(2, 3, "Aggregate - counting entries per letter");
    let report = AggregateReport::from_results(&results)?;

    log::step(3, 3, "Write - saving report");
    let destination = storage.write_report(&report).await?;

    let elapsed = Utc::now() - start_time;
    log::summary(
        "Collect",
        &[
            ("Letters crawled", letter_count.to_string()),
            ("Letters with entries", report.len().to_string()),
            ("Entries", report.total().to_string()),
            ("Failed letters", failures.len().to_string()),
            ("Elapsed", format!("{:.1}s", elapsed.num_milliseconds() as f64 / 1000.0)),
        ],
    );
    log::success(&format!("Report saved to {}", destination.display()));

    Ok(CollectSummary {
        report,
        destination,
        failures,
    })
}

/// Count a listing over HTTP with default client settings and no scoped options.
pub async fn collect(
    url_template: &str,
    alphabet: &str,
    shape: PageShape,
    concurrency_limit: usize,
    output_path: impl Into<PathBuf>,
) -> Result<PathBuf> {
    collect_scoped(
        &RequestScope::root(),
        url_template,
        alphabet,
        shape,
        concurrency_limit,
        output_path,
    )
    .await
}

/// [`collect`] with the options active in `scope` applied to every fetch.
pub async fn collect_scoped(
    scope: &RequestScope,
    url_template: &str,
    alphabet: &str,
    shape: PageShape,
    concurrency_limit: usize,
    output_path: impl Into<PathBuf>,
) -> Result<PathBuf> {
    let crawl = CrawlConfig::new(url_template, alphabet, shape, concurrency_limit)?;
    let fetcher = Arc::new(HttpFetcher::new(CrawlerConfig::default())?);
    let storage = LocalStorage::new(output_path);

    let summary = run_collect(crawl, FailurePolicy::Abort, scope, fetcher, &storage).await?;
    Ok(summary.destination)
}

/// Blocking form of [`collect`]. Must not be called from inside a runtime.
pub fn collect_blocking(
    url_template: &str,
    alphabet: &str,
    shape: PageShape,
    concurrency_limit: usize,
    output_path: impl Into<PathBuf>,
) -> Result<PathBuf> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(collect(
        url_template,
        alphabet,
        shape,
        concurrency_limit,
        output_path,
    ))
}
