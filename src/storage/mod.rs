//! Storage abstractions for the aggregated report.
//!
//! The report is plain text, one `<letter>,<count>` line per letter:
//!
//! ```text
//! А,412
//! Б,377
//! В,268
//! ```

pub mod local;

use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::AggregateReport;

// Re-export for convenience
pub use local::LocalStorage;

/// Trait for report storage backends.
#[async_trait]
pub trait ReportStorage: Send + Sync {
    /// Write the report, replacing any previous one. Returns where it went.
    async fn write_report(&self, report: &AggregateReport) -> Result<PathBuf>;

    /// Read back the stored report text, if any.
    async fn read_report(&self) -> Result<Option<String>>;
}
