// src/models/page.rs

//! Per-page and per-letter crawl data.

use serde::Serialize;
use url::Url;

/// Entries and pagination link extracted from one listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult {
    /// Entry names in document order
    pub entries: Vec<String>,
    /// Absolute URL of the following page, if the page links one
    pub next_page_url: Option<Url>,
}

impl PageResult {
    pub fn new(entries: Vec<String>, next_page_url: Option<Url>) -> Self {
        Self {
            entries,
            next_page_url,
        }
    }
}

/// Entries collected for one alphabet letter.
///
/// Every entry starts with `letter`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LetterResult {
    pub letter: String,
    pub matched_entries: Vec<String>,
}

impl LetterResult {
    pub fn new(letter: impl Into<String>, matched_entries: Vec<String>) -> Self {
        Self {
            letter: letter.into(),
            matched_entries,
        }
    }

    pub fn count(&self) -> usize {
        self.matched_entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matched_entries.is_empty()
    }
}
