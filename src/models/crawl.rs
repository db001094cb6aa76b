// src/models/crawl.rs

//! Immutable settings for one crawl run.

use std::time::Duration;

use unicode_segmentation::UnicodeSegmentation;

use crate::error::{AppError, Result};
use crate::models::PageShape;

/// Placeholder replaced by the letter in a URL template.
pub const LETTER_PLACEHOLDER: &str = "{}";

/// What to crawl and how wide.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Listing URL with one `{}` placeholder for the letter
    pub url_template: String,
    /// Distinct letters, in alphabet order
    pub alphabet: Vec<String>,
    pub shape: PageShape,
    /// Maximum number of letter crawls in flight
    pub concurrency_limit: usize,
    /// Pause before each follow-up page of a letter
    pub request_delay: Duration,
}

impl CrawlConfig {
    pub fn new(
        url_template: impl Into<String>,
        alphabet: &str,
        shape: PageShape,
        concurrency_limit: usize,
    ) -> Result<Self> {
        let url_template = url_template.into();
        if !url_template.contains(LETTER_PLACEHOLDER) {
            return Err(AppError::validation(format!(
                "url template '{url_template}' has no {LETTER_PLACEHOLDER} placeholder"
            )));
        }
        if concurrency_limit == 0 {
            return Err(AppError::validation("concurrency limit must be > 0"));
        }

        let alphabet = split_alphabet(alphabet);
        if alphabet.is_empty() {
            return Err(AppError::validation("alphabet is empty"));
        }

        Ok(Self {
            url_template,
            alphabet,
            shape,
            concurrency_limit,
            request_delay: Duration::ZERO,
        })
    }

    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }

    /// First listing page URL for `letter`.
    pub fn letter_url(&self, letter: &str) -> String {
        self.url_template.replacen(LETTER_PLACEHOLDER, letter, 1)
    }
}

/// Split an alphabet into distinct user-perceived characters.
///
/// Whitespace is dropped; repeated letters keep their first position.
pub fn split_alphabet(alphabet: &str) -> Vec<String> {
    let mut letters: Vec<String> = Vec::new();
    for grapheme in alphabet.graphemes(true) {
        if grapheme.trim().is_empty() {
            continue;
        }
        if letters.iter().any(|l| l == grapheme) {
            log::warn!("Letter '{grapheme}' appears more than once in the alphabet");
            continue;
        }
        letters.push(grapheme.to_string());
    }
    letters
}
