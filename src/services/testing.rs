// src/services/testing.rs

//! In-memory listing site for crawler tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{PageShape, RequestOptions, RequestScope};
use crate::services::PageFetcher;

pub const SECTION_TITLE: &str = "Pages in category \"Animals\"";
pub const NEXT_TEXT: &str = "next page";
pub const TEMPLATE: &str = "https://wiki.test/w/index.php?title=Animals&from={}";

pub fn shape() -> PageShape {
    PageShape::new(SECTION_TITLE).with_next_page_marker(NEXT_TEXT)
}

/// URL of the first page for `letter`, normalised the way `Url` prints it.
pub fn letter_url(letter: &str) -> String {
    normalise(&TEMPLATE.replacen("{}", letter, 1))
}

fn normalise(url: &str) -> String {
    Url::parse(url).map(|u| u.to_string()).unwrap_or_else(|_| url.to_string())
}

/// MediaWiki-like category page.
pub fn listing_html(entries: &[&str], next: Option<&str>) -> String {
    let items: String = entries
        .iter()
        .map(|e| format!(r#"<li><a href="/wiki/{e}" title="{e}">{e}</a></li>"#))
        .collect();
    let next = next
        .map(|href| format!(r#"(<a href="{href}">{NEXT_TEXT}</a>)"#))
        .unwrap_or_default();
    format!(
        r#"<html><body><div id="mw-pages"><h2>{SECTION_TITLE}</h2>{next}
           <div class="mw-category mw-category-columns"><ul>{items}</ul></div>{next}
           </div></body></html>"#
    )
}

/// Fake fetcher serving registered pages and recording every fetch.
#[derive(Default)]
pub struct FakeSite {
    pages: HashMap<String, String>,
    delay: Duration,
    fetches: Mutex<Vec<String>>,
    fetched_at: Mutex<Vec<Instant>>,
    scopes: Mutex<Vec<(String, Option<RequestOptions>)>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeSite {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listing page. `next` is an absolute or relative href.
    pub fn page(self, url: &str, entries: &[&str], next: Option<&str>) -> Self {
        let html = listing_html(entries, next);
        self.raw(url, html)
    }

    pub fn raw(mut self, url: &str, html: impl Into<String>) -> Self {
        self.pages.insert(normalise(url), html.into());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.lock().unwrap().len()
    }

    pub fn fetched(&self, url: &str) -> bool {
        let url = normalise(url);
        self.fetches.lock().unwrap().iter().any(|u| *u == url)
    }

    /// When each fetch started, in order.
    pub fn fetch_times(&self) -> Vec<Instant> {
        self.fetched_at.lock().unwrap().clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Options that were active when `url` was fetched.
    pub fn options_seen_for(&self, url: &str) -> Option<RequestOptions> {
        let url = normalise(url);
        self.scopes
            .lock()
            .unwrap()
            .iter()
            .find(|(u, _)| *u == url)
            .and_then(|(_, o)| o.clone())
    }
}

#[async_trait]
impl PageFetcher for FakeSite {
    async fn fetch(&self, url: &Url, scope: &RequestScope) -> Result<String> {
        self.fetches.lock().unwrap().push(url.to_string());
        self.fetched_at.lock().unwrap().push(Instant::now());
        self.scopes
            .lock()
            .unwrap()
            .push((url.to_string(), scope.active().cloned()));

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        self.pages
            .get(url.as_str())
            .cloned()
            .ok_or_else(|| AppError::transport(url.as_str(), "HTTP 404 Not Found"))
    }
}
