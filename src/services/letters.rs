// src/services/letters.rs

//! Per-letter crawl.
//!
//! Walks the listing pages for one letter. Each page is handled in two
//! phases: the whole page is partitioned into matching and non-matching
//! entries, then the crawl decides whether to follow the next link. It
//! follows only when every entry on the page matched; one entry from
//! another letter means the listing has moved past this letter's range.

use url::Url;

use crate::error::Result;
use crate::models::{CrawlConfig, LetterResult, PageResult, RequestScope};
use crate::services::{ListingParser, PageFetcher};

enum CrawlState {
    Fetching(Url),
    Done,
}

/// Outcome of scanning one page for a letter.
#[derive(Debug, Default, PartialEq, Eq)]
struct PageScan {
    matched: Vec<String>,
    mismatched: usize,
}

impl PageScan {
    fn partition(entries: Vec<String>, letter: &str) -> Self {
        let mut scan = Self::default();
        for entry in entries {
            if entry.starts_with(letter) {
                scan.matched.push(entry);
            } else {
                scan.mismatched += 1;
            }
        }
        scan
    }

    fn stays_in_range(&self) -> bool {
        !self.matched.is_empty() && self.mismatched == 0
    }
}

/// Crawls the pages of single letters. Holds no per-letter state.
pub struct LetterCrawler<'a> {
    fetcher: &'a dyn PageFetcher,
    parser: &'a ListingParser,
    config: &'a CrawlConfig,
}

impl<'a> LetterCrawler<'a> {
    pub fn new(
        fetcher: &'a dyn PageFetcher,
        parser: &'a ListingParser,
        config: &'a CrawlConfig,
    ) -> Self {
        Self {
            fetcher,
            parser,
            config,
        }
    }

    /// Collect every entry starting with `letter`.
    ///
    /// Fetch and parse errors are returned as-is.
    pub async fn crawl(&self, letter: &str, scope: &RequestScope) -> Result<LetterResult> {
        let mut accumulator = Vec::new();
        let mut state = CrawlState::Fetching(Url::parse(&self.config.letter_url(letter))?);
        let mut pages = 0usize;

        loop {
            let url = match state {
                CrawlState::Fetching(url) => url,
                CrawlState::Done => break,
            };

            if pages > 0 && !self.config.request_delay.is_zero() {
                tokio::time::sleep(self.config.request_delay).await;
            }

            let page = self.fetch_page(&url, scope).await?;
            pages += 1;

            let scan = PageScan::partition(page.entries, letter);
            let proceed = scan.stays_in_range();
            log::debug!(
                "Letter '{}' page {}: {} matched, {} outside range",
                letter,
                pages,
                scan.matched.len(),
                scan.mismatched
            );
            accumulator.extend(scan.matched);

            state = match page.next_page_url {
                Some(next) if proceed => CrawlState::Fetching(next),
                _ => CrawlState::Done,
            };
        }

        log::info!(
            "Letter '{}': {} entries over {} page(s)",
            letter,
            accumulator.len(),
            pages
        );
        Ok(LetterResult::new(letter, accumulator))
    }

    async fn fetch_page(&self, url: &Url, scope: &RequestScope) -> Result<PageResult> {
        let html = self.fetcher.fetch(url, scope).await?;
        self.parser.parse(&html, url)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time::Instant;

    use super::*;
    use crate::error::AppError;
    use crate::services::testing::{self, FakeSite, letter_url};

    fn config(alphabet: &str) -> CrawlConfig {
        CrawlConfig::new(testing::TEMPLATE, alphabet, testing::shape(), 2).unwrap()
    }

    async fn crawl(site: &FakeSite, letter: &str) -> Result<LetterResult> {
        let config = config(letter);
        let parser = ListingParser::new(&config.shape).unwrap();
        LetterCrawler::new(site, &parser, &config)
            .crawl(letter, &RequestScope::root())
            .await
    }

    #[test]
    fn scan_drains_whole_page() {
        let scan = PageScan::partition(
            vec!["Ant".into(), "Bee".into(), "Apple".into()],
            "A",
        );
        assert_eq!(scan.matched, vec!["Ant", "Apple"]);
        assert_eq!(scan.mismatched, 1);
        assert!(!scan.stays_in_range());
    }

    #[test]
    fn empty_page_does_not_continue() {
        assert!(!PageScan::partition(vec![], "A").stays_in_range());
    }

    #[tokio::test]
    async fn follows_pages_until_a_foreign_entry() {
        let p2 = "https://wiki.test/w/index.php?title=Animals&pagefrom=Ape";
        let p3 = "https://wiki.test/w/index.php?title=Animals&pagefrom=Bat";
        let p4 = "https://wiki.test/w/index.php?title=Animals&pagefrom=Bee";
        let site = FakeSite::new()
            .page(&letter_url("A"), &["Aardvark", "Ant"], Some(p2))
            .page(p2, &["Ape", "Asp"], Some(p3))
            .page(p3, &["Auk", "Bat"], Some(p4))
            .page(p4, &["Bee"], None);

        let result = crawl(&site, "A").await.unwrap();

        assert_eq!(result.letter, "A");
        assert_eq!(result.matched_entries, vec!["Aardvark", "Ant", "Ape", "Asp", "Auk"]);
        assert_eq!(site.fetch_count(), 3);
        assert!(!site.fetched(p4));
    }

    #[tokio::test]
    async fn stops_after_second_page_with_one_mismatch() {
        let p2 = "https://wiki.test/w/index.php?title=Animals&pagefrom=Axolotl";
        let p3 = "https://wiki.test/w/index.php?title=Animals&pagefrom=Cat";
        let site = FakeSite::new()
            .page(&letter_url("B"), &["Badger", "Bear"], Some(p2))
            .page(p2, &["Cat", "Beaver", "Bison"], Some(p3))
            .page(p3, &["Bull"], None);

        let result = crawl(&site, "B").await.unwrap();

        assert_eq!(result.matched_entries, vec!["Badger", "Bear", "Beaver", "Bison"]);
        assert_eq!(site.fetch_count(), 2);
        assert!(!site.fetched(p3));
    }

    #[tokio::test]
    async fn stops_when_there_is_no_next_link() {
        let site = FakeSite::new().page(&letter_url("C"), &["Cat", "Cow"], None);
        let result = crawl(&site, "C").await.unwrap();
        assert_eq!(result.count(), 2);
        assert_eq!(site.fetch_count(), 1);
    }

    #[tokio::test]
    async fn first_entry_out_of_range_gives_empty_result() {
        let next = "https://wiki.test/w/index.php?title=Animals&pagefrom=Zebu";
        let site = FakeSite::new().page(&letter_url("Y"), &["Zebra", "Zebu"], Some(next));

        let result = crawl(&site, "Y").await.unwrap();

        assert!(result.is_empty());
        assert_eq!(site.fetch_count(), 1);
    }

    #[tokio::test]
    async fn matches_are_a_prefix_of_the_letter() {
        let site = FakeSite::new().page(
            &letter_url("Ж"),
            &["Жаба", "Журавль", "Зебра", "Жук"],
            None,
        );
        let result = crawl(&site, "Ж").await.unwrap();
        assert_eq!(result.matched_entries, vec!["Жаба", "Журавль", "Жук"]);
        assert!(result.matched_entries.iter().all(|e| e.starts_with("Ж")));
    }

    #[tokio::test(start_paused = true)]
    async fn waits_request_delay_before_follow_up_pages() {
        let delay = Duration::from_millis(250);
        let p2 = "https://wiki.test/w/index.php?title=Animals&pagefrom=Gnu";
        let p3 = "https://wiki.test/w/index.php?title=Animals&pagefrom=Goat";
        let site = FakeSite::new()
            .page(&letter_url("G"), &["Gecko"], Some(p2))
            .page(p2, &["Gnu"], Some(p3))
            .page(p3, &["Goat", "Heron"], None);
        let config = config("G").with_request_delay(delay);
        let parser = ListingParser::new(&config.shape).unwrap();

        let started = Instant::now();
        let result = LetterCrawler::new(&site, &parser, &config)
            .crawl("G", &RequestScope::root())
            .await
            .unwrap();

        assert_eq!(result.count(), 3);
        let times = site.fetch_times();
        assert_eq!(times.len(), 3);
        assert_eq!(times[0] - started, Duration::ZERO);
        for pair in times.windows(2) {
            assert!(pair[1] - pair[0] >= delay);
        }
    }

    #[tokio::test]
    async fn fetch_failure_propagates() {
        let site = FakeSite::new();
        let err = crawl(&site, "Q").await.unwrap_err();
        assert!(matches!(err, AppError::Transport { .. }));
    }

    #[tokio::test]
    async fn parse_failure_on_later_page_propagates() {
        let p2 = "https://wiki.test/w/index.php?title=Animals&pagefrom=Emu";
        let site = FakeSite::new()
            .page(&letter_url("E"), &["Eel"], Some(p2))
            .raw(p2, "<html><body>maintenance</body></html>");

        let err = crawl(&site, "E").await.unwrap_err();
        assert!(matches!(err, AppError::Parse { .. }));
    }
}
