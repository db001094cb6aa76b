//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::{CrawlConfig, PageShape, RequestOptions};
use crate::utils::parse_selector;

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP and crawling behavior settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Which listing to crawl and how to read it
    #[serde(default)]
    pub listing: ListingConfig,

    /// Transport options active for the whole run
    #[serde(default)]
    pub request: RequestOptions,

    /// Report destination
    #[serde(default)]
    pub output: OutputConfig,

    /// Console output settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::validation("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == 0 {
            return Err(AppError::validation("crawler.timeout_secs must be > 0"));
        }
        if self.crawler.max_concurrent == 0 {
            return Err(AppError::validation("crawler.max_concurrent must be > 0"));
        }

        let shape = &self.listing.shape;
        if shape.section_title.trim().is_empty() {
            return Err(AppError::validation("listing.shape.section_title is empty"));
        }
        if shape.next_page_marker_text.trim().is_empty() {
            return Err(AppError::validation(
                "listing.shape.next_page_marker_text is empty",
            ));
        }
        for selector in [
            &shape.section_selector,
            &shape.title_selector,
            &shape.list_selector,
        ] {
            parse_selector(selector)?;
        }

        self.request.timeout()?;
        self.crawl_config().map(|_| ())
    }

    /// Run settings derived from this configuration.
    pub fn crawl_config(&self) -> Result<CrawlConfig> {
        Ok(CrawlConfig::new(
            &self.listing.url_template,
            &self.listing.alphabet,
            self.listing.shape.clone(),
            self.crawler.max_concurrent,
        )?
        .with_request_delay(Duration::from_millis(self.crawler.request_delay_ms)))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            crawler: CrawlerConfig::default(),
            listing: ListingConfig::default(),
            request: RequestOptions::default(),
            output: OutputConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// HTTP client and crawling behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Delay before each follow-up page of a letter, in milliseconds
    #[serde(default = "defaults::request_delay")]
    pub request_delay_ms: u64,

    /// Maximum letters crawled concurrently
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            request_delay_ms: defaults::request_delay(),
            max_concurrent: defaults::max_concurrent(),
        }
    }
}

/// The category listing to count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingConfig {
    /// Listing URL with `{}` where the letter goes
    #[serde(default = "defaults::url_template")]
    pub url_template: String,

    /// Letters to crawl, in order
    #[serde(default = "defaults::alphabet")]
    pub alphabet: String,

    #[serde(default)]
    pub shape: PageShape,

    /// Write a report for succeeded letters even when others fail
    #[serde(default)]
    pub allow_partial: bool,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            url_template: defaults::url_template(),
            alphabet: defaults::alphabet(),
            shape: PageShape::default(),
            allow_partial: false,
        }
    }
}

/// Report destination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "defaults::output_path")]
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: defaults::output_path(),
        }
    }
}

/// Console output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level for the console formatter
    #[serde(default = "defaults::log_level")]
    pub level: String,

    /// Print per-letter lines after the crawl
    #[serde(default = "defaults::show_progress")]
    pub show_progress: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
            show_progress: defaults::show_progress(),
        }
    }
}

mod defaults {
    use std::path::PathBuf;

    // Crawler defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; alphacrawl/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn request_delay() -> u64 {
        0
    }
    pub fn max_concurrent() -> usize {
        10
    }

    // Listing defaults
    pub fn url_template() -> String {
        "https://ru.wikipedia.org/w/index.php?title=Категория:Животные_по_алфавиту&from={}".into()
    }
    pub fn alphabet() -> String {
        "АБВГДЕЖЗИКЛМНОПРСТУФХЦЧШЩЭЮЯ".into()
    }

    // Output defaults
    pub fn output_path() -> PathBuf {
        PathBuf::from("result.csv")
    }

    // Logging defaults
    pub fn log_level() -> String {
        "info".into()
    }
    pub fn show_progress() -> bool {
        true
    }
}
