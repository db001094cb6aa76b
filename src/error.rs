// src/error.rs

//! Unified error handling for the crawler.

use std::fmt;

use thiserror::Error;

/// Result type alias for crawler operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Network failure, timeout or non-success status for a page fetch
    #[error("Transport error for {url}: {message}")]
    Transport { url: String, message: String },

    /// Page did not have the expected listing section
    #[error("Parse error for {url}: {message}")]
    Parse { url: String, message: String },

    /// Crawl results could not be reduced into a report
    #[error("Aggregation error: {0}")]
    Aggregation(String),

    /// A letter crawl failed
    #[error("Crawl failed for letter '{letter}': {source}")]
    Letter {
        letter: String,
        #[source]
        source: Box<AppError>,
    },

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP client could not be built
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// CSS selector parsing failed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create a transport error for a URL.
    pub fn transport(url: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Transport {
            url: url.into(),
            message: message.to_string(),
        }
    }

    /// Create a parse error for a URL.
    pub fn parse(url: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Parse {
            url: url.into(),
            message: message.to_string(),
        }
    }

    /// Create an aggregation error.
    pub fn aggregation(message: impl Into<String>) -> Self {
        Self::Aggregation(message.into())
    }

    /// Attach the letter whose crawl produced this error.
    pub fn for_letter(self, letter: impl Into<String>) -> Self {
        Self::Letter {
            letter: letter.into(),
            source: Box::new(self),
        }
    }

    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letter_error_names_letter_and_url() {
        let err = AppError::transport("https://example.org/?from=Б", "HTTP 503").for_letter("Б");
        let text = err.to_string();
        assert!(text.contains("'Б'"));
        assert!(text.contains("https://example.org/?from=Б"));
        assert!(text.contains("HTTP 503"));
    }
}
