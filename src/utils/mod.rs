//! Utility functions and helpers.

pub mod http;
pub mod log;

use scraper::Selector;
use url::Url;

use crate::error::{AppError, Result};

/// Resolve a potentially relative URL against a base URL.
pub fn resolve_url(base: &Url, href: &str) -> Result<Url> {
    Ok(base.join(href)?)
}

/// Compile a CSS selector, keeping the source text in the error.
pub fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_url() {
        let base = Url::parse("https://ru.wikipedia.org/w/index.php?title=X&from=A").unwrap();
        assert_eq!(
            resolve_url(&base, "/w/index.php?title=X&pagefrom=B").unwrap().as_str(),
            "https://ru.wikipedia.org/w/index.php?title=X&pagefrom=B"
        );
        assert_eq!(
            resolve_url(&base, "?title=X&pagefrom=C").unwrap().as_str(),
            "https://ru.wikipedia.org/w/index.php?title=X&pagefrom=C"
        );
        assert_eq!(
            resolve_url(&base, "https://other.org/x").unwrap().as_str(),
            "https://other.org/x"
        );
    }

    #[test]
    fn test_parse_selector() {
        assert!(parse_selector("div#mw-pages").is_ok());
        assert!(parse_selector("div.mw-category.mw-category-columns").is_ok());
        assert!(parse_selector("[[invalid").is_err());
    }
}
