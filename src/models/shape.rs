// src/models/shape.rs

//! How to find the listing inside a page of a category family.

use serde::{Deserialize, Serialize};

/// Selectors and marker texts for one family of listing pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageShape {
    /// Exact heading text identifying the listing section
    pub section_title: String,

    /// Visible text of the "next page" link
    #[serde(default = "default_next_page_marker")]
    pub next_page_marker_text: String,

    /// Selector for heading elements inside a section candidate
    #[serde(default = "default_title_selector")]
    pub title_selector: String,

    /// Selector for the element holding the entry links
    #[serde(default = "default_list_selector")]
    pub list_selector: String,

    /// Selector for listing section candidates
    #[serde(default = "default_section_selector")]
    pub section_selector: String,
}

fn default_next_page_marker() -> String {
    "Следующая страница".to_string()
}

fn default_title_selector() -> String {
    "h2".to_string()
}

fn default_list_selector() -> String {
    "div.mw-category.mw-category-columns".to_string()
}

fn default_section_selector() -> String {
    "div#mw-pages".to_string()
}

impl PageShape {
    /// Shape of a MediaWiki category page with the given heading.
    pub fn new(section_title: impl Into<String>) -> Self {
        Self {
            section_title: section_title.into(),
            next_page_marker_text: default_next_page_marker(),
            title_selector: default_title_selector(),
            list_selector: default_list_selector(),
            section_selector: default_section_selector(),
        }
    }

    /// Override the "next page" link text.
    pub fn with_next_page_marker(mut self, text: impl Into<String>) -> Self {
        self.next_page_marker_text = text.into();
        self
    }
}

impl Default for PageShape {
    fn default() -> Self {
        Self::new("Страницы в категории «Животные по алфавиту»")
    }
}
