// src/services/parser.rs

//! Listing page parser.
//!
//! Finds the listing section whose heading matches the configured title,
//! then reads entry names from the first list element after it and the
//! "next page" link from anywhere after it.

use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{PageResult, PageShape};
use crate::utils::{parse_selector, resolve_url};

/// A [`PageShape`] with its selectors compiled.
pub struct ListingParser {
    shape: PageShape,
    section: Selector,
    title: Selector,
    list: Selector,
    anchor: Selector,
}

impl ListingParser {
    pub fn new(shape: &PageShape) -> Result<Self> {
        Ok(Self {
            shape: shape.clone(),
            section: parse_selector(&shape.section_selector)?,
            title: parse_selector(&shape.title_selector)?,
            list: parse_selector(&shape.list_selector)?,
            anchor: parse_selector("a")?,
        })
    }

    /// Extract entries and the next page link from `html` fetched at `page_url`.
    pub fn parse(&self, html: &str, page_url: &Url) -> Result<PageResult> {
        let document = Html::parse_document(html);

        let section = self.find_section(&document).ok_or_else(|| {
            AppError::parse(
                page_url.as_str(),
                format!("no section titled '{}'", self.shape.section_title),
            )
        })?;

        let list = following(&document, section)
            .find(|el| self.list.matches(el))
            .ok_or_else(|| {
                AppError::parse(
                    page_url.as_str(),
                    format!("no '{}' after the listing heading", self.shape.list_selector),
                )
            })?;

        let entries = list
            .select(&self.anchor)
            .filter_map(|a| a.value().attr("title"))
            .map(str::to_string)
            .collect();

        let next_page_url = following(&document, section)
            .filter(|el| el.value().name() == "a")
            .filter(|a| text_of(a) == self.shape.next_page_marker_text.trim())
            .find_map(|a| a.value().attr("href"))
            .map(|href| resolve_url(page_url, href))
            .transpose()?;

        Ok(PageResult::new(entries, next_page_url))
    }

    fn find_section<'a>(&self, document: &'a Html) -> Option<ElementRef<'a>> {
        let wanted = self.shape.section_title.trim();
        document
            .select(&self.section)
            .find(|candidate| candidate.select(&self.title).any(|t| text_of(&t) == wanted))
    }
}

/// Elements after `start` in document order, descendants of `start` included.
fn following<'a>(document: &'a Html, start: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    let start_id = start.id();
    document
        .tree
        .root()
        .descendants()
        .skip_while(move |node| node.id() != start_id)
        .skip(1)
        .filter_map(ElementRef::wrap)
}

fn text_of(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
