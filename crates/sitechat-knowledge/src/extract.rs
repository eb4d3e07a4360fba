//! HTML text extraction.
//!
//! Only the primary content container is read. Inside it, headings,
//! paragraphs and list items are collected separately and concatenated in
//! that fixed order, not interleaved.

use scraper::{ElementRef, Html, Selector};
use sitechat_core::error::{Result, SiteChatError};

use crate::document::DocumentRecord;

const HEADING_SELECTOR: &str = "h1, h2, h3";
const PARAGRAPH_SELECTOR: &str = "p";
const LIST_ITEM_SELECTOR: &str = "li";
const TITLE_SELECTOR: &str = "title";

/// Pre-parsed selectors for turning a page into a [`DocumentRecord`].
#[derive(Debug, Clone)]
pub struct Extractor {
    container: Selector,
    headings: Selector,
    paragraphs: Selector,
    list_items: Selector,
    title: Selector,
}

fn parse_selector(css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| SiteChatError::Config(format!("Invalid selector '{css}': {e:?}")))
}

impl Extractor {
    /// Build an extractor for the given content container selector (e.g. `main`).
    pub fn new(container: &str) -> Result<Self> {
        Ok(Self {
            container: parse_selector(container)?,
            headings: parse_selector(HEADING_SELECTOR)?,
            paragraphs: parse_selector(PARAGRAPH_SELECTOR)?,
            list_items: parse_selector(LIST_ITEM_SELECTOR)?,
            title: parse_selector(TITLE_SELECTOR)?,
        })
    }

    /// Extract a record from raw markup. `None` when the page has no content container.
    pub fn extract(&self, url: &str, markup: &str) -> Option<DocumentRecord> {
        let document = Html::parse_document(markup);
        let main = document.select(&self.container).next()?;

        let headers = texts(main, &self.headings);
        let paragraphs = texts(main, &self.paragraphs);
        let list_items = texts(main, &self.list_items);

        let content = headers
            .iter()
            .chain(&paragraphs)
            .chain(&list_items)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ");

        let title = document
            .select(&self.title)
            .next()
            .map(|t| collapse_whitespace(&t.text().collect::<String>()))
            .unwrap_or_default();

        Some(DocumentRecord {
            url: url.to_string(),
            title,
            headers,
            content,
        })
    }
}

/// Trimmed text content of every element under `root` matching `selector`.
fn texts(root: ElementRef<'_>, selector: &Selector) -> Vec<String> {
    root.select(selector)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .collect()
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
