//! Indexed page records and the table that holds them.

use serde::{Deserialize, Serialize};

/// Text extracted from one source page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// URL path of the page. Unique within a table.
    pub url: String,
    pub title: String,
    /// Heading texts in document order.
    pub headers: Vec<String>,
    /// Headings, then paragraphs, then list items, joined by spaces.
    pub content: String,
}

/// Mapping from page URL to its record.
///
/// Iterates in the order records were first inserted, which follows the
/// configured page order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct IndexTable {
    records: Vec<DocumentRecord>,
}

impl IndexTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, replacing any existing record with the same URL.
    /// Returns the replaced record.
    pub fn insert(&mut self, record: DocumentRecord) -> Option<DocumentRecord> {
        match self.records.iter_mut().find(|r| r.url == record.url) {
            Some(slot) => Some(std::mem::replace(slot, record)),
            None => {
                self.records.push(record);
                None
            }
        }
    }

    pub fn get(&self, url: &str) -> Option<&DocumentRecord> {
        self.records.iter().find(|r| r.url == url)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DocumentRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
