//! Page indexing and the process-wide index snapshot.

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use sitechat_core::config::SiteConfig;
use sitechat_core::error::{Result, SiteChatError};

use crate::document::{DocumentRecord, IndexTable};
use crate::extract::Extractor;

/// A configured page: its URL identifier and where to read it from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSource {
    pub url: String,
    pub path: PathBuf,
}

/// Builds an [`IndexTable`] from a fixed list of page sources.
#[derive(Debug, Clone)]
pub struct Indexer {
    sources: Vec<PageSource>,
    extractor: Extractor,
}

impl Indexer {
    pub fn new(sources: Vec<PageSource>, extractor: Extractor) -> Self {
        Self { sources, extractor }
    }

    /// Create an indexer from site configuration, resolving page paths against the site root.
    pub fn from_config(site: &SiteConfig) -> Result<Self> {
        let extractor = Extractor::new(&site.content_selector)?;
        let sources = site
            .pages
            .iter()
            .map(|p| PageSource {
                url: p.url.clone(),
                path: site.resolve(&p.path),
            })
            .collect();
        Ok(Self::new(sources, extractor))
    }

    pub fn sources(&self) -> &[PageSource] {
        &self.sources
    }

    /// Read and extract a single source. `Ok(None)` when the page has no content container.
    pub fn load(&self, source: &PageSource) -> Result<Option<DocumentRecord>> {
        let markup = std::fs::read_to_string(&source.path).map_err(|e| SiteChatError::SourceLoad {
            path: source.path.clone(),
            source: e,
        })?;
        Ok(self.extractor.extract(&source.url, &markup))
    }

    /// Run one full indexing pass. Failing sources are logged and skipped.
    pub fn build(&self) -> IndexTable {
        let mut table = IndexTable::new();
        for source in &self.sources {
            match self.load(source) {
                Ok(Some(record)) => {
                    if table.insert(record).is_some() {
                        tracing::warn!(url = %source.url, "Duplicate page URL, keeping the later source");
                    }
                }
                Ok(None) => {
                    tracing::debug!(path = %source.path.display(), "No content container, page skipped");
                }
                Err(e) => {
                    tracing::warn!("Error processing {}: {e}", source.url);
                }
            }
        }
        tracing::info!("Indexed {} pages.", table.len());
        table
    }
}

/// Holder of the current index table.
///
/// Readers take an `Arc` snapshot; a reindex builds a complete table first
/// and then swaps the reference, so no reader ever sees a partial table.
#[derive(Debug, Default)]
pub struct SharedIndex {
    current: RwLock<Arc<IndexTable>>,
}

impl SharedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(table: IndexTable) -> Self {
        Self {
            current: RwLock::new(Arc::new(table)),
        }
    }

    /// The table as of now. Later publishes do not affect a taken snapshot.
    pub fn snapshot(&self) -> Result<Arc<IndexTable>> {
        let guard = self
            .current
            .read()
            .map_err(|_| SiteChatError::Internal("index lock poisoned".into()))?;
        Ok(Arc::clone(&guard))
    }

    /// Replace the current table.
    pub fn publish(&self, table: IndexTable) -> Result<Arc<IndexTable>> {
        let next = Arc::new(table);
        let mut guard = self
            .current
            .write()
            .map_err(|_| SiteChatError::Internal("index lock poisoned".into()))?;
        *guard = Arc::clone(&next);
        Ok(next)
    }

    /// Build a fresh table with `indexer` and publish it. Returns the page count.
    pub fn reindex(&self, indexer: &Indexer) -> Result<usize> {
        let table = indexer.build();
        let count = table.len();
        self.publish(table)?;
        Ok(count)
    }
}
