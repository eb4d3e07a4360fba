//! Error taxonomy shared across SiteChat crates.

use std::path::PathBuf;

/// Errors raised while indexing pages or answering queries.
#[derive(Debug, thiserror::Error)]
pub enum SiteChatError {
    /// The caller supplied a query that cannot be matched (missing or blank).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A source document could not be read. Non-fatal during indexing.
    #[error("Failed to load {}: {source}", path.display())]
    SourceLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config error: {0}")]
    Config(String),

    /// Unexpected failure while matching. Never shown verbatim to clients.
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SiteChatError {
    /// True for errors caused by the request rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

pub type Result<T> = std::result::Result<T, SiteChatError>;
