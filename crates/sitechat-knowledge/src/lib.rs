//! # SiteChat Knowledge
//!
//! In-memory "retrieval" for a small static website. No vector DB, no
//! embeddings, no ranking.
//!
//! ## How it works
//! ```text
//! startup / reindex
//!   ↓ Indexer::build (read each page, extract <main> text)
//! IndexTable  ──publish──▶  SharedIndex (Arc swap)
//!
//! User: "What do F1 students need?"
//!   ↓ Matcher::respond(query, snapshot)
//! keywords > 3 chars → substring match over page text → context blob
//!   ↓
//! canned answer picked by topic keywords (first rule wins)
//! ```

pub mod document;
pub mod extract;
pub mod index;
pub mod matcher;
pub mod rules;

pub use document::{DocumentRecord, IndexTable};
pub use extract::Extractor;
pub use index::{Indexer, PageSource, SharedIndex};
pub use matcher::{Matcher, Response};
pub use rules::{AnswerRule, Topic};
