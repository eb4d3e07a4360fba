//! Query matching over an [`IndexTable`].

use serde::Serialize;
use sitechat_core::error::{Result, SiteChatError};

use crate::document::{DocumentRecord, IndexTable};
use crate::rules::{self, AnswerRule, Topic};

/// Tokens must be longer than this many characters to count as keywords.
pub const MIN_KEYWORD_LEN: usize = 3;

/// Characters of page content included per context block.
pub const CONTEXT_SNIPPET_CHARS: usize = 500;

/// Result of answering one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Response {
    pub answer: String,
    pub topic: Topic,
    /// Context built from matching pages. Not used to pick the answer.
    pub context: String,
    /// URLs of the pages that matched.
    pub sources: Vec<String>,
}

/// Picks canned answers and builds page context for queries.
#[derive(Debug, Clone)]
pub struct Matcher {
    rules: &'static [AnswerRule],
    fallback_context: String,
}

impl Matcher {
    pub fn new(fallback_context: impl Into<String>) -> Self {
        Self {
            rules: rules::RULES,
            fallback_context: fallback_context.into(),
        }
    }

    pub fn with_rules(mut self, rules: &'static [AnswerRule]) -> Self {
        self.rules = rules;
        self
    }

    /// Answer text only.
    pub fn answer(&self, query: &str, table: &IndexTable) -> Result<String> {
        self.respond(query, table).map(|r| r.answer)
    }

    pub fn respond(&self, query: &str, table: &IndexTable) -> Result<Response> {
        if query.trim().is_empty() {
            return Err(SiteChatError::InvalidInput("Query is required".into()));
        }
        let query = query.to_lowercase();

        let keywords = significant_keywords(&query);
        let matches = matching_records(table, &keywords);
        let context = if matches.is_empty() {
            self.fallback_context.clone()
        } else {
            build_context(&matches)
        };
        let (topic, answer) = rules::select(self.rules, &query);

        tracing::debug!(
            keywords = ?keywords,
            matched = matches.len(),
            context_len = context.len(),
            topic = ?topic,
            "query matched"
        );

        Ok(Response {
            answer: answer.to_string(),
            topic,
            context,
            sources: matches.iter().map(|r| r.url.clone()).collect(),
        })
    }
}

/// Whitespace-separated tokens longer than [`MIN_KEYWORD_LEN`] characters.
pub fn significant_keywords(query: &str) -> Vec<&str> {
    query
        .split_whitespace()
        .filter(|w| w.chars().count() > MIN_KEYWORD_LEN)
        .collect()
}

/// Records whose lowercased content contains at least one keyword, in table order.
pub fn matching_records<'a>(table: &'a IndexTable, keywords: &[&str]) -> Vec<&'a DocumentRecord> {
    if keywords.is_empty() {
        return Vec::new();
    }
    table
        .iter()
        .filter(|record| {
            let content = record.content.to_lowercase();
            keywords.iter().any(|k| content.contains(k))
        })
        .collect()
}

/// One `Page:`/`Content:` block per record, separated by blank lines.
pub fn build_context(records: &[&DocumentRecord]) -> String {
    records
        .iter()
        .map(|r| format!("Page: {}\nContent: {}...", r.title, snippet(&r.content)))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn snippet(content: &str) -> &str {
    match content.char_indices().nth(CONTEXT_SNIPPET_CHARS) {
        Some((idx, _)) => &content[..idx],
        None => content,
    }
}
