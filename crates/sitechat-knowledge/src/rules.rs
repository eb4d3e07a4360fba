//! Canned answers keyed by topic keywords.
//!
//! Rules are checked in order against the lowercased query; the first rule
//! with any keyword contained in the query wins.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    Visa,
    Contact,
    SelfDescription,
    Fallback,
}

/// One (keywords → answer) entry.
#[derive(Debug, Clone, Copy)]
pub struct AnswerRule {
    pub topic: Topic,
    /// Lowercase substrings; phrases allowed.
    pub keywords: &'static [&'static str],
    pub answer: &'static str,
}

impl AnswerRule {
    /// `query` must already be lowercase.
    pub fn matches(&self, query: &str) -> bool {
        self.keywords.iter().any(|k| query.contains(k))
    }
}

pub const VISA_ANSWER: &str = "F1 visas are for international students. Be sure to maintain full-time enrollment, get authorization before working, and keep your I-20 valid. Check out our F1-Students page for more details!";

pub const CONTACT_ANSWER: &str = "You can contact us by email at info@ragchatbotdemo.com, by phone at +1 (555) 123-4567, or by filling out the form on our Contact page.";

pub const SELF_DESCRIPTION_ANSWER: &str = "I'm a RAG (Retrieval-Augmented Generation) chatbot. I search through the content of this website to find relevant information to answer your questions. This helps me provide accurate information specific to this site's content.";

pub const FALLBACK_ANSWER: &str =
    "I'm sorry, I don't have specific information about that on this website.";

/// Default rule set, in priority order.
pub const RULES: &[AnswerRule] = &[
    AnswerRule {
        topic: Topic::Visa,
        keywords: &["f1", "student", "visa"],
        answer: VISA_ANSWER,
    },
    AnswerRule {
        topic: Topic::Contact,
        keywords: &["contact", "reach", "email"],
        answer: CONTACT_ANSWER,
    },
    AnswerRule {
        topic: Topic::SelfDescription,
        keywords: &["rag", "chatbot", "how do you work"],
        answer: SELF_DESCRIPTION_ANSWER,
    },
];

/// First matching rule's topic and answer, or the fallback.
pub fn select(rules: &[AnswerRule], query: &str) -> (Topic, &'static str) {
    rules
        .iter()
        .find(|r| r.matches(query))
        .map(|r| (r.topic, r.answer))
        .unwrap_or((Topic::Fallback, FALLBACK_ANSWER))
}
