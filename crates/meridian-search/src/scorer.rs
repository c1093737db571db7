//! Relevance scoring for a single entry against a query.
//!
//! Scores are additive. Whole-query matches dominate, keyword hits come next
//! and per-word partial matches only break ties between otherwise similar
//! entries. Keyword hits are capped so that a heavily tagged entry cannot
//! outrank one whose title is the query itself.

use crate::entry::SearchEntry;
use std::collections::HashSet;

pub const EXACT_TITLE: u32 = 100;
pub const TITLE_CONTAINS: u32 = 50;
pub const DESCRIPTION_CONTAINS: u32 = 30;
pub const CONTENT_CONTAINS: u32 = 20;
pub const CATEGORY_CONTAINS: u32 = 15;
pub const KEYWORD_MATCH: u32 = 25;
pub const KEYWORD_CAP: u32 = 3 * KEYWORD_MATCH;
pub const WORD_IN_TITLE: u32 = 10;
pub const WORD_IN_DESCRIPTION: u32 = 5;
pub const WORD_IN_CONTENT: u32 = 3;

/// Shortest query (in characters) worth searching for.
pub const MIN_QUERY_LEN: usize = 2;

/// A query lowercased and split once, reused across every entry.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedQuery {
    pub text: String,
    pub words: Vec<String>,
}

impl PreparedQuery {
    /// Returns `None` when the trimmed query is too short to search.
    pub fn new(raw: &str) -> Option<Self> {
        let text = raw.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();
        if text.chars().count() < MIN_QUERY_LEN {
            return None;
        }
        let mut seen = HashSet::new();
        let words = text
            .split(' ')
            .filter(|w| w.chars().count() >= MIN_QUERY_LEN)
            .filter(|w| seen.insert(*w))
            .map(str::to_string)
            .collect();
        Some(Self { text, words })
    }
}

/// Scores `entry` against `query`; zero means "not a match".
pub fn score(entry: &SearchEntry, query: &PreparedQuery) -> u32 {
    let q = query.text.as_str();
    let title = entry.title.to_lowercase();
    let description = entry.description.to_lowercase();
    let content = entry.content.to_lowercase();
    let category = entry.category.to_lowercase();

    let mut total = 0;

    if title == q {
        total += EXACT_TITLE;
    }
    if title.contains(q) {
        total += TITLE_CONTAINS;
    }
    if description.contains(q) {
        total += DESCRIPTION_CONTAINS;
    }
    if content.contains(q) {
        total += CONTENT_CONTAINS;
    }
    if category.contains(q) {
        total += CATEGORY_CONTAINS;
    }

    let keywords: HashSet<String> = entry.keywords.iter().map(|k| k.to_lowercase()).collect();
    let keyword_hits = keywords
        .iter()
        .filter(|k| !k.is_empty())
        .filter(|k| k.contains(q) || query.words.iter().any(|w| w == *k))
        .count() as u32;
    total += (keyword_hits * KEYWORD_MATCH).min(KEYWORD_CAP);

    for word in &query.words {
        if title.contains(word.as_str()) {
            total += WORD_IN_TITLE;
        }
        if description.contains(word.as_str()) {
            total += WORD_IN_DESCRIPTION;
        }
        if content.contains(word.as_str()) {
            total += WORD_IN_CONTENT;
        }
    }

    total
}
