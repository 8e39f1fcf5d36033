//! Type-as-you-search matching over articles.
//!
//! # Responsibility
//! - Decide whether a query is long enough to count as a search.
//! - Match articles case-insensitively on title, content and tags.
//!
//! # Invariants
//! - Queries shorter than [`MIN_QUERY_LEN`] are "no search", not errors.
//! - Matching is a plain substring test; no ranking or tokenization.

use crate::model::article::Article;

/// Minimum query length that triggers a search, in UTF-16 code units.
///
/// Counted the way the browser search box counts, so one emoji outside the
/// Basic Multilingual Plane already reaches it.
pub const MIN_QUERY_LEN: usize = 2;

/// Normalized search text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    needle: String,
}

impl SearchQuery {
    /// Parses raw input from the search box.
    ///
    /// Returns `None` when the input is shorter than [`MIN_QUERY_LEN`];
    /// callers then show the unfiltered listing instead.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.encode_utf16().count() < MIN_QUERY_LEN {
            return None;
        }
        Some(Self {
            needle: raw.to_lowercase(),
        })
    }

    /// Returns whether `article` matches on title, content or any tag.
    pub fn matches(&self, article: &Article) -> bool {
        contains_folded(&article.title, &self.needle)
            || contains_folded(&article.content, &self.needle)
            || article
                .tags
                .iter()
                .any(|tag| contains_folded(tag, &self.needle))
    }
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
