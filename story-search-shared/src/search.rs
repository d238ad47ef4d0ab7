//! Search result types.
//!
//! These types are the parsed form of the service's search and aggregation
//! responses. Sources are partial because queries may request only a subset
//! of fields via `_source` filtering.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Partial view of a stored story, as returned inside a search hit.
///
/// Every field is optional: `_source` filtering can trim any of them away.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorySource {
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub document_type: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl StorySource {
    /// Preview of the story text, truncated to at most `max_chars` characters.
    ///
    /// Returns `None` when the hit carries no text field. Truncation counts
    /// characters, not bytes, so accented text is cut cleanly.
    pub fn text_preview(&self, max_chars: usize) -> Option<String> {
        let text = self.text.as_ref()?;
        if text.chars().count() <= max_chars {
            Some(text.clone())
        } else {
            let truncated: String = text.chars().take(max_chars).collect();
            Some(format!("{}...", truncated))
        }
    }
}

/// A single search hit.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    /// Document identifier assigned at index time.
    pub id: String,
    /// Relevance score; absent in filter-only contexts.
    pub score: Option<f64>,
    /// The stored fields returned for this hit.
    pub source: StorySource,
}

/// Parsed response of a search request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResponse {
    /// Total number of matching documents.
    pub total: u64,
    /// The returned hits, in relevance order.
    pub hits: Vec<SearchHit>,
}

impl SearchResponse {
    /// An empty response.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// One bucket of a terms aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct TermBucket {
    /// The field value this bucket groups.
    pub key: String,
    /// Number of documents with that value.
    pub doc_count: u64,
}
