//! Document schema for the story corpus.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A short story in the search corpus.
///
/// The field types line up with the index mapping: `author` and
/// `document_type` are exact-match keywords, `text` is run through the
/// full-text analyzer, and `date` is stored as a `yyyy-MM-dd` calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryDocument {
    /// Author of the story (exact-match field).
    pub author: String,
    /// Genre label such as "terror" or "infantil" (exact-match field).
    pub document_type: String,
    /// Full story text (analyzed field).
    pub text: String,
    /// Publication date.
    pub date: NaiveDate,
}

impl StoryDocument {
    /// Create a new story document.
    pub fn new(
        author: impl Into<String>,
        document_type: impl Into<String>,
        text: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            author: author.into(),
            document_type: document_type.into(),
            text: text.into(),
            date,
        }
    }
}
