//! Error types for the story search repository.

mod search_error;

pub use search_error::SearchError;
