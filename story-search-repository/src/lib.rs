//! # Story Search Repository
//!
//! This crate provides the trait and implementation for interacting with the
//! external search service. It includes the error taxonomy, the abstract
//! client interface, the query body builders, and a concrete implementation
//! backed by the OpenSearch client.

pub mod errors;
pub mod interfaces;
pub mod opensearch;
pub mod queries;
pub mod types;

pub use errors::SearchError;
pub use interfaces::SearchEngineClient;
pub use self::opensearch::OpenSearchClient;
pub use types::{
    BulkItemError, BulkSummary, ClusterHealth, IndexStats, SearchAuth, ServerInfo,
};
