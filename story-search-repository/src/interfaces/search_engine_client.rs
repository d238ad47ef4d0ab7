//! Search engine client trait definition.
//!
//! This module defines the abstract interface for search engine operations,
//! allowing for different backend implementations.

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::SearchError;
use crate::types::{BulkSummary, ClusterHealth, IndexStats, ServerInfo};
use story_search_shared::{SearchResponse, StoryDocument, TermBucket};

/// Abstract interface for search engine operations.
///
/// This trait defines all the operations the demo needs from a search
/// backend. Implementations can be swapped (OpenSearch, mock, etc.) enabling
/// easy testing.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` to allow use across async tasks.
///
/// # Error Handling
///
/// All methods return `Result<T, SearchError>` for consistent error handling.
#[async_trait]
pub trait SearchEngineClient: Send + Sync {
    /// Check that the server is reachable and return its identity.
    ///
    /// # Returns
    ///
    /// * `Ok(ServerInfo)` - Cluster name and version from the root endpoint
    /// * `Err(SearchError::ConnectionError)` - If the server is unreachable
    /// * `Err(SearchError::AuthenticationError)` - If credentials are rejected
    async fn ping(&self) -> Result<ServerInfo, SearchError>;

    /// Report cluster health.
    ///
    /// Managed deployments without the cluster health API are reported with
    /// status `serverless`.
    async fn health_check(&self) -> Result<ClusterHealth, SearchError>;

    /// Check whether the configured index exists.
    async fn index_exists(&self) -> Result<bool, SearchError>;

    /// Create the configured index with its settings and mappings.
    ///
    /// # Arguments
    ///
    /// * `recreate` - Delete an existing index first
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The index was created
    /// * `Ok(false)` - The index already existed and `recreate` was false
    /// * `Err(SearchError)` - If creation fails
    async fn create_index(&self, recreate: bool) -> Result<bool, SearchError>;

    /// Delete the configured index. Deleting a missing index is not an error.
    async fn delete_index(&self) -> Result<(), SearchError>;

    /// Refresh the index so recent writes become visible to search.
    async fn refresh_index(&self) -> Result<(), SearchError>;

    /// Document count and size statistics for the index.
    ///
    /// Falls back to a plain count (size reported as 0) where the stats API
    /// is unavailable.
    async fn index_stats(&self) -> Result<IndexStats, SearchError>;

    /// Index a single document.
    ///
    /// # Arguments
    ///
    /// * `id` - Explicit document id; the server assigns one when `None`
    /// * `document` - The story to index
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The id the document was stored under
    /// * `Err(SearchError)` - If indexing fails
    async fn index_document(
        &self,
        id: Option<&str>,
        document: &StoryDocument,
    ) -> Result<String, SearchError>;

    /// Index multiple documents in a single bulk request.
    ///
    /// Documents are assigned sequential ids starting at 1. Per-document
    /// failures are collected in the summary, not retried.
    async fn bulk_index(&self, documents: &[StoryDocument]) -> Result<BulkSummary, SearchError>;

    /// Count the documents in the index.
    async fn count_documents(&self) -> Result<u64, SearchError>;

    /// Fetch a document by id.
    ///
    /// # Returns
    ///
    /// * `Ok(StoryDocument)` - The stored document
    /// * `Err(SearchError::DocumentNotFound)` - If no document has that id
    async fn get_document(&self, id: &str) -> Result<StoryDocument, SearchError>;

    /// Delete a document by id.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The document was deleted
    /// * `Err(SearchError::DocumentNotFound)` - If no document has that id
    async fn delete_document(&self, id: &str) -> Result<(), SearchError>;

    /// Execute a search request with the given query body.
    ///
    /// The body is passed to the service verbatim; use the builders in
    /// [`crate::queries`] to construct it.
    async fn search(&self, body: Value) -> Result<SearchResponse, SearchError>;

    /// Run a terms aggregation over a keyword field and return its buckets.
    async fn terms_aggregation(
        &self,
        field: &str,
        agg_name: &str,
    ) -> Result<Vec<TermBucket>, SearchError>;
}
