//! OpenSearch client implementation.
//!
//! This module provides the concrete implementation of `SearchEngineClient`
//! using the OpenSearch Rust client.

use std::time::Duration;

use async_trait::async_trait;
use opensearch::{
    auth::Credentials,
    cluster::ClusterHealthParts,
    http::request::JsonBody,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    indices::{
        IndicesCreateParts, IndicesDeleteParts, IndicesExistsParts, IndicesRefreshParts,
        IndicesStatsParts,
    },
    BulkParts, CountParts, DeleteParts, GetParts, IndexParts, OpenSearch, SearchParts,
};
use serde_json::{json, Value};
use tracing::{debug, error, info, warn};
use url::Url;

use crate::errors::SearchError;
use crate::interfaces::SearchEngineClient;
use crate::opensearch::index_config;
use crate::types::{BulkItemError, BulkSummary, ClusterHealth, IndexStats, SearchAuth, ServerInfo};
use story_search_shared::{SearchHit, SearchResponse, StoryDocument, StorySource, TermBucket};

/// Request timeout applied to every call.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// How many bulk failure reasons to log before going quiet.
const MAX_LOGGED_BULK_ERRORS: usize = 5;

/// OpenSearch-backed client for the story index.
///
/// # Example
///
/// ```ignore
/// use story_search_repository::types::SearchAuth;
///
/// let auth = SearchAuth::Basic {
///     username: "elastic".to_string(),
///     password: "changeme".to_string(),
/// };
/// let client = OpenSearchClient::new("https://localhost:9200", auth, "stories")?;
/// let info = client.ping().await?;
/// ```
pub struct OpenSearchClient {
    client: OpenSearch,
    index_name: String,
}

impl OpenSearchClient {
    /// Create a new client connected to the specified URL.
    ///
    /// # Arguments
    ///
    /// * `url` - The server URL (e.g., "https://localhost:9200")
    /// * `auth` - Credentials for the cluster
    /// * `index_name` - The index every operation targets
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchClient)` - A new client instance
    /// * `Err(SearchError)` - If connection setup fails
    pub fn new(
        url: &str,
        auth: SearchAuth,
        index_name: impl Into<String>,
    ) -> Result<Self, SearchError> {
        let index_name = index_name.into();
        let parsed_url =
            Url::parse(url).map_err(|e| SearchError::connection(e.to_string()))?;

        let credentials = match auth {
            SearchAuth::ApiKey { id, key } => Credentials::ApiKey(id, key),
            SearchAuth::Basic { username, password } => Credentials::Basic(username, password),
        };

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let transport = TransportBuilder::new(conn_pool)
            .auth(credentials)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .disable_proxy()
            .build()
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(url = %url, index = %index_name, "Created search client");

        Ok(Self { client, index_name })
    }

    /// The index every operation targets.
    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    /// Fetch the root endpoint.
    async fn fetch_info(&self) -> Result<ServerInfo, SearchError> {
        let response = self
            .client
            .info()
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let status = response.status_code();
        if status.as_u16() == 401 || status.as_u16() == 403 {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, "Credentials rejected by the server");
            return Err(SearchError::authentication(format!(
                "Server rejected credentials with status {}: {}",
                status, error_body
            )));
        }
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(SearchError::connection(format!(
                "Info request failed with status {}: {}",
                status, error_body
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))?;

        Ok(ServerInfo {
            cluster_name: body["cluster_name"].as_str().unwrap_or("unknown").to_string(),
            version: body["version"]["number"]
                .as_str()
                .unwrap_or("unknown")
                .to_string(),
            distribution: body["version"]["distribution"].as_str().map(String::from),
        })
    }

    /// Check whether the configured index exists.
    async fn exists(&self) -> Result<bool, SearchError> {
        let response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[self.index_name.as_str()]))
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        Ok(response.status_code().is_success())
    }

    /// Reject documents with empty required fields before sending them.
    fn validate_document(document: &StoryDocument) -> Result<(), SearchError> {
        if document.author.is_empty() {
            return Err(SearchError::invalid_document("author must not be empty"));
        }
        if document.document_type.is_empty() {
            return Err(SearchError::invalid_document(
                "document_type must not be empty",
            ));
        }
        if document.text.is_empty() {
            return Err(SearchError::invalid_document("text must not be empty"));
        }
        Ok(())
    }

    /// Parse a single hit from a search response.
    ///
    /// Tolerates a missing `_score` (filter-only contexts) and a partial
    /// `_source` (field filtering). Hits without an id are dropped.
    fn parse_hit(hit: &Value) -> Option<SearchHit> {
        let id = hit.get("_id")?.as_str()?.to_string();
        let score = hit.get("_score").and_then(Value::as_f64);
        let source_value = match hit.get("_source") {
            Some(value) if value.is_object() => value.clone(),
            _ => json!({}),
        };
        let source: StorySource = serde_json::from_value(source_value).ok()?;

        Some(SearchHit { id, score, source })
    }

    /// Parse the hits and total of a search response body.
    fn parse_search_response(body: &Value) -> SearchResponse {
        let total = body["hits"]["total"]["value"].as_u64().unwrap_or(0);
        let hits = body["hits"]["hits"]
            .as_array()
            .map(|hits| hits.iter().filter_map(Self::parse_hit).collect())
            .unwrap_or_default();

        SearchResponse { total, hits }
    }

    /// Split a bulk response into per-item successes and failures.
    fn parse_bulk_response(total: usize, body: &Value) -> BulkSummary {
        let mut succeeded = 0;
        let mut errors = Vec::new();

        if let Some(items) = body["items"].as_array() {
            for item in items {
                let action = &item["index"];
                match action.get("error") {
                    Some(error) => {
                        let id = action["_id"].as_str().unwrap_or("unknown").to_string();
                        let reason = error["reason"]
                            .as_str()
                            .unwrap_or("unknown reason")
                            .to_string();
                        errors.push(BulkItemError { id, reason });
                    }
                    None => succeeded += 1,
                }
            }
        }

        BulkSummary {
            total,
            succeeded,
            failed: errors.len(),
            errors,
        }
    }
}

#[async_trait]
impl SearchEngineClient for OpenSearchClient {
    async fn ping(&self) -> Result<ServerInfo, SearchError> {
        let response = self
            .client
            .ping()
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let status = response.status_code();
        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(SearchError::authentication(format!(
                "Server rejected credentials with status {}",
                status
            )));
        }
        if !status.is_success() {
            return Err(SearchError::connection(format!(
                "Ping failed with status {}",
                status
            )));
        }

        let info = self.fetch_info().await?;
        info!(
            cluster = %info.cluster_name,
            version = %info.version,
            "Connected to search server"
        );

        Ok(info)
    }

    async fn health_check(&self) -> Result<ClusterHealth, SearchError> {
        let health = self
            .client
            .cluster()
            .health(ClusterHealthParts::None)
            .send()
            .await;

        if let Ok(response) = health {
            if response.status_code().is_success() {
                let body: Value = response
                    .json()
                    .await
                    .map_err(|e| SearchError::parse(e.to_string()))?;

                let health = ClusterHealth {
                    status: body["status"].as_str().unwrap_or("unknown").to_string(),
                    number_of_nodes: body["number_of_nodes"].as_u64(),
                    active_primary_shards: body["active_primary_shards"].as_u64(),
                };
                info!(status = %health.status, "Cluster health");
                return Ok(health);
            }
        }

        // Managed serverless deployments do not expose cluster health; the
        // root endpoint still answers.
        let info = self.fetch_info().await?;
        debug!(cluster = %info.cluster_name, "Cluster health unavailable, using root endpoint");

        Ok(ClusterHealth {
            status: "serverless".to_string(),
            number_of_nodes: None,
            active_primary_shards: None,
        })
    }

    async fn index_exists(&self) -> Result<bool, SearchError> {
        self.exists().await
    }

    async fn create_index(&self, recreate: bool) -> Result<bool, SearchError> {
        if recreate && self.exists().await? {
            SearchEngineClient::delete_index(self).await?;
        }

        if self.exists().await? {
            warn!(index = %self.index_name, "Index already exists");
            return Ok(false);
        }

        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(&self.index_name))
            .body(index_config::index_body())
            .send()
            .await
            .map_err(|e| SearchError::index_creation(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Index creation failed");
            return Err(SearchError::index_creation(format!(
                "Index creation failed with status {}: {}",
                status, error_body
            )));
        }

        info!(index = %self.index_name, "Index created");
        Ok(true)
    }

    async fn delete_index(&self) -> Result<(), SearchError> {
        let response = self
            .client
            .indices()
            .delete(IndicesDeleteParts::Index(&[self.index_name.as_str()]))
            .send()
            .await
            .map_err(|e| SearchError::delete(e.to_string()))?;

        let status = response.status_code();

        // 404 is acceptable - the index may not exist
        if !status.is_success() && status.as_u16() != 404 {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Index deletion failed");
            return Err(SearchError::delete(format!(
                "Index deletion failed with status {}: {}",
                status, error_body
            )));
        }

        info!(index = %self.index_name, "Index deleted");
        Ok(())
    }

    async fn refresh_index(&self) -> Result<(), SearchError> {
        let response = self
            .client
            .indices()
            .refresh(IndicesRefreshParts::Index(&[self.index_name.as_str()]))
            .send()
            .await
            .map_err(|e| SearchError::index(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            return Err(SearchError::index(format!(
                "Refresh failed with status {}",
                status
            )));
        }

        debug!(index = %self.index_name, "Index refreshed");
        Ok(())
    }

    async fn index_stats(&self) -> Result<IndexStats, SearchError> {
        let stats = self
            .client
            .indices()
            .stats(IndicesStatsParts::Index(&[self.index_name.as_str()]))
            .send()
            .await;

        if let Ok(response) = stats {
            if response.status_code().is_success() {
                let body: Value = response
                    .json()
                    .await
                    .map_err(|e| SearchError::parse(e.to_string()))?;

                let docs = body["_all"]["primaries"]["docs"]["count"].as_u64();
                let size = body["_all"]["primaries"]["store"]["size_in_bytes"].as_u64();
                if let Some(doc_count) = docs {
                    return Ok(IndexStats {
                        doc_count,
                        size_bytes: size.unwrap_or(0),
                    });
                }
            }
        }

        // Stats are unavailable on serverless deployments; a count query
        // still works, size stays unknown.
        debug!(index = %self.index_name, "Stats unavailable, falling back to count");
        let doc_count = SearchEngineClient::count_documents(self).await?;

        Ok(IndexStats {
            doc_count,
            size_bytes: 0,
        })
    }

    async fn index_document(
        &self,
        id: Option<&str>,
        document: &StoryDocument,
    ) -> Result<String, SearchError> {
        Self::validate_document(document)?;

        let body =
            serde_json::to_value(document).map_err(|e| SearchError::serialization(e.to_string()))?;

        let request = match id {
            Some(id) => self.client.index(IndexParts::IndexId(&self.index_name, id)),
            None => self.client.index(IndexParts::Index(&self.index_name)),
        };

        let response = request
            .body(body)
            .send()
            .await
            .map_err(|e| SearchError::index(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Index request failed");
            return Err(SearchError::index(format!(
                "Index request failed with status {}: {}",
                status, error_body
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))?;
        let assigned_id = body["_id"].as_str().unwrap_or_default().to_string();

        info!(id = %assigned_id, "Document indexed");
        Ok(assigned_id)
    }

    async fn bulk_index(&self, documents: &[StoryDocument]) -> Result<BulkSummary, SearchError> {
        if documents.is_empty() {
            return Ok(BulkSummary::default());
        }

        for document in documents {
            Self::validate_document(document)?;
        }

        info!(count = documents.len(), "Starting bulk indexing");

        let mut body: Vec<JsonBody<Value>> = Vec::with_capacity(documents.len() * 2);
        for (i, document) in documents.iter().enumerate() {
            let id = (i + 1).to_string();
            body.push(json!({ "index": { "_id": id } }).into());
            let doc = serde_json::to_value(document)
                .map_err(|e| SearchError::serialization(e.to_string()))?;
            body.push(doc.into());
        }

        let response = self
            .client
            .bulk(BulkParts::Index(&self.index_name))
            .body(body)
            .send()
            .await
            .map_err(|e| SearchError::bulk_index(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Bulk request failed");
            return Err(SearchError::bulk_index(format!(
                "Bulk request failed with status {}: {}",
                status, error_body
            )));
        }

        let response_body: Value = response
            .json()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))?;

        let summary = Self::parse_bulk_response(documents.len(), &response_body);

        info!(
            succeeded = summary.succeeded,
            failed = summary.failed,
            "Bulk indexing completed"
        );
        for item in summary.errors.iter().take(MAX_LOGGED_BULK_ERRORS) {
            warn!(id = %item.id, reason = %item.reason, "Document failed to index");
        }

        Ok(summary)
    }

    async fn count_documents(&self) -> Result<u64, SearchError> {
        let response = self
            .client
            .count(CountParts::Index(&[self.index_name.as_str()]))
            .send()
            .await
            .map_err(|e| SearchError::query(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            return Err(SearchError::query(format!(
                "Count failed with status {}",
                status
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))?;
        let count = body["count"].as_u64().unwrap_or(0);

        debug!(index = %self.index_name, count = count, "Counted documents");
        Ok(count)
    }

    async fn get_document(&self, id: &str) -> Result<StoryDocument, SearchError> {
        let response = self
            .client
            .get(GetParts::IndexId(&self.index_name, id))
            .send()
            .await
            .map_err(|e| SearchError::query(e.to_string()))?;

        let status = response.status_code();
        if status.as_u16() == 404 {
            return Err(SearchError::document_not_found(id));
        }
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(SearchError::query(format!(
                "Get failed with status {}: {}",
                status, error_body
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))?;
        let source = body
            .get("_source")
            .cloned()
            .ok_or_else(|| SearchError::parse("Get response is missing _source"))?;

        serde_json::from_value(source).map_err(|e| SearchError::parse(e.to_string()))
    }

    async fn delete_document(&self, id: &str) -> Result<(), SearchError> {
        let response = self
            .client
            .delete(DeleteParts::IndexId(&self.index_name, id))
            .send()
            .await
            .map_err(|e| SearchError::delete(e.to_string()))?;

        let status = response.status_code();
        if status.as_u16() == 404 {
            return Err(SearchError::document_not_found(id));
        }
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Delete request failed");
            return Err(SearchError::delete(format!(
                "Delete failed with status {}: {}",
                status, error_body
            )));
        }

        info!(id = %id, "Document deleted");
        Ok(())
    }

    async fn search(&self, body: Value) -> Result<SearchResponse, SearchError> {
        let response = self
            .client
            .search(SearchParts::Index(&[self.index_name.as_str()]))
            .body(body)
            .send()
            .await
            .map_err(|e| SearchError::query(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Search request failed");
            return Err(SearchError::query(format!(
                "Search failed with status {}: {}",
                status, error_body
            )));
        }

        let response_body: Value = response
            .json()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))?;

        let parsed = Self::parse_search_response(&response_body);
        debug!(
            total = parsed.total,
            returned = parsed.hits.len(),
            "Search completed"
        );

        Ok(parsed)
    }

    async fn terms_aggregation(
        &self,
        field: &str,
        agg_name: &str,
    ) -> Result<Vec<TermBucket>, SearchError> {
        let body = crate::queries::build_terms_aggregation(field, agg_name);
        let response = self
            .client
            .search(SearchParts::Index(&[self.index_name.as_str()]))
            .body(body)
            .send()
            .await
            .map_err(|e| SearchError::query(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(SearchError::query(format!(
                "Aggregation failed with status {}: {}",
                status, error_body
            )));
        }

        let response_body: Value = response
            .json()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))?;

        let buckets: Vec<TermBucket> = response_body["aggregations"][agg_name]["buckets"]
            .as_array()
            .map(|buckets| {
                buckets
                    .iter()
                    .map(|bucket| TermBucket {
                        key: bucket["key"].as_str().unwrap_or_default().to_string(),
                        doc_count: bucket["doc_count"].as_u64().unwrap_or(0),
                    })
                    .collect()
            })
            .unwrap_or_default();

        debug!(field = %field, buckets = buckets.len(), "Aggregation completed");

        Ok(buckets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hit() {
        let hit = json!({
            "_id": "3",
            "_score": 1.5,
            "_source": {
                "author": "Ana Martinez",
                "document_type": "fantastico",
                "text": "En el reino de las estrellas.",
                "date": "2024-05-15"
            }
        });

        let result = OpenSearchClient::parse_hit(&hit).unwrap();

        assert_eq!(result.id, "3");
        assert_eq!(result.score, Some(1.5));
        assert_eq!(result.source.author, Some("Ana Martinez".to_string()));
        assert_eq!(
            result.source.date,
            chrono::NaiveDate::from_ymd_opt(2024, 5, 15)
        );
    }

    #[test]
    fn test_parse_hit_filtered_source() {
        let hit = json!({
            "_id": "7",
            "_score": null,
            "_source": {
                "author": "Sofia Ramirez"
            }
        });

        let result = OpenSearchClient::parse_hit(&hit).unwrap();

        assert_eq!(result.id, "7");
        assert!(result.score.is_none());
        assert!(result.source.text.is_none());
    }

    #[test]
    fn test_parse_hit_missing_id() {
        let hit = json!({
            "_score": 1.0,
            "_source": { "author": "Nobody" }
        });

        assert!(OpenSearchClient::parse_hit(&hit).is_none());
    }

    #[test]
    fn test_parse_search_response() {
        let body = json!({
            "hits": {
                "total": { "value": 10, "relation": "eq" },
                "hits": [
                    { "_id": "1", "_score": 2.0, "_source": { "author": "A" } },
                    { "_id": "2", "_score": 1.0, "_source": { "author": "B" } }
                ]
            }
        });

        let response = OpenSearchClient::parse_search_response(&body);

        assert_eq!(response.total, 10);
        assert_eq!(response.hits.len(), 2);
        assert_eq!(response.hits[0].id, "1");
    }

    #[test]
    fn test_parse_search_response_empty() {
        let body = json!({ "hits": { "total": { "value": 0 }, "hits": [] } });

        let response = OpenSearchClient::parse_search_response(&body);

        assert_eq!(response.total, 0);
        assert!(response.hits.is_empty());
    }

    #[test]
    fn test_parse_bulk_response_mixed() {
        let body = json!({
            "errors": true,
            "items": [
                { "index": { "_id": "1", "status": 201 } },
                { "index": { "_id": "2", "status": 400, "error": {
                    "type": "mapper_parsing_exception",
                    "reason": "failed to parse field [date]"
                } } },
                { "index": { "_id": "3", "status": 201 } }
            ]
        });

        let summary = OpenSearchClient::parse_bulk_response(3, &body);

        assert_eq!(summary.total, 3);
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.errors[0].id, "2");
        assert!(summary.errors[0].reason.contains("failed to parse"));
    }

    #[test]
    fn test_parse_bulk_response_all_ok() {
        let body = json!({
            "errors": false,
            "items": [
                { "index": { "_id": "1", "status": 201 } },
                { "index": { "_id": "2", "status": 201 } }
            ]
        });

        let summary = OpenSearchClient::parse_bulk_response(2, &body);

        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 0);
        assert!(summary.errors.is_empty());
    }

    #[test]
    fn test_validate_document() {
        let valid = StoryDocument::new(
            "Maria Gonzalez",
            "infantil",
            "Había una vez.",
            chrono::NaiveDate::from_ymd_opt(2024, 4, 10).unwrap(),
        );
        assert!(OpenSearchClient::validate_document(&valid).is_ok());

        let mut missing_author = valid.clone();
        missing_author.author = String::new();
        assert!(matches!(
            OpenSearchClient::validate_document(&missing_author),
            Err(SearchError::InvalidDocument(_))
        ));

        let mut missing_text = valid;
        missing_text.text = String::new();
        assert!(OpenSearchClient::validate_document(&missing_text).is_err());
    }
}
