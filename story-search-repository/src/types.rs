//! Request, response, and summary types for search engine operations.

/// Credentials used to authenticate against the search service.
///
/// The backend prefers an API key when one is configured; basic auth is the
/// fallback for clusters without key management.
#[derive(Debug, Clone)]
pub enum SearchAuth {
    /// API key credential pair.
    ApiKey { id: String, key: String },
    /// Username and password.
    Basic { username: String, password: String },
}

impl SearchAuth {
    /// Human-readable description that never exposes the secret part.
    pub fn describe(&self) -> String {
        match self {
            Self::ApiKey { id, .. } => format!("api key (id: {})", id),
            Self::Basic { username, .. } => format!("basic auth (user: {})", username),
        }
    }
}

/// Basic information about the server, taken from the root endpoint.
#[derive(Debug, Clone)]
pub struct ServerInfo {
    /// Name of the cluster.
    pub cluster_name: String,
    /// Server version number.
    pub version: String,
    /// Distribution name where the server reports one.
    pub distribution: Option<String>,
}

/// Cluster health report.
///
/// Managed deployments may not expose the cluster health API; in that case
/// the status is reported as `serverless` and the node counts are absent.
#[derive(Debug, Clone)]
pub struct ClusterHealth {
    /// Health status: `green`, `yellow`, `red`, or `serverless`.
    pub status: String,
    /// Number of nodes in the cluster.
    pub number_of_nodes: Option<u64>,
    /// Number of active primary shards.
    pub active_primary_shards: Option<u64>,
}

/// Statistics for a single index.
#[derive(Debug, Clone, Default)]
pub struct IndexStats {
    /// Number of documents in the index.
    pub doc_count: u64,
    /// On-disk size of the primaries, 0 where the service does not expose it.
    pub size_bytes: u64,
}

/// A single failed operation inside a bulk request.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkItemError {
    /// The document id the operation targeted.
    pub id: String,
    /// Failure reason reported by the service.
    pub reason: String,
}

/// Summary of a bulk indexing request.
///
/// Per-document failures are collected and counted, not retried; the caller
/// decides whether a partial failure is fatal.
#[derive(Debug, Clone, Default)]
pub struct BulkSummary {
    /// Total number of documents submitted.
    pub total: usize,
    /// Number of documents indexed successfully.
    pub succeeded: usize,
    /// Number of documents that failed.
    pub failed: usize,
    /// Error details for each failed document.
    pub errors: Vec<BulkItemError>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_describe_redacts_secret() {
        let auth = SearchAuth::ApiKey {
            id: "key-id".to_string(),
            key: "super-secret".to_string(),
        };
        assert!(!auth.describe().contains("super-secret"));
        assert!(auth.describe().contains("key-id"));

        let auth = SearchAuth::Basic {
            username: "elastic".to_string(),
            password: "hunter2".to_string(),
        };
        assert!(!auth.describe().contains("hunter2"));
        assert!(auth.describe().contains("elastic"));
    }
}
