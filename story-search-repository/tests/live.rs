//! Integration tests against a live search cluster.
//!
//! These tests need a reachable cluster and are ignored by default. Run them
//! with:
//!
//! ```text
//! SEARCH_URL=https://localhost:9200 \
//! SEARCH_USERNAME=elastic SEARCH_PASSWORD=changeme \
//! cargo test -p story-search-repository -- --ignored
//! ```
//!
//! The tests use a dedicated index name so they never touch demo data.

use chrono::NaiveDate;
use story_search_repository::{OpenSearchClient, SearchAuth, SearchEngineClient, SearchError};
use story_search_shared::StoryDocument;

const TEST_INDEX: &str = "stories_it";

fn live_client() -> Option<OpenSearchClient> {
    let url = std::env::var("SEARCH_URL").ok()?;
    let auth = match (
        std::env::var("SEARCH_API_KEY_ID").ok(),
        std::env::var("SEARCH_API_KEY").ok(),
    ) {
        (Some(id), Some(key)) => SearchAuth::ApiKey { id, key },
        _ => SearchAuth::Basic {
            username: std::env::var("SEARCH_USERNAME").unwrap_or_else(|_| "elastic".to_string()),
            password: std::env::var("SEARCH_PASSWORD").ok()?,
        },
    };

    OpenSearchClient::new(&url, auth, TEST_INDEX).ok()
}

fn fixture_documents() -> Vec<StoryDocument> {
    vec![
        StoryDocument::new(
            "Carlos Ruiz",
            "terror",
            "La casa de la colina abandonada era el lugar más terrorífico de la zona.",
            NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
        ),
        StoryDocument::new(
            "Ana Martinez",
            "fantastico",
            "En el reino de las estrellas vivía una hechicera.",
            NaiveDate::from_ymd_opt(2024, 5, 15).unwrap(),
        ),
        StoryDocument::new(
            "Pedro Lopez",
            "infantil",
            "Los animales del bosque organizaron una gran fiesta.",
            NaiveDate::from_ymd_opt(2024, 3, 20).unwrap(),
        ),
    ]
}

#[tokio::test]
#[ignore = "needs a live cluster configured through SEARCH_URL"]
async fn live_end_to_end() {
    let client = live_client().expect("SEARCH_URL and credentials must be set");

    // Reachability
    let info = client.ping().await.expect("ping");
    assert!(!info.version.is_empty());

    // Index creation with the configured mapping
    let created = client.create_index(true).await.expect("create index");
    assert!(created);
    assert!(client.index_exists().await.expect("exists"));

    // Bulk insert of N documents -> count returns N
    let docs = fixture_documents();
    let summary = client.bulk_index(&docs).await.expect("bulk index");
    assert_eq!(summary.succeeded, docs.len());
    assert_eq!(summary.failed, 0);

    client.refresh_index().await.expect("refresh");
    let count = client.count_documents().await.expect("count");
    assert_eq!(count, docs.len() as u64);

    // Term query on an exact field returns only matching documents
    let response = client
        .search(story_search_repository::queries::build_term_query(
            "document_type",
            "terror",
        ))
        .await
        .expect("term query");
    assert_eq!(response.total, 1);
    assert_eq!(
        response.hits[0].source.document_type.as_deref(),
        Some("terror")
    );

    // Range query over dates returns only documents within the bound
    let response = client
        .search(story_search_repository::queries::build_range_query(
            "date",
            Some("2024-05-01"),
            Some("2024-07-31"),
            None,
        ))
        .await
        .expect("range query");
    assert_eq!(response.total, 2);
    for hit in &response.hits {
        let date = hit.source.date.expect("date present");
        assert!(date >= NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert!(date <= NaiveDate::from_ymd_opt(2024, 7, 31).unwrap());
    }

    // Delete by id -> subsequent get fails with not-found
    let fetched = client.get_document("1").await.expect("get");
    assert_eq!(fetched.author, "Carlos Ruiz");

    client.delete_document("1").await.expect("delete");
    let missing = client.get_document("1").await;
    assert!(matches!(missing, Err(SearchError::DocumentNotFound(_))));

    // Cleanup
    client.delete_index().await.expect("delete index");
}
