//! The fixed demonstration sequence.
//!
//! Mirrors what a first session against the search service looks like:
//! verify the connection, create the index, load the sample corpus, run each
//! of the canned query shapes, and read back index statistics.

pub mod report;
pub mod sample_data;

use tracing::warn;

use crate::AppError;
use story_search_repository::{queries, SearchEngineClient};

/// How many match-all hits to request.
const MATCH_ALL_SIZE: usize = 5;

/// How many match-all hits to print.
const MATCH_ALL_SHOWN: usize = 3;

/// Run the full demonstration against the given client.
///
/// Per-document indexing failures are reported and counted but do not abort
/// the run; connection or query failures do.
pub async fn run(client: &dyn SearchEngineClient) -> Result<(), AppError> {
    report::print_banner();

    connection_report(client).await?;
    index_creation(client).await?;
    document_indexing(client).await?;
    canned_queries(client).await?;
    index_statistics(client).await?;

    report::print_separator("DEMONSTRATION COMPLETED");
    println!("All sections ran successfully.");

    Ok(())
}

/// Section 1: connection and cluster health.
async fn connection_report(client: &dyn SearchEngineClient) -> Result<(), AppError> {
    report::print_separator("1. CONNECTION AND CLUSTER HEALTH");

    let info = client.ping().await?;
    match &info.distribution {
        Some(distribution) => println!(
            "Server:  {} {} (cluster: {})",
            distribution, info.version, info.cluster_name
        ),
        None => println!("Server:  {} (cluster: {})", info.version, info.cluster_name),
    }

    let health = client.health_check().await?;
    println!("Status:  {}", health.status);
    if let Some(nodes) = health.number_of_nodes {
        println!("Nodes:   {}", nodes);
    }
    if let Some(shards) = health.active_primary_shards {
        println!("Shards:  {}", shards);
    }

    Ok(())
}

/// Section 2: index creation with the story mapping.
async fn index_creation(client: &dyn SearchEngineClient) -> Result<(), AppError> {
    report::print_separator("2. INDEX CREATION");

    let created = client.create_index(true).await?;
    if created {
        println!("Index created with the story mapping.");
        println!("Fields: author, document_type, date, text (spanish_analyzer)");
    } else {
        println!("Index already existed; mapping left untouched.");
    }

    Ok(())
}

/// Section 3: bulk insert of the sample corpus.
async fn document_indexing(client: &dyn SearchEngineClient) -> Result<(), AppError> {
    report::print_separator("3. DOCUMENT INDEXING");

    let stories = sample_data::sample_stories();
    let summary = client.bulk_index(&stories).await?;

    println!(
        "Indexed {} of {} documents.",
        summary.succeeded, summary.total
    );
    if summary.failed > 0 {
        warn!(failed = summary.failed, "Some documents failed to index");
        println!("Failures: {}", summary.failed);
        for item in &summary.errors {
            println!("  - id {}: {}", item.id, item.reason);
        }
    }

    let count = client.count_documents().await?;
    println!("Documents in index: {}", count);

    Ok(())
}

/// Section 4: the seven canned query shapes.
async fn canned_queries(client: &dyn SearchEngineClient) -> Result<(), AppError> {
    report::print_separator("4. QUERIES");

    // Make the bulk insert visible before searching.
    client.refresh_index().await?;

    // A. Match all
    println!("\nA. MATCH ALL (all documents)");
    let response = client.search(queries::build_match_all_query(MATCH_ALL_SIZE)).await?;
    let shown = response.hits.len().min(MATCH_ALL_SHOWN);
    report::print_hits(&response.hits[..shown], "First documents");
    println!("\nTotal matched: {}", response.total);

    // B. Term query: exact match on a keyword field
    println!("\nB. TERM QUERY (exact match)");
    let response = client
        .search(queries::build_term_query("document_type", "terror"))
        .await?;
    report::print_hits(&response.hits, "Terror stories");

    // C. Match query: analyzed search with relevance
    println!("\nC. MATCH QUERY (relevance search)");
    let response = client
        .search(queries::build_match_query(
            "text",
            "dragón mágico reino",
            Some(&["author", "document_type"]),
        ))
        .await?;
    report::print_hits(&response.hits, "Search: 'dragón mágico reino'");

    // D. Range query over the date field
    println!("\nD. RANGE QUERY (by date)");
    let response = client
        .search(queries::build_range_query(
            "date",
            Some("2024-04-01"),
            Some("2024-07-31"),
            Some(&["author", "date", "document_type"]),
        ))
        .await?;
    report::print_hits(&response.hits, "Stories between April and July 2024");

    // E. Bool query combining a scored match with a filter
    println!("\nE. BOOL QUERY (compound search)");
    let response = client
        .search(queries::build_bool_query(
            vec![serde_json::json!({ "match": { "text": "reino" } })],
            vec![serde_json::json!({ "term": { "document_type": "fantastico" } })],
            vec![],
            Some(&["author", "document_type"]),
        ))
        .await?;
    report::print_hits(&response.hits, "Text with 'reino' AND type 'fantastico'");

    // F. Terms aggregation
    println!("\nF. AGGREGATION QUERY (counts per type)");
    let buckets = client
        .terms_aggregation("document_type", "stories_by_type")
        .await?;
    println!("\nDocument count per type:");
    report::print_buckets(&buckets);

    // G. Multi-match over several fields
    println!("\nG. MULTI MATCH QUERY (several fields at once)");
    let response = client
        .search(queries::build_multi_match_query(
            "Maria dragon",
            &["author", "text"],
            Some(&["author", "document_type"]),
        ))
        .await?;
    report::print_hits(&response.hits, "Search 'Maria dragon' in author and text");

    Ok(())
}

/// Section 5: index statistics.
async fn index_statistics(client: &dyn SearchEngineClient) -> Result<(), AppError> {
    report::print_separator("5. INDEX STATISTICS");

    let stats = client.index_stats().await?;
    println!("Documents: {}", stats.doc_count);
    if stats.size_bytes > 0 {
        println!("Size:      {:.2} KB", stats.size_bytes as f64 / 1024.0);
    } else {
        println!("Size:      not reported by this deployment");
    }

    Ok(())
}
