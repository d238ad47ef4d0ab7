//! Filtered search: terror stories from July 2024 onwards.

use serde_json::json;

use story_search::{config::Dependencies, config::Settings, demo::report, logging, AppError};
use story_search_repository::{queries, SearchEngineClient};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    if let Err(e) = run().await {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    let settings = Settings::from_env()?;
    logging::init(&settings)?;

    let deps = Dependencies::new(settings).await?;
    let body = queries::build_bool_query(
        vec![json!({ "term": { "document_type": "terror" } })],
        vec![json!({ "range": { "date": { "gte": "2024-07-01" } } })],
        vec![],
        None,
    );
    let response = deps.client.search(body).await?;

    report::print_separator("SEARCH: terror stories since July 2024");
    println!("Found: {} documents", response.total);
    report::print_hits(&response.hits, "Results");

    Ok(())
}
