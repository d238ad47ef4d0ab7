//! Simple text search: find stories mentioning "dragón", with scores.

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
    let response = deps
        .client
        .search(queries::build_match_query("text", "dragón", None))
        .await?;

    report::print_separator("SEARCH: 'dragón'");
    println!("Found: {} documents", response.total);
    report::print_hits(&response.hits, "Results");

    Ok(())
}
