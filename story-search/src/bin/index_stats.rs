//! Index statistics: document count and distribution per genre.

use story_search::{config::Dependencies, config::Settings, demo::report, logging, AppError};
use story_search_repository::SearchEngineClient;

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
    let total = deps.client.count_documents().await?;
    let buckets = deps
        .client
        .terms_aggregation("document_type", "stories_by_type")
        .await?;

    report::print_separator("INDEX STATISTICS");
    println!("Total documents: {}", total);
    println!("\nDistribution per type:");
    report::print_bucket_bars(&buckets, total);
    println!();

    Ok(())
}
