//! Story Search - demonstration entry point.
//!
//! Runs the fixed sequence against the configured search service: connect,
//! create the story index, bulk-insert the sample corpus, run the canned
//! queries, and report index statistics. Exits non-zero on configuration,
//! connection, or credential failure.

use story_search::{config::Dependencies, config::Settings, demo, logging, AppError};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    if let Err(e) = run().await {
        eprintln!("error: {}", e);
        eprintln!("check the configuration in your environment or .env file");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    let settings = Settings::from_env()?;
    logging::init(&settings)?;

    let deps = Dependencies::new(settings).await?;
    demo::run(deps.client.as_ref()).await
}
