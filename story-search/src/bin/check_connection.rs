//! Connection diagnostic: echo the configuration (secrets redacted), ping
//! the server, and print what it answers.

use story_search::{config::Dependencies, config::Settings, demo::report, logging, AppError};
use story_search_repository::SearchEngineClient;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    report::print_separator("CONNECTION DIAGNOSTIC");

    if let Err(e) = run().await {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }

    report::print_separator("DIAGNOSTIC COMPLETED");
}

async fn run() -> Result<(), AppError> {
    let settings = Settings::from_env()?;
    logging::init(&settings)?;

    println!("1. URL:   {}", settings.url);
    println!("2. Auth:  {}", settings.auth.describe());
    println!("3. Index: {}", settings.index_name);

    println!("\n4. Pinging the server...");
    let deps = Dependencies::new(settings).await?;
    println!("   ok - cluster: {}", deps.server.cluster_name);
    println!("   ok - version: {}", deps.server.version);

    let health = deps.client.health_check().await?;
    println!("   ok - status:  {}", health.status);

    Ok(())
}
