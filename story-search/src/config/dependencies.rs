//! Dependency initialization and wiring for the demonstration binaries.

use std::sync::Arc;

use tracing::info;

use crate::config::Settings;
use crate::AppError;
use story_search_repository::{OpenSearchClient, SearchEngineClient, ServerInfo};

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The settings the client was built from.
    pub settings: Settings,
    /// Connected search client.
    pub client: Arc<dyn SearchEngineClient>,
    /// Identity of the server answered during wiring.
    pub server: ServerInfo,
}

impl Dependencies {
    /// Initialize all dependencies from the given settings.
    ///
    /// The server is pinged before returning so a bad URL or rejected
    /// credential fails here rather than halfway through the run.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(AppError)` - If the client cannot be built or the server is unreachable
    pub async fn new(settings: Settings) -> Result<Self, AppError> {
        info!(
            url = %settings.url,
            index = %settings.index_name,
            auth = %settings.auth.describe(),
            "Initializing dependencies"
        );

        let client =
            OpenSearchClient::new(&settings.url, settings.auth.clone(), &settings.index_name)?;

        let server = client.ping().await?;

        info!(
            cluster = %server.cluster_name,
            version = %server.version,
            "Search server connection verified"
        );

        Ok(Self {
            settings,
            client: Arc::new(client),
            server,
        })
    }
}
