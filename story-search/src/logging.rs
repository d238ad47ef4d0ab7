//! Logging setup.
//!
//! Console logging with ANSI colors, plus an optional plain-text file layer
//! when `LOG_FILE` is configured. The filter honors `RUST_LOG` when set and
//! falls back to the configured `LOG_LEVEL` otherwise.

use std::fs;
use std::fs::OpenOptions;
use std::sync::Arc;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Settings;
use crate::AppError;

/// Initialize the global tracing subscriber from the settings.
///
/// # Returns
///
/// * `Ok(())` - Logging is set up
/// * `Err(AppError)` - If the log file cannot be opened or a subscriber is
///   already installed
pub fn init(settings: &Settings) -> Result<(), AppError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.log_level.clone()));

    match &settings.log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;

            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer())
                .with(fmt::layer().with_ansi(false).with_writer(Arc::new(file)))
                .try_init()
                .map_err(|e| AppError::config(format!("failed to initialize logging: {}", e)))?;
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(fmt::layer())
                .try_init()
                .map_err(|e| AppError::config(format!("failed to initialize logging: {}", e)))?;
        }
    }

    Ok(())
}
