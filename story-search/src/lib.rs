//! # Story Search
//!
//! Demonstration wrapper around a managed search service.
//!
//! This crate provides the entry point, configuration, and the fixed
//! demonstration sequence: connect, create the story index, bulk-insert the
//! sample corpus, run the canned queries, and report index statistics.

pub mod config;
pub mod demo;
pub mod logging;

pub use config::{Dependencies, Settings};

use thiserror::Error;

/// Errors that can occur during startup or while running the demonstration.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Search error.
    #[error("Search error: {0}")]
    SearchError(#[from] story_search_repository::SearchError),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
