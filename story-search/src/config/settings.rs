//! Environment-based settings.
//!
//! All configuration comes from environment variables; the binaries load a
//! `.env` file first so local development needs no exported shell state.

use std::env;
use std::path::PathBuf;

use crate::AppError;
use story_search_repository::opensearch::DEFAULT_INDEX_NAME;
use story_search_repository::SearchAuth;

/// Username assumed when only a password is configured.
const DEFAULT_USERNAME: &str = "elastic";

/// Default log verbosity.
const DEFAULT_LOG_LEVEL: &str = "info";

/// Application settings.
///
/// # Environment Variables
///
/// - `SEARCH_URL`: server URL; `https://` is assumed when no scheme is given (required)
/// - `SEARCH_API_KEY_ID` / `SEARCH_API_KEY`: API key credential pair
/// - `SEARCH_USERNAME` / `SEARCH_PASSWORD`: basic auth credential
/// - `INDEX_NAME`: target index (default: stories)
/// - `LOG_LEVEL`: log verbosity (default: info)
/// - `LOG_FILE`: optional log file path
///
/// Either the API key pair or a password must be present; the API key wins
/// when both are set.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Server URL, scheme included.
    pub url: String,
    /// Credentials for the cluster.
    pub auth: SearchAuth,
    /// The index every operation targets.
    pub index_name: String,
    /// Log verbosity level.
    pub log_level: String,
    /// Optional log file; console-only when unset.
    pub log_file: Option<PathBuf>,
}

impl Settings {
    /// Load settings from the process environment.
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - Validated settings
    /// * `Err(AppError::ConfigError)` - If the URL or credentials are missing
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load settings through an arbitrary variable lookup.
    ///
    /// Split out from [`Settings::from_env`] so tests can supply variables
    /// without mutating the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let url = get("SEARCH_URL")
            .map(normalize_url)
            .ok_or_else(|| AppError::config("SEARCH_URL is not set"))?;

        let auth = match (get("SEARCH_API_KEY_ID"), get("SEARCH_API_KEY")) {
            (Some(id), Some(key)) => SearchAuth::ApiKey { id, key },
            _ => {
                let password = get("SEARCH_PASSWORD").ok_or_else(|| {
                    AppError::config(
                        "either SEARCH_API_KEY_ID/SEARCH_API_KEY or SEARCH_PASSWORD must be set",
                    )
                })?;
                let username = get("SEARCH_USERNAME").unwrap_or_else(|| DEFAULT_USERNAME.to_string());
                SearchAuth::Basic { username, password }
            }
        };

        Ok(Self {
            url,
            auth,
            index_name: get("INDEX_NAME").unwrap_or_else(|| DEFAULT_INDEX_NAME.to_string()),
            log_level: get("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            log_file: get("LOG_FILE").map(PathBuf::from),
        })
    }
}

/// Assume https when the configured URL carries no scheme.
fn normalize_url(raw: String) -> String {
    if raw.starts_with("http://") || raw.starts_with("https://") {
        raw
    } else {
        format!("https://{}", raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_missing_url_is_rejected() {
        let result = Settings::from_lookup(lookup_from(&[("SEARCH_PASSWORD", "secret")]));

        assert!(matches!(result, Err(AppError::ConfigError(_))));
    }

    #[test]
    fn test_missing_credentials_are_rejected() {
        let result = Settings::from_lookup(lookup_from(&[("SEARCH_URL", "localhost:9200")]));

        assert!(matches!(result, Err(AppError::ConfigError(_))));
    }

    #[test]
    fn test_api_key_wins_over_password() {
        let settings = Settings::from_lookup(lookup_from(&[
            ("SEARCH_URL", "https://localhost:9200"),
            ("SEARCH_API_KEY_ID", "key-id"),
            ("SEARCH_API_KEY", "key-secret"),
            ("SEARCH_PASSWORD", "hunter2"),
        ]))
        .unwrap();

        assert!(matches!(settings.auth, SearchAuth::ApiKey { .. }));
    }

    #[test]
    fn test_basic_auth_defaults_username() {
        let settings = Settings::from_lookup(lookup_from(&[
            ("SEARCH_URL", "https://localhost:9200"),
            ("SEARCH_PASSWORD", "hunter2"),
        ]))
        .unwrap();

        match settings.auth {
            SearchAuth::Basic { username, password } => {
                assert_eq!(username, "elastic");
                assert_eq!(password, "hunter2");
            }
            other => panic!("expected basic auth, got {:?}", other),
        }
    }

    #[test]
    fn test_scheme_is_assumed() {
        let settings = Settings::from_lookup(lookup_from(&[
            ("SEARCH_URL", "search.example.com:9200"),
            ("SEARCH_PASSWORD", "secret"),
        ]))
        .unwrap();

        assert_eq!(settings.url, "https://search.example.com:9200");
    }

    #[test]
    fn test_explicit_scheme_is_kept() {
        let settings = Settings::from_lookup(lookup_from(&[
            ("SEARCH_URL", "http://localhost:9200"),
            ("SEARCH_PASSWORD", "secret"),
        ]))
        .unwrap();

        assert_eq!(settings.url, "http://localhost:9200");
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::from_lookup(lookup_from(&[
            ("SEARCH_URL", "https://localhost:9200"),
            ("SEARCH_PASSWORD", "secret"),
        ]))
        .unwrap();

        assert_eq!(settings.index_name, "stories");
        assert_eq!(settings.log_level, "info");
        assert!(settings.log_file.is_none());
    }

    #[test]
    fn test_empty_values_are_treated_as_unset() {
        let result = Settings::from_lookup(lookup_from(&[
            ("SEARCH_URL", "https://localhost:9200"),
            ("SEARCH_PASSWORD", ""),
        ]));

        assert!(matches!(result, Err(AppError::ConfigError(_))));
    }
}
