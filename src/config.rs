//! Configuration management for doxsearch.
//!
//! This module handles loading and validating configuration from environment
//! variables. A `.env` file is loaded if present; nothing is printed to stdout.

use crate::error::{ConfigError, ConfigResult};
use crate::matching::MatchMode;
use crate::search::{EngineOptions, SearchScope, DEFAULT_MAX_RESULTS};
use crate::source::{DirectoryShardSource, HttpShardClient, HttpShardSource, ShardSource};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Configuration for a search index and its query engine.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding `searchdata.js` and the shard files
    pub index_dir: Option<PathBuf>,

    /// Base URL the search directory is served from
    pub index_url: Option<String>,

    /// Cap on displayed rows (default: 200)
    pub max_results: usize,

    /// Prefix or substring matching (default: prefix)
    pub match_mode: MatchMode,

    /// Categories searched by default (default: everything)
    pub scope: SearchScope,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// Log level (default: "warn")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Exactly one index location is required:
    /// - `DOXSEARCH_INDEX_DIR`: local search directory
    /// - `DOXSEARCH_INDEX_URL`: remote search directory (http/https)
    ///
    /// Optional environment variables:
    /// - `DOXSEARCH_MAX_RESULTS`: Max displayed rows (default: 200)
    /// - `DOXSEARCH_MATCH_MODE`: `prefix` or `substring` (default: prefix)
    /// - `DOXSEARCH_CATEGORIES`: Comma-separated categories (default: everything)
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    /// - `LOG_LEVEL`: Logging level (default: "warn")
    pub fn from_env() -> ConfigResult<Self> {
        let _ = dotenvy::dotenv();

        let index_dir = Self::non_empty_var("DOXSEARCH_INDEX_DIR").map(PathBuf::from);
        let index_url = Self::non_empty_var("DOXSEARCH_INDEX_URL");

        match (&index_dir, &index_url) {
            (None, None) => {
                return Err(ConfigError::MissingVar(
                    "DOXSEARCH_INDEX_DIR or DOXSEARCH_INDEX_URL".to_string(),
                ))
            }
            (Some(_), Some(_)) => {
                return Err(ConfigError::Other(
                    "Set only one of DOXSEARCH_INDEX_DIR and DOXSEARCH_INDEX_URL".to_string(),
                ))
            }
            _ => {}
        }

        if let Some(url) = &index_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::InvalidValue {
                    var: "DOXSEARCH_INDEX_URL".to_string(),
                    reason: "Must start with http:// or https://".to_string(),
                });
            }
        }

        let max_results = Self::parse_env_usize("DOXSEARCH_MAX_RESULTS", DEFAULT_MAX_RESULTS)?;
        if max_results == 0 {
            return Err(ConfigError::InvalidValue {
                var: "DOXSEARCH_MAX_RESULTS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        let match_mode = match env::var("DOXSEARCH_MATCH_MODE") {
            Ok(val) => val.parse::<MatchMode>().map_err(|reason| ConfigError::InvalidValue {
                var: "DOXSEARCH_MATCH_MODE".to_string(),
                reason,
            })?,
            Err(_) => MatchMode::default(),
        };

        let scope = Self::parse_scope(env::var("DOXSEARCH_CATEGORIES").ok().as_deref());
        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 10)?;
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "warn".to_string());

        Ok(Config {
            index_dir,
            index_url,
            max_results,
            match_mode,
            scope,
            request_timeout,
            log_level,
        })
    }

    /// Build the shard source for the configured index location.
    pub fn build_source(&self) -> ConfigResult<Arc<dyn ShardSource>> {
        match (&self.index_dir, &self.index_url) {
            (Some(dir), None) => Ok(Arc::new(DirectoryShardSource::new(dir.clone()))),
            (None, Some(url)) => {
                let client =
                    HttpShardClient::new(url.clone(), Duration::from_secs(self.request_timeout));
                Ok(Arc::new(HttpShardSource::new(client)))
            }
            (None, None) => Err(ConfigError::MissingVar(
                "DOXSEARCH_INDEX_DIR or DOXSEARCH_INDEX_URL".to_string(),
            )),
            (Some(_), Some(_)) => Err(ConfigError::Other(
                "Set only one of DOXSEARCH_INDEX_DIR and DOXSEARCH_INDEX_URL".to_string(),
            )),
        }
    }

    /// Query engine options from this configuration.
    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            max_results: self.max_results,
            match_mode: self.match_mode,
            scope: self.scope.clone(),
        }
    }

    /// Parse a comma-separated category list; empty means everything.
    fn parse_scope(raw: Option<&str>) -> SearchScope {
        let names: Vec<String> = raw
            .unwrap_or_default()
            .split(',')
            .map(|name| name.trim().to_lowercase())
            .filter(|name| !name.is_empty())
            .collect();

        if names.is_empty() {
            SearchScope::Everything
        } else {
            SearchScope::Categories(names)
        }
    }

    fn non_empty_var(var_name: &str) -> Option<String> {
        env::var(var_name).ok().filter(|val| !val.trim().is_empty())
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }

    /// Parse an environment variable as usize with a default value.
    fn parse_env_usize(var_name: &str, default: usize) -> ConfigResult<usize> {
        match env::var(var_name) {
            Ok(val) => val.parse::<usize>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            index_dir: None,
            index_url: None,
            max_results: DEFAULT_MAX_RESULTS,
            match_mode: MatchMode::Prefix,
            scope: SearchScope::Everything,
            request_timeout: 10,
            log_level: "warn".to_string(),
        }
    }
}
