//! Configuration types.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::grid::GridLayout;
use crate::placement::SelectionStrategy;

/// Catalog API location used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Top-level application configuration.
///
/// Loaded from TOML at startup. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the catalog API.
    pub api_url: String,

    /// Per-request timeout in milliseconds.
    pub request_timeout_ms: u64,

    /// Group placed when a subject is added to the schedule.
    pub selection: SelectionStrategy,

    /// Block sizing.
    pub layout: GridLayout,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout_ms: 10_000,
            selection: SelectionStrategy::First,
            layout: GridLayout::default(),
        }
    }
}

impl AppConfig {
    /// Read and parse a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Replace the API URL when an override is given.
    pub fn with_api_url(mut self, api_url: Option<String>) -> Self {
        if let Some(url) = api_url {
            self.api_url = url;
        }
        self
    }
}
