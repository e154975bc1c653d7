//! HTTP client for the course catalog API.
//!
//! Two endpoints:
//! - `GET /materias`: subject summaries (no groups)
//! - `GET /materias/{codigo}`: one subject with groups and sessions
//!
//! Every failure is returned as a [`CatalogError`]; callers report it and
//! carry on.

use std::time::Duration;

use reqwest::{StatusCode, Url};
use schedule_kernel::Subject;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid catalog URL {url}")]
    InvalidUrl { url: String },
    #[error("catalog unreachable: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("catalog request to {url} failed with status {status}")]
    Status { status: StatusCode, url: String },
    #[error("catalog response from {url} could not be decoded: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Catalog API client.
#[derive(Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    /// Create a client with no request timeout.
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the catalog API (e.g., "http://127.0.0.1:8000")
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Create a client whose requests give up after `timeout`.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(CatalogError::Transport)?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build `{base}/{segments...}`, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, CatalogError> {
        let invalid = || CatalogError::InvalidUrl {
            url: self.base_url.clone(),
        };
        let mut url = Url::parse(&self.base_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, CatalogError> {
        debug!(%url, "Fetching from catalog");
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(CatalogError::Transport)?;

        if !response.status().is_success() {
            return Err(CatalogError::Status {
                status: response.status(),
                url: url.to_string(),
            });
        }

        response.json().await.map_err(|source| CatalogError::Decode {
            url: url.to_string(),
            source,
        })
    }

    /// Fetch all subject summaries.
    pub async fn list_subjects(&self) -> Result<Vec<Subject>, CatalogError> {
        let url = self.endpoint(&["materias"])?;
        self.get_json(url).await
    }

    /// Fetch one subject with its groups and sessions.
    pub async fn subject_detail(&self, code: &str) -> Result<Subject, CatalogError> {
        let url = self.endpoint(&["materias", code])?;
        self.get_json(url).await
    }

    /// Check whether the catalog API answers on its root endpoint.
    pub async fn health_check(&self) -> bool {
        let Ok(url) = self.endpoint(&[]) else {
            return false;
        };
        match self.client.get(url).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}
