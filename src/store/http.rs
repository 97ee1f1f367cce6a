//! HTTP client for a running content-addressed store daemon

use super::{LeafNode, LeafStore};
use crate::{Error, Result};
use async_trait::async_trait;

/// Default API endpoint of a locally running store daemon
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5001";

/// Thin client for the store's DAG-get HTTP API.
///
/// Boundary glue only: one request per call, no retries, no client-side
/// caching. The per-fetch deadline is imposed by the fetcher, not here.
pub struct HttpStore {
    api_url: String,
    client: reqwest::Client,
}

impl HttpStore {
    pub fn new(api_url: impl Into<String>) -> Self {
        HttpStore {
            api_url: api_url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Client against the default local endpoint.
    pub fn local() -> Self {
        Self::new(DEFAULT_API_URL)
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

#[async_trait]
impl LeafStore for HttpStore {
    async fn get_leaf(&self, path: &str) -> Result<LeafNode> {
        let url = format!("{}/api/v0/dag/get", self.api_url);
        let response = self
            .client
            .post(&url)
            .query(&[("arg", path)])
            .send()
            .await
            .map_err(|e| Error::Store {
                path: path.to_string(),
                reason: e.to_string(),
            })?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(Error::NotFound(path.to_string()));
        }
        if !response.status().is_success() {
            return Err(Error::Store {
                path: path.to_string(),
                reason: format!("unexpected status {}", response.status()),
            });
        }

        response.json::<LeafNode>().await.map_err(|e| Error::Decode {
            path: path.to_string(),
            reason: e.to_string(),
        })
    }
}
