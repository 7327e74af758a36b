//! Upstream analyzer client
//!
//! Thin typed wrapper over the analyzer's HTTP API. The base URL and timeout
//! are injected at construction; nothing here reads ambient configuration.

use std::time::Duration;

use shared_types::{AnalyzeRequest, AnalyzeResponse, RuleSummary};
use thiserror::Error;

/// Upstream call failure
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("analyzer request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("analyzer returned status {0}")]
    Status(u16),
}

/// HTTP client for the analyzer service
#[derive(Debug, Clone)]
pub struct AnalyzerClient {
    http: reqwest::Client,
    base_url: String,
}

impl AnalyzerClient {
    /// Build a client for the analyzer at `base_url`, with a request
    /// timeout in milliseconds.
    pub fn new(base_url: &str, timeout_ms: u64) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST the request to the analyzer and decode its verdict.
    pub async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalyzeResponse, ClientError> {
        let url = format!("{}/analyze", self.base_url);
        let response = self.http.post(&url).json(request).send().await?;
        if !response.status().is_success() {
            return Err(ClientError::Status(response.status().as_u16()));
        }
        Ok(response.json().await?)
    }

    /// Fetch the analyzer's rule catalog.
    pub async fn list_rules(&self) -> Result<Vec<RuleSummary>, ClientError> {
        let url = format!("{}/rules", self.base_url);
        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(ClientError::Status(response.status().as_u16()));
        }
        Ok(response.json().await?)
    }

    /// Check analyzer liveness.
    pub async fn health(&self) -> Result<(), ClientError> {
        let url = format!("{}/health", self.base_url);
        let response = self.http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(ClientError::Status(response.status().as_u16()));
        }
        Ok(())
    }
}
