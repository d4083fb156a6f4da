//! HTTP client for the calculation service.
//!
//! Requests carry a timeout and are attempted exactly once; any failure goes
//! straight back to the caller for display.

use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::config::ClientConfig;
use crate::energy::dto::{CalculateBmrRequest, EnergyEstimate, HealthResponse};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("server error {status}: {message}")]
    Rejected { status: StatusCode, message: String },
}

#[derive(Debug, Deserialize)]
struct ErrorPayload {
    error: String,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|source| ClientError::Transport {
                url: config.api_base_url.clone(),
                source,
            })?;
        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    #[instrument(skip(self))]
    pub async fn calculate_bmr(
        &self,
        req: &CalculateBmrRequest,
    ) -> Result<EnergyEstimate, ClientError> {
        let url = self.url("/api/calculate-bmr");
        let transport = |source: reqwest::Error| ClientError::Transport {
            url: url.clone(),
            source,
        };
        let res = self.http.post(&url).json(req).send().await.map_err(transport)?;
        let res = check_status(res).await?;
        let estimate = res.json::<EnergyEstimate>().await.map_err(transport)?;
        debug!(bmr = estimate.bmr, "bmr response");
        Ok(estimate)
    }

    #[instrument(skip(self))]
    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        let url = self.url("/api/test");
        let transport = |source: reqwest::Error| ClientError::Transport {
            url: url.clone(),
            source,
        };
        let res = self.http.get(&url).send().await.map_err(transport)?;
        let res = check_status(res).await?;
        res.json::<HealthResponse>().await.map_err(transport)
    }
}

async fn check_status(res: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let body = res.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorPayload>(&body)
        .map(|p| p.error)
        .unwrap_or(body);
    Err(ClientError::Rejected { status, message })
}
