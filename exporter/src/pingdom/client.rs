//! Pingdom API client.
//!
//! Implements [`InventorySource`] on top of the Pingdom REST API.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use shared::models::{Check, CheckId, CheckResult, Probe};
use shared::sync::{InventorySource, SourceError};
use thiserror::Error;

use super::wire::{ChecksEnvelope, ErrorEnvelope, ProbesEnvelope, ResultsEnvelope};
use crate::config::PingdomConfig;

/// Errors returned by the Pingdom client.
#[derive(Debug, Error)]
pub enum PingdomError {
    /// The HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Pingdom answered with a non-success status.
    #[error("Pingdom API error {status}: {message}")]
    Api {
        /// HTTP status.
        status: StatusCode,
        /// Error description from the response body.
        message: String,
    },

    /// The response body was not the expected JSON.
    #[error("Failed to decode Pingdom response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<PingdomError> for SourceError {
    fn from(err: PingdomError) -> Self {
        match err {
            PingdomError::Http(e) => SourceError::Transport(e.to_string()),
            PingdomError::Api { status, message } => SourceError::Upstream {
                status: status.as_u16(),
                message,
            },
            PingdomError::Decode(e) => SourceError::Decode(e.to_string()),
        }
    }
}

/// Client for the Pingdom REST API.
#[derive(Debug, Clone)]
pub struct PingdomClient {
    http: reqwest::Client,
    base_url: String,
    api_token: String,
}

impl PingdomClient {
    /// Creates a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &PingdomConfig) -> Result<Self, PingdomError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("pingdom-exporter/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_token: config.api_token.clone(),
        })
    }

    /// Lists all checks.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be decoded.
    pub async fn checks(&self, include_tags: bool) -> Result<Vec<Check>, PingdomError> {
        let query: &[(&str, &str)] = if include_tags {
            &[("include_tags", "true")]
        } else {
            &[]
        };
        let envelope: ChecksEnvelope = self.get("/checks", query).await?;
        Ok(envelope.checks.into_iter().map(Check::from).collect())
    }

    /// Lists all probes.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be decoded.
    pub async fn probes(&self) -> Result<Vec<Probe>, PingdomError> {
        let envelope: ProbesEnvelope = self.get("/probes", &[]).await?;
        Ok(envelope.probes.into_iter().map(Probe::from).collect())
    }

    /// Returns up to `limit` raw results of a check, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be decoded.
    pub async fn results(
        &self,
        check_id: CheckId,
        limit: u32,
    ) -> Result<Vec<CheckResult>, PingdomError> {
        let limit = limit.to_string();
        let envelope: ResultsEnvelope = self
            .get(&format!("/results/{check_id}"), &[("limit", limit.as_str())])
            .await?;
        Ok(envelope.results.into_iter().map(CheckResult::from).collect())
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, PingdomError> {
        let url = format!("{}{path}", self.base_url);
        tracing::trace!(%url, "Pingdom request");

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.api_token)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|e| e.error.message())
                .unwrap_or_else(|_| status.canonical_reason().unwrap_or("unknown error").to_string());
            return Err(PingdomError::Api { status, message });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl InventorySource for PingdomClient {
    async fn list_checks(&self, include_tags: bool) -> Result<Vec<Check>, SourceError> {
        Ok(self.checks(include_tags).await?)
    }

    async fn list_probes(&self) -> Result<Vec<Probe>, SourceError> {
        Ok(self.probes().await?)
    }

    async fn latest_result(&self, check_id: CheckId) -> Result<CheckResult, SourceError> {
        self.results(check_id, 1)
            .await?
            .into_iter()
            .next()
            .ok_or(SourceError::NoResults(check_id))
    }
}
