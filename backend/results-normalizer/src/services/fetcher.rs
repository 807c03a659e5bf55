use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::config::Config;
use crate::error::FetchError;
use crate::metrics::track_fetch;
use crate::utils::retry::{retry_async_with_config, RetryConfig};

/// Source of raw JSON documents. Paths are relative to the collaborator's base.
#[async_trait]
pub trait ResourceFetcher: Send + Sync {
    async fn fetch_json(&self, path: &str) -> Result<Value, FetchError>;
}

/// Results API client over HTTP.
pub struct HttpFetcher {
    client: Client,
    base_url: Url,
    api_token: Option<String>,
    retry: RetryConfig,
}

impl HttpFetcher {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: parse_base_url(&config.api_base_url)?,
            api_token: config.api_token.clone(),
            retry: RetryConfig::with_attempts(config.retry_attempts),
        })
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn resource_url(&self, path: &str) -> Result<Url, FetchError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| FetchError::InvalidUrl(path.to_string(), e.to_string()))
    }

    async fn fetch_once(&self, url: &Url) -> Result<Value, FetchError> {
        let mut request = self.client.get(url.clone());
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(FetchError::Status { status, body });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ResourceFetcher for HttpFetcher {
    async fn fetch_json(&self, path: &str) -> Result<Value, FetchError> {
        let url = self.resource_url(path)?;
        tracing::debug!("Fetching {}", url);

        let result = retry_async_with_config(
            self.retry.clone(),
            FetchError::is_retryable,
            || track_fetch(self.fetch_once(&url)),
        )
        .await;

        if let Err(err) = &result {
            tracing::warn!(error = %err, "Results API request to {} failed", url);
        }
        result
    }
}

/// A base without a trailing slash would make `join` drop its last segment.
fn parse_base_url(raw: &str) -> Result<Url, FetchError> {
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{}/", raw)
    };
    Url::parse(&normalized).map_err(|e| FetchError::InvalidUrl(raw.to_string(), e.to_string()))
}
