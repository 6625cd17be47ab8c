use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::article::Headlines;
use crate::config::NewsApiConfig;
use crate::query::NewsQuery;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("upstream body is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Client for the NewsAPI `top-headlines` endpoint.
pub struct NewsClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    page_size: u32,
}

impl NewsClient {
    pub fn new(config: &NewsApiConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("SmartNews/1.0 (Headline Relay)")
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            page_size: config.page_size,
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Forward the query upstream and hand back status and body untouched.
    pub async fn fetch_raw(&self, query: &NewsQuery) -> Result<(StatusCode, Value), RelayError> {
        let url = format!("{}/top-headlines", self.base_url);

        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(key) = &self.api_key {
            params.push(("apiKey", key.clone()));
        }
        params.push(("pageSize", self.page_size.to_string()));
        params.extend(query.upstream_params());

        info!("Relaying headlines request: {:?}", query.upstream_params());

        let response = self.client.get(&url).query(&params).send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        let body: Value = serde_json::from_slice(&bytes)?;

        debug!("Upstream answered {} ({} bytes)", status, bytes.len());
        Ok((status, body))
    }

    /// Decodes the body whatever the upstream status. NewsAPI error bodies
    /// carry no `articles` array, which callers treat as an empty result.
    pub async fn fetch_headlines(&self, query: &NewsQuery) -> Result<Headlines, RelayError> {
        let (status, body) = self.fetch_raw(query).await?;
        if !status.is_success() {
            warn!("Upstream answered {}: {}", status, body);
        }
        Ok(serde_json::from_value(body)?)
    }
}
