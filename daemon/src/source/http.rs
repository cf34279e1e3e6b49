use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use typeahead_core::Candidate;
use url::Url;

use crate::config::EndpointConfig;
use crate::source::{FetchError, SuggestionSource};

pub struct HttpSource {
    base_url: Url,
    client: Client,
}

impl HttpSource {
    pub fn new(config: &EndpointConfig) -> Result<Self> {
        let base_url = Url::parse(config.base_url.trim())
            .with_context(|| format!("invalid endpoint.base_url {:?}", config.base_url))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("endpoint.base_url {base_url} cannot carry a path segment");
        }

        Ok(Self {
            base_url,
            client: Client::builder()
                .user_agent(config.user_agent.clone())
                .timeout(Duration::from_millis(config.request_timeout_ms.max(1)))
                .build()
                .context("failed to build HTTP client")?,
        })
    }

    /// The prefix travels as one percent-encoded path segment; an empty prefix
    /// leaves the base untouched instead of adding a trailing `/`.
    fn query_url(&self, prefix: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty();
            if !prefix.is_empty() {
                segments.push(prefix);
            }
        }
        url
    }
}

#[async_trait]
impl SuggestionSource for HttpSource {
    async fn query(&self, prefix: &str) -> Result<Vec<Candidate>, FetchError> {
        let response = self.client.get(self.query_url(prefix)).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn record_selection(&self, name: &str) -> Result<(), FetchError> {
        let response = self
            .client
            .post(self.base_url.clone())
            .json(&SelectionRecord { name })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct SelectionRecord<'a> {
    name: &'a str,
}
