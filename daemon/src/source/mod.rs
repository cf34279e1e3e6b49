mod fixed;
mod http;

use std::sync::Arc;

use async_trait::async_trait;
pub use fixed::FixedSource;
pub use http::HttpSource;
use reqwest::StatusCode;
use tracing::{debug, warn};
use typeahead_core::Candidate;

use crate::config::{EndpointConfig, SourceBackend, SourceConfig};

#[async_trait]
pub trait SuggestionSource: Send + Sync {
    /// Candidates for `prefix`; an empty prefix asks for the default set.
    async fn query(&self, prefix: &str) -> Result<Vec<Candidate>, FetchError>;

    async fn record_selection(&self, name: &str) -> Result<(), FetchError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("suggestion endpoint answered {0}")]
    Status(StatusCode),
    #[error("malformed suggestion payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("superseded by a newer query")]
    Canceled,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchOutcome {
    pub items: Vec<Candidate>,
    pub failed: bool,
}

#[derive(Clone)]
pub struct SuggestionClient {
    source: Arc<dyn SuggestionSource>,
}

impl SuggestionClient {
    pub fn new(source: Arc<dyn SuggestionSource>) -> Self {
        Self { source }
    }

    pub fn from_config(endpoint: &EndpointConfig, source: &SourceConfig) -> Self {
        let fixed = || Arc::new(FixedSource::new(source.fixed_names.clone()));
        let chosen: Arc<dyn SuggestionSource> = match source.backend {
            SourceBackend::Fixed => fixed(),
            SourceBackend::Http => match HttpSource::new(endpoint) {
                Ok(http) => Arc::new(http),
                Err(error) => {
                    warn!("failed to init http suggestion source: {error:#}");
                    fixed()
                }
            },
        };
        Self::new(chosen)
    }

    pub async fn fetch_suggestions(&self, prefix: &str) -> FetchOutcome {
        match self.source.query(prefix).await {
            Ok(items) => FetchOutcome {
                items,
                failed: false,
            },
            Err(error) => {
                warn!(prefix, "suggestion query failed: {error}");
                FetchOutcome {
                    items: Vec::new(),
                    failed: true,
                }
            }
        }
    }

    // Fire and forget: nothing awaits the report and failures are only logged.
    pub fn notify_selection(&self, name: String) {
        let source = self.source.clone();
        tokio::spawn(async move {
            if let Err(error) = source.record_selection(&name).await {
                debug!(name = %name, "selection report dropped: {error}");
            }
        });
    }
}


#[cfg(test)]
mod tests {
    use super::testing::ScriptedSource;
    use super::*;

    #[tokio::test]
    async fn failure_collapses_to_empty_outcome() {
        let source = Arc::new(ScriptedSource::default());
        source.answer("ma", &["Matilda"]);
        source.fail(true);
        let client = SuggestionClient::new(source.clone());

        let outcome = client.fetch_suggestions("ma").await;
        assert!(outcome.failed);
        assert!(outcome.items.is_empty());
    }

    #[tokio::test]
    async fn success_passes_items_through() {
        let source = Arc::new(ScriptedSource::default());
        source.answer("", &["Alice", "Bob"]);
        let client = SuggestionClient::new(source);

        let outcome = client.fetch_suggestions("").await;
        assert!(!outcome.failed);
        assert_eq!(outcome.items, [Candidate::new("Alice"), Candidate::new("Bob")]);
    }

    #[tokio::test]
    async fn notify_swallows_errors() {
        let source = Arc::new(ScriptedSource::default());
        let client = SuggestionClient::new(source.clone());

        client.notify_selection("Matilda".to_string());
        tokio::task::yield_now().await;
        tokio::task::yield_now().await;
        assert_eq!(source.selections(), ["Matilda"]);
    }

    #[tokio::test]
    async fn bad_base_url_falls_back_to_fixed() {
        let endpoint = EndpointConfig {
            base_url: "not a url".to_string(),
            ..EndpointConfig::default()
        };
        let source = SourceConfig {
            backend: SourceBackend::Http,
            fixed_names: vec!["Alice".to_string()],
        };
        let client = SuggestionClient::from_config(&endpoint, &source);

        let outcome = client.fetch_suggestions("").await;
        assert!(!outcome.failed);
        assert_eq!(outcome.items, [Candidate::new("Alice")]);
    }
}
