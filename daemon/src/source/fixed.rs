use async_trait::async_trait;
use typeahead_core::Candidate;

use crate::source::{FetchError, SuggestionSource};

pub struct FixedSource {
    names: Vec<String>,
}

impl FixedSource {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    fn matching(&self, prefix: &str) -> Vec<Candidate> {
        let lower_prefix = prefix.to_lowercase();
        self.names
            .iter()
            .filter(|name| name.to_lowercase().starts_with(&lower_prefix))
            .map(|name| Candidate::new(name.clone()))
            .collect()
    }
}

#[async_trait]
impl SuggestionSource for FixedSource {
    async fn query(&self, prefix: &str) -> Result<Vec<Candidate>, FetchError> {
        Ok(self.matching(prefix))
    }

    async fn record_selection(&self, _name: &str) -> Result<(), FetchError> {
        Ok(())
    }
}
