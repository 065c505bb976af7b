use async_trait::async_trait;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use reqwest::Url;

use crate::application::ProductSearch;
use crate::domain::{DomainError, Price, ProductListing};

const MOCK_STORE: &str = "https://store.example.com/search";

/// Deterministic [`ProductSearch`] for offline runs and tests. Every query
/// gets a listing whose price is derived from a hash of the query.
pub struct MockProductSearch {
    empty: bool,
}

impl MockProductSearch {
    pub fn new() -> Self {
        Self { empty: false }
    }

    /// A search that never finds anything.
    pub fn empty() -> Self {
        Self { empty: true }
    }

    fn price_for(query: &str) -> f64 {
        let mut hasher = DefaultHasher::new();
        query.to_lowercase().hash(&mut hasher);
        let cents = 4_999 + hasher.finish() % 45_000;
        cents as f64 / 100.0
    }
}

impl Default for MockProductSearch {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductSearch for MockProductSearch {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<ProductListing>, DomainError> {
        let query = query.trim();
        if self.empty || query.is_empty() || limit == 0 {
            return Ok(vec![]);
        }

        let amount = Self::price_for(query);
        let link = Url::parse_with_params(MOCK_STORE, &[("q", query)])
            .map_err(|e| DomainError::lookup(format!("mock link for '{query}': {e}")))?;

        Ok(vec![ProductListing::new(query)
            .with_price(Price::parse(format!("${amount:.2}")))
            .with_link(link.to_string())])
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}
