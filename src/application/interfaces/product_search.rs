use async_trait::async_trait;

use crate::domain::{DomainError, ProductListing};

/// Queries a product-search API for store listings.
#[async_trait]
pub trait ProductSearch: Send + Sync {
    /// Return up to `limit` listings for `query`, best match first.
    /// An empty list means the search ran but found nothing; transport or
    /// API failures are reported as [`DomainError::LookupFailed`].
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<ProductListing>, DomainError>;

    fn provider_name(&self) -> &str;
}
