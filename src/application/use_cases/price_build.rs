use std::sync::Arc;
use std::time::Instant;

use futures_util::stream::{self, StreamExt};
use tracing::{debug, info, warn};

use crate::application::ProductSearch;
use crate::domain::{BuildResult, DomainError, PricedComponent, ProductListing, RecommendedComponent};

const DEFAULT_CONCURRENCY: usize = 4;

/// Looks up a store listing for each recommended component.
pub struct PriceBuildUseCase {
    product_search: Arc<dyn ProductSearch>,
    concurrency: usize,
}

impl PriceBuildUseCase {
    pub fn new(product_search: Arc<dyn ProductSearch>) -> Self {
        Self {
            product_search,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Number of lookups allowed in flight at once (at least 1).
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Top listing for the component, `None` when the search found nothing.
    pub async fn try_lookup(
        &self,
        component: &RecommendedComponent,
    ) -> Result<Option<ProductListing>, DomainError> {
        let listings = self.product_search.search(component.name(), 1).await?;
        Ok(listings.into_iter().next())
    }

    /// Price one component. Never fails: a missing or failed lookup returns
    /// the component without price or link.
    pub async fn lookup(&self, component: &RecommendedComponent) -> PricedComponent {
        match self.try_lookup(component).await {
            Ok(Some(listing)) => {
                debug!(
                    "{} -> {} ({})",
                    component.name(),
                    listing.title(),
                    listing.price().map(|p| p.display()).unwrap_or("no price")
                );
                PricedComponent::from_listing(component.clone(), listing)
            }
            Ok(None) => {
                warn!(
                    "{} returned no results for {}",
                    self.product_search.provider_name(),
                    component.name()
                );
                PricedComponent::unpriced(component.clone())
            }
            Err(e) => {
                warn!("Lookup for {} failed: {}", component.name(), e);
                PricedComponent::unpriced(component.clone())
            }
        }
    }

    /// Price every component, keeping their order.
    pub async fn execute(&self, components: Vec<RecommendedComponent>) -> BuildResult {
        let start_time = Instant::now();
        let total = components.len();

        let priced: Vec<PricedComponent> = stream::iter(components)
            .map(|component| async move { self.lookup(&component).await })
            .buffered(self.concurrency)
            .collect()
            .await;

        let result = BuildResult::new(priced);
        info!(
            "Priced {}/{} components in {:.2}s",
            result.priced_count(),
            total,
            start_time.elapsed().as_secs_f64()
        );
        result
    }
}
