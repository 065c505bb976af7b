use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{BuildRequest, PricedComponent, RecommendedComponent};

/// Drop repeated categories, keeping the first occurrence of each.
pub fn dedupe_by_category(components: Vec<RecommendedComponent>) -> Vec<RecommendedComponent> {
    let mut seen = HashSet::new();
    components
        .into_iter()
        .filter(|c| {
            let fresh = seen.insert(c.category_key());
            if !fresh {
                debug!("Dropping repeated category {}: {}", c.category(), c.name());
            }
            fresh
        })
        .collect()
}

/// The priced parts list for one recommendation, in the model's order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildResult {
    items: Vec<PricedComponent>,
    request: Option<BuildRequest>,
}

impl BuildResult {
    pub fn new(items: Vec<PricedComponent>) -> Self {
        let mut seen = HashSet::new();
        let items = items
            .into_iter()
            .filter(|item| seen.insert(item.component().category_key()))
            .collect();
        Self {
            items,
            request: None,
        }
    }

    pub fn with_request(mut self, request: BuildRequest) -> Self {
        self.request = Some(request);
        self
    }

    pub fn items(&self) -> &[PricedComponent] {
        &self.items
    }

    pub fn request(&self) -> Option<&BuildRequest> {
        self.request.as_ref()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn categories(&self) -> Vec<&str> {
        self.items.iter().map(|i| i.category()).collect()
    }

    pub fn priced_count(&self) -> usize {
        self.items.iter().filter(|i| i.is_priced()).count()
    }

    /// Sum of every price with a numeric amount.
    pub fn estimated_total(&self) -> f64 {
        self.items
            .iter()
            .filter_map(|i| i.price().and_then(|p| p.amount()))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Price, ProductListing};

    fn priced(category: &str, name: &str, price: &str) -> PricedComponent {
        PricedComponent::from_listing(
            RecommendedComponent::new(category, name),
            ProductListing::new(name).with_price(Price::parse(price)),
        )
    }

    #[test]
    fn test_dedupe_keeps_first_occurrence() {
        let components = vec![
            RecommendedComponent::new("GPU", "RTX 4060"),
            RecommendedComponent::new("CPU", "Ryzen 5600"),
            RecommendedComponent::new("gpu", "RX 7600"),
        ];

        let deduped = dedupe_by_category(components);
        assert_eq!(deduped.len(), 2);
        assert_eq!(deduped[0].name(), "RTX 4060");
        assert_eq!(deduped[1].category(), "CPU");
    }

    #[test]
    fn test_estimated_total_skips_unpriced() {
        let result = BuildResult::new(vec![
            priced("GPU", "RTX 4060", "$299.99"),
            priced("CPU", "Ryzen 5600", "$129.00"),
            PricedComponent::unpriced(RecommendedComponent::new("Case", "Lancool 216")),
        ]);

        assert_eq!(result.len(), 3);
        assert_eq!(result.priced_count(), 2);
        assert!((result.estimated_total() - 428.99).abs() < 1e-9);
        assert_eq!(result.categories(), vec!["GPU", "CPU", "Case"]);
    }
}
