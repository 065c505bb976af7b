use anyhow::{bail, Result};

use crate::domain::ProductListing;

use super::super::Container;

pub struct LookupController<'a> {
    container: &'a Container,
}

impl<'a> LookupController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn lookup(&self, query: String, num: usize) -> Result<String> {
        if query.trim().is_empty() {
            bail!("Query must not be empty");
        }

        let listings = self
            .container
            .product_search()
            .search(&query, num.max(1))
            .await?;

        Ok(self.format_listings(&query, &listings))
    }

    fn format_listings(&self, query: &str, listings: &[ProductListing]) -> String {
        if listings.is_empty() {
            return format!("No listings found for '{}'.", query);
        }

        let mut output = format!("Found {} listings for '{}':\n\n", listings.len(), query);
        for (i, listing) in listings.iter().enumerate() {
            output.push_str(&format!(
                "{}. {} ({})\n",
                i + 1,
                listing.title(),
                listing.price().map(|p| p.display()).unwrap_or("price not found")
            ));
            if let Some(link) = listing.link() {
                output.push_str(&format!("   {}\n", link));
            }
        }

        output
    }
}
