use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::application::ProductSearch;
use crate::domain::{DomainError, Price, ProductListing};

pub const DEFAULT_SERPAPI_BASE_URL: &str = "https://serpapi.com";
const SEARCH_PATH: &str = "/search.json";
const DEFAULT_SITE: &str = "amazon.com";
/// SerpApi reports an empty search as an error; treat it as "no results".
const NO_RESULTS_MARKER: &str = "hasn't returned any results";

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    shopping_results: Vec<ShoppingResult>,
}

#[derive(Deserialize)]
struct ShoppingResult {
    #[serde(default)]
    title: String,
    #[serde(default)]
    price: Option<String>,
    #[serde(default)]
    extracted_price: Option<f64>,
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    product_link: Option<String>,
    #[serde(default)]
    thumbnail: Option<String>,
}

impl ShoppingResult {
    fn into_listing(self) -> ProductListing {
        let mut listing = ProductListing::new(self.title);
        if let Some(display) = self.price {
            let price = match self.extracted_price {
                Some(amount) => Price::parse(display).with_amount(amount),
                None => Price::parse(display),
            };
            listing = listing.with_price(price);
        }
        if let Some(link) = self.link.or(self.product_link) {
            listing = listing.with_link(link);
        }
        if let Some(thumbnail) = self.thumbnail {
            listing = listing.with_thumbnail(thumbnail);
        }
        listing
    }
}

/// [`ProductSearch`] backed by SerpApi's Google Shopping engine.
///
/// Queries are scoped to one store by prefixing the site name
/// (`"amazon.com RTX 4060"`).
///
/// ```text
/// SERPAPI_API_KEY=...
/// SERPAPI_BASE_URL=https://serpapi.com
/// SERPAPI_SITE=amazon.com
/// ```
pub struct SerpApiProductSearch {
    client: reqwest::Client,
    api_key: String,
    url: String,
    site: String,
}

impl SerpApiProductSearch {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        let base: String = base_url.into();
        let url = format!("{}{}", base.trim_end_matches('/'), SEARCH_PATH);
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(20))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            url,
            site: DEFAULT_SITE.to_string(),
        }
    }

    /// Store the search is scoped to. An empty site searches all stores.
    pub fn with_site(mut self, site: impl Into<String>) -> Self {
        self.site = site.into().trim().to_string();
        self
    }

    pub fn site(&self) -> &str {
        &self.site
    }

    /// `SERPAPI_API_KEY` is required; returns `None` when absent.
    pub fn from_env() -> Option<Self> {
        let key = std::env::var("SERPAPI_API_KEY").ok()?;
        let base = std::env::var("SERPAPI_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_SERPAPI_BASE_URL.to_string());
        let site = std::env::var("SERPAPI_SITE").unwrap_or_else(|_| DEFAULT_SITE.to_string());
        Some(Self::new(key, base).with_site(site))
    }

    fn scoped_query(&self, query: &str) -> String {
        if self.site.is_empty() {
            query.trim().to_string()
        } else {
            format!("{} {}", self.site, query.trim())
        }
    }
}

#[async_trait]
impl ProductSearch for SerpApiProductSearch {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<ProductListing>, DomainError> {
        let q = self.scoped_query(query);
        let num = limit.max(1).to_string();
        debug!("SerpApi search: {}", q);

        let response = self
            .client
            .get(&self.url)
            .query(&[
                ("engine", "google"),
                ("q", q.as_str()),
                ("tbm", "shop"),
                ("num", num.as_str()),
                ("api_key", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| DomainError::lookup(format!("SerpApi request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DomainError::lookup(format!("SerpApi response unreadable: {e}")))?;
        let parsed: Option<SearchResponse> = serde_json::from_str(&body).ok();

        if let Some(message) = parsed.as_ref().and_then(|r| r.error.as_deref()) {
            if message.contains(NO_RESULTS_MARKER) {
                return Ok(Vec::new());
            }
            warn!("SerpApi returned {status}: {message}");
            return Err(DomainError::lookup(format!("SerpApi error: {message}")));
        }
        if !status.is_success() {
            warn!("SerpApi returned {status}: {body}");
            return Err(DomainError::lookup(format!("SerpApi returned {status}")));
        }

        let parsed = parsed.ok_or_else(|| {
            DomainError::lookup(format!("SerpApi returned an unreadable body for '{q}'"))
        })?;

        Ok(parsed
            .shopping_results
            .into_iter()
            .filter(|r| !r.title.trim().is_empty())
            .take(limit)
            .map(ShoppingResult::into_listing)
            .collect())
    }

    fn provider_name(&self) -> &str {
        "serpapi"
    }
}
