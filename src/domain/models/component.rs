use serde::{Deserialize, Serialize};

/// A part suggested by the language model. Nothing checks that it exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendedComponent {
    category: String,
    name: String,
}

impl RecommendedComponent {
    pub fn new(category: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            category: category.into().trim().to_string(),
            name: name.into().trim().to_string(),
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Case-insensitive key used to spot repeated categories.
    pub fn category_key(&self) -> String {
        self.category.to_lowercase()
    }
}

/// A price as shown by the search provider, plus its numeric value if any.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    display: String,
    amount: Option<f64>,
}

impl Price {
    /// Keep the display text and read the amount from its digits and dots.
    pub fn parse(display: impl Into<String>) -> Self {
        let display = display.into().trim().to_string();
        let numeric: String = display
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.')
            .collect();
        let amount = numeric.parse::<f64>().ok().filter(|a| a.is_finite());
        Self { display, amount }
    }

    pub fn with_amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    pub fn amount(&self) -> Option<f64> {
        self.amount
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display)
    }
}

/// One result from the product-search API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductListing {
    title: String,
    price: Option<Price>,
    link: Option<String>,
    thumbnail: Option<String>,
}

impl ProductListing {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            price: None,
            link: None,
            thumbnail: None,
        }
    }

    pub fn with_price(mut self, price: Price) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = Some(thumbnail.into());
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn price(&self) -> Option<&Price> {
        self.price.as_ref()
    }

    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    pub fn thumbnail(&self) -> Option<&str> {
        self.thumbnail.as_deref()
    }
}

/// A recommended part enriched with whatever the product lookup found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedComponent {
    component: RecommendedComponent,
    title: Option<String>,
    price: Option<Price>,
    link: Option<String>,
    thumbnail: Option<String>,
}

impl PricedComponent {
    /// The component without any listing data, used when a lookup fails.
    pub fn unpriced(component: RecommendedComponent) -> Self {
        Self {
            component,
            title: None,
            price: None,
            link: None,
            thumbnail: None,
        }
    }

    pub fn from_listing(component: RecommendedComponent, listing: ProductListing) -> Self {
        let title = Some(listing.title).filter(|t| !t.trim().is_empty());
        Self {
            component,
            title,
            price: listing.price,
            link: listing.link,
            thumbnail: listing.thumbnail,
        }
    }

    pub fn component(&self) -> &RecommendedComponent {
        &self.component
    }

    pub fn category(&self) -> &str {
        self.component.category()
    }

    pub fn name(&self) -> &str {
        self.component.name()
    }

    /// Listing title when found, otherwise the recommended name.
    pub fn display_name(&self) -> &str {
        self.title.as_deref().unwrap_or(self.component.name())
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn price(&self) -> Option<&Price> {
        self.price.as_ref()
    }

    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    pub fn thumbnail(&self) -> Option<&str> {
        self.thumbnail.as_deref()
    }

    pub fn is_priced(&self) -> bool {
        self.price.is_some()
    }
}
