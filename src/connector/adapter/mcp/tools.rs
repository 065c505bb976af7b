use schemars::JsonSchema;
use serde::Serialize;

use crate::domain::{BuildResult, ChatReply, PricedComponent};

/// One priced part of a recommended build
#[derive(Debug, Serialize, JsonSchema)]
pub struct ComponentOutput {
    /// Component category (CPU, GPU, ...)
    pub category: String,

    /// Model name as recommended
    pub name: String,

    /// Title of the matching store listing, if one was found
    pub title: Option<String>,

    /// Price as displayed by the store
    pub price: Option<String>,

    /// Numeric price in dollars, when the displayed price could be read
    pub price_amount: Option<f64>,

    /// Link to the store listing
    pub link: Option<String>,

    /// Product image
    pub thumbnail: Option<String>,
}

impl From<&PricedComponent> for ComponentOutput {
    fn from(item: &PricedComponent) -> Self {
        Self {
            category: item.category().to_string(),
            name: item.name().to_string(),
            title: item.title().map(String::from),
            price: item.price().map(|p| p.display().to_string()),
            price_amount: item.price().and_then(|p| p.amount()),
            link: item.link().map(String::from),
            thumbnail: item.thumbnail().map(String::from),
        }
    }
}

/// A recommended build with store prices
#[derive(Debug, Serialize, JsonSchema)]
pub struct BuildOutput {
    /// Budget the build was made for
    pub budget: Option<u32>,

    /// Use case the build was made for
    pub use_case: Option<String>,

    /// Components in the order they were recommended
    pub components: Vec<ComponentOutput>,

    /// Sum of the prices that were found
    pub estimated_total: f64,
}

impl From<&BuildResult> for BuildOutput {
    fn from(result: &BuildResult) -> Self {
        Self {
            budget: result.request().map(|r| r.budget()),
            use_case: result.request().map(|r| r.use_case().to_string()),
            components: result.items().iter().map(ComponentOutput::from).collect(),
            estimated_total: (result.estimated_total() * 100.0).round() / 100.0,
        }
    }
}

/// Reply to one chat message
#[derive(Debug, Serialize, JsonSchema)]
pub struct ChatOutput {
    /// Session to pass back on the next message
    pub session_id: String,

    /// question, confirmation, build or error
    pub kind: String,

    /// Text to show the user
    pub text: String,

    /// The build, when this reply completed one
    pub build: Option<BuildOutput>,
}

impl ChatOutput {
    pub fn new(session_id: impl Into<String>, reply: &ChatReply) -> Self {
        Self {
            session_id: session_id.into(),
            kind: reply.kind().as_str().to_string(),
            text: reply.text().to_string(),
            build: reply.build_result().map(BuildOutput::from),
        }
    }
}
