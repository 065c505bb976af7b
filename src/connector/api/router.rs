use anyhow::Result;

use crate::Commands;

use super::container::Container;
use super::controller::{LookupController, RecommendController};

/// Dispatches the one-shot commands. `chat` and `mcp` run their own loops in main.
pub struct Router<'a> {
    recommend_controller: RecommendController<'a>,
    lookup_controller: LookupController<'a>,
}

impl<'a> Router<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self {
            recommend_controller: RecommendController::new(container),
            lookup_controller: LookupController::new(container),
        }
    }

    pub async fn route(&self, command: Commands) -> Result<String> {
        match command {
            Commands::Recommend {
                budget,
                use_case,
                preferences,
            } => {
                self.recommend_controller
                    .recommend(budget, use_case, preferences)
                    .await
            }
            Commands::Lookup { query, num } => self.lookup_controller.lookup(query, num).await,
            Commands::Chat { .. } => unreachable!("chat command is handled separately in main"),
            Commands::Mcp => unreachable!("MCP command is handled separately in main"),
        }
    }
}
