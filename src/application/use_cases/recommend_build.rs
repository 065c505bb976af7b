use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::application::{BuildParser, ChatClient};
use crate::domain::{
    dedupe_by_category, BuildRequest, DomainError, PromptComposer, PromptText, RecommendedComponent,
};

/// Asks the language model for a parts list and parses the reply.
pub struct RecommendBuildUseCase {
    chat_client: Arc<dyn ChatClient>,
    parser: Arc<dyn BuildParser>,
    composer: PromptComposer,
}

impl RecommendBuildUseCase {
    pub fn new(
        chat_client: Arc<dyn ChatClient>,
        parser: Arc<dyn BuildParser>,
        composer: PromptComposer,
    ) -> Self {
        Self {
            chat_client,
            parser,
            composer,
        }
    }

    pub fn compose(&self, request: &BuildRequest) -> PromptText {
        self.composer.compose(request)
    }

    /// Send the prompt with the fixed system instruction. No retries: rate
    /// limits and outages go back to the caller.
    pub async fn generate(&self, prompt: &PromptText) -> Result<String, DomainError> {
        let start_time = Instant::now();
        let response = self
            .chat_client
            .complete(self.composer.system_instruction(), prompt.as_str())
            .await?;

        info!(
            "{} answered in {:.2}s ({} chars)",
            self.chat_client.model_name(),
            start_time.elapsed().as_secs_f64(),
            response.len()
        );
        debug!("Raw model response:\n{}", response);

        Ok(response)
    }

    pub fn parse(&self, response: &str) -> Vec<RecommendedComponent> {
        self.parser.parse(response)
    }

    /// Compose, generate and parse. Repeated categories keep their first
    /// occurrence; an unreadable reply yields an empty list.
    pub async fn execute(
        &self,
        request: &BuildRequest,
    ) -> Result<Vec<RecommendedComponent>, DomainError> {
        info!("Requesting build for {}", request.summary());

        let prompt = self.compose(request);
        let response = self.generate(&prompt).await?;
        let parsed = self.parse(&response);

        if parsed.is_empty() {
            warn!(
                "{} found no components in the model response",
                self.parser.name()
            );
        }

        let components = dedupe_by_category(parsed);
        info!("Model recommended {} components", components.len());
        Ok(components)
    }
}
