use std::sync::Arc;

use anyhow::{bail, Result};
use tracing::{debug, info, warn};

use crate::application::{
    BuildParser, ChatClient, ChatTurnUseCase, NeedsAnalyzer, PriceBuildUseCase, ProductSearch,
    RecommendBuildUseCase, ResetSessionUseCase, SessionRepository,
};
use crate::connector::{
    AnthropicClient, CatalogChatClient, InMemorySessionRepository, JsonBuildParser,
    LineBuildParser, LlmNeedsAnalyzer, MockProductSearch, OpenAiClient, RuleBasedNeedsAnalyzer,
    SerpApiProductSearch,
};
use crate::domain::{OutputFormat, PromptComposer, RenderFormat, ResultRenderer};

/// Which hosted language model answers build prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LlmProvider {
    #[default]
    Anthropic,
    OpenAi,
}

impl LlmProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            LlmProvider::Anthropic => "anthropic",
            LlmProvider::OpenAi => "openai",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "anthropic" | "claude" => LlmProvider::Anthropic,
            "openai" | "open-ai" | "gpt" => LlmProvider::OpenAi,
            other => {
                warn!("Unknown provider '{}', using anthropic", other);
                LlmProvider::Anthropic
            }
        }
    }
}

pub struct ContainerConfig {
    pub provider: LlmProvider,
    /// Use the offline catalog and mock prices; no API keys needed.
    pub offline: bool,
    /// Ask the model for a JSON array and parse it with [`JsonBuildParser`].
    pub structured_output: bool,
    pub render_format: RenderFormat,
    /// Product lookups in flight at once.
    pub concurrency: usize,
    /// Let the language model read the conversation as well as the keyword rules.
    pub llm_analysis: bool,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            provider: LlmProvider::default(),
            offline: false,
            structured_output: false,
            render_format: RenderFormat::default(),
            concurrency: 4,
            llm_analysis: true,
        }
    }
}

pub struct Container {
    chat_client: Arc<dyn ChatClient>,
    product_search: Arc<dyn ProductSearch>,
    parser: Arc<dyn BuildParser>,
    analyzer: Arc<dyn NeedsAnalyzer>,
    session_repo: Arc<dyn SessionRepository>,
    config: ContainerConfig,
}

impl Container {
    /// Wire adapters from the environment. Fails when a required API key is
    /// missing and `offline` is not set.
    pub fn new(config: ContainerConfig) -> Result<Self> {
        let (chat_client, product_search): (Arc<dyn ChatClient>, Arc<dyn ProductSearch>) =
            if config.offline {
                debug!("Using offline catalog and mock product search");
                (
                    Arc::new(CatalogChatClient::new()),
                    Arc::new(MockProductSearch::new()),
                )
            } else {
                let chat_client: Arc<dyn ChatClient> = match config.provider {
                    LlmProvider::Anthropic => {
                        debug!(
                            "Using Anthropic-compatible API at {}",
                            AnthropicClient::configured_base_url()
                        );
                        match AnthropicClient::from_env() {
                            Some(client) => Arc::new(client),
                            None => bail!(
                                "ANTHROPIC_API_KEY is not set (point ANTHROPIC_BASE_URL at a local \
                                 server or use --offline to run without it)"
                            ),
                        }
                    }
                    LlmProvider::OpenAi => match OpenAiClient::from_env() {
                        Some(client) => Arc::new(client),
                        None => bail!("OPENAI_API_KEY is not set (use --offline to run without it)"),
                    },
                };
                let product_search: Arc<dyn ProductSearch> = match SerpApiProductSearch::from_env() {
                    Some(search) => {
                        debug!("Using SerpApi product search scoped to '{}'", search.site());
                        Arc::new(search)
                    }
                    None => bail!("SERPAPI_API_KEY is not set (use --offline to run without it)"),
                };
                (chat_client, product_search)
            };

        Ok(Self::with_adapters(config, chat_client, product_search))
    }

    /// Wire the given model and search adapters; everything else follows the config.
    pub fn with_adapters(
        config: ContainerConfig,
        chat_client: Arc<dyn ChatClient>,
        product_search: Arc<dyn ProductSearch>,
    ) -> Self {
        let parser: Arc<dyn BuildParser> = if config.structured_output {
            Arc::new(JsonBuildParser::new())
        } else {
            Arc::new(LineBuildParser::new())
        };

        // The offline catalog only answers build prompts.
        let analyzer: Arc<dyn NeedsAnalyzer> = if config.llm_analysis && !config.offline {
            Arc::new(LlmNeedsAnalyzer::new(chat_client.clone()))
        } else {
            Arc::new(RuleBasedNeedsAnalyzer::new())
        };

        info!(
            "Model: {}, search: {}, parser: {}",
            chat_client.model_name(),
            product_search.provider_name(),
            parser.name()
        );

        Self {
            chat_client,
            product_search,
            parser,
            analyzer,
            session_repo: Arc::new(InMemorySessionRepository::new()),
            config,
        }
    }

    pub fn recommend_use_case(&self) -> RecommendBuildUseCase {
        let format = if self.config.structured_output {
            OutputFormat::Json
        } else {
            OutputFormat::Lines
        };
        RecommendBuildUseCase::new(
            self.chat_client.clone(),
            self.parser.clone(),
            PromptComposer::new(format),
        )
    }

    pub fn price_use_case(&self) -> PriceBuildUseCase {
        PriceBuildUseCase::new(self.product_search.clone()).with_concurrency(self.config.concurrency)
    }

    pub fn chat_use_case(&self) -> ChatTurnUseCase {
        ChatTurnUseCase::new(
            self.session_repo.clone(),
            self.analyzer.clone(),
            Arc::new(self.recommend_use_case()),
            Arc::new(self.price_use_case()),
            self.renderer(),
        )
    }

    pub fn reset_use_case(&self) -> ResetSessionUseCase {
        ResetSessionUseCase::new(self.session_repo.clone())
    }

    pub fn renderer(&self) -> ResultRenderer {
        ResultRenderer::new(self.config.render_format)
    }

    pub fn product_search(&self) -> Arc<dyn ProductSearch> {
        self.product_search.clone()
    }

    pub fn offline(&self) -> bool {
        self.config.offline
    }

    pub fn provider(&self) -> LlmProvider {
        self.config.provider
    }
}
