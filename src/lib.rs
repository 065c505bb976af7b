pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use cli::Commands;

pub use application::{
    BuildParser, ChatClient, ChatTurnUseCase, Needs, NeedsAnalyzer, PriceBuildUseCase,
    ProductSearch, RecommendBuildUseCase, ResetSessionUseCase, SessionRepository,
};

pub use connector::{
    AnthropicClient, CatalogChatClient, ChatController, Container, ContainerConfig,
    InMemorySessionRepository, JsonBuildParser, LineBuildParser, LlmNeedsAnalyzer, LlmProvider,
    MockProductSearch, OpenAiClient, PcBuilderMcpServer, Router, RuleBasedNeedsAnalyzer,
    SerpApiProductSearch,
};

pub use domain::{
    BuildRequest, BuildResult, ChatReply, DomainError, OutputFormat, Price, PricedComponent,
    ProductListing, PromptComposer, Question, RecommendedComponent, RenderFormat, ReplyKind,
    ResultRenderer, Session, SessionId, UseCase,
};
