//! Integration tests for the PC build assistant.
//!
//! These tests drive whole conversations and builds through the public API
//! with a scripted language model and the deterministic product search.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use pcbuilder::{
    BuildParser, CatalogChatClient, ChatClient, ChatTurnUseCase, Container, ContainerConfig,
    DomainError, InMemorySessionRepository, LineBuildParser, MockProductSearch,
    PriceBuildUseCase, PromptComposer, Question, RecommendBuildUseCase, RecommendedComponent,
    ReplyKind, ResultRenderer, RuleBasedNeedsAnalyzer, Session, SessionId, SessionRepository,
    UseCase,
};

/// Language model that plays back a fixed script and records every prompt.
struct ScriptedChatClient {
    replies: Mutex<VecDeque<Result<String, DomainError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedChatClient {
    fn new(replies: Vec<Result<String, DomainError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatClient for ScriptedChatClient {
    async fn complete(&self, _system: &str, user: &str) -> Result<String, DomainError> {
        self.prompts.lock().unwrap().push(user.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(DomainError::upstream("script exhausted")))
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

struct TestEnv {
    chat: ChatTurnUseCase,
    sessions: Arc<InMemorySessionRepository>,
    client: Arc<ScriptedChatClient>,
}

fn setup_test_env(replies: Vec<Result<String, DomainError>>) -> TestEnv {
    let client = Arc::new(ScriptedChatClient::new(replies));
    let sessions = Arc::new(InMemorySessionRepository::new());
    let recommend = RecommendBuildUseCase::new(
        client.clone(),
        Arc::new(LineBuildParser::new()),
        PromptComposer::default(),
    );
    let price = PriceBuildUseCase::new(Arc::new(MockProductSearch::new()));
    let chat = ChatTurnUseCase::new(
        sessions.clone(),
        Arc::new(RuleBasedNeedsAnalyzer::new()),
        Arc::new(recommend),
        Arc::new(price),
        ResultRenderer::default(),
    );

    TestEnv {
        chat,
        sessions,
        client,
    }
}

#[test]
fn test_session_missing_fields_is_incomplete() {
    let mut session = Session::new(SessionId::from("incomplete"));
    let err = session.to_build_request().unwrap_err();
    assert!(err.is_incomplete_session());
    assert_eq!(err.to_string(), "Incomplete session: missing budget, use_case");

    session.record_answer(Question::Budget, "around 800");
    let err = session.to_build_request().unwrap_err();
    assert_eq!(err.to_string(), "Incomplete session: missing use_case");
}

#[tokio::test]
async fn test_gaming_build_end_to_end() {
    let mut session = Session::new(SessionId::from("e2e"));
    session.record_answer(Question::Budget, "$1000");
    session.record_answer(Question::UseCase, "gaming");

    let request = session.to_build_request().expect("complete session");
    assert_eq!(request.budget(), 1000);
    assert_eq!(request.use_case(), &UseCase::Gaming);

    let prompt = PromptComposer::default().compose(&request);
    assert!(prompt.as_str().contains("1000"));
    assert!(prompt.as_str().contains("gaming"));

    let client = Arc::new(ScriptedChatClient::new(vec![Ok(
        "GPU: RTX 4060\nCPU: Ryzen 5600".to_string()
    )]));
    let recommend = RecommendBuildUseCase::new(
        client.clone(),
        Arc::new(LineBuildParser::new()),
        PromptComposer::default(),
    );
    let components = recommend.execute(&request).await.expect("generate");
    assert_eq!(
        components,
        vec![
            RecommendedComponent::new("GPU", "RTX 4060"),
            RecommendedComponent::new("CPU", "Ryzen 5600"),
        ]
    );
    assert_eq!(client.prompts(), vec![prompt.into_inner()]);

    let price = PriceBuildUseCase::new(Arc::new(MockProductSearch::new()));
    let result = price.execute(components).await;
    assert_eq!(result.priced_count(), 2);

    let text = ResultRenderer::default().render(&result);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    for (line, item) in lines.iter().zip(result.items()) {
        assert!(line.contains(item.name()));
        assert!(line.contains(item.price().unwrap().display()));
        assert!(line.contains(item.link().unwrap()));
    }
}

#[tokio::test]
async fn test_lookup_without_results_keeps_component() {
    let price = PriceBuildUseCase::new(Arc::new(MockProductSearch::empty()));
    let component = RecommendedComponent::new("Case", "Some Obscure Case 9000");

    let priced = price.lookup(&component).await;
    assert_eq!(priced.component(), &component);
    assert!(priced.price().is_none());
    assert!(priced.link().is_none());
    assert!(!priced.is_priced());
}

#[tokio::test]
async fn test_rate_limited_turn_leaves_session_unchanged() {
    let env = setup_test_env(vec![
        Err(DomainError::rate_limited("429 Too Many Requests", Some(20))),
        Ok("GPU: RTX 4060\nCPU: Ryzen 5600".to_string()),
    ]);
    let id = SessionId::from("rate-limited");

    let reply = env
        .chat
        .handle(&id, "gaming PC, budget $1000")
        .await
        .unwrap();
    assert_eq!(reply.kind(), ReplyKind::Confirmation);
    let before = env.sessions.find(&id).await.unwrap().unwrap();

    let reply = env.chat.handle(&id, "yes").await.unwrap();
    assert_eq!(reply.kind(), ReplyKind::Error);
    assert!(reply.text().contains("20 seconds"));

    let after = env.sessions.find(&id).await.unwrap().unwrap();
    assert_eq!(after.turns(), before.turns());
    assert_eq!(after.pending_question(), &Question::Confirmation);
    assert!(after.last_build().is_none());

    // Same turn again, now the model answers.
    let reply = env.chat.handle(&id, "yes").await.unwrap();
    assert_eq!(reply.kind(), ReplyKind::Build);
    assert_eq!(reply.build_result().unwrap().len(), 2);
    assert_eq!(env.client.prompts().len(), 2);
}

#[tokio::test]
async fn test_duplicate_categories_keep_first() {
    let env = setup_test_env(vec![Ok(
        "CPU: Ryzen 5 7600X\nGPU: RTX 4060\ncpu: Intel Core i5-14400F".to_string(),
    )]);
    let id = SessionId::from("dupes");

    env.chat.handle(&id, "office PC for $700").await.unwrap();
    let reply = env.chat.handle(&id, "yes").await.unwrap();

    let build = reply.build_result().unwrap();
    assert_eq!(build.categories(), vec!["CPU", "GPU"]);
    assert_eq!(build.items()[0].name(), "Ryzen 5 7600X");
}

#[tokio::test]
async fn test_sessions_are_independent() {
    let env = setup_test_env(vec![]);
    let alice = SessionId::from("alice");
    let bob = SessionId::from("bob");

    env.chat.handle(&alice, "I want a gaming PC").await.unwrap();
    env.chat.handle(&bob, "video editing, about $2500").await.unwrap();

    let alice_session = env.sessions.find(&alice).await.unwrap().unwrap();
    let bob_session = env.sessions.find(&bob).await.unwrap().unwrap();

    assert_eq!(alice_session.pending_question(), &Question::Budget);
    assert_eq!(bob_session.pending_question(), &Question::Confirmation);
    assert_eq!(bob_session.budget(), Some(2500));
    assert!(alice_session.budget().is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_offline_container_conversation() {
    let container = Container::with_adapters(
        ContainerConfig {
            offline: true,
            ..ContainerConfig::default()
        },
        Arc::new(CatalogChatClient::new()),
        Arc::new(MockProductSearch::new()),
    );
    let chat = container.chat_use_case();
    let id = SessionId::from("offline");

    let reply = chat.start(&id).await.unwrap();
    assert_eq!(reply.text(), ChatTurnUseCase::greeting());

    let reply = chat.handle(&id, "I want a gaming PC").await.unwrap();
    assert_eq!(reply.kind(), ReplyKind::Question);

    let reply = chat.handle(&id, "$1,500").await.unwrap();
    assert_eq!(reply.kind(), ReplyKind::Confirmation);
    assert!(reply.text().contains("$1500"));

    let reply = chat.handle(&id, "yes").await.unwrap();
    assert_eq!(reply.kind(), ReplyKind::Build);
    let build = reply.build_result().unwrap();
    assert_eq!(build.len(), 8);
    assert_eq!(build.priced_count(), 8);
    assert_eq!(build.items()[1].name(), "NVIDIA GeForce RTX 4060");

    container.reset_use_case().execute(&id).await.unwrap();
    let reply = chat.handle(&id, "").await.unwrap();
    assert_eq!(reply.text(), ChatTurnUseCase::greeting());
}

#[test]
fn test_line_parser_is_swappable() {
    let parsers: Vec<Arc<dyn BuildParser>> = vec![
        Arc::new(LineBuildParser::new()),
        Arc::new(pcbuilder::JsonBuildParser::new()),
    ];
    let replies = [
        "CPU: Ryzen 5 5600",
        r#"[{"category": "CPU", "name": "Ryzen 5 5600"}]"#,
    ];

    for (parser, reply) in parsers.iter().zip(replies) {
        let components = parser.parse(reply);
        assert_eq!(components, vec![RecommendedComponent::new("CPU", "Ryzen 5 5600")]);
    }
}

#[tokio::test]
async fn test_video_games_answer_gets_gaming_build() {
    let env = setup_test_env(vec![Ok("GPU: RTX 4060".to_string())]);
    let id = SessionId::from("video-games");

    let reply = env
        .chat
        .handle(&id, "I mostly play video games, $1000 tops")
        .await
        .unwrap();
    assert_eq!(reply.kind(), ReplyKind::Confirmation);

    env.chat.handle(&id, "yes").await.unwrap();
    let prompt = env.client.prompts().remove(0);
    assert!(prompt.contains("Use case: gaming"));
}
