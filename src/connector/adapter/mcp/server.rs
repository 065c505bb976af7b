use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::tool;
use rmcp::tool_handler;
use rmcp::tool_router;
use rmcp::ErrorData as McpError;
use rmcp::ServerHandler;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::debug;

use crate::connector::api::Container;
use crate::domain::{BuildRequest, SessionId, UseCase};

use super::tools::{BuildOutput, ChatOutput};

/// Input parameters for the chat tool
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ChatToolInput {
    /// The user's message
    pub message: String,

    /// Session returned by a previous call; omit to start a new conversation
    pub session_id: Option<String>,
}

/// Input parameters for the recommend_build tool
#[derive(Debug, Deserialize, JsonSchema)]
pub struct RecommendToolInput {
    /// Total budget in US dollars
    pub budget: u32,

    /// Primary use: gaming, office, editing, or a short free-form description
    pub use_case: String,

    /// Extra wishes such as brands, size or noise
    #[serde(default)]
    pub preferences: Vec<String>,
}

/// Input parameters for the reset_session tool
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ResetToolInput {
    /// Session to discard
    pub session_id: String,
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value).map_err(|e| {
        McpError::internal_error(format!("Failed to serialize result: {}", e), None)
    })?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

/// MCP server exposing the PC build assistant
#[derive(Clone)]
pub struct PcBuilderMcpServer {
    container: Arc<Container>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl PcBuilderMcpServer {
    pub fn new(container: Arc<Container>) -> Self {
        Self {
            container,
            tool_router: Self::tool_router(),
        }
    }

    /// Talk to the PC build assistant. It asks for budget and use case, confirms them,
    /// then recommends a compatible parts list with store prices.
    /// Pass the returned session_id back on every following message.
    #[tool(name = "chat")]
    async fn chat(&self, params: Parameters<ChatToolInput>) -> Result<CallToolResult, McpError> {
        let input = params.0;
        let session_id = input
            .session_id
            .filter(|s| !s.trim().is_empty())
            .map(SessionId::from)
            .unwrap_or_default();
        debug!("MCP chat on session {}", session_id);

        let reply = self
            .container
            .chat_use_case()
            .handle(&session_id, &input.message)
            .await
            .map_err(|e| McpError::internal_error(format!("Chat failed: {}", e), None))?;

        to_json(&ChatOutput::new(session_id.as_str(), &reply))
    }

    /// Recommend and price a PC build directly from a budget and use case, without a conversation.
    #[tool(name = "recommend_build")]
    async fn recommend_build(
        &self,
        params: Parameters<RecommendToolInput>,
    ) -> Result<CallToolResult, McpError> {
        let input = params.0;
        if input.budget == 0 {
            return Err(McpError::invalid_params("budget must be greater than zero", None));
        }
        if input.use_case.trim().is_empty() {
            return Err(McpError::invalid_params("use_case must not be empty", None));
        }

        let request = BuildRequest::new(input.budget, UseCase::parse(&input.use_case))
            .with_preferences(input.preferences);

        let result = self
            .container
            .chat_use_case()
            .build(&request)
            .await
            .map_err(|e| McpError::internal_error(e.user_message(), None))?;

        if result.is_empty() {
            return Err(McpError::internal_error(
                "The model reply contained no components",
                None,
            ));
        }

        to_json(&BuildOutput::from(&result))
    }

    /// Forget a conversation so the next chat message starts over.
    #[tool(name = "reset_session")]
    async fn reset_session(
        &self,
        params: Parameters<ResetToolInput>,
    ) -> Result<CallToolResult, McpError> {
        let session_id = SessionId::from(params.0.session_id);
        self.container
            .reset_use_case()
            .execute(&session_id)
            .await
            .map_err(|e| McpError::internal_error(format!("Reset failed: {}", e), None))?;

        Ok(CallToolResult::success(vec![Content::text(format!(
            "Session {} reset.",
            session_id
        ))]))
    }
}

#[tool_handler]
impl ServerHandler for PcBuilderMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "PC build assistant. Use the chat tool for a guided conversation (keep passing \
                 the returned session_id), or recommend_build when budget and use case are \
                 already known. Prices come from a live product search and may change."
                    .into(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::ErrorCode;
    use serde_json::Value;

    use crate::connector::api::ContainerConfig;
    use crate::connector::{CatalogChatClient, MockProductSearch};

    fn offline_server() -> PcBuilderMcpServer {
        let container = Container::with_adapters(
            ContainerConfig {
                offline: true,
                ..ContainerConfig::default()
            },
            Arc::new(CatalogChatClient::new()),
            Arc::new(MockProductSearch::new()),
        );
        PcBuilderMcpServer::new(Arc::new(container))
    }

    fn output_json(result: &CallToolResult) -> Value {
        let content = serde_json::to_value(&result.content[0]).unwrap();
        let text = content["text"].as_str().unwrap();
        serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
    }

    fn chat_input(message: &str, session_id: Option<&str>) -> Parameters<ChatToolInput> {
        Parameters(ChatToolInput {
            message: message.to_string(),
            session_id: session_id.map(String::from),
        })
    }

    #[tokio::test]
    async fn test_recommend_build_returns_priced_components() {
        let server = offline_server();
        let result = server
            .recommend_build(Parameters(RecommendToolInput {
                budget: 1000,
                use_case: "gaming".to_string(),
                preferences: vec!["quiet".to_string()],
            }))
            .await
            .unwrap();

        let output = output_json(&result);
        assert_eq!(output["budget"], 1000);
        assert_eq!(output["use_case"], "gaming");
        let components = output["components"].as_array().unwrap();
        assert_eq!(components.len(), 8);
        assert!(components.iter().all(|c| c["link"].is_string()));
        assert!(output["estimated_total"].as_f64().unwrap() > 0.0);
    }

    #[tokio::test]
    async fn test_recommend_build_rejects_zero_budget() {
        let err = offline_server()
            .recommend_build(Parameters(RecommendToolInput {
                budget: 0,
                use_case: "gaming".to_string(),
                preferences: Vec::new(),
            }))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        assert!(err.message.contains("budget"));
    }

    #[tokio::test]
    async fn test_chat_conversation_on_spawned_task() {
        let server = offline_server();

        let first = tokio::spawn({
            let server = server.clone();
            async move {
                server
                    .chat(chat_input("gaming PC for about $1500", None))
                    .await
            }
        })
        .await
        .unwrap()
        .unwrap();
        let first = output_json(&first);
        assert_eq!(first["kind"], "confirmation");
        let session_id = first["session_id"].as_str().unwrap().to_string();
        assert!(!session_id.is_empty());

        let second = tokio::spawn({
            let server = server.clone();
            let session_id = session_id.clone();
            async move { server.chat(chat_input("yes", Some(&session_id))).await }
        })
        .await
        .unwrap()
        .unwrap();
        let second = output_json(&second);
        assert_eq!(second["kind"], "build");
        assert_eq!(second["session_id"], session_id.as_str());
        assert_eq!(second["build"]["components"].as_array().unwrap().len(), 8);
    }

    #[tokio::test]
    async fn test_reset_session_starts_over() {
        let server = offline_server();
        server
            .chat(chat_input("office PC for $600", Some("desk")))
            .await
            .unwrap();

        let result = server
            .reset_session(Parameters(ResetToolInput {
                session_id: "desk".to_string(),
            }))
            .await
            .unwrap();
        assert_eq!(output_json(&result), Value::String("Session desk reset.".into()));

        let reply = server.chat(chat_input("yes", Some("desk"))).await.unwrap();
        assert_ne!(output_json(&reply)["kind"], "build");
    }
}
