mod anthropic_client;
mod catalog_chat_client;
mod in_memory_session_repository;
mod json_build_parser;
mod line_build_parser;
mod llm_http;
mod llm_needs_analyzer;
pub mod mcp;
mod mock_product_search;
mod openai_client;
mod rule_based_needs_analyzer;
mod serpapi_product_search;

pub use anthropic_client::*;
pub use catalog_chat_client::*;
pub use in_memory_session_repository::*;
pub use json_build_parser::*;
pub use line_build_parser::*;
pub use llm_needs_analyzer::*;
pub use mcp::PcBuilderMcpServer;
pub use mock_product_search::*;
pub use openai_client::*;
pub use rule_based_needs_analyzer::*;
pub use serpapi_product_search::*;
