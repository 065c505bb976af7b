//! # Connector Layer
//!
//! External integrations implementing the application interfaces:
//! - Language models (Anthropic, OpenAI-compatible, offline catalog)
//! - Product search (SerpApi Google Shopping, deterministic mock)
//! - Reply parsing, needs analysis and session storage
//! - The CLI/MCP surface (`api`, `adapter::mcp`)

pub mod adapter;
pub mod api;

pub use adapter::*;
pub use api::{ChatController, Container, ContainerConfig, LlmProvider, Router};
