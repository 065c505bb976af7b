mod server;
mod tools;

pub use server::PcBuilderMcpServer;
pub use tools::{BuildOutput, ChatOutput, ComponentOutput};
