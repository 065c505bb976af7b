mod build_parser;
mod chat_client;
mod needs_analyzer;
mod product_search;
mod session_repository;

pub use build_parser::*;
pub use chat_client::*;
pub use needs_analyzer::*;
pub use product_search::*;
pub use session_repository::*;
