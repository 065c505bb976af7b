//! # Domain Layer
//!
//! Conversation and build models plus the pure services that work on them.
//! This layer is independent of external frameworks and infrastructure.

mod error;
pub mod models;
pub mod services;

pub use error::*;
pub use models::*;
pub use services::*;
