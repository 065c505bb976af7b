pub mod container;
pub mod controller;
pub mod router;

pub use container::{Container, ContainerConfig, LlmProvider};
pub use controller::ChatController;
pub use router::Router;
