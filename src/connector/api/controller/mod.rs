pub mod chat_controller;
pub mod lookup_controller;
pub mod recommend_controller;

pub use chat_controller::ChatController;
pub use lookup_controller::LookupController;
pub use recommend_controller::RecommendController;
