mod chat_turn;
mod price_build;
mod recommend_build;
mod reset_session;

pub use chat_turn::*;
pub use price_build::*;
pub use recommend_build::*;
pub use reset_session::*;
