mod build_request;
mod build_result;
mod chat_reply;
mod component;
mod session;

pub use build_request::*;
pub use build_result::*;
pub use chat_reply::*;
pub use component::*;
pub use session::*;
