//! Domain services: pure functions over the conversation and build models.

mod answer_extraction;
mod prompt_composer;
mod result_renderer;

pub use answer_extraction::*;
pub use prompt_composer::*;
pub use result_renderer::*;
