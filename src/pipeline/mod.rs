//! Composition of validation, planning and rendering.

mod builder;
mod orchestrator;

pub use builder::PipelineBuilder;
pub use orchestrator::{CardInput, CardPipeline, RenderOutput, split_cards};
