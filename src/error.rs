use cardify_layout::LayoutError;
use cardify_render_core::RenderError;
use cardify_types::GeometryError;
use thiserror::Error;

/// A comprehensive error type for the card pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Invalid geometry: {0}")]
    Geometry(#[from] GeometryError),

    #[error("Layout failed: {0}")]
    Layout(#[from] LayoutError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for PipelineError {
    fn from(e: serde_json::Error) -> Self {
        PipelineError::Config(e.to_string())
    }
}
