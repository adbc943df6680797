//! Card validation and page layout for cardify.
//!
//! Text is set in the PDF standard Helvetica faces, so every measurement in
//! this crate is a pure function of the text and the configured geometry.
//! Validation and planning are deterministic: the same inputs always yield
//! structurally equal results.

use cardify_types::GeometryError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),
    #[error("Nothing to lay out: single-card mode needs at least one card.")]
    EmptyInput,
}

impl From<GeometryError> for LayoutError {
    fn from(err: GeometryError) -> Self {
        LayoutError::InvalidGeometry(err.to_string())
    }
}

pub mod algorithms;
pub mod card;
pub mod config;
pub mod fonts;
pub mod plan;
pub mod text;

pub use self::card::{
    AtomicityBudget, Card, LengthMetrics, validate, validate_with_geometry,
    validate_with_geometry_options, validate_with_options,
};
pub use self::config::{ListMarker, TextLayoutOptions};
pub use self::fonts::StandardFont;
pub use self::plan::{LayoutMode, LayoutPlan, Page, Placement, Side, plan, plan_with_options};
pub use self::text::{LineItem, LineLayout, layout_text};

#[cfg(test)]
mod plan_test;
#[cfg(test)]
mod test_utils;
