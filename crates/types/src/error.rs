use crate::geometry::Margins;
use thiserror::Error;

/// A physical configuration that cannot be laid out.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("{field} must be positive, got {value:.2}")]
    NonPositive { field: &'static str, value: f32 },
    #[error("{what} margins ({margins:.2}pt) leave no room inside {extent:.2}pt")]
    MarginsTooLarge {
        what: &'static str,
        margins: f32,
        extent: f32,
    },
    #[error("Line height {line_height:.2}pt is taller than the card content box ({content_height:.2}pt)")]
    LineTallerThanBox {
        line_height: f32,
        content_height: f32,
    },
    #[error("{what} margins must be finite and not negative, got {value:.2}")]
    NegativeMargin { what: &'static str, value: f32 },
    #[error("Page grid must have at least one row and one column, got {rows}x{cols}")]
    EmptyGrid { rows: u32, cols: u32 },
    #[error("Page grid of {rows}x{cols} exceeds {max} slots per page")]
    GridTooLarge { rows: u32, cols: u32, max: usize },
    #[error("Invalid length '{0}'")]
    InvalidLength(String),
}

pub(crate) fn ensure_positive(field: &'static str, value: f32) -> Result<(), GeometryError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GeometryError::NonPositive { field, value })
    }
}

pub(crate) fn ensure_margins(what: &'static str, margins: &Margins) -> Result<(), GeometryError> {
    let sides = [margins.top, margins.right, margins.bottom, margins.left];
    match sides.into_iter().find(|v| !v.is_finite() || *v < 0.0) {
        Some(value) => Err(GeometryError::NegativeMargin { what, value }),
        None => Ok(()),
    }
}
