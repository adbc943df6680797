//! Foundation types shared by every cardify crate.
//!
//! All lengths are PDF points (1/72 inch) and every rectangle uses a top-left
//! origin with `y` growing downwards. Conversion to the bottom-up PDF
//! coordinate space happens only in the renderer.

pub mod card;
pub mod color;
pub mod error;
pub mod geometry;
pub mod page;
pub mod units;

pub use card::{CardGeometry, CardSize, Orientation};
pub use color::Color;
pub use error::GeometryError;
pub use geometry::{Margins, Rect, Size};
pub use page::{PageGeometry, PageSize};
pub use units::POINTS_PER_INCH;
