//! Core rendering abstractions for cardify.
//!
//! This crate provides what every PDF backend shares:
//! - `DocumentRenderer` trait for writing a laid-out plan page by page
//! - `RenderOptions` and the card colour `Theme`s
//! - Error types and coordinate helpers

mod error;
mod options;
mod traits;
pub mod utils;

pub use error::RenderError;
pub use options::{RenderOptions, Theme, ThemeName};
pub use traits::DocumentRenderer;
