//! cardify: atomic markdown index cards, laid out for print.
//!
//! The library is a pure pipeline: card text goes in, validated cards, a
//! deterministic layout plan and PDF bytes come out. Reading card files and
//! writing output is left to the caller (see the `cardify` binary).

pub mod config;
pub mod error;
pub mod pipeline;

pub use config::CardifyConfig;
pub use error::PipelineError;
pub use pipeline::{CardInput, CardPipeline, PipelineBuilder, RenderOutput, split_cards};

pub use cardify_layout::{
    AtomicityBudget, Card, LayoutError, LayoutMode, LayoutPlan, LengthMetrics, ListMarker,
    TextLayoutOptions,
};
pub use cardify_markdown::{FormattingNode, FormattingTree, TagPlacement, TagSet};
pub use cardify_render_core::{RenderError, RenderOptions, Theme, ThemeName};
pub use cardify_types::{CardGeometry, CardSize, Margins, Orientation, PageGeometry, PageSize};
