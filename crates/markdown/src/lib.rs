//! The markdown subset understood by cardify.
//!
//! Everything in this crate is a total function over arbitrary text: input
//! that does not match a recognised construct degrades to literal text and
//! nothing here returns an error.

pub mod ast;
pub mod export;
pub mod parser;
pub mod tags;
pub mod title;

pub use ast::{FormattingNode, FormattingTree};
pub use export::{TagPlacement, strip_tags, to_markdown};
pub use parser::parse_inline;
pub use tags::{TagSet, extract_tags, tag_spans};
pub use title::{BACK_SIDE_HEADING, split_back_side, split_title};
