//! Turning a card's formatting tree into measured, wrapped lines.

pub mod builder;
pub mod wrapper;

pub use builder::{Align, Span, SpanStyle, TextBlock, TextBuilder};
pub use wrapper::{LineItem, LineLayout, break_lines};

use crate::config::TextLayoutOptions;
use cardify_markdown::{FormattingTree, TagSet};
use cardify_types::CardGeometry;

/// Lays out a card's title and body into lines that fit `geometry`'s
/// content width. The title line uses the title size; its height keeps the
/// body's line spacing ratio.
///
/// Leading and trailing blank lines are dropped; blank lines between content are kept.
pub fn layout_text(
    title: Option<&str>,
    tree: &FormattingTree,
    tags: &TagSet,
    geometry: &CardGeometry,
    options: &TextLayoutOptions,
) -> Vec<LineLayout> {
    let mut builder = TextBuilder::new(*options).with_tags(tags);
    if let Some(title) = title {
        builder.push_title(title);
    }
    builder.process_tree(tree);
    let blocks = builder.finish();

    let width = geometry.content_width();
    blocks
        .iter()
        .flat_map(|block| {
            if block.title {
                break_lines(block, width, geometry.title_font_size, geometry.title_line_height())
            } else {
                break_lines(block, width, geometry.font_size, geometry.line_height)
            }
        })
        .collect()
}
