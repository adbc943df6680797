use crate::config::TextLayoutOptions;
use crate::fonts::StandardFont;
use cardify_markdown::{FormattingNode, FormattingTree, TagSet, tag_spans};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpanStyle {
    pub bold: bool,
    pub italic: bool,
    /// Drawn in the theme's muted colour (tag tokens).
    pub muted: bool,
}

impl SpanStyle {
    pub fn font(self) -> StandardFont {
        StandardFont::for_style(self.bold, self.italic)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    pub style: SpanStyle,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Align {
    #[default]
    Left,
    Center,
}

/// A paragraph-like unit: one source line, a list item, or the title.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextBlock {
    pub spans: Vec<Span>,
    /// List marker drawn in the hanging indent, if this block is a list item.
    pub marker: Option<String>,
    pub align: Align,
    /// Set in the card's title size instead of the body size.
    pub title: bool,
}

impl TextBlock {
    fn is_blank(&self) -> bool {
        self.marker.is_none() && self.spans.iter().all(|s| s.text.trim().is_empty())
    }

    fn has_content(&self) -> bool {
        !self.spans.is_empty() || self.marker.is_some()
    }

    fn push(&mut self, text: &str, style: SpanStyle) {
        if text.is_empty() {
            return;
        }
        match self.spans.last_mut() {
            Some(last) if last.style == style => last.text.push_str(text),
            _ => self.spans.push(Span {
                text: text.to_string(),
                style,
            }),
        }
    }
}

/// Flattens a formatting tree into styled blocks.
pub struct TextBuilder<'a> {
    options: TextLayoutOptions,
    tags: Option<&'a TagSet>,
    blocks: Vec<TextBlock>,
    current: TextBlock,
}

impl<'a> TextBuilder<'a> {
    pub fn new(options: TextLayoutOptions) -> Self {
        Self {
            options,
            tags: None,
            blocks: Vec::new(),
            current: TextBlock::default(),
        }
    }

    /// Restricts tag highlighting to the card's extracted tags. Emphasis
    /// markers are gone from the tree, so a `#word` at the start of a styled
    /// run is only a tag if the raw text said so.
    pub fn with_tags(mut self, tags: &'a TagSet) -> Self {
        self.tags = Some(tags);
        self
    }

    pub fn push_title(&mut self, title: &str) {
        self.flush_current();
        let mut block = TextBlock {
            align: Align::Center,
            title: true,
            ..Default::default()
        };
        block.push(
            title,
            SpanStyle {
                bold: true,
                ..Default::default()
            },
        );
        self.blocks.push(block);
    }

    pub fn process_tree(&mut self, tree: &FormattingTree) {
        for node in tree.nodes() {
            match node {
                FormattingNode::ListItem { children, ordinal } => {
                    self.flush_current();
                    let mut item = TextBlock {
                        marker: Some(self.options.list_marker.marker_text(*ordinal)),
                        ..Default::default()
                    };
                    for child in children {
                        self.collect_item_inline(child, SpanStyle::default(), &mut item);
                    }
                    self.blocks.push(item);
                }
                other => self.process_inline(other, SpanStyle::default()),
            }
        }
    }

    /// The finished blocks with leading and trailing blank blocks removed.
    pub fn finish(mut self) -> Vec<TextBlock> {
        if self.current.has_content() {
            let current = std::mem::take(&mut self.current);
            self.blocks.push(current);
        }
        let start = self
            .blocks
            .iter()
            .position(|b| !b.is_blank())
            .unwrap_or(self.blocks.len());
        let end = self
            .blocks
            .iter()
            .rposition(|b| !b.is_blank())
            .map_or(start, |i| i + 1);
        self.blocks.drain(start..end).collect()
    }

    /// Pushes the open block unless it is empty. An empty open block only
    /// exists because a line break was just seen, and the next block takes
    /// that line.
    fn flush_current(&mut self) {
        let current = std::mem::take(&mut self.current);
        if current.has_content() {
            self.blocks.push(current);
        }
    }

    fn process_inline(&mut self, node: &FormattingNode, style: SpanStyle) {
        match node {
            FormattingNode::PlainRun { text } => {
                for (i, line) in text.split('\n').enumerate() {
                    if i > 0 {
                        let finished = std::mem::take(&mut self.current);
                        self.blocks.push(finished);
                    }
                    let mut current = std::mem::take(&mut self.current);
                    self.push_text(&mut current, line, style);
                    self.current = current;
                }
            }
            FormattingNode::Bold { children } => {
                let style = SpanStyle { bold: true, ..style };
                children.iter().for_each(|c| self.process_inline(c, style));
            }
            FormattingNode::Italic { children } | FormattingNode::ListItem { children, .. } => {
                let style = match node {
                    FormattingNode::Italic { .. } => SpanStyle {
                        italic: true,
                        ..style
                    },
                    _ => style,
                };
                children.iter().for_each(|c| self.process_inline(c, style));
            }
        }
    }

    /// List items occupy exactly one block, so embedded line breaks become spaces.
    fn collect_item_inline(&self, node: &FormattingNode, style: SpanStyle, item: &mut TextBlock) {
        match node {
            FormattingNode::PlainRun { text } => {
                self.push_text(item, &text.replace('\n', " "), style)
            }
            FormattingNode::Bold { children } => {
                let style = SpanStyle { bold: true, ..style };
                children
                    .iter()
                    .for_each(|c| self.collect_item_inline(c, style, item));
            }
            FormattingNode::Italic { children } => {
                let style = SpanStyle {
                    italic: true,
                    ..style
                };
                children
                    .iter()
                    .for_each(|c| self.collect_item_inline(c, style, item));
            }
            FormattingNode::ListItem { children, .. } => children
                .iter()
                .for_each(|c| self.collect_item_inline(c, style, item)),
        }
    }

    fn push_text(&self, block: &mut TextBlock, text: &str, style: SpanStyle) {
        if !self.options.highlight_tags {
            block.push(text, style);
            return;
        }
        let is_card_tag = |name: &str| self.tags.is_none_or(|tags| tags.contains(name));
        let mut cursor = 0;
        for span in tag_spans(text)
            .into_iter()
            .filter(|span| is_card_tag(&text[span.start + 1..span.end]))
        {
            block.push(&text[cursor..span.start], style);
            block.push(&text[span.clone()], SpanStyle { muted: true, ..style });
            cursor = span.end;
        }
        block.push(&text[cursor..], style);
    }
}
