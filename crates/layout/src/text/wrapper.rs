use super::builder::{Align, SpanStyle, TextBlock};
use crate::fonts::StandardFont;
use cardify_types::geometry::EPSILON;

/// Gap between a list marker and the item text, in ems.
const MARKER_GAP_EM: f32 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub struct LineLayout {
    pub items: Vec<LineItem>,
    /// Extent of the line from the content box's left edge.
    pub width: f32,
    pub font_size: f32,
    /// Vertical space the line takes, baseline to baseline.
    pub height: f32,
}

impl LineLayout {
    pub fn text(&self) -> String {
        self.items.iter().map(|i| i.text.as_str()).collect()
    }

    pub fn is_blank(&self) -> bool {
        self.items.iter().all(|i| i.text.trim().is_empty())
    }
}

/// A run of same-styled text on one line, positioned relative to the
/// content box's left edge.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub text: String,
    pub font: StandardFont,
    pub muted: bool,
    pub x: f32,
    pub width: f32,
}

#[derive(Debug, Clone)]
struct Piece {
    text: String,
    style: SpanStyle,
    width: f32,
}

enum Token {
    Word(Vec<Piece>),
    Space(Piece),
}

/// Greedy line breaking of one block.
///
/// Words break at whitespace; a word wider than the line on its own is
/// broken between characters. An empty block still occupies one line.
/// Every line is `line_height` tall.
pub fn break_lines(
    block: &TextBlock,
    max_width: f32,
    font_size: f32,
    line_height: f32,
) -> Vec<LineLayout> {
    let marker_width = block
        .marker
        .as_deref()
        .map(|m| StandardFont::Helvetica.measure(m, font_size));
    let indent = marker_width.map_or(0.0, |w| w + MARKER_GAP_EM * font_size);
    let available = (max_width - indent).max(0.0);

    let mut lines: Vec<Vec<Piece>> = Vec::new();
    let mut current: Vec<Piece> = Vec::new();
    let mut current_width = 0.0f32;
    let mut pending_spaces: Vec<Piece> = Vec::new();

    for token in tokenize(block, font_size) {
        match token {
            Token::Space(piece) => {
                if !current.is_empty() {
                    pending_spaces.push(piece);
                }
            }
            Token::Word(pieces) => {
                let word_width: f32 = pieces.iter().map(|p| p.width).sum();
                let space_width: f32 = pending_spaces.iter().map(|p| p.width).sum();

                if !current.is_empty() && current_width + space_width + word_width > available + EPSILON {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0.0;
                    pending_spaces.clear();
                } else {
                    current_width += space_width;
                    current.append(&mut pending_spaces);
                }

                if current.is_empty() && word_width > available + EPSILON {
                    for piece in pieces {
                        for c in piece.text.chars() {
                            let w = piece.style.font().char_width(c) as f32 * font_size / 1000.0;
                            if !current.is_empty() && current_width + w > available + EPSILON {
                                lines.push(std::mem::take(&mut current));
                                current_width = 0.0;
                            }
                            current.push(Piece {
                                text: c.to_string(),
                                style: piece.style,
                                width: w,
                            });
                            current_width += w;
                        }
                    }
                } else {
                    current_width += word_width;
                    current.extend(pieces);
                }
            }
        }
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }

    lines
        .into_iter()
        .enumerate()
        .map(|(idx, pieces)| {
            let marker = if idx == 0 { block.marker.as_deref() } else { None };
            let mut line = finalize_line(pieces, indent, marker, font_size, max_width, block.align);
            line.height = line_height;
            line
        })
        .collect()
}

fn tokenize(block: &TextBlock, font_size: f32) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut word: Vec<Piece> = Vec::new();

    for span in &block.spans {
        let font = span.style.font();
        let mut rest = span.text.as_str();
        while !rest.is_empty() {
            let is_space = rest.starts_with(char::is_whitespace);
            let end = rest
                .find(|c: char| c.is_whitespace() != is_space)
                .unwrap_or(rest.len());
            let (chunk, tail) = rest.split_at(end);
            // Tabs and other whitespace have no glyph in the standard fonts.
            let text = if is_space {
                " ".repeat(chunk.chars().count())
            } else {
                chunk.to_string()
            };
            let piece = Piece {
                width: font.measure(&text, font_size),
                text,
                style: span.style,
            };
            if is_space {
                if !word.is_empty() {
                    tokens.push(Token::Word(std::mem::take(&mut word)));
                }
                tokens.push(Token::Space(piece));
            } else {
                word.push(piece);
            }
            rest = tail;
        }
    }
    if !word.is_empty() {
        tokens.push(Token::Word(word));
    }
    tokens
}

fn finalize_line(
    pieces: Vec<Piece>,
    indent: f32,
    marker: Option<&str>,
    font_size: f32,
    max_width: f32,
    align: Align,
) -> LineLayout {
    let text_width: f32 = pieces.iter().map(|p| p.width).sum();
    let start_x = match align {
        Align::Left => indent,
        Align::Center => indent + ((max_width - indent - text_width) / 2.0).max(0.0),
    };

    let mut items: Vec<LineItem> = Vec::new();
    if let Some(marker) = marker {
        items.push(LineItem {
            text: marker.to_string(),
            font: StandardFont::Helvetica,
            muted: false,
            x: 0.0,
            width: StandardFont::Helvetica.measure(marker, font_size),
        });
    }

    let mut x = start_x;
    let mut last_style: Option<SpanStyle> = None;
    for piece in pieces {
        match items.last_mut() {
            Some(item) if last_style == Some(piece.style) => {
                item.text.push_str(&piece.text);
                item.width += piece.width;
            }
            _ => items.push(LineItem {
                text: piece.text,
                font: piece.style.font(),
                muted: piece.style.muted,
                x,
                width: piece.width,
            }),
        }
        last_style = Some(piece.style);
        x += piece.width;
    }

    LineLayout {
        items,
        width: if text_width > 0.0 { start_x + text_width } else { indent },
        font_size,
        height: font_size,
    }
}
