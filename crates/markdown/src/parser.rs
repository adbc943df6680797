//! Single-pass parser for the inline markdown subset.
//!
//! Recognised constructs:
//! - `**bold**`
//! - `*italic*` and `_italic_`
//! - lines starting with `- ` or `* ` (after optional indentation) as list items
//!
//! Delimiters pair with the earliest matching closer on the same line. An
//! opener must be followed by a non-whitespace character and a closer must be
//! preceded by one; `_` additionally only opens at the start of a word and only
//! closes at the end of one, so `snake_case_names` stay literal. Emphasis nests
//! one level (bold inside italic or italic inside bold); any delimiters at the
//! third level are kept as literal text. Unmatched delimiters are literal text.

use crate::ast::{FormattingNode, FormattingTree};

/// Bold-in-italic (or the reverse) is the deepest supported nesting.
const MAX_EMPHASIS_DEPTH: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Emphasis {
    Bold,
    Italic,
}

/// A matched delimiter pair starting at some opener position.
struct Span {
    kind: Emphasis,
    delimiter_len: usize,
    /// Byte offset of the closing delimiter.
    close: usize,
}

/// Parses a card body into its formatting tree. Never fails.
pub fn parse_inline(raw: &str) -> FormattingTree {
    let mut nodes = Vec::new();
    let mut ordinal = 0u32;
    let mut previous_was_item = false;

    for (idx, line) in raw.split('\n').enumerate() {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if idx > 0 && !previous_was_item {
            push_text(&mut nodes, "\n");
        }
        match list_item_body(line) {
            Some(body) => {
                ordinal += 1;
                nodes.push(FormattingNode::ListItem {
                    children: parse_spans(body, 0),
                    ordinal: Some(ordinal),
                });
                previous_was_item = true;
            }
            None => {
                ordinal = 0;
                for node in parse_spans(line, 0) {
                    push_node(&mut nodes, node);
                }
                previous_was_item = false;
            }
        }
    }

    FormattingTree::new(nodes)
}

fn list_item_body(line: &str) -> Option<&str> {
    let trimmed = line.trim_start_matches([' ', '\t']);
    trimmed
        .strip_prefix("- ")
        .or_else(|| trimmed.strip_prefix("* "))
}

fn parse_spans(text: &str, depth: usize) -> Vec<FormattingNode> {
    let mut out = Vec::new();
    if depth >= MAX_EMPHASIS_DEPTH {
        push_text(&mut out, text);
        return out;
    }

    let mut plain_start = 0;
    let mut i = 0;
    while i < text.len() {
        match match_span(text, i) {
            Some(span) => {
                push_text(&mut out, &text[plain_start..i]);
                let inner = &text[i + span.delimiter_len..span.close];
                let children = parse_spans(inner, depth + 1);
                out.push(match span.kind {
                    Emphasis::Bold => FormattingNode::Bold { children },
                    Emphasis::Italic => FormattingNode::Italic { children },
                });
                i = span.close + span.delimiter_len;
                plain_start = i;
            }
            // Delimiters are ASCII, so advancing one byte at a time never
            // produces a slice inside a multi-byte character.
            None => i += 1,
        }
    }
    push_text(&mut out, &text[plain_start..]);
    out
}

fn match_span(text: &str, at: usize) -> Option<Span> {
    let bytes = text.as_bytes();
    match bytes[at] {
        b'*' if bytes.get(at + 1) == Some(&b'*') => {
            let open = at + 2;
            if !starts_content(bytes, open) {
                return None;
            }
            let close = open + text[open..].find("**")?;
            ends_content(bytes, open, close).then_some(Span {
                kind: Emphasis::Bold,
                delimiter_len: 2,
                close,
            })
        }
        b'*' => {
            let open = at + 1;
            if !starts_content(bytes, open) {
                return None;
            }
            let mut j = open;
            while j < bytes.len() {
                if bytes[j] == b'*' {
                    if bytes.get(j + 1) == Some(&b'*') {
                        // a nested bold delimiter, not our closer
                        j += 2;
                        continue;
                    }
                    if ends_content(bytes, open, j) {
                        return Some(Span {
                            kind: Emphasis::Italic,
                            delimiter_len: 1,
                            close: j,
                        });
                    }
                }
                j += 1;
            }
            None
        }
        b'_' => {
            let open = at + 1;
            if is_word_char(text[..at].chars().next_back()) || !starts_content(bytes, open) {
                return None;
            }
            let mut j = open;
            while let Some(offset) = text[j..].find('_') {
                let close = j + offset;
                if ends_content(bytes, open, close)
                    && !is_word_char(text[close + 1..].chars().next())
                {
                    return Some(Span {
                        kind: Emphasis::Italic,
                        delimiter_len: 1,
                        close,
                    });
                }
                j = close + 1;
            }
            None
        }
        _ => None,
    }
}

fn starts_content(bytes: &[u8], open: usize) -> bool {
    bytes.get(open).is_some_and(|b| !b.is_ascii_whitespace())
}

fn ends_content(bytes: &[u8], open: usize, close: usize) -> bool {
    close > open && !bytes[close - 1].is_ascii_whitespace()
}

fn is_word_char(c: Option<char>) -> bool {
    c.is_some_and(char::is_alphanumeric)
}

fn push_node(out: &mut Vec<FormattingNode>, node: FormattingNode) {
    match node {
        FormattingNode::PlainRun { text } => push_text(out, &text),
        other => out.push(other),
    }
}

/// Appends literal text, merging it into a trailing `PlainRun`.
fn push_text(out: &mut Vec<FormattingNode>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(FormattingNode::PlainRun { text: last }) = out.last_mut() {
        last.push_str(text);
    } else {
        out.push(FormattingNode::plain(text));
    }
}
