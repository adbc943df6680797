//! Plain-markdown serialization for interoperability with other note apps.

use crate::tags::{TagSet, tag_spans};
use serde::{Deserialize, Serialize};

/// Where tags end up in exported markdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagPlacement {
    /// Keep the text exactly as authored, tags wherever they were written.
    #[default]
    Inline,
    /// Remove tag tokens from the body and append one canonical tag line.
    Appended,
}

/// Serializes card text as a markdown file body (always newline-terminated).
pub fn to_markdown(raw: &str, tags: &TagSet, placement: TagPlacement) -> String {
    let mut out = match placement {
        TagPlacement::Inline => raw.trim_end().to_string(),
        TagPlacement::Appended => {
            let mut body = strip_tags(raw);
            if !tags.is_empty() {
                if !body.is_empty() {
                    body.push_str("\n\n");
                }
                body.push_str(&tags.to_canonical_line());
            }
            body
        }
    };
    out.push('\n');
    out
}

/// Removes every tag token from `raw`.
///
/// Each token takes one preceding space with it; lines left empty by the
/// removal are dropped, and trailing whitespace is trimmed.
pub fn strip_tags(raw: &str) -> String {
    let mut lines = Vec::new();
    for line in raw.split('\n') {
        let spans = tag_spans(line);
        if spans.is_empty() {
            lines.push(line.trim_end().to_string());
            continue;
        }
        let mut kept = String::with_capacity(line.len());
        let mut cursor = 0;
        for span in spans {
            let mut start = span.start;
            if start > cursor && line.as_bytes()[start - 1] == b' ' {
                start -= 1;
            }
            kept.push_str(&line[cursor..start]);
            cursor = span.end;
        }
        kept.push_str(&line[cursor..]);
        let kept = kept.trim_end();
        if !kept.trim().is_empty() {
            lines.push(kept.to_string());
        }
    }
    let joined = lines.join("\n");
    joined.trim_end().to_string()
}
