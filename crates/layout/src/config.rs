use serde::{Deserialize, Serialize};

/// How list items are marked when drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListMarker {
    /// A "•" before every item.
    #[default]
    Bullet,
    /// The item's ordinal, e.g. "2."
    Ordinal,
}

impl ListMarker {
    pub fn marker_text(self, ordinal: Option<u32>) -> String {
        match (self, ordinal) {
            (ListMarker::Ordinal, Some(n)) => format!("{}.", n),
            _ => "\u{2022}".to_string(),
        }
    }
}

/// Options that change how card text is broken into lines.
///
/// The validator, the planner and the renderer must agree on these, so a
/// `LayoutPlan` records the options it was computed with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextLayoutOptions {
    pub list_marker: ListMarker,
    /// Set tag tokens in the muted colour instead of body text colour.
    pub highlight_tags: bool,
}
