//! The Card Validator.

use crate::config::TextLayoutOptions;
use crate::text::layout_text;
use cardify_markdown::{
    BACK_SIDE_HEADING, FormattingTree, TagPlacement, TagSet, extract_tags, parse_inline,
    split_title,
};
use cardify_types::CardGeometry;
use serde::{Deserialize, Serialize};

/// The length budget that keeps a card to a single idea.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AtomicityBudget {
    pub max_chars: usize,
    pub max_lines: usize,
}

impl Default for AtomicityBudget {
    fn default() -> Self {
        Self {
            max_chars: 280,
            max_lines: 10,
        }
    }
}

impl AtomicityBudget {
    pub fn new(max_chars: usize, max_lines: usize) -> Self {
        Self {
            max_chars,
            max_lines,
        }
    }

    pub fn admits(&self, metrics: &LengthMetrics) -> bool {
        metrics.char_count <= self.max_chars && metrics.line_count <= self.max_lines
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LengthMetrics {
    /// Rendered characters: title and text runs, without markup or newlines.
    pub char_count: usize,
    /// Wrapped lines at the card's content width.
    pub line_count: usize,
}

/// A validated card. Immutable; re-validate to get a card for new text.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    raw_text: String,
    title: Option<String>,
    tags: TagSet,
    formatting_tree: FormattingTree,
    length_metrics: LengthMetrics,
    atomic: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    geometry: Option<CardGeometry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    back: Option<Box<Card>>,
}

impl Card {
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn tags(&self) -> &TagSet {
        &self.tags
    }

    pub fn formatting_tree(&self) -> &FormattingTree {
        &self.formatting_tree
    }

    pub fn length_metrics(&self) -> LengthMetrics {
        self.length_metrics
    }

    pub fn is_atomic(&self) -> bool {
        self.atomic
    }

    /// The geometry this card was validated against, when it overrides the
    /// shared card geometry.
    pub fn geometry_override(&self) -> Option<&CardGeometry> {
        self.geometry.as_ref()
    }

    /// The reverse side, printed on the following page (single-card mode)
    /// or on the mirrored slot of the following sheet (batch mode).
    pub fn back(&self) -> Option<&Card> {
        self.back.as_deref()
    }

    /// Attaches `back` as this card's reverse side, replacing any earlier one.
    /// A back never has a back of its own.
    pub fn with_back(mut self, mut back: Card) -> Self {
        back.back = None;
        self.back = Some(Box::new(back));
        self
    }

    /// The card as markdown. A back side follows under a `## Back Side` heading.
    pub fn to_markdown(&self, placement: TagPlacement) -> String {
        let mut out = cardify_markdown::to_markdown(&self.raw_text, &self.tags, placement);
        if let Some(back) = self.back() {
            out.push('\n');
            out.push_str(BACK_SIDE_HEADING);
            out.push_str("\n\n");
            out.push_str(&back.to_markdown(placement));
        }
        out
    }
}

/// Validates `raw` against `budget`, wrapping at `geometry`'s content width.
///
/// Never fails: an over-budget card is returned with `is_atomic() == false`.
pub fn validate(raw: &str, budget: &AtomicityBudget, geometry: &CardGeometry) -> Card {
    validate_with_options(raw, budget, geometry, &TextLayoutOptions::default())
}

/// Like [`validate`], but the card keeps `geometry` as its own and the
/// planner lays it out with it instead of the shared card geometry.
pub fn validate_with_geometry(raw: &str, budget: &AtomicityBudget, geometry: CardGeometry) -> Card {
    validate_with_geometry_options(raw, budget, geometry, &TextLayoutOptions::default())
}

pub fn validate_with_geometry_options(
    raw: &str,
    budget: &AtomicityBudget,
    geometry: CardGeometry,
    options: &TextLayoutOptions,
) -> Card {
    let mut card = validate_with_options(raw, budget, &geometry, options);
    card.geometry = Some(geometry);
    card
}

pub fn validate_with_options(
    raw: &str,
    budget: &AtomicityBudget,
    geometry: &CardGeometry,
    options: &TextLayoutOptions,
) -> Card {
    let (title, body) = split_title(raw);
    let formatting_tree = parse_inline(body);
    let tags = extract_tags(raw);

    let char_count = title.map_or(0, |t| t.chars().count())
        + formatting_tree
            .plain_text()
            .chars()
            .filter(|c| *c != '\n')
            .count();
    let line_count = layout_text(title, &formatting_tree, &tags, geometry, options).len();

    let length_metrics = LengthMetrics {
        char_count,
        line_count,
    };
    Card {
        raw_text: raw.to_string(),
        title: title.map(str::to_string),
        tags,
        formatting_tree,
        length_metrics,
        atomic: budget.admits(&length_metrics),
        geometry: None,
        back: None,
    }
}
