use crate::error::PipelineError;
use cardify_layout::{
    AtomicityBudget, Card, LayoutMode, LayoutPlan, TextLayoutOptions, plan_with_options,
    validate_with_geometry_options, validate_with_options,
};
use cardify_markdown::{TagPlacement, split_back_side};
use cardify_render_core::RenderOptions;
use cardify_types::{CardGeometry, PageGeometry};
use itertools::Itertools;

/// One card as supplied by the caller: its markdown, optionally the
/// markdown of its back side, and optionally a geometry of its own.
#[derive(Debug, Clone, PartialEq)]
pub struct CardInput {
    pub text: String,
    pub back: Option<String>,
    pub geometry: Option<CardGeometry>,
}

impl CardInput {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            back: None,
            geometry: None,
        }
    }

    /// A card file's text, with everything under a `## Back Side` line
    /// taken as the back.
    pub fn from_markdown(markdown: &str) -> Self {
        let (front, back) = split_back_side(markdown);
        Self {
            text: front.trim_end().to_string(),
            back: back.map(|b| b.trim().to_string()),
            geometry: None,
        }
    }

    pub fn with_back(mut self, back: impl Into<String>) -> Self {
        self.back = Some(back.into());
        self
    }

    pub fn with_geometry(mut self, geometry: CardGeometry) -> Self {
        self.geometry = Some(geometry);
        self
    }
}

impl From<&str> for CardInput {
    fn from(text: &str) -> Self {
        CardInput::new(text)
    }
}

impl From<String> for CardInput {
    fn from(text: String) -> Self {
        CardInput::new(text)
    }
}

/// The result of a full validate, plan and render run.
#[derive(Debug, Clone)]
pub struct RenderOutput {
    pub pdf: Vec<u8>,
    pub page_count: usize,
    /// Input indices of cards whose text overflows their box.
    pub overflowed: Vec<usize>,
    /// Input indices of cards with a side over the atomicity budget.
    pub non_atomic: Vec<usize>,
}

/// A configured pipeline. Every method is a pure function of its arguments
/// and the configuration; nothing here touches the filesystem.
#[derive(Debug, Clone)]
pub struct CardPipeline {
    pub(crate) budget: AtomicityBudget,
    pub(crate) card_geometry: CardGeometry,
    pub(crate) page_geometry: PageGeometry,
    pub(crate) mode: LayoutMode,
    pub(crate) text_options: TextLayoutOptions,
    pub(crate) render_options: RenderOptions,
    pub(crate) tag_placement: TagPlacement,
}

impl CardPipeline {
    pub fn budget(&self) -> &AtomicityBudget {
        &self.budget
    }

    pub fn card_geometry(&self) -> &CardGeometry {
        &self.card_geometry
    }

    pub fn page_geometry(&self) -> &PageGeometry {
        &self.page_geometry
    }

    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    pub fn validate(&self, text: &str) -> Card {
        validate_with_options(text, &self.budget, &self.card_geometry, &self.text_options)
    }

    /// Validates the card and its back, if any, against the same geometry.
    /// A blank back is dropped.
    pub fn validate_input(&self, input: &CardInput) -> Card {
        let validate_side = |text: &str| match input.geometry {
            Some(geometry) => {
                validate_with_geometry_options(text, &self.budget, geometry, &self.text_options)
            }
            None => self.validate(text),
        };
        let card = validate_side(&input.text);
        match input.back.as_deref().filter(|b| !b.trim().is_empty()) {
            Some(back) => card.with_back(validate_side(back)),
            None => card,
        }
    }

    /// Validates independent cards, in parallel with the `parallel` feature.
    /// The result is in input order.
    pub fn validate_all(&self, inputs: &[CardInput]) -> Vec<Card> {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            inputs.par_iter().map(|i| self.validate_input(i)).collect()
        }
        #[cfg(not(feature = "parallel"))]
        {
            inputs.iter().map(|i| self.validate_input(i)).collect()
        }
    }

    pub fn plan(&self, cards: &[Card]) -> Result<LayoutPlan, PipelineError> {
        Ok(plan_with_options(
            cards,
            &self.card_geometry,
            &self.page_geometry,
            self.mode,
            &self.text_options,
        )?)
    }

    pub fn render(&self, plan: &LayoutPlan) -> Result<Vec<u8>, PipelineError> {
        Ok(cardify_render_lopdf::render_plan(plan, &self.render_options)?)
    }

    pub fn generate(&self, inputs: &[CardInput]) -> Result<RenderOutput, PipelineError> {
        let cards = self.validate_all(inputs);
        let non_atomic = cards
            .iter()
            .positions(|card| !card.is_atomic() || card.back().is_some_and(|b| !b.is_atomic()))
            .collect::<Vec<_>>();
        if !non_atomic.is_empty() {
            log::warn!(
                "Cards over the atomicity budget: {}",
                non_atomic.iter().map(|i| i + 1).join(", ")
            );
        }

        let plan = self.plan(&cards)?;
        let pdf = self.render(&plan)?;
        Ok(RenderOutput {
            pdf,
            page_count: plan.page_count(),
            overflowed: plan.overflowed_cards(),
            non_atomic,
        })
    }

    /// The card as a markdown file body, tags placed per configuration.
    pub fn export_markdown(&self, card: &Card) -> String {
        card.to_markdown(self.tag_placement)
    }
}

/// Splits a file holding several cards at lines consisting only of `---`.
/// Blank cards are dropped.
pub fn split_cards(text: &str) -> Vec<String> {
    text.split('\n')
        .batching(|lines| {
            let mut card = Vec::new();
            let mut saw_any = false;
            for line in lines.by_ref() {
                saw_any = true;
                if line.trim_end_matches('\r').trim() == "---" {
                    break;
                }
                card.push(line);
            }
            saw_any.then(|| card.join("\n"))
        })
        .map(|card| card.trim().to_string())
        .filter(|card| !card.is_empty())
        .collect()
}
