//! The Layout Planner: maps validated cards onto printable pages.

use crate::LayoutError;
use crate::algorithms::fit::{check_text_fit, place_in_slot, scale_into};
use crate::card::Card;
use crate::config::TextLayoutOptions;
use crate::text::{LineLayout, layout_text};
use cardify_types::{CardGeometry, PageGeometry, Rect, Size};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutMode {
    /// One card per page, scaled to fill the page's printable area.
    #[default]
    SingleCard,
    /// Cards packed row-major into the page grid.
    BatchGrid,
}

/// Which face of a card a placement prints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    Front,
    Back,
}

impl Side {
    /// One-letter label for the side indicator.
    pub fn label(self) -> &'static str {
        match self {
            Side::Front => "F",
            Side::Back => "B",
        }
    }
}

/// One card side assigned to one slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    /// Position of the card in the planner's input.
    pub card_index: usize,
    /// The side being printed: the front card itself, or its back.
    pub card: Card,
    pub side: Side,
    /// Where the card's outer edge lands on the page, already scaled.
    pub slot: Rect,
    /// Factor from card units to page units. 1.0 in batch mode.
    pub scale: f32,
    /// The unscaled geometry the card's text was laid out in.
    pub geometry: CardGeometry,
    pub lines: Vec<LineLayout>,
    pub max_lines: usize,
    pub overflow: bool,
}

impl Placement {
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub width: f32,
    pub height: f32,
    pub placements: Vec<Placement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutPlan {
    pub mode: LayoutMode,
    pub pages: Vec<Page>,
    /// The options the placements' lines were broken with.
    pub text_options: TextLayoutOptions,
}

impl LayoutPlan {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn placements(&self) -> impl Iterator<Item = &Placement> {
        self.pages.iter().flat_map(|p| p.placements.iter())
    }

    /// Input indices of every card with a side whose text does not fit its box.
    pub fn overflowed_cards(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = self
            .placements()
            .filter(|p| p.overflow)
            .map(|p| p.card_index)
            .collect();
        indices.sort_unstable();
        indices.dedup();
        indices
    }
}

pub fn plan(
    cards: &[Card],
    card_geometry: &CardGeometry,
    page_geometry: &PageGeometry,
    mode: LayoutMode,
) -> Result<LayoutPlan, LayoutError> {
    plan_with_options(
        cards,
        card_geometry,
        page_geometry,
        mode,
        &TextLayoutOptions::default(),
    )
}

/// Plans `cards` in input order.
///
/// Fails with [`LayoutError::InvalidGeometry`] when a geometry is invalid or
/// a card is larger than a grid slot, and with [`LayoutError::EmptyInput`]
/// for an empty single-card request. An empty batch yields zero pages.
///
/// Card backs follow their fronts: on the next page in single-card mode,
/// and on a back sheet after each front sheet in batch mode. A back sheet
/// mirrors the columns so that duplex printing lines each back up with its
/// front. A back is laid out in its front's geometry.
pub fn plan_with_options(
    cards: &[Card],
    card_geometry: &CardGeometry,
    page_geometry: &PageGeometry,
    mode: LayoutMode,
    options: &TextLayoutOptions,
) -> Result<LayoutPlan, LayoutError> {
    card_geometry.validate()?;
    page_geometry.validate()?;

    let pages = match mode {
        LayoutMode::SingleCard => plan_single(cards, card_geometry, page_geometry, options)?,
        LayoutMode::BatchGrid => plan_batch(cards, card_geometry, page_geometry, options)?,
    };
    log::debug!(
        "Planned {} card(s) onto {} page(s) in {:?} mode.",
        cards.len(),
        pages.len(),
        mode
    );

    Ok(LayoutPlan {
        mode,
        pages,
        text_options: *options,
    })
}

fn plan_single(
    cards: &[Card],
    card_geometry: &CardGeometry,
    page_geometry: &PageGeometry,
    options: &TextLayoutOptions,
) -> Result<Vec<Page>, LayoutError> {
    if cards.is_empty() {
        return Err(LayoutError::EmptyInput);
    }
    let area = page_geometry.content_rect();

    let mut pages = Vec::with_capacity(cards.len());
    for (index, card) in cards.iter().enumerate() {
        let geometry = effective_geometry(card, card_geometry)?;
        let (slot, scale) = scale_into(geometry.size(), area);
        log::debug!("Card {}: scaled by {:.3} to {:?}.", index + 1, scale, slot);
        let sides = std::iter::once((card, Side::Front))
            .chain(card.back().map(|back| (back, Side::Back)));
        for (face, side) in sides {
            pages.push(Page {
                width: page_geometry.width,
                height: page_geometry.height,
                placements: vec![place(index, face, side, geometry, slot, scale, options)],
            });
        }
    }
    Ok(pages)
}

fn plan_batch(
    cards: &[Card],
    card_geometry: &CardGeometry,
    page_geometry: &PageGeometry,
    options: &TextLayoutOptions,
) -> Result<Vec<Page>, LayoutError> {
    let slot_size = page_geometry.slot_size();
    if !card_geometry.size().fits_within(slot_size) {
        return Err(oversized_error("the card geometry", card_geometry.size(), slot_size));
    }

    let slots = page_geometry.slot_rects();
    let cols = page_geometry.cols as usize;
    let mut pages = Vec::with_capacity(cards.len().div_ceil(slots.len()));

    for (sheet_idx, chunk) in cards.chunks(slots.len()).enumerate() {
        let mut fronts = Vec::with_capacity(chunk.len());
        let mut backs = Vec::new();
        for (slot_idx, card) in chunk.iter().enumerate() {
            let index = sheet_idx * slots.len() + slot_idx;
            let geometry = effective_geometry(card, card_geometry)?;
            let rect = place_in_slot(geometry.size(), slots[slot_idx]).ok_or_else(|| {
                oversized_error(&format!("card {}", index + 1), geometry.size(), slot_size)
            })?;
            fronts.push(place(index, card, Side::Front, geometry, rect, 1.0, options));

            // Slots are equal-sized, so the mirrored slot holds the back exactly
            // where the front sits.
            if let Some(back) = card.back() {
                let (row, col) = (slot_idx / cols, slot_idx % cols);
                let mirrored = slots[row * cols + (cols - 1 - col)];
                let rect = mirrored.center(geometry.size());
                backs.push(place(index, back, Side::Back, geometry, rect, 1.0, options));
            }
        }
        log::debug!(
            "Sheet {}: {} of {} slots filled, {} back(s).",
            sheet_idx + 1,
            fronts.len(),
            slots.len(),
            backs.len()
        );
        pages.push(Page {
            width: page_geometry.width,
            height: page_geometry.height,
            placements: fronts,
        });
        if !backs.is_empty() {
            pages.push(Page {
                width: page_geometry.width,
                height: page_geometry.height,
                placements: backs,
            });
        }
    }
    Ok(pages)
}

fn oversized_error(what: &str, card: Size, slot: Size) -> LayoutError {
    LayoutError::InvalidGeometry(format!(
        "{} is {:.2}x{:.2}pt but a grid slot is only {:.2}x{:.2}pt",
        what, card.width, card.height, slot.width, slot.height
    ))
}

fn effective_geometry(card: &Card, shared: &CardGeometry) -> Result<CardGeometry, LayoutError> {
    match card.geometry_override() {
        Some(own) => {
            own.validate()?;
            Ok(*own)
        }
        None => Ok(*shared),
    }
}

fn place(
    card_index: usize,
    card: &Card,
    side: Side,
    geometry: CardGeometry,
    slot: Rect,
    scale: f32,
    options: &TextLayoutOptions,
) -> Placement {
    // Lines are recomputed here because the card may have been validated
    // against a different geometry or with other text options.
    let lines = layout_text(
        card.title(),
        card.formatting_tree(),
        card.tags(),
        &geometry,
        options,
    );
    let fit = check_text_fit(&lines, &geometry);
    if fit.overflow {
        log::warn!(
            "Card {} ({:?}) needs {} lines but its box holds {}.",
            card_index + 1,
            side,
            lines.len(),
            fit.max_lines
        );
    }
    Placement {
        card_index,
        card: card.clone(),
        side,
        slot,
        scale,
        geometry,
        lines,
        max_lines: fit.max_lines,
        overflow: fit.overflow,
    }
}
