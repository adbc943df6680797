use crate::text::LineLayout;
use cardify_types::geometry::EPSILON;
use cardify_types::{CardGeometry, Rect, Size};

pub struct FitAnalysis {
    pub overflow: bool,
    pub max_lines: usize,
}

/// Whether the stacked `lines` fit the content box of `geometry`.
///
/// Fitting is by height since a title line is taller than body lines;
/// `max_lines` reports the body-line capacity.
pub fn check_text_fit(lines: &[LineLayout], geometry: &CardGeometry) -> FitAnalysis {
    let used: f32 = lines.iter().map(|line| line.height).sum();
    FitAnalysis {
        overflow: used > geometry.content_height() + EPSILON,
        max_lines: geometry.max_lines(),
    }
}

/// Centres a card of `card` size inside `slot`, or `None` when it is larger
/// than the slot in either direction.
pub fn place_in_slot(card: Size, slot: Rect) -> Option<Rect> {
    card.fits_within(slot.size()).then(|| slot.center(card))
}

/// Scales a card uniformly to the largest size that fits `area`, centred.
pub fn scale_into(card: Size, area: Rect) -> (Rect, f32) {
    let scale = card.scale_to_fit(area.size());
    (area.center(card.scaled(scale)), scale)
}
