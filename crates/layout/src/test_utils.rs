use crate::card::{AtomicityBudget, Card, validate};
use cardify_types::{CardGeometry, Margins, PageGeometry};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A 100x100pt card with 10pt margins and 20pt lines: room for exactly four lines.
pub fn four_line_card() -> CardGeometry {
    CardGeometry::new(100.0, 100.0)
        .with_margins(Margins::all(10.0))
        .with_font_size(10.0)
        .with_line_height(20.0)
}

/// A page whose grid slots are exactly `four_line_card()` sized.
pub fn grid_page(rows: u32, cols: u32) -> PageGeometry {
    PageGeometry::new(cols as f32 * 100.0 + 20.0, rows as f32 * 100.0 + 20.0)
        .with_margins(Margins::all(10.0))
        .with_grid(rows, cols)
}

pub fn cards(texts: &[&str], geometry: &CardGeometry) -> Vec<Card> {
    texts
        .iter()
        .map(|t| validate(t, &AtomicityBudget::default(), geometry))
        .collect()
}

pub fn numbered_cards(n: usize, geometry: &CardGeometry) -> Vec<Card> {
    (1..=n)
        .map(|i| validate(&format!("Card {}", i), &AtomicityBudget::default(), geometry))
        .collect()
}
