#![cfg(test)]

use crate::LayoutError;
use crate::card::{AtomicityBudget, Card, validate, validate_with_geometry};
use crate::config::{ListMarker, TextLayoutOptions};
use crate::plan::{LayoutMode, Side, plan, plan_with_options};
use crate::test_utils::{cards, four_line_card, grid_page, init_logging, numbered_cards};
use cardify_types::{CardGeometry, PageGeometry, Rect};

#[test]
fn test_seven_cards_on_two_by_three_grid() {
    init_logging();
    let geometry = four_line_card();
    let cards = numbered_cards(7, &geometry);

    let plan = plan(&cards, &geometry, &grid_page(2, 3), LayoutMode::BatchGrid).unwrap();

    assert_eq!(plan.page_count(), 2);
    assert_eq!(plan.pages[0].placements.len(), 6);
    assert_eq!(plan.pages[1].placements.len(), 1);
    assert_eq!(plan.pages[1].placements[0].card_index, 6);
}

#[test]
fn test_batch_packs_row_major() {
    let geometry = four_line_card();
    let cards = numbered_cards(6, &geometry);
    let plan = plan(&cards, &geometry, &grid_page(2, 3), LayoutMode::BatchGrid).unwrap();

    let origins: Vec<(f32, f32)> = plan.pages[0]
        .placements
        .iter()
        .map(|p| (p.slot.x, p.slot.y))
        .collect();
    assert_eq!(
        origins,
        [
            (10.0, 10.0),
            (110.0, 10.0),
            (210.0, 10.0),
            (10.0, 110.0),
            (110.0, 110.0),
            (210.0, 110.0)
        ]
    );
    assert!(plan.placements().all(|p| p.scale == 1.0));
}

#[test]
fn test_page_count_is_ceiling_of_cards_per_grid() {
    let geometry = four_line_card();
    let page = grid_page(2, 2);
    for n in 0..=13 {
        let cards = numbered_cards(n, &geometry);
        let plan = plan(&cards, &geometry, &page, LayoutMode::BatchGrid).unwrap();
        assert_eq!(plan.page_count(), n.div_ceil(4), "{} cards", n);
        if let Some(last) = plan.pages.last() {
            let expected = if n % 4 == 0 { 4 } else { n % 4 };
            assert_eq!(last.placements.len(), expected, "{} cards", n);
        }
        assert_eq!(plan.placements().count(), n);
    }
}

#[test]
fn test_empty_input() {
    let geometry = four_line_card();
    let batch = plan(&[], &geometry, &grid_page(2, 2), LayoutMode::BatchGrid).unwrap();
    assert_eq!(batch.page_count(), 0);

    let single = plan(&[], &geometry, &grid_page(2, 2), LayoutMode::SingleCard);
    assert_eq!(single, Err(LayoutError::EmptyInput));
}

#[test]
fn test_card_larger_than_slot_is_rejected() {
    let geometry = CardGeometry::default();
    let cards = numbered_cards(1, &geometry);
    let result = plan(&cards, &geometry, &grid_page(2, 3), LayoutMode::BatchGrid);
    assert!(matches!(result, Err(LayoutError::InvalidGeometry(_))));
}

#[test]
fn test_default_card_fits_default_sheet() {
    let geometry = CardGeometry::default();
    let cards = numbered_cards(5, &geometry);
    let plan = plan(&cards, &geometry, &PageGeometry::default(), LayoutMode::BatchGrid).unwrap();
    assert_eq!(plan.page_count(), 2);
    assert_eq!(plan.pages[0].width, 792.0);
}

#[test]
fn test_invalid_geometry_is_rejected() {
    let bad_card = CardGeometry::new(0.0, 100.0);
    let result = plan(&[], &bad_card, &grid_page(1, 1), LayoutMode::BatchGrid);
    assert!(matches!(result, Err(LayoutError::InvalidGeometry(_))));

    let geometry = four_line_card();
    let no_grid = grid_page(1, 1).with_grid(0, 2);
    let result = plan(&[], &geometry, &no_grid, LayoutMode::BatchGrid);
    assert!(matches!(result, Err(LayoutError::InvalidGeometry(_))));
}

#[test]
fn test_overflow_boundary() {
    init_logging();
    let geometry = four_line_card();
    let cards = cards(&["1\n2\n3\n4", "1\n2\n3\n4\n5"], &geometry);
    let plan = plan(&cards, &geometry, &grid_page(1, 2), LayoutMode::BatchGrid).unwrap();

    let placements = &plan.pages[0].placements;
    assert_eq!(placements[0].max_lines, 4);
    assert_eq!(placements[0].line_count(), 4);
    assert!(!placements[0].overflow);
    assert_eq!(placements[1].line_count(), 5);
    assert!(placements[1].overflow);
    assert_eq!(plan.overflowed_cards(), vec![1]);
}

#[test]
fn test_overflow_never_moves_text_to_another_slot() {
    let geometry = four_line_card();
    let long = "word ".repeat(40);
    let cards = cards(&[&long, "short"], &geometry);
    let plan = plan(&cards, &geometry, &grid_page(1, 2), LayoutMode::BatchGrid).unwrap();

    let placements = &plan.pages[0].placements;
    assert!(placements[0].overflow);
    assert!(placements[0].line_count() > 4);
    assert_eq!(placements[1].lines.len(), 1);
    assert_eq!(placements[1].lines[0].text(), "short");
}

#[test]
fn test_single_card_is_scaled_and_centered() {
    let geometry = four_line_card();
    let cards = numbered_cards(2, &geometry);
    let page = PageGeometry::new(300.0, 200.0);

    let plan = plan(&cards, &geometry, &page, LayoutMode::SingleCard).unwrap();

    assert_eq!(plan.page_count(), 2);
    for (i, page) in plan.pages.iter().enumerate() {
        assert_eq!(page.placements.len(), 1);
        let placement = &page.placements[0];
        assert_eq!(placement.card_index, i);
        assert_eq!(placement.scale, 2.0);
        assert_eq!(placement.slot, Rect::new(50.0, 0.0, 200.0, 200.0));
    }
}

#[test]
fn test_single_card_full_bleed() {
    let geometry = CardGeometry::default();
    let cards = numbered_cards(1, &geometry);
    let page = PageGeometry::for_card(&geometry);

    let plan = plan(&cards, &geometry, &page, LayoutMode::SingleCard).unwrap();

    let placement = &plan.pages[0].placements[0];
    assert_eq!(placement.scale, 1.0);
    assert_eq!(placement.slot, Rect::new(0.0, 0.0, 360.0, 216.0));
    assert_eq!((plan.pages[0].width, plan.pages[0].height), (360.0, 216.0));
}

#[test]
fn test_geometry_override_changes_line_budget() {
    let shared = four_line_card();
    let roomy = four_line_card().with_line_height(10.0);
    let text = "1\n2\n3\n4\n5";
    let cards = vec![
        validate_with_geometry(text, &AtomicityBudget::default(), shared),
        validate_with_geometry(text, &AtomicityBudget::default(), roomy),
    ];

    let plan = plan(&cards, &shared, &grid_page(1, 2), LayoutMode::BatchGrid).unwrap();

    assert_eq!(plan.overflowed_cards(), vec![0]);
    assert_eq!(plan.pages[0].placements[1].max_lines, 8);
}

#[test]
fn test_override_larger_than_slot_is_rejected() {
    let shared = four_line_card();
    let big = CardGeometry::new(150.0, 100.0);
    let cards = vec![validate_with_geometry("x", &AtomicityBudget::default(), big)];
    let result = plan(&cards, &shared, &grid_page(1, 2), LayoutMode::BatchGrid);
    assert!(matches!(result, Err(LayoutError::InvalidGeometry(_))));
}

#[test]
fn test_plan_is_deterministic() {
    let geometry = four_line_card();
    let cards = cards(&["**a** b #c", "- one\n- two", "_x_ y z"], &geometry);
    let page = grid_page(2, 2);
    let first = plan(&cards, &geometry, &page, LayoutMode::BatchGrid).unwrap();
    let second = plan(&cards, &geometry, &page, LayoutMode::BatchGrid).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_text_options_are_recorded() {
    let geometry = four_line_card();
    let cards = cards(&["- one\n- two"], &geometry);
    let options = TextLayoutOptions {
        list_marker: ListMarker::Ordinal,
        highlight_tags: true,
    };
    let plan = plan_with_options(
        &cards,
        &geometry,
        &grid_page(1, 1),
        LayoutMode::BatchGrid,
        &options,
    )
    .unwrap();

    assert_eq!(plan.text_options, options);
    let lines = &plan.pages[0].placements[0].lines;
    assert_eq!(lines[0].items[0].text, "1.");
    assert_eq!(lines[1].items[0].text, "2.");
}

#[test]
fn test_empty_batch_still_checks_slot_size() {
    let geometry = CardGeometry::default();
    let result = plan(&[], &geometry, &grid_page(2, 3), LayoutMode::BatchGrid);
    assert!(matches!(result, Err(LayoutError::InvalidGeometry(_))));
}

fn with_back(front: &str, back: &str, geometry: &CardGeometry) -> Card {
    let budget = AtomicityBudget::default();
    validate(front, &budget, geometry).with_back(validate(back, &budget, geometry))
}

#[test]
fn test_single_card_back_follows_front() {
    let geometry = four_line_card();
    let cards = vec![
        with_back("Q1", "A1", &geometry),
        validate("Q2", &AtomicityBudget::default(), &geometry),
    ];
    let plan = plan(&cards, &geometry, &PageGeometry::new(300.0, 200.0), LayoutMode::SingleCard)
        .unwrap();

    assert_eq!(plan.page_count(), 3);
    let faces: Vec<(usize, Side, String)> = plan
        .placements()
        .map(|p| (p.card_index, p.side, p.lines[0].text()))
        .collect();
    assert_eq!(
        faces,
        [
            (0, Side::Front, "Q1".to_string()),
            (0, Side::Back, "A1".to_string()),
            (1, Side::Front, "Q2".to_string()),
        ]
    );
    assert_eq!(plan.pages[0].placements[0].slot, plan.pages[1].placements[0].slot);
}

#[test]
fn test_batch_back_sheet_mirrors_columns() {
    let geometry = four_line_card();
    let cards = vec![
        with_back("Q1", "A1", &geometry),
        validate("Q2", &AtomicityBudget::default(), &geometry),
        with_back("Q3", "A3", &geometry),
        with_back("Q4", "A4", &geometry),
    ];
    let plan = plan(&cards, &geometry, &grid_page(2, 2), LayoutMode::BatchGrid).unwrap();

    assert_eq!(plan.page_count(), 2);
    let fronts = &plan.pages[0].placements;
    let backs = &plan.pages[1].placements;
    assert!(fronts.iter().all(|p| p.side == Side::Front));
    assert!(backs.iter().all(|p| p.side == Side::Back));
    assert_eq!(backs.len(), 3);

    let back_of = |index: usize| backs.iter().find(|p| p.card_index == index).unwrap();
    // Column 0 of a row lands in column 1 and the other way round.
    assert_eq!(back_of(0).slot, fronts[1].slot);
    assert_eq!(back_of(2).slot, fronts[3].slot);
    assert_eq!(back_of(3).slot, fronts[2].slot);
    assert_eq!(back_of(3).lines[0].text(), "A4");
}

#[test]
fn test_back_overflow_reports_card_once() {
    let geometry = four_line_card();
    let long = "word ".repeat(40);
    let cards = vec![with_back(&long, &long, &geometry)];
    let plan = plan(&cards, &geometry, &grid_page(1, 1), LayoutMode::BatchGrid).unwrap();

    assert!(plan.placements().all(|p| p.overflow));
    assert_eq!(plan.overflowed_cards(), vec![0]);
}

#[test]
fn test_title_line_uses_more_height() {
    let geometry = four_line_card();
    let cards = cards(&["1\n2\n3\n4", "# Head\n2\n3\n4"], &geometry);
    let plan = plan(&cards, &geometry, &grid_page(1, 2), LayoutMode::BatchGrid).unwrap();

    let placements = &plan.pages[0].placements;
    assert_eq!(placements[1].line_count(), 4);
    assert!(!placements[0].overflow);
    assert!(placements[1].overflow);
}
