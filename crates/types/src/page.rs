//! Physical geometry of a printable sheet and its card slots.

use crate::card::{CardGeometry, Orientation};
use crate::error::{GeometryError, ensure_margins, ensure_positive};
use crate::geometry::{Margins, Rect, Size};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    #[default]
    Letter,
    A4,
    Legal,
    Custom { width: f32, height: f32 },
}

impl PageSize {
    /// Short and long edge in points (custom sizes are returned as given).
    pub fn dimensions_pt(&self) -> (f32, f32) {
        match self {
            PageSize::Letter => (612.0, 792.0),
            PageSize::A4 => (595.28, 841.89),
            PageSize::Legal => (612.0, 1008.0),
            PageSize::Custom { width, height } => (*width, *height),
        }
    }
}

/// A sheet divided into a `rows x cols` grid of equally sized slots.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margins: Margins,
    pub rows: u32,
    pub cols: u32,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::preset(PageSize::Letter, Orientation::Landscape)
            .with_margins(Margins::all(Self::DEFAULT_MARGIN))
            .with_grid(2, 2)
    }
}

impl PageGeometry {
    pub const DEFAULT_MARGIN: f32 = 36.0;
    /// Upper bound on `rows * cols`.
    pub const MAX_SLOTS: usize = 1024;

    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            margins: Margins::zero(),
            rows: 1,
            cols: 1,
        }
    }

    pub fn preset(size: PageSize, orientation: Orientation) -> Self {
        let (a, b) = size.dimensions_pt();
        let (width, height) = match size {
            PageSize::Custom { .. } => (a, b),
            _ => orientation.apply(a, b),
        };
        Self::new(width, height)
    }

    /// A full-bleed page with exactly the card's dimensions.
    pub fn for_card(card: &CardGeometry) -> Self {
        Self::new(card.width, card.height)
    }

    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    pub fn with_grid(mut self, rows: u32, cols: u32) -> Self {
        self.rows = rows;
        self.cols = cols;
        self
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// The printable area inside the page margins.
    pub fn content_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height).inset(&self.margins)
    }

    pub fn slots_per_page(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    pub fn slot_size(&self) -> Size {
        let content = self.content_rect();
        Size::new(
            content.width / self.cols.max(1) as f32,
            content.height / self.rows.max(1) as f32,
        )
    }

    /// Slot rectangles in packing order: left-to-right, then top-to-bottom.
    pub fn slot_rects(&self) -> Vec<Rect> {
        let content = self.content_rect();
        let slot = self.slot_size();
        (0..self.rows)
            .flat_map(|row| (0..self.cols).map(move |col| (row, col)))
            .map(|(row, col)| {
                Rect::new(
                    content.x + col as f32 * slot.width,
                    content.y + row as f32 * slot.height,
                    slot.width,
                    slot.height,
                )
            })
            .collect()
    }

    pub fn validate(&self) -> Result<(), GeometryError> {
        ensure_positive("page width", self.width)?;
        ensure_positive("page height", self.height)?;
        if self.rows == 0 || self.cols == 0 {
            return Err(GeometryError::EmptyGrid {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.slots_per_page() > Self::MAX_SLOTS {
            return Err(GeometryError::GridTooLarge {
                rows: self.rows,
                cols: self.cols,
                max: Self::MAX_SLOTS,
            });
        }
        ensure_margins("Page", &self.margins)?;
        let content = self.content_rect();
        if content.width <= 0.0 {
            return Err(GeometryError::MarginsTooLarge {
                what: "Page",
                margins: self.margins.horizontal(),
                extent: self.width,
            });
        }
        if content.height <= 0.0 {
            return Err(GeometryError::MarginsTooLarge {
                what: "Page",
                margins: self.margins.vertical(),
                extent: self.height,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sheet_holds_four_three_by_five_cards() {
        let page = PageGeometry::default();
        assert_eq!((page.width, page.height), (792.0, 612.0));
        let slot = page.slot_size();
        assert_eq!((slot.width, slot.height), (360.0, 270.0));
        assert!(CardGeometry::default().size().fits_within(slot));
    }

    #[test]
    fn rejects_bad_margins_and_huge_grids() {
        let page = PageGeometry::new(300.0, 200.0);
        assert!(matches!(
            page.with_margins(Margins::all(-5.0)).validate(),
            Err(GeometryError::NegativeMargin { what: "Page", .. })
        ));
        assert!(matches!(
            page.with_margins(Margins::all(f32::NAN)).validate(),
            Err(GeometryError::NegativeMargin { .. })
        ));
        assert!(matches!(
            page.with_grid(100_000, 100_000).validate(),
            Err(GeometryError::GridTooLarge { .. })
        ));
        assert!(page.with_grid(32, 32).validate().is_ok());
    }

    #[test]
    fn slots_are_row_major() {
        let page = PageGeometry::new(300.0, 200.0)
            .with_margins(Margins::all(10.0))
            .with_grid(2, 3);
        let slots = page.slot_rects();
        assert_eq!(slots.len(), 6);
        assert_eq!(slots[0], Rect::new(10.0, 10.0, 280.0 / 3.0, 90.0));
        assert_eq!(slots[1].y, 10.0);
        assert!(slots[1].x > slots[0].x);
        assert_eq!(slots[3].x, 10.0);
        assert_eq!(slots[3].y, 100.0);
    }

    #[test]
    fn rejects_empty_grid() {
        let page = PageGeometry::new(300.0, 200.0).with_grid(0, 2);
        assert_eq!(
            page.validate(),
            Err(GeometryError::EmptyGrid { rows: 0, cols: 2 })
        );
    }

    #[test]
    fn full_bleed_page_for_card() {
        let page = PageGeometry::for_card(&CardGeometry::default());
        assert_eq!(page.content_rect(), Rect::new(0.0, 0.0, 360.0, 216.0));
        assert_eq!(page.slots_per_page(), 1);
    }
}
