//! Physical geometry of a single index card.

use crate::error::{GeometryError, ensure_margins, ensure_positive};
use crate::geometry::{EPSILON, Margins, Rect, Size};
use crate::units::POINTS_PER_INCH;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// The long edge is horizontal.
    #[default]
    Landscape,
    /// The long edge is vertical.
    Portrait,
}

impl Orientation {
    /// Orders `(a, b)` so the result matches this orientation.
    pub fn apply(self, a: f32, b: f32) -> (f32, f32) {
        let (long, short) = if a >= b { (a, b) } else { (b, a) };
        match self {
            Orientation::Landscape => (long, short),
            Orientation::Portrait => (short, long),
        }
    }
}

/// Standard index card stock, named by its dimensions in inches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum CardSize {
    #[default]
    #[serde(rename = "3x5")]
    ThreeByFive,
    #[serde(rename = "4x6")]
    FourBySix,
    #[serde(rename = "5x7")]
    FiveBySeven,
    #[serde(rename = "custom")]
    Custom { width: f32, height: f32 },
}

impl CardSize {
    /// Short and long edge in points (custom sizes are returned as given).
    pub fn dimensions_pt(&self) -> (f32, f32) {
        match self {
            CardSize::ThreeByFive => (3.0 * POINTS_PER_INCH, 5.0 * POINTS_PER_INCH),
            CardSize::FourBySix => (4.0 * POINTS_PER_INCH, 6.0 * POINTS_PER_INCH),
            CardSize::FiveBySeven => (5.0 * POINTS_PER_INCH, 7.0 * POINTS_PER_INCH),
            CardSize::Custom { width, height } => (*width, *height),
        }
    }
}

/// The physical box of one card and the typography used inside it.
///
/// Immutable for the duration of a validate/plan/render call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardGeometry {
    pub width: f32,
    pub height: f32,
    pub margins: Margins,
    pub font_size: f32,
    pub line_height: f32,
    /// Size of the `# Title` line. Its line height keeps the body's spacing ratio.
    pub title_font_size: f32,
}

impl Default for CardGeometry {
    fn default() -> Self {
        Self::preset(CardSize::ThreeByFive, Orientation::Landscape)
    }
}

impl CardGeometry {
    pub const DEFAULT_FONT_SIZE: f32 = 12.0;
    pub const DEFAULT_LINE_SPACING: f32 = 1.2;
    pub const DEFAULT_MARGIN: f32 = 0.2 * POINTS_PER_INCH;
    pub const DEFAULT_TITLE_FONT_SIZE: f32 = 16.0;

    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            margins: Margins::all(Self::DEFAULT_MARGIN),
            font_size: Self::DEFAULT_FONT_SIZE,
            line_height: Self::DEFAULT_FONT_SIZE * Self::DEFAULT_LINE_SPACING,
            title_font_size: Self::DEFAULT_TITLE_FONT_SIZE,
        }
    }

    /// A preset card size in the requested orientation with default typography.
    pub fn preset(size: CardSize, orientation: Orientation) -> Self {
        let (a, b) = size.dimensions_pt();
        let (width, height) = match size {
            CardSize::Custom { .. } => (a, b),
            _ => orientation.apply(a, b),
        };
        Self::new(width, height)
    }

    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    /// Sets the font size; the line height keeps the default 1.2 spacing and
    /// the title keeps its default proportion to the body text.
    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.font_size = font_size;
        self.line_height = font_size * Self::DEFAULT_LINE_SPACING;
        self.title_font_size = font_size * Self::DEFAULT_TITLE_FONT_SIZE / Self::DEFAULT_FONT_SIZE;
        self
    }

    pub fn with_title_font_size(mut self, title_font_size: f32) -> Self {
        self.title_font_size = title_font_size;
        self
    }

    /// Line height of the title line.
    pub fn title_line_height(&self) -> f32 {
        self.line_height * self.title_font_size / self.font_size
    }

    pub fn with_line_height(mut self, line_height: f32) -> Self {
        self.line_height = line_height;
        self
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// The text box inside the card margins, relative to the card's top-left corner.
    pub fn content_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height).inset(&self.margins)
    }

    pub fn content_width(&self) -> f32 {
        self.width - self.margins.horizontal()
    }

    pub fn content_height(&self) -> f32 {
        self.height - self.margins.vertical()
    }

    /// How many body text lines fit in the content box.
    pub fn max_lines(&self) -> usize {
        let content_height = self.content_height();
        if content_height <= 0.0 || self.line_height <= 0.0 {
            return 0;
        }
        ((content_height + EPSILON) / self.line_height).floor() as usize
    }

    pub fn validate(&self) -> Result<(), GeometryError> {
        ensure_positive("card width", self.width)?;
        ensure_positive("card height", self.height)?;
        ensure_positive("font size", self.font_size)?;
        ensure_positive("line height", self.line_height)?;
        ensure_positive("title font size", self.title_font_size)?;

        let m = &self.margins;
        ensure_margins("Card", m)?;
        if m.horizontal() >= self.width {
            return Err(GeometryError::MarginsTooLarge {
                what: "Card",
                margins: m.horizontal(),
                extent: self.width,
            });
        }
        let content_height = self.height - m.vertical();
        if content_height <= 0.0 {
            return Err(GeometryError::MarginsTooLarge {
                what: "Card",
                margins: m.vertical(),
                extent: self.height,
            });
        }
        if self.max_lines() == 0 {
            return Err(GeometryError::LineTallerThanBox {
                line_height: self.line_height,
                content_height,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_card_is_three_by_five_landscape() {
        let card = CardGeometry::default();
        assert_eq!((card.width, card.height), (360.0, 216.0));
        assert!((card.content_width() - 331.2).abs() < 0.001);
        // 187.2pt of content at 14.4pt per line
        assert_eq!(card.max_lines(), 13);
        assert!(card.validate().is_ok());
    }

    #[test]
    fn portrait_swaps_edges() {
        let card = CardGeometry::preset(CardSize::FourBySix, Orientation::Portrait);
        assert_eq!((card.width, card.height), (288.0, 432.0));
    }

    #[test]
    fn max_lines_at_exact_boundary() {
        let card = CardGeometry::new(100.0, 100.0)
            .with_margins(Margins::all(10.0))
            .with_line_height(20.0);
        assert_eq!(card.max_lines(), 4);
    }

    #[test]
    fn rejects_degenerate_geometry() {
        assert!(matches!(
            CardGeometry::new(0.0, 100.0).validate(),
            Err(GeometryError::NonPositive { .. })
        ));
        assert!(matches!(
            CardGeometry::new(100.0, 100.0)
                .with_margins(Margins::all(50.0))
                .validate(),
            Err(GeometryError::MarginsTooLarge { .. })
        ));
        assert!(matches!(
            CardGeometry::new(100.0, 40.0)
                .with_margins(Margins::all(10.0))
                .with_line_height(30.0)
                .validate(),
            Err(GeometryError::LineTallerThanBox { .. })
        ));
    }

    #[test]
    fn title_size_follows_body_size() {
        let card = CardGeometry::default();
        assert_eq!(card.title_font_size, 16.0);
        assert!((card.title_line_height() - 19.2).abs() < 0.001);

        let small = card.with_font_size(9.0);
        assert_eq!(small.title_font_size, 12.0);
        assert_eq!(small.with_title_font_size(20.0).title_font_size, 20.0);
        assert!(matches!(
            card.with_title_font_size(0.0).validate(),
            Err(GeometryError::NonPositive { .. })
        ));
    }

    #[test]
    fn card_size_names() {
        let size: CardSize = serde_json::from_str("\"4x6\"").unwrap();
        assert_eq!(size, CardSize::FourBySix);
        let size: CardSize =
            serde_json::from_str(r#"{ "custom": { "width": 100, "height": 50 } }"#).unwrap();
        assert_eq!(size, CardSize::Custom { width: 100.0, height: 50.0 });
    }
}
