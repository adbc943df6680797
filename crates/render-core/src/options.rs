use cardify_types::Color;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Light,
    Dark,
}

/// Colours used to draw a card.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    /// Tag tokens when tag highlighting is on.
    pub muted: Color,
    pub border: Color,
    /// Outline and corner marker of a card whose text overflows.
    pub overflow: Color,
}

impl Theme {
    const OVERFLOW: Color = Color::rgb(0xD0, 0x30, 0x30);

    pub fn light() -> Self {
        Self {
            background: Color::WHITE,
            text: Color::BLACK,
            muted: Color::gray(0x66),
            border: Color::gray(0xCC),
            overflow: Self::OVERFLOW,
        }
    }

    pub fn dark() -> Self {
        Self {
            background: Color::rgb(0x2D, 0x2D, 0x30),
            text: Color::WHITE,
            muted: Color::gray(0xAA),
            border: Color::gray(0x55),
            overflow: Self::OVERFLOW,
        }
    }

    pub fn named(name: ThemeName) -> Self {
        match name {
            ThemeName::Light => Self::light(),
            ThemeName::Dark => Self::dark(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RenderOptions {
    pub theme: Theme,
    /// Stroke every card's outline, e.g. as cut lines on batch sheets.
    pub draw_borders: bool,
    /// Mark each card "F" or "B" in its top-right corner.
    pub side_indicator: bool,
}

impl RenderOptions {
    pub fn new(theme: ThemeName, draw_borders: bool) -> Self {
        Self {
            theme: Theme::named(theme),
            draw_borders,
            side_indicator: false,
        }
    }

    pub fn with_side_indicator(mut self, side_indicator: bool) -> Self {
        self.side_indicator = side_indicator;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_themes() {
        assert_eq!(Theme::named(ThemeName::Dark).background.to_string(), "#2D2D30");
        assert_eq!(Theme::default(), Theme::light());
        assert_eq!(
            serde_json::from_str::<ThemeName>("\"dark\"").unwrap(),
            ThemeName::Dark
        );
    }
}
