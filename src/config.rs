//! The `cardify.json` settings file.

use crate::error::PipelineError;
use cardify_layout::{AtomicityBudget, LayoutMode, ListMarker, TextLayoutOptions};
use cardify_markdown::TagPlacement;
use cardify_render_core::{RenderOptions, ThemeName};
use cardify_types::units::{deserialize_length, deserialize_opt_length};
use cardify_types::{CardGeometry, CardSize, Margins, Orientation, PageGeometry, PageSize};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

/// Every recognised option. Missing keys take their defaults; lengths are
/// points or strings with a unit (`"5in"`, `"12.7cm"`, `"10mm"`, `"14pt"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CardifyConfig {
    pub max_chars: usize,
    pub max_lines: usize,

    pub card_size: CardSize,
    pub orientation: Orientation,
    /// Overrides the preset's width.
    #[serde(deserialize_with = "deserialize_opt_length", skip_serializing_if = "Option::is_none")]
    pub card_width: Option<f32>,
    #[serde(deserialize_with = "deserialize_opt_length", skip_serializing_if = "Option::is_none")]
    pub card_height: Option<f32>,
    pub margins: Margins,
    #[serde(deserialize_with = "deserialize_length")]
    pub font_size: f32,
    /// Defaults to 1.2 times the font size.
    #[serde(deserialize_with = "deserialize_opt_length", skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f32>,
    /// Defaults to 4/3 of the font size (16pt for 12pt text).
    #[serde(deserialize_with = "deserialize_opt_length", skip_serializing_if = "Option::is_none")]
    pub title_font_size: Option<f32>,

    /// Without a page size, single cards print full-bleed and batches go on
    /// landscape Letter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<PageSize>,
    pub page_orientation: Orientation,
    #[serde(deserialize_with = "deserialize_opt_length", skip_serializing_if = "Option::is_none")]
    pub page_width: Option<f32>,
    #[serde(deserialize_with = "deserialize_opt_length", skip_serializing_if = "Option::is_none")]
    pub page_height: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_margins: Option<Margins>,
    pub grid_rows: u32,
    pub grid_cols: u32,

    pub mode: LayoutMode,
    pub theme: ThemeName,
    pub draw_borders: bool,
    pub show_side_indicator: bool,
    pub list_marker: ListMarker,
    pub highlight_tags: bool,
    pub tag_placement: TagPlacement,
}

impl Default for CardifyConfig {
    fn default() -> Self {
        let budget = AtomicityBudget::default();
        Self {
            max_chars: budget.max_chars,
            max_lines: budget.max_lines,
            card_size: CardSize::default(),
            orientation: Orientation::default(),
            card_width: None,
            card_height: None,
            margins: Margins::all(CardGeometry::DEFAULT_MARGIN),
            font_size: CardGeometry::DEFAULT_FONT_SIZE,
            line_height: None,
            title_font_size: None,
            page_size: None,
            page_orientation: Orientation::Landscape,
            page_width: None,
            page_height: None,
            page_margins: None,
            grid_rows: 2,
            grid_cols: 2,
            mode: LayoutMode::default(),
            theme: ThemeName::default(),
            draw_borders: false,
            show_side_indicator: false,
            list_marker: ListMarker::default(),
            highlight_tags: false,
            tag_placement: TagPlacement::default(),
        }
    }
}

impl CardifyConfig {
    pub fn from_json_str(json: &str) -> Result<Self, PipelineError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| {
            PipelineError::Io(io::Error::new(
                e.kind(),
                format!("Failed to read config from '{}': {}", path.display(), e),
            ))
        })?;
        let config = Self::from_json_str(&json)?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), PipelineError> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        fs::write(path, json)?;
        Ok(())
    }

    pub fn budget(&self) -> AtomicityBudget {
        AtomicityBudget::new(self.max_chars, self.max_lines)
    }

    pub fn card_geometry(&self) -> CardGeometry {
        let preset = CardGeometry::preset(self.card_size, self.orientation);
        let mut geometry = CardGeometry::new(
            self.card_width.unwrap_or(preset.width),
            self.card_height.unwrap_or(preset.height),
        )
        .with_margins(self.margins)
        .with_font_size(self.font_size);
        if let Some(line_height) = self.line_height {
            geometry = geometry.with_line_height(line_height);
        }
        if let Some(title_font_size) = self.title_font_size {
            geometry = geometry.with_title_font_size(title_font_size);
        }
        geometry
    }

    /// The sheet for `mode`.
    pub fn page_geometry(&self, mode: LayoutMode) -> PageGeometry {
        self.page_geometry_for(mode, &self.card_geometry())
    }

    /// The sheet for `mode` when the cards are `card` sized; a single card
    /// without a configured page size prints full-bleed.
    pub fn page_geometry_for(&self, mode: LayoutMode, card: &CardGeometry) -> PageGeometry {
        let explicit_size =
            self.page_size.is_some() || self.page_width.is_some() || self.page_height.is_some();

        if !explicit_size && mode == LayoutMode::SingleCard {
            return PageGeometry::for_card(card)
                .with_margins(self.page_margins.unwrap_or_else(Margins::zero));
        }

        let preset = PageGeometry::preset(self.page_size.unwrap_or_default(), self.page_orientation);
        PageGeometry::new(
            self.page_width.unwrap_or(preset.width),
            self.page_height.unwrap_or(preset.height),
        )
        .with_margins(
            self.page_margins
                .unwrap_or_else(|| Margins::all(PageGeometry::DEFAULT_MARGIN)),
        )
        .with_grid(self.grid_rows, self.grid_cols)
    }

    pub fn text_options(&self) -> TextLayoutOptions {
        TextLayoutOptions {
            list_marker: self.list_marker,
            highlight_tags: self.highlight_tags,
        }
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions::new(self.theme, self.draw_borders).with_side_indicator(self.show_side_indicator)
    }
}
