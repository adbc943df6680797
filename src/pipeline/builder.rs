use super::orchestrator::CardPipeline;
use crate::config::CardifyConfig;
use crate::error::PipelineError;
use cardify_layout::{AtomicityBudget, LayoutMode, TextLayoutOptions};
use cardify_render_core::RenderOptions;
use cardify_types::{CardGeometry, PageGeometry};
use std::path::Path;

/// A builder for creating a `CardPipeline`.
///
/// Settings start from a `CardifyConfig` (the defaults unless one is given);
/// the `with_*` setters override individual parts of it.
#[derive(Default)]
pub struct PipelineBuilder {
    config: CardifyConfig,
    mode: Option<LayoutMode>,
    budget: Option<AtomicityBudget>,
    card_geometry: Option<CardGeometry>,
    page_geometry: Option<PageGeometry>,
    text_options: Option<TextLayoutOptions>,
    render_options: Option<RenderOptions>,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_config(mut self, config: CardifyConfig) -> Self {
        self.config = config;
        self
    }

    /// Loads settings from a JSON file.
    pub fn with_config_file<P: AsRef<Path>>(self, path: P) -> Result<Self, PipelineError> {
        Ok(self.with_config(CardifyConfig::load(path)?))
    }

    pub fn with_mode(mut self, mode: LayoutMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn with_budget(mut self, budget: AtomicityBudget) -> Self {
        self.budget = Some(budget);
        self
    }

    pub fn with_card_geometry(mut self, geometry: CardGeometry) -> Self {
        self.card_geometry = Some(geometry);
        self
    }

    /// Uses `geometry` for the sheet instead of the one the config derives
    /// for the selected mode.
    pub fn with_page_geometry(mut self, geometry: PageGeometry) -> Self {
        self.page_geometry = Some(geometry);
        self
    }

    pub fn with_text_options(mut self, options: TextLayoutOptions) -> Self {
        self.text_options = Some(options);
        self
    }

    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render_options = Some(options);
        self
    }

    /// Resolves and checks the geometry, then creates the pipeline.
    pub fn build(self) -> Result<CardPipeline, PipelineError> {
        let mode = self.mode.unwrap_or(self.config.mode);
        let card_geometry = self
            .card_geometry
            .unwrap_or_else(|| self.config.card_geometry());
        let page_geometry = self
            .page_geometry
            .unwrap_or_else(|| self.config.page_geometry_for(mode, &card_geometry));
        card_geometry.validate()?;
        page_geometry.validate()?;

        log::debug!(
            "Pipeline: {:?} mode, card {}x{}pt, page {}x{}pt ({}x{} grid).",
            mode,
            card_geometry.width,
            card_geometry.height,
            page_geometry.width,
            page_geometry.height,
            page_geometry.rows,
            page_geometry.cols
        );

        Ok(CardPipeline {
            budget: self.budget.unwrap_or_else(|| self.config.budget()),
            card_geometry,
            page_geometry,
            mode,
            text_options: self
                .text_options
                .unwrap_or_else(|| self.config.text_options()),
            render_options: self
                .render_options
                .unwrap_or_else(|| self.config.render_options()),
            tag_placement: self.config.tag_placement,
        })
    }
}
