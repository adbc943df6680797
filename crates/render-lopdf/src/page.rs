//! Drawing of one planned page into a PDF content stream.

use cardify_layout::{Page, Placement, StandardFont};
use cardify_render_core::utils::{flip_y, font_resource_name};
use cardify_render_core::{RenderError, RenderOptions};
use cardify_types::Color;
use lopdf::content::{Content, Operation};
use lopdf::{Object, StringFormat};

/// Line width of the optional cut-line border.
const BORDER_WIDTH: f32 = 0.5;
const OVERFLOW_OUTLINE_WIDTH: f32 = 1.5;
const SIDE_INDICATOR_SIZE: f32 = 8.0;

/// Builds the content stream for `page`.
pub fn render_page_content(page: &Page, options: &RenderOptions) -> Result<Content, RenderError> {
    let mut ctx = PageContext::new(page.height);
    for placement in &page.placements {
        ctx.draw_placement(placement, options)?;
    }
    Ok(ctx.finish())
}

struct PageContext {
    page_height: f32,
    content: Content,
    state: RenderState,
}

/// Graphics state already emitted into the stream, to skip redundant operators.
#[derive(Default, Clone, PartialEq)]
struct RenderState {
    font: Option<(StandardFont, f32)>,
    fill_color: Option<Color>,
    stroke_color: Option<Color>,
    line_width: Option<f32>,
}

impl PageContext {
    fn new(page_height: f32) -> Self {
        Self {
            page_height,
            content: Content { operations: vec![] },
            state: Default::default(),
        }
    }

    fn finish(self) -> Content {
        self.content
    }

    fn op(&mut self, operator: &str, operands: Vec<Object>) {
        self.content.operations.push(Operation::new(operator, operands));
    }

    fn save_state(&mut self) {
        self.op("q", vec![]);
    }

    fn restore_state(&mut self) {
        self.op("Q", vec![]);
        self.state = RenderState::default();
    }

    fn set_fill_color(&mut self, color: Color) {
        if self.state.fill_color != Some(color) {
            let [r, g, b] = color.to_unit_rgb();
            self.op("rg", vec![r.into(), g.into(), b.into()]);
            self.state.fill_color = Some(color);
        }
    }

    fn set_stroke_color(&mut self, color: Color) {
        if self.state.stroke_color != Some(color) {
            let [r, g, b] = color.to_unit_rgb();
            self.op("RG", vec![r.into(), g.into(), b.into()]);
            self.state.stroke_color = Some(color);
        }
    }

    fn set_line_width(&mut self, width: f32) {
        if self.state.line_width != Some(width) {
            self.op("w", vec![width.into()]);
            self.state.line_width = Some(width);
        }
    }

    fn set_font(&mut self, font: StandardFont, size: f32) {
        if self.state.font != Some((font, size)) {
            self.op(
                "Tf",
                vec![
                    Object::Name(font_resource_name(font).as_bytes().to_vec()),
                    size.into(),
                ],
            );
            self.state.font = Some((font, size));
        }
    }

    fn rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.op("re", vec![x.into(), y.into(), width.into(), height.into()]);
    }

    /// Draws one card. Everything inside runs in card space: the origin is
    /// the card's bottom-left corner and one unit is one unscaled card point.
    fn draw_placement(
        &mut self,
        placement: &Placement,
        options: &RenderOptions,
    ) -> Result<(), RenderError> {
        let geometry = &placement.geometry;
        let (width, height) = (geometry.width, geometry.height);
        if placement.scale <= 0.0 || !placement.scale.is_finite() {
            return Err(RenderError::Other(format!(
                "card {} has an unusable scale factor {}",
                placement.card_index + 1,
                placement.scale
            )));
        }
        let theme = &options.theme;

        self.save_state();
        let s = placement.scale;
        let origin_y = flip_y(placement.slot.bottom(), self.page_height);
        self.op(
            "cm",
            vec![
                s.into(),
                0.0f32.into(),
                0.0f32.into(),
                s.into(),
                placement.slot.x.into(),
                origin_y.into(),
            ],
        );

        self.set_fill_color(theme.background);
        self.rect(0.0, 0.0, width, height);
        self.op("f", vec![]);

        // Text never leaves the card, even when it overflows the margins.
        self.rect(0.0, 0.0, width, height);
        self.op("W", vec![]);
        self.op("n", vec![]);

        self.draw_lines(placement, options);
        if options.side_indicator {
            self.draw_side_indicator(placement, options);
        }

        if options.draw_borders {
            self.set_stroke_color(theme.border);
            self.set_line_width(BORDER_WIDTH);
            let inset = BORDER_WIDTH / 2.0;
            self.rect(inset, inset, width - BORDER_WIDTH, height - BORDER_WIDTH);
            self.op("S", vec![]);
        }
        if placement.overflow {
            self.draw_overflow_marker(placement, options);
        }

        self.restore_state();
        Ok(())
    }

    fn draw_lines(&mut self, placement: &Placement, options: &RenderOptions) {
        let geometry = &placement.geometry;
        let mut top = geometry.margins.top;

        for line in &placement.lines {
            let leading = (line.height - line.font_size) / 2.0;
            let baseline = top + leading + line.font_size * 0.8;
            let y = flip_y(baseline, geometry.height);
            top += line.height;

            for item in &line.items {
                if item.text.trim().is_empty() {
                    continue;
                }
                let color = if item.muted {
                    options.theme.muted
                } else {
                    options.theme.text
                };
                self.op("BT", vec![]);
                self.set_font(item.font, line.font_size);
                self.set_fill_color(color);
                let x = geometry.margins.left + item.x;
                self.op("Td", vec![x.into(), y.into()]);
                self.op(
                    "Tj",
                    vec![Object::String(to_win_ansi(&item.text), StringFormat::Literal)],
                );
                self.op("ET", vec![]);
            }
        }
    }

    /// "F" or "B" in muted small type, right-aligned to the text box in the
    /// top margin.
    fn draw_side_indicator(&mut self, placement: &Placement, options: &RenderOptions) {
        let geometry = &placement.geometry;
        let label = placement.side.label();
        let x = geometry.width
            - geometry.margins.right
            - StandardFont::Helvetica.measure(label, SIDE_INDICATOR_SIZE);
        let baseline = (geometry.margins.top - 2.0).max(SIDE_INDICATOR_SIZE);

        self.op("BT", vec![]);
        self.set_font(StandardFont::Helvetica, SIDE_INDICATOR_SIZE);
        self.set_fill_color(options.theme.muted);
        self.op("Td", vec![x.into(), flip_y(baseline, geometry.height).into()]);
        self.op(
            "Tj",
            vec![Object::String(to_win_ansi(label), StringFormat::Literal)],
        );
        self.op("ET", vec![]);
    }

    fn draw_overflow_marker(&mut self, placement: &Placement, options: &RenderOptions) {
        let geometry = &placement.geometry;
        let (width, height) = (geometry.width, geometry.height);
        let color = options.theme.overflow;

        self.set_stroke_color(color);
        self.set_line_width(OVERFLOW_OUTLINE_WIDTH);
        let inset = OVERFLOW_OUTLINE_WIDTH / 2.0;
        self.rect(
            inset,
            inset,
            width - OVERFLOW_OUTLINE_WIDTH,
            height - OVERFLOW_OUTLINE_WIDTH,
        );
        self.op("S", vec![]);

        let size = geometry.font_size.min(width / 4.0).min(height / 4.0);
        self.set_fill_color(color);
        self.op("m", vec![(width - size).into(), 0.0f32.into()]);
        self.op("l", vec![width.into(), 0.0f32.into()]);
        self.op("l", vec![width.into(), size.into()]);
        self.op("h", vec![]);
        self.op("f", vec![]);
    }
}

/// Encodes text for the standard fonts' WinAnsiEncoding. Characters the
/// encoding lacks become `?`.
pub fn to_win_ansi(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| match c {
            '\u{20}'..='\u{7E}' | '\u{A0}'..='\u{FF}' => c as u8,
            '\u{2022}' => 0x95,
            '\u{2026}' => 0x85,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{20AC}' => 0x80,
            _ => b'?',
        })
        .collect()
}
