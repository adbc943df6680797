//! Vector PDF output for cardify layout plans.
//!
//! Cards are drawn with the PDF base-14 Helvetica faces, so the output needs
//! no embedded font data. Documents carry no timestamps or IDs: rendering the
//! same plan twice yields identical bytes.

mod page;
mod renderer;
mod writer;

pub use page::{render_page_content, to_win_ansi};
pub use renderer::LopdfRenderer;
pub use writer::PdfWriter;

use cardify_layout::LayoutPlan;
use cardify_render_core::{DocumentRenderer, RenderError, RenderOptions};

/// Renders every page of `plan` into an in-memory PDF.
pub fn render_plan(plan: &LayoutPlan, options: &RenderOptions) -> Result<Vec<u8>, RenderError> {
    let mut renderer = Box::new(LopdfRenderer::new(*options));
    renderer.begin_document(Vec::new())?;
    renderer.render_pages(&plan.pages)?;
    let bytes = renderer.finish()?;
    log::info!(
        "Rendered {} page(s) with {} card(s) into {} bytes.",
        plan.page_count(),
        plan.placements().count(),
        bytes.len()
    );
    Ok(bytes)
}
