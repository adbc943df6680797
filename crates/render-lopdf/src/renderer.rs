use crate::page::render_page_content;
use crate::writer::PdfWriter;
use cardify_layout::Page;
use cardify_render_core::{DocumentRenderer, RenderError, RenderOptions};
use lopdf::content::Content;
use std::io::Write;

/// A PDF renderer for layout plans using the `lopdf` library.
pub struct LopdfRenderer<W: Write> {
    writer: Option<PdfWriter<W>>,
    options: RenderOptions,
}

impl<W: Write> LopdfRenderer<W> {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            writer: None,
            options,
        }
    }

    fn writer_mut(&mut self) -> Result<&mut PdfWriter<W>, RenderError> {
        self.writer
            .as_mut()
            .ok_or_else(|| RenderError::Other("Document not started".into()))
    }

    /// Renders `pages` in order. With the `parallel-render` feature the
    /// content streams are built concurrently; they are still written in
    /// page order, so the output does not change.
    pub fn render_pages(&mut self, pages: &[Page]) -> Result<(), RenderError> {
        let contents = self.build_contents(pages)?;
        for (page, content) in pages.iter().zip(contents) {
            self.write_page(page, content)?;
        }
        Ok(())
    }

    #[cfg(feature = "parallel-render")]
    fn build_contents(&self, pages: &[Page]) -> Result<Vec<Content>, RenderError> {
        use rayon::prelude::*;
        pages
            .par_iter()
            .map(|page| render_page_content(page, &self.options))
            .collect()
    }

    #[cfg(not(feature = "parallel-render"))]
    fn build_contents(&self, pages: &[Page]) -> Result<Vec<Content>, RenderError> {
        pages
            .iter()
            .map(|page| render_page_content(page, &self.options))
            .collect()
    }

    fn write_page(&mut self, page: &Page, content: Content) -> Result<(), RenderError> {
        let writer = self.writer_mut()?;
        let content_id = writer.write_content_stream(content)?;
        writer.write_page(content_id, page.width, page.height);
        log::debug!(
            "Wrote page {} ({} card(s)).",
            writer.page_count(),
            page.placements.len()
        );
        Ok(())
    }
}

impl<W: Write> DocumentRenderer<W> for LopdfRenderer<W> {
    fn begin_document(&mut self, writer: W) -> Result<(), RenderError> {
        if self.writer.is_some() {
            return Err(RenderError::Other("Document already started".into()));
        }
        self.writer = Some(PdfWriter::new(writer, "1.7"));
        Ok(())
    }

    fn render_page(&mut self, page: &Page) -> Result<(), RenderError> {
        let content = render_page_content(page, &self.options)?;
        self.write_page(page, content)
    }

    fn finish(self: Box<Self>) -> Result<W, RenderError> {
        let mut renderer = *self;
        match renderer.writer.take() {
            Some(writer) => writer.finish(),
            None => Err(RenderError::Other(
                "Document was never started with begin_document".into(),
            )),
        }
    }
}
