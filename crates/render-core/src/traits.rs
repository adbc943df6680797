use crate::error::RenderError;
use cardify_layout::Page;
use std::io::Write;

/// A document backend that turns planned pages into output bytes.
///
/// Pages are rendered in the order they are passed in; `finish` writes
/// whatever the format needs after the last page and hands the writer back.
pub trait DocumentRenderer<W: Write> {
    fn begin_document(&mut self, writer: W) -> Result<(), RenderError>;

    fn render_page(&mut self, page: &Page) -> Result<(), RenderError>;

    fn finish(self: Box<Self>) -> Result<W, RenderError>;
}
