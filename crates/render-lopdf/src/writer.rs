use cardify_layout::StandardFont;
use cardify_render_core::RenderError;
use cardify_render_core::utils::font_resource_name;
use lopdf::content::Content;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};
use std::io::Write;

/// Collects page objects in a `lopdf::Document` and serializes it into the
/// wrapped writer on `finish`.
///
/// Object ids are handed out sequentially and no `/ID` or `/CreationDate` is
/// written, so equal input produces equal bytes.
pub struct PdfWriter<W: Write> {
    writer: W,
    document: Document,
    pub pages_id: ObjectId,
    pub resources_id: ObjectId,
    page_ids: Vec<ObjectId>,
}

impl<W: Write> PdfWriter<W> {
    pub fn new(writer: W, version: &str) -> Self {
        let mut document = Document::with_version(version);
        let pages_id = document.new_object_id();
        let resources_id = document.add_object(dictionary! { "Font" => standard_font_dict() });

        Self {
            writer,
            document,
            pages_id,
            resources_id,
            page_ids: Vec::new(),
        }
    }

    pub fn write_content_stream(&mut self, content: Content) -> Result<ObjectId, RenderError> {
        let stream = Stream::new(dictionary! {}, content.encode()?);
        Ok(self.document.add_object(stream))
    }

    pub fn write_page(&mut self, content_id: ObjectId, width: f32, height: f32) -> ObjectId {
        let page = dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "MediaBox" => vec![0.0f32.into(), 0.0f32.into(), width.into(), height.into()],
            "Contents" => content_id,
            "Resources" => self.resources_id,
        };
        let id = self.document.add_object(page);
        self.page_ids.push(id);
        id
    }

    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    pub fn finish(mut self) -> Result<W, RenderError> {
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => self.page_ids.iter().map(|id| Object::Reference(*id)).collect::<Vec<Object>>(),
            "Count" => self.page_ids.len() as i64,
        };
        self.document.objects.insert(self.pages_id, pages.into());

        let catalog_id = self.document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.document.trailer.set("Root", catalog_id);

        self.document.save_to(&mut self.writer)?;
        self.writer.flush()?;
        Ok(self.writer)
    }
}

fn standard_font_dict() -> Dictionary {
    let mut fonts = Dictionary::new();
    for font in StandardFont::ALL {
        fonts.set(
            font_resource_name(font),
            dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => font.postscript_name(),
                "Encoding" => "WinAnsiEncoding",
            },
        );
    }
    fonts
}
