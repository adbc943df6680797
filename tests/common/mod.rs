pub mod fixtures;
pub mod pdf_assertions;

use cardify::{CardInput, PipelineBuilder, PipelineError, RenderOutput};
use lopdf::Document as LopdfDocument;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    /// Create a GeneratedPdf from raw bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    /// Get the number of pages in the PDF
    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Save PDF to a file for manual debugging
    #[allow(dead_code)]
    pub fn save_for_debug(&self, name: &str) -> std::io::Result<()> {
        std::fs::write(format!("test_output_{}.pdf", name), &self.bytes)
    }
}

/// Runs the full pipeline built from `builder` over `texts`.
pub fn generate_cards(
    builder: PipelineBuilder,
    texts: &[&str],
) -> Result<(GeneratedPdf, RenderOutput), Box<dyn std::error::Error>> {
    let pipeline = builder.build()?;
    let inputs: Vec<CardInput> = texts.iter().map(|t| CardInput::from(*t)).collect();
    let output = pipeline.generate(&inputs)?;
    let pdf = GeneratedPdf::from_bytes(output.pdf.clone())?;
    Ok((pdf, output))
}

/// Like [`generate_cards`] but returns the pipeline error untouched.
#[allow(dead_code)]
pub fn try_generate(builder: PipelineBuilder, texts: &[&str]) -> Result<RenderOutput, PipelineError> {
    let pipeline = builder.build()?;
    let inputs: Vec<CardInput> = texts.iter().map(|t| CardInput::from(*t)).collect();
    pipeline.generate(&inputs)
}
