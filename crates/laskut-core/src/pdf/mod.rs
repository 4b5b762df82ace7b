//! PDF text extraction, feeding the invoice parsers.

mod extractor;

pub use extractor::PdfExtractor;

use crate::document::Document;
use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF processing implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract text from a specific page (1-indexed).
    fn extract_page_text(&self, page: u32) -> Result<String>;

    /// Extract every page into a [`Document`].
    fn extract_document(&self) -> Result<Document> {
        let pages = (1..=self.page_count())
            .map(|page| self.extract_page_text(page))
            .collect::<Result<Vec<_>>>()?;
        Ok(Document::from_pages(pages))
    }
}

/// Load PDF bytes and extract all pages.
pub fn document_from_pdf(data: &[u8]) -> Result<Document> {
    let mut extractor = PdfExtractor::new();
    extractor.load(data)?;
    extractor.extract_document()
}
