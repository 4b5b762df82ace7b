//! PDF page text extraction using lopdf.

use lopdf::Document;
use tracing::debug;

use super::{PdfProcessor, Result};
use crate::error::PdfError;

/// PDF content extractor using lopdf.
pub struct PdfExtractor {
    document: Option<Document>,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self { document: None }
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn extract_page_text(&self, page: u32) -> Result<String> {
        let doc = self
            .document
            .as_ref()
            .ok_or_else(|| PdfError::Parse("No document loaded".to_string()))?;

        let text = doc
            .extract_text(&[page])
            .map_err(|e| PdfError::TextExtraction {
                page,
                reason: e.to_string(),
            })?;

        debug!("Extracted {} characters from page {}", text.len(), page);
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_extractor_new() {
        let extractor = PdfExtractor::new();
        assert!(extractor.document.is_none());
        assert_eq!(extractor.page_count(), 0);
    }

    #[test]
    fn test_extract_without_document_fails() {
        let extractor = PdfExtractor::new();
        assert!(matches!(extractor.extract_page_text(1), Err(PdfError::Parse(_))));
    }

    #[test]
    fn test_load_rejects_garbage() {
        let mut extractor = PdfExtractor::new();
        assert!(matches!(extractor.load(b"not a pdf"), Err(PdfError::Parse(_))));
    }
}
