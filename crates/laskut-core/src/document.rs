//! Extracted invoice text, one string per page.

use crate::error::DocumentError;

/// Page separator used by plain-text extractors.
pub const PAGE_BREAK: char = '\u{0c}';

/// Pages a provider grammar reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSelection {
    /// One page (1-indexed).
    Single(u32),
    /// Every page, in order.
    All,
}

/// Text of a document as handed over by the extraction step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pages: Vec<String>,
}

impl Document {
    pub fn from_pages(pages: Vec<String>) -> Self {
        Self { pages }
    }

    /// Split plain text on form feeds.
    ///
    /// A trailing form feed does not open another page.
    pub fn from_text(text: &str) -> Self {
        let mut pages: Vec<String> = text.split(PAGE_BREAK).map(str::to_string).collect();
        if pages.len() > 1 && pages.last().is_some_and(|p| p.trim().is_empty()) {
            pages.pop();
        }
        Self { pages }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Text of a 1-indexed page.
    pub fn page(&self, number: u32) -> Result<&str, DocumentError> {
        number
            .checked_sub(1)
            .and_then(|i| self.pages.get(i as usize))
            .map(String::as_str)
            .ok_or(DocumentError::MissingPage {
                page: number,
                available: self.pages.len(),
            })
    }

    /// Text of the selected pages joined by newlines.
    pub fn select(&self, selection: PageSelection) -> Result<String, DocumentError> {
        match selection {
            PageSelection::Single(number) => self.page(number).map(str::to_string),
            PageSelection::All if self.pages.is_empty() => Err(DocumentError::Empty),
            PageSelection::All => Ok(self.pages.join("\n")),
        }
    }
}
