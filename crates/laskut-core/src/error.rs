//! Error types for the laskut-core library.

use thiserror::Error;

/// Main error type for the laskut library.
#[derive(Error, Debug)]
pub enum LaskutError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// The document does not have the expected structure.
    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    /// A matched invoice line could not be interpreted.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// CSV output error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON output error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text from page {page}: {reason}")]
    TextExtraction { page: u32, reason: String },

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Structural problems with an extracted document.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DocumentError {
    /// A page the provider grammar relies on is absent.
    #[error("page {page} requested but the document has {available} page(s)")]
    MissingPage { page: u32, available: usize },

    /// The document contains no text at all.
    #[error("document contains no text")]
    Empty,
}

/// Errors raised while interpreting a matched line.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// A date did not match the short `d.m.yyyy` form or is not a calendar date.
    #[error("invalid date: {0:?}")]
    Date(String),

    /// A timestamp or duration did not match its expected form.
    #[error("invalid time for {field}: {value:?}")]
    Time { field: &'static str, value: String },

    /// A numeric capture could not be parsed.
    #[error("failed to parse {field}: {value:?}")]
    Number { field: &'static str, value: String },
}

/// Result type for the laskut library.
pub type Result<T> = std::result::Result<T, LaskutError>;
