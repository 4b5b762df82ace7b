//! Core library for Finnish utility and charging invoices.
//!
//! This crate provides:
//! - PDF text extraction into page-indexed documents
//! - Per-provider line parsers (transfer utility, energy retailer, charging network)
//! - Monthly aggregation and cross-provider day/night apportionment
//! - CSV and JSON report rendering in Finnish or English

pub mod document;
pub mod error;
pub mod invoice;
pub mod locale;
pub mod models;
pub mod pdf;
pub mod report;

pub use document::{Document, PageSelection};
pub use error::{LaskutError, Result};
pub use invoice::{
    ChargingParser, EnergyParser, MergedRecord, Provider, ProviderParser, TransferParser,
    TransferSplit,
};
pub use locale::{Language, Locale};
pub use models::{
    ChargingMonth, ChargingSession, Kwh, LaskutConfig, PeriodKey, PeriodMapping, PeriodRecord,
};
pub use pdf::{PdfExtractor, PdfProcessor, document_from_pdf};
pub use report::CsvRenderer;
