//! Invoice field extraction and provider reconciliation.

mod accumulator;
mod charging;
mod energy;
pub mod merge;
pub mod rules;
mod transfer;

pub use accumulator::{FieldUpdate, PeriodAccumulator};
pub use charging::{ChargingParser, ChargingSessions, summarize};
pub use energy::EnergyParser;
pub use merge::{MergedRecord, TransferSplit};
pub use transfer::TransferParser;

use tracing::info;

use crate::document::{Document, PageSelection};
use crate::error::Result;

/// Invoice issuers the crate understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    /// Network company billing day/night transfer (Caruna layout).
    TransferUtility,
    /// Electricity retailer billing undivided energy (Helen layout).
    EnergyRetailer,
    /// EV charging network billing sessions (Plugsurfing layout).
    ChargingNetwork,
}

impl Provider {
    pub fn name(&self) -> &'static str {
        match self {
            Provider::TransferUtility => "transfer utility",
            Provider::EnergyRetailer => "energy retailer",
            Provider::ChargingNetwork => "charging network",
        }
    }

    /// Suggested report file name.
    pub fn report_file_name(&self) -> &'static str {
        match self {
            Provider::TransferUtility => "caruna-report.csv",
            Provider::EnergyRetailer => "helen-report.csv",
            Provider::ChargingNetwork => "plugsurfing-report.csv",
        }
    }
}

/// Suggested file name of the combined transfer + energy report.
pub const COMBINED_REPORT_FILE_NAME: &str = "caruna-helen-report.csv";

/// A single-pass parser for one provider's invoice layout.
pub trait ProviderParser {
    /// What one document parses into.
    type Output;

    fn provider(&self) -> Provider;

    /// Pages holding the billing lines.
    fn pages(&self) -> PageSelection;

    /// Scan extracted text line by line.
    fn parse_text(&self, text: &str) -> Result<Self::Output>;

    /// Select the provider's pages and parse them.
    ///
    /// A missing page is an error; pages without billing lines give an empty result.
    fn parse_document(&self, document: &Document) -> Result<Self::Output> {
        let text = document.select(self.pages())?;
        info!(
            "Parsing {} invoice from {} characters of text",
            self.provider().name(),
            text.len()
        );
        self.parse_text(&text)
    }
}
