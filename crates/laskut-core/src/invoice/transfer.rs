//! Transfer-utility invoices: monthly blocks opened by a date range.

use tracing::{debug, info, trace};

use crate::document::PageSelection;
use crate::error::Result;
use crate::models::config::PageConfig;
use crate::models::period::{PeriodKey, PeriodMapping};

use super::accumulator::{FieldUpdate, PeriodAccumulator};
use super::rules::{
    TRANSFER_BASIC_PAY, TRANSFER_DATE_RANGE, TRANSFER_DAY, TRANSFER_NIGHT, TRANSFER_TAX,
    FieldKind, LineClassifier, parse_cents, parse_decimal, resolve_period,
};
use super::{Provider, ProviderParser};

/// Parser for the transfer utility's monthly breakdown.
///
/// A date-range line opens a period; the field lines after it belong to that
/// period until the next date range.
pub struct TransferParser {
    classifier: LineClassifier,
    page: u32,
}

impl TransferParser {
    /// Create a parser reading the default breakdown page.
    pub fn new() -> Self {
        Self::with_page(PageConfig::default().transfer_page)
    }

    /// Read the breakdown from another page.
    pub fn with_page(page: u32) -> Self {
        Self {
            classifier: LineClassifier::new([
                (FieldKind::DateRange, &*TRANSFER_DATE_RANGE),
                (FieldKind::BasicPay, &*TRANSFER_BASIC_PAY),
                (FieldKind::DayTransfer, &*TRANSFER_DAY),
                (FieldKind::NightTransfer, &*TRANSFER_NIGHT),
                (FieldKind::Tax, &*TRANSFER_TAX),
            ]),
            page,
        }
    }
}

impl Default for TransferParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderParser for TransferParser {
    type Output = PeriodMapping;

    fn provider(&self) -> Provider {
        Provider::TransferUtility
    }

    fn pages(&self) -> PageSelection {
        PageSelection::Single(self.page)
    }

    fn parse_text(&self, text: &str) -> Result<PeriodMapping> {
        let mut periods = PeriodAccumulator::new();
        let mut current: Option<PeriodKey> = None;

        for (index, line) in text.lines().enumerate() {
            let Some(m) = self.classifier.classify(line) else {
                trace!("Line {} matched no pattern", index + 1);
                continue;
            };

            let update = match m.kind {
                FieldKind::DateRange => {
                    let key = resolve_period(m.group(1))?;
                    debug!("Line {} opens period {}", index + 1, key);
                    periods.open(key);
                    current = Some(key);
                    continue;
                }
                FieldKind::BasicPay => {
                    FieldUpdate::BasicPay(parse_decimal("basic pay", m.group(1))?)
                }
                FieldKind::DayTransfer => FieldUpdate::DayTransfer {
                    unit_price: parse_cents("day transfer price", m.group(1))?,
                    total: parse_decimal("day transfer total", m.group(2))?,
                },
                FieldKind::NightTransfer => FieldUpdate::NightTransfer {
                    unit_price: parse_cents("night transfer price", m.group(1))?,
                    total: parse_decimal("night transfer total", m.group(2))?,
                },
                FieldKind::Tax => FieldUpdate::Tax(parse_decimal("tax", m.group(1))?),
                _ => continue,
            };

            match current {
                Some(key) => periods.apply(key, update)?,
                None => debug!("Line {} precedes any billing period, skipped", index + 1),
            }
        }

        info!("Parsed {} transfer periods", periods.len());
        Ok(periods.finish())
    }
}
