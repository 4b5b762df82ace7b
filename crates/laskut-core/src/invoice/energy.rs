//! Energy-retailer invoices: self-dated energy lines and one basic-pay total.

use rust_decimal::Decimal;
use tracing::{debug, info, trace};

use crate::document::PageSelection;
use crate::error::Result;
use crate::models::config::PageConfig;
use crate::models::period::PeriodMapping;

use super::accumulator::{FieldUpdate, PeriodAccumulator};
use super::rules::{
    ENERGY_BASIC_PAY, ENERGY_CONSUMPTION, FieldKind, LineClassifier, parse_cents, parse_decimal,
    parse_grouped_integer, resolve_period,
};
use super::{Provider, ProviderParser};

/// Parser for the energy retailer's consumption page.
///
/// Each energy line names its own date range, so there is no current period.
/// The basic-pay line covers the whole invoice and is divided evenly across
/// the periods once the page has been scanned. Day/night energy is left for
/// [`super::merge`] to apportion.
pub struct EnergyParser {
    classifier: LineClassifier,
    page: u32,
}

impl EnergyParser {
    /// Create a parser reading the default consumption page.
    pub fn new() -> Self {
        Self::with_page(PageConfig::default().energy_page)
    }

    /// Read the consumption lines from another page.
    pub fn with_page(page: u32) -> Self {
        Self {
            classifier: LineClassifier::new([
                (FieldKind::BasicPay, &*ENERGY_BASIC_PAY),
                (FieldKind::Energy, &*ENERGY_CONSUMPTION),
            ]),
            page,
        }
    }
}

impl Default for EnergyParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderParser for EnergyParser {
    type Output = PeriodMapping;

    fn provider(&self) -> Provider {
        Provider::EnergyRetailer
    }

    fn pages(&self) -> PageSelection {
        PageSelection::Single(self.page)
    }

    fn parse_text(&self, text: &str) -> Result<PeriodMapping> {
        let mut periods = PeriodAccumulator::new();
        let mut basic_pay: Option<Decimal> = None;

        for (index, line) in text.lines().enumerate() {
            let Some(m) = self.classifier.classify(line) else {
                trace!("Line {} matched no pattern", index + 1);
                continue;
            };

            match m.kind {
                FieldKind::BasicPay => {
                    let amount = parse_decimal("basic pay", m.group(3))?;
                    debug!("Line {} carries document basic pay {}", index + 1, amount);
                    basic_pay = Some(amount);
                }
                FieldKind::Energy => {
                    let key = resolve_period(m.group(1))?;
                    let update = FieldUpdate::Energy {
                        total_kwh: parse_grouped_integer("energy kWh", m.group(3))?,
                        unit_price: parse_cents("energy price", m.group(4))?,
                    };
                    periods.apply(key, update)?;
                }
                _ => {}
            }
        }

        info!("Parsed {} energy periods", periods.len());
        Ok(match basic_pay {
            Some(total) => periods.finish_with_basic_pay(total),
            None => periods.finish(),
        })
    }
}
