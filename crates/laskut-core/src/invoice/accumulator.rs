//! Period-keyed accumulation of classified field values.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::error::ParseError;
use crate::models::period::{PeriodKey, PeriodMapping, PeriodRecord, TariffLine};

use super::rules::derive_kwh;

/// A parsed value addressed to one or more record fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldUpdate {
    BasicPay(Decimal),
    DayTransfer { unit_price: Decimal, total: Decimal },
    NightTransfer { unit_price: Decimal, total: Decimal },
    Tax(Decimal),
    Energy { total_kwh: i64, unit_price: Decimal },
}

/// Owns the period records of one document while it is scanned.
#[derive(Debug, Default)]
pub struct PeriodAccumulator {
    periods: PeriodMapping,
}

impl PeriodAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record for `key`, created zeroed on first reference.
    pub fn open(&mut self, key: PeriodKey) -> &mut PeriodRecord {
        self.periods.entry(key).or_default()
    }

    /// Overwrite the fields addressed by `update` (last write wins).
    ///
    /// Fails only when a transfer line's kWh cannot be represented.
    pub fn apply(&mut self, key: PeriodKey, update: FieldUpdate) -> Result<(), ParseError> {
        let record = self.open(key);

        match update {
            FieldUpdate::BasicPay(amount) => record.basic_pay = amount,
            FieldUpdate::DayTransfer { unit_price, total } => {
                record.transfer_day = tariff_line(key, "day transfer", unit_price, total)?;
            }
            FieldUpdate::NightTransfer { unit_price, total } => {
                record.transfer_night = tariff_line(key, "night transfer", unit_price, total)?;
            }
            FieldUpdate::Tax(amount) => record.tax = amount,
            FieldUpdate::Energy { total_kwh, unit_price } => {
                record.total_energy_kwh = total_kwh;
                record.energy_unit_price = unit_price;
            }
        }

        debug!("Applied {:?} to period {}", update, key);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    pub fn get(&self, key: &PeriodKey) -> Option<&PeriodRecord> {
        self.periods.get(key)
    }

    pub fn finish(self) -> PeriodMapping {
        self.periods
    }

    /// Finish, dividing a whole-document basic pay evenly across the periods found.
    pub fn finish_with_basic_pay(mut self, total: Decimal) -> PeriodMapping {
        let count = self.periods.len();
        if count == 0 {
            debug!("No periods to apportion basic pay {} over", total);
            return self.periods;
        }

        let share = total / Decimal::from(count);
        debug!("Apportioning basic pay {} over {} periods ({} each)", total, count, share);
        for record in self.periods.values_mut() {
            record.basic_pay = share;
        }
        self.periods
    }
}

fn tariff_line(
    key: PeriodKey,
    name: &str,
    unit_price: Decimal,
    total: Decimal,
) -> Result<TariffLine, ParseError> {
    let kwh = derive_kwh(total, unit_price)?;
    if kwh.is_indeterminate() {
        warn!(
            "Zero unit price for {} in period {}, kWh cannot be derived from total {}",
            name, key, total
        );
    }
    Ok(TariffLine {
        unit_price,
        total,
        kwh,
    })
}
