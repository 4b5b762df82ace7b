//! Monthly billing records shared by all providers.

use std::collections::BTreeMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Calendar month used as the aggregation key.
///
/// Ordering follows the calendar (year first), so a [`PeriodMapping`] iterates
/// months chronologically. The localized month name shown in reports is derived
/// from this key by [`crate::locale::Locale::month_label`] at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PeriodKey {
    pub year: i32,
    pub month: u32,
}

impl PeriodKey {
    /// Create a key, returning `None` for a month outside 1..=12.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// A kWh figure derived from an invoice total and a unit price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kwh {
    /// Rounded quantity.
    Value(i64),
    /// The unit price was zero, so the quantity cannot be derived.
    Indeterminate,
}

impl Kwh {
    /// The quantity, treating an indeterminate figure as zero.
    ///
    /// Only the apportionment uses this; reports keep the distinction.
    pub fn or_zero(self) -> i64 {
        match self {
            Kwh::Value(v) => v,
            Kwh::Indeterminate => 0,
        }
    }

    pub fn is_indeterminate(self) -> bool {
        matches!(self, Kwh::Indeterminate)
    }
}

impl Default for Kwh {
    fn default() -> Self {
        Kwh::Value(0)
    }
}

/// One priced tariff line, e.g. day transfer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TariffLine {
    /// Price in EUR per kWh.
    pub unit_price: Decimal,
    /// Line total in EUR.
    pub total: Decimal,
    /// `round(total / unit_price)`.
    pub kwh: Kwh,
}

/// One calendar month's billing facts for a single provider.
///
/// Fields a provider never reports stay zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodRecord {
    /// Fixed monthly charge in EUR.
    pub basic_pay: Decimal,

    /// Day-tariff network transfer.
    pub transfer_day: TariffLine,

    /// Night-tariff network transfer.
    pub transfer_night: TariffLine,

    /// Electricity tax in EUR.
    pub tax: Decimal,

    /// Undivided energy consumption billed by the retailer.
    pub total_energy_kwh: i64,

    /// Retailer energy price in EUR per kWh.
    pub energy_unit_price: Decimal,

    /// Day share of the retailer energy, after apportionment.
    pub day_energy_kwh: i64,

    /// Night share of the retailer energy, after apportionment.
    pub night_energy_kwh: i64,

    pub day_energy_eur: Decimal,

    pub night_energy_eur: Decimal,
}

/// Finished result of parsing one document: period key to record.
pub type PeriodMapping = BTreeMap<PeriodKey, PeriodRecord>;
