//! Charging-network sessions and their monthly aggregate.

use chrono::{Duration, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::period::PeriodKey;
use crate::error::ParseError;

/// One charging session as listed on the invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargingSession {
    /// Session start, to the minute.
    pub started_at: NaiveDateTime,

    /// Time connected.
    #[serde(with = "duration_seconds")]
    pub duration: Duration,

    /// Number of billed units.
    pub quantity: u32,

    /// Price per unit in EUR.
    pub unit_price: Decimal,

    /// VAT as a fraction (0.24 for 24 %).
    pub tax_rate: Decimal,

    /// Amount charged in EUR.
    pub amount_eur: Decimal,

    /// Energy delivered.
    pub kwh: Decimal,
}

impl ChargingSession {
    pub fn period(&self) -> PeriodKey {
        use chrono::Datelike;
        PeriodKey {
            year: self.started_at.year(),
            month: self.started_at.month(),
        }
    }
}

/// All sessions of one month folded together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargingMonth {
    pub period: PeriodKey,

    /// Number of sessions folded in.
    pub sessions: usize,

    /// Sum of billed units.
    pub quantity: u32,

    #[serde(with = "duration_seconds")]
    pub duration: Duration,

    /// Highest VAT rate seen.
    pub tax_rate: Decimal,

    pub amount_eur: Decimal,

    pub kwh: Decimal,
}

impl ChargingMonth {
    pub fn empty(period: PeriodKey) -> Self {
        Self {
            period,
            sessions: 0,
            quantity: 0,
            duration: Duration::zero(),
            tax_rate: Decimal::ZERO,
            amount_eur: Decimal::ZERO,
            kwh: Decimal::ZERO,
        }
    }

    /// Fold one more session into the month.
    ///
    /// Fails when a running sum leaves its type's range.
    pub fn add(mut self, session: &ChargingSession) -> Result<Self, ParseError> {
        let period = self.period;
        let overflow = |field: &'static str| ParseError::Number {
            field,
            value: format!("{} session at {}", period, session.started_at),
        };

        self.quantity = self
            .quantity
            .checked_add(session.quantity)
            .ok_or_else(|| overflow("monthly quantity"))?;
        self.duration = self
            .duration
            .checked_add(&session.duration)
            .ok_or_else(|| overflow("monthly duration"))?;
        self.amount_eur = self
            .amount_eur
            .checked_add(session.amount_eur)
            .ok_or_else(|| overflow("monthly amount"))?;
        self.kwh = self
            .kwh
            .checked_add(session.kwh)
            .ok_or_else(|| overflow("monthly kWh"))?;
        self.tax_rate = self.tax_rate.max(session.tax_rate);
        self.sessions += 1;
        Ok(self)
    }

    /// Average price per billed unit: total amount over total quantity.
    pub fn unit_price(&self) -> Decimal {
        if self.quantity == 0 {
            return Decimal::ZERO;
        }
        self.amount_eur / Decimal::from(self.quantity)
    }
}

mod duration_seconds {
    use chrono::Duration;
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_i64(d.num_seconds())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        let secs = i64::deserialize(d)?;
        Duration::try_seconds(secs).ok_or_else(|| D::Error::custom("duration out of range"))
    }
}
