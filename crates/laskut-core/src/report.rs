//! CSV and JSON rendering of monthly report rows.

use std::io::Write;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::invoice::MergedRecord;
use crate::locale::Locale;
use crate::models::charging::ChargingMonth;
use crate::models::config::LaskutConfig;
use crate::models::period::Kwh;

/// Writes report rows in a locale's language.
///
/// Zero figures render as empty cells, so a provider's unpopulated columns
/// stay blank. A genuine zero reading is shown blank too.
#[derive(Debug, Clone)]
pub struct CsvRenderer {
    locale: Locale,
    indeterminate_marker: String,
}

impl CsvRenderer {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            indeterminate_marker: "n/a".to_string(),
        }
    }

    pub fn from_config(config: &LaskutConfig) -> Self {
        Self::new(config.locale()).with_indeterminate_marker(&config.output.indeterminate_marker)
    }

    /// Cell text for a kWh figure derived from a zero unit price.
    pub fn with_indeterminate_marker(mut self, marker: &str) -> Self {
        self.indeterminate_marker = marker.to_string();
        self
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// The twelve cells of a period row.
    pub fn period_row(&self, row: &MergedRecord) -> [String; 12] {
        let energy = &row.energy;
        let transfer = &row.transfer;

        [
            self.locale.month_label(row.period.month),
            format_currency(energy.basic_pay),
            format_currency(transfer.basic_pay),
            format_integer(energy.day_energy_kwh),
            format_currency(energy.day_energy_eur),
            format_integer(energy.night_energy_kwh),
            format_currency(energy.night_energy_eur),
            self.format_kwh(transfer.transfer_day.kwh),
            format_currency(transfer.transfer_day.total),
            self.format_kwh(transfer.transfer_night.kwh),
            format_currency(transfer.transfer_night.total),
            format_currency(transfer.tax),
        ]
    }

    /// Write the header and one row per period.
    pub fn write_periods<W: Write>(&self, writer: W, rows: &[MergedRecord]) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);

        wtr.write_record(self.locale.period_header())?;
        for row in rows {
            wtr.write_record(self.period_row(row))?;
        }
        wtr.flush()?;

        debug!("Wrote {} period rows", rows.len());
        Ok(())
    }

    pub fn render_periods(&self, rows: &[MergedRecord]) -> Result<String> {
        let mut buf = Vec::new();
        self.write_periods(&mut buf, rows)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// The six cells of a charging row.
    pub fn charging_row(&self, month: &ChargingMonth) -> [String; 6] {
        [
            month.period.year.to_string(),
            month.period.month.to_string(),
            format_integer(i64::from(month.quantity)),
            format_currency(month.unit_price()),
            format_currency(month.amount_eur),
            format_currency(month.kwh),
        ]
    }

    pub fn write_charging<W: Write>(&self, writer: W, months: &[ChargingMonth]) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);

        wtr.write_record(self.locale.charging_header())?;
        for month in months {
            wtr.write_record(self.charging_row(month))?;
        }
        wtr.flush()?;

        debug!("Wrote {} charging rows", months.len());
        Ok(())
    }

    pub fn render_charging(&self, months: &[ChargingMonth]) -> Result<String> {
        let mut buf = Vec::new();
        self.write_charging(&mut buf, months)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Period rows as a JSON array, each row carrying its month label.
    pub fn periods_json(&self, rows: &[MergedRecord]) -> Result<String> {
        let labeled: Vec<Labeled<'_, MergedRecord>> = rows
            .iter()
            .map(|row| Labeled {
                label: self.locale.month_label(row.period.month),
                row,
            })
            .collect();
        Ok(serde_json::to_string_pretty(&labeled)?)
    }

    pub fn charging_json(&self, months: &[ChargingMonth]) -> Result<String> {
        let labeled: Vec<Labeled<'_, ChargingMonth>> = months
            .iter()
            .map(|row| Labeled {
                label: self.locale.month_label(row.period.month),
                row,
            })
            .collect();
        Ok(serde_json::to_string_pretty(&labeled)?)
    }

    fn format_kwh(&self, kwh: Kwh) -> String {
        match kwh {
            Kwh::Value(v) => format_integer(v),
            Kwh::Indeterminate => self.indeterminate_marker.clone(),
        }
    }
}

impl Default for CsvRenderer {
    fn default() -> Self {
        Self::new(Locale::default())
    }
}

#[derive(Serialize)]
struct Labeled<'a, T> {
    label: String,
    #[serde(flatten)]
    row: &'a T,
}

/// Two decimals, point-decimal, half away from zero; zero is blank.
pub fn format_currency(value: Decimal) -> String {
    if value.is_zero() {
        return String::new();
    }
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        return String::new();
    }
    format!("{:.2}", rounded)
}

/// Integer cell; zero is blank.
pub fn format_integer(value: i64) -> String {
    if value == 0 {
        String::new()
    } else {
        value.to_string()
    }
}
