//! Short-date parsing and billing-period resolution.

use chrono::{Datelike, NaiveDate};

use super::patterns::SHORT_DATE;
use crate::error::ParseError;
use crate::locale::Locale;
use crate::models::period::PeriodKey;

/// Parse a Finnish short date, `d.m.yyyy` or `d/m/yyyy`.
pub fn parse_short_date(s: &str) -> Result<NaiveDate, ParseError> {
    let s = s.trim();
    let caps = SHORT_DATE
        .captures(s)
        .ok_or_else(|| ParseError::Date(s.to_string()))?;

    let day: u32 = caps[1].parse().map_err(|_| ParseError::Date(s.to_string()))?;
    let month: u32 = caps[2].parse().map_err(|_| ParseError::Date(s.to_string()))?;
    let year: i32 = caps[3].parse().map_err(|_| ParseError::Date(s.to_string()))?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| ParseError::Date(s.to_string()))
}

/// Resolve the billing period a short date falls in.
pub fn resolve_period(s: &str) -> Result<PeriodKey, ParseError> {
    let date = parse_short_date(s)?;
    Ok(PeriodKey {
        year: date.year(),
        month: date.month(),
    })
}

/// Display label of the period a short date falls in, e.g. `Tammikuu`.
pub fn period_label(s: &str, locale: &Locale) -> Result<String, ParseError> {
    resolve_period(s).map(|key| locale.month_label(key.month))
}
