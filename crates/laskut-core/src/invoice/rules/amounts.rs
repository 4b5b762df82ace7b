//! Number parsing for Finnish invoice text.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use crate::error::ParseError;
use crate::models::period::Kwh;

/// Parse a Finnish-formatted amount (e.g., "1 234,56" or "1234.56").
pub fn parse_fi_amount(s: &str) -> Option<Decimal> {
    // Drop grouping spaces, unit text and anything else that is not numeric
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();

    let normalized = if cleaned.contains(',') && !cleaned.contains('.') {
        cleaned.replace(',', ".")
    } else if cleaned.contains(',') && cleaned.contains('.') {
        // Whichever separator comes last is the decimal one
        match (cleaned.rfind(','), cleaned.rfind('.')) {
            (Some(c), Some(d)) if c > d => cleaned.replace('.', "").replace(',', "."),
            (Some(_), Some(_)) => cleaned.replace(',', ""),
            _ => cleaned,
        }
    } else {
        cleaned
    };

    // ",50" is written without the leading zero on some invoices
    let normalized = if normalized.starts_with('.') {
        format!("0{}", normalized)
    } else {
        normalized
    };

    Decimal::from_str(&normalized).ok()
}

/// Parse an amount capture, naming the field on failure.
pub fn parse_decimal(field: &'static str, s: &str) -> Result<Decimal, ParseError> {
    parse_fi_amount(s).ok_or_else(|| ParseError::Number {
        field,
        value: s.to_string(),
    })
}

/// Parse a price quoted in cents (`snt`, `c`) as euros.
pub fn parse_cents(field: &'static str, s: &str) -> Result<Decimal, ParseError> {
    Ok(parse_decimal(field, s)? / Decimal::ONE_HUNDRED)
}

/// Parse a percentage as a fraction.
pub fn parse_percent(field: &'static str, s: &str) -> Result<Decimal, ParseError> {
    Ok(parse_decimal(field, s)? / Decimal::ONE_HUNDRED)
}

/// Parse an integer written with space grouping, e.g. "2 000".
pub fn parse_grouped_integer(field: &'static str, s: &str) -> Result<i64, ParseError> {
    let digits: String = s
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '\u{00a0}')
        .collect();

    digits.parse().map_err(|_| ParseError::Number {
        field,
        value: s.to_string(),
    })
}

/// `round(total / unit_price)`, half away from zero.
///
/// A zero unit price gives [`Kwh::Indeterminate`]. A quotient outside the
/// `i64` range is an error.
pub fn derive_kwh(total: Decimal, unit_price: Decimal) -> Result<Kwh, ParseError> {
    if unit_price.is_zero() {
        return Ok(Kwh::Indeterminate);
    }

    total
        .checked_div(unit_price)
        .map(|q| q.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|q| q.to_i64())
        .map(Kwh::Value)
        .ok_or_else(|| ParseError::Number {
            field: "derived kWh",
            value: format!("{} / {}", total, unit_price),
        })
}
