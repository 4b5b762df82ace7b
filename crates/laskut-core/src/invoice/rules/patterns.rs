//! Line patterns of the supported invoice layouts.
//!
//! Amounts use the Finnish decimal comma. An amount is followed by exactly one
//! currency token from [`CURRENCY`]; the tokens are interchangeable.

use lazy_static::lazy_static;
use regex::Regex;

/// Accepted currency tokens after an amount.
pub const CURRENCY: &str = r"(?:EUR|€|e)";

/// Short Finnish date, e.g. `1.1.2023`.
const DATE: &str = r"\d{1,2}\.\d{1,2}\.\d{4}";

lazy_static! {
    // Standalone short date: 1.1.2023 or 1/1/2023
    pub static ref SHORT_DATE: Regex = Regex::new(
        r"^(\d{1,2})[./](\d{1,2})[./](\d{4})$"
    ).unwrap();

    // Report key: 2023-01 or 2023-1
    pub static ref YEAR_MONTH: Regex = Regex::new(
        r"^(\d{4})-(\d{1,2})$"
    ).unwrap();

    // Transfer utility (page 2 breakdown)
    pub static ref TRANSFER_DATE_RANGE: Regex = Regex::new(
        &format!(r"({DATE}) - ({DATE})")
    ).unwrap();

    pub static ref TRANSFER_BASIC_PAY: Regex = Regex::new(
        &format!(r"Perusmaksu.* (\d*,\d\d) {CURRENCY}")
    ).unwrap();

    pub static ref TRANSFER_DAY: Regex = Regex::new(
        &format!(r"Päiväsiirto.* (\d*,\d\d) snt.* (\d*,\d\d) {CURRENCY}")
    ).unwrap();

    pub static ref TRANSFER_NIGHT: Regex = Regex::new(
        &format!(r"Yösiirto.* (\d*,\d\d) snt.* (\d*,\d\d) {CURRENCY}")
    ).unwrap();

    pub static ref TRANSFER_TAX: Regex = Regex::new(
        &format!(r"Sähkövero.* (\d*,\d\d) {CURRENCY}")
    ).unwrap();

    // Energy retailer: every line carries its own date range
    pub static ref ENERGY_BASIC_PAY: Regex = Regex::new(
        &format!(r"perusmaksu ({DATE})-({DATE}).* (\d*,\d\d) {CURRENCY}")
    ).unwrap();

    pub static ref ENERGY_CONSUMPTION: Regex = Regex::new(
        &format!(r"energia ({DATE})-({DATE}) ([0-9 \u{{00a0}}]*) kWh (\d+,\d\d) c")
    ).unwrap();

    // Charging network: session header then its priced quantity line
    pub static ref CHARGING_SESSION: Regex = Regex::new(
        r"(\d{4}-\d{2}-\d{2} \d{2}:\d{2}) \((.*), (.*)kWh\)"
    ).unwrap();

    pub static ref CHARGING_QUANTITY: Regex = Regex::new(
        &format!(r"(\d+) (\d+,\d+) (\d+)% (\d+,\d+) {CURRENCY}")
    ).unwrap();
}
