//! Rule-based field extraction for Finnish invoices.

pub mod amounts;
pub mod classifier;
pub mod dates;
pub mod patterns;

pub use amounts::{
    derive_kwh, parse_cents, parse_decimal, parse_fi_amount, parse_grouped_integer, parse_percent,
};
pub use classifier::{FieldKind, LineClassifier, LineMatch, LinePattern};
pub use dates::{parse_short_date, period_label, resolve_period};
pub use patterns::*;
