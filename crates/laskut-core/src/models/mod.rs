//! Data models.

pub mod charging;
pub mod config;
pub mod period;

pub use charging::{ChargingMonth, ChargingSession};
pub use config::LaskutConfig;
pub use period::{Kwh, PeriodKey, PeriodMapping, PeriodRecord, TariffLine};
