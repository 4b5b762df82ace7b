//! Combining transfer-utility and energy-retailer periods into report rows.
//!
//! The retailer bills one undivided energy figure per month. It is split into
//! day and night shares with the transfer utility's figures for the same
//! month:
//!
//! ```text
//! day_energy   = total_energy - night_transfer_kwh
//! night_energy = total_energy - day_transfer_kwh
//! ```
//!
//! When the transfer side is missing for a month both shares equal the total.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ParseError;
use crate::models::period::{PeriodKey, PeriodMapping, PeriodRecord};

use super::rules::{YEAR_MONTH, parse_grouped_integer};

/// Day and night transfer kWh of one month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferSplit {
    pub day_kwh: i64,
    pub night_kwh: i64,
}

impl TransferSplit {
    /// Split taken from a parsed transfer record; indeterminate kWh count as zero.
    pub fn of(record: &PeriodRecord) -> Self {
        Self {
            day_kwh: record.transfer_day.kwh.or_zero(),
            night_kwh: record.transfer_night.kwh.or_zero(),
        }
    }
}

/// One report row: both providers' records for a month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedRecord {
    pub period: PeriodKey,
    pub energy: PeriodRecord,
    pub transfer: PeriodRecord,
}

/// Apply a transfer split to a retailer record.
///
/// Fails when a share or its price does not fit the number types.
pub fn apportion(energy: &mut PeriodRecord, split: TransferSplit) -> Result<(), ParseError> {
    let total = energy.total_energy_kwh;
    let price = energy.energy_unit_price;

    let day_kwh = total
        .checked_sub(split.night_kwh)
        .ok_or_else(|| overflow("day energy kWh", format!("{} - {}", total, split.night_kwh)))?;
    let night_kwh = total
        .checked_sub(split.day_kwh)
        .ok_or_else(|| overflow("night energy kWh", format!("{} - {}", total, split.day_kwh)))?;
    let day_eur = Decimal::from(day_kwh)
        .checked_mul(price)
        .ok_or_else(|| overflow("day energy EUR", format!("{} * {}", day_kwh, price)))?;
    let night_eur = Decimal::from(night_kwh)
        .checked_mul(price)
        .ok_or_else(|| overflow("night energy EUR", format!("{} * {}", night_kwh, price)))?;

    energy.day_energy_kwh = day_kwh;
    energy.night_energy_kwh = night_kwh;
    energy.day_energy_eur = day_eur;
    energy.night_energy_eur = night_eur;
    Ok(())
}

fn overflow(field: &'static str, value: String) -> ParseError {
    ParseError::Number { field, value }
}

/// Union of both mappings in calendar order, with the retailer energy apportioned.
///
/// A month missing on one side gets a zeroed record for that side. Only months
/// the retailer billed are apportioned.
pub fn merge(
    transfer: &PeriodMapping,
    energy: &PeriodMapping,
) -> Result<Vec<MergedRecord>, ParseError> {
    let keys: BTreeSet<PeriodKey> = transfer.keys().chain(energy.keys()).copied().collect();

    keys.into_iter()
        .map(|period| {
            let transfer_record = transfer.get(&period).cloned().unwrap_or_default();
            let energy_record = match energy.get(&period) {
                Some(record) => {
                    let mut record = record.clone();
                    apportion(&mut record, TransferSplit::of(&transfer_record))?;
                    record
                }
                None => PeriodRecord::default(),
            };

            if !transfer.contains_key(&period) || !energy.contains_key(&period) {
                debug!("Period {} is present on one side only", period);
            }

            Ok(MergedRecord {
                period,
                energy: energy_record,
                transfer: transfer_record,
            })
        })
        .collect()
}

/// Rows of a transfer-only report.
pub fn transfer_rows(transfer: &PeriodMapping) -> Vec<MergedRecord> {
    transfer
        .iter()
        .map(|(period, record)| MergedRecord {
            period: *period,
            energy: PeriodRecord::default(),
            transfer: record.clone(),
        })
        .collect()
}

/// Rows of an energy-only report, apportioned with manually supplied splits.
///
/// The transfer columns stay empty; months without a split get the
/// degenerate full-total split.
pub fn energy_rows(
    energy: &PeriodMapping,
    splits: &BTreeMap<PeriodKey, TransferSplit>,
) -> Result<Vec<MergedRecord>, ParseError> {
    energy
        .iter()
        .map(|(period, record)| {
            let mut record = record.clone();
            apportion(&mut record, splits.get(period).copied().unwrap_or_default())?;
            Ok(MergedRecord {
                period: *period,
                energy: record,
                transfer: PeriodRecord::default(),
            })
        })
        .collect()
}

/// Parse `yyyy-mm:kwh` pairs separated by commas, e.g. `2023-01:937,2023-02:920`.
///
/// Quantities are unsigned.
pub fn parse_kwh_list(s: &str) -> Result<BTreeMap<PeriodKey, i64>, ParseError> {
    let mut values = BTreeMap::new();

    for item in s.split(',').map(str::trim).filter(|item| !item.is_empty()) {
        let (key, kwh) = item.split_once(':').ok_or_else(|| ParseError::Number {
            field: "transfer kWh list",
            value: item.to_string(),
        })?;

        let caps = YEAR_MONTH
            .captures(key.trim())
            .ok_or_else(|| ParseError::Date(key.to_string()))?;
        let year = caps[1].parse().map_err(|_| ParseError::Date(key.to_string()))?;
        let month = caps[2].parse().map_err(|_| ParseError::Date(key.to_string()))?;
        let period =
            PeriodKey::new(year, month).ok_or_else(|| ParseError::Date(key.to_string()))?;

        let kwh = kwh.trim();
        if kwh.starts_with(['-', '+']) {
            return Err(ParseError::Number {
                field: "transfer kWh",
                value: kwh.to_string(),
            });
        }
        values.insert(period, parse_grouped_integer("transfer kWh", kwh)?);
    }

    Ok(values)
}

/// Combine day and night kWh lists into splits; a month missing from one list gets zero there.
pub fn splits_from_lists(
    day: &BTreeMap<PeriodKey, i64>,
    night: &BTreeMap<PeriodKey, i64>,
) -> BTreeMap<PeriodKey, TransferSplit> {
    day.keys()
        .chain(night.keys())
        .map(|period| {
            let split = TransferSplit {
                day_kwh: day.get(period).copied().unwrap_or(0),
                night_kwh: night.get(period).copied().unwrap_or(0),
            };
            (*period, split)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invoice::{EnergyParser, ProviderParser};
    use crate::models::period::{Kwh, TariffLine};
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    const JAN: PeriodKey = PeriodKey { year: 2023, month: 1 };
    const FEB: PeriodKey = PeriodKey { year: 2023, month: 2 };
    const MAR: PeriodKey = PeriodKey { year: 2023, month: 3 };

    fn tariff(unit_price: &str, total: &str, kwh: i64) -> TariffLine {
        TariffLine {
            unit_price: dec(unit_price),
            total: dec(total),
            kwh: Kwh::Value(kwh),
        }
    }

    fn transfer_record(day: i64, night: i64) -> PeriodRecord {
        PeriodRecord {
            basic_pay: dec("10.00"),
            transfer_day: tariff("0.05", "50.00", day),
            transfer_night: tariff("0.03", "24.00", night),
            tax: dec("7.50"),
            ..Default::default()
        }
    }

    fn energy_record(total: i64, price: &str) -> PeriodRecord {
        PeriodRecord {
            basic_pay: dec("4.90"),
            total_energy_kwh: total,
            energy_unit_price: dec(price),
            ..Default::default()
        }
    }

    #[test]
    fn test_subtraction_apportionment() {
        let transfer = PeriodMapping::from([(JAN, transfer_record(1000, 800))]);
        let energy = PeriodMapping::from([(JAN, energy_record(2000, "0.10"))]);

        let rows = merge(&transfer, &energy).unwrap();
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.energy.day_energy_kwh, 1200);
        assert_eq!(row.energy.night_energy_kwh, 1000);
        assert_eq!(row.energy.day_energy_eur, dec("120.00"));
        assert_eq!(row.energy.night_energy_eur, dec("100.00"));
        assert_eq!(row.transfer, transfer_record(1000, 800));
    }

    #[test]
    fn test_union_of_keys_with_zeroed_counterparts() {
        let transfer = PeriodMapping::from([
            (JAN, transfer_record(1000, 800)),
            (FEB, transfer_record(900, 700)),
        ]);
        let energy = PeriodMapping::from([
            (FEB, energy_record(1500, "0.10")),
            (MAR, energy_record(1200, "0.10")),
        ]);

        let rows = merge(&transfer, &energy).unwrap();
        let periods: Vec<PeriodKey> = rows.iter().map(|r| r.period).collect();
        assert_eq!(periods, vec![JAN, FEB, MAR]);

        // January: transfer only, energy side all zero
        assert_eq!(rows[0].energy, PeriodRecord::default());

        // March: energy only, degenerate full-total split
        assert_eq!(rows[2].transfer, PeriodRecord::default());
        assert_eq!(rows[2].energy.day_energy_kwh, 1200);
        assert_eq!(rows[2].energy.night_energy_kwh, 1200);
    }

    #[test]
    fn test_merge_is_key_symmetric() {
        let a = PeriodMapping::from([(JAN, transfer_record(1, 1))]);
        let b = PeriodMapping::from([(MAR, energy_record(5, "0.10"))]);

        let periods = |rows: Vec<MergedRecord>| -> BTreeSet<PeriodKey> {
            rows.iter().map(|r| r.period).collect()
        };
        let forward = periods(merge(&a, &b).unwrap());
        let backward = periods(merge(&b, &a).unwrap());
        assert_eq!(forward, backward);
        assert_eq!(forward, BTreeSet::from([JAN, MAR]));
    }

    #[test]
    fn test_indeterminate_transfer_counts_as_zero() {
        let mut record = transfer_record(1000, 0);
        record.transfer_night.kwh = Kwh::Indeterminate;
        assert_eq!(
            TransferSplit::of(&record),
            TransferSplit { day_kwh: 1000, night_kwh: 0 }
        );
    }

    #[test]
    fn test_energy_rows_with_supplied_splits() {
        let energy = PeriodMapping::from([
            (JAN, energy_record(2000, "0.10")),
            (FEB, energy_record(1000, "0.10")),
        ]);
        let splits = BTreeMap::from([(JAN, TransferSplit { day_kwh: 937, night_kwh: 920 })]);

        let rows = energy_rows(&energy, &splits).unwrap();
        assert_eq!(rows[0].energy.day_energy_kwh, 2000 - 920);
        assert_eq!(rows[0].energy.night_energy_kwh, 2000 - 937);
        assert_eq!(rows[0].transfer, PeriodRecord::default());
        assert_eq!(rows[1].energy.day_energy_kwh, 1000);
    }

    #[test]
    fn test_transfer_rows_leave_energy_empty() {
        let transfer = PeriodMapping::from([(JAN, transfer_record(1000, 800))]);
        let rows = transfer_rows(&transfer);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].energy, PeriodRecord::default());
        assert_eq!(rows[0].transfer, transfer_record(1000, 800));
    }

    #[test]
    fn test_oversized_energy_line_fails_instead_of_panicking() {
        let line = "energia 1.1.2023-31.1.2023 9000000000000000000 kWh 9999999999999999999,00 c";
        let energy = EnergyParser::new().parse_text(line).unwrap();
        assert_eq!(energy[&JAN].total_energy_kwh, 9_000_000_000_000_000_000);

        let err = merge(&PeriodMapping::new(), &energy).unwrap_err();
        assert!(matches!(err, ParseError::Number { field: "day energy EUR", .. }));

        let err = energy_rows(&energy, &BTreeMap::new()).unwrap_err();
        assert!(matches!(err, ParseError::Number { .. }));
    }

    #[test]
    fn test_share_underflow_is_an_error() {
        let mut record = energy_record(i64::MIN, "0.10");
        let split = TransferSplit { day_kwh: 0, night_kwh: 1 };
        assert!(matches!(
            apportion(&mut record, split),
            Err(ParseError::Number { field: "day energy kWh", .. })
        ));
        // record untouched on failure
        assert_eq!(record.day_energy_kwh, 0);
    }

    #[test]
    fn test_parse_kwh_lists() {
        let day = parse_kwh_list("2023-01:937, 2023-2:900").unwrap();
        let night = parse_kwh_list("2023-01:920").unwrap();
        assert_eq!(day[&FEB], 900);

        let splits = splits_from_lists(&day, &night);
        assert_eq!(splits[&JAN], TransferSplit { day_kwh: 937, night_kwh: 920 });
        assert_eq!(splits[&FEB], TransferSplit { day_kwh: 900, night_kwh: 0 });

        assert!(parse_kwh_list("").unwrap().is_empty());
        assert!(matches!(parse_kwh_list("Tammikuu:937"), Err(ParseError::Date(_))));
        assert!(matches!(parse_kwh_list("2023-13:1"), Err(ParseError::Date(_))));
        assert!(parse_kwh_list("2023-01").is_err());
    }

    #[test]
    fn test_signed_kwh_is_rejected() {
        for list in ["2023-01:-500", "2023-01: -500", "2023-01:+500"] {
            assert!(
                matches!(
                    parse_kwh_list(list),
                    Err(ParseError::Number { field: "transfer kWh", .. })
                ),
                "{list}"
            );
        }
    }
}
