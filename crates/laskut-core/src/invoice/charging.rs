//! Charging-network invoices: session lines grouped by month.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDateTime, NaiveTime, Timelike};
use rust_decimal::Decimal;
use tracing::{debug, info, trace};

use crate::document::PageSelection;
use crate::error::{ParseError, Result};
use crate::models::charging::{ChargingMonth, ChargingSession};
use crate::models::period::PeriodKey;

use super::rules::{
    CHARGING_QUANTITY, CHARGING_SESSION, FieldKind, LineClassifier, parse_decimal, parse_percent,
};
use super::{Provider, ProviderParser};

/// Sessions of a charging invoice by month.
pub type ChargingSessions = BTreeMap<PeriodKey, Vec<ChargingSession>>;

/// Session header waiting for its quantity line.
struct PendingSession {
    started_at: NaiveDateTime,
    duration: Duration,
    kwh: Decimal,
}

/// Parser for the charging network's session listing.
///
/// Sessions span all pages; a header at the bottom of one page is completed
/// by the quantity line at the top of the next.
pub struct ChargingParser {
    classifier: LineClassifier,
}

impl ChargingParser {
    pub fn new() -> Self {
        Self {
            classifier: LineClassifier::new([
                (FieldKind::ChargingSession, &*CHARGING_SESSION),
                (FieldKind::ChargingQuantity, &*CHARGING_QUANTITY),
            ]),
        }
    }
}

impl Default for ChargingParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ProviderParser for ChargingParser {
    type Output = ChargingSessions;

    fn provider(&self) -> Provider {
        Provider::ChargingNetwork
    }

    fn pages(&self) -> PageSelection {
        PageSelection::All
    }

    fn parse_text(&self, text: &str) -> Result<ChargingSessions> {
        let mut sessions = ChargingSessions::new();
        let mut pending: Option<PendingSession> = None;

        for (index, line) in text.lines().enumerate() {
            let Some(m) = self.classifier.classify(line) else {
                trace!("Line {} matched no pattern", index + 1);
                continue;
            };

            match m.kind {
                FieldKind::ChargingSession => {
                    pending = Some(PendingSession {
                        started_at: parse_timestamp(m.group(1))?,
                        duration: parse_duration(m.group(2))?,
                        kwh: parse_decimal("session kWh", m.group(3))?,
                    });
                }
                FieldKind::ChargingQuantity => {
                    let Some(header) = pending.take() else {
                        trace!("Line {} has a quantity without a session", index + 1);
                        continue;
                    };

                    let quantity = m.group(1).parse().map_err(|_| ParseError::Number {
                        field: "session quantity",
                        value: m.group(1).to_string(),
                    })?;

                    let session = ChargingSession {
                        started_at: header.started_at,
                        duration: header.duration,
                        quantity,
                        unit_price: parse_decimal("session unit price", m.group(2))?,
                        tax_rate: parse_percent("session VAT", m.group(3))?,
                        amount_eur: parse_decimal("session amount", m.group(4))?,
                        kwh: header.kwh,
                    };

                    debug!("Session at {} filed under {}", session.started_at, session.period());
                    sessions.entry(session.period()).or_default().push(session);
                }
                _ => {}
            }
        }

        info!(
            "Parsed {} charging sessions over {} months",
            sessions.values().map(Vec::len).sum::<usize>(),
            sessions.len()
        );
        Ok(sessions)
    }
}

/// Fold each month's sessions into one aggregate, in calendar order.
pub fn summarize(
    sessions: &ChargingSessions,
) -> std::result::Result<Vec<ChargingMonth>, ParseError> {
    sessions
        .iter()
        .map(|(period, list)| {
            list.iter()
                .try_fold(ChargingMonth::empty(*period), |month, session| month.add(session))
        })
        .collect()
}

fn parse_timestamp(s: &str) -> std::result::Result<NaiveDateTime, ParseError> {
    NaiveDateTime::parse_from_str(s.trim(), "%Y-%m-%d %H:%M").map_err(|_| ParseError::Time {
        field: "session start",
        value: s.to_string(),
    })
}

fn parse_duration(s: &str) -> std::result::Result<Duration, ParseError> {
    let time = NaiveTime::parse_from_str(s.trim(), "%H:%M:%S").map_err(|_| ParseError::Time {
        field: "session duration",
        value: s.to_string(),
    })?;
    Ok(Duration::seconds(i64::from(time.num_seconds_from_midnight())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::error::LaskutError;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    const PAGE_ONE: &str = "\
Plugsurfing lasku
Aika Kesto Energia
2023-03-04 18:22 (01:15:30, 12.34kWh)
Latausmaksu
1 3,95 24% 3,95 €
2023-03-18 07:05 (00:45:00, 8.5kWh)
";

    const PAGE_TWO: &str = "\
Latausmaksu
2 2,50 10% 5,00 €
2023-04-02 12:00 (02:00:00, 20kWh)
1 4,00 24% 4,00 €
";

    #[test]
    fn test_sessions_span_pages() {
        let document = Document::from_pages(vec![PAGE_ONE.into(), PAGE_TWO.into()]);
        let sessions = ChargingParser::new().parse_document(&document).unwrap();

        let march = &sessions[&PeriodKey { year: 2023, month: 3 }];
        assert_eq!(march.len(), 2);
        assert_eq!(march[0].duration, Duration::seconds(4530));
        assert_eq!(march[0].kwh, dec("12.34"));
        assert_eq!(march[0].tax_rate, dec("0.24"));
        assert_eq!(march[1].quantity, 2);
        assert_eq!(march[1].amount_eur, dec("5.00"));
        assert_eq!(sessions[&PeriodKey { year: 2023, month: 4 }].len(), 1);
    }

    #[test]
    fn test_summarize_per_month() {
        let text = format!("{}\n{}", PAGE_ONE, PAGE_TWO);
        let sessions = ChargingParser::new().parse_text(&text).unwrap();
        let months = summarize(&sessions).unwrap();

        assert_eq!(months.len(), 2);
        let march = &months[0];
        assert_eq!(march.period, PeriodKey { year: 2023, month: 3 });
        assert_eq!(march.sessions, 2);
        assert_eq!(march.quantity, 3);
        assert_eq!(march.amount_eur, dec("8.95"));
        assert_eq!(march.kwh, dec("20.84"));
        assert_eq!(march.tax_rate, dec("0.24"));
        assert_eq!(march.duration, Duration::seconds(4530 + 2700));
        assert_eq!(march.unit_price().round_dp(2), dec("2.98"));
    }

    #[test]
    fn test_summarize_reports_overflowing_month() {
        let text = "\
2023-03-04 18:22 (01:15:30, 12.34kWh)
4294967295 3,95 24% 3,95 €
2023-03-05 18:22 (01:15:30, 12.34kWh)
1 3,95 24% 3,95 €
";
        let sessions = ChargingParser::new().parse_text(text).unwrap();
        assert!(matches!(
            summarize(&sessions),
            Err(ParseError::Number { field: "monthly quantity", .. })
        ));
    }

    #[test]
    fn test_quantity_without_session_is_ignored() {
        let sessions = ChargingParser::new()
            .parse_text("1 3,95 24% 3,95 €\n")
            .unwrap();
        assert!(sessions.is_empty());
    }

    #[test]
    fn test_session_without_quantity_is_dropped() {
        let sessions = ChargingParser::new()
            .parse_text("2023-03-04 18:22 (01:15:30, 12.34kWh)\n")
            .unwrap();
        assert!(sessions.is_empty());
    }

    #[test]
    fn test_bad_duration_aborts() {
        let err = ChargingParser::new()
            .parse_text("2023-03-04 18:22 (1 h 15 min, 12.34kWh)\n")
            .unwrap_err();
        assert!(matches!(
            err,
            LaskutError::Parse(ParseError::Time { field: "session duration", .. })
        ));
    }
}
