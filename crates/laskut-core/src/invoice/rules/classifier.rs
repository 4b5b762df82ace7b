//! Per-line field classification.

use regex::{Captures, Regex};

/// Kinds of billing lines the provider grammars recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Opens a billing period (transfer utility).
    DateRange,
    BasicPay,
    DayTransfer,
    NightTransfer,
    Tax,
    /// Retailer energy consumption and price.
    Energy,
    /// Charging session start, duration and energy.
    ChargingSession,
    /// Charging session quantity, price, VAT and amount.
    ChargingQuantity,
}

/// A field kind and the pattern that recognizes it.
#[derive(Debug, Clone)]
pub struct LinePattern {
    pub kind: FieldKind,
    pub regex: &'static Regex,
}

/// A classified line.
#[derive(Debug)]
pub struct LineMatch<'t> {
    pub kind: FieldKind,
    captures: Captures<'t>,
}

impl<'t> LineMatch<'t> {
    /// Text of capture group `index`, empty if the group did not take part.
    pub fn group(&self, index: usize) -> &'t str {
        self.captures.get(index).map_or("", |m| m.as_str())
    }
}

/// Matches lines against an ordered pattern list.
///
/// The first matching pattern wins; a line matching nothing is ignored.
#[derive(Debug, Clone)]
pub struct LineClassifier {
    patterns: Vec<LinePattern>,
}

impl LineClassifier {
    pub fn new(patterns: impl IntoIterator<Item = (FieldKind, &'static Regex)>) -> Self {
        Self {
            patterns: patterns
                .into_iter()
                .map(|(kind, regex)| LinePattern { kind, regex })
                .collect(),
        }
    }

    pub fn classify<'t>(&self, line: &'t str) -> Option<LineMatch<'t>> {
        self.patterns.iter().find_map(|pattern| {
            pattern.regex.captures(line).map(|captures| LineMatch {
                kind: pattern.kind,
                captures,
            })
        })
    }

    pub fn patterns(&self) -> &[LinePattern] {
        &self.patterns
    }
}
