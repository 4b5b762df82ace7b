//! Language tables for period labels and report headers.

use serde::{Deserialize, Serialize};

use crate::error::LaskutError;

/// Supported report languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Fi,
    En,
}

impl Language {
    /// Short code as written in the config file.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Fi => "fi",
            Self::En => "en",
        }
    }
}

impl std::str::FromStr for Language {
    type Err = LaskutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fi" | "fi-fi" | "finnish" => Ok(Self::Fi),
            "en" | "en-gb" | "en-us" | "english" => Ok(Self::En),
            other => Err(LaskutError::Config(format!("unsupported language: {}", other))),
        }
    }
}

/// Conventions of one language.
///
/// Month names are stored in their full "format" form, which in Finnish is the
/// partitive (`tammikuuta`); the inflection suffix is stripped to get the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locale {
    language: Language,
    month_names: [&'static str; 12],
    inflection_suffix: &'static str,
    period_header: [&'static str; 12],
    charging_header: [&'static str; 6],
}

const FI_MONTHS: [&str; 12] = [
    "tammikuuta",
    "helmikuuta",
    "maaliskuuta",
    "huhtikuuta",
    "toukokuuta",
    "kesäkuuta",
    "heinäkuuta",
    "elokuuta",
    "syyskuuta",
    "lokakuuta",
    "marraskuuta",
    "joulukuuta",
];

const EN_MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

impl Locale {
    pub fn finnish() -> Self {
        Self {
            language: Language::Fi,
            month_names: FI_MONTHS,
            inflection_suffix: "ta",
            period_header: [
                "Kuukausi",
                "Perusmaksu (energia)",
                "Perusmaksu (siirto)",
                "Päiväenergia (kWh)",
                "Päiväenergia (EUR)",
                "Yöenergia (kWh)",
                "Yöenergia (EUR)",
                "Päiväsiirto (kWh)",
                "Päiväsiirto (EUR)",
                "Yösiirto (kWh)",
                "Yösiirto (EUR)",
                "Vero",
            ],
            charging_header: [
                "Vuosi",
                "Kuukausi",
                "Latauksia",
                "Perusmaksu(€)",
                "Total(€)",
                "Energia(kwh)",
            ],
        }
    }

    pub fn english() -> Self {
        Self {
            language: Language::En,
            month_names: EN_MONTHS,
            inflection_suffix: "",
            period_header: [
                "Month",
                "Basic pay (energy)",
                "Basic pay (transfer)",
                "Day energy (kWh)",
                "Day energy (EUR)",
                "Night energy (kWh)",
                "Night energy (EUR)",
                "Day transfer (kWh)",
                "Day transfer (EUR)",
                "Night transfer (kWh)",
                "Night transfer (EUR)",
                "Tax",
            ],
            charging_header: [
                "Year",
                "Month",
                "Charges",
                "Unit price(€)",
                "Total(€)",
                "Energy(kWh)",
            ],
        }
    }

    pub fn for_language(language: Language) -> Self {
        match language {
            Language::Fi => Self::finnish(),
            Language::En => Self::english(),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Display label of a calendar month (1-12), e.g. `Tammikuu`.
    ///
    /// Returns an empty string for a month outside 1..=12.
    pub fn month_label(&self, month: u32) -> String {
        let Some(name) = month
            .checked_sub(1)
            .and_then(|i| self.month_names.get(i as usize))
        else {
            return String::new();
        };

        let stem = name.strip_suffix(self.inflection_suffix).unwrap_or(name);
        capitalize(stem)
    }

    /// Column names of the twelve-column period report.
    pub fn period_header(&self) -> &[&'static str; 12] {
        &self.period_header
    }

    /// Column names of the charging report.
    pub fn charging_header(&self) -> &[&'static str; 6] {
        &self.charging_header
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::finnish()
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
