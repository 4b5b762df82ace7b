//! Configuration structures for the invoice pipeline.

use serde::{Deserialize, Serialize};

use crate::error::LaskutError;
use crate::locale::{Language, Locale};

/// Keys accepted by [`LaskutConfig::get_value`] and [`LaskutConfig::set_value`].
pub const CONFIG_KEYS: [&str; 4] = [
    "locale.language",
    "pages.transfer_page",
    "pages.energy_page",
    "output.indeterminate_marker",
];

/// Main configuration for the laskut pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaskutConfig {
    /// Report language.
    pub locale: LocaleConfig,

    /// Which pages carry the billing lines.
    pub pages: PageConfig,

    /// Report formatting.
    pub output: OutputConfig,
}

/// Report language configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleConfig {
    /// Language of month labels and column headers.
    pub language: Language,
}

/// Page selection per provider (1-indexed).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Transfer-utility invoice page with the monthly breakdown.
    pub transfer_page: u32,

    /// Energy-retailer invoice page with the energy lines.
    pub energy_page: u32,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            transfer_page: 2,
            energy_page: 2,
        }
    }
}

/// Report formatting configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Cell text for a kWh figure that could not be derived (zero unit price).
    pub indeterminate_marker: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            indeterminate_marker: "n/a".to_string(),
        }
    }
}

impl LaskutConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Current value of a dotted configuration key.
    pub fn get_value(&self, key: &str) -> Result<String, LaskutError> {
        match key {
            "locale.language" => Ok(self.locale.language.code().to_string()),
            "pages.transfer_page" => Ok(self.pages.transfer_page.to_string()),
            "pages.energy_page" => Ok(self.pages.energy_page.to_string()),
            "output.indeterminate_marker" => Ok(self.output.indeterminate_marker.clone()),
            _ => Err(unknown_key(key)),
        }
    }

    /// Set a dotted configuration key from its text form.
    ///
    /// Page numbers are 1-indexed; zero is rejected.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), LaskutError> {
        match key {
            "locale.language" => self.locale.language = value.parse()?,
            "pages.transfer_page" => self.pages.transfer_page = parse_page(key, value)?,
            "pages.energy_page" => self.pages.energy_page = parse_page(key, value)?,
            "output.indeterminate_marker" => self.output.indeterminate_marker = value.to_string(),
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }

    /// Locale tables for the configured language.
    pub fn locale(&self) -> Locale {
        Locale::for_language(self.locale.language)
    }
}

fn parse_page(key: &str, value: &str) -> Result<u32, LaskutError> {
    match value.trim().parse::<u32>() {
        Ok(page) if page >= 1 => Ok(page),
        _ => Err(LaskutError::Config(format!(
            "{} must be a page number starting from 1, got {:?}",
            key, value
        ))),
    }
}

fn unknown_key(key: &str) -> LaskutError {
    LaskutError::Config(format!(
        "unknown configuration key: {} (expected one of {})",
        key,
        CONFIG_KEYS.join(", ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: LaskutConfig =
            serde_json::from_str(r#"{ "pages": { "transfer_page": 3 } }"#).unwrap();

        assert_eq!(config.pages.transfer_page, 3);
        assert_eq!(config.pages.energy_page, 2);
        assert_eq!(config.locale.language, Language::Fi);
        assert_eq!(config.output.indeterminate_marker, "n/a");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        let mut config = LaskutConfig::default();
        config.locale.language = Language::En;
        config.save(&path).unwrap();

        let loaded = LaskutConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.locale().month_label(2), "February");
    }

    #[test]
    fn test_set_and_get_values() {
        let mut config = LaskutConfig::default();
        config.set_value("locale.language", "English").unwrap();
        config.set_value("pages.energy_page", "3").unwrap();
        config.set_value("output.indeterminate_marker", "-").unwrap();

        assert_eq!(config.get_value("locale.language").unwrap(), "en");
        assert_eq!(config.get_value("pages.energy_page").unwrap(), "3");
        assert_eq!(config.get_value("pages.transfer_page").unwrap(), "2");
        assert_eq!(config.get_value("output.indeterminate_marker").unwrap(), "-");
    }

    #[test]
    fn test_set_value_rejects_bad_input() {
        let mut config = LaskutConfig::default();

        for (key, value) in [
            ("pages.transfer_page", "0"),
            ("pages.transfer_page", "-1"),
            ("pages.energy_page", "two"),
            ("locale.language", "sv"),
            ("pages", "2"),
        ] {
            let err = config.set_value(key, value).unwrap_err();
            assert!(matches!(err, LaskutError::Config(_)), "{} = {}", key, value);
        }
        assert_eq!(config, LaskutConfig::default());
        assert!(config.get_value("locale").is_err());
    }
}
