//! General settings storage.
//!
//! One settings record shared by every session, held in memory for the
//! lifetime of the process.

use std::sync::RwLock;

use super::RepositoryError;

/// A selectable option: form value and label.
pub type SettingOption = (&'static str, &'static str);

/// Timezones offered on the settings screen.
pub const TIMEZONES: &[SettingOption] = &[
    ("utc-12", "UTC-12:00"),
    ("utc-8", "UTC-08:00 (Pacific Time)"),
    ("utc-5", "UTC-05:00 (Eastern Time)"),
    ("utc-4", "UTC-04:00 (Atlantic Time)"),
    ("utc-0", "UTC+00:00 (GMT)"),
    ("utc+1", "UTC+01:00 (Central European Time)"),
    ("utc+8", "UTC+08:00 (China Standard Time)"),
];

/// Date formats offered on the settings screen.
pub const DATE_FORMATS: &[SettingOption] = &[
    ("mm-dd-yyyy", "MM/DD/YYYY"),
    ("dd-mm-yyyy", "DD/MM/YYYY"),
    ("yyyy-mm-dd", "YYYY/MM/DD"),
];

/// Currencies offered on the settings screen.
pub const CURRENCIES: &[SettingOption] = &[
    ("usd", "USD ($)"),
    ("eur", "EUR (€)"),
    ("gbp", "GBP (£)"),
    ("jpy", "JPY (¥)"),
    ("cny", "CNY (¥)"),
];

/// Themes offered on the settings screen.
pub const THEMES: &[SettingOption] = &[("light", "Light"), ("dark", "Dark"), ("system", "System")];

/// Inclusive bounds of the low-stock alert threshold.
pub const LOW_STOCK_THRESHOLD_RANGE: std::ops::RangeInclusive<u32> = 1..=1000;

/// Console-wide settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneralSettings {
    pub company_name: String,
    pub timezone: String,
    pub date_format: String,
    pub currency: String,
    pub theme: String,
    /// Items with fewer units than this are reported as low stock.
    pub low_stock_threshold: u32,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            company_name: "Acme Corporation".to_string(),
            timezone: "utc-5".to_string(),
            date_format: "mm-dd-yyyy".to_string(),
            currency: "usd".to_string(),
            theme: "system".to_string(),
            low_stock_threshold: 10,
        }
    }
}

/// Shared settings store.
#[derive(Debug, Default)]
pub struct SettingsStore {
    current: RwLock<GeneralSettings>,
}

impl SettingsStore {
    #[must_use]
    pub fn new(settings: GeneralSettings) -> Self {
        Self {
            current: RwLock::new(settings),
        }
    }

    /// Current settings.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Poisoned` if a writer panicked.
    pub fn get(&self) -> Result<GeneralSettings, RepositoryError> {
        self.current
            .read()
            .map(|s| s.clone())
            .map_err(|_| RepositoryError::Poisoned)
    }

    /// Replace the settings.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Poisoned` if a writer panicked.
    pub fn update(&self, settings: GeneralSettings) -> Result<(), RepositoryError> {
        let mut current = self.current.write().map_err(|_| RepositoryError::Poisoned)?;
        *current = settings;
        tracing::info!("general settings updated");
        Ok(())
    }
}

/// Whether `value` is one of `options`.
#[must_use]
pub fn is_option(options: &[SettingOption], value: &str) -> bool {
    options.iter().any(|(v, _)| *v == value)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid_options() {
        let settings = GeneralSettings::default();
        assert!(is_option(TIMEZONES, &settings.timezone));
        assert!(is_option(DATE_FORMATS, &settings.date_format));
        assert!(is_option(CURRENCIES, &settings.currency));
        assert!(is_option(THEMES, &settings.theme));
        assert!(LOW_STOCK_THRESHOLD_RANGE.contains(&settings.low_stock_threshold));
    }

    #[test]
    fn test_update_replaces_settings() {
        let store = SettingsStore::default();
        let updated = GeneralSettings {
            company_name: "Globex".to_string(),
            low_stock_threshold: 25,
            ..GeneralSettings::default()
        };
        store.update(updated.clone()).unwrap();
        assert_eq!(store.get().unwrap(), updated);
    }
}
