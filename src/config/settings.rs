//! User settings for budget-ledger
//!
//! Holds the theme preference, display formats and report branding.

use std::path::PathBuf;

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::paths::LedgerPaths;
use crate::error::LedgerError;

/// Dark mode preference, persisted as `"enabled"` / `"disabled"`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Enabled,
    #[default]
    Disabled,
}

impl ThemePreference {
    pub fn is_dark(&self) -> bool {
        matches!(self, Self::Enabled)
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::Enabled => Self::Disabled,
            Self::Disabled => Self::Enabled,
        }
    }

    pub fn from_dark(dark: bool) -> Self {
        if dark {
            Self::Enabled
        } else {
            Self::Disabled
        }
    }
}

impl std::fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Enabled => write!(f, "dark"),
            Self::Disabled => write!(f, "light"),
        }
    }
}

/// Branding used when rendering monthly reports
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSettings {
    #[serde(default = "default_report_title")]
    pub title: String,

    /// Prefix of generated file names: `{prefix}_Report_{Month}_{Year}`
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,

    /// Image embedded in HTML reports
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_path: Option<PathBuf>,
}

fn default_report_title() -> String {
    "Infinity Expense Tracker".to_string()
}

fn default_file_prefix() -> String {
    "Infinity".to_string()
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            title: default_report_title(),
            file_prefix: default_file_prefix(),
            author: None,
            tagline: None,
            logo_path: None,
        }
    }
}

/// User settings for budget-ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    #[serde(default, alias = "darkMode")]
    pub theme: ThemePreference,

    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format for tables and reports (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    #[serde(default)]
    pub report: ReportSettings,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "₹".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            theme: ThemePreference::default(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            report: ReportSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &LedgerPaths) -> Result<Self, LedgerError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                LedgerError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                LedgerError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    pub fn save(&self, paths: &LedgerPaths) -> Result<(), LedgerError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            LedgerError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| LedgerError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Format a date with the configured format
    ///
    /// An unusable format string falls back to ISO dates.
    pub fn format_date(&self, date: NaiveDate) -> String {
        let items: Vec<Item<'_>> = StrftimeItems::new(&self.date_format).collect();
        if items.is_empty() || items.iter().any(|item| matches!(item, Item::Error)) {
            return date.format("%Y-%m-%d").to_string();
        }
        date.format_with_items(items.into_iter()).to_string()
    }
}
