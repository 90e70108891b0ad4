//! Configuration module for budget-ledger
//!
//! This module provides configuration management including:
//! - Data directory resolution
//! - User settings persistence (theme, formats, report branding)

pub mod paths;
pub mod settings;

pub use paths::LedgerPaths;
pub use settings::{ReportSettings, Settings, ThemePreference};
