//! CLI commands for the colour theme

use clap::Subcommand;

use crate::config::paths::LedgerPaths;
use crate::config::settings::{Settings, ThemePreference};
use crate::error::LedgerResult;

/// Theme subcommands
#[derive(Subcommand, Debug, Clone, Copy)]
pub enum ThemeCommands {
    /// Show the current theme
    Show,
    /// Switch to the dark theme
    On,
    /// Switch to the light theme
    Off,
    /// Switch between dark and light
    Toggle,
}

/// Handle theme commands, persisting any change
pub fn handle_theme_command(
    paths: &LedgerPaths,
    settings: &mut Settings,
    cmd: ThemeCommands,
) -> LedgerResult<()> {
    let next = match cmd {
        ThemeCommands::Show => {
            println!("Theme: {}", settings.theme);
            return Ok(());
        }
        ThemeCommands::On => ThemePreference::Enabled,
        ThemeCommands::Off => ThemePreference::Disabled,
        ThemeCommands::Toggle => settings.theme.toggled(),
    };

    settings.theme = next;
    settings.save(paths)?;
    println!("Theme set to {}", next);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_toggle_persists() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut settings = Settings::default();

        handle_theme_command(&paths, &mut settings, ThemeCommands::Toggle).unwrap();
        assert!(settings.theme.is_dark());
        assert!(Settings::load_or_create(&paths).unwrap().theme.is_dark());

        handle_theme_command(&paths, &mut settings, ThemeCommands::Off).unwrap();
        assert!(!Settings::load_or_create(&paths).unwrap().theme.is_dark());
    }

    #[test]
    fn test_show_does_not_write() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut settings = Settings::default();

        handle_theme_command(&paths, &mut settings, ThemeCommands::Show).unwrap();
        assert!(!paths.settings_file().exists());
    }
}
