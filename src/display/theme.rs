//! Terminal colours
//!
//! The palette mirrors the report branding. Which colour the balance gets
//! depends on the theme and on whether the month is in deficit.

use crossterm::style::{style, Color, Stylize};
use crossterm::tty::IsTty;

use crate::config::ThemePreference;
use crate::models::Money;

pub const PRIMARY: Color = Color::Rgb {
    r: 0x2A,
    g: 0x9D,
    b: 0x8F,
};

pub const SECONDARY: Color = Color::Rgb {
    r: 0x26,
    g: 0x46,
    b: 0x53,
};

pub const ACCENT: Color = Color::Rgb {
    r: 0xE9,
    g: 0xC4,
    b: 0x6A,
};

pub const DANGER: Color = Color::Rgb {
    r: 0xE7,
    g: 0x6F,
    b: 0x51,
};

/// How terminal output should be coloured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub theme: ThemePreference,
    /// Emit ANSI colour codes at all
    pub colored: bool,
}

impl Palette {
    pub fn new(theme: ThemePreference, colored: bool) -> Self {
        Self { theme, colored }
    }

    /// Colour only when stdout is a terminal
    pub fn for_stdout(theme: ThemePreference) -> Self {
        Self::new(theme, std::io::stdout().is_tty())
    }

    pub fn plain() -> Self {
        Self::new(ThemePreference::default(), false)
    }

    pub fn balance_color(&self, balance: Money) -> Color {
        if balance.is_negative() {
            DANGER
        } else if self.theme.is_dark() {
            ACCENT
        } else {
            PRIMARY
        }
    }

    pub fn paint(&self, text: &str, color: Color) -> String {
        if self.colored {
            style(text).with(color).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn heading(&self, text: &str) -> String {
        if self.colored {
            let color = if self.theme.is_dark() { ACCENT } else { SECONDARY };
            style(text).with(color).bold().to_string()
        } else {
            text.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balance_color_follows_theme() {
        let dark = Palette::new(ThemePreference::Enabled, true);
        let light = Palette::new(ThemePreference::Disabled, true);

        assert_eq!(dark.balance_color(Money::from_cents(100)), ACCENT);
        assert_eq!(light.balance_color(Money::from_cents(100)), PRIMARY);
        assert_eq!(light.balance_color(Money::zero()), PRIMARY);
    }

    #[test]
    fn test_negative_balance_is_danger_in_both_themes() {
        let negative = Money::from_cents(-1);
        assert_eq!(
            Palette::new(ThemePreference::Enabled, true).balance_color(negative),
            DANGER
        );
        assert_eq!(
            Palette::new(ThemePreference::Disabled, true).balance_color(negative),
            DANGER
        );
    }

    #[test]
    fn test_plain_palette_emits_no_escapes() {
        let palette = Palette::plain();
        assert_eq!(palette.paint("10.00", DANGER), "10.00");
        assert_eq!(palette.heading("March 2024"), "March 2024");
    }

    #[test]
    fn test_colored_paint_wraps_text() {
        let palette = Palette::new(ThemePreference::Disabled, true);
        let painted = palette.paint("10.00", PRIMARY);
        assert!(painted.contains("10.00"));
        assert!(painted.contains('\x1b'));
    }
}
