//! Theme selection and tile colors for the gallery.

use crate::config::ThemeMode;
use iced::{Color, Theme as IcedTheme};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl From<ThemeMode> for Theme {
    fn from(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Night => Theme::Dark,
            ThemeMode::Day => Theme::Light,
        }
    }
}

impl From<Theme> for IcedTheme {
    fn from(theme: Theme) -> Self {
        match theme {
            Theme::Light => IcedTheme::Light,
            Theme::Dark => IcedTheme::Dark,
        }
    }
}

impl Theme {
    /// Fill of a placeholder tile.
    pub fn skeleton(self) -> Color {
        match self {
            Theme::Light => Color::from_rgb(0.86, 0.86, 0.88),
            Theme::Dark => Color::from_rgb(0.22, 0.22, 0.25),
        }
    }

    pub fn card(self) -> Color {
        match self {
            Theme::Light => Color::from_rgb(0.97, 0.96, 0.94),
            Theme::Dark => Color::from_rgb(0.15, 0.15, 0.17),
        }
    }

    pub fn card_border(self) -> Color {
        match self {
            Theme::Light => Color::from_rgba(0.0, 0.0, 0.0, 0.12),
            Theme::Dark => Color::from_rgba(1.0, 1.0, 1.0, 0.10),
        }
    }

    pub fn error_banner(self) -> Color {
        match self {
            Theme::Light => Color::from_rgb(0.93, 0.78, 0.76),
            Theme::Dark => Color::from_rgb(0.45, 0.16, 0.16),
        }
    }
}
