//! Theming for Jasper
//!
//! This module defines the color palettes for light and dark mode, converts
//! them into egui `Visuals`, and manages switching and application of themes
//! to the egui context.

mod dark;
mod light;
mod manager;

pub use dark::create_dark_visuals;
pub use light::create_light_visuals;
pub use manager::ThemeManager;

use crate::config::Theme;
use eframe::egui::{Color32, Visuals};

// ─────────────────────────────────────────────────────────────────────────────
// Theme Colors
// ─────────────────────────────────────────────────────────────────────────────

/// Base surface colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseColors {
    pub background: Color32,
    pub background_secondary: Color32,
    pub background_tertiary: Color32,
    pub border: Color32,
    pub border_subtle: Color32,
    pub hover: Color32,
    pub selected: Color32,
}

/// Text colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextColors {
    pub primary: Color32,
    pub secondary: Color32,
    pub muted: Color32,
}

/// Interactive/feedback colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UiColors {
    pub accent: Color32,
    pub accent_hover: Color32,
    pub warning: Color32,
    pub error: Color32,
    pub success: Color32,
}

/// Complete color palette for a theme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeColors {
    pub base: BaseColors,
    pub text: TextColors,
    pub ui: UiColors,
    dark: bool,
}

impl ThemeColors {
    /// The dark palette.
    pub fn dark() -> Self {
        Self {
            base: BaseColors {
                background: Color32::from_rgb(30, 30, 34),
                background_secondary: Color32::from_rgb(38, 38, 43),
                background_tertiary: Color32::from_rgb(24, 24, 28),
                border: Color32::from_rgb(70, 70, 80),
                border_subtle: Color32::from_rgb(50, 50, 58),
                hover: Color32::from_rgb(52, 52, 60),
                selected: Color32::from_rgb(45, 70, 100),
            },
            text: TextColors {
                primary: Color32::from_rgb(220, 220, 225),
                secondary: Color32::from_rgb(170, 170, 178),
                muted: Color32::from_rgb(130, 130, 140),
            },
            ui: UiColors {
                accent: Color32::from_rgb(100, 180, 255),
                accent_hover: Color32::from_rgb(130, 195, 255),
                warning: Color32::from_rgb(230, 170, 80),
                error: Color32::from_rgb(235, 100, 100),
                success: Color32::from_rgb(120, 200, 130),
            },
            dark: true,
        }
    }

    /// The light palette.
    pub fn light() -> Self {
        Self {
            base: BaseColors {
                background: Color32::from_rgb(250, 250, 251),
                background_secondary: Color32::from_rgb(242, 242, 244),
                background_tertiary: Color32::from_rgb(233, 233, 236),
                border: Color32::from_rgb(190, 190, 198),
                border_subtle: Color32::from_rgb(215, 215, 221),
                hover: Color32::from_rgb(228, 228, 233),
                selected: Color32::from_rgb(200, 222, 245),
            },
            text: TextColors {
                primary: Color32::from_rgb(32, 32, 36),
                secondary: Color32::from_rgb(90, 90, 98),
                muted: Color32::from_rgb(130, 130, 138),
            },
            ui: UiColors {
                accent: Color32::from_rgb(0, 120, 212),
                accent_hover: Color32::from_rgb(30, 140, 225),
                warning: Color32::from_rgb(190, 130, 30),
                error: Color32::from_rgb(200, 60, 60),
                success: Color32::from_rgb(40, 150, 70),
            },
            dark: false,
        }
    }

    /// Resolve the palette for a theme setting, using the given visuals to
    /// decide the System case.
    pub fn from_theme(theme: Theme, visuals: &Visuals) -> Self {
        match theme {
            Theme::Dark => Self::dark(),
            Theme::Light => Self::light(),
            Theme::System => {
                if visuals.dark_mode {
                    Self::dark()
                } else {
                    Self::light()
                }
            }
        }
    }

    /// Whether this is the dark palette.
    pub fn is_dark(&self) -> bool {
        self.dark
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Spacing
// ─────────────────────────────────────────────────────────────────────────────

/// Shared rounding/spacing constants used by the visuals builders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeSpacing {
    /// Small rounding (widgets)
    pub sm: f32,
    /// Medium rounding (windows)
    pub md: f32,
}

impl Default for ThemeSpacing {
    fn default() -> Self {
        Self { sm: 4.0, md: 8.0 }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palettes_report_mode() {
        assert!(ThemeColors::dark().is_dark());
        assert!(!ThemeColors::light().is_dark());
    }

    #[test]
    fn test_from_theme_resolves_explicit_modes() {
        let visuals = Visuals::light();
        assert!(ThemeColors::from_theme(Theme::Dark, &visuals).is_dark());
        assert!(!ThemeColors::from_theme(Theme::Light, &visuals).is_dark());
    }

    #[test]
    fn test_from_theme_system_follows_visuals() {
        assert!(ThemeColors::from_theme(Theme::System, &Visuals::dark()).is_dark());
        assert!(!ThemeColors::from_theme(Theme::System, &Visuals::light()).is_dark());
    }

    #[test]
    fn test_palettes_are_distinct() {
        let dark = ThemeColors::dark();
        let light = ThemeColors::light();
        assert_ne!(dark.base.background, light.base.background);
        assert_ne!(dark.text.primary, light.text.primary);
    }
}
