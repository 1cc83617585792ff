//! Theme management
//!
//! Tracks the configured theme, converts it into egui `Visuals`, and applies
//! it to the context only when something actually changed.

use eframe::egui::{Context, Visuals};
use log::debug;

use super::{dark, light, ThemeColors};
use crate::config::Theme;

/// Owns the active theme setting and applies it to the egui context.
///
/// Visuals are cached per theme; `apply_if_needed` also watches the system
/// dark-mode preference so the System setting follows it across frames.
#[derive(Debug, Clone)]
pub struct ThemeManager {
    current_theme: Theme,
    cached_visuals: Option<Visuals>,
    needs_apply: bool,
    /// Last observed system dark-mode state (System theme only)
    last_system_dark_mode: Option<bool>,
}

impl ThemeManager {
    pub fn new(theme: Theme) -> Self {
        Self {
            current_theme: theme,
            cached_visuals: None,
            needs_apply: true,
            last_system_dark_mode: None,
        }
    }

    /// The configured theme setting.
    pub fn current_theme(&self) -> Theme {
        self.current_theme
    }

    /// Change the theme. Takes effect on the next `apply_if_needed` call.
    pub fn set_theme(&mut self, theme: Theme) {
        if self.current_theme != theme {
            debug!("theme changed: {:?} -> {:?}", self.current_theme, theme);
            self.current_theme = theme;
            self.cached_visuals = None;
            self.needs_apply = true;
        }
    }

    /// Switch between Light and Dark. From System this lands on Dark.
    ///
    /// Returns the new theme.
    pub fn toggle(&mut self) -> Theme {
        let new_theme = match self.current_theme {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
            Theme::System => Theme::Dark,
        };
        self.set_theme(new_theme);
        new_theme
    }

    /// Apply the current theme to the context unconditionally.
    pub fn apply(&mut self, ctx: &Context) {
        let visuals = self.get_or_create_visuals(ctx);
        ctx.set_visuals(visuals);
        self.needs_apply = false;
    }

    /// Apply the theme only when the setting or the system preference
    /// changed since the last application. Returns whether it applied.
    pub fn apply_if_needed(&mut self, ctx: &Context) -> bool {
        if self.current_theme == Theme::System {
            let system_dark = ctx.style().visuals.dark_mode;
            if self.last_system_dark_mode != Some(system_dark) {
                self.last_system_dark_mode = Some(system_dark);
                self.cached_visuals = None;
                self.needs_apply = true;
            }
        }

        if self.needs_apply {
            self.apply(ctx);
            true
        } else {
            false
        }
    }

    fn get_or_create_visuals(&mut self, ctx: &Context) -> Visuals {
        if let Some(ref visuals) = self.cached_visuals {
            return visuals.clone();
        }

        let visuals = match self.current_theme {
            Theme::Light => light::create_light_visuals(),
            Theme::Dark => dark::create_dark_visuals(),
            Theme::System => {
                let system_dark = ctx.style().visuals.dark_mode;
                self.last_system_dark_mode = Some(system_dark);
                if system_dark {
                    dark::create_dark_visuals()
                } else {
                    light::create_light_visuals()
                }
            }
        };

        self.cached_visuals = Some(visuals.clone());
        visuals
    }

    /// The palette for the effective theme (System resolved to light/dark).
    pub fn colors(&self, ctx: &Context) -> ThemeColors {
        ThemeColors::from_theme(self.current_theme, &ctx.style().visuals)
    }

    /// Whether the effective theme is dark.
    pub fn is_dark(&self, ctx: &Context) -> bool {
        match self.current_theme {
            Theme::Dark => true,
            Theme::Light => false,
            Theme::System => ctx.style().visuals.dark_mode,
        }
    }

    /// Display label for the current setting.
    pub fn label(&self) -> &'static str {
        match self.current_theme {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
            Theme::System => "System",
        }
    }
}

impl Default for ThemeManager {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_manager_needs_apply() {
        let manager = ThemeManager::new(Theme::Dark);
        assert_eq!(manager.current_theme(), Theme::Dark);
        assert!(manager.needs_apply);
    }

    #[test]
    fn test_set_theme_invalidates_cache() {
        let mut manager = ThemeManager::new(Theme::Light);
        manager.needs_apply = false;
        manager.cached_visuals = Some(Visuals::light());

        manager.set_theme(Theme::Dark);
        assert_eq!(manager.current_theme(), Theme::Dark);
        assert!(manager.needs_apply);
        assert!(manager.cached_visuals.is_none());
    }

    #[test]
    fn test_set_same_theme_is_a_no_op() {
        let mut manager = ThemeManager::new(Theme::Light);
        manager.needs_apply = false;

        manager.set_theme(Theme::Light);
        assert!(!manager.needs_apply);
    }

    #[test]
    fn test_toggle_alternates() {
        let mut manager = ThemeManager::new(Theme::Light);
        assert_eq!(manager.toggle(), Theme::Dark);
        assert_eq!(manager.toggle(), Theme::Light);
    }

    #[test]
    fn test_toggle_from_system_goes_dark() {
        let mut manager = ThemeManager::new(Theme::System);
        assert_eq!(manager.toggle(), Theme::Dark);
    }

    #[test]
    fn test_labels() {
        let mut manager = ThemeManager::new(Theme::Light);
        assert_eq!(manager.label(), "Light");
        manager.set_theme(Theme::System);
        assert_eq!(manager.label(), "System");
    }

    #[test]
    fn test_default_is_light() {
        assert_eq!(ThemeManager::default().current_theme(), Theme::Light);
    }
}
