//! Dark theme configuration
//!
//! Converts the `ThemeColors::dark()` palette into egui's `Visuals` for
//! consistent UI styling in low-light environments.

use eframe::egui::{self, Color32, Rounding, Stroke, Visuals};

use super::{ThemeColors, ThemeSpacing};

/// Create egui Visuals configured for the dark theme.
pub fn create_dark_visuals() -> Visuals {
    let colors = ThemeColors::dark();
    let spacing = ThemeSpacing::default();

    let mut visuals = Visuals::dark();

    // Window & panel backgrounds
    visuals.panel_fill = colors.base.background;
    visuals.window_fill = colors.base.background;
    visuals.extreme_bg_color = colors.base.background_tertiary;
    visuals.faint_bg_color = colors.base.background_secondary;

    // Text & feedback colors
    visuals.override_text_color = None; // Let widgets decide
    visuals.warn_fg_color = colors.ui.warning;
    visuals.error_fg_color = colors.ui.error;
    visuals.hyperlink_color = colors.ui.accent;

    // Selection
    visuals.selection.bg_fill = colors.base.selected;
    visuals.selection.stroke = Stroke::new(1.0, colors.ui.accent);

    // Widget styling
    visuals.widgets.noninteractive.bg_fill = colors.base.background_secondary;
    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, colors.base.border_subtle);
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, colors.text.primary);
    visuals.widgets.noninteractive.rounding = Rounding::same(spacing.sm);

    visuals.widgets.inactive.bg_fill = colors.base.background_secondary;
    visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, colors.base.border);
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, colors.text.secondary);
    visuals.widgets.inactive.rounding = Rounding::same(spacing.sm);

    visuals.widgets.hovered.bg_fill = colors.base.hover;
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, colors.ui.accent);
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.5, colors.text.primary);
    visuals.widgets.hovered.rounding = Rounding::same(spacing.sm);

    visuals.widgets.active.bg_fill = colors.ui.accent;
    visuals.widgets.active.bg_stroke = Stroke::new(1.0, colors.ui.accent_hover);
    visuals.widgets.active.fg_stroke = Stroke::new(2.0, Color32::WHITE);
    visuals.widgets.active.rounding = Rounding::same(spacing.sm);

    // Window & popup styling
    visuals.window_rounding = Rounding::same(spacing.md);
    visuals.window_shadow = egui::epaint::Shadow {
        offset: egui::vec2(0.0, 4.0),
        blur: 16.0,
        spread: 0.0,
        color: Color32::from_black_alpha(80),
    };
    visuals.window_stroke = Stroke::new(1.0, colors.base.border);
    visuals.menu_rounding = Rounding::same(spacing.sm);

    visuals.dark_mode = true;

    visuals
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dark_visuals_is_dark_mode() {
        let visuals = create_dark_visuals();
        assert!(visuals.dark_mode);
    }

    #[test]
    fn test_dark_visuals_has_dark_background() {
        let visuals = create_dark_visuals();
        assert!(visuals.panel_fill.r() < 50);
        assert!(visuals.panel_fill.g() < 50);
        assert!(visuals.panel_fill.b() < 50);
    }

    #[test]
    fn test_dark_visuals_selection_visible() {
        let visuals = create_dark_visuals();
        assert_ne!(visuals.selection.bg_fill, visuals.panel_fill);
    }

    #[test]
    fn test_dark_visuals_text_contrast() {
        let visuals = create_dark_visuals();
        let colors = ThemeColors::dark();

        // Text stroke should be light for contrast on dark background
        assert!(visuals.widgets.noninteractive.fg_stroke.color.r() > 150);
        assert_eq!(
            visuals.widgets.noninteractive.fg_stroke.color,
            colors.text.primary
        );
    }
}
