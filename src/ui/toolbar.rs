//! Toolbar for Jasper
//!
//! A single-row icon toolbar grouping the file, document, and view actions.
//! Rendering returns the triggered `ToolbarAction`; the app applies it.

use eframe::egui::{self, Color32, Response, RichText, Ui, Vec2};
use std::path::{Path, PathBuf};

use crate::theme::ThemeColors;

/// Toolbar height in points.
pub const TOOLBAR_HEIGHT: f32 = 36.0;

const ICON_BUTTON_SIZE: Vec2 = Vec2::new(32.0, 28.0);

/// Actions that can be triggered from the toolbar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolbarAction {
    /// Start a blank document
    New,
    /// Open a file via the picker
    Open,
    /// Open a file from the recent-files list
    OpenRecent(PathBuf),
    /// Save to the current path, or Save As for untitled documents
    Save,
    /// Save to a path chosen in a dialog
    SaveAs,
    /// Pretty-print the document
    FormatDocument,
    /// Strip insignificant whitespace
    MinifyDocument,
    /// Check the document for syntax errors
    ValidateDocument,
    /// Open the find/replace panel
    FindReplace,
    /// Toggle line number visibility
    ToggleLineNumbers,
    /// Switch between light and dark
    ToggleTheme,
}

/// Render the toolbar row and report any triggered action.
pub fn show_toolbar(
    ui: &mut Ui,
    theme_colors: &ThemeColors,
    can_save: bool,
    recent_files: &[PathBuf],
) -> Option<ToolbarAction> {
    let mut action = None;
    let is_dark = theme_colors.is_dark();

    let toolbar_bg = if is_dark {
        Color32::from_rgb(40, 40, 44)
    } else {
        Color32::from_rgb(246, 246, 248)
    };
    let separator_color = if is_dark {
        Color32::from_rgb(70, 70, 78)
    } else {
        Color32::from_rgb(210, 210, 216)
    };

    ui.painter()
        .rect_filled(ui.available_rect_before_wrap(), 0.0, toolbar_bg);

    ui.horizontal(|ui| {
        ui.set_height(TOOLBAR_HEIGHT);
        ui.spacing_mut().item_spacing.x = 2.0;
        ui.add_space(6.0);

        // File group
        ui.label(
            RichText::new("File")
                .size(10.0)
                .color(theme_colors.text.muted),
        );

        if icon_button(ui, "📄", "New (Ctrl+N)", true, is_dark).clicked() {
            action = Some(ToolbarAction::New);
        }
        if icon_button(ui, "📂", "Open (Ctrl+O)", true, is_dark).clicked() {
            action = Some(ToolbarAction::Open);
        }
        if icon_button(ui, "💾", "Save (Ctrl+S)", can_save, is_dark).clicked() {
            action = Some(ToolbarAction::Save);
        }
        if icon_button(ui, "📥", "Save As (Ctrl+Shift+S)", true, is_dark).clicked() {
            action = Some(ToolbarAction::SaveAs);
        }

        ui.add_space(4.0);
        vertical_separator(ui, separator_color, TOOLBAR_HEIGHT - 8.0);
        ui.add_space(4.0);

        // Document group
        ui.label(
            RichText::new("Document")
                .size(10.0)
                .color(theme_colors.text.muted),
        );

        if icon_button(ui, "✨", "Format (Ctrl+Shift+F)", true, is_dark).clicked() {
            action = Some(ToolbarAction::FormatDocument);
        }
        if icon_button(ui, "🗜", "Minify (Ctrl+Shift+M)", true, is_dark).clicked() {
            action = Some(ToolbarAction::MinifyDocument);
        }
        if icon_button(ui, "✔", "Validate (Ctrl+Shift+V)", true, is_dark).clicked() {
            action = Some(ToolbarAction::ValidateDocument);
        }
        if icon_button(ui, "🔍", "Find and Replace (Ctrl+F)", true, is_dark).clicked() {
            action = Some(ToolbarAction::FindReplace);
        }

        ui.add_space(4.0);
        vertical_separator(ui, separator_color, TOOLBAR_HEIGHT - 8.0);
        ui.add_space(4.0);

        // View group
        ui.label(
            RichText::new("View")
                .size(10.0)
                .color(theme_colors.text.muted),
        );

        if icon_button(ui, "#", "Toggle Line Numbers", true, is_dark).clicked() {
            action = Some(ToolbarAction::ToggleLineNumbers);
        }

        let theme_icon = if is_dark { "☀" } else { "🌙" };
        if icon_button(ui, theme_icon, "Toggle Theme", true, is_dark).clicked() {
            action = Some(ToolbarAction::ToggleTheme);
        }

        ui.add_space(4.0);
        vertical_separator(ui, separator_color, TOOLBAR_HEIGHT - 8.0);
        ui.add_space(4.0);

        ui.menu_button(RichText::new("Recent ▾").size(12.0), |ui| {
            if recent_files.is_empty() {
                ui.label(RichText::new("No recent files").color(theme_colors.text.muted));
            }
            for path in recent_files {
                if ui
                    .button(display_name(path))
                    .on_hover_text(path.display().to_string())
                    .clicked()
                {
                    action = Some(ToolbarAction::OpenRecent(path.clone()));
                    ui.close_menu();
                }
            }
        });
    });

    action
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown")
        .to_string()
}

/// Frameless icon button with a painted hover background.
fn icon_button(ui: &mut Ui, icon: &str, tooltip: &str, enabled: bool, is_dark: bool) -> Response {
    let text_color = if enabled {
        if is_dark {
            Color32::from_rgb(220, 220, 225)
        } else {
            Color32::from_rgb(50, 50, 54)
        }
    } else if is_dark {
        Color32::from_rgb(100, 100, 108)
    } else {
        Color32::from_rgb(160, 160, 166)
    };

    let hover_bg = if is_dark {
        Color32::from_rgb(60, 60, 66)
    } else {
        Color32::from_rgb(220, 220, 226)
    };

    // Invisible button provides the clickable area; the icon is painted on top
    let btn = ui.add_enabled(
        enabled,
        egui::Button::new(RichText::new(" ").size(16.0))
            .frame(false)
            .min_size(ICON_BUTTON_SIZE),
    );

    if btn.hovered() && enabled {
        ui.painter()
            .rect_filled(btn.rect, egui::Rounding::same(3.0), hover_bg);
    }

    ui.painter().text(
        btn.rect.center(),
        egui::Align2::CENTER_CENTER,
        icon,
        egui::FontId::proportional(15.0),
        text_color,
    );

    btn.on_hover_text(tooltip)
}

fn vertical_separator(ui: &mut Ui, color: Color32, height: f32) {
    let (rect, _response) = ui.allocate_exact_size(Vec2::new(1.0, height), egui::Sense::hover());
    ui.painter().line_segment(
        [rect.center_top(), rect.center_bottom()],
        egui::Stroke::new(1.0, color),
    );
}
