//! Modal dialogs backing the confirmation guards.
//!
//! Each dialog renders a centered modal window and reports the user's
//! decision as an enum. While a dialog is open the decision is `None` and
//! the caller keeps showing it every frame.

use eframe::egui::{self, Color32, Key, RichText};

use crate::files::LargeFileCandidate;

// ─────────────────────────────────────────────────────────────────────────────
// Unsaved Changes
// ─────────────────────────────────────────────────────────────────────────────

/// The user's choice in the unsaved-changes dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsavedChangesDecision {
    /// Save the document, then run the deferred action
    Save,
    /// Drop the edits and run the deferred action
    Discard,
    /// Keep the document as it is; the deferred action is abandoned
    Cancel,
}

/// Ask whether to save, discard, or cancel before a destructive action.
///
/// `document_title` is shown so the user knows which file is at stake.
pub fn show_unsaved_changes_dialog(
    ctx: &egui::Context,
    document_title: &str,
    is_dark: bool,
) -> Option<UnsavedChangesDecision> {
    let mut decision = None;

    if ctx.input(|i| i.key_pressed(Key::Escape)) {
        return Some(UnsavedChangesDecision::Cancel);
    }

    let (bg_color, border_color) = dialog_colors(is_dark);

    egui::Window::new("Unsaved Changes")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .frame(
            egui::Frame::window(&ctx.style())
                .fill(bg_color)
                .stroke(egui::Stroke::new(1.0, border_color))
                .rounding(8.0),
        )
        .show(ctx, |ui| {
            ui.set_min_width(360.0);

            ui.add_space(8.0);
            ui.label(format!("\"{}\" has unsaved changes.", document_title));
            ui.add_space(4.0);
            ui.label(
                RichText::new("Your changes will be lost if you don't save them.")
                    .small()
                    .color(ui.visuals().weak_text_color()),
            );
            ui.add_space(12.0);

            ui.horizontal(|ui| {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let save_button =
                        egui::Button::new(RichText::new("Save").color(Color32::WHITE))
                            .fill(ui.visuals().selection.bg_fill);
                    if ui.add(save_button).clicked() {
                        decision = Some(UnsavedChangesDecision::Save);
                    }

                    ui.add_space(8.0);

                    if ui.button("Don't Save").clicked() {
                        decision = Some(UnsavedChangesDecision::Discard);
                    }

                    ui.add_space(8.0);

                    if ui.button("Cancel").clicked() {
                        decision = Some(UnsavedChangesDecision::Cancel);
                    }
                });
            });

            ui.add_space(4.0);
        });

    decision
}

// ─────────────────────────────────────────────────────────────────────────────
// Large File
// ─────────────────────────────────────────────────────────────────────────────

/// The user's choice in the large-file dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LargeFileDecision {
    /// Open the file despite its size
    OpenAnyway,
    /// Leave the current document untouched
    Cancel,
}

/// Warn that a file exceeds the size threshold before opening it.
pub fn show_large_file_dialog(
    ctx: &egui::Context,
    candidate: &LargeFileCandidate,
    is_dark: bool,
) -> Option<LargeFileDecision> {
    let mut decision = None;

    if ctx.input(|i| i.key_pressed(Key::Escape)) {
        return Some(LargeFileDecision::Cancel);
    }

    let (bg_color, border_color) = dialog_colors(is_dark);

    egui::Window::new("Large File")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .frame(
            egui::Frame::window(&ctx.style())
                .fill(bg_color)
                .stroke(egui::Stroke::new(1.0, border_color))
                .rounding(8.0),
        )
        .show(ctx, |ui| {
            ui.set_min_width(360.0);

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.label(RichText::new("📄").size(16.0));
                ui.label(RichText::new(candidate.name()).strong());
                ui.label(
                    RichText::new(format_size(candidate.size))
                        .color(ui.visuals().weak_text_color()),
                );
            });
            ui.add_space(8.0);

            ui.colored_label(
                Color32::from_rgb(220, 160, 80),
                "⚠ This file is large and may be slow to open and edit.",
            );

            ui.add_space(12.0);

            ui.horizontal(|ui| {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Open Anyway").clicked() {
                        decision = Some(LargeFileDecision::OpenAnyway);
                    }

                    ui.add_space(8.0);

                    if ui.button("Cancel").clicked() {
                        decision = Some(LargeFileDecision::Cancel);
                    }
                });
            });

            ui.add_space(4.0);
        });

    decision
}

// ─────────────────────────────────────────────────────────────────────────────
// Error
// ─────────────────────────────────────────────────────────────────────────────

/// Show an error message. Returns true when dismissed.
pub fn show_error_dialog(
    ctx: &egui::Context,
    title: &str,
    message: &str,
    is_dark: bool,
) -> bool {
    let mut dismissed = false;

    if ctx.input(|i| i.key_pressed(Key::Escape)) {
        return true;
    }

    let (bg_color, border_color) = dialog_colors(is_dark);

    egui::Window::new(format!("⚠ {}", title))
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .frame(
            egui::Frame::window(&ctx.style())
                .fill(bg_color)
                .stroke(egui::Stroke::new(1.0, border_color))
                .rounding(8.0),
        )
        .show(ctx, |ui| {
            ui.set_min_width(320.0);
            ui.set_max_width(480.0);

            ui.add_space(8.0);
            ui.label(message);
            ui.add_space(12.0);

            ui.horizontal(|ui| {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("OK").clicked() {
                        dismissed = true;
                    }
                });
            });

            ui.add_space(4.0);
        });

    dismissed
}

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

fn dialog_colors(is_dark: bool) -> (Color32, Color32) {
    if is_dark {
        (Color32::from_rgb(40, 40, 45), Color32::from_rgb(70, 70, 80))
    } else {
        (
            Color32::from_rgb(250, 250, 251),
            Color32::from_rgb(185, 185, 192),
        )
    }
}

/// Human-readable byte count (binary units).
pub fn format_size(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = KIB * 1024;
    const GIB: u64 = MIB * 1024;

    if bytes >= GIB {
        format!("{:.1} GiB", bytes as f64 / GIB as f64)
    } else if bytes >= MIB {
        format!("{:.1} MiB", bytes as f64 / MIB as f64)
    } else if bytes >= KIB {
        format!("{:.1} KiB", bytes as f64 / KIB as f64)
    } else {
        format!("{} B", bytes)
    }
}
