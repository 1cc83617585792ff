//! Main application for Jasper
//!
//! `JasperApp` implements `eframe::App`: it renders the toolbar, the editor,
//! the status bar, and the guard dialogs, routes actions through the file
//! controller, and arbitrates window close requests against unsaved edits.

use eframe::egui;
use log::{debug, info, warn};

use crate::config::{self, Settings};
use crate::editor::highlight_json;
use crate::files::{GuardState, OpenOutcome, PendingAction, SaveOutcome};
use crate::json;
use crate::state::AppState;
use crate::theme::ThemeManager;
use crate::ui::dialogs::{self, LargeFileDecision, UnsavedChangesDecision};
use crate::ui::toolbar::{self, ToolbarAction};

/// Application name shown in the window title.
pub const APP_NAME: &str = "Jasper";

// ─────────────────────────────────────────────────────────────────────────────
// Keyboard Shortcuts
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyboardAction {
    New,
    Open,
    Save,
    SaveAs,
    FormatDocument,
    MinifyDocument,
    ValidateDocument,
    OpenFind,
    OpenFindReplace,
}

// ─────────────────────────────────────────────────────────────────────────────
// App
// ─────────────────────────────────────────────────────────────────────────────

pub struct JasperApp {
    state: AppState,
    theme_manager: ThemeManager,
}

impl JasperApp {
    /// Build the app from loaded settings.
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings) -> Self {
        let theme_manager = ThemeManager::new(settings.theme);
        let mut app = Self {
            state: AppState::new(settings),
            theme_manager,
        };
        app.theme_manager.apply(&cc.egui_ctx);
        info!("{} started", APP_NAME);
        app
    }

    fn window_title(&self) -> String {
        format!("{} - {}", self.state.file.document().title(), APP_NAME)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Guarded actions
    // ─────────────────────────────────────────────────────────────────────────

    /// Route an action through the unsaved-changes guard.
    ///
    /// Clean documents run the action immediately; dirty ones hold it until
    /// the user decides in the dialog.
    fn request_guarded(&mut self, action: PendingAction) {
        let dirty = self.state.file.document().is_dirty();
        if !self.state.unsaved_guard.guard(action.clone(), dirty) {
            self.run_action(action);
        }
    }

    /// Run an action that has cleared (or bypassed) the guard.
    fn run_action(&mut self, action: PendingAction) {
        match action {
            PendingAction::NewDocument => {
                self.state.file.new_document();
                self.state.ui.find_state.clear();
            }
            PendingAction::OpenPath(path) => {
                let result = self.state.file.open_path(&path, false);
                self.handle_open_result(result);
            }
            PendingAction::OpenPicker => {
                let result = self.state.file.open_with_picker();
                self.handle_open_result(result);
            }
            PendingAction::Exit => {
                self.state.ui.should_exit = true;
            }
        }
    }

    fn handle_open_result(&mut self, result: crate::error::Result<OpenOutcome>) {
        match result {
            Ok(OpenOutcome::Opened) => {
                if let Some(path) = self.state.file.document().path() {
                    let path = path.to_path_buf();
                    self.state.settings.add_recent_file(path);
                    self.state.mark_settings_dirty();
                }
                self.state.ui.find_state.clear();
                self.state.refresh_find_matches();
                self.state.show_toast("Opened");
            }
            Ok(OpenOutcome::TooLarge(candidate)) => {
                self.state.large_file_guard.defer(candidate);
            }
            Ok(OpenOutcome::Cancelled) => {}
            Err(e) => {
                warn!("Open failed: {}", e);
                self.state.show_error(e.to_string());
            }
        }
    }

    fn save_document(&mut self) {
        match self.state.file.save() {
            Ok(SaveOutcome::Saved) => {
                if let Some(path) = self.state.file.document().path() {
                    let path = path.to_path_buf();
                    self.state.settings.add_recent_file(path);
                    self.state.mark_settings_dirty();
                }
                self.state.show_toast("Saved");
            }
            Ok(SaveOutcome::Cancelled) => {}
            Err(e) => {
                warn!("Save failed: {}", e);
                self.state.show_error(e.to_string());
            }
        }
    }

    fn save_document_as(&mut self) {
        match self.state.file.save_as() {
            Ok(SaveOutcome::Saved) => self.state.show_toast("Saved"),
            Ok(SaveOutcome::Cancelled) => {}
            Err(e) => {
                warn!("Save As failed: {}", e);
                self.state.show_error(e.to_string());
            }
        }
    }

    /// Window close request. Returns true when the close may proceed.
    fn handle_close_request(&mut self) -> bool {
        if self.state.ui.should_exit {
            return true;
        }
        let dirty = self.state.file.document().is_dirty();
        if self.state.unsaved_guard.guard(PendingAction::Exit, dirty) {
            debug!("Close request deferred; document has unsaved changes");
            false
        } else {
            self.state.ui.should_exit = true;
            true
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // JSON operations
    // ─────────────────────────────────────────────────────────────────────────

    fn format_document(&mut self) {
        let indent = self.state.settings.format_indent;
        match json::pretty(self.state.file.document().content(), indent) {
            Ok(formatted) => {
                self.state.file.set_content(formatted);
                self.state.refresh_find_matches();
                self.state.show_toast("Formatted");
            }
            Err(issue) => self.state.show_error(format!("Cannot format: {}", issue)),
        }
    }

    fn minify_document(&mut self) {
        match json::minify(self.state.file.document().content()) {
            Ok(minified) => {
                self.state.file.set_content(minified);
                self.state.refresh_find_matches();
                self.state.show_toast("Minified");
            }
            Err(issue) => self.state.show_error(format!("Cannot minify: {}", issue)),
        }
    }

    fn validate_document(&mut self) {
        match json::validate(self.state.file.document().content()) {
            Ok(()) => self.state.show_toast("Valid JSON"),
            Err(issue) => self.state.show_error(format!("Invalid JSON: {}", issue)),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Find/replace
    // ─────────────────────────────────────────────────────────────────────────

    fn open_find(&mut self, replace_mode: bool) {
        self.state.ui.show_find_replace = true;
        self.state.ui.find_state.is_replace_mode = replace_mode;
        self.state.ui.find_panel.request_focus();
        self.state.refresh_find_matches();
    }

    fn replace_current_match(&mut self) {
        let text = self.state.file.document().content().to_string();
        if let Some(new_text) = self.state.ui.find_state.replace_current(&text) {
            self.state.file.set_content(new_text);
            self.state.refresh_find_matches();
        }
    }

    fn replace_all_matches(&mut self) {
        let count = self.state.ui.find_state.match_count();
        if count == 0 {
            return;
        }
        let text = self.state.file.document().content().to_string();
        let new_text = self.state.ui.find_state.replace_all(&text);
        self.state.file.set_content(new_text);
        self.state.refresh_find_matches();
        self.state.show_toast(format!("Replaced {} occurrences", count));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Action dispatch
    // ─────────────────────────────────────────────────────────────────────────

    fn handle_toolbar_action(&mut self, action: ToolbarAction, ctx: &egui::Context) {
        match action {
            ToolbarAction::New => self.request_guarded(PendingAction::NewDocument),
            ToolbarAction::Open => self.request_guarded(PendingAction::OpenPicker),
            ToolbarAction::OpenRecent(path) => {
                self.request_guarded(PendingAction::OpenPath(path))
            }
            ToolbarAction::Save => self.save_document(),
            ToolbarAction::SaveAs => self.save_document_as(),
            ToolbarAction::FormatDocument => self.format_document(),
            ToolbarAction::MinifyDocument => self.minify_document(),
            ToolbarAction::ValidateDocument => self.validate_document(),
            ToolbarAction::FindReplace => self.open_find(true),
            ToolbarAction::ToggleLineNumbers => {
                self.state.settings.show_line_numbers = !self.state.settings.show_line_numbers;
                self.state.mark_settings_dirty();
            }
            ToolbarAction::ToggleTheme => self.toggle_theme(ctx),
        }
    }

    fn toggle_theme(&mut self, ctx: &egui::Context) {
        let new_theme = self.theme_manager.toggle();
        self.theme_manager.apply(ctx);
        self.state.settings.theme = new_theme;
        self.state.mark_settings_dirty();
        self.state
            .show_toast(format!("Theme: {}", self.theme_manager.label()));
    }

    fn handle_keyboard_shortcuts(&mut self, ctx: &egui::Context) {
        // Guard dialogs are modal; shortcuts stay quiet while one is open
        if self.dialog_open() {
            return;
        }

        // The panel owns F3/Shift+F3/Ctrl+H while it is open
        let panel_open = self.state.ui.show_find_replace;

        let action = ctx.input(|i| {
            if i.modifiers.ctrl && i.modifiers.shift && i.key_pressed(egui::Key::S) {
                return Some(KeyboardAction::SaveAs);
            }
            if i.modifiers.ctrl && i.modifiers.shift && i.key_pressed(egui::Key::F) {
                return Some(KeyboardAction::FormatDocument);
            }
            if i.modifiers.ctrl && i.modifiers.shift && i.key_pressed(egui::Key::M) {
                return Some(KeyboardAction::MinifyDocument);
            }
            if i.modifiers.ctrl && i.modifiers.shift && i.key_pressed(egui::Key::V) {
                return Some(KeyboardAction::ValidateDocument);
            }
            if i.modifiers.ctrl && !i.modifiers.shift && i.key_pressed(egui::Key::S) {
                return Some(KeyboardAction::Save);
            }
            if i.modifiers.ctrl && i.key_pressed(egui::Key::O) {
                return Some(KeyboardAction::Open);
            }
            if i.modifiers.ctrl && i.key_pressed(egui::Key::N) {
                return Some(KeyboardAction::New);
            }
            if i.modifiers.ctrl && !i.modifiers.shift && i.key_pressed(egui::Key::F) {
                return Some(KeyboardAction::OpenFind);
            }
            if i.modifiers.ctrl && i.key_pressed(egui::Key::H) && !panel_open {
                return Some(KeyboardAction::OpenFindReplace);
            }
            None
        });

        if let Some(action) = action {
            debug!("keyboard shortcut: {:?}", action);
            match action {
                KeyboardAction::New => self.request_guarded(PendingAction::NewDocument),
                KeyboardAction::Open => self.request_guarded(PendingAction::OpenPicker),
                KeyboardAction::Save => self.save_document(),
                KeyboardAction::SaveAs => self.save_document_as(),
                KeyboardAction::FormatDocument => self.format_document(),
                KeyboardAction::MinifyDocument => self.minify_document(),
                KeyboardAction::ValidateDocument => self.validate_document(),
                KeyboardAction::OpenFind => self.open_find(false),
                KeyboardAction::OpenFindReplace => self.open_find(true),
            }
        }
    }

    fn dialog_open(&self) -> bool {
        self.state.unsaved_guard.state() == GuardState::AwaitingDecision
            || self.state.large_file_guard.state() == GuardState::AwaitingDecision
            || self.state.ui.error_message.is_some()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Rendering
    // ─────────────────────────────────────────────────────────────────────────

    fn render_dialogs(&mut self, ctx: &egui::Context) {
        let is_dark = self.theme_manager.is_dark(ctx);

        if self.state.unsaved_guard.state() == GuardState::AwaitingDecision {
            let title = self.state.file.document().title();
            if let Some(decision) = dialogs::show_unsaved_changes_dialog(ctx, &title, is_dark) {
                self.handle_unsaved_decision(decision);
            }
            return;
        }

        if self.state.large_file_guard.state() == GuardState::AwaitingDecision {
            // candidate() is Some while AwaitingDecision
            let candidate = match self.state.large_file_guard.candidate() {
                Some(c) => c.clone(),
                None => return,
            };
            if let Some(decision) = dialogs::show_large_file_dialog(ctx, &candidate, is_dark) {
                match decision {
                    LargeFileDecision::OpenAnyway => {
                        if let Some(path) = self.state.large_file_guard.confirm_open() {
                            let result = self.state.file.open_path(&path, true);
                            self.handle_open_result(result);
                        }
                    }
                    LargeFileDecision::Cancel => self.state.large_file_guard.cancel(),
                }
            }
            return;
        }

        if let Some(message) = self.state.ui.error_message.clone() {
            if dialogs::show_error_dialog(ctx, "Error", &message, is_dark) {
                self.state.dismiss_error();
            }
        }
    }

    fn handle_unsaved_decision(&mut self, decision: UnsavedChangesDecision) {
        match decision {
            UnsavedChangesDecision::Save => match self.state.file.save() {
                Ok(SaveOutcome::Saved) => {
                    self.state.show_toast("Saved");
                    if let Some(action) = self.state.unsaved_guard.confirm_save() {
                        self.run_action(action);
                    }
                }
                Ok(SaveOutcome::Cancelled) => {
                    // Backing out of the save dialog abandons the action too
                    self.state.unsaved_guard.cancel();
                }
                Err(e) => {
                    self.state.unsaved_guard.cancel();
                    self.state.show_error(e.to_string());
                }
            },
            UnsavedChangesDecision::Discard => {
                if let Some(action) = self.state.unsaved_guard.confirm_discard() {
                    self.run_action(action);
                }
            }
            UnsavedChangesDecision::Cancel => self.state.unsaved_guard.cancel(),
        }
    }

    fn render_find_replace(&mut self, ctx: &egui::Context) {
        if !self.state.ui.show_find_replace {
            return;
        }

        let is_dark = self.theme_manager.is_dark(ctx);
        let output = {
            let ui_state = &mut self.state.ui;
            ui_state
                .find_panel
                .show(ctx, &mut ui_state.find_state, is_dark)
        };

        if output.search_changed {
            self.state.refresh_find_matches();
        }
        if output.next_requested {
            self.state.ui.find_state.next_match();
        }
        if output.prev_requested {
            self.state.ui.find_state.prev_match();
        }
        if output.replace_requested {
            self.replace_current_match();
        }
        if output.replace_all_requested {
            self.replace_all_matches();
        }
        if output.close_requested {
            self.state.ui.show_find_replace = false;
            self.state.ui.find_state.clear();
        }
    }

    fn render_editor(&mut self, ctx: &egui::Context) {
        let dark = self.theme_manager.is_dark(ctx);
        let font_size = self.state.settings.font_size;
        let word_wrap = self.state.settings.word_wrap;
        let highlighting = self.state.settings.syntax_highlighting;
        let show_line_numbers = self.state.settings.show_line_numbers;
        let colors = self.theme_manager.colors(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::both()
                .id_source("editor_scroll")
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.horizontal_top(|ui| {
                        let content = self.state.file.document_mut().content_mut();

                        if show_line_numbers {
                            let line_count = content.lines().count().max(1);
                            let numbers: String = (1..=line_count)
                                .map(|n| format!("{}\n", n))
                                .collect();
                            ui.add(
                                egui::Label::new(
                                    egui::RichText::new(numbers)
                                        .font(egui::FontId::monospace(font_size))
                                        .color(colors.text.muted),
                                )
                                .selectable(false),
                            );
                        }

                        let mut layouter =
                            move |ui: &egui::Ui, text: &str, wrap_width: f32| {
                                let mut job = if highlighting {
                                    highlight_json(text, dark, font_size)
                                } else {
                                    let mut job = egui::text::LayoutJob::default();
                                    job.append(
                                        text,
                                        0.0,
                                        egui::TextFormat {
                                            font_id: egui::FontId::monospace(font_size),
                                            color: ui.visuals().text_color(),
                                            ..Default::default()
                                        },
                                    );
                                    job
                                };
                                job.wrap.max_width = if word_wrap {
                                    wrap_width
                                } else {
                                    f32::INFINITY
                                };
                                ui.fonts(|f| f.layout_job(job))
                            };

                        let editor = egui::TextEdit::multiline(content)
                            .id(egui::Id::new("json_editor"))
                            .font(egui::FontId::monospace(font_size))
                            .frame(false)
                            .desired_width(f32::INFINITY)
                            .desired_rows(30)
                            .lock_focus(true)
                            .layouter(&mut layouter);

                        let response = ui.add(editor);
                        if response.changed() {
                            self.state.refresh_find_matches();
                        }
                    });
                });
        });
    }

    fn render_status_bar(&mut self, ctx: &egui::Context) {
        let colors = self.theme_manager.colors(ctx);

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let document = self.state.file.document();

                let location = document
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "untitled".to_string());
                ui.label(egui::RichText::new(location).size(11.0).color(colors.text.secondary));

                if let Some(toast) = &self.state.ui.toast_message {
                    ui.separator();
                    ui.label(
                        egui::RichText::new(toast)
                            .size(11.0)
                            .color(colors.ui.success),
                    );
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let content = document.content();
                    let lines = content.lines().count().max(1);
                    let stats = format!(
                        "{} lines   {}",
                        lines,
                        dialogs::format_size(content.len() as u64)
                    );
                    ui.label(
                        egui::RichText::new(stats)
                            .size(11.0)
                            .color(colors.text.muted),
                    );

                    if document.is_dirty() {
                        ui.label(
                            egui::RichText::new("● modified")
                                .size(11.0)
                                .color(colors.ui.warning),
                        );
                    }
                });
            });
        });
    }

    /// Track window geometry for persistence.
    fn update_window_state(&mut self, ctx: &egui::Context) {
        let (inner_rect, maximized) = ctx.input(|i| {
            (i.viewport().inner_rect, i.viewport().maximized.unwrap_or(false))
        });

        let ws = &mut self.state.settings.window_size;
        let mut changed = false;

        if ws.maximized != maximized {
            ws.maximized = maximized;
            changed = true;
        }
        if !maximized {
            if let Some(rect) = inner_rect {
                if (ws.width - rect.width()).abs() > 1.0
                    || (ws.height - rect.height()).abs() > 1.0
                {
                    ws.width = rect.width();
                    ws.height = rect.height();
                    changed = true;
                }
            }
        }

        if changed {
            self.state.mark_settings_dirty();
        }
    }

    fn save_settings_if_dirty(&mut self) {
        if self.state.settings_dirty && config::save_config_silent(&self.state.settings) {
            self.state.settings_dirty = false;
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// eframe::App
// ─────────────────────────────────────────────────────────────────────────────

impl eframe::App for JasperApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.theme_manager.apply_if_needed(ctx);
        self.state.update_toast();

        ctx.send_viewport_cmd(egui::ViewportCommand::Title(self.window_title()));
        self.update_window_state(ctx);

        // A close request while edits are unsaved becomes a pending Exit
        if ctx.input(|i| i.viewport().close_requested()) && !self.handle_close_request() {
            ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
        }

        let colors = self.theme_manager.colors(ctx);
        let can_save = self.state.file.document().is_dirty()
            || self.state.file.document().path().is_none();

        let recent_files = self.state.settings.recent_files.clone();
        let mut toolbar_action = None;
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            toolbar_action = toolbar::show_toolbar(ui, &colors, can_save, &recent_files);
        });
        if let Some(action) = toolbar_action {
            self.handle_toolbar_action(action, ctx);
        }

        self.render_status_bar(ctx);
        self.render_editor(ctx);
        self.render_find_replace(ctx);
        self.render_dialogs(ctx);

        self.handle_keyboard_shortcuts(ctx);

        if self.state.ui.should_exit {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Application exiting");
        self.save_settings_if_dirty();
    }

    fn save(&mut self, _storage: &mut dyn eframe::Storage) {
        self.save_settings_if_dirty();
    }

    fn auto_save_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs(30)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
