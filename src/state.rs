//! Application state for Jasper
//!
//! Aggregates the file controller, the confirmation guards, the settings,
//! and the transient UI state into one struct owned by the app.

use std::time::{Duration, Instant};

use log::debug;

use crate::config::Settings;
use crate::editor::{FindReplacePanel, FindState};
use crate::files::{FileController, LargeFileGuard, UnsavedChangesGuard};

/// How long a status toast stays visible.
const TOAST_DURATION: Duration = Duration::from_secs(3);

// ─────────────────────────────────────────────────────────────────────────────
// UI State
// ─────────────────────────────────────────────────────────────────────────────

/// Transient per-session UI state. Not persisted.
pub struct UiState {
    /// Whether the find/replace panel is open
    pub show_find_replace: bool,
    /// Search state for the document
    pub find_state: FindState,
    /// The panel widget itself (tracks focus)
    pub find_panel: FindReplacePanel,
    /// Status-bar toast, if one is showing
    pub toast_message: Option<String>,
    /// When the toast disappears
    pub toast_expires_at: Option<Instant>,
    /// Modal error, shown until dismissed
    pub error_message: Option<String>,
    /// Set when the window is allowed to close
    pub should_exit: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            show_find_replace: false,
            find_state: FindState::new(),
            find_panel: FindReplacePanel::new(),
            toast_message: None,
            toast_expires_at: None,
            error_message: None,
            should_exit: false,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// App State
// ─────────────────────────────────────────────────────────────────────────────

/// The whole application state.
pub struct AppState {
    /// Document ownership and disk I/O
    pub file: FileController,
    /// Defers destructive actions while edits are unsaved
    pub unsaved_guard: UnsavedChangesGuard,
    /// Defers opening oversized files
    pub large_file_guard: LargeFileGuard,
    /// Persisted settings
    pub settings: Settings,
    /// Transient UI state
    pub ui: UiState,
    /// Whether settings changed since the last save to disk
    pub settings_dirty: bool,
}

impl AppState {
    /// Build the state from loaded settings.
    pub fn new(settings: Settings) -> Self {
        let file = FileController::new(settings.large_file_threshold_bytes);
        Self {
            file,
            unsaved_guard: UnsavedChangesGuard::new(),
            large_file_guard: LargeFileGuard::new(),
            settings,
            ui: UiState::default(),
            settings_dirty: false,
        }
    }

    /// Show a short status toast.
    pub fn show_toast(&mut self, message: impl Into<String>) {
        let message = message.into();
        debug!("toast: {}", message);
        self.ui.toast_message = Some(message);
        self.ui.toast_expires_at = Some(Instant::now() + TOAST_DURATION);
    }

    /// Expire the toast when its time is up.
    pub fn update_toast(&mut self) {
        if let Some(expires_at) = self.ui.toast_expires_at {
            if Instant::now() >= expires_at {
                self.ui.toast_message = None;
                self.ui.toast_expires_at = None;
            }
        }
    }

    /// Show a modal error message.
    pub fn show_error(&mut self, message: impl Into<String>) {
        self.ui.error_message = Some(message.into());
    }

    /// Dismiss the modal error.
    pub fn dismiss_error(&mut self) {
        self.ui.error_message = None;
    }

    /// Record a change to the settings so it gets persisted.
    pub fn mark_settings_dirty(&mut self) {
        self.settings_dirty = true;
    }

    /// Recompute search matches against the current document text.
    pub fn refresh_find_matches(&mut self) {
        if self.ui.show_find_replace {
            let text = self.file.document().content().to_string();
            self.ui.find_state.find_matches(&text);
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::files::GuardState;

    #[test]
    fn test_new_state_is_clean() {
        let state = AppState::default();
        assert!(!state.file.document().is_dirty());
        assert_eq!(state.unsaved_guard.state(), GuardState::Clear);
        assert_eq!(state.large_file_guard.state(), GuardState::Clear);
        assert!(!state.settings_dirty);
        assert!(!state.ui.should_exit);
    }

    #[test]
    fn test_threshold_comes_from_settings() {
        let mut settings = Settings::default();
        settings.large_file_threshold_bytes = 4096;
        let state = AppState::new(settings);
        assert_eq!(state.file.large_file_threshold(), 4096);
    }

    #[test]
    fn test_toast_lifecycle() {
        let mut state = AppState::default();
        state.show_toast("Saved");
        assert_eq!(state.ui.toast_message.as_deref(), Some("Saved"));

        // Force expiry
        state.ui.toast_expires_at = Some(Instant::now() - Duration::from_secs(1));
        state.update_toast();
        assert!(state.ui.toast_message.is_none());
        assert!(state.ui.toast_expires_at.is_none());
    }

    #[test]
    fn test_toast_survives_until_expiry() {
        let mut state = AppState::default();
        state.show_toast("Working");
        state.update_toast();
        assert!(state.ui.toast_message.is_some());
    }

    #[test]
    fn test_error_modal() {
        let mut state = AppState::default();
        state.show_error("Could not read file");
        assert!(state.ui.error_message.is_some());

        state.dismiss_error();
        assert!(state.ui.error_message.is_none());
    }

    #[test]
    fn test_refresh_find_matches_when_panel_open() {
        let mut state = AppState::default();
        state.file.set_content("{\"a\": 1, \"aa\": 2}".to_string());
        state.ui.show_find_replace = true;
        state.ui.find_state.search_term = "a".to_string();

        state.refresh_find_matches();
        assert_eq!(state.ui.find_state.match_count(), 3);
    }

    #[test]
    fn test_refresh_skipped_when_panel_closed() {
        let mut state = AppState::default();
        state.file.set_content("aaa".to_string());
        state.ui.find_state.search_term = "a".to_string();

        state.refresh_find_matches();
        assert_eq!(state.ui.find_state.match_count(), 0);
    }
}
