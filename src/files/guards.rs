//! Confirmation guards for destructive file operations
//!
//! Two small state machines sit between the UI and the file controller:
//!
//! - `UnsavedChangesGuard` intercepts new/open/exit while the document has
//!   unsaved edits and holds the requested action until the user picks
//!   save, discard, or cancel.
//! - `LargeFileGuard` intercepts opens of files above the configured size
//!   threshold until the user confirms or cancels.
//!
//! Both hold at most one pending item. Requesting a second guarded action
//! while one is awaiting a decision replaces the first silently; the UI is
//! modal so this only happens through programmatic use.

use crate::files::LargeFileCandidate;
use log::debug;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Pending Actions
// ─────────────────────────────────────────────────────────────────────────────

/// Actions that may need confirmation before execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    /// Replace the document with a fresh empty one
    NewDocument,
    /// Open a specific file (e.g. from the recent-files list)
    OpenPath(PathBuf),
    /// Open the native file picker
    OpenPicker,
    /// Exit the application
    Exit,
}

/// State of a guard's decision cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    /// No pending item; guarded requests pass straight through
    Clear,
    /// A pending item is held and a confirmation dialog is visible
    AwaitingDecision,
}

// ─────────────────────────────────────────────────────────────────────────────
// Unsaved Changes Guard
// ─────────────────────────────────────────────────────────────────────────────

/// Defers an action while the document has unsaved changes.
#[derive(Debug, Default)]
pub struct UnsavedChangesGuard {
    pending: Option<PendingAction>,
}

impl UnsavedChangesGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state of the guard.
    pub fn state(&self) -> GuardState {
        if self.pending.is_some() {
            GuardState::AwaitingDecision
        } else {
            GuardState::Clear
        }
    }

    /// The action awaiting a decision, if any.
    pub fn pending(&self) -> Option<&PendingAction> {
        self.pending.as_ref()
    }

    /// Request an action, deferring it when the document is dirty.
    ///
    /// Returns `true` if the action was deferred (the caller must show the
    /// confirmation dialog) and `false` if the caller should run the action
    /// immediately. A request made while another is awaiting a decision
    /// replaces the held action.
    pub fn guard(&mut self, action: PendingAction, dirty: bool) -> bool {
        if !dirty {
            return false;
        }
        if let Some(previous) = self.pending.replace(action) {
            debug!("Replacing undecided pending action {:?}", previous);
        }
        true
    }

    /// The user chose "Save": take the pending action so the caller can
    /// run it after a successful save.
    ///
    /// Returns `None` when there is nothing pending (e.g. the dialog fired
    /// twice in one frame).
    pub fn confirm_save(&mut self) -> Option<PendingAction> {
        self.pending.take()
    }

    /// The user chose "Discard": take the pending action to run immediately
    /// without saving.
    pub fn confirm_discard(&mut self) -> Option<PendingAction> {
        self.pending.take()
    }

    /// The user chose "Cancel": drop the pending action un-invoked.
    pub fn cancel(&mut self) {
        if let Some(action) = self.pending.take() {
            debug!("Cancelled pending action {:?}", action);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Large File Guard
// ─────────────────────────────────────────────────────────────────────────────

/// Defers a file open while the file exceeds the size threshold.
#[derive(Debug, Default)]
pub struct LargeFileGuard {
    candidate: Option<LargeFileCandidate>,
}

impl LargeFileGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state of the guard.
    pub fn state(&self) -> GuardState {
        if self.candidate.is_some() {
            GuardState::AwaitingDecision
        } else {
            GuardState::Clear
        }
    }

    /// The candidate awaiting a decision, if any.
    pub fn candidate(&self) -> Option<&LargeFileCandidate> {
        self.candidate.as_ref()
    }

    /// Hold a too-large candidate; the caller shows the warning dialog.
    pub fn defer(&mut self, candidate: LargeFileCandidate) {
        debug!(
            "Deferring open of {} ({} bytes)",
            candidate.path.display(),
            candidate.size
        );
        self.candidate = Some(candidate);
    }

    /// The user chose to open anyway: yields the path for the caller to
    /// re-open with the size check bypassed.
    pub fn confirm_open(&mut self) -> Option<PathBuf> {
        self.candidate.take().map(|c| c.path)
    }

    /// The user backed out: drop the candidate, the editor is untouched.
    pub fn cancel(&mut self) {
        if let Some(candidate) = self.candidate.take() {
            debug!("Cancelled open of {}", candidate.path.display());
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ─────────────────────────────────────────────────────────────────────────
    // UnsavedChangesGuard
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_guard_clean_document_passes_through() {
        let mut guard = UnsavedChangesGuard::new();
        let deferred = guard.guard(PendingAction::NewDocument, false);

        assert!(!deferred);
        assert_eq!(guard.state(), GuardState::Clear);
        assert!(guard.pending().is_none());
    }

    #[test]
    fn test_guard_dirty_document_defers() {
        let mut guard = UnsavedChangesGuard::new();
        let deferred = guard.guard(PendingAction::NewDocument, true);

        assert!(deferred);
        assert_eq!(guard.state(), GuardState::AwaitingDecision);
        assert_eq!(guard.pending(), Some(&PendingAction::NewDocument));
    }

    #[test]
    fn test_confirm_discard_yields_action_once() {
        let mut guard = UnsavedChangesGuard::new();
        guard.guard(PendingAction::NewDocument, true);

        // The deferred action is handed back exactly once
        assert_eq!(guard.confirm_discard(), Some(PendingAction::NewDocument));
        assert_eq!(guard.state(), GuardState::Clear);
        assert_eq!(guard.confirm_discard(), None);
    }

    #[test]
    fn test_confirm_save_yields_action() {
        let mut guard = UnsavedChangesGuard::new();
        guard.guard(PendingAction::OpenPicker, true);

        assert_eq!(guard.confirm_save(), Some(PendingAction::OpenPicker));
        assert_eq!(guard.state(), GuardState::Clear);
    }

    #[test]
    fn test_cancel_drops_action_uninvoked() {
        let mut guard = UnsavedChangesGuard::new();
        guard.guard(PendingAction::Exit, true);

        guard.cancel();
        assert_eq!(guard.state(), GuardState::Clear);
        // Nothing left to take: the action is guaranteed never to run
        assert_eq!(guard.confirm_discard(), None);
    }

    #[test]
    fn test_second_guard_replaces_pending() {
        let mut guard = UnsavedChangesGuard::new();
        guard.guard(PendingAction::NewDocument, true);
        guard.guard(PendingAction::Exit, true);

        // The earlier action is dropped silently, not queued
        assert_eq!(guard.pending(), Some(&PendingAction::Exit));
        assert_eq!(guard.confirm_discard(), Some(PendingAction::Exit));
        assert_eq!(guard.confirm_discard(), None);
    }

    #[test]
    fn test_guard_open_path_holds_the_path() {
        let mut guard = UnsavedChangesGuard::new();
        let path = PathBuf::from("/data/file.json");
        guard.guard(PendingAction::OpenPath(path.clone()), true);

        assert_eq!(
            guard.confirm_discard(),
            Some(PendingAction::OpenPath(path))
        );
    }

    // ─────────────────────────────────────────────────────────────────────────
    // LargeFileGuard
    // ─────────────────────────────────────────────────────────────────────────

    fn candidate(size: u64) -> LargeFileCandidate {
        LargeFileCandidate {
            path: PathBuf::from("/data/huge.json"),
            size,
        }
    }

    #[test]
    fn test_large_file_guard_starts_clear() {
        let guard = LargeFileGuard::new();
        assert_eq!(guard.state(), GuardState::Clear);
        assert!(guard.candidate().is_none());
    }

    #[test]
    fn test_defer_holds_candidate() {
        let mut guard = LargeFileGuard::new();
        guard.defer(candidate(50 * 1024 * 1024));

        assert_eq!(guard.state(), GuardState::AwaitingDecision);
        let held = guard.candidate().unwrap();
        assert_eq!(held.size, 50 * 1024 * 1024);
        assert_eq!(held.name(), "huge.json");
    }

    #[test]
    fn test_confirm_open_yields_path_once() {
        let mut guard = LargeFileGuard::new();
        guard.defer(candidate(1));

        assert_eq!(
            guard.confirm_open(),
            Some(PathBuf::from("/data/huge.json"))
        );
        assert_eq!(guard.state(), GuardState::Clear);
        assert_eq!(guard.confirm_open(), None);
    }

    #[test]
    fn test_cancel_drops_candidate() {
        let mut guard = LargeFileGuard::new();
        guard.defer(candidate(1));

        guard.cancel();
        assert_eq!(guard.state(), GuardState::Clear);
        assert_eq!(guard.confirm_open(), None);
    }
}
