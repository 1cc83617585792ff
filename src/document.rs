//! Document model for Jasper
//!
//! This module defines the single editable document: its text content, the
//! snapshot of the file it was last loaded from or saved to, and the dirty
//! flag derived from comparing the two.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

// ─────────────────────────────────────────────────────────────────────────────
// File Snapshot
// ─────────────────────────────────────────────────────────────────────────────

/// Metadata of the file the document was last opened from or saved to.
///
/// A snapshot is immutable: opening or saving replaces it wholesale, it is
/// never mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct FileSnapshot {
    /// Full path to the file on disk
    pub path: PathBuf,
    /// File size in bytes at open/save time
    pub size: u64,
    /// Last-modified timestamp at open/save time
    pub modified: Option<SystemTime>,
}

impl FileSnapshot {
    /// Create a snapshot from a path and size.
    pub fn new(path: PathBuf, size: u64, modified: Option<SystemTime>) -> Self {
        Self {
            path,
            size,
            modified,
        }
    }

    /// File name component of the path (e.g. `config.json`).
    pub fn name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("untitled.json")
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Document
// ─────────────────────────────────────────────────────────────────────────────

/// The single open document.
///
/// Dirty tracking is content-based rather than flag-based: the document keeps
/// the text as it was at the last successful open or save, and `is_dirty()`
/// compares against it. Typing an edit back to the persisted text therefore
/// clears the dirty state, matching what a user would expect from the title
/// bar indicator.
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// Current text content
    content: String,
    /// Content as of the last successful open or save
    saved_content: String,
    /// Snapshot of the backing file (None for new/unsaved documents)
    snapshot: Option<FileSnapshot>,
}

impl Document {
    /// Create a new empty document with no backing file.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Snapshot of the backing file, if any.
    pub fn snapshot(&self) -> Option<&FileSnapshot> {
        self.snapshot.as_ref()
    }

    /// Path of the backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.snapshot.as_ref().map(|s| s.path.as_path())
    }

    /// Whether the content differs from the last persisted content.
    pub fn is_dirty(&self) -> bool {
        self.content != self.saved_content
    }

    /// Display title for the window and status bar, with `*` when dirty.
    pub fn title(&self) -> String {
        let name = self
            .snapshot
            .as_ref()
            .map(|s| s.name().to_string())
            .unwrap_or_else(|| "Untitled".to_string());

        if self.is_dirty() {
            format!("{}*", name)
        } else {
            name
        }
    }

    /// Update the content from the editing surface.
    ///
    /// Does not touch the snapshot; dirty state follows from the comparison
    /// against the last persisted content.
    pub fn set_content(&mut self, content: String) {
        self.content = content;
    }

    /// Mutable access to the content buffer for the egui text widget.
    ///
    /// The widget edits the string in place, which keeps dirty tracking
    /// correct because `is_dirty()` is recomputed from content every frame.
    pub fn content_mut(&mut self) -> &mut String {
        &mut self.content
    }

    /// Reset to an empty, clean document with no backing file.
    pub fn clear(&mut self) {
        self.content.clear();
        self.saved_content.clear();
        self.snapshot = None;
    }

    /// Replace the document wholesale after a successful file open.
    pub fn replace(&mut self, content: String, snapshot: FileSnapshot) {
        self.saved_content = content.clone();
        self.content = content;
        self.snapshot = Some(snapshot);
    }

    /// Record a successful save: the current content becomes the persisted
    /// content and the snapshot is replaced.
    pub fn mark_saved(&mut self, snapshot: FileSnapshot) {
        self.saved_content = self.content.clone();
        self.snapshot = Some(snapshot);
    }

    /// Suggested file name for save dialogs.
    pub fn suggested_name(&self) -> String {
        self.snapshot
            .as_ref()
            .map(|s| s.name().to_string())
            .unwrap_or_else(|| "untitled.json".to_string())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(path: &str, size: u64) -> FileSnapshot {
        FileSnapshot::new(PathBuf::from(path), size, Some(SystemTime::now()))
    }

    #[test]
    fn test_new_document_is_clean() {
        let doc = Document::new();
        assert!(!doc.is_dirty());
        assert!(doc.content().is_empty());
        assert!(doc.snapshot().is_none());
        assert!(doc.path().is_none());
    }

    #[test]
    fn test_set_content_marks_dirty() {
        let mut doc = Document::new();
        doc.set_content("{}".to_string());
        assert!(doc.is_dirty());
    }

    #[test]
    fn test_reverting_content_clears_dirty() {
        let mut doc = Document::new();
        doc.replace("{\"a\": 1}".to_string(), snapshot("/test/a.json", 8));
        assert!(!doc.is_dirty());

        doc.set_content("{\"a\": 2}".to_string());
        assert!(doc.is_dirty());

        // Typing the persisted text back clears dirty
        doc.set_content("{\"a\": 1}".to_string());
        assert!(!doc.is_dirty());
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut doc = Document::new();
        doc.replace("content".to_string(), snapshot("/test/a.json", 7));
        doc.set_content("edited".to_string());

        doc.clear();
        assert!(!doc.is_dirty());
        assert!(doc.content().is_empty());
        assert!(doc.snapshot().is_none());
    }

    #[test]
    fn test_replace_sets_snapshot_and_clean_state() {
        let mut doc = Document::new();
        doc.set_content("unsaved edits".to_string());

        doc.replace("loaded".to_string(), snapshot("/test/data.json", 6));
        assert!(!doc.is_dirty());
        assert_eq!(doc.content(), "loaded");
        assert_eq!(doc.path(), Some(Path::new("/test/data.json")));
    }

    #[test]
    fn test_mark_saved_clears_dirty() {
        let mut doc = Document::new();
        doc.set_content("{\"key\": true}".to_string());
        assert!(doc.is_dirty());

        doc.mark_saved(snapshot("/test/out.json", 13));
        assert!(!doc.is_dirty());
        assert_eq!(doc.snapshot().unwrap().size, 13);
    }

    #[test]
    fn test_title_shows_dirty_marker() {
        let mut doc = Document::new();
        assert_eq!(doc.title(), "Untitled");

        doc.set_content("x".to_string());
        assert_eq!(doc.title(), "Untitled*");

        doc.replace("x".to_string(), snapshot("/test/doc.json", 1));
        assert_eq!(doc.title(), "doc.json");

        doc.set_content("y".to_string());
        assert_eq!(doc.title(), "doc.json*");
    }

    #[test]
    fn test_suggested_name() {
        let mut doc = Document::new();
        assert_eq!(doc.suggested_name(), "untitled.json");

        doc.replace(String::new(), snapshot("/test/settings.json", 0));
        assert_eq!(doc.suggested_name(), "settings.json");
    }

    #[test]
    fn test_snapshot_name() {
        let snap = snapshot("/some/dir/data.json", 42);
        assert_eq!(snap.name(), "data.json");
    }
}
