//! File operations controller for Jasper
//!
//! This module owns the document and orchestrates new/open/save/save-as.
//! Every operation reports its result as an explicit outcome enum rather
//! than a callback: the app layer turns outcomes into toasts, error modals,
//! or the large-file confirmation dialog.
//!
//! Two rules hold throughout:
//! - user cancellation of a picker is a silent no-op, never an error
//! - a failed read or write leaves the document exactly as it was

use crate::document::{Document, FileSnapshot};
use crate::error::{Error, Result};
use crate::files::dialogs;
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

// ─────────────────────────────────────────────────────────────────────────────
// Operation Outcomes
// ─────────────────────────────────────────────────────────────────────────────

/// A file that exceeded the large-file threshold, held between detection
/// and the user's continue/cancel decision.
#[derive(Debug, Clone, PartialEq)]
pub struct LargeFileCandidate {
    /// Path of the file that was not read
    pub path: PathBuf,
    /// Byte size reported by the filesystem
    pub size: u64,
}

impl LargeFileCandidate {
    /// File name component for display in the warning dialog.
    pub fn name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
    }
}

/// Result of an open operation.
#[derive(Debug, PartialEq)]
pub enum OpenOutcome {
    /// The file was read and is now the current document
    Opened,
    /// The file exceeds the threshold and was NOT read; the app should
    /// ask the user before retrying with the size check bypassed
    TooLarge(LargeFileCandidate),
    /// The user dismissed the picker; nothing changed
    Cancelled,
}

/// Result of a save operation.
#[derive(Debug, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Content was written; the document is clean
    Saved,
    /// The user dismissed the save dialog; nothing changed
    Cancelled,
}

// ─────────────────────────────────────────────────────────────────────────────
// File Controller
// ─────────────────────────────────────────────────────────────────────────────

/// Owns the document and the notion of "current file".
///
/// The controller is the only writer of document state: the editing surface
/// mutates content through it (or through `document_mut()` for the in-place
/// egui text buffer), and open/save/new replace snapshots atomically per
/// operation.
#[derive(Debug, Default)]
pub struct FileController {
    /// The single open document
    document: Document,
    /// Files larger than this require explicit confirmation to open
    large_file_threshold: u64,
}

impl FileController {
    /// Create a controller with an empty document.
    pub fn new(large_file_threshold: u64) -> Self {
        Self {
            document: Document::new(),
            large_file_threshold,
        }
    }

    /// The current document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Mutable access for the editing surface.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Update the large-file threshold (settings change).
    pub fn set_large_file_threshold(&mut self, bytes: u64) {
        self.large_file_threshold = bytes;
    }

    /// The configured large-file threshold in bytes.
    pub fn large_file_threshold(&self) -> u64 {
        self.large_file_threshold
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Replace the document with a fresh empty one. Always succeeds.
    pub fn new_document(&mut self) {
        self.document.clear();
        info!("Created new document");
    }

    /// Open a file from a known path.
    ///
    /// The file is stat'ed before it is read: when `skip_size_check` is false
    /// and the size exceeds the threshold, the content is never read and the
    /// document is untouched; the candidate is returned for the app to raise
    /// the size-warning dialog.
    pub fn open_path(&mut self, path: &Path, skip_size_check: bool) -> Result<OpenOutcome> {
        let metadata = fs::metadata(path).map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let size = metadata.len();

        if !skip_size_check && size > self.large_file_threshold {
            debug!(
                "File {} is {} bytes, over the {} byte threshold",
                path.display(),
                size,
                self.large_file_threshold
            );
            return Ok(OpenOutcome::TooLarge(LargeFileCandidate {
                path: path.to_path_buf(),
                size,
            }));
        }

        let content = fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        let snapshot = FileSnapshot::new(path.to_path_buf(), size, metadata.modified().ok());
        self.document.replace(content, snapshot);
        info!("Opened file: {}", path.display());
        Ok(OpenOutcome::Opened)
    }

    /// Open a file via the native picker.
    ///
    /// Cancellation is a silent no-op. A selected file goes through
    /// `open_path` semantics, including the size check.
    pub fn open_with_picker(&mut self) -> Result<OpenOutcome> {
        let initial_dir = self.current_directory();
        match dialogs::open_file_dialog(initial_dir.as_deref()) {
            Some(path) => self.open_path(&path, false),
            None => {
                debug!("Open dialog cancelled");
                Ok(OpenOutcome::Cancelled)
            }
        }
    }

    /// Save the document to its current path, or prompt when it has none.
    ///
    /// On success the document is clean and its snapshot refreshed; on
    /// failure the dirty state is untouched.
    pub fn save(&mut self) -> Result<SaveOutcome> {
        match self.document.path().map(Path::to_path_buf) {
            Some(path) => {
                self.write_to(&path)?;
                Ok(SaveOutcome::Saved)
            }
            None => self.save_as(),
        }
    }

    /// Save the document to a destination chosen in the native save dialog.
    ///
    /// Cancellation is a silent no-op.
    pub fn save_as(&mut self) -> Result<SaveOutcome> {
        let initial_dir = self.current_directory();
        let suggested = self.document.suggested_name();
        match dialogs::save_file_dialog(initial_dir.as_deref(), Some(&suggested)) {
            Some(path) => {
                self.write_to(&path)?;
                Ok(SaveOutcome::Saved)
            }
            None => {
                debug!("Save dialog cancelled");
                Ok(SaveOutcome::Cancelled)
            }
        }
    }

    /// Save to an explicit path without prompting.
    ///
    /// Exposed separately so the save flow is testable without a native
    /// dialog; `save`/`save_as` funnel into this.
    pub fn save_to_path(&mut self, path: &Path) -> Result<()> {
        self.write_to(path)
    }

    /// Update document content from the editing surface.
    pub fn set_content(&mut self, content: String) {
        self.document.set_content(content);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internal helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn write_to(&mut self, path: &Path) -> Result<()> {
        fs::write(path, self.document.content()).map_err(|e| Error::FileWrite {
            path: path.to_path_buf(),
            source: e,
        })?;

        // Re-stat for an accurate snapshot; fall back to the in-memory size
        // if the stat races with something else touching the file.
        let (size, modified) = match fs::metadata(path) {
            Ok(m) => (m.len(), m.modified().ok()),
            Err(_) => (
                self.document.content().len() as u64,
                Some(SystemTime::now()),
            ),
        };

        self.document
            .mark_saved(FileSnapshot::new(path.to_path_buf(), size, modified));
        info!("Saved file: {}", path.display());
        Ok(())
    }

    /// Directory of the current file, used as the pickers' starting point.
    fn current_directory(&self) -> Option<PathBuf> {
        self.document
            .path()
            .and_then(|p| p.parent())
            .map(|p| p.to_path_buf())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
