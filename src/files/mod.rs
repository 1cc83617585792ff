//! File operations module for Jasper
//!
//! This module provides the file-operations workflow: native dialogs, the
//! controller owning the current document, and the confirmation guards for
//! unsaved changes and large files.

pub mod controller;
pub mod dialogs;
pub mod guards;

pub use controller::{FileController, LargeFileCandidate, OpenOutcome, SaveOutcome};
pub use guards::{GuardState, LargeFileGuard, PendingAction, UnsavedChangesGuard};
