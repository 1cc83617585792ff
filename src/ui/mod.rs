//! UI components for Jasper
//!
//! Toolbar and the modal dialogs that back the confirmation guards.

pub mod dialogs;
pub mod toolbar;

pub use dialogs::{
    show_error_dialog, show_large_file_dialog, show_unsaved_changes_dialog, LargeFileDecision,
    UnsavedChangesDecision,
};
pub use toolbar::{show_toolbar, ToolbarAction};
