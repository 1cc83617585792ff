//! Editor components for Jasper
//!
//! Search/replace over the document text and syntax highlighting for the
//! editor view.

pub mod find_replace;
pub mod syntax;

pub use find_replace::{FindReplacePanel, FindReplacePanelOutput, FindState};
pub use syntax::highlight_json;
