//! JSON document operations for Jasper
//!
//! Validation, pretty-printing, and minification of the document text.
//! All operations parse with serde_json (built with `preserve_order`, so
//! object keys keep their document order through a reformat) and report
//! failures with the parser's line/column position.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use std::fmt;

// ─────────────────────────────────────────────────────────────────────────────
// Validation Issues
// ─────────────────────────────────────────────────────────────────────────────

/// A JSON syntax problem with its position in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonIssue {
    /// 1-indexed line of the problem
    pub line: usize,
    /// 1-indexed column of the problem
    pub column: usize,
    /// Parser message
    pub message: String,
}

impl fmt::Display for JsonIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}: {}", self.line, self.column, self.message)
    }
}

impl From<serde_json::Error> for JsonIssue {
    fn from(err: serde_json::Error) -> Self {
        Self {
            line: err.line(),
            column: err.column(),
            // serde_json appends " at line N column M" to its messages;
            // strip it since we carry the position separately
            message: err
                .to_string()
                .split(" at line ")
                .next()
                .unwrap_or_default()
                .to_string(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Operations
// ─────────────────────────────────────────────────────────────────────────────

/// Check that the text is a single well-formed JSON value.
pub fn validate(text: &str) -> Result<(), JsonIssue> {
    serde_json::from_str::<Value>(text)
        .map(|_| ())
        .map_err(JsonIssue::from)
}

/// Reformat the text with the given indent width (spaces per level).
///
/// Returns the validation issue when the text is not well-formed; the
/// caller leaves the document unchanged in that case.
pub fn pretty(text: &str, indent: u8) -> Result<String, JsonIssue> {
    let value: Value = serde_json::from_str(text)?;

    let indent_bytes = vec![b' '; indent as usize];
    let formatter = PrettyFormatter::with_indent(&indent_bytes);
    let mut out = Vec::with_capacity(text.len());
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    value.serialize(&mut serializer).map_err(JsonIssue::from)?;

    // Serializer output is valid UTF-8 by construction
    Ok(String::from_utf8(out).unwrap_or_default())
}

/// Reformat the text with all insignificant whitespace removed.
pub fn minify(text: &str) -> Result<String, JsonIssue> {
    let value: Value = serde_json::from_str(text)?;
    serde_json::to_string(&value).map_err(JsonIssue::from)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
