//! Syntax highlighting for the editor
//!
//! Wraps syntect to turn the document text into an egui `LayoutJob` for the
//! editor's custom layouter. The syntax and theme sets are expensive to load,
//! so a single global highlighter is initialized once and reused.

use eframe::egui::text::LayoutJob;
use eframe::egui::{Color32, FontId, TextFormat};
use log::{debug, warn};
use std::sync::OnceLock;
use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle, Theme, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

/// Syntect theme used in dark mode.
pub const DARK_SYNTAX_THEME: &str = "base16-ocean.dark";

/// Syntect theme used in light mode.
pub const LIGHT_SYNTAX_THEME: &str = "InspiredGitHub";

// ─────────────────────────────────────────────────────────────────────────────
// Highlighter
// ─────────────────────────────────────────────────────────────────────────────

/// Holds the loaded syntect sets. Create once, reuse for every frame.
pub struct SyntaxHighlighter {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxHighlighter {
    pub fn new() -> Self {
        let syntax_set = SyntaxSet::load_defaults_newlines();
        let theme_set = ThemeSet::load_defaults();
        debug!(
            "loaded {} syntaxes and {} highlight themes",
            syntax_set.syntaxes().len(),
            theme_set.themes.len()
        );
        Self {
            syntax_set,
            theme_set,
        }
    }

    fn json_syntax(&self) -> Option<&SyntaxReference> {
        self.syntax_set.find_syntax_by_extension("json")
    }

    fn theme_for_mode(&self, dark_mode: bool) -> Option<&Theme> {
        let name = if dark_mode {
            DARK_SYNTAX_THEME
        } else {
            LIGHT_SYNTAX_THEME
        };
        self.theme_set.themes.get(name)
    }

    /// Lay out JSON text with per-token colors.
    ///
    /// Falls back to a plain monospace layout when the JSON syntax or the
    /// requested theme is missing from the bundled sets.
    pub fn layout_json(&self, text: &str, dark_mode: bool, font_size: f32) -> LayoutJob {
        let font_id = FontId::monospace(font_size);

        let (syntax, theme) = match (self.json_syntax(), self.theme_for_mode(dark_mode)) {
            (Some(s), Some(t)) => (s, t),
            _ => {
                warn!("JSON syntax or highlight theme unavailable; using plain layout");
                return plain_layout(text, font_id, dark_mode);
            }
        };

        let mut highlighter = HighlightLines::new(syntax, theme);
        let mut job = LayoutJob::default();

        for line in LinesWithEndings::from(text) {
            match highlighter.highlight_line(line, &self.syntax_set) {
                Ok(ranges) => {
                    for (style, segment) in ranges {
                        let mut format = TextFormat {
                            font_id: font_id.clone(),
                            color: syntect_to_egui_color(style.foreground),
                            ..Default::default()
                        };
                        if style.font_style.contains(FontStyle::ITALIC) {
                            format.italics = true;
                        }
                        if style.font_style.contains(FontStyle::UNDERLINE) {
                            format.underline =
                                eframe::egui::Stroke::new(1.0, format.color);
                        }
                        job.append(segment, 0.0, format);
                    }
                }
                Err(e) => {
                    warn!("highlighting failed on a line: {}", e);
                    job.append(
                        line,
                        0.0,
                        TextFormat {
                            font_id: font_id.clone(),
                            color: fallback_text_color(dark_mode),
                            ..Default::default()
                        },
                    );
                }
            }
        }

        job
    }
}

fn plain_layout(text: &str, font_id: FontId, dark_mode: bool) -> LayoutJob {
    let mut job = LayoutJob::default();
    job.append(
        text,
        0.0,
        TextFormat {
            font_id,
            color: fallback_text_color(dark_mode),
            ..Default::default()
        },
    );
    job
}

fn fallback_text_color(dark_mode: bool) -> Color32 {
    if dark_mode {
        Color32::from_rgb(220, 220, 225)
    } else {
        Color32::from_rgb(32, 32, 36)
    }
}

/// Convert a syntect color to egui's Color32.
pub fn syntect_to_egui_color(color: syntect::highlighting::Color) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}

// ─────────────────────────────────────────────────────────────────────────────
// Global Instance
// ─────────────────────────────────────────────────────────────────────────────

static HIGHLIGHTER: OnceLock<SyntaxHighlighter> = OnceLock::new();

/// The shared highlighter, loaded on first use.
pub fn get_highlighter() -> &'static SyntaxHighlighter {
    HIGHLIGHTER.get_or_init(SyntaxHighlighter::new)
}

/// Lay out JSON text using the shared highlighter.
pub fn highlight_json(text: &str, dark_mode: bool, font_size: f32) -> LayoutJob {
    get_highlighter().layout_json(text, dark_mode, font_size)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_sets_cover_json() {
        let highlighter = SyntaxHighlighter::new();
        assert!(highlighter.json_syntax().is_some());
        assert!(highlighter.theme_for_mode(true).is_some());
        assert!(highlighter.theme_for_mode(false).is_some());
    }

    #[test]
    fn test_layout_covers_full_text() {
        let highlighter = SyntaxHighlighter::new();
        let text = "{\n  \"name\": \"jasper\",\n  \"count\": 42\n}";
        let job = highlighter.layout_json(text, true, 14.0);
        assert_eq!(job.text, text);
        assert!(!job.sections.is_empty());
    }

    #[test]
    fn test_layout_empty_text() {
        let highlighter = SyntaxHighlighter::new();
        let job = highlighter.layout_json("", true, 14.0);
        assert!(job.text.is_empty());
    }

    #[test]
    fn test_strings_and_numbers_get_distinct_colors() {
        let highlighter = SyntaxHighlighter::new();
        let job = highlighter.layout_json("{\"a\": \"text\", \"b\": 42}", true, 14.0);
        let colors: std::collections::HashSet<_> =
            job.sections.iter().map(|s| s.format.color).collect();
        assert!(colors.len() > 1);
    }

    #[test]
    fn test_global_highlighter_is_shared() {
        let h1 = get_highlighter();
        let h2 = get_highlighter();
        assert!(std::ptr::eq(h1, h2));

        let job = highlight_json("[1, 2, 3]", false, 13.0);
        assert_eq!(job.text, "[1, 2, 3]");
    }

    #[test]
    fn test_color_conversion() {
        let c = syntect::highlighting::Color {
            r: 10,
            g: 20,
            b: 30,
            a: 255,
        };
        assert_eq!(syntect_to_egui_color(c), Color32::from_rgb(10, 20, 30));
    }
}
