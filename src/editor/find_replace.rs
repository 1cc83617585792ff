//! Find and Replace for the editor
//!
//! Search state (literal, whole-word, and regex modes with match navigation)
//! and the floating panel that drives it. The panel reports requested actions
//! through `FindReplacePanelOutput` so the app can apply them to the document.

use eframe::egui::{self, Color32, Key, RichText, Ui, Vec2};
use log::debug;
use regex::Regex;

// ─────────────────────────────────────────────────────────────────────────────
// Find State
// ─────────────────────────────────────────────────────────────────────────────

/// Search and replace state for the document.
///
/// Matches are stored as byte ranges into the text they were computed from;
/// they must be recomputed after any edit.
#[derive(Debug, Clone, Default)]
pub struct FindState {
    /// Current search term
    pub search_term: String,
    /// Current replacement text
    pub replace_term: String,
    /// Case-sensitive matching
    pub case_sensitive: bool,
    /// Match whole words only
    pub whole_word: bool,
    /// Interpret the search term as a regex
    pub use_regex: bool,
    /// Index of the active match
    pub current_match: usize,
    /// All matches as (start, end) byte ranges
    pub matches: Vec<(usize, usize)>,
    /// Whether the replace row is shown
    pub is_replace_mode: bool,
}

impl FindState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute `matches` against the given text.
    ///
    /// Returns the number of matches. An empty term or an invalid regex
    /// yields zero matches.
    pub fn find_matches(&mut self, text: &str) -> usize {
        self.matches.clear();

        if self.search_term.is_empty() {
            return 0;
        }

        if self.use_regex {
            self.find_regex_matches(text);
        } else {
            self.find_literal_matches(text);
        }

        if self.current_match >= self.matches.len() {
            self.current_match = 0;
        }

        self.matches.len()
    }

    // Matching runs over the original text so the stored ranges are valid
    // byte offsets into it. Lowercasing the whole haystack up front would
    // shift offsets for characters whose folded form has a different byte
    // length (U+0130, U+017F).
    fn find_literal_matches(&mut self, text: &str) {
        let needle: Vec<char> = if self.case_sensitive {
            self.search_term.chars().collect()
        } else {
            self.search_term.chars().flat_map(char::to_lowercase).collect()
        };
        if needle.is_empty() {
            return;
        }

        let mut pos = 0;
        while pos < text.len() {
            match self.match_at(text, pos, &needle) {
                Some(end) if !self.whole_word || is_word_bounded(text, pos, end) => {
                    self.matches.push((pos, end));
                    pos = end;
                }
                _ => {
                    // Step one whole character; `pos` must stay a char boundary
                    pos += text[pos..].chars().next().map_or(1, char::len_utf8);
                }
            }
        }
    }

    /// Try to match the folded needle at byte offset `start` of `text`.
    /// Returns the end byte offset on success; both ends are char boundaries.
    fn match_at(&self, text: &str, start: usize, needle: &[char]) -> Option<usize> {
        let mut ni = 0;
        let mut end = start;
        for c in text[start..].chars() {
            if self.case_sensitive {
                if c != needle[ni] {
                    return None;
                }
                ni += 1;
            } else {
                for folded in c.to_lowercase() {
                    if ni >= needle.len() || folded != needle[ni] {
                        return None;
                    }
                    ni += 1;
                }
            }
            end += c.len_utf8();
            if ni == needle.len() {
                return Some(end);
            }
        }
        None
    }

    fn find_regex_matches(&mut self, text: &str) {
        let mut pattern = if self.case_sensitive {
            self.search_term.clone()
        } else {
            format!("(?i){}", self.search_term)
        };
        if self.whole_word {
            pattern = format!(r"\b{}\b", pattern);
        }

        match Regex::new(&pattern) {
            Ok(re) => {
                for m in re.find_iter(text) {
                    self.matches.push((m.start(), m.end()));
                }
            }
            Err(e) => {
                // Treat an invalid pattern as no matches while the user types
                debug!("invalid search pattern '{}': {}", self.search_term, e);
            }
        }
    }

    /// Advance to the next match, wrapping at the end.
    pub fn next_match(&mut self) -> Option<usize> {
        if self.matches.is_empty() {
            return None;
        }
        self.current_match = (self.current_match + 1) % self.matches.len();
        Some(self.current_match)
    }

    /// Step back to the previous match, wrapping at the start.
    pub fn prev_match(&mut self) -> Option<usize> {
        if self.matches.is_empty() {
            return None;
        }
        self.current_match = self
            .current_match
            .checked_sub(1)
            .unwrap_or(self.matches.len() - 1);
        Some(self.current_match)
    }

    /// Byte range of the active match.
    pub fn current_match_position(&self) -> Option<(usize, usize)> {
        self.matches.get(self.current_match).copied()
    }

    /// Replace the active match, returning the new text.
    ///
    /// Returns None when there is no active match. The caller must rerun
    /// `find_matches` on the result.
    pub fn replace_current(&self, text: &str) -> Option<String> {
        let (start, end) = self.current_match_position()?;

        let mut out = String::with_capacity(text.len());
        out.push_str(&text[..start]);
        out.push_str(&self.replace_term);
        out.push_str(&text[end..]);
        Some(out)
    }

    /// Replace every match, returning the new text.
    pub fn replace_all(&self, text: &str) -> String {
        if self.matches.is_empty() {
            return text.to_string();
        }

        let mut out = String::with_capacity(text.len());
        let mut last_end = 0;
        for &(start, end) in &self.matches {
            out.push_str(&text[last_end..start]);
            out.push_str(&self.replace_term);
            last_end = end;
        }
        out.push_str(&text[last_end..]);
        out
    }

    /// Drop all matches and reset the cursor.
    pub fn clear(&mut self) {
        self.matches.clear();
        self.current_match = 0;
    }

    pub fn has_matches(&self) -> bool {
        !self.matches.is_empty()
    }

    pub fn match_count(&self) -> usize {
        self.matches.len()
    }
}

/// Whether text[start..end] sits on word boundaries on both sides.
fn is_word_bounded(text: &str, start: usize, end: usize) -> bool {
    let is_word_char = |c: char| c.is_alphanumeric() || c == '_';

    let left_ok = start == 0
        || !text[..start]
            .chars()
            .last()
            .map(is_word_char)
            .unwrap_or(false);
    let right_ok = end >= text.len()
        || !text[end..]
            .chars()
            .next()
            .map(is_word_char)
            .unwrap_or(false);

    left_ok && right_ok
}

// ─────────────────────────────────────────────────────────────────────────────
// Find/Replace Panel
// ─────────────────────────────────────────────────────────────────────────────

/// Actions requested by the panel this frame.
#[derive(Debug, Clone, Default)]
pub struct FindReplacePanelOutput {
    /// Search term or options changed; matches need recomputing
    pub search_changed: bool,
    pub next_requested: bool,
    pub prev_requested: bool,
    pub replace_requested: bool,
    pub replace_all_requested: bool,
    pub close_requested: bool,
}

/// Floating find/replace panel anchored to the top of the window.
pub struct FindReplacePanel {
    /// Focus the search input on the next frame
    focus_search: bool,
}

impl Default for FindReplacePanel {
    fn default() -> Self {
        Self::new()
    }
}

impl FindReplacePanel {
    pub fn new() -> Self {
        Self { focus_search: true }
    }

    /// Focus the search input the next time the panel is shown.
    pub fn request_focus(&mut self) {
        self.focus_search = true;
    }

    /// Render the panel and collect the requested actions.
    pub fn show(
        &mut self,
        ctx: &egui::Context,
        find_state: &mut FindState,
        is_dark: bool,
    ) -> FindReplacePanelOutput {
        let mut output = FindReplacePanelOutput::default();

        let (panel_bg, border_color, text_color, muted_color, accent_color) = if is_dark {
            (
                Color32::from_rgb(45, 45, 48),
                Color32::from_rgb(70, 70, 80),
                Color32::from_rgb(220, 220, 225),
                Color32::from_rgb(140, 140, 148),
                Color32::from_rgb(100, 180, 255),
            )
        } else {
            (
                Color32::from_rgb(250, 250, 251),
                Color32::from_rgb(200, 200, 206),
                Color32::from_rgb(32, 32, 36),
                Color32::from_rgb(120, 120, 126),
                Color32::from_rgb(0, 120, 212),
            )
        };

        let frame = egui::Frame::none()
            .fill(panel_bg)
            .stroke(egui::Stroke::new(1.0, border_color))
            .inner_margin(egui::Margin::symmetric(12.0, 8.0))
            .rounding(egui::Rounding::same(6.0))
            .shadow(egui::epaint::Shadow {
                offset: egui::vec2(0.0, 2.0),
                blur: 8.0,
                spread: 0.0,
                color: Color32::from_black_alpha(40),
            });

        egui::Window::new("Find and Replace")
            .id(egui::Id::new("find_replace_panel"))
            .title_bar(false)
            .resizable(false)
            .collapsible(false)
            .anchor(egui::Align2::CENTER_TOP, [0.0, 48.0])
            .frame(frame)
            .show(ctx, |ui| {
                ui.set_min_width(420.0);

                let (escape, enter, f3_next, f3_prev, ctrl_h) = ui.input(|i| {
                    (
                        i.key_pressed(Key::Escape),
                        i.key_pressed(Key::Enter),
                        i.key_pressed(Key::F3) && !i.modifiers.shift,
                        i.key_pressed(Key::F3) && i.modifiers.shift,
                        i.modifiers.ctrl && i.key_pressed(Key::H),
                    )
                });

                if escape {
                    output.close_requested = true;
                }
                if enter || f3_next {
                    output.next_requested = true;
                }
                if f3_prev {
                    output.prev_requested = true;
                }
                if ctrl_h {
                    find_state.is_replace_mode = !find_state.is_replace_mode;
                }

                // Header row
                ui.horizontal(|ui| {
                    let title = if find_state.is_replace_mode {
                        "Find and Replace"
                    } else {
                        "Find"
                    };
                    ui.label(RichText::new(title).size(14.0).color(text_color).strong());

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui
                            .add(
                                egui::Button::new(
                                    RichText::new("×").size(16.0).color(muted_color),
                                )
                                .frame(false),
                            )
                            .on_hover_text("Close (Escape)")
                            .clicked()
                        {
                            output.close_requested = true;
                        }

                        let mode_icon = if find_state.is_replace_mode { "⇅" } else { "⇄" };
                        if ui
                            .add(
                                egui::Button::new(
                                    RichText::new(mode_icon).size(14.0).color(muted_color),
                                )
                                .frame(false),
                            )
                            .on_hover_text("Toggle Replace (Ctrl+H)")
                            .clicked()
                        {
                            find_state.is_replace_mode = !find_state.is_replace_mode;
                        }
                    });
                });

                ui.add_space(6.0);

                // Search input + match counter
                ui.horizontal(|ui| {
                    ui.label(RichText::new("🔍").size(14.0));

                    let search_response = ui.add_sized(
                        Vec2::new(260.0, 24.0),
                        egui::TextEdit::singleline(&mut find_state.search_term)
                            .id(egui::Id::new("find_replace_search_input"))
                            .hint_text("Search...")
                            .font(egui::FontId::proportional(13.0)),
                    );

                    if self.focus_search {
                        search_response.request_focus();
                        self.focus_search = false;
                    }

                    if search_response.changed() {
                        output.search_changed = true;
                    }

                    let match_text = if find_state.matches.is_empty() {
                        if find_state.search_term.is_empty() {
                            String::new()
                        } else {
                            "No matches".to_string()
                        }
                    } else {
                        format!(
                            "{} of {}",
                            find_state.current_match + 1,
                            find_state.matches.len()
                        )
                    };
                    ui.label(RichText::new(match_text).size(12.0).color(muted_color));
                });

                if find_state.is_replace_mode {
                    ui.add_space(4.0);
                    ui.horizontal(|ui| {
                        ui.label(RichText::new("↳").size(14.0).color(muted_color));
                        ui.add_sized(
                            Vec2::new(260.0, 24.0),
                            egui::TextEdit::singleline(&mut find_state.replace_term)
                                .hint_text("Replace with...")
                                .font(egui::FontId::proportional(13.0)),
                        );
                    });
                }

                ui.add_space(8.0);

                // Options + navigation + replace buttons
                ui.horizontal(|ui| {
                    let case_btn = ui.add(toggle_button(
                        "Aa",
                        "Case Sensitive",
                        find_state.case_sensitive,
                        is_dark,
                        accent_color,
                    ));
                    if case_btn.clicked() {
                        find_state.case_sensitive = !find_state.case_sensitive;
                        output.search_changed = true;
                    }

                    ui.add_space(4.0);

                    let word_btn = ui.add(toggle_button(
                        "W",
                        "Whole Word",
                        find_state.whole_word,
                        is_dark,
                        accent_color,
                    ));
                    if word_btn.clicked() {
                        find_state.whole_word = !find_state.whole_word;
                        output.search_changed = true;
                    }

                    ui.add_space(4.0);

                    let regex_btn = ui.add(toggle_button(
                        ".*",
                        "Use Regex",
                        find_state.use_regex,
                        is_dark,
                        accent_color,
                    ));
                    if regex_btn.clicked() {
                        find_state.use_regex = !find_state.use_regex;
                        output.search_changed = true;
                    }

                    ui.add_space(16.0);

                    let has_matches = find_state.has_matches();

                    if ui
                        .add_enabled(
                            has_matches,
                            egui::Button::new(RichText::new("◀").size(12.0))
                                .min_size(Vec2::new(28.0, 24.0)),
                        )
                        .on_hover_text("Previous (Shift+F3)")
                        .clicked()
                    {
                        output.prev_requested = true;
                    }

                    if ui
                        .add_enabled(
                            has_matches,
                            egui::Button::new(RichText::new("▶").size(12.0))
                                .min_size(Vec2::new(28.0, 24.0)),
                        )
                        .on_hover_text("Next (F3 or Enter)")
                        .clicked()
                    {
                        output.next_requested = true;
                    }

                    if find_state.is_replace_mode {
                        ui.add_space(8.0);

                        if ui
                            .add_enabled(
                                has_matches,
                                egui::Button::new("Replace").min_size(Vec2::new(60.0, 24.0)),
                            )
                            .clicked()
                        {
                            output.replace_requested = true;
                        }

                        if ui
                            .add_enabled(
                                has_matches,
                                egui::Button::new("Replace All").min_size(Vec2::new(80.0, 24.0)),
                            )
                            .clicked()
                        {
                            output.replace_all_requested = true;
                        }
                    }
                });

                ui.add_space(4.0);
                ui.label(
                    RichText::new("Enter/F3: Next   Shift+F3: Prev   Esc: Close")
                        .size(10.0)
                        .color(muted_color),
                );
            });

        output
    }
}

/// Small square toggle button used for the search options.
fn toggle_button<'a>(
    label: &'a str,
    tooltip: &'a str,
    active: bool,
    is_dark: bool,
    accent_color: Color32,
) -> impl egui::Widget + 'a {
    move |ui: &mut Ui| -> egui::Response {
        let text_color = if active {
            accent_color
        } else if is_dark {
            Color32::from_rgb(160, 160, 166)
        } else {
            Color32::from_rgb(100, 100, 106)
        };

        let bg_color = if active {
            if is_dark {
                Color32::from_rgb(50, 70, 90)
            } else {
                Color32::from_rgb(220, 235, 250)
            }
        } else {
            Color32::TRANSPARENT
        };

        let border_color = if active {
            accent_color
        } else if is_dark {
            Color32::from_rgb(70, 70, 80)
        } else {
            Color32::from_rgb(185, 185, 192)
        };

        let response = ui.add(
            egui::Button::new(RichText::new(label).size(12.0).color(text_color).strong())
                .fill(bg_color)
                .stroke(egui::Stroke::new(1.0, border_color))
                .min_size(Vec2::new(28.0, 24.0)),
        );

        response.on_hover_text(tooltip)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_empty() {
        let state = FindState::new();
        assert!(state.search_term.is_empty());
        assert!(!state.has_matches());
        assert_eq!(state.match_count(), 0);
    }

    #[test]
    fn test_empty_term_finds_nothing() {
        let mut state = FindState::new();
        assert_eq!(state.find_matches("some text"), 0);
    }

    #[test]
    fn test_literal_matches() {
        let mut state = FindState::new();
        state.search_term = "key".to_string();
        let count = state.find_matches("{\"key\": \"value\", \"key2\": 1}");
        assert_eq!(count, 2);
        assert_eq!(state.matches[0], (2, 5));
    }

    #[test]
    fn test_case_insensitive_by_default() {
        let mut state = FindState::new();
        state.search_term = "name".to_string();
        assert_eq!(state.find_matches("Name NAME name"), 3);
    }

    #[test]
    fn test_case_sensitive() {
        let mut state = FindState::new();
        state.search_term = "Name".to_string();
        state.case_sensitive = true;
        assert_eq!(state.find_matches("Name NAME name"), 1);
        assert_eq!(state.matches, vec![(0, 4)]);
    }

    #[test]
    fn test_whole_word() {
        let mut state = FindState::new();
        state.search_term = "id".to_string();
        state.whole_word = true;
        assert_eq!(state.find_matches("id ident _id id"), 2);
    }

    #[test]
    fn test_whole_word_treats_underscore_as_word_char() {
        let mut state = FindState::new();
        state.search_term = "user".to_string();
        state.whole_word = true;
        assert_eq!(state.find_matches("user user_name user"), 2);
    }

    #[test]
    fn test_regex_matches() {
        let mut state = FindState::new();
        state.search_term = r"\d+".to_string();
        state.use_regex = true;
        let count = state.find_matches("a1bc23d456");
        assert_eq!(count, 3);
        assert_eq!(state.matches, vec![(1, 2), (3, 5), (6, 9)]);
    }

    #[test]
    fn test_invalid_regex_finds_nothing() {
        let mut state = FindState::new();
        state.search_term = "[unclosed".to_string();
        state.use_regex = true;
        assert_eq!(state.find_matches("anything"), 0);
    }

    #[test]
    fn test_regex_with_whole_word() {
        let mut state = FindState::new();
        state.search_term = "test".to_string();
        state.use_regex = true;
        state.whole_word = true;
        assert_eq!(state.find_matches("test testing tested test"), 2);
    }

    #[test]
    fn test_next_wraps_around() {
        let mut state = FindState::new();
        state.search_term = "x".to_string();
        state.find_matches("axbxcx");

        assert_eq!(state.next_match(), Some(1));
        assert_eq!(state.next_match(), Some(2));
        assert_eq!(state.next_match(), Some(0));
    }

    #[test]
    fn test_prev_wraps_around() {
        let mut state = FindState::new();
        state.search_term = "x".to_string();
        state.find_matches("axbxcx");

        assert_eq!(state.prev_match(), Some(2));
        assert_eq!(state.prev_match(), Some(1));
    }

    #[test]
    fn test_navigation_with_no_matches() {
        let mut state = FindState::new();
        assert!(state.next_match().is_none());
        assert!(state.prev_match().is_none());
    }

    #[test]
    fn test_current_match_clamped_after_research() {
        let mut state = FindState::new();
        state.search_term = "x".to_string();
        state.find_matches("xxxxx");
        state.current_match = 4;

        state.search_term = "y".to_string();
        state.find_matches("xy");
        assert_eq!(state.current_match, 0);
    }

    #[test]
    fn test_replace_current() {
        let mut state = FindState::new();
        state.search_term = "null".to_string();
        state.replace_term = "0".to_string();
        let text = "{\"a\": null, \"b\": null}";
        state.find_matches(text);
        state.next_match();

        let result = state.replace_current(text);
        assert_eq!(result, Some("{\"a\": null, \"b\": 0}".to_string()));
    }

    #[test]
    fn test_replace_current_without_matches() {
        let state = FindState::new();
        assert!(state.replace_current("text").is_none());
    }

    #[test]
    fn test_replace_all() {
        let mut state = FindState::new();
        state.search_term = "a".to_string();
        state.replace_term = "X".to_string();
        state.find_matches("abracadabra");
        assert_eq!(state.replace_all("abracadabra"), "XbrXcXdXbrX");
    }

    #[test]
    fn test_replace_all_with_empty_replacement() {
        let mut state = FindState::new();
        state.search_term = " ".to_string();
        state.find_matches("a b c");
        assert_eq!(state.replace_all("a b c"), "abc");
    }

    #[test]
    fn test_replace_all_without_matches_is_identity() {
        let state = FindState::new();
        assert_eq!(state.replace_all("unchanged"), "unchanged");
    }

    #[test]
    fn test_clear_resets_cursor() {
        let mut state = FindState::new();
        state.search_term = "x".to_string();
        state.find_matches("xxx");
        state.next_match();

        state.clear();
        assert!(!state.has_matches());
        assert_eq!(state.current_match, 0);
    }

    #[test]
    fn test_non_overlapping_matches() {
        let mut state = FindState::new();
        state.search_term = "aa".to_string();
        assert_eq!(state.find_matches("aaaa"), 2);
        assert_eq!(state.matches, vec![(0, 2), (2, 4)]);
    }

    #[test]
    fn test_unicode_search() {
        let mut state = FindState::new();
        state.search_term = "héllo".to_string();
        assert_eq!(state.find_matches("héllo wörld héllo"), 2);
    }

    #[test]
    fn test_matches_stay_on_char_boundaries_with_dotted_capital_i() {
        // 'İ' (U+0130) lowercases to two chars, so folding the haystack
        // would shift every later offset
        let mut state = FindState::new();
        state.search_term = "b".to_string();
        state.replace_term = "B".to_string();

        let text = "İİb";
        assert_eq!(state.find_matches(text), 1);
        assert_eq!(state.matches, vec![(4, 5)]);
        assert_eq!(state.replace_current(text), Some("İİB".to_string()));
    }

    #[test]
    fn test_case_insensitive_needle_with_multibyte_chars() {
        let mut state = FindState::new();
        state.search_term = "HÉLLO".to_string();
        let text = "héllo wörld héllo";
        assert_eq!(state.find_matches(text), 2);
        assert_eq!(state.replace_all(text), " wörld ");
    }

    #[test]
    fn test_whole_word_skips_over_multibyte_chars() {
        let mut state = FindState::new();
        state.search_term = "é".to_string();
        state.whole_word = true;
        // The rejected match at the start must be skipped a whole char at
        // a time, not byte by byte
        assert_eq!(state.find_matches("éé é"), 1);
        assert_eq!(state.matches, vec![(5, 7)]);
    }

    #[test]
    fn test_multiline_search() {
        let mut state = FindState::new();
        state.search_term = "\n".to_string();
        state.replace_term = " ".to_string();
        state.find_matches("a\nb\nc");
        assert_eq!(state.replace_all("a\nb\nc"), "a b c");
    }

    #[test]
    fn test_panel_focus_request() {
        let mut panel = FindReplacePanel::new();
        panel.focus_search = false;
        panel.request_focus();
        assert!(panel.focus_search);
    }
}
