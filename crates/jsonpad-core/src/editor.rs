//! Widget state machine.
//!
//! # Overview
//!
//! [`JsonEditor`] is the controlled-state core of the widget. The host owns
//! the authoritative document text; the editor keeps a read-only mirror and
//! derives everything else from it — line index, validity, search matches.
//! Mutations never touch the mirror directly: each mutator computes the full
//! replacement text, notifies subscribers, and waits for the host to feed the
//! value back through [`set_value`](JsonEditor::set_value).
//!
//! This round-trip keeps the host in charge of whether and how a proposal is
//! applied (undo stacks, validation gating, persistence), exactly like a
//! value/on-change form control.
//!
//! # Example
//!
//! ```rust
//! use jsonpad_core::JsonEditor;
//! use std::sync::mpsc;
//!
//! let mut editor = JsonEditor::new("{\"a\":1}");
//! assert!(editor.validity().is_valid);
//!
//! let (tx, rx) = mpsc::channel();
//! editor.subscribe(move |change| {
//!     let _ = tx.send(change.clone());
//! });
//!
//! // Pretty-print: the editor proposes, the host applies.
//! assert!(editor.format());
//! let proposal = rx.recv().unwrap();
//! assert_eq!(proposal.text, "{\n  \"a\": 1\n}");
//! editor.set_value(&proposal.text);
//! assert_eq!(editor.line_count(), 3);
//! ```

use crate::edit::{self, Selection};
use crate::json::{self, Validity};
use crate::line_index::LineIndex;
use crate::scroll::{ScrollSync, SurfaceScroll};
use crate::search::SearchState;

/// Default height hint, in text rows, for the non-expanded state.
pub const DEFAULT_HEIGHT_HINT: usize = 20;

/// What triggered a proposed value change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeSource {
    /// The user edited the text directly.
    Edit,
    /// Pretty-print with 2-space indentation.
    Format,
    /// Re-serialization with no whitespace.
    Minify,
    /// Tab key inserted a two-space indent.
    Indent,
}

/// A proposed replacement of the document text.
///
/// Carries the complete new string, never a diff.
#[derive(Debug, Clone)]
pub struct ValueChange {
    /// The full proposed text.
    pub text: String,
    /// What triggered the proposal.
    pub source: ChangeSource,
}

/// Value change callback function type.
pub type ChangeCallback = Box<dyn FnMut(&ValueChange) + Send>;

/// Keys routed to the search panel while it has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKey {
    /// Advance to the next match.
    Enter,
    /// Step to the previous match.
    ShiftEnter,
    /// Close the panel and return focus to the input layer.
    Escape,
    /// Append a character to the query.
    Char(char),
    /// Remove the last character of the query.
    Backspace,
}

/// Outcome of routing a key to the search panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The query changed; matches were recomputed.
    QueryChanged,
    /// Navigation moved to the match starting at this character offset;
    /// the host should scroll it into view.
    Jumped(usize),
    /// The panel was closed; the host should refocus the input layer.
    Closed,
    /// Nothing to do (e.g. Enter with no matches).
    Ignored,
}

/// The headless JSON editor widget.
///
/// Holds all widget state apart from the authoritative text: the mirror and
/// its derived line index and validity, the search session, the scroll
/// coordinator, and the view toggles. See the module docs for the ownership
/// contract.
pub struct JsonEditor {
    value: String,
    line_index: LineIndex,
    validity: Validity,
    search: SearchState,
    scroll: ScrollSync,
    read_only: bool,
    height_hint: usize,
    expanded: bool,
    search_open: bool,
    version: u64,
    callbacks: Vec<ChangeCallback>,
}

impl JsonEditor {
    /// Create an editor mirroring `text`.
    ///
    /// The scroll coordinator starts with `line_height = 1` (terminal rows);
    /// pixel hosts override it via [`set_line_height`](Self::set_line_height).
    pub fn new(text: &str) -> Self {
        Self {
            value: text.to_string(),
            line_index: LineIndex::from_text(text),
            validity: json::validate(text),
            search: SearchState::new(),
            scroll: ScrollSync::default(),
            read_only: false,
            height_hint: DEFAULT_HEIGHT_HINT,
            expanded: false,
            search_open: false,
            version: 0,
            callbacks: Vec::new(),
        }
    }

    /// Create an editor with an empty document.
    pub fn empty() -> Self {
        Self::new("")
    }

    // ---- value mirror ----------------------------------------------------

    /// The mirrored document text.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The line index over the mirror.
    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    /// Total line count (`'\n'` count + 1; an empty document has one line).
    pub fn line_count(&self) -> usize {
        self.line_index.line_count()
    }

    /// State version, incremented on every mirror or view-state change.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Replace the mirror with an externally supplied value.
    ///
    /// Called by the host both when it applies one of this editor's proposals
    /// and when it swaps in an unrelated document. Re-derives the line index,
    /// validity, and search matches from scratch; does **not** notify
    /// subscribers (the host already has the value).
    pub fn set_value(&mut self, text: &str) {
        if text == self.value {
            return;
        }
        self.value.clear();
        self.value.push_str(text);
        self.derive();
        self.version += 1;
    }

    fn derive(&mut self) {
        self.line_index = LineIndex::from_text(&self.value);
        self.validity = json::validate(&self.value);
        self.search.refresh(&self.value);
    }

    // ---- change notifications --------------------------------------------

    /// Subscribe to value-change proposals.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&ValueChange) + Send + 'static,
    {
        self.callbacks.push(Box::new(callback));
    }

    fn propose(&mut self, text: String, source: ChangeSource) {
        // Validity tracks the proposal immediately; everything else waits for
        // the host to round-trip the value through `set_value`.
        self.validity = json::validate(&text);
        let change = ValueChange { text, source };
        for callback in &mut self.callbacks {
            callback(&change);
        }
    }

    // ---- mutators ---------------------------------------------------------

    /// Propose a user edit of the whole text. No-op in read-only mode.
    pub fn edit(&mut self, text: String) -> bool {
        if self.read_only {
            return false;
        }
        self.propose(text, ChangeSource::Edit);
        true
    }

    /// Insert a two-space indent replacing `selection` (the Tab key).
    ///
    /// Returns the caret offset after the inserted pair, or `None` in
    /// read-only mode.
    pub fn insert_indent(&mut self, selection: Selection) -> Option<usize> {
        if self.read_only {
            return None;
        }
        let (text, caret) = edit::insert_indent(&self.value, selection);
        self.propose(text, ChangeSource::Indent);
        Some(caret)
    }

    /// Pretty-print the document with 2-space indentation.
    ///
    /// On a parse failure the document is untouched and only the validity
    /// error updates. Returns whether a proposal was made.
    pub fn format(&mut self) -> bool {
        if self.read_only {
            return false;
        }
        match json::format(&self.value) {
            Ok(text) => {
                self.propose(text, ChangeSource::Format);
                true
            }
            Err(err) => {
                self.validity = Validity::invalid(err.to_string());
                false
            }
        }
    }

    /// Re-serialize the document with no whitespace.
    ///
    /// Same failure behavior as [`format`](Self::format).
    pub fn minify(&mut self) -> bool {
        if self.read_only {
            return false;
        }
        match json::minify(&self.value) {
            Ok(text) => {
                self.propose(text, ChangeSource::Minify);
                true
            }
            Err(err) => {
                self.validity = Validity::invalid(err.to_string());
                false
            }
        }
    }

    // ---- validity ----------------------------------------------------------

    /// The current validity state.
    pub fn validity(&self) -> &Validity {
        &self.validity
    }

    // ---- search ------------------------------------------------------------

    /// The search session.
    pub fn search(&self) -> &SearchState {
        &self.search
    }

    /// Whether the search panel is open.
    pub fn search_open(&self) -> bool {
        self.search_open
    }

    /// Open the search panel (Ctrl/Cmd+F). Available in read-only mode.
    pub fn open_search(&mut self) {
        if !self.search_open {
            self.search_open = true;
            self.version += 1;
        }
    }

    /// Close the search panel and clear the query.
    pub fn close_search(&mut self) {
        if self.search_open {
            self.search_open = false;
            self.search.clear();
            self.version += 1;
        }
    }

    /// Replace the search query and recompute matches.
    pub fn set_query(&mut self, query: &str) {
        self.search.set_query(query, &self.value);
        self.version += 1;
    }

    /// Advance to the next match, returning its start offset for scrolling.
    pub fn next_match(&mut self) -> Option<usize> {
        self.search.next();
        self.search.current_match().map(|m| m.start)
    }

    /// Step to the previous match, returning its start offset for scrolling.
    pub fn prev_match(&mut self) -> Option<usize> {
        self.search.prev();
        self.search.current_match().map(|m| m.start)
    }

    /// The `current / total` pair for the match counter, 1-based.
    ///
    /// `None` while the query is empty; `(0, 0)` for a query with no matches.
    pub fn match_counter(&self) -> Option<(usize, usize)> {
        if self.search.query().is_empty() {
            return None;
        }
        let total = self.search.matches().len();
        let current = self.search.current().map(|i| i + 1).unwrap_or(0);
        Some((current, total))
    }

    /// Route a key to the search panel while it has focus.
    pub fn handle_search_key(&mut self, key: SearchKey) -> SearchOutcome {
        match key {
            SearchKey::Enter => match self.next_match() {
                Some(offset) => SearchOutcome::Jumped(offset),
                None => SearchOutcome::Ignored,
            },
            SearchKey::ShiftEnter => match self.prev_match() {
                Some(offset) => SearchOutcome::Jumped(offset),
                None => SearchOutcome::Ignored,
            },
            SearchKey::Escape => {
                self.close_search();
                SearchOutcome::Closed
            }
            SearchKey::Char(ch) => {
                let mut query = self.search.query().to_string();
                query.push(ch);
                self.set_query(&query);
                SearchOutcome::QueryChanged
            }
            SearchKey::Backspace => {
                let mut query = self.search.query().to_string();
                if query.pop().is_none() {
                    return SearchOutcome::Ignored;
                }
                self.set_query(&query);
                SearchOutcome::QueryChanged
            }
        }
    }

    /// The host saw Ctrl/Cmd+F while this (focused) instance was mounted.
    pub fn find_shortcut(&mut self) {
        self.open_search();
    }

    // ---- scrolling ---------------------------------------------------------

    /// Propagate an input-layer scroll to all surfaces.
    pub fn sync_scroll(&mut self, scroll_top: usize, scroll_left: usize) -> SurfaceScroll {
        self.scroll.sync(scroll_top, scroll_left)
    }

    /// Scroll the line containing `char_offset` to mid-viewport.
    pub fn scroll_to_offset(&mut self, char_offset: usize) -> SurfaceScroll {
        self.scroll.scroll_to_offset(&self.line_index, char_offset)
    }

    /// Scroll the current match into view, if there is one.
    pub fn scroll_to_current_match(&mut self) -> Option<SurfaceScroll> {
        let offset = self.search.current_match()?.start;
        Some(self.scroll_to_offset(offset))
    }

    /// Current surface scroll offsets.
    pub fn surfaces(&self) -> SurfaceScroll {
        self.scroll.surfaces()
    }

    /// Update the viewport height used for scroll centering.
    pub fn set_viewport_height(&mut self, rows: usize) {
        self.scroll.set_viewport_height(rows);
    }

    /// Override the line height for pixel-based hosts.
    ///
    /// Keeps the current offsets; the viewport height is re-set by the host
    /// on its next layout pass.
    pub fn set_line_height(&mut self, line_height: usize) {
        let surfaces = self.scroll.surfaces();
        self.scroll = ScrollSync::new(line_height, 0);
        self.scroll.sync(surfaces.input.top, surfaces.input.left);
    }

    // ---- view state --------------------------------------------------------

    /// Whether the widget is in full-screen expanded mode.
    pub fn expanded(&self) -> bool {
        self.expanded
    }

    /// Toggle full-screen expanded mode.
    pub fn toggle_expanded(&mut self) {
        self.expanded = !self.expanded;
        self.version += 1;
    }

    /// The height hint, in rows, for the non-expanded state.
    pub fn height_hint(&self) -> usize {
        self.height_hint
    }

    /// Set the height hint for the non-expanded state.
    pub fn set_height_hint(&mut self, rows: usize) {
        self.height_hint = rows.max(1);
    }

    /// The editor height for `available` rows: everything when expanded,
    /// otherwise the height hint capped by availability.
    pub fn effective_height(&self, available: usize) -> usize {
        if self.expanded {
            available
        } else {
            self.height_hint.min(available)
        }
    }

    /// Whether mutating affordances are disabled.
    pub fn read_only(&self) -> bool {
        self.read_only
    }

    /// Enable or disable read-only mode. Search stays available either way.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    fn editor_with_channel(text: &str) -> (JsonEditor, mpsc::Receiver<ValueChange>) {
        let mut editor = JsonEditor::new(text);
        let (tx, rx) = mpsc::channel();
        editor.subscribe(move |change| {
            let _ = tx.send(change.clone());
        });
        (editor, rx)
    }

    #[test]
    fn test_set_value_rederives_state() {
        let mut editor = JsonEditor::new("{}");
        assert!(editor.validity().is_valid);
        assert_eq!(editor.line_count(), 1);

        editor.set_value("{\n  \"a\":\n}");
        assert!(!editor.validity().is_valid);
        assert_eq!(editor.line_count(), 3);
    }

    #[test]
    fn test_set_value_does_not_notify() {
        let (mut editor, rx) = editor_with_channel("{}");
        editor.set_value("[1]");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_edit_notifies_and_validates_proposal() {
        let (mut editor, rx) = editor_with_channel("{}");
        assert!(editor.edit("{\"a\":".to_string()));

        let change = rx.try_recv().unwrap();
        assert_eq!(change.source, ChangeSource::Edit);
        assert_eq!(change.text, "{\"a\":");
        // Validity reflects the proposal even before the host applies it.
        assert!(!editor.validity().is_valid);
    }

    #[test]
    fn test_format_proposes_pretty_text() {
        let (mut editor, rx) = editor_with_channel("{\"a\":1}");
        assert!(editor.format());

        let change = rx.try_recv().unwrap();
        assert_eq!(change.source, ChangeSource::Format);
        assert_eq!(change.text, "{\n  \"a\": 1\n}");
    }

    #[test]
    fn test_format_failure_leaves_document_untouched() {
        let (mut editor, rx) = editor_with_channel("{\"a\":}");
        assert!(!editor.format());
        assert!(rx.try_recv().is_err());
        assert_eq!(editor.value(), "{\"a\":}");
        assert!(!editor.validity().is_valid);
        assert!(editor.validity().message.is_some());
    }

    #[test]
    fn test_minify_round_trip() {
        let (mut editor, rx) = editor_with_channel("{\n  \"a\": [1, 2]\n}");
        assert!(editor.minify());
        let change = rx.try_recv().unwrap();
        assert_eq!(change.text, "{\"a\":[1,2]}");
        assert_eq!(change.source, ChangeSource::Minify);
    }

    #[test]
    fn test_read_only_gates_mutators_not_search() {
        let (mut editor, rx) = editor_with_channel("{\"a\":1}");
        editor.set_read_only(true);

        assert!(!editor.edit("x".to_string()));
        assert!(!editor.format());
        assert!(!editor.minify());
        assert_eq!(editor.insert_indent(Selection::caret(0)), None);
        assert!(rx.try_recv().is_err());

        editor.open_search();
        editor.set_query("a");
        assert_eq!(editor.search().matches().len(), 1);
    }

    #[test]
    fn test_insert_indent_reports_caret() {
        let (mut editor, rx) = editor_with_channel("abcdef");
        let caret = editor.insert_indent(Selection::caret(3));
        assert_eq!(caret, Some(5));
        let change = rx.try_recv().unwrap();
        assert_eq!(change.text, "abc  def");
        assert_eq!(change.source, ChangeSource::Indent);
    }

    #[test]
    fn test_search_panel_lifecycle() {
        let mut editor = JsonEditor::new("alpha beta alpha");
        editor.find_shortcut();
        assert!(editor.search_open());

        editor.set_query("alpha");
        assert_eq!(editor.match_counter(), Some((1, 2)));

        assert_eq!(editor.next_match(), Some(11));
        assert_eq!(editor.match_counter(), Some((2, 2)));
        assert_eq!(editor.next_match(), Some(0)); // wraps

        editor.close_search();
        assert!(!editor.search_open());
        assert_eq!(editor.match_counter(), None);
        assert_eq!(editor.search().query(), "");
    }

    #[test]
    fn test_search_key_routing() {
        let mut editor = JsonEditor::new("x y x");
        editor.open_search();

        assert_eq!(
            editor.handle_search_key(SearchKey::Char('x')),
            SearchOutcome::QueryChanged
        );
        assert_eq!(
            editor.handle_search_key(SearchKey::Enter),
            SearchOutcome::Jumped(4)
        );
        assert_eq!(
            editor.handle_search_key(SearchKey::ShiftEnter),
            SearchOutcome::Jumped(0)
        );
        assert_eq!(
            editor.handle_search_key(SearchKey::Backspace),
            SearchOutcome::QueryChanged
        );
        assert_eq!(
            editor.handle_search_key(SearchKey::Enter),
            SearchOutcome::Ignored
        );
        assert_eq!(
            editor.handle_search_key(SearchKey::Escape),
            SearchOutcome::Closed
        );
        assert!(!editor.search_open());
    }

    #[test]
    fn test_matches_refresh_on_value_change() {
        let mut editor = JsonEditor::new("aaa");
        editor.set_query("aa");
        assert_eq!(editor.search().matches().len(), 2);

        editor.set_value("aaaa");
        assert_eq!(editor.search().matches().len(), 3);
        assert_eq!(editor.search().current(), Some(0));
    }

    #[test]
    fn test_zero_counter_for_fruitless_query() {
        let mut editor = JsonEditor::new("abc");
        editor.set_query("zzz");
        assert_eq!(editor.match_counter(), Some((0, 0)));
    }

    #[test]
    fn test_effective_height() {
        let mut editor = JsonEditor::new("{}");
        editor.set_height_hint(20);
        assert_eq!(editor.effective_height(50), 20);
        assert_eq!(editor.effective_height(10), 10);

        editor.toggle_expanded();
        assert_eq!(editor.effective_height(50), 50);
    }

    #[test]
    fn test_scroll_to_current_match() {
        let text = format!("{}needle", "x\n".repeat(60));
        let mut editor = JsonEditor::new(&text);
        editor.set_viewport_height(20);
        editor.set_query("needle");

        let surfaces = editor.scroll_to_current_match().unwrap();
        // Match is on line 61: 60 * 1 - 10 = 50.
        assert_eq!(surfaces.input.top, 50);
        assert_eq!(surfaces.gutter_top, 50);
    }

    #[test]
    fn test_version_tracks_changes() {
        let mut editor = JsonEditor::new("{}");
        let v0 = editor.version();
        editor.set_value("[]");
        assert!(editor.version() > v0);

        let v1 = editor.version();
        editor.set_value("[]"); // unchanged value is a no-op
        assert_eq!(editor.version(), v1);
    }
}
