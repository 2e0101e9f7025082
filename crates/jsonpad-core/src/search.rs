//! Text search.
//!
//! Case-insensitive literal search over a UTF-8 `&str`, using **character
//! offsets** (not byte offsets) for all public inputs/outputs. Unlike a plain
//! `find_iter`, the scan restarts one character after each match start, so
//! overlapping occurrences are all reported (searching `"aa"` in `"aaa"`
//! yields starts `[0, 1]`).
//!
//! [`SearchState`] holds a search session for the widget: the query, the
//! ascending match list, and the current-match cursor with cyclic
//! next/previous navigation. Matches are always recomputed from scratch when
//! the query or the text changes; nothing is patched incrementally.

use crate::text::CharIndex;
use regex::RegexBuilder;

/// A match returned by the search APIs, expressed as a half-open character range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchMatch {
    /// Inclusive start character offset.
    pub start: usize,
    /// Exclusive end character offset.
    pub end: usize,
}

impl SearchMatch {
    /// Returns the length of the match in characters.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns `true` if the match is empty.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Find every occurrence of `query` in `text`, case-insensitively.
///
/// - The query is treated as a literal (escaped before compilation).
/// - After a match starting at `m`, the next scan starts at `m + 1`, so
///   overlapping occurrences are included.
/// - An empty query yields an empty list.
pub fn find_matches(text: &str, query: &str) -> Vec<SearchMatch> {
    if query.is_empty() {
        return Vec::new();
    }

    // Escaped literals always compile; bail to "no matches" rather than
    // surfacing an impossible error to callers.
    let Ok(re) = RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .multi_line(true)
        .build()
    else {
        return Vec::new();
    };

    let index = CharIndex::new(text);
    let mut matches = Vec::new();
    let mut start_char = 0usize;

    while start_char <= index.char_count() {
        let start_byte = index.char_to_byte(start_char);
        let Some(m) = re.find_at(text, start_byte) else {
            break;
        };

        let start = index.byte_to_char(m.start());
        let end = index.byte_to_char(m.end());
        if start >= end {
            break;
        }

        matches.push(SearchMatch { start, end });
        start_char = start + 1;
    }

    matches
}

/// A widget search session: query, match list, and current-match cursor.
#[derive(Debug, Default)]
pub struct SearchState {
    query: String,
    matches: Vec<SearchMatch>,
    current: Option<usize>,
}

impl SearchState {
    /// Create an empty session (no query, no matches).
    pub fn new() -> Self {
        Self::default()
    }

    /// The current query string.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// All matches, ascending by start offset.
    pub fn matches(&self) -> &[SearchMatch] {
        &self.matches
    }

    /// Index of the current match, if any.
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// The current match range, if any.
    pub fn current_match(&self) -> Option<SearchMatch> {
        self.current.and_then(|i| self.matches.get(i).copied())
    }

    /// Replace the query and recompute matches against `text`.
    ///
    /// The cursor resets to the first match, or to none when the list is empty.
    pub fn set_query(&mut self, query: &str, text: &str) {
        self.query.clear();
        self.query.push_str(query);
        self.refresh(text);
    }

    /// Recompute matches for the existing query after the text changed.
    pub fn refresh(&mut self, text: &str) {
        self.matches = find_matches(text, &self.query);
        self.current = if self.matches.is_empty() { None } else { Some(0) };
    }

    /// Clear the query and all matches (the search panel was closed).
    pub fn clear(&mut self) {
        self.query.clear();
        self.matches.clear();
        self.current = None;
    }

    /// Advance to the next match, wrapping from the last back to the first.
    ///
    /// Returns the new current index; a no-op returning `None` with no matches.
    pub fn next(&mut self) -> Option<usize> {
        if self.matches.is_empty() {
            return None;
        }
        let next = match self.current {
            Some(i) if i + 1 < self.matches.len() => i + 1,
            _ => 0,
        };
        self.current = Some(next);
        self.current
    }

    /// Step to the previous match, wrapping from the first to the last.
    pub fn prev(&mut self) -> Option<usize> {
        if self.matches.is_empty() {
            return None;
        }
        let prev = match self.current {
            Some(i) if i > 0 => i - 1,
            _ => self.matches.len() - 1,
        };
        self.current = Some(prev);
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn starts(matches: &[SearchMatch]) -> Vec<usize> {
        matches.iter().map(|m| m.start).collect()
    }

    #[test]
    fn test_overlapping_matches() {
        assert_eq!(starts(&find_matches("aaa", "aa")), vec![0, 1]);
        assert_eq!(starts(&find_matches("aaaa", "aa")), vec![0, 1, 2]);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(starts(&find_matches("Hello World", "WORLD")), vec![6]);
        assert_eq!(starts(&find_matches("TRUE true True", "true")), vec![0, 5, 10]);
    }

    #[test]
    fn test_empty_query_and_no_match() {
        assert!(find_matches("abc", "").is_empty());
        assert!(find_matches("abc", "zzz").is_empty());
        assert!(find_matches("", "a").is_empty());
    }

    #[test]
    fn test_multibyte_offsets_are_chars() {
        // "值" is 3 bytes but 1 char; offsets must be character-based.
        assert_eq!(starts(&find_matches("值值x", "x")), vec![2]);
        assert_eq!(starts(&find_matches("值值", "值")), vec![0, 1]);
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        assert_eq!(starts(&find_matches("a.c abc", "a.c")), vec![0]);
        assert_eq!(starts(&find_matches("[1]", "[1]")), vec![0]);
    }

    #[test]
    fn test_navigation_wraparound() {
        let mut state = SearchState::new();
        state.set_query("a", "a_a_a");
        assert_eq!(state.matches().len(), 3);
        assert_eq!(state.current(), Some(0));

        assert_eq!(state.next(), Some(1));
        assert_eq!(state.next(), Some(2));
        assert_eq!(state.next(), Some(0)); // wrap forward

        assert_eq!(state.prev(), Some(2)); // wrap backward
        assert_eq!(state.prev(), Some(1));
    }

    #[test]
    fn test_navigation_noop_without_matches() {
        let mut state = SearchState::new();
        state.set_query("zzz", "abc");
        assert_eq!(state.current(), None);
        assert_eq!(state.next(), None);
        assert_eq!(state.prev(), None);
    }

    #[test]
    fn test_refresh_resets_cursor() {
        let mut state = SearchState::new();
        state.set_query("a", "aaa");
        state.next();
        assert_eq!(state.current(), Some(1));

        state.refresh("a");
        assert_eq!(state.matches().len(), 1);
        assert_eq!(state.current(), Some(0));

        state.refresh("zzz");
        assert_eq!(state.current(), None);
    }

    #[test]
    fn test_clear() {
        let mut state = SearchState::new();
        state.set_query("a", "aaa");
        state.clear();
        assert_eq!(state.query(), "");
        assert!(state.matches().is_empty());
        assert_eq!(state.current(), None);
    }

    #[test]
    fn test_match_end_tracks_actual_length() {
        let matches = find_matches("Hello", "ELL");
        assert_eq!(matches, vec![SearchMatch { start: 1, end: 4 }]);
        assert_eq!(matches[0].len(), 3);
        assert!(!matches[0].is_empty());
    }
}
