#![warn(missing_docs)]
//! `jsonpad-highlight` - Syntax coloring and search-aware span composition
//! for `jsonpad-core`.
//!
//! The [`tokenizer`] is a lenient single-pass classifier (a coloring aid,
//! not a validator); [`compose`] layers the widget's search matches on top
//! of the token stream so search highlighting always wins inside a match
//! range. The output is a flat span sequence whose concatenated text
//! reproduces the input exactly — renderers can stream it straight into
//! their styled-text primitives.

pub mod tokenizer;

pub use tokenizer::{Token, TokenKind, tokenize};

use jsonpad_core::{CharIndex, SearchMatch};

/// Display style of a composed span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanStyle {
    /// Syntax coloring keyed by token kind.
    Token(TokenKind),
    /// A search match.
    Match,
    /// The match currently targeted by prev/next navigation; rendered with
    /// stronger emphasis than other matches.
    ActiveMatch,
}

/// A styled slice of the document text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightSpan<'a> {
    /// Display style.
    pub style: SpanStyle,
    /// The covered substring.
    pub text: &'a str,
}

/// Compose syntax tokens and search matches into one ordered span sequence.
///
/// `matches` must be ascending by start offset (as produced by
/// `jsonpad_core::search`); `current` is the active match index within it.
///
/// The gap before each match is tokenized independently and emitted one span
/// per token; the match itself is a single [`Match`]/[`ActiveMatch`] span;
/// the tail after the last match is tokenized the same way. With no matches
/// the whole text is tokenized once — the common path. Overlapping match
/// ranges are clamped to the walk position so every input character is
/// emitted exactly once.
///
/// [`Match`]: SpanStyle::Match
/// [`ActiveMatch`]: SpanStyle::ActiveMatch
pub fn compose<'a>(
    text: &'a str,
    matches: &[SearchMatch],
    current: Option<usize>,
) -> Vec<HighlightSpan<'a>> {
    if matches.is_empty() {
        return tokenize(text)
            .into_iter()
            .map(|token| HighlightSpan {
                style: SpanStyle::Token(token.kind),
                text: token.text,
            })
            .collect();
    }

    let index = CharIndex::new(text);
    let char_count = index.char_count();
    let mut spans = Vec::new();
    let mut pos = 0usize;

    for (i, m) in matches.iter().enumerate() {
        let start = m.start.max(pos);
        let end = m.end.min(char_count);
        if start >= end {
            // Fully covered by an earlier (overlapping) match.
            continue;
        }

        push_tokens(&mut spans, index.slice(text, pos, start));

        let style = if current == Some(i) {
            SpanStyle::ActiveMatch
        } else {
            SpanStyle::Match
        };
        spans.push(HighlightSpan {
            style,
            text: index.slice(text, start, end),
        });
        pos = end;
    }

    push_tokens(&mut spans, index.slice(text, pos, char_count));
    spans
}

fn push_tokens<'a>(spans: &mut Vec<HighlightSpan<'a>>, gap: &'a str) {
    for token in tokenize(gap) {
        spans.push(HighlightSpan {
            style: SpanStyle::Token(token.kind),
            text: token.text,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonpad_core::search::find_matches;

    fn joined(spans: &[HighlightSpan<'_>]) -> String {
        spans.iter().map(|s| s.text).collect()
    }

    fn compose_query<'a>(text: &'a str, query: &str, current: Option<usize>) -> Vec<HighlightSpan<'a>> {
        compose(text, &find_matches(text, query), current)
    }

    #[test]
    fn test_no_matches_is_plain_tokenization() {
        let spans = compose(r#"{"a": 1}"#, &[], None);
        assert!(spans.iter().all(|s| matches!(s.style, SpanStyle::Token(_))));
        assert_eq!(joined(&spans), r#"{"a": 1}"#);
    }

    #[test]
    fn test_round_trip_with_matches() {
        for (text, query) in [
            (r#"{"alpha": "beta", "gamma": [1, 2]}"#, "a"),
            ("aaaa", "aa"),
            ("no hits here", "zzz"),
            ("值值值", "值值"),
            (r#"{"k": "v"}"#, r#""k""#),
        ] {
            let spans = compose_query(text, query, Some(0));
            assert_eq!(joined(&spans), text, "query {query:?}");
        }
    }

    #[test]
    fn test_match_styling_wins_over_tokens() {
        // "true" is a keyword, but the matched part must render as a match.
        let spans = compose_query(r#"{"x": true}"#, "tru", Some(0));
        let match_span = spans
            .iter()
            .find(|s| s.style == SpanStyle::ActiveMatch)
            .unwrap();
        assert_eq!(match_span.text, "tru");
        // The remainder of the keyword is tokenized on its own.
        assert!(spans.iter().any(|s| s.text == "e"));
    }

    #[test]
    fn test_active_match_is_distinct() {
        let spans = compose_query("a b a b a", "a", Some(1));
        let styles: Vec<SpanStyle> = spans
            .iter()
            .filter(|s| !matches!(s.style, SpanStyle::Token(_)))
            .map(|s| s.style)
            .collect();
        assert_eq!(
            styles,
            vec![SpanStyle::Match, SpanStyle::ActiveMatch, SpanStyle::Match]
        );
    }

    #[test]
    fn test_match_never_split_by_token_boundary() {
        // The match crosses a string/punctuation boundary; it stays one span.
        let text = r#""a":1"#;
        let spans = compose_query(text, r#"":1"#, Some(0));
        let match_span = spans
            .iter()
            .find(|s| s.style == SpanStyle::ActiveMatch)
            .unwrap();
        assert_eq!(match_span.text, "\":1");
        assert_eq!(joined(&spans), text);
    }

    #[test]
    fn test_overlapping_matches_emit_each_char_once() {
        // "aa" in "aaa" matches at 0 and 1; the second overlaps the first.
        let spans = compose_query("aaa", "aa", Some(0));
        assert_eq!(joined(&spans), "aaa");

        let spans = compose_query("aaa", "aa", Some(1));
        assert_eq!(joined(&spans), "aaa");
        // The active match's non-overlapped remainder still renders active.
        assert!(spans.iter().any(|s| s.style == SpanStyle::ActiveMatch));
    }

    #[test]
    fn test_gap_and_tail_are_syntax_colored() {
        let spans = compose_query(r#"{"n": 12, "m": 34}"#, "12", Some(0));
        // Tail numbers keep their syntax style.
        assert!(
            spans
                .iter()
                .any(|s| s.style == SpanStyle::Token(TokenKind::Number) && s.text == "34")
        );
        // Strings before the match keep theirs.
        assert!(
            spans
                .iter()
                .any(|s| s.style == SpanStyle::Token(TokenKind::String) && s.text == "\"n\"")
        );
    }

    #[test]
    fn test_empty_text() {
        assert!(compose("", &[], None).is_empty());
        assert!(compose_query("", "a", None).is_empty());
    }
}
