//! Lenient JSON token classification.
//!
//! A single left-to-right scan with no backtracking, built for syntax
//! coloring rather than validation: it never fails, covers the input
//! exactly, and deliberately accepts malformed runs (`12.3.4` is one number
//! token, uppercase `TRUE` is not a keyword). Strict correctness is the
//! parser's job in `jsonpad_core::json`, not the colorizer's.

/// Classification of a scanned span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A double-quoted string, including both quotes (or to end of input
    /// when unterminated).
    String,
    /// A contiguous `[-0-9.eE+]` run starting with `-` or a digit.
    Number,
    /// A contiguous lowercase ASCII run (`true`, `false`, `null`).
    Keyword,
    /// One of `{ } [ ] : ,`.
    Punctuation,
    /// A maximal whitespace run.
    Whitespace,
    /// Any other single character.
    Other,
}

/// A classified substring. Offsets are character offsets, half-open.
///
/// Tokens are produced fresh on every render pass and never retained across
/// edits; concatenating all token texts reproduces the input exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// Span classification.
    pub kind: TokenKind,
    /// The scanned substring.
    pub text: &'a str,
    /// Inclusive start character offset.
    pub start: usize,
    /// Exclusive end character offset.
    pub end: usize,
}

/// Scan `text` into a token sequence covering it exactly.
///
/// Empty input yields no tokens.
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();
    let mut char_offset = 0usize;

    while let Some(&(byte_start, ch)) = chars.peek() {
        let start = char_offset;

        let kind = match ch {
            '"' => {
                chars.next();
                char_offset += 1;
                let mut escaped = false;
                while let Some(&(_, c)) = chars.peek() {
                    chars.next();
                    char_offset += 1;
                    if escaped {
                        escaped = false;
                    } else if c == '\\' {
                        escaped = true;
                    } else if c == '"' {
                        break;
                    }
                }
                TokenKind::String
            }
            '-' | '0'..='9' => {
                while let Some(&(_, c)) = chars.peek() {
                    if matches!(c, '-' | '0'..='9' | '.' | 'e' | 'E' | '+') {
                        chars.next();
                        char_offset += 1;
                    } else {
                        break;
                    }
                }
                TokenKind::Number
            }
            'a'..='z' => {
                while let Some(&(_, c)) = chars.peek() {
                    if c.is_ascii_lowercase() {
                        chars.next();
                        char_offset += 1;
                    } else {
                        break;
                    }
                }
                TokenKind::Keyword
            }
            '{' | '}' | '[' | ']' | ':' | ',' => {
                chars.next();
                char_offset += 1;
                TokenKind::Punctuation
            }
            c if c.is_whitespace() => {
                while let Some(&(_, c)) = chars.peek() {
                    if c.is_whitespace() {
                        chars.next();
                        char_offset += 1;
                    } else {
                        break;
                    }
                }
                TokenKind::Whitespace
            }
            _ => {
                chars.next();
                char_offset += 1;
                TokenKind::Other
            }
        };

        let byte_end = chars.peek().map(|&(b, _)| b).unwrap_or(text.len());
        tokens.push(Token {
            kind,
            text: &text[byte_start..byte_end],
            start,
            end: char_offset,
        });
    }

    tokens
}
