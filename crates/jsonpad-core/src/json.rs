//! JSON format, minify, and validate.
//!
//! All three go through a full `serde_json` parse. Parse failures are values
//! (surfaced in the widget's inline error strip), never panics; a failed
//! format/minify leaves the document untouched. This strict parse is
//! deliberately separate from the lenient colorizer in `jsonpad-highlight` —
//! the scanner colors anything, the parser decides validity.

use serde_json::Value;

/// Result of validating the document text as JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validity {
    /// Whether the text parsed as JSON.
    pub is_valid: bool,
    /// The parser's error text when invalid.
    pub message: Option<String>,
}

impl Validity {
    /// A valid document.
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            message: None,
        }
    }

    /// An invalid document with the parser's error text.
    pub fn invalid(message: String) -> Self {
        Self {
            is_valid: false,
            message: Some(message),
        }
    }
}

/// Attempt a strict JSON parse of `text`.
pub fn validate(text: &str) -> Validity {
    match serde_json::from_str::<Value>(text) {
        Ok(_) => Validity::valid(),
        Err(err) => Validity::invalid(err.to_string()),
    }
}

/// Parse and re-serialize with 2-space indentation.
///
/// Returns the parse error on invalid input; callers leave the document
/// unchanged and surface the error.
pub fn format(text: &str) -> Result<String, serde_json::Error> {
    let value: Value = serde_json::from_str(text)?;
    serde_json::to_string_pretty(&value)
}

/// Parse and re-serialize with no whitespace.
///
/// Same failure behavior as [`format`].
pub fn minify(text: &str) -> Result<String, serde_json::Error> {
    let value: Value = serde_json::from_str(text)?;
    serde_json::to_string(&value)
}
