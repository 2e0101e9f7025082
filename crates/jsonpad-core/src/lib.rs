#![warn(missing_docs)]
//! jsonpad-core - Headless JSON Editor Widget Kernel
//!
//! # Overview
//!
//! `jsonpad-core` is the headless core of a JSON editor widget. It owns no
//! rendering and no I/O: the host supplies the document text and applies the
//! replacement strings the widget proposes, while the kernel derives
//! everything a renderer needs — line index, validity, search matches, and
//! synchronized scroll offsets for the widget's stacked surfaces.
//!
//! # Core Features
//!
//! - **Controlled value model**: the host owns the text; the widget mirrors
//!   it and proposes full replacements through change callbacks
//! - **Line Index**: Rope-based, O(log n) offset↔position conversion
//! - **Search**: case-insensitive literal search reporting overlapping
//!   occurrences, with cyclic next/previous navigation
//! - **Scroll Coordination**: one scroll position fanned out to the input
//!   layer, styled overlay, and line-number gutter
//! - **Format/Validate**: strict JSON parse for pretty-print, minify, and
//!   inline error reporting
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Widget State (JsonEditor)                  │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Search Session & Scroll Coordination       │  ← Derived State
//! ├─────────────────────────────────────────────┤
//! │  Format / Validate (serde_json)             │  ← Strict Parse
//! ├─────────────────────────────────────────────┤
//! │  Edit Helpers & Text Measurement            │  ← Host Support
//! ├─────────────────────────────────────────────┤
//! │  Line Index (Rope-based)                    │  ← Line Access
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Syntax coloring lives in the companion crate `jsonpad-highlight`, which
//! composes this crate's search matches with its own lexical scan.
//!
//! # Quick Start
//!
//! ```rust
//! use jsonpad_core::{JsonEditor, Selection};
//!
//! let mut editor = JsonEditor::new("{\"name\": \"value\"}");
//! assert!(editor.validity().is_valid);
//!
//! // Search stays available even in read-only mode.
//! editor.open_search();
//! editor.set_query("value");
//! assert_eq!(editor.search().matches().len(), 1);
//!
//! // Tab inserts two literal spaces and reports the caret.
//! let caret = editor.insert_indent(Selection::caret(1)).unwrap();
//! assert_eq!(caret, 3);
//! ```
//!
//! # Module Description
//!
//! - [`editor`] - The controlled widget state machine
//! - [`line_index`] - Rope based line index
//! - [`search`] - Overlapping, case-insensitive literal search
//! - [`scroll`] - Three-surface scroll coordinator
//! - [`json`] - Format / minify / validate
//! - [`edit`] - Selection, indent insertion, grapheme caret movement
//! - [`layout`] - Cell-width measurement for grid hosts
//! - [`text`] - Char/byte offset conversion

pub mod edit;
pub mod editor;
pub mod json;
pub mod layout;
pub mod line_index;
pub mod scroll;
pub mod search;
pub mod text;

pub use edit::{INDENT, Selection};
pub use editor::{
    ChangeCallback, ChangeSource, DEFAULT_HEIGHT_HINT, JsonEditor, SearchKey, SearchOutcome,
    ValueChange,
};
pub use json::Validity;
pub use line_index::LineIndex;
pub use scroll::{ScrollPosition, ScrollSync, SurfaceScroll};
pub use search::{SearchMatch, SearchState};
pub use text::CharIndex;
