//! Text measurement for grid-based hosts.
//!
//! Computes visual cell widths based on UAX #11 so a host can place the caret
//! and size its horizontal scroll. The widget does not soft-wrap; long lines
//! scroll horizontally, matching the overlay surface it models.

use unicode_width::UnicodeWidthChar;

/// Default tab width (in cells) used when a caller does not specify one.
///
/// The widget itself only ever inserts spaces, but pasted or loaded documents
/// may still contain literal tabs.
pub const DEFAULT_TAB_WIDTH: usize = 4;

/// Calculate the visual width (in cells) of a character.
///
/// Return value:
/// - 1: Narrow character (ASCII, etc.)
/// - 2: Wide character (CJK, fullwidth, etc.)
/// - 0: Zero-width character (combining characters, etc.)
pub fn char_width(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(1)
}

/// Visual width of a character at a specific cell offset within the line.
///
/// For `'\t'`, width advances to the next tab stop based on `tab_width`.
pub fn cell_width_at(ch: char, cell_offset_in_line: usize, tab_width: usize) -> usize {
    if ch == '\t' {
        let tab_width = tab_width.max(1);
        let rem = cell_offset_in_line % tab_width;
        tab_width - rem
    } else {
        char_width(ch)
    }
}

/// Calculate the visual cell offset from the start of the line to the given
/// character column.
///
/// - `column` is counted in `char` (not bytes).
/// - `'\t'` is expanded using `tab_width` and the current cell offset.
pub fn visual_x_for_column(line: &str, column: usize, tab_width: usize) -> usize {
    let mut x = 0usize;
    for ch in line.chars().take(column) {
        x = x.saturating_add(cell_width_at(ch, x, tab_width));
    }
    x
}
