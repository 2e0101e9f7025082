//! Scroll coordination across the widget's stacked surfaces.
//!
//! The widget renders as three aligned surfaces: an editable input layer
//! (caret and selection, text invisible), a read-only styled overlay, and a
//! line-number gutter. They must always show the same scroll position; the
//! coordinator is the single owner of that position and fans it out. The two
//! text layers share both axes, the gutter follows vertically only.
//!
//! Offsets are measured in `line_height` units — pixels for a pixel host,
//! rows (`line_height = 1`) for a terminal grid.

use crate::line_index::LineIndex;

/// A vertical/horizontal scroll offset pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollPosition {
    /// Vertical offset.
    pub top: usize,
    /// Horizontal offset.
    pub left: usize,
}

/// The synchronized offsets of all three surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurfaceScroll {
    /// Input layer offset (the scroll source).
    pub input: ScrollPosition,
    /// Overlay offset; always equals the input layer's.
    pub overlay: ScrollPosition,
    /// Gutter vertical offset; the gutter has no horizontal scroll.
    pub gutter_top: usize,
}

/// Keeps the input layer, overlay, and gutter in lock-step scroll position.
#[derive(Debug)]
pub struct ScrollSync {
    line_height: usize,
    viewport_height: usize,
    surfaces: SurfaceScroll,
}

impl ScrollSync {
    /// Create a coordinator.
    ///
    /// `line_height` is the height of one text line and `viewport_height` the
    /// visible height of the editor area, both in the same unit.
    pub fn new(line_height: usize, viewport_height: usize) -> Self {
        Self {
            line_height: line_height.max(1),
            viewport_height,
            surfaces: SurfaceScroll::default(),
        }
    }

    /// Current surface offsets.
    pub fn surfaces(&self) -> SurfaceScroll {
        self.surfaces
    }

    /// Height of one text line.
    pub fn line_height(&self) -> usize {
        self.line_height
    }

    /// Update the viewport height (the host resized or toggled expansion).
    pub fn set_viewport_height(&mut self, viewport_height: usize) {
        self.viewport_height = viewport_height;
    }

    /// Propagate an input-layer scroll to the overlay and the gutter.
    ///
    /// The overlay receives both offsets; the gutter only the vertical one.
    pub fn sync(&mut self, scroll_top: usize, scroll_left: usize) -> SurfaceScroll {
        let position = ScrollPosition {
            top: scroll_top,
            left: scroll_left,
        };
        self.surfaces = SurfaceScroll {
            input: position,
            overlay: position,
            gutter_top: scroll_top,
        };
        self.surfaces
    }

    /// Scroll so the line containing `char_offset` sits mid-viewport.
    ///
    /// The target is `(line - 1) * line_height - viewport_height / 2` for the
    /// 1-based line number, clamped at zero; the horizontal offset is
    /// preserved. Applied to the input layer and propagated via [`sync`].
    ///
    /// [`sync`]: Self::sync
    pub fn scroll_to_offset(&mut self, line_index: &LineIndex, char_offset: usize) -> SurfaceScroll {
        let line_number = line_index.line_for_char_offset(char_offset) + 1;
        let target = (line_number - 1)
            .saturating_mul(self.line_height)
            .saturating_sub(self.viewport_height / 2);
        self.sync(target, self.surfaces.input.left)
    }
}

impl Default for ScrollSync {
    fn default() -> Self {
        Self::new(1, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_fans_out() {
        let mut sync = ScrollSync::new(1, 10);
        let surfaces = sync.sync(7, 3);

        assert_eq!(surfaces.input, ScrollPosition { top: 7, left: 3 });
        assert_eq!(surfaces.overlay, surfaces.input);
        assert_eq!(surfaces.gutter_top, 7);
    }

    #[test]
    fn test_scroll_to_offset_centers_line() {
        let index = LineIndex::from_text(&"x\n".repeat(100));
        let mut sync = ScrollSync::new(1, 20);

        // Offset on line 51 (0-based 50): 50 * 1 - 20/2 = 40.
        let offset = index.position_to_char_offset(50, 0);
        let surfaces = sync.scroll_to_offset(&index, offset);
        assert_eq!(surfaces.input.top, 40);
        assert_eq!(surfaces.gutter_top, 40);
    }

    #[test]
    fn test_scroll_to_offset_clamps_at_zero() {
        let index = LineIndex::from_text("a\nb\nc");
        let mut sync = ScrollSync::new(1, 20);

        let surfaces = sync.scroll_to_offset(&index, 0);
        assert_eq!(surfaces.input.top, 0);
    }

    #[test]
    fn test_scroll_to_offset_pixel_line_height() {
        let index = LineIndex::from_text(&"x\n".repeat(100));
        // 24px lines, 480px viewport: line 11 -> 10 * 24 - 240 = 0; line 31 -> 30 * 24 - 240 = 480.
        let mut sync = ScrollSync::new(24, 480);

        let offset = index.position_to_char_offset(10, 0);
        assert_eq!(sync.scroll_to_offset(&index, offset).input.top, 0);

        let offset = index.position_to_char_offset(30, 0);
        assert_eq!(sync.scroll_to_offset(&index, offset).input.top, 480);
    }

    #[test]
    fn test_scroll_to_offset_preserves_horizontal() {
        let index = LineIndex::from_text(&"x\n".repeat(50));
        let mut sync = ScrollSync::new(1, 10);
        sync.sync(0, 12);

        let offset = index.position_to_char_offset(30, 0);
        let surfaces = sync.scroll_to_offset(&index, offset);
        assert_eq!(surfaces.input.left, 12);
        assert_eq!(surfaces.overlay.left, 12);
    }
}
