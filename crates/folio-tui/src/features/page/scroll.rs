//! Page scroll position.
//!
//! `offset` is the first visible page line. Smooth scrolls set a `target`
//! and `step` eases `offset` toward it once per tick; user scrolling moves
//! `offset` directly and drops any animation in flight.

use std::ops::Range;

use folio_core::navigator::ScrollBehavior;

/// Lines per mouse wheel notch.
pub const MOUSE_SCROLL_LINES: isize = 3;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageScroll {
    offset: usize,
    target: usize,
    content_height: usize,
    viewport_height: usize,
}

impl PageScroll {
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn target(&self) -> usize {
        self.target
    }

    pub fn viewport_height(&self) -> usize {
        self.viewport_height
    }

    pub fn max_offset(&self) -> usize {
        self.content_height.saturating_sub(self.viewport_height)
    }

    /// Updates content and viewport size, clamping the position.
    pub fn update_bounds(&mut self, content_height: usize, viewport_height: usize) {
        self.content_height = content_height;
        self.viewport_height = viewport_height;
        let max = self.max_offset();
        self.offset = self.offset.min(max);
        self.target = self.target.min(max);
    }

    pub fn scroll_by(&mut self, delta: isize) {
        let next = self.offset.saturating_add_signed(delta).min(self.max_offset());
        self.offset = next;
        self.target = next;
    }

    /// Moves `line` to the top of the viewport (or as close as the content
    /// allows).
    pub fn scroll_to(&mut self, line: usize, behavior: ScrollBehavior) {
        let line = line.min(self.max_offset());
        self.target = line;
        if behavior == ScrollBehavior::Instant {
            self.offset = line;
        }
    }

    pub fn page(&mut self, pages: isize) {
        let step = self.viewport_height.saturating_sub(1).max(1) as isize;
        self.scroll_by(pages * step);
    }

    /// Scrolls the least amount that brings `lines` fully into view.
    pub fn ensure_visible(&mut self, lines: Range<usize>) {
        if lines.start < self.offset {
            self.scroll_to(lines.start, ScrollBehavior::Instant);
        } else if lines.end > self.offset + self.viewport_height {
            let top = lines.end.saturating_sub(self.viewport_height);
            self.scroll_to(top.min(lines.start), ScrollBehavior::Instant);
        }
    }

    pub fn is_animating(&self) -> bool {
        self.offset != self.target
    }

    /// Advances a smooth scroll by one frame. Returns true if `offset` moved.
    pub fn step(&mut self) -> bool {
        if !self.is_animating() {
            return false;
        }
        let distance = self.offset.abs_diff(self.target);
        let step = (distance / 4).max(1);
        if self.offset < self.target {
            self.offset += step;
        } else {
            self.offset -= step;
        }
        true
    }

    /// Scroll position as a percentage of the scrollable range.
    pub fn percent(&self) -> usize {
        let max = self.max_offset();
        if max == 0 {
            100
        } else {
            self.offset * 100 / max
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scroll(content: usize, viewport: usize) -> PageScroll {
        let mut scroll = PageScroll::default();
        scroll.update_bounds(content, viewport);
        scroll
    }

    #[test]
    fn test_scroll_by_clamps() {
        let mut scroll = scroll(100, 20);
        scroll.scroll_by(-5);
        assert_eq!(scroll.offset(), 0);
        scroll.scroll_by(500);
        assert_eq!(scroll.offset(), 80);
    }

    #[test]
    fn test_instant_scroll_jumps() {
        let mut scroll = scroll(100, 20);
        scroll.scroll_to(30, ScrollBehavior::Instant);
        assert_eq!(scroll.offset(), 30);
        assert!(!scroll.is_animating());
    }

    #[test]
    fn test_smooth_scroll_eases_to_target() {
        let mut scroll = scroll(100, 20);
        scroll.scroll_to(40, ScrollBehavior::Smooth);
        assert_eq!(scroll.offset(), 0);

        let mut frames = 0;
        while scroll.step() {
            frames += 1;
            assert!(scroll.offset() <= 40);
        }
        assert_eq!(scroll.offset(), 40);
        assert!(frames > 1);
    }

    #[test]
    fn test_user_scroll_cancels_animation() {
        let mut scroll = scroll(100, 20);
        scroll.scroll_to(60, ScrollBehavior::Smooth);
        scroll.step();
        scroll.scroll_by(1);
        assert!(!scroll.is_animating());
    }

    #[test]
    fn test_target_past_end_is_clamped() {
        let mut scroll = scroll(30, 20);
        scroll.scroll_to(25, ScrollBehavior::Instant);
        assert_eq!(scroll.offset(), 10);
    }

    #[test]
    fn test_shrinking_content_clamps_offset() {
        let mut scroll = scroll(100, 20);
        scroll.scroll_by(70);
        scroll.update_bounds(50, 20);
        assert_eq!(scroll.offset(), 30);
    }

    #[test]
    fn test_ensure_visible() {
        let mut scroll = scroll(100, 10);
        scroll.ensure_visible(20..23);
        assert_eq!(scroll.offset(), 13);
        scroll.ensure_visible(5..6);
        assert_eq!(scroll.offset(), 5);
        scroll.ensure_visible(6..8);
        assert_eq!(scroll.offset(), 5);
    }

    #[test]
    fn test_percent() {
        let mut scroll = scroll(120, 20);
        assert_eq!(scroll.percent(), 0);
        scroll.scroll_by(50);
        assert_eq!(scroll.percent(), 50);
    }
}
