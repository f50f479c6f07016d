//! Page scrollbar with stable thumb size.
//!
//! ratatui's built-in Scrollbar rounds `thumb_start` and `thumb_end`
//! separately, so the thumb grows and shrinks while scrolling. This one
//! computes a fixed thumb length and positions it manually.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Widget;

use super::theme;

const THUMB_SYMBOL: &str = "█";
const TRACK_SYMBOL: &str = "│";

/// A scrollbar that reaches the bottom exactly when fully scrolled.
#[derive(Debug, Clone)]
pub struct Scrollbar {
    total_lines: usize,
    viewport_height: usize,
    scroll_offset: usize,
    thumb_style: Style,
    track_style: Style,
}

impl Scrollbar {
    pub fn new(total_lines: usize, viewport_height: usize, scroll_offset: usize) -> Self {
        Self {
            total_lines,
            viewport_height,
            scroll_offset,
            thumb_style: Style::default().fg(theme::ORANGE),
            track_style: Style::default().fg(theme::DIM_ORANGE),
        }
    }

    /// Only shows when there's content to scroll.
    fn should_display(&self) -> bool {
        self.total_lines > self.viewport_height
    }

    /// Returns `(thumb_start, thumb_len)` for a track of `track_len` cells.
    fn thumb(&self, track_len: usize) -> Option<(usize, usize)> {
        let max_scroll = self.total_lines.saturating_sub(self.viewport_height);
        if track_len == 0 || max_scroll == 0 {
            return None;
        }
        let viewport_len = self.viewport_height.min(track_len);

        // round(track_len * viewport_len / (total_lines - 1 + viewport_len))
        let denom = self
            .total_lines
            .saturating_sub(1)
            .saturating_add(viewport_len);
        let thumb_len = if denom > 0 {
            let numerator = track_len as u64 * viewport_len as u64;
            let rounded = (numerator + (denom as u64 / 2)) / denom as u64;
            (rounded as usize).clamp(1, track_len)
        } else {
            track_len
        };

        let available = track_len.saturating_sub(thumb_len);
        let offset = self.scroll_offset.min(max_scroll);
        let thumb_start = ((offset as u64 * available as u64) / max_scroll as u64) as usize;
        Some((thumb_start, thumb_len))
    }
}

impl Widget for Scrollbar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !self.should_display() {
            return;
        }
        let Some((thumb_start, thumb_len)) = self.thumb(area.height as usize) else {
            return;
        };

        let x = area.x + area.width.saturating_sub(1);
        for (idx, y) in (area.y..area.y + area.height).enumerate() {
            let (symbol, style) = if idx >= thumb_start && idx < thumb_start + thumb_len {
                (THUMB_SYMBOL, self.thumb_style)
            } else {
                (TRACK_SYMBOL, self.track_style)
            };
            buf.set_string(x, y, symbol, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_when_content_fits() {
        assert!(!Scrollbar::new(10, 20, 0).should_display());
        assert!(!Scrollbar::new(20, 20, 0).should_display());
        assert!(Scrollbar::new(100, 20, 0).should_display());
    }

    #[test]
    fn test_thumb_size_is_stable() {
        let top = Scrollbar::new(100, 20, 0).thumb(20).unwrap();
        let middle = Scrollbar::new(100, 20, 40).thumb(20).unwrap();
        assert_eq!(top.1, middle.1);
    }

    #[test]
    fn test_thumb_reaches_bottom_at_max_scroll() {
        let (start, len) = Scrollbar::new(100, 20, 80).thumb(20).unwrap();
        assert_eq!(start + len, 20);
    }

    #[test]
    fn test_renders_on_right_edge() {
        let area = Rect::new(0, 0, 4, 5);
        let mut buf = Buffer::empty(area);
        Scrollbar::new(50, 5, 0).render(area, &mut buf);
        assert_eq!(buf[(3, 0)].symbol(), THUMB_SYMBOL);
        assert_eq!(buf[(3, 4)].symbol(), TRACK_SYMBOL);
        assert_eq!(buf[(0, 0)].symbol(), " ");
    }
}
