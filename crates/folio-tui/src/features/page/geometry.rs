//! Adapters from the page layout to the core geometry traits.

use folio_core::highlight::{Geometry, Rect};
use folio_core::navigator::{ScrollBehavior, ScrollSurface};

use super::layout::{PageLayout, WordId};
use super::scroll::PageScroll;

/// Read-only view of the page at the current scroll position.
pub struct PageView<'a> {
    pub layout: &'a PageLayout,
    pub offset: usize,
    pub viewport_height: usize,
}

impl Geometry<WordId> for PageView<'_> {
    fn bounding_box(&self, word: WordId) -> Option<Rect> {
        let span = self.layout.word_span(word)?;
        let top = span.start as i64 - self.offset as i64;
        let bottom = span.end as i64 - self.offset as i64;
        Some(Rect::new(clamp_i32(top), clamp_i32(bottom)))
    }

    fn viewport_height(&self) -> i32 {
        clamp_i32(self.viewport_height as i64)
    }
}

/// Scroll target for the navigator.
pub struct PageSurface<'a> {
    pub layout: &'a PageLayout,
    pub scroll: &'a mut PageScroll,
}

impl ScrollSurface for PageSurface<'_> {
    fn scroll_into_view(&mut self, anchor: &str, behavior: ScrollBehavior) -> bool {
        let Some(line) = self.layout.anchor_line(anchor) else {
            return false;
        };
        self.scroll.scroll_to(line, behavior);
        true
    }
}

fn clamp_i32(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}
