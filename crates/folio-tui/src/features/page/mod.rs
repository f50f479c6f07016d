//! Page feature slice: layout, scrolling and geometry of the portfolio page.
//!
//! ## Module Structure
//!
//! - `layout.rs`: `PageLayout` (lines, anchors, word spans, hit boxes)
//! - `scroll.rs`: `PageScroll` (offset, smooth-scroll target)
//! - `geometry.rs`: `Geometry` / `ScrollSurface` adapters for the core crate
//! - `render.rs`: page rendering

mod geometry;
mod layout;
mod render;
mod scroll;

use folio_core::content::Portfolio;
pub use geometry::{PageSurface, PageView};
pub use layout::{HitBox, PageLayout, PageLine, Role, Segment, Target, TitleLine, WordBlock, WordId};
pub use render::render_page;
pub use scroll::{MOUSE_SCROLL_LINES, PageScroll};

/// Layout plus scroll position, kept in sync with the viewport.
#[derive(Debug, Default)]
pub struct PageState {
    pub layout: PageLayout,
    pub scroll: PageScroll,
    /// Content width the layout was requested for (0 = not measured yet).
    width: u16,
    dirty: bool,
    /// Offset last reported to scroll listeners.
    notified_offset: Option<usize>,
}

impl PageState {
    pub fn new() -> Self {
        Self {
            dirty: true,
            ..Self::default()
        }
    }

    /// Records the content area size. A width change forces a relayout.
    pub fn set_viewport(&mut self, width: u16, height: u16) {
        if width != self.width {
            self.width = width;
            self.dirty = true;
        }
        self.scroll
            .update_bounds(self.layout.len(), usize::from(height));
    }

    pub fn is_measured(&self) -> bool {
        self.width > 0
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Rebuilds the layout if the width or content changed.
    ///
    /// Returns true if a new layout was built.
    pub fn rebuild_if_needed(&mut self, portfolio: &Portfolio, expanded: Option<&str>) -> bool {
        if !self.dirty || !self.is_measured() {
            return false;
        }
        self.layout = PageLayout::build(portfolio, expanded, self.width);
        self.dirty = false;
        let viewport = self.scroll.viewport_height();
        self.scroll.update_bounds(self.layout.len(), viewport);
        tracing::debug!(
            lines = self.layout.len(),
            width = self.width,
            expanded,
            "page layout rebuilt"
        );
        true
    }

    pub fn view(&self) -> PageView<'_> {
        PageView {
            layout: &self.layout,
            offset: self.scroll.offset(),
            viewport_height: self.scroll.viewport_height(),
        }
    }

    pub fn surface(&mut self) -> PageSurface<'_> {
        PageSurface {
            layout: &self.layout,
            scroll: &mut self.scroll,
        }
    }

    /// True once per offset change; drives highlight recomputation.
    pub fn take_scroll_event(&mut self) -> bool {
        let offset = self.scroll.offset();
        if self.notified_offset == Some(offset) {
            return false;
        }
        self.notified_offset = Some(offset);
        true
    }

    /// Page line shown at viewport row `row`.
    pub fn line_at_row(&self, row: usize) -> Option<usize> {
        let line = self.scroll.offset() + row;
        (row < self.scroll.viewport_height() && line < self.layout.len()).then_some(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_waits_for_measurement() {
        let portfolio = Portfolio::builtin().unwrap();
        let mut page = PageState::new();
        assert!(!page.rebuild_if_needed(&portfolio, None));

        page.set_viewport(60, 10);
        assert!(page.rebuild_if_needed(&portfolio, None));
        assert!(!page.rebuild_if_needed(&portfolio, None));
        assert!(page.scroll.max_offset() > 0);
    }

    #[test]
    fn test_width_change_forces_relayout() {
        let portfolio = Portfolio::builtin().unwrap();
        let mut page = PageState::new();
        page.set_viewport(60, 10);
        page.rebuild_if_needed(&portfolio, None);

        page.set_viewport(60, 12);
        assert!(!page.rebuild_if_needed(&portfolio, None));
        page.set_viewport(40, 12);
        assert!(page.rebuild_if_needed(&portfolio, None));
    }

    #[test]
    fn test_scroll_events_fire_once_per_offset() {
        let portfolio = Portfolio::builtin().unwrap();
        let mut page = PageState::new();
        page.set_viewport(60, 10);
        page.rebuild_if_needed(&portfolio, None);

        assert!(page.take_scroll_event());
        assert!(!page.take_scroll_event());
        page.scroll.scroll_by(2);
        assert!(page.take_scroll_event());
    }

    #[test]
    fn test_line_at_row() {
        let portfolio = Portfolio::builtin().unwrap();
        let mut page = PageState::new();
        page.set_viewport(60, 10);
        page.rebuild_if_needed(&portfolio, None);
        page.scroll.scroll_by(4);
        assert_eq!(page.line_at_row(0), Some(4));
        assert_eq!(page.line_at_row(10), None);
    }
}
