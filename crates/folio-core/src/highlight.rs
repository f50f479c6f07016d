//! Viewport highlight tracking.
//!
//! Keeps one highlighted flag per tracked element and recomputes all of them
//! on every scroll event. An element is visible iff its bounding box
//! intersects the viewport vertically:
//!
//! ```text
//! rect.top < viewport_height && rect.bottom > 0
//! ```
//!
//! Geometry comes from the host through the `Geometry` trait, so the
//! predicate can be exercised without a rendering surface.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Vertical extent of an element in viewport coordinates.
///
/// `top` is inclusive and `bottom` exclusive; negative values are above the
/// viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub top: i32,
    pub bottom: i32,
}

impl Rect {
    pub fn new(top: i32, bottom: i32) -> Self {
        Self { top, bottom }
    }

    pub fn intersects_viewport(&self, viewport_height: i32) -> bool {
        self.top < viewport_height && self.bottom > 0
    }
}

/// Geometry queries the highlighter needs from its host.
pub trait Geometry<H> {
    /// Bounding box of `handle`, or `None` if it is not laid out.
    fn bounding_box(&self, handle: H) -> Option<Rect>;

    fn viewport_height(&self) -> i32;

    fn is_visible(&self, handle: H) -> bool {
        self.bounding_box(handle)
            .is_some_and(|rect| rect.intersects_viewport(self.viewport_height()))
    }
}

/// Tracks highlighted/unhighlighted state for a set of elements.
#[derive(Debug, Clone)]
pub struct ViewportHighlighter<H> {
    tracked: HashMap<H, bool>,
    attached: bool,
}

impl<H> Default for ViewportHighlighter<H> {
    fn default() -> Self {
        Self {
            tracked: HashMap::new(),
            attached: true,
        }
    }
}

impl<H: Copy + Eq + Hash> ViewportHighlighter<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts tracking `handle` and evaluates it right away.
    ///
    /// Returns the initial highlight state. Ignored (returns false) while
    /// detached.
    pub fn register<G: Geometry<H> + ?Sized>(&mut self, handle: H, geometry: &G) -> bool {
        if !self.attached {
            return false;
        }
        let visible = geometry.is_visible(handle);
        self.tracked.insert(handle, visible);
        visible
    }

    /// Stops tracking `handle`. Returns true if it was tracked.
    pub fn unregister(&mut self, handle: H) -> bool {
        self.tracked.remove(&handle).is_some()
    }

    /// Recomputes every tracked element. Returns how many flags changed.
    pub fn on_scroll<G: Geometry<H> + ?Sized>(&mut self, geometry: &G) -> usize {
        if !self.attached {
            return 0;
        }
        let mut changed = 0;
        for (handle, highlighted) in &mut self.tracked {
            let visible = geometry.is_visible(*handle);
            if *highlighted != visible {
                *highlighted = visible;
                changed += 1;
            }
        }
        changed
    }

    /// Makes the tracked set equal to `handles`.
    ///
    /// New handles are registered (and evaluated), missing ones dropped,
    /// survivors keep their state until the next `on_scroll`.
    pub fn sync<G, I>(&mut self, handles: I, geometry: &G)
    where
        G: Geometry<H> + ?Sized,
        I: IntoIterator<Item = H>,
    {
        if !self.attached {
            return;
        }
        let wanted: HashSet<H> = handles.into_iter().collect();
        self.tracked.retain(|handle, _| wanted.contains(handle));
        for handle in wanted {
            if !self.tracked.contains_key(&handle) {
                self.register(handle, geometry);
            }
        }
    }

    pub fn is_highlighted(&self, handle: H) -> bool {
        self.tracked.get(&handle).copied().unwrap_or(false)
    }

    pub fn contains(&self, handle: H) -> bool {
        self.tracked.contains_key(&handle)
    }

    /// Tracked handles that are currently highlighted (unordered).
    pub fn highlighted(&self) -> impl Iterator<Item = H> + '_ {
        self.tracked
            .iter()
            .filter_map(|(handle, on)| on.then_some(*handle))
    }

    pub fn len(&self) -> usize {
        self.tracked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracked.is_empty()
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Teardown: drops every registration and ignores later scroll events.
    pub fn detach(&mut self) {
        self.tracked.clear();
        self.attached = false;
    }

    pub fn attach(&mut self) {
        self.attached = true;
    }
}
