//! Section navigation.
//!
//! Resolves an anchor on a `ScrollSurface` and asks it to scroll there. A
//! missing anchor is not an error: sections can be conditionally rendered
//! and may simply not exist yet.
//!
//! `expand_and_scroll` covers the case where the target only appears after a
//! state change. The fixed-delay trigger is a guess about when the host has
//! re-rendered; `ScrollTrigger::OnMount` waits for the host to report the
//! section instead and only falls back to giving up at a timeout.

use std::time::{Duration, Instant};

/// How the surface should move to an anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBehavior {
    #[default]
    Smooth,
    Instant,
}

/// Something that can bring a named anchor into view.
pub trait ScrollSurface {
    /// Scrolls `anchor` into view. Returns false if no such anchor exists.
    fn scroll_into_view(&mut self, anchor: &str, behavior: ScrollBehavior) -> bool;
}

/// When a deferred scroll is attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollTrigger {
    /// Attempt once `delay` has elapsed, whether or not the section exists.
    After(Duration),
    /// Attempt as soon as the section is reported mounted; drop the request
    /// silently if that does not happen within `timeout`.
    OnMount { timeout: Duration },
}

impl Default for ScrollTrigger {
    fn default() -> Self {
        Self::OnMount {
            timeout: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingScroll {
    anchor: String,
    on_mount: bool,
    deadline: Instant,
}

/// Outcome of a deferred scroll attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAttempt {
    Scrolled,
    /// The anchor did not exist when the attempt ran.
    Missing,
    /// An on-mount request timed out before its section appeared.
    Expired,
}

#[derive(Debug, Clone, Default)]
pub struct SectionNavigator {
    behavior: ScrollBehavior,
    pending: Option<PendingScroll>,
}

impl SectionNavigator {
    pub fn new(behavior: ScrollBehavior) -> Self {
        Self {
            behavior,
            pending: None,
        }
    }

    pub fn behavior(&self) -> ScrollBehavior {
        self.behavior
    }

    /// Scrolls to `anchor` if it exists; otherwise does nothing.
    pub fn scroll_to_section<S: ScrollSurface + ?Sized>(
        &self,
        surface: &mut S,
        anchor: &str,
    ) -> bool {
        let scrolled = surface.scroll_into_view(anchor, self.behavior);
        if !scrolled {
            tracing::debug!(anchor, "scroll target not mounted, ignoring");
        }
        scrolled
    }

    /// Expands a project and schedules a scroll to its section.
    ///
    /// `expand` runs synchronously. A later request replaces a pending one,
    /// so repeating the call just re-scrolls.
    pub fn expand_and_scroll<F>(
        &mut self,
        project_id: &str,
        expand: F,
        trigger: ScrollTrigger,
        now: Instant,
    ) where
        F: FnOnce(&str),
    {
        expand(project_id);
        let (on_mount, wait) = match trigger {
            ScrollTrigger::After(delay) => (false, delay),
            ScrollTrigger::OnMount { timeout } => (true, timeout),
        };
        tracing::debug!(project_id, on_mount, ?wait, "deferred scroll scheduled");
        self.pending = Some(PendingScroll {
            anchor: project_id.to_string(),
            on_mount,
            deadline: now + wait,
        });
    }

    /// Runs a due delayed attempt, or expires a stale on-mount request.
    ///
    /// Returns `None` when nothing was due.
    pub fn poll<S: ScrollSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        now: Instant,
    ) -> Option<ScrollAttempt> {
        let pending = self.pending.as_ref()?;
        if now < pending.deadline {
            return None;
        }
        let pending = self.pending.take()?;
        if pending.on_mount {
            tracing::debug!(anchor = %pending.anchor, "deferred scroll expired before mount");
            return Some(ScrollAttempt::Expired);
        }
        Some(self.attempt(surface, &pending.anchor))
    }

    /// Host notification that `anchor` now exists.
    ///
    /// Resolves a pending on-mount request for that anchor. Delayed requests
    /// ignore mount notifications.
    pub fn section_mounted<S: ScrollSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        anchor: &str,
    ) -> Option<ScrollAttempt> {
        let matches = self
            .pending
            .as_ref()
            .is_some_and(|pending| pending.on_mount && pending.anchor == anchor);
        if !matches {
            return None;
        }
        self.pending = None;
        Some(self.attempt(surface, anchor))
    }

    pub fn pending_anchor(&self) -> Option<&str> {
        self.pending.as_ref().map(|pending| pending.anchor.as_str())
    }

    /// When the pending request needs `poll` next.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| pending.deadline)
    }

    pub fn cancel_pending(&mut self) {
        self.pending = None;
    }

    fn attempt<S: ScrollSurface + ?Sized>(&self, surface: &mut S, anchor: &str) -> ScrollAttempt {
        if self.scroll_to_section(surface, anchor) {
            ScrollAttempt::Scrolled
        } else {
            ScrollAttempt::Missing
        }
    }
}
