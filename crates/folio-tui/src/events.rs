//! UI event types.
//!
//! Everything that can change `AppState` arrives as a `UiEvent`: runtime
//! ticks and frames, raw terminal input, reveal timer ticks, and named
//! intents. Terminal input is translated into intents by `input`.

use crossterm::event::Event;
use folio_core::reveal::{RevealId, RevealTick};

#[derive(Debug, Clone)]
pub enum UiEvent {
    /// Frame-cadence heartbeat (animations, deferred scrolls).
    Tick,
    /// Current terminal size; prepended to every batch of events.
    Frame { width: u16, height: u16 },
    Terminal(Event),
    /// Tick from the active reveal's timer task.
    Reveal(RevealTick),
    /// Completion callback of a reveal.
    RevealCompleted(RevealId),
    Intent(Intent),
}

/// The named operations that mutate page state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Quit,
    /// Pointer entered (`Some`) or left (`None`) a header button.
    HoverButton(Option<usize>),
    /// Scroll to the anchor of a header button.
    ActivateNav(usize),
    /// Expand a project by id and scroll to its section.
    SelectProject(String),
    CollapseProject,
    OpenLink(usize),
    /// Open the expanded project's video externally.
    OpenVideo,
    /// Reveal the rest of the typed text now.
    SkipReveal,
    ScrollBy(isize),
    ScrollPage(isize),
    ScrollToTop,
    ScrollToBottom,
    FocusNext,
    FocusPrev,
    ActivateFocus,
    PointerMoved { column: u16, row: u16 },
    Click { column: u16, row: u16 },
}
