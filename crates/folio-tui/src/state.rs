//! Application state.
//!
//! ```text
//! AppState
//! ├── portfolio: Portfolio          (read-only content)
//! ├── settings: ViewerSettings      (timing, scroll trigger)
//! ├── page: PageState               (layout, scroll position)
//! ├── expanded: Option<String>      (at most one expanded project)
//! ├── hovered: Option<Target>       (hover and keyboard focus)
//! ├── reveal: RevealScheduler       (About typewriter)
//! ├── highlighter: ViewportHighlighter<WordId>
//! └── navigator: SectionNavigator
//! ```
//!
//! Only the reducer mutates this; the renderer reads it.

use anyhow::Result;
use folio_core::config::Config;
use folio_core::content::Portfolio;
use folio_core::highlight::ViewportHighlighter;
use folio_core::navigator::{ScrollBehavior, ScrollTrigger, SectionNavigator};
use folio_core::reveal::{RevealScheduler, RevealState, RevealTick, RevealTiming};
use tokio::sync::mpsc;

use crate::features::page::{PageState, Target, WordId};

/// Behavior knobs resolved from `Config` and command-line flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewerSettings {
    pub timing: RevealTiming,
    pub reveal_enabled: bool,
    pub trigger: ScrollTrigger,
    pub behavior: ScrollBehavior,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            timing: RevealTiming::default(),
            reveal_enabled: true,
            trigger: ScrollTrigger::default(),
            behavior: ScrollBehavior::default(),
        }
    }
}

impl ViewerSettings {
    /// # Errors
    /// Returns an error if the configured reveal intervals are invalid.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self {
            timing: config.reveal.timing()?,
            reveal_enabled: config.reveal.enabled,
            trigger: config.navigation.trigger(),
            behavior: config.navigation.behavior(),
        })
    }
}

pub struct AppState {
    pub portfolio: Portfolio,
    pub settings: ViewerSettings,
    pub page: PageState,
    /// Id of the expanded project, if any.
    pub expanded: Option<String>,
    /// Hovered or focused element. Keyboard focus and pointer hover share it.
    pub hovered: Option<Target>,
    /// Section title under the pointer (index into the layout's titles).
    pub hovered_title: Option<usize>,
    /// Last pointer position in screen coordinates.
    pub pointer: Option<(u16, u16)>,
    /// True when `hovered` was last set by Tab/Shift-Tab rather than the
    /// pointer; scrolling then leaves it alone.
    pub focus_from_keyboard: bool,
    /// Terminal size from the last frame.
    pub screen: (u16, u16),
    pub reveal: RevealScheduler,
    /// Set once the About text is fully shown (typed out, skipped or never
    /// animated).
    pub about_revealed: bool,
    pub highlighter: ViewportHighlighter<WordId>,
    pub navigator: SectionNavigator,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(
        portfolio: Portfolio,
        settings: ViewerSettings,
        reveal_tx: mpsc::UnboundedSender<RevealTick>,
    ) -> Self {
        Self {
            portfolio,
            settings,
            page: PageState::new(),
            expanded: None,
            hovered: None,
            hovered_title: None,
            pointer: None,
            focus_from_keyboard: false,
            screen: (0, 0),
            reveal: RevealScheduler::new(reveal_tx),
            about_revealed: false,
            highlighter: ViewportHighlighter::new(),
            navigator: SectionNavigator::new(settings.behavior),
            should_quit: false,
        }
    }

    pub fn hovered_button(&self) -> Option<usize> {
        match self.hovered {
            Some(Target::Nav(index)) => Some(index),
            _ => None,
        }
    }

    pub fn expanded_index(&self) -> Option<usize> {
        self.expanded
            .as_deref()
            .and_then(|id| self.portfolio.project_index(id))
    }

    /// Bytes of the About text currently shown.
    pub fn typed_bytes(&self) -> usize {
        if self.about_revealed {
            return self.portfolio.about.len();
        }
        self.reveal
            .state()
            .filter(|state| state.source() == self.portfolio.about)
            .map_or(0, RevealState::revealed_bytes)
    }

    pub fn cursor_visible(&self) -> bool {
        self.reveal.cursor_visible()
    }

    /// Focus cycle: header buttons, then page targets top to bottom.
    pub fn focus_order(&self) -> Vec<Target> {
        (0..self.portfolio.nav.len())
            .map(Target::Nav)
            .chain(self.page.layout.targets())
            .collect()
    }

    /// True while something animates and the runtime should tick fast.
    pub fn is_animating(&self) -> bool {
        self.reveal.is_revealing()
            || self.page.scroll.is_animating()
            || self.navigator.pending_anchor().is_some()
    }
}
