use std::time::Duration;

use anyhow::{Result, bail};
use tokio::sync::mpsc;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use super::RevealState;

/// Identifies one started reveal. A new id is issued on every `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RevealId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickKind {
    /// Reveal the next grapheme.
    Char,
    /// Flip cursor visibility.
    CursorBlink,
}

/// Message sent by a reveal's timer task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealTick {
    pub id: RevealId,
    pub kind: TickKind,
}

/// Result of applying a tick (or a skip) to the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Stale id, cancelled reveal, or nothing left to do.
    Ignored,
    /// One more grapheme is visible.
    Advanced,
    /// The reveal just finished; the completion callback has run.
    Completed,
    CursorToggled,
}

/// Cadence of a reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealTiming {
    char_interval: Duration,
    cursor_blink: Duration,
}

impl RevealTiming {
    pub const DEFAULT_CHAR_INTERVAL: Duration = Duration::from_millis(100);
    pub const DEFAULT_CURSOR_BLINK: Duration = Duration::from_millis(500);

    /// # Errors
    /// Returns an error if either interval is zero.
    pub fn new(char_interval: Duration, cursor_blink: Duration) -> Result<Self> {
        if char_interval.is_zero() {
            bail!("reveal character interval must be greater than zero");
        }
        if cursor_blink.is_zero() {
            bail!("cursor blink interval must be greater than zero");
        }
        Ok(Self {
            char_interval,
            cursor_blink,
        })
    }

    pub fn char_interval(&self) -> Duration {
        self.char_interval
    }

    pub fn cursor_blink(&self) -> Duration {
        self.cursor_blink
    }
}

impl Default for RevealTiming {
    fn default() -> Self {
        Self {
            char_interval: Self::DEFAULT_CHAR_INTERVAL,
            cursor_blink: Self::DEFAULT_CURSOR_BLINK,
        }
    }
}

/// Completion callback. `FnOnce` so it cannot run twice.
pub type OnComplete = Box<dyn FnOnce(RevealId) + Send + 'static>;

struct ActiveReveal {
    id: RevealId,
    state: RevealState,
    /// Stops both timers.
    cancel: CancellationToken,
    /// Child of `cancel`; stops only the character timer.
    char_cancel: CancellationToken,
    on_complete: Option<OnComplete>,
}

impl ActiveReveal {
    fn finish(&mut self) {
        self.char_cancel.cancel();
        if let Some(callback) = self.on_complete.take() {
            callback(self.id);
        }
    }
}

/// Owns the active reveal and spawns its timer task.
///
/// `start` and `apply` are meant to be called from one event thread; the
/// spawned task only sends ticks into `tx`.
pub struct RevealScheduler {
    next_id: u64,
    active: Option<ActiveReveal>,
    tx: mpsc::UnboundedSender<RevealTick>,
}

impl RevealScheduler {
    pub fn new(tx: mpsc::UnboundedSender<RevealTick>) -> Self {
        Self {
            next_id: 0,
            active: None,
            tx,
        }
    }

    /// Starts revealing `text`, cancelling any reveal in progress first.
    ///
    /// Must be called from within a tokio runtime. Empty text completes
    /// immediately (the callback runs before this returns) but still blinks
    /// the cursor until cancelled.
    pub fn start(
        &mut self,
        text: impl Into<String>,
        timing: RevealTiming,
        on_complete: Option<OnComplete>,
    ) -> RevealId {
        self.cancel();

        let id = RevealId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);

        let state = RevealState::new(text);
        let cancel = CancellationToken::new();
        let char_cancel = cancel.child_token();

        tracing::debug!(id = id.0, graphemes = state.len(), "reveal started");

        tokio::spawn(drive_timers(
            id,
            state.len(),
            timing,
            Instant::now(),
            cancel.clone(),
            char_cancel.clone(),
            self.tx.clone(),
        ));

        let mut active = ActiveReveal {
            id,
            state,
            cancel,
            char_cancel,
            on_complete,
        };
        if active.state.is_complete() {
            active.finish();
        }
        self.active = Some(active);
        id
    }

    /// Applies a tick from the timer task.
    pub fn apply(&mut self, tick: RevealTick) -> TickOutcome {
        let Some(active) = self.live_reveal(tick.id) else {
            return TickOutcome::Ignored;
        };
        match tick.kind {
            TickKind::CursorBlink => {
                active.state.toggle_cursor();
                TickOutcome::CursorToggled
            }
            TickKind::Char => {
                if active.state.is_complete() {
                    return TickOutcome::Ignored;
                }
                if active.state.advance() {
                    active.finish();
                    tracing::debug!(id = tick.id.0, "reveal completed");
                    TickOutcome::Completed
                } else {
                    TickOutcome::Advanced
                }
            }
        }
    }

    /// Reveals the rest of the text now (the "skip" affordance).
    ///
    /// No-op after cancellation or once complete, so the callback still
    /// fires at most once.
    pub fn force_complete(&mut self) -> TickOutcome {
        let Some(active) = self.active.as_mut() else {
            return TickOutcome::Ignored;
        };
        // A complete state has already run `finish`.
        if active.cancel.is_cancelled() || active.state.is_complete() {
            return TickOutcome::Ignored;
        }
        active.state.reveal_all();
        active.finish();
        tracing::debug!(id = active.id.0, "reveal skipped to completion");
        TickOutcome::Completed
    }

    /// Stops both timers of the active reveal. Safe to call repeatedly.
    ///
    /// The revealed prefix stays readable; no further tick mutates it.
    pub fn cancel(&mut self) {
        if let Some(active) = &self.active
            && !active.cancel.is_cancelled()
        {
            tracing::debug!(id = active.id.0, "reveal cancelled");
            active.cancel.cancel();
        }
    }

    pub fn active_id(&self) -> Option<RevealId> {
        self.active.as_ref().map(|active| active.id)
    }

    pub fn state(&self) -> Option<&RevealState> {
        self.active.as_ref().map(|active| &active.state)
    }

    /// Revealed prefix of the active reveal ("" when idle).
    pub fn displayed(&self) -> &str {
        self.state().map_or("", RevealState::displayed)
    }

    pub fn is_complete(&self) -> bool {
        self.state().is_some_and(RevealState::is_complete)
    }

    pub fn cursor_visible(&self) -> bool {
        self.state().is_some_and(RevealState::cursor_visible)
    }

    /// True while the character timer still has work to do.
    pub fn is_revealing(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|active| !active.cancel.is_cancelled() && !active.state.is_complete())
    }

    fn live_reveal(&mut self, id: RevealId) -> Option<&mut ActiveReveal> {
        self.active
            .as_mut()
            .filter(|active| active.id == id && !active.cancel.is_cancelled())
    }
}

impl Drop for RevealScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Timer task for one reveal.
///
/// Sends exactly `graphemes` char ticks (unless cancelled) and blink ticks
/// until cancelled or until the receiver is gone.
async fn drive_timers(
    id: RevealId,
    graphemes: usize,
    timing: RevealTiming,
    started: Instant,
    cancel: CancellationToken,
    char_cancel: CancellationToken,
    tx: mpsc::UnboundedSender<RevealTick>,
) {
    let mut char_timer = time::interval_at(started + timing.char_interval, timing.char_interval);
    char_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut blink_timer = time::interval_at(started + timing.cursor_blink, timing.cursor_blink);
    blink_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut remaining = graphemes;
    loop {
        let kind = tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            () = char_cancel.cancelled(), if remaining > 0 => {
                remaining = 0;
                continue;
            }
            _ = char_timer.tick(), if remaining > 0 => {
                remaining -= 1;
                TickKind::Char
            }
            _ = blink_timer.tick() => TickKind::CursorBlink,
        };
        if tx.send(RevealTick { id, kind }).is_err() {
            break;
        }
    }
}
