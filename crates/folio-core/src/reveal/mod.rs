//! Typewriter reveal.
//!
//! - `state.rs`: `RevealState`, the pure grapheme-prefix model
//! - `scheduler.rs`: `RevealScheduler`, which owns the active reveal, spawns
//!   its timer task and applies the ticks that task sends back
//!
//! Timer tasks never touch the state. They only send `RevealTick`s through a
//! channel; the owner of the scheduler drains the channel on its event thread
//! and calls `RevealScheduler::apply`. Every reveal gets a fresh `RevealId`
//! and `CancellationToken`, so ticks from a replaced reveal are dropped.

mod scheduler;
mod state;

pub use scheduler::{
    OnComplete, RevealId, RevealScheduler, RevealTick, RevealTiming, TickKind, TickOutcome,
};
pub use state::RevealState;
