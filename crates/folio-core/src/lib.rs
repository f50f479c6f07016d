//! Core library for folio.
//!
//! Holds everything that does not depend on a rendering surface:
//! - `reveal`: typewriter reveal scheduler (timers, cancellation, completion)
//! - `highlight`: viewport-intersection highlight tracking
//! - `navigator`: anchor resolution and (deferred) scroll requests
//! - `content`: the portfolio data model and its TOML loader
//! - `config`: user configuration and path resolution
//! - `logging`: file-backed tracing setup

pub mod config;
pub mod content;
pub mod highlight;
pub mod logging;
pub mod navigator;
pub mod reveal;
