//! Full-screen portfolio viewer.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod input;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, stdout};

use anyhow::Result;
use folio_core::content::Portfolio;
pub use runtime::TuiRuntime;
pub use state::ViewerSettings;

/// Runs the viewer until the user quits.
///
/// Must be awaited on a multi-threaded tokio runtime: the reveal timer runs
/// as a spawned task while the event loop blocks this thread.
///
/// # Errors
/// Returns an error if stdout is not a terminal or terminal I/O fails.
pub async fn run_viewer(portfolio: Portfolio, settings: ViewerSettings) -> Result<()> {
    if !stdout().is_terminal() {
        anyhow::bail!(
            "The viewer requires a terminal.\n\
             Use `folio projects` or `folio validate` for non-interactive use."
        );
    }

    tracing::info!(
        owner = %portfolio.owner,
        projects = portfolio.projects.len(),
        "starting viewer"
    );
    let mut runtime = TuiRuntime::new(portfolio, settings)?;
    runtime.run()?;
    tracing::info!("viewer closed");

    Ok(())
}
