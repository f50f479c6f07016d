//! Interactive viewer.

use std::path::Path;

use anyhow::{Context, Result};
use folio_core::config::Config;
use folio_core::content::Portfolio;
use folio_tui::ViewerSettings;

pub async fn run(content: Option<&Path>, no_typing: bool, config: &Config) -> Result<()> {
    let portfolio = Portfolio::load(content).context("load portfolio")?;
    let mut settings = ViewerSettings::from_config(config).context("read viewer settings")?;
    if no_typing {
        settings.reveal_enabled = false;
    }
    folio_tui::run_viewer(portfolio, settings).await
}
