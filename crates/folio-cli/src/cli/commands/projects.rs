//! Project listing and portfolio validation.

use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table};
use folio_core::config::paths;
use folio_core::content::Portfolio;

pub fn list(content: Option<&Path>, json: bool) -> Result<()> {
    let portfolio = Portfolio::load(content).context("load portfolio")?;

    if json {
        let out = serde_json::to_string_pretty(&portfolio.projects)
            .context("serialize projects")?;
        println!("{out}");
        return Ok(());
    }

    if portfolio.projects.is_empty() {
        println!("No projects found.");
        return Ok(());
    }
    println!("{}", projects_table(&portfolio));
    Ok(())
}

pub fn validate(path: Option<&Path>) -> Result<()> {
    let portfolio = Portfolio::load(path).context("validate portfolio")?;
    let source = match path {
        Some(path) => path.display().to_string(),
        None if paths::portfolio_path().exists() => paths::portfolio_path().display().to_string(),
        None => "built-in portfolio".to_string(),
    };
    println!(
        "{source}: ok ({} navigation buttons, {} projects, {} contact links)",
        portfolio.nav.len(),
        portfolio.projects.len(),
        portfolio.contact.len()
    );
    Ok(())
}

fn projects_table(portfolio: &Portfolio) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(["ID", "TITLE", "VIDEO"]);
    for project in &portfolio.projects {
        let video = project
            .embed_url()
            .map_or_else(|| "-".to_string(), |url| url.to_string());
        table.add_row([project.id.as_str(), project.title.as_str(), video.as_str()]);
    }
    table
}
