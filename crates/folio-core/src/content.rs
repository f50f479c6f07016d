//! Portfolio content.
//!
//! The page is driven by a static, read-only `Portfolio`: header owner line,
//! navigation targets, About text, projects and contact links. It is loaded
//! from TOML (`${FOLIO_HOME}/portfolio.toml` or an explicit path) and falls
//! back to the built-in `default_portfolio.toml`.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::paths;

pub const HOME_ANCHOR: &str = "home";
pub const ABOUT_ANCHOR: &str = "about-me";
pub const PROJECTS_ANCHOR: &str = "projects";
pub const CONTACT_ANCHOR: &str = "contact";

/// Anchors of the fixed page sections, top to bottom.
pub const SECTION_ANCHORS: [&str; 4] = [HOME_ANCHOR, ABOUT_ANCHOR, PROJECTS_ANCHOR, CONTACT_ANCHOR];

/// Query appended to embedded video links.
const EMBED_PARAMS: [(&str, &str); 2] = [("rel", "0"), ("autoplay", "0")];

fn builtin_portfolio() -> &'static str {
    include_str!("../default_portfolio.toml")
}

/// Derives an anchor id from a button label: `"About Me"` -> `"about-me"`.
pub fn anchor_for_label(label: &str) -> String {
    label.to_lowercase().replace(' ', "-")
}

/// A header button and the anchor it scrolls to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawNavTarget")]
pub struct NavTarget {
    pub label: String,
    pub anchor_id: String,
}

impl NavTarget {
    pub fn from_label(label: impl Into<String>) -> Self {
        let label = label.into();
        let anchor_id = anchor_for_label(&label);
        Self { label, anchor_id }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNavTarget {
    Label(String),
    Entry { label: String, anchor: Option<String> },
}

impl From<RawNavTarget> for NavTarget {
    fn from(raw: RawNavTarget) -> Self {
        match raw {
            RawNavTarget::Label(label) | RawNavTarget::Entry { label, anchor: None } => {
                NavTarget::from_label(label)
            }
            RawNavTarget::Entry {
                label,
                anchor: Some(anchor_id),
            } => NavTarget { label, anchor_id },
        }
    }
}

fn default_images() -> Vec<String> {
    ["/image1.png", "/image2.png", "/image3.png"]
        .into_iter()
        .map(String::from)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub title: String,
    /// Stable identifier, also the anchor of the expanded section.
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<Url>,
    #[serde(default = "default_images")]
    pub images: Vec<String>,
    /// Filled with a generic line when left empty.
    #[serde(default)]
    pub description: String,
}

impl ProjectEntry {
    /// Video link with the player parameters the page uses.
    pub fn embed_url(&self) -> Option<Url> {
        let mut url = self.video_url.clone()?;
        url.query_pairs_mut().extend_pairs(EMBED_PARAMS);
        Some(url)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactLink {
    pub label: String,
    pub href: Url,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Portfolio {
    pub owner: String,
    pub nav: Vec<NavTarget>,
    pub about: String,
    #[serde(default)]
    pub projects: Vec<ProjectEntry>,
    #[serde(default)]
    pub contact_blurb: String,
    #[serde(default)]
    pub contact: Vec<ContactLink>,
}

impl Portfolio {
    /// The portfolio compiled into the binary.
    ///
    /// # Errors
    /// Only fails if the embedded file is broken.
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(builtin_portfolio()).context("Failed to parse built-in portfolio")
    }

    /// Resolves the portfolio to show.
    ///
    /// Order: `explicit` path, then `${FOLIO_HOME}/portfolio.toml` if it
    /// exists, then the built-in portfolio.
    ///
    /// # Errors
    /// Returns an error if a selected file cannot be read, parsed or
    /// validated. An explicit path that does not exist is an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }
        let default_path = paths::portfolio_path();
        if default_path.exists() {
            return Self::load_from(&default_path);
        }
        tracing::info!("no portfolio file found, using built-in content");
        Self::builtin()
    }

    /// # Errors
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read portfolio from {}", path.display()))?;
        let portfolio = Self::from_toml_str(&contents)
            .with_context(|| format!("Invalid portfolio in {}", path.display()))?;
        tracing::info!(
            path = %path.display(),
            projects = portfolio.projects.len(),
            "portfolio loaded"
        );
        Ok(portfolio)
    }

    /// # Errors
    /// Returns an error if the TOML does not parse or fails validation.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let mut portfolio: Portfolio = toml::from_str(contents).context("Failed to parse TOML")?;
        for project in &mut portfolio.projects {
            if project.description.trim().is_empty() {
                project.description =
                    format!("Details and description of the project: {}", project.title);
            }
        }
        portfolio.validate()?;
        Ok(portfolio)
    }

    /// Checks invariants the page relies on.
    ///
    /// # Errors
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<()> {
        if self.nav.is_empty() {
            bail!("portfolio needs at least one navigation button");
        }
        for target in &self.nav {
            if target.anchor_id.trim().is_empty() {
                bail!("navigation button '{}' has an empty anchor", target.label);
            }
        }

        let mut seen = HashSet::new();
        for project in &self.projects {
            if project.id.trim().is_empty() {
                bail!("project '{}' has an empty id", project.title);
            }
            if project.title.trim().is_empty() {
                bail!("project '{}' has an empty title", project.id);
            }
            if SECTION_ANCHORS.contains(&project.id.as_str()) {
                bail!(
                    "project id '{}' collides with a page section anchor",
                    project.id
                );
            }
            if !seen.insert(project.id.as_str()) {
                bail!("duplicate project id '{}'", project.id);
            }
        }

        for link in &self.contact {
            if link.label.trim().is_empty() {
                bail!("contact link {} has an empty label", link.href);
            }
        }
        Ok(())
    }

    pub fn project(&self, id: &str) -> Option<&ProjectEntry> {
        self.projects.iter().find(|project| project.id == id)
    }

    pub fn project_index(&self, id: &str) -> Option<usize> {
        self.projects.iter().position(|project| project.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
owner = "Someone"
nav = ["Home", { label = "Work", anchor = "projects" }]
about = "hello"

[[projects]]
title = "First"
id = "first"
video_url = "https://www.youtube.com/embed/abc"
"#;

    #[test]
    fn test_builtin_portfolio_is_valid() {
        let portfolio = Portfolio::builtin().unwrap();
        assert_eq!(portfolio.owner, "Zero // Andrés Martínez");
        assert_eq!(portfolio.nav.len(), 4);
        assert_eq!(portfolio.nav[1].anchor_id, "about-me");
        assert_eq!(portfolio.projects.len(), 5);
        assert_eq!(portfolio.contact.len(), 4);
        assert_eq!(portfolio.project_index("project6"), Some(4));
    }

    #[test]
    fn test_anchor_for_label() {
        assert_eq!(anchor_for_label("About Me"), "about-me");
        assert_eq!(anchor_for_label("Home"), "home");
    }

    #[test]
    fn test_nav_accepts_labels_and_tables() {
        let portfolio = Portfolio::from_toml_str(MINIMAL).unwrap();
        assert_eq!(portfolio.nav[0], NavTarget::from_label("Home"));
        assert_eq!(portfolio.nav[1].label, "Work");
        assert_eq!(portfolio.nav[1].anchor_id, "projects");
    }

    #[test]
    fn test_project_defaults_are_filled() {
        let portfolio = Portfolio::from_toml_str(MINIMAL).unwrap();
        let project = portfolio.project("first").unwrap();
        assert_eq!(
            project.description,
            "Details and description of the project: First"
        );
        assert_eq!(
            project.images,
            ["/image1.png", "/image2.png", "/image3.png"]
        );
        assert!(portfolio.contact.is_empty());
    }

    #[test]
    fn test_embed_url_appends_player_params() {
        let portfolio = Portfolio::from_toml_str(MINIMAL).unwrap();
        let url = portfolio.projects[0].embed_url().unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.youtube.com/embed/abc?rel=0&autoplay=0"
        );
    }

    #[test]
    fn test_duplicate_project_ids_are_rejected() {
        let toml = format!("{MINIMAL}\n[[projects]]\ntitle = \"Again\"\nid = \"first\"\n");
        let err = Portfolio::from_toml_str(&toml).unwrap_err();
        assert!(err.to_string().contains("duplicate project id"));
    }

    #[test]
    fn test_project_id_must_not_shadow_a_section() {
        let toml = MINIMAL.replace("id = \"first\"", "id = \"contact\"");
        let err = Portfolio::from_toml_str(&toml).unwrap_err();
        assert!(err.to_string().contains("collides"));
    }

    #[test]
    fn test_invalid_link_fails_to_parse() {
        let toml = format!("{MINIMAL}\n[[contact]]\nlabel = \"MAIL\"\nhref = \"not a url\"\n");
        assert!(Portfolio::from_toml_str(&toml).is_err());
    }

    #[test]
    fn test_load_from_missing_file_has_context() {
        let dir = tempfile::tempdir().unwrap();
        let err = Portfolio::load_from(&dir.path().join("nope.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to read portfolio"));
    }
}
