//! Configuration management for folio.
//!
//! Loads configuration from ${FOLIO_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::navigator::{ScrollBehavior, ScrollTrigger};
use crate::reveal::RevealTiming;

fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

pub mod paths {
    //! Path resolution for folio configuration and data directories.
    //!
    //! FOLIO_HOME resolution order:
    //! 1. FOLIO_HOME environment variable (if set)
    //! 2. ~/.config/folio (default)
    //! 3. ./.folio when no home directory can be determined

    use std::path::PathBuf;

    /// Returns the folio home directory.
    pub fn folio_home() -> PathBuf {
        if let Ok(home) = std::env::var("FOLIO_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("folio"))
            .unwrap_or_else(|| PathBuf::from(".folio"))
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        folio_home().join("config.toml")
    }

    /// Returns the path to the user's portfolio file (may not exist).
    pub fn portfolio_path() -> PathBuf {
        folio_home().join("portfolio.toml")
    }

    /// Returns the directory log files are written to.
    pub fn log_dir() -> PathBuf {
        folio_home().join("logs")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Portfolio file override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<PathBuf>,
    pub reveal: RevealConfig,
    pub navigation: NavigationConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub enabled: bool,
    pub char_interval_ms: u64,
    pub cursor_blink_ms: u64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            char_interval_ms: 100,
            cursor_blink_ms: 500,
        }
    }
}

impl RevealConfig {
    /// # Errors
    /// Returns an error if either interval is zero.
    pub fn timing(&self) -> Result<RevealTiming> {
        RevealTiming::new(
            Duration::from_millis(self.char_interval_ms),
            Duration::from_millis(self.cursor_blink_ms),
        )
        .context("Invalid [reveal] settings")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerKind {
    #[default]
    Mount,
    Delay,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    pub scroll_trigger: TriggerKind,
    pub scroll_delay_ms: u64,
    pub mount_timeout_ms: u64,
    pub smooth_scroll: bool,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            scroll_trigger: TriggerKind::Mount,
            scroll_delay_ms: 100,
            mount_timeout_ms: 1000,
            smooth_scroll: true,
        }
    }
}

impl NavigationConfig {
    pub fn trigger(&self) -> ScrollTrigger {
        match self.scroll_trigger {
            TriggerKind::Mount => ScrollTrigger::OnMount {
                timeout: Duration::from_millis(self.mount_timeout_ms),
            },
            TriggerKind::Delay => ScrollTrigger::After(Duration::from_millis(self.scroll_delay_ms)),
        }
    }

    pub fn behavior(&self) -> ScrollBehavior {
        if self.smooth_scroll {
            ScrollBehavior::Smooth
        } else {
            ScrollBehavior::Instant
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub enabled: bool,
    /// `tracing-subscriber` filter directive, e.g. `info` or `folio_tui=debug`.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        Self::write_config(path, default_config_template())
    }

    /// Writes config content to a file, creating parent directories as needed.
    /// Uses atomic write (temp file + rename).
    fn write_config(path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let tmp_path = path.with_extension("toml.tmp");
        fs::write(&tmp_path, content)
            .with_context(|| format!("Failed to write config to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}
