//! Configuration loading and management

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Combination that reveals the hidden window
pub const DEFAULT_KEY_SHOW: &str = "alt+space";

/// Combination that ends the process while the window is visible
pub const DEFAULT_KEY_EXIT: &str = "ctrl+c";

/// Path of an optional JSON config file
pub const CONFIG_PATH_VAR: &str = "HOTKEY_TOGGLE_CONFIG";
pub const KEY_SHOW_VAR: &str = "HOTKEY_TOGGLE_KEY_SHOW";
pub const KEY_EXIT_VAR: &str = "HOTKEY_TOGGLE_KEY_EXIT";

/// Hotkey configuration; unset keys fall back to defaults at attach time
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HotkeyConfig {
    /// Shortcut that shows the window, `mod1+mod2+...+key`
    pub key_show: Option<String>,

    /// Shortcut that exits the process while visible
    pub key_exit: Option<String>,
}

/// Both shortcuts with defaults applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedKeys {
    pub key_show: String,
    pub key_exit: String,
}

impl HotkeyConfig {
    /// Load configuration from the optional config file and environment
    pub fn load() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`HotkeyConfig::load`] with a custom variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(CONFIG_PATH_VAR) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };

        if let Some(key_show) = lookup(KEY_SHOW_VAR) {
            config.key_show = Some(key_show);
        }
        if let Some(key_exit) = lookup(KEY_EXIT_VAR) {
            config.key_exit = Some(key_exit);
        }

        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("failed to parse hotkey config")
    }

    pub fn with_key_show(mut self, key_show: impl Into<String>) -> Self {
        self.key_show = Some(key_show.into());
        self
    }

    pub fn with_key_exit(mut self, key_exit: impl Into<String>) -> Self {
        self.key_exit = Some(key_exit.into());
        self
    }

    /// Fill unset keys with their defaults, logging each default applied
    pub fn resolve(&self) -> ResolvedKeys {
        let key_exit = self.key_exit.clone().unwrap_or_else(|| {
            info!(default = DEFAULT_KEY_EXIT, "key_exit not defined, using default");
            DEFAULT_KEY_EXIT.to_string()
        });
        let key_show = self.key_show.clone().unwrap_or_else(|| {
            info!(default = DEFAULT_KEY_SHOW, "key_show not defined, using default");
            DEFAULT_KEY_SHOW.to_string()
        });

        ResolvedKeys { key_show, key_exit }
    }
}
