//! Session configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Tunables for one conversational session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Maximum messages kept in conversation history
    #[serde(rename = "history-window")]
    pub history_window: usize,

    /// Minimum characters for a capture/import payload to be processed
    #[serde(rename = "min-payload-len")]
    pub min_payload_len: usize,

    /// Focus-list size above which a hint is shown
    #[serde(rename = "focus-soft-limit")]
    pub focus_soft_limit: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history_window: 30,
            min_payload_len: 10,
            focus_soft_limit: 10,
        }
    }
}

impl SessionConfig {
    /// Load configuration with fallback chain
    ///
    /// Explicit path, then project-local `.tasknotes.yml`, then
    /// `~/.config/tasknotes/tasknotes.yml`, then defaults.
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        let local_config = PathBuf::from(".tasknotes.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("tasknotes").join("tasknotes.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;
        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.history_window, 30);
        assert_eq!(config.min_payload_len, 10);
        assert_eq!(config.focus_soft_limit, 10);
    }

    #[test]
    fn test_parse_partial_yaml() {
        let config: SessionConfig = serde_yaml::from_str("history-window: 50\n").unwrap();
        assert_eq!(config.history_window, 50);
        assert_eq!(config.min_payload_len, 10);
    }
}
