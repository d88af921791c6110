//! Demo configuration
//!
//! Loaded from `.counter-demo.toml` in the current directory, then the home
//! directory. Missing files and missing keys fall back to defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const CONFIG_FILE: &str = ".counter-demo.toml";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DemoConfig {
    /// Counter value the store is mounted with
    #[serde(default)]
    pub initial_count: i64,

    /// Amount used by `inc` / `dec` without an argument
    #[serde(default = "default_step")]
    pub default_step: i64,

    /// Number of applied changes kept in the history
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

fn default_step() -> i64 {
    1
}

fn default_history_limit() -> usize {
    50
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            initial_count: 0,
            default_step: default_step(),
            history_limit: default_history_limit(),
        }
    }
}

impl DemoConfig {
    /// Load config from CWD first, then home directory, or use defaults
    pub fn load() -> Self {
        if let Some(content) = load_config_file() {
            match toml::from_str(&content) {
                Ok(config) => {
                    log::info!("Loaded demo config from file");
                    return config;
                }
                Err(e) => {
                    log::warn!("Failed to parse config file: {}", e);
                }
            }
        }

        log::debug!("Using default demo config");
        Self::default()
    }
}

fn load_config_file() -> Option<String> {
    if let Ok(content) = std::fs::read_to_string(CONFIG_FILE) {
        log::debug!("Loaded config from {}", CONFIG_FILE);
        return Some(content);
    }

    let home_config = home_config_path()?;
    match std::fs::read_to_string(&home_config) {
        Ok(content) => {
            log::debug!("Loaded config from {}", home_config.display());
            Some(content)
        }
        Err(_) => None,
    }
}

fn home_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_FILE))
}
