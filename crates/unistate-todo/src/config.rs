//! Application configuration
//!
//! Configuration loaded from `.unistate-todo.toml`, looked up in the current
//! directory first and then in the home directory.

use serde::{Deserialize, Serialize};
use std::{env, path::PathBuf};

const CONFIG_FILE: &str = ".unistate-todo.toml";

/// Application configuration loaded from .unistate-todo.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Prompt printed before each command
    #[serde(default = "default_prompt")]
    pub prompt: String,

    /// Todos present when the application starts
    #[serde(default)]
    pub initial_todos: Vec<String>,

    /// Whether completed todos are listed
    #[serde(default = "default_show_done")]
    pub show_done: bool,
}

fn default_prompt() -> String {
    "todo> ".to_string()
}

fn default_show_done() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            initial_todos: Vec::new(),
            show_done: default_show_done(),
        }
    }
}

impl AppConfig {
    /// Load config from CWD first, then home directory, or use defaults
    pub fn load() -> Self {
        if let Some(content) = load_config_file() {
            match Self::parse(&content) {
                Ok(config) => {
                    log::info!("Loaded app config from file");
                    return config;
                }
                Err(e) => {
                    log::warn!("Failed to parse config file: {}", e);
                }
            }
        }

        log::debug!("Using default app config");
        Self::default()
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// Load config file content from CWD first, then home directory
fn load_config_file() -> Option<String> {
    if let Ok(content) = std::fs::read_to_string(CONFIG_FILE) {
        log::debug!("Loaded config from {}", CONFIG_FILE);
        return Some(content);
    }

    if let Some(home_config) = get_home_config_path() {
        if let Ok(content) = std::fs::read_to_string(&home_config) {
            log::debug!("Loaded config from {}", home_config.display());
            return Some(content);
        }
    }

    None
}

fn get_home_config_path() -> Option<PathBuf> {
    env::var_os("HOME").map(|home| PathBuf::from(home).join(CONFIG_FILE))
}
