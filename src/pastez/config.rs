//! # Configuration
//!
//! Stored as `config.json` in the pastez config directory:
//!
//! 1. `$PASTEZ_HOME` when set.
//! 2. Otherwise the OS-appropriate config directory (via `directories`).
//!
//! `PASTEZ_SERVER` overrides `server` for a single run without touching the
//! file.
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `server` | `http://localhost:7777` | Base URL of the paste store |
//! | `app_name` | `pastez` | Used in page titles and history labels |
//! | `sharing_enabled` | `false` | Whether the Share command is offered |
//! | `share_endpoint` | `https://twitter.com/share?url=` | Prefix for share links |

use crate::error::{PastezError, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";

pub const HOME_ENV: &str = "PASTEZ_HOME";
pub const SERVER_ENV: &str = "PASTEZ_SERVER";

pub const KEYS: &[&str] = &["server", "app_name", "sharing_enabled", "share_endpoint"];

fn default_server() -> String {
    "http://localhost:7777".to_string()
}

fn default_app_name() -> String {
    "pastez".to_string()
}

fn default_share_endpoint() -> String {
    "https://twitter.com/share?url=".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PastezConfig {
    #[serde(default = "default_server")]
    pub server: String,

    #[serde(default = "default_app_name")]
    pub app_name: String,

    #[serde(default)]
    pub sharing_enabled: bool,

    #[serde(default = "default_share_endpoint")]
    pub share_endpoint: String,
}

impl Default for PastezConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            app_name: default_app_name(),
            sharing_enabled: false,
            share_endpoint: default_share_endpoint(),
        }
    }
}

/// Resolves where `config.json` lives.
pub fn config_dir() -> Result<PathBuf> {
    if let Some(home) = env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "pastez", "pastez")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| PastezError::Config("Could not determine config directory".to_string()))
}

impl PastezConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        fs::create_dir_all(config_dir)?;

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    /// Applies `PASTEZ_SERVER` when it is set.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(server) = env::var(SERVER_ENV) {
            if !server.is_empty() {
                self.server = server;
            }
        }
        self
    }

    /// The server base URL without a trailing slash.
    pub fn server_url(&self) -> &str {
        self.server.trim_end_matches('/')
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "server" => Some(self.server.clone()),
            "app_name" => Some(self.app_name.clone()),
            "sharing_enabled" => Some(self.sharing_enabled.to_string()),
            "share_endpoint" => Some(self.share_endpoint.clone()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "server" => self.server = value.to_string(),
            "app_name" => self.app_name = value.to_string(),
            "sharing_enabled" => {
                self.sharing_enabled = match value {
                    "true" | "yes" | "on" | "1" => true,
                    "false" | "no" | "off" | "0" => false,
                    _ => {
                        return Err(PastezError::Config(format!(
                            "Invalid boolean for sharing_enabled: {}",
                            value
                        )))
                    }
                }
            }
            "share_endpoint" => self.share_endpoint = value.to_string(),
            _ => return Err(PastezError::Config(format!("Unknown config key: {}", key))),
        }
        Ok(())
    }

    /// Every key with its current value, in table order.
    pub fn list_all(&self) -> Vec<(&'static str, String)> {
        KEYS.iter()
            .filter_map(|k| self.get(k).map(|v| (*k, v)))
            .collect()
    }
}

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

/// Runs a config action against the file in `dir`, returning the lines to show.
pub fn run(dir: &Path, action: ConfigAction) -> Result<Vec<(String, String)>> {
    let mut config = PastezConfig::load(dir)?;
    match action {
        ConfigAction::ShowAll => Ok(config
            .list_all()
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()),
        ConfigAction::ShowKey(key) => match config.get(&key) {
            Some(value) => Ok(vec![(key, value)]),
            None => Err(PastezError::Config(format!("Unknown config key: {}", key))),
        },
        ConfigAction::Set(key, value) => {
            config.set(&key, &value)?;
            config.save(dir)?;
            let shown = config.get(&key).unwrap_or(value);
            Ok(vec![(key, shown)])
        }
    }
}
