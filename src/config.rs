//! Sheet configuration persistence
//!
//! Stores user preferences in `~/.config/itemsheet/config.yaml`

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Which `Persistence` implementation backs the sheet
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// REST server at `server_url`
    #[default]
    Http,
    /// Process-local rows, lost on exit
    Memory,
    /// JSON file at `data_file`
    File,
}

/// Sheet configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetConfig {
    #[serde(default)]
    pub backend: Backend,

    /// Base URL of the items collection
    #[serde(default = "default_server_url")]
    pub server_url: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Ask before deleting a whole row
    #[serde(default = "default_true")]
    pub confirm_row_delete: bool,

    /// Also put copied text on the OS clipboard
    #[serde(default = "default_true")]
    pub mirror_system_clipboard: bool,

    /// Location for the `file` backend (defaults to the config dir)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
}

fn default_server_url() -> String {
    "http://localhost:3001/api/items".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_true() -> bool {
    true
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            server_url: default_server_url(),
            request_timeout_secs: default_request_timeout_secs(),
            confirm_row_delete: true,
            mirror_system_clipboard: true,
            data_file: None,
        }
    }
}

impl SheetConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from a specific file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// How long the front end waits for a request before giving up
    ///
    /// One second past the backend timeout so the backend reports first.
    pub fn idle_wait(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.saturating_add(1))
    }

    /// Save config to disk
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config: SheetConfig = serde_yaml::from_str("backend: memory\n").unwrap();
        assert_eq!(config.backend, Backend::Memory);
        assert_eq!(config.server_url, default_server_url());
        assert!(config.confirm_row_delete);
        assert_eq!(config.request_timeout_secs, 10);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.yaml");
        let config = SheetConfig {
            backend: Backend::File,
            data_file: Some(dir.path().join("rows.json")),
            confirm_row_delete: false,
            ..SheetConfig::default()
        };

        config.save_to(&path).unwrap();
        assert_eq!(SheetConfig::load_from(&path), config);
    }

    #[test]
    fn test_invalid_yaml_falls_back() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "backend: [nope").unwrap();
        assert_eq!(SheetConfig::load_from(&path), SheetConfig::default());
    }
}
