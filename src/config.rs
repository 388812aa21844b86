//! Application configuration.
//!
//! `config.json` in the app directory, every field optional, followed by
//! environment overrides for the text-service endpoint.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const MODEL_ENV: &str = "HIVE_POPUP_MODEL";
pub const API_BASE_ENV: &str = "HIVE_POPUP_API_BASE";

const APP_DIR_NAME: &str = "HivePopup";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub model: String,
    pub api_base: String,
    pub page_swap_delay_ms: u64,
    pub auxiliary_delay_ms: u64,
    pub window_size: [f32; 2],
    pub dark_mode: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.0-flash".to_string(),
            api_base: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            page_swap_delay_ms: 500,
            auxiliary_delay_ms: 2000,
            window_size: [1280.0, 800.0],
            dark_mode: false,
        }
    }
}

#[derive(Debug)]
pub struct ConfigError {
    pub path: PathBuf,
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.message)
    }
}

impl std::error::Error for ConfigError {}

/// Per-user directory for config and credentials. Created on first use.
pub fn app_dir() -> PathBuf {
    let base = if cfg!(target_os = "windows") {
        std::env::var("APPDATA").ok()
    } else if cfg!(target_os = "macos") {
        std::env::var("HOME")
            .ok()
            .map(|h| format!("{}/Library/Application Support", h))
    } else {
        std::env::var("HOME").ok().map(|h| format!("{}/.config", h))
    };
    let dir = PathBuf::from(base.unwrap_or_else(|| ".".into())).join(APP_DIR_NAME);
    if let Err(e) = std::fs::create_dir_all(&dir) {
        log::warn!("Cannot create {}: {}", dir.display(), e);
    }
    dir
}

impl AppConfig {
    pub fn page_swap_delay(&self) -> Duration {
        Duration::from_millis(self.page_swap_delay_ms)
    }

    pub fn auxiliary_delay(&self) -> Duration {
        Duration::from_millis(self.auxiliary_delay_ms)
    }

    /// Read `path`. A missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(ConfigError {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })
            }
        };
        serde_json::from_str(&text).map_err(|e| ConfigError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Rewrite `config.json` in `dir` with `change` applied to what is on
    /// disk. Environment overrides are not written back. A file that does
    /// not parse is left alone and reported.
    pub fn update_file(dir: &Path, change: impl FnOnce(&mut Self)) -> Result<(), ConfigError> {
        let path = dir.join(CONFIG_FILE);
        let mut config = Self::from_file(&path)?;
        change(&mut config);
        let err = |message: String| ConfigError {
            path: path.clone(),
            message,
        };
        let json = serde_json::to_string_pretty(&config).map_err(|e| err(e.to_string()))?;
        std::fs::create_dir_all(dir).map_err(|e| err(e.to_string()))?;
        std::fs::write(&path, json).map_err(|e| err(e.to_string()))?;
        log::info!("Saved {}", path.display());
        Ok(())
    }

    /// Replace endpoint settings from `lookup` (normally the process environment).
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(model) = lookup(MODEL_ENV).filter(|v| !v.trim().is_empty()) {
            self.model = model.trim().to_string();
        }
        if let Some(base) = lookup(API_BASE_ENV).filter(|v| !v.trim().is_empty()) {
            self.api_base = base.trim().trim_end_matches('/').to_string();
        }
    }

    /// Load `config.json` from `dir`, falling back to defaults on error.
    pub fn load_from(dir: &Path) -> Self {
        let path = dir.join(CONFIG_FILE);
        let mut config = match Self::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Using default configuration: {}", e);
                Self::default()
            }
        };
        config.apply_overrides(|name| std::env::var(name).ok());
        log::info!(
            "Configuration: model={} api_base={}",
            config.model,
            config.api_base
        );
        config
    }

    pub fn load() -> Self {
        Self::load_from(&app_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "hive-popup-config-{}-{}",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = scratch_dir("missing");
        let config = AppConfig::from_file(&dir.join(CONFIG_FILE)).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.page_swap_delay(), Duration::from_millis(500));
        assert_eq!(config.auxiliary_delay(), Duration::from_secs(2));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = scratch_dir("partial");
        let path = dir.join(CONFIG_FILE);
        std::fs::write(&path, r#"{"dark_mode": true, "page_swap_delay_ms": 300, "extra": 1}"#)
            .unwrap();
        let config = AppConfig::from_file(&path).unwrap();
        assert!(config.dark_mode);
        assert_eq!(config.page_swap_delay_ms, 300);
        assert_eq!(config.model, "gemini-2.0-flash");
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = scratch_dir("malformed");
        let path = dir.join(CONFIG_FILE);
        std::fs::write(&path, "{ not json").unwrap();
        let err = AppConfig::from_file(&path).unwrap_err();
        assert!(err.to_string().contains(CONFIG_FILE));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn update_writes_change_and_keeps_the_rest() {
        let dir = scratch_dir("update");
        let path = dir.join(CONFIG_FILE);
        std::fs::write(&path, r#"{"page_swap_delay_ms": 300}"#).unwrap();

        AppConfig::update_file(&dir, |c| c.dark_mode = true).unwrap();
        let config = AppConfig::from_file(&path).unwrap();
        assert!(config.dark_mode);
        assert_eq!(config.page_swap_delay_ms, 300);
        assert!(AppConfig::load_from(&dir).dark_mode);

        AppConfig::update_file(&dir, |c| c.dark_mode = false).unwrap();
        assert!(!AppConfig::from_file(&path).unwrap().dark_mode);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn update_creates_missing_file() {
        let dir = scratch_dir("update-new");
        AppConfig::update_file(&dir, |c| c.dark_mode = true).unwrap();
        let config = AppConfig::from_file(&dir.join(CONFIG_FILE)).unwrap();
        assert_eq!(
            config,
            AppConfig {
                dark_mode: true,
                ..AppConfig::default()
            }
        );
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn update_leaves_malformed_file_alone() {
        let dir = scratch_dir("update-bad");
        let path = dir.join(CONFIG_FILE);
        std::fs::write(&path, "{ not json").unwrap();
        assert!(AppConfig::update_file(&dir, |c| c.dark_mode = true).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ not json");
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn overrides_replace_endpoint() {
        let mut config = AppConfig::default();
        config.apply_overrides(|name| match name {
            MODEL_ENV => Some(" gemini-1.5-pro ".to_string()),
            API_BASE_ENV => Some("http://localhost:8080/v1/".to_string()),
            _ => None,
        });
        assert_eq!(config.model, "gemini-1.5-pro");
        assert_eq!(config.api_base, "http://localhost:8080/v1");
    }

    #[test]
    fn blank_overrides_are_ignored() {
        let mut config = AppConfig::default();
        config.apply_overrides(|_| Some("   ".to_string()));
        assert_eq!(config, AppConfig::default());
    }
}
