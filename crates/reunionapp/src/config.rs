//! # Configuration
//!
//! Reunion configuration is managed by [`clapfig`], which handles layered
//! loading from a TOML file, environment variables and compiled defaults.
//!
//! ## Resolution Order
//!
//! 1. **Environment variables**: `REUNION__SEED_ON_START`, `REUNION__LOG_LEVEL`, ...
//! 2. **Config file**: `reunion.toml` in the data directory.
//! 3. **Compiled defaults**: via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `seed_on_start` | `true` | Fill empty collections with the default content on start |
//! | `log_level` | `warn` | Log filter used when neither `RUST_LOG` nor `-v` is given |
//! | `upcoming_window_days` | `14` | Days ahead an event counts as upcoming |
//!
//! ## CLI Usage
//!
//! - `reunion config show`: print every resolved value.
//! - `reunion config path`: print where the config file and data live.

use crate::model::schedule::UPCOMING_WINDOW_DAYS;
use clapfig::{Clapfig, SearchMode, SearchPath};
use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const APP_NAME: &str = "reunion";
pub const CONFIG_FILE: &str = "reunion.toml";

/// Configuration for reunion, stored in `reunion.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ReunionConfig {
    /// Fill empty collections with the default content on start.
    #[config(default = true)]
    pub seed_on_start: bool,

    /// Log filter used when neither RUST_LOG nor -v is given
    /// (e.g. "warn", "info", "reunionapp=debug").
    #[config(default = "warn")]
    pub log_level: String,

    /// Days ahead of today an event is flagged as upcoming.
    #[config(default = 14)]
    pub upcoming_window_days: i64,
}

impl Default for ReunionConfig {
    fn default() -> Self {
        Self {
            seed_on_start: true,
            log_level: "warn".to_string(),
            upcoming_window_days: UPCOMING_WINDOW_DAYS,
        }
    }
}

impl ReunionConfig {
    /// Load the layered configuration for `data_dir`.
    ///
    /// A missing or unreadable file falls back to the defaults.
    pub fn load(data_dir: &Path) -> Self {
        Clapfig::builder()
            .app_name(APP_NAME)
            .file_name(CONFIG_FILE)
            .search_paths(vec![SearchPath::Path(data_dir.to_path_buf())])
            .search_mode(SearchMode::Merge)
            .load()
            .unwrap_or_default()
    }

    /// The look-ahead window, never negative.
    pub fn upcoming_window(&self) -> i64 {
        self.upcoming_window_days.max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ReunionConfig::default();
        assert!(config.seed_on_start);
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.upcoming_window(), 14);
    }

    #[test]
    fn test_negative_window_is_clamped() {
        let config = ReunionConfig {
            upcoming_window_days: -3,
            ..Default::default()
        };
        assert_eq!(config.upcoming_window(), 0);
    }

    #[test]
    fn test_serializes_to_toml_keys() {
        let value = serde_json::to_value(ReunionConfig::default()).unwrap();
        assert_eq!(value["seed_on_start"], serde_json::json!(true));
        assert_eq!(value["upcoming_window_days"], serde_json::json!(14));
    }
}
