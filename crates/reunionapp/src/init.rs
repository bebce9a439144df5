//! # Data Directory and Startup
//!
//! Everything reunion keeps lives in one directory: the four collection files
//! and the optional `reunion.toml`.
//!
//! ## Resolution
//!
//! [`resolve_data_dir`] picks, in order:
//! 1. An explicit override (the CLI's `--data` flag).
//! 2. The `REUNION_DATA` environment variable.
//! 3. The OS data directory via the `directories` crate
//!    (e.g. `~/.local/share/reunion` on Linux).
//!
//! ## Startup
//!
//! [`initialize`] loads the configuration for that directory, opens the
//! file store and, when `seed_on_start` is on, fills empty collections with the
//! default content. A failed seed is logged and startup continues; the views
//! then report the store problem themselves.

use crate::api::ReunionApi;
use crate::config::{ReunionConfig, APP_NAME};
use crate::error::{ReunionError, Result};
use crate::seed::seed_all;
use crate::store::FileStore;
use directories::ProjectDirs;
use std::path::PathBuf;
use tracing::{info, warn};

pub const DATA_DIR_ENV: &str = "REUNION_DATA";

pub struct ReunionContext {
    pub api: ReunionApi<FileStore>,
    pub config: ReunionConfig,
    pub data_dir: PathBuf,
}

pub fn resolve_data_dir(data_override: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = data_override {
        return Ok(dir);
    }
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("org", APP_NAME, APP_NAME)
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| {
            ReunionError::Api(format!(
                "Could not determine a data directory; pass --data or set {}",
                DATA_DIR_ENV
            ))
        })
}

/// Build the context for one invocation.
pub fn initialize(data_override: Option<PathBuf>) -> Result<ReunionContext> {
    let data_dir = resolve_data_dir(data_override)?;
    let config = ReunionConfig::load(&data_dir);
    Ok(open(data_dir, config))
}

/// Open the store in `data_dir` with an already loaded configuration.
pub fn open(data_dir: PathBuf, config: ReunionConfig) -> ReunionContext {
    let mut store = FileStore::open(data_dir.clone());

    if config.seed_on_start {
        match seed_all(&mut store) {
            Ok(seeded) if !seeded.is_empty() => {
                info!(dir = %data_dir.display(), collections = seeded.len(), "seeded default data")
            }
            Ok(_) => {}
            Err(e) => warn!(error = %e, "could not seed default data"),
        }
    }

    let api = ReunionApi::new(store).with_upcoming_window(config.upcoming_window());
    ReunionContext {
        api,
        config,
        data_dir,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Collection;
    use crate::store::DataStore;
    use crate::test_utils::TestEnv;

    #[test]
    fn explicit_override_wins() {
        let env = TestEnv::new();
        let dir = resolve_data_dir(Some(env.root.clone())).unwrap();
        assert_eq!(dir, env.root);
    }

    #[test]
    fn open_seeds_when_configured() {
        let env = TestEnv::new();
        let ctx = open(env.root.clone(), ReunionConfig::default());
        assert!(!ctx.api.store().list_all(Collection::Magazine).unwrap().is_empty());
        assert!(env.root.join("magazine.json").exists());
    }

    #[test]
    fn open_skips_seed_when_disabled() {
        let env = TestEnv::new();
        let config = ReunionConfig {
            seed_on_start: false,
            ..Default::default()
        };
        let ctx = open(env.root.clone(), config);
        assert!(ctx.api.store().list_all(Collection::Glossary).unwrap().is_empty());
        assert!(!env.root.join("glossary.json").exists());
    }

    #[test]
    fn initialize_reads_config_from_data_dir() {
        let env = TestEnv::new();
        std::fs::write(
            env.root.join("reunion.toml"),
            "seed_on_start = false\nupcoming_window_days = 3\n",
        )
        .unwrap();
        let ctx = initialize(Some(env.root.clone())).unwrap();
        assert!(!ctx.config.seed_on_start);
        assert_eq!(ctx.config.upcoming_window_days, 3);
        assert!(ctx.api.store().list_all(Collection::Schedule).unwrap().is_empty());
    }
}
