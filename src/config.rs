//! Optional settings for the `feimeta` binary, read from
//! `$XDG_CONFIG_HOME/feimeta/config.toml` or a path given with
//! `--config`. A missing file means defaults; nothing is created.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// `tracing` filter used when neither `RUST_LOG` nor the config sets one
pub const DEFAULT_LOG_FILTER : &str = "info";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeiMetaConfig {
    /// Where reports go when `extract` is not given `--output`.
    pub output_dir : Option<PathBuf>,
    /// `tracing` env-filter directive, e.g. `"info,feimeta=debug"`.
    pub log_filter : String,
    /// Echo every merged record to stdout while extracting.
    pub print_records : bool,
}

impl Default for FeiMetaConfig {
    fn default() -> Self {
        Self {
            output_dir : None,
            log_filter : DEFAULT_LOG_FILTER.to_string(),
            print_records : true,
        }
    }
}

/// Default location of the config file, if this platform has one.
pub fn config_path() -> Option<PathBuf> {
    #[cfg(unix)]
    {
        xdg::BaseDirectories::with_prefix("feimeta")
            .ok()
            .map(|dirs| dirs.get_config_home().join("feimeta").join("config.toml"))
    }
    #[cfg(not(unix))]
    {
        None
    }
}

/// Loads `path`, or the default location when `path` is `None`.
/// An explicitly given file must exist; the default one may not.
pub fn load(path : Option<&Path>) -> Result<FeiMetaConfig> {
    match path {
        Some(path) => load_from(path),
        None => match config_path() {
            Some(path) if path.exists() => load_from(&path),
            _ => Ok(FeiMetaConfig::default()),
        },
    }
}

pub fn load_from(path : &Path) -> Result<FeiMetaConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let cfg : FeiMetaConfig = toml::from_str(&data)
        .with_context(|| format!("parsing config {}", path.display()))?;
    tracing::debug!("loaded config from {}", path.display());
    Ok(cfg)
}
