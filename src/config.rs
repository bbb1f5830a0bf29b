//! Configuration loading
//!
//! Settings live in a small TOML file; a missing file means defaults. All
//! fields are optional and CLI flags override them.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ForgeError, ForgeResult};

/// Toolchain version used when neither the config file nor the CLI pins one.
pub const DEFAULT_GO_VERSION: &str = "1.23.4";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Root of the toolchain cache. Defaults to the platform data dir.
    pub data_root: Option<PathBuf>,
    /// Pinned toolchain version, e.g. `1.23.4`.
    pub go_version: Option<String>,
}

impl Config {
    /// Load from the default location, falling back to defaults when no
    /// file exists.
    pub fn load() -> ForgeResult<Self> {
        match default_config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from `path`. A missing file yields the default config; a file
    /// that exists but does not parse is an error.
    pub fn load_from(path: &Path) -> ForgeResult<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("no config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(ForgeError::io(format!("reading {}", path.display()), e)),
        };
        toml::from_str(&text).map_err(|e| ForgeError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Effective cache root.
    pub fn data_root(&self) -> PathBuf {
        self.data_root.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("goforge")
        })
    }

    /// Effective toolchain version.
    pub fn go_version(&self) -> &str {
        self.go_version.as_deref().unwrap_or(DEFAULT_GO_VERSION)
    }
}

/// `<config_dir>/goforge/config.toml`, when a config dir exists.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("goforge").join("config.toml"))
}
