//! Application configuration.
//!
//! A small JSON file controls the handful of knobs the shell owns itself:
//! the home URL, the search-engine template, and the turbo-mode default.
//! A missing file falls back to defaults; malformed content is an error so
//! typos do not silently reset the search engine.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ShellError, ShellResult};
use crate::urls::APP_URL_HOME;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// URL of the built-in home surface.
    pub home_url: String,
    /// Search-engine URL with `%s` standing in for the encoded query.
    pub search_url_template: String,
    /// Whether turbo mode starts enabled.
    pub turbo_mode_default: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            home_url: APP_URL_HOME.to_string(),
            search_url_template: "https://duckduckgo.com/?q=%s".to_string(),
            turbo_mode_default: true,
        }
    }
}

impl AppConfig {
    /// Load config from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> ShellResult<Self> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(ShellError::ConfigIo {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };
        serde_json::from_str(&raw).map_err(|source| ShellError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Default on-disk location, under the platform config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tvshell").join("config.json"))
    }
}
