//! XDG config directory resolution.
//!
//! gdocs-index keeps no data between runs (the index is rebuilt each
//! time), so only the config location is resolved here.

use std::env;
use std::path::PathBuf;

const APP_DIR: &str = "gdocs-index";

/// Resolved XDG locations for gdocs-index
#[derive(Debug, Clone)]
pub struct XdgDirs {
    pub config_dir: PathBuf,
}

impl XdgDirs {
    /// Resolve the config directory.
    ///
    /// Priority order (highest to lowest):
    /// 1. `GDOCS_CONFIG_DIR`
    /// 2. `XDG_CONFIG_HOME/gdocs-index`
    /// 3. `~/.config/gdocs-index`
    pub fn new() -> Self {
        Self {
            config_dir: Self::resolve_config_dir(),
        }
    }

    fn resolve_config_dir() -> PathBuf {
        if let Ok(dir) = env::var("GDOCS_CONFIG_DIR") {
            return PathBuf::from(dir);
        }

        if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join(APP_DIR);
        }

        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join(APP_DIR)
    }

    /// Path of `config.toml` inside the config directory
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }
}

impl Default for XdgDirs {
    fn default() -> Self {
        Self::new()
    }
}
