//! # Runtime Configuration Module
//!
//! Environment variable-based configuration for locating a web application's
//! files on disk.
//!
//! ## Environment Variables
//!
//! ### `ACTR_WEB_ROOT`
//!
//! Application root directory. Default: `.`
//!
//! ### `ACTR_ROUTES_FILE`
//!
//! Path of the routing configuration. Default: `<root>/config/routes.cfg`
//!
//! ## Layout
//!
//! ```text
//! <root>/
//! ├── config/
//! │   └── routes.cfg
//! ├── public/
//! ├── log/
//! └── tmp/
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use actionrouter::runtime_config::RuntimeConfig;
//!
//! let config = RuntimeConfig::from_env();
//! println!("Routes: {}", config.routes_config_path().display());
//! ```

use std::env;
use std::path::{Path, PathBuf};

pub const CONFIG_DIR: &str = "config";
pub const ROUTES_FILE_NAME: &str = "routes.cfg";
pub const PUBLIC_DIR: &str = "public";
pub const LOG_DIR: &str = "log";
pub const TMP_DIR: &str = "tmp";

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Application root directory (default: `.`)
    pub web_root: PathBuf,
    /// Explicit routes file, overriding `<root>/config/routes.cfg`
    pub routes_file: Option<PathBuf>,
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let web_root = env::var_os("ACTR_WEB_ROOT")
            .filter(|v| !v.is_empty())
            .map_or_else(|| PathBuf::from("."), PathBuf::from);
        let routes_file = env::var_os("ACTR_ROUTES_FILE")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);
        RuntimeConfig {
            web_root,
            routes_file,
        }
    }

    /// Configuration rooted at `web_root` with no overrides.
    #[must_use]
    pub fn with_root(web_root: impl Into<PathBuf>) -> Self {
        RuntimeConfig {
            web_root: web_root.into(),
            routes_file: None,
        }
    }

    #[must_use]
    pub fn web_root(&self) -> &Path {
        &self.web_root
    }

    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.web_root.join(CONFIG_DIR)
    }

    /// The routing configuration file.
    #[must_use]
    pub fn routes_config_path(&self) -> PathBuf {
        match &self.routes_file {
            Some(path) => path.clone(),
            None => self.config_path().join(ROUTES_FILE_NAME),
        }
    }

    #[must_use]
    pub fn public_path(&self) -> PathBuf {
        self.web_root.join(PUBLIC_DIR)
    }

    #[must_use]
    pub fn log_path(&self) -> PathBuf {
        self.web_root.join(LOG_DIR)
    }

    #[must_use]
    pub fn tmp_path(&self) -> PathBuf {
        self.web_root.join(TMP_DIR)
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::with_root(".")
    }
}
