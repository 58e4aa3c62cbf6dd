#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Throwaway application root with a `config/routes.cfg`.
pub struct WebRoot {
    dir: TempDir,
}

impl WebRoot {
    pub fn with_routes(routes: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("config")).unwrap();
        fs::write(dir.path().join("config").join("routes.cfg"), routes).unwrap();
        Self { dir }
    }

    /// Root without a routes file.
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn routes_path(&self) -> PathBuf {
        self.dir.path().join("config").join("routes.cfg")
    }
}

/// Routing file used across the integration tests.
pub const SAMPLE_ROUTES: &str = "\
# Sample application routes
get   /                home#index
get   /about           home#about
match /users:params    user#show
post  /users           user#create
post  '/login'         \"session#create\"
";
