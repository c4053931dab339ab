//! System search path.
//!
//! The last resort of legacy resolution: an externally configured, ordered
//! list of directories probed with the legacy logical path.

use crate::fs::FileSystem;
use std::path::PathBuf;
use symres_common::limits::SEARCH_PATH_ENV;
use symres_common::logical_path::join_logical;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPath {
    dirs: Vec<PathBuf>,
}

impl SearchPath {
    pub fn new<I, P>(dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            dirs: dirs.into_iter().map(Into::into).collect(),
        }
    }

    /// Read the search path from an environment variable using the platform
    /// path-list separator. An unset variable gives an empty search path.
    pub fn from_env(var: &str) -> Self {
        match std::env::var_os(var) {
            Some(value) => Self {
                dirs: std::env::split_paths(&value)
                    .filter(|dir| !dir.as_os_str().is_empty())
                    .collect(),
            },
            None => Self::default(),
        }
    }

    /// `from_env` with `SYMRES_INCLUDE_PATH`.
    pub fn from_env_default() -> Self {
        Self::from_env(SEARCH_PATH_ENV)
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    /// First `dir/relative` that exists, in search path order.
    pub fn find(&self, relative: &str, fs: &dyn FileSystem) -> Option<PathBuf> {
        self.dirs
            .iter()
            .map(|dir| join_logical(dir, relative))
            .find(|candidate| fs.exists(candidate))
    }
}
