//! In-memory filesystem that records every existence probe.

use crate::fs::FileSystem;
use rustc_hash::FxHashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
pub(crate) struct StubFs {
    files: FxHashMap<PathBuf, Vec<u8>>,
    probes: Mutex<Vec<PathBuf>>,
}

impl StubFs {
    /// A stub where each of `paths` exists with its own path as contents.
    pub(crate) fn with_files(paths: &[&str]) -> Arc<Self> {
        let files = paths
            .iter()
            .map(|path| (PathBuf::from(path), path.as_bytes().to_vec()))
            .collect();
        Arc::new(StubFs {
            files,
            probes: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn probe_count(&self) -> usize {
        self.probes.lock().unwrap().len()
    }

    pub(crate) fn probes(&self) -> Vec<PathBuf> {
        self.probes.lock().unwrap().clone()
    }

    pub(crate) fn reset(&self) {
        self.probes.lock().unwrap().clear();
    }
}

impl FileSystem for StubFs {
    fn exists(&self, path: &Path) -> bool {
        self.probes.lock().unwrap().push(path.to_path_buf());
        self.files.contains_key(path)
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.display().to_string()))
    }
}

/// Shorthand for building expected paths.
pub(crate) fn p(path: &str) -> PathBuf {
    PathBuf::from(path)
}
