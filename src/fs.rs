//! Filesystem collaborator.
//!
//! The resolver only ever asks whether a candidate path exists; reading is
//! left to loaders. Keeping both behind one trait lets tests swap in a stub
//! that records every probe.

use std::fmt;
use std::io;
use std::path::Path;

/// Filesystem access used by resolution and loading.
pub trait FileSystem: Send + Sync + fmt::Debug {
    /// Whether `path` exists.
    fn exists(&self, path: &Path) -> bool;

    /// Read the whole file at `path`.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;
}

/// The real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }
}
