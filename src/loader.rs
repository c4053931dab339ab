//! Loading resolved definitions.
//!
//! A `Loader` receives only the resolved path. It never holds a reference to
//! the resolver that produced it, so whatever runs during loading cannot
//! reach resolver state.

use crate::fs::FileSystem;
use std::io;
use std::path::Path;
use std::sync::Arc;

/// Loads the definition found at a resolved path.
pub trait Loader {
    type Error;

    fn load(&mut self, path: &Path) -> Result<(), Self::Error>;
}

impl<L: Loader + ?Sized> Loader for &mut L {
    type Error = L::Error;

    fn load(&mut self, path: &Path) -> Result<(), Self::Error> {
        (**self).load(path)
    }
}

/// Loader that reads the file through a `FileSystem` and passes the bytes to
/// a sink.
///
/// Read failures are converted into the sink's error type.
pub struct ReadLoader<F> {
    fs: Arc<dyn FileSystem>,
    sink: F,
}

impl<F> ReadLoader<F> {
    pub fn new(fs: Arc<dyn FileSystem>, sink: F) -> Self {
        Self { fs, sink }
    }
}

impl<F, E> Loader for ReadLoader<F>
where
    F: FnMut(&Path, Vec<u8>) -> Result<(), E>,
    E: From<io::Error>,
{
    type Error = E;

    fn load(&mut self, path: &Path) -> Result<(), E> {
        let source = self.fs.read(path)?;
        (self.sink)(path, source)
    }
}
