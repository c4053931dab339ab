//! Resolve namespaced symbol names to the files that define them.
//!
//! ```no_run
//! use symres::Resolver;
//!
//! let mut resolver = Resolver::new();
//! resolver.add_psr4("App\\", ["src/"], false)?;
//! resolver.add_psr0("Twig_", ["vendor/twig/lib"], false);
//!
//! if let Some(path) = resolver.resolve("App\\Models\\User") {
//!     println!("{}", path.display());
//! }
//! # Ok::<(), symres::RegistrationError>(())
//! ```

pub use symres_common::{RegistrationError, limits, names};

// Prefix registration tables
pub mod tables;
pub use tables::{DirList, Psr0Table, Psr4Table};

// Collaborators: filesystem, external cache, system search path
pub mod fs;
pub use fs::{FileSystem, OsFileSystem};

pub mod cache;
pub use cache::{ExternalCache, MemoryCache, SymbolCache};

pub mod search_path;
pub use search_path::SearchPath;

// Resolution
pub mod resolver;
pub use resolver::{Origin, ResolvedSymbol, Resolver, ResolverOptions};

// Loading and the resolver chain
pub mod loader;
pub use loader::{Loader, ReadLoader};

pub mod registry;
pub use registry::LoaderRegistry;

// Configuration
pub mod config;
pub use config::{AutoloadConfig, DirSpec, load_config, load_resolver, parse_config};

pub mod tracing_config;

#[cfg(test)]
#[path = "tests/test_fs.rs"]
pub(crate) mod test_fs;

#[cfg(test)]
#[path = "tests/resolver_tests.rs"]
mod resolver_tests;

#[cfg(test)]
#[path = "tests/cache_tests.rs"]
mod cache_tests;
