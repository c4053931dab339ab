//! Centralized defaults for the resolver.
//!
//! Keeping these in one place avoids the same literal drifting between the
//! resolver, the configuration loader and the tracing setup.

/// Source-file extension appended to logical paths unless configured.
pub const DEFAULT_EXTENSION: &str = ".php";

/// Environment variable holding the tracing filter (same syntax as `RUST_LOG`).
pub const LOG_ENV: &str = "SYMRES_LOG";

/// Environment variable selecting the tracing output format.
pub const LOG_FORMAT_ENV: &str = "SYMRES_LOG_FORMAT";

/// Environment variable holding the system search path, split with the
/// platform path-list separator.
pub const SEARCH_PATH_ENV: &str = "SYMRES_INCLUDE_PATH";

/// Inline capacity for per-prefix directory lists.
///
/// Nearly every prefix maps to one or two directories.
pub const INLINE_DIRS: usize = 2;
