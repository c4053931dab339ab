//! Symbol Resolution Implementation
//!
//! Maps a fully-qualified symbol name (`App\Models\User`, `Twig_Environment`)
//! to the file that defines it. Strategies are consulted in order and the
//! first existing file wins:
//!
//! 1. Class map (exact name -> path, trusted without a filesystem probe)
//! 2. Authoritative / known-missing short-circuit
//! 3. External cache (hits and recorded misses)
//! 4. PSR-4 prefixes, longest namespace prefix first
//! 5. PSR-4 fallback directories
//! 6. PSR-0 prefixes (plain string prefix match, registration order)
//! 7. PSR-0 fallback directories
//! 8. System search path (when enabled)
//!
//! A miss is recorded in the per-resolver missing set and in the external
//! cache, so a repeated lookup never touches the filesystem again.

use crate::cache::{ExternalCache, SymbolCache};
use crate::fs::{FileSystem, OsFileSystem};
use crate::loader::Loader;
use crate::search_path::SearchPath;
use crate::tables::{FxIndexMap, Psr0Table, Psr4Table};
use rustc_hash::FxHashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use symres_common::RegistrationError;
use symres_common::limits::DEFAULT_EXTENSION;
use symres_common::logical_path::{join_logical, psr0_logical_path, psr4_logical_path, psr4_tail};
use symres_common::names::{first_char, is_well_formed, namespace_boundaries, normalize_symbol};
use tracing::{debug, trace};

/// Where a resolved path came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    ClassMap,
    ExternalCache,
    Psr4Prefix,
    Psr4Fallback,
    Psr0Prefix,
    Psr0Fallback,
    SearchPath,
}

/// Result of a successful resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSymbol {
    /// Path of the defining file
    pub path: PathBuf,
    /// Strategy that produced the path
    pub origin: Origin,
}

impl ResolvedSymbol {
    fn new(path: PathBuf, origin: Origin) -> Self {
        Self { path, origin }
    }
}

/// File extensions used to build logical paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverOptions {
    /// Extension appended to every logical path, including the dot
    pub extension: String,
    /// Extensions tried, in order, only after a full search with
    /// `extension` missed. Empty by default.
    pub secondary_extensions: Vec<String>,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            secondary_extensions: Vec::new(),
        }
    }
}

/// Resolves symbol names to defining files.
///
/// Registration is expected to finish before resolution starts. There is no
/// internal locking: `resolve` takes `&mut self` because it records misses.
#[derive(Debug)]
pub struct Resolver {
    options: ResolverOptions,
    class_map: FxIndexMap<String, PathBuf>,
    psr4: Psr4Table,
    psr0: Psr0Table,
    use_search_path: bool,
    search_path: SearchPath,
    authoritative: bool,
    /// Names proven absent; only ever grows
    missing: FxHashSet<String>,
    cache_store: Option<Arc<dyn SymbolCache>>,
    cache: Option<ExternalCache>,
    fs: Arc<dyn FileSystem>,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new()
    }
}

fn collect_dirs<I, P>(dirs: I) -> Vec<PathBuf>
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    dirs.into_iter().map(Into::into).collect()
}

impl Resolver {
    /// Resolver over the real filesystem with default options.
    pub fn new() -> Self {
        Self::with_options(ResolverOptions::default())
    }

    pub fn with_options(options: ResolverOptions) -> Self {
        Resolver {
            options,
            class_map: FxIndexMap::default(),
            psr4: Psr4Table::default(),
            psr0: Psr0Table::default(),
            use_search_path: false,
            search_path: SearchPath::default(),
            authoritative: false,
            missing: FxHashSet::default(),
            cache_store: None,
            cache: None,
            fs: Arc::new(OsFileSystem),
        }
    }

    /// Replace the filesystem collaborator.
    pub fn with_file_system(mut self, fs: Arc<dyn FileSystem>) -> Self {
        self.fs = fs;
        self
    }

    /// Directories probed when the search path is enabled.
    pub fn with_search_path(mut self, search_path: SearchPath) -> Self {
        self.search_path = search_path;
        self
    }

    /// Attach an external cache store. The cache is used once a prefix is
    /// set with [`Resolver::set_cache_prefix`].
    pub fn with_cache_store(mut self, store: Arc<dyn SymbolCache>) -> Self {
        self.cache_store = Some(store);
        self
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Merge entries into the class map; later entries win on collision.
    pub fn add_class_map<I, K, P>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, P)>,
        K: Into<String>,
        P: Into<PathBuf>,
    {
        let before = self.class_map.len();
        for (symbol, path) in entries {
            self.class_map.insert(symbol.into(), path.into());
        }
        debug!(
            added = self.class_map.len() - before,
            total = self.class_map.len(),
            "class map updated"
        );
    }

    /// Register PSR-4 directories for a namespace prefix, merging with any
    /// existing registration. The empty prefix targets the fallback list.
    pub fn add_psr4<I, P>(
        &mut self,
        prefix: &str,
        dirs: I,
        prepend: bool,
    ) -> Result<(), RegistrationError>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        debug!(prefix, prepend, "add psr-4 prefix");
        self.psr4.add(prefix, collect_dirs(dirs), prepend)
    }

    /// Register PSR-4 directories for a namespace prefix, replacing any
    /// existing registration.
    pub fn set_psr4<I, P>(&mut self, prefix: &str, dirs: I) -> Result<(), RegistrationError>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        debug!(prefix, "set psr-4 prefix");
        self.psr4.set(prefix, collect_dirs(dirs))
    }

    /// Add PSR-4 fallback directories.
    pub fn add_fallback<I, P>(&mut self, dirs: I, prepend: bool)
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.psr4.add_fallback(collect_dirs(dirs), prepend);
    }

    /// Register PSR-0 directories for a prefix, merging with any existing
    /// registration. The empty prefix targets the PSR-0 fallback list.
    pub fn add_psr0<I, P>(&mut self, prefix: &str, dirs: I, prepend: bool)
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        debug!(prefix, prepend, "add psr-0 prefix");
        self.psr0.add(prefix, collect_dirs(dirs), prepend);
    }

    /// Register PSR-0 directories for a prefix, replacing any existing
    /// registration.
    pub fn set_psr0<I, P>(&mut self, prefix: &str, dirs: I)
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        debug!(prefix, "set psr-0 prefix");
        self.psr0.set(prefix, collect_dirs(dirs));
    }

    pub fn set_use_search_path(&mut self, enabled: bool) {
        self.use_search_path = enabled;
    }

    /// When authoritative, anything missing from the class map is reported
    /// unresolved without searching directories.
    pub fn set_authoritative(&mut self, authoritative: bool) {
        self.authoritative = authoritative;
    }

    /// Enable the external cache under `prefix`, or disable it with `None`.
    ///
    /// Ignored when no cache store is attached.
    pub fn set_cache_prefix(&mut self, prefix: Option<&str>) {
        self.cache = match (prefix, &self.cache_store) {
            (Some(prefix), Some(store)) => Some(ExternalCache::new(prefix, Arc::clone(store))),
            (Some(prefix), None) => {
                debug!(prefix, "no cache store attached; cache prefix ignored");
                None
            }
            (None, _) => None,
        };
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn options(&self) -> &ResolverOptions {
        &self.options
    }

    pub fn class_map(&self) -> &FxIndexMap<String, PathBuf> {
        &self.class_map
    }

    pub fn psr4_prefixes(&self) -> impl Iterator<Item = (&str, &[PathBuf])> {
        self.psr4.prefixes()
    }

    pub fn psr4_fallback(&self) -> &[PathBuf] {
        self.psr4.fallback()
    }

    pub fn psr0_prefixes(&self) -> impl Iterator<Item = (&str, &[PathBuf])> {
        self.psr0.prefixes()
    }

    pub fn psr0_fallback(&self) -> &[PathBuf] {
        self.psr0.fallback()
    }

    pub fn uses_search_path(&self) -> bool {
        self.use_search_path
    }

    pub fn search_path(&self) -> &SearchPath {
        &self.search_path
    }

    pub fn is_authoritative(&self) -> bool {
        self.authoritative
    }

    pub fn cache_prefix(&self) -> Option<&str> {
        self.cache.as_ref().map(|cache| cache.prefix())
    }

    /// Whether `name` was proven absent by an earlier resolution.
    pub fn is_known_missing(&self, name: &str) -> bool {
        self.missing.contains(normalize_symbol(name))
    }

    pub fn missing_count(&self) -> usize {
        self.missing.len()
    }

    // =========================================================================
    // Resolution
    // =========================================================================

    /// Resolve `name` to the file that defines it.
    pub fn resolve(&mut self, name: &str) -> Option<PathBuf> {
        self.resolve_with_origin(name).map(|resolved| resolved.path)
    }

    /// Resolve `name`, reporting which strategy produced the path.
    pub fn resolve_with_origin(&mut self, name: &str) -> Option<ResolvedSymbol> {
        let name = normalize_symbol(name);
        if !is_well_formed(name) {
            trace!(name, "malformed symbol name");
            return None;
        }

        if let Some(path) = self.class_map.get(name) {
            trace!(name, path = %path.display(), "class map hit");
            return Some(ResolvedSymbol::new(path.clone(), Origin::ClassMap));
        }

        if self.authoritative || self.missing.contains(name) {
            trace!(
                name,
                authoritative = self.authoritative,
                "short-circuit: not resolvable"
            );
            return None;
        }

        if let Some(cache) = &self.cache
            && let Some(cached) = cache.get(name)
        {
            trace!(name, found = cached.is_some(), "external cache hit");
            return cached.map(|path| ResolvedSymbol::new(path, Origin::ExternalCache));
        }

        let mut found = self.search(name, &self.options.extension);
        if found.is_none() {
            for extension in &self.options.secondary_extensions {
                found = self.search(name, extension);
                if found.is_some() {
                    break;
                }
            }
        }

        if let Some(cache) = &self.cache {
            cache.put(name, found.as_ref().map(|resolved| resolved.path.clone()));
        }

        match &found {
            Some(resolved) => debug!(
                name,
                path = %resolved.path.display(),
                origin = ?resolved.origin,
                "resolved"
            ),
            None => {
                debug!(name, "not found");
                self.missing.insert(name.to_string());
            }
        }

        found
    }

    /// Directory search (PSR-4, then PSR-0, then search path) for one
    /// extension.
    fn search(&self, name: &str, extension: &str) -> Option<ResolvedSymbol> {
        let psr4_path = psr4_logical_path(name, extension);
        let first = first_char(name)?;

        if self.psr4.has_candidates(first) {
            for boundary in namespace_boundaries(name) {
                // Prefix including its trailing separator
                let Some(dirs) = self.psr4.dirs_for(&name[..=boundary]) else {
                    continue;
                };
                let tail = psr4_tail(&psr4_path, boundary);
                if let Some(path) = self.probe(dirs, tail) {
                    return Some(ResolvedSymbol::new(path, Origin::Psr4Prefix));
                }
            }
        }

        if let Some(path) = self.probe(self.psr4.fallback(), &psr4_path) {
            return Some(ResolvedSymbol::new(path, Origin::Psr4Fallback));
        }

        let psr0_path = psr0_logical_path(name, extension);

        for (_, dirs) in self.psr0.matching(name) {
            if let Some(path) = self.probe(dirs, &psr0_path) {
                return Some(ResolvedSymbol::new(path, Origin::Psr0Prefix));
            }
        }

        if let Some(path) = self.probe(self.psr0.fallback(), &psr0_path) {
            return Some(ResolvedSymbol::new(path, Origin::Psr0Fallback));
        }

        if self.use_search_path
            && let Some(path) = self.search_path.find(&psr0_path, self.fs.as_ref())
        {
            return Some(ResolvedSymbol::new(path, Origin::SearchPath));
        }

        None
    }

    /// First `dir/relative` that exists, in directory order.
    fn probe(&self, dirs: &[PathBuf], relative: &str) -> Option<PathBuf> {
        for dir in dirs {
            let candidate = join_logical(dir, relative);
            trace!(path = %candidate.display(), "probe");
            if self.fs.exists(&candidate) {
                return Some(candidate);
            }
        }
        None
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Resolve `name` and hand the file to `loader`.
    ///
    /// Returns `Ok(false)` when the symbol is unresolved. Loader errors are
    /// returned unchanged.
    pub fn load_symbol<L: Loader>(&mut self, name: &str, loader: &mut L) -> Result<bool, L::Error> {
        match self.resolve(name) {
            Some(path) => {
                loader.load(&path)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Whether `path` is the class map entry for `name`.
    pub fn is_mapped_to(&self, name: &str, path: &Path) -> bool {
        self.class_map
            .get(normalize_symbol(name))
            .is_some_and(|mapped| mapped == path)
    }
}
