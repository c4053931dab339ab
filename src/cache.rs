//! External resolution cache.
//!
//! A `SymbolCache` outlives individual resolvers: it is shared between them
//! and, for persistent backends, between processes. Both hits and misses are
//! stored, so a cached entry is `Option<PathBuf>` where `None` records a
//! proven miss. Stale entries are never detected here; invalidation belongs
//! to whoever owns the store.

use dashmap::DashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Key-value store for resolution results.
///
/// `get` returns `None` on a cache miss and `Some(None)` when a previous
/// resolution recorded that the symbol does not exist.
pub trait SymbolCache: Send + Sync + fmt::Debug {
    fn get(&self, key: &str) -> Option<Option<PathBuf>>;

    /// Store a result. Concurrent writers to one key are last-write-wins.
    fn put(&self, key: &str, value: Option<PathBuf>);
}

/// In-memory `SymbolCache` backed by a `DashMap`, safe to share between
/// threads and resolvers.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: DashMap<String, Option<PathBuf>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// A new cache already wrapped for sharing.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}

impl SymbolCache for MemoryCache {
    fn get(&self, key: &str) -> Option<Option<PathBuf>> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    fn put(&self, key: &str, value: Option<PathBuf>) {
        self.entries.insert(key.to_string(), value);
    }
}

/// A cache store bound to the key prefix of one resolver.
#[derive(Debug, Clone)]
pub struct ExternalCache {
    prefix: String,
    store: Arc<dyn SymbolCache>,
}

impl ExternalCache {
    pub fn new(prefix: impl Into<String>, store: Arc<dyn SymbolCache>) -> Self {
        Self {
            prefix: prefix.into(),
            store,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn key(&self, symbol: &str) -> String {
        let mut key = String::with_capacity(self.prefix.len() + symbol.len());
        key.push_str(&self.prefix);
        key.push_str(symbol);
        key
    }

    pub fn get(&self, symbol: &str) -> Option<Option<PathBuf>> {
        self.store.get(&self.key(symbol))
    }

    pub fn put(&self, symbol: &str, value: Option<PathBuf>) {
        self.store.put(&self.key(symbol), value);
    }
}
