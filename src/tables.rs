//! Prefix registration tables.
//!
//! `Psr4Table` holds hierarchical registrations: a namespace prefix (always
//! ending in `\`) maps to an ordered list of base directories. A
//! first-character index lets resolution skip the prefix walk entirely when
//! no registered prefix could match.
//!
//! `Psr0Table` holds legacy registrations, bucketed by first character and
//! kept in registration order; matching is a plain string prefix test.
//!
//! Both tables route the empty prefix to their fallback list.

use indexmap::IndexMap;
use rustc_hash::{FxBuildHasher, FxHashMap, FxHashSet};
use smallvec::SmallVec;
use std::path::PathBuf;
use symres_common::RegistrationError;
use symres_common::limits::INLINE_DIRS;
use symres_common::names::{first_char, is_valid_psr4_prefix};

/// Ordered directories registered under one prefix.
pub type DirList = SmallVec<[PathBuf; INLINE_DIRS]>;

pub type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Merge `dirs` into `existing`, in front when `prepend` is set.
fn merge_dirs<I>(existing: &mut DirList, dirs: I, prepend: bool)
where
    I: IntoIterator<Item = PathBuf>,
{
    if prepend {
        existing.insert_many(0, dirs);
    } else {
        existing.extend(dirs);
    }
}

fn merge_fallback(existing: &mut Vec<PathBuf>, dirs: Vec<PathBuf>, prepend: bool) {
    if prepend {
        existing.splice(0..0, dirs);
    } else {
        existing.extend(dirs);
    }
}

/// Hierarchical (PSR-4) registrations.
#[derive(Debug, Clone, Default)]
pub struct Psr4Table {
    /// Prefix -> directories, in first-registration order
    prefix_dirs: FxIndexMap<String, DirList>,
    /// First character -> prefixes starting with it
    prefixes_by_first: FxHashMap<char, FxHashSet<String>>,
    /// Directories searched with the full logical path
    fallback: Vec<PathBuf>,
}

impl Psr4Table {
    /// Register directories for `prefix`, merging with any existing entry.
    pub fn add(
        &mut self,
        prefix: &str,
        dirs: Vec<PathBuf>,
        prepend: bool,
    ) -> Result<(), RegistrationError> {
        if prefix.is_empty() {
            self.add_fallback(dirs, prepend);
            return Ok(());
        }

        if let Some(existing) = self.prefix_dirs.get_mut(prefix) {
            merge_dirs(existing, dirs, prepend);
            return Ok(());
        }

        self.insert_new(prefix, dirs)
    }

    /// Add fallback directories, searched with the full logical path.
    pub fn add_fallback(&mut self, dirs: Vec<PathBuf>, prepend: bool) {
        merge_fallback(&mut self.fallback, dirs, prepend);
    }

    /// Register directories for `prefix`, replacing any existing entry.
    pub fn set(&mut self, prefix: &str, dirs: Vec<PathBuf>) -> Result<(), RegistrationError> {
        if prefix.is_empty() {
            self.fallback = dirs;
            return Ok(());
        }

        if let Some(existing) = self.prefix_dirs.get_mut(prefix) {
            *existing = DirList::from_vec(dirs);
            return Ok(());
        }

        self.insert_new(prefix, dirs)
    }

    fn insert_new(&mut self, prefix: &str, dirs: Vec<PathBuf>) -> Result<(), RegistrationError> {
        if !is_valid_psr4_prefix(prefix) {
            return Err(RegistrationError::invalid_prefix(prefix));
        }
        let Some(first) = first_char(prefix) else {
            return Err(RegistrationError::invalid_prefix(prefix));
        };

        self.prefixes_by_first
            .entry(first)
            .or_default()
            .insert(prefix.to_string());
        self.prefix_dirs
            .insert(prefix.to_string(), DirList::from_vec(dirs));
        Ok(())
    }

    /// Whether any registered prefix starts with `first`.
    pub fn has_candidates(&self, first: char) -> bool {
        self.prefixes_by_first
            .get(&first)
            .is_some_and(|prefixes| !prefixes.is_empty())
    }

    /// Directories registered under an exact prefix.
    pub fn dirs_for(&self, prefix: &str) -> Option<&[PathBuf]> {
        self.prefix_dirs.get(prefix).map(|dirs| dirs.as_slice())
    }

    /// All prefixes with their directories, in first-registration order.
    pub fn prefixes(&self) -> impl Iterator<Item = (&str, &[PathBuf])> {
        self.prefix_dirs
            .iter()
            .map(|(prefix, dirs)| (prefix.as_str(), dirs.as_slice()))
    }

    pub fn fallback(&self) -> &[PathBuf] {
        &self.fallback
    }

    pub fn len(&self) -> usize {
        self.prefix_dirs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefix_dirs.is_empty()
    }
}

/// Legacy (PSR-0) registrations.
#[derive(Debug, Clone, Default)]
pub struct Psr0Table {
    /// First character -> prefix -> directories, both in registration order
    prefixes: FxIndexMap<char, FxIndexMap<String, DirList>>,
    fallback: Vec<PathBuf>,
}

impl Psr0Table {
    pub fn add(&mut self, prefix: &str, dirs: Vec<PathBuf>, prepend: bool) {
        let Some(first) = first_char(prefix) else {
            merge_fallback(&mut self.fallback, dirs, prepend);
            return;
        };

        let group = self.prefixes.entry(first).or_default();
        match group.get_mut(prefix) {
            Some(existing) => merge_dirs(existing, dirs, prepend),
            None => {
                group.insert(prefix.to_string(), DirList::from_vec(dirs));
            }
        }
    }

    pub fn set(&mut self, prefix: &str, dirs: Vec<PathBuf>) {
        let Some(first) = first_char(prefix) else {
            self.fallback = dirs;
            return;
        };

        self.prefixes
            .entry(first)
            .or_default()
            .insert(prefix.to_string(), DirList::from_vec(dirs));
    }

    /// Prefixes sharing `name`'s first character that are a string prefix
    /// of `name`, in registration order.
    pub fn matching<'a>(&'a self, name: &'a str) -> impl Iterator<Item = (&'a str, &'a [PathBuf])> {
        first_char(name)
            .and_then(|first| self.prefixes.get(&first))
            .into_iter()
            .flat_map(|group| group.iter())
            .filter(move |(prefix, _)| name.starts_with(prefix.as_str()))
            .map(|(prefix, dirs)| (prefix.as_str(), dirs.as_slice()))
    }

    /// All prefixes flattened across first-character groups.
    pub fn prefixes(&self) -> impl Iterator<Item = (&str, &[PathBuf])> {
        self.prefixes
            .values()
            .flat_map(|group| group.iter())
            .map(|(prefix, dirs)| (prefix.as_str(), dirs.as_slice()))
    }

    pub fn fallback(&self) -> &[PathBuf] {
        &self.fallback
    }
}
