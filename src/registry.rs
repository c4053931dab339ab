//! Registry of resolvers.
//!
//! Several resolvers can coexist (one per installation root). The registry
//! owns them in registration order and is passed explicitly to whatever
//! needs to enumerate them or to run the load chain; there is no global
//! instance.

use crate::loader::Loader;
use crate::resolver::Resolver;
use crate::tables::FxIndexMap;
use tracing::debug;

#[derive(Debug, Default)]
pub struct LoaderRegistry {
    entries: FxIndexMap<String, Resolver>,
}

impl LoaderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `resolver` under `id`, at the front when `prepend` is set.
    ///
    /// Re-registering an id removes the previous entry first; the replaced
    /// resolver is returned.
    pub fn register(
        &mut self,
        id: impl Into<String>,
        resolver: Resolver,
        prepend: bool,
    ) -> Option<Resolver> {
        let id = id.into();
        let previous = self.entries.shift_remove(&id);
        debug!(id = %id, prepend, replaced = previous.is_some(), "register resolver");
        if prepend {
            self.entries.shift_insert(0, id, resolver);
        } else {
            self.entries.insert(id, resolver);
        }
        previous
    }

    pub fn unregister(&mut self, id: &str) -> Option<Resolver> {
        let removed = self.entries.shift_remove(id);
        debug!(id, removed = removed.is_some(), "unregister resolver");
        removed
    }

    pub fn get(&self, id: &str) -> Option<&Resolver> {
        self.entries.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Resolver> {
        self.entries.get_mut(id)
    }

    /// Registered ids in chain order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|id| id.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Resolver)> {
        self.entries
            .iter()
            .map(|(id, resolver)| (id.as_str(), resolver))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Run the load chain: ask each resolver in order and load the first
    /// hit. Returns the id of the resolver that satisfied the lookup.
    pub fn load_symbol<L: Loader>(
        &mut self,
        name: &str,
        loader: &mut L,
    ) -> Result<Option<String>, L::Error> {
        for (id, resolver) in self.entries.iter_mut() {
            if resolver.load_symbol(name, &mut *loader)? {
                return Ok(Some(id.clone()));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(registry: &LoaderRegistry) -> Vec<&str> {
        registry.ids().collect()
    }

    #[test]
    fn test_append_and_prepend_order() {
        let mut registry = LoaderRegistry::new();
        registry.register("vendor-a", Resolver::new(), false);
        registry.register("vendor-b", Resolver::new(), false);
        registry.register("vendor-c", Resolver::new(), true);
        assert_eq!(ids(&registry), vec!["vendor-c", "vendor-a", "vendor-b"]);
    }

    #[test]
    fn test_reregistration_moves_entry() {
        let mut registry = LoaderRegistry::new();
        registry.register("a", Resolver::new(), false);
        registry.register("b", Resolver::new(), false);

        let mut replacement = Resolver::new();
        replacement.set_authoritative(true);
        let previous = registry.register("a", replacement, false);

        assert!(previous.is_some_and(|resolver| !resolver.is_authoritative()));
        assert_eq!(ids(&registry), vec!["b", "a"]);
        assert!(registry.get("a").unwrap().is_authoritative());

        registry.register("a", Resolver::new(), true);
        assert_eq!(ids(&registry), vec!["a", "b"]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_unregister() {
        let mut registry = LoaderRegistry::new();
        registry.register("a", Resolver::new(), false);
        assert!(registry.unregister("a").is_some());
        assert!(registry.unregister("a").is_none());
        assert!(registry.is_empty());
    }
}
