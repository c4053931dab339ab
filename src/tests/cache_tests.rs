//! External cache interaction with the resolution pipeline.

use crate::cache::{MemoryCache, SymbolCache};
use crate::resolver::{Origin, Resolver};
use crate::test_fs::{StubFs, p};
use std::sync::Arc;

fn cached_resolver(fs: &Arc<StubFs>, store: &Arc<MemoryCache>, prefix: &str) -> Resolver {
    let mut resolver = Resolver::new()
        .with_file_system(fs.clone())
        .with_cache_store(store.clone());
    resolver.set_cache_prefix(Some(prefix));
    resolver
}

#[test]
fn test_hits_and_misses_are_written_under_prefix() {
    let fs = StubFs::with_files(&["src/Models/User.php"]);
    let store = MemoryCache::shared();
    let mut resolver = cached_resolver(&fs, &store, "app:");
    resolver.add_psr4("App\\", ["src"], false).unwrap();

    resolver.resolve("App\\Models\\User");
    resolver.resolve("App\\Models\\Ghost");

    assert_eq!(store.len(), 2);
    assert_eq!(
        store.get("app:App\\Models\\User"),
        Some(Some(p("src/Models/User.php")))
    );
    assert_eq!(store.get("app:App\\Models\\Ghost"), Some(None));
    assert_eq!(store.get("App\\Models\\User"), None);
}

#[test]
fn test_cached_hit_skips_filesystem() {
    let fs = StubFs::with_files(&[]);
    let store = MemoryCache::shared();
    store.put("app:App\\Warm", Some(p("warm/Warm.php")));
    let mut resolver = cached_resolver(&fs, &store, "app:");
    resolver.add_psr4("App\\", ["src"], false).unwrap();

    let resolved = resolver.resolve_with_origin("App\\Warm").unwrap();
    assert_eq!(resolved.path, p("warm/Warm.php"));
    assert_eq!(resolved.origin, Origin::ExternalCache);
    assert_eq!(fs.probe_count(), 0);
}

#[test]
fn test_cached_miss_skips_filesystem_and_memo() {
    let fs = StubFs::with_files(&["src/Gone.php"]);
    let store = MemoryCache::shared();
    store.put("app:App\\Gone", None);
    let mut resolver = cached_resolver(&fs, &store, "app:");
    resolver.add_psr4("App\\", ["src"], false).unwrap();

    assert_eq!(resolver.resolve("App\\Gone"), None);
    assert_eq!(fs.probe_count(), 0);
    assert!(!resolver.is_known_missing("App\\Gone"));
}

#[test]
fn test_second_resolver_reuses_first_results() {
    let fs = StubFs::with_files(&["src/Service.php"]);
    let store = MemoryCache::shared();

    let mut first = cached_resolver(&fs, &store, "app:");
    first.add_psr4("App\\", ["src"], false).unwrap();
    assert_eq!(first.resolve("App\\Service"), Some(p("src/Service.php")));
    let probes = fs.probe_count();

    let mut second = cached_resolver(&fs, &store, "app:");
    second.add_psr4("App\\", ["src"], false).unwrap();
    assert_eq!(second.resolve("App\\Service"), Some(p("src/Service.php")));
    assert_eq!(fs.probe_count(), probes);
}

#[test]
fn test_prefixes_isolate_resolvers() {
    let fs = StubFs::with_files(&["a/Tool.php", "b/Tool.php"]);
    let store = MemoryCache::shared();

    let mut a = cached_resolver(&fs, &store, "a:");
    a.add_psr4("Lib\\", ["a"], false).unwrap();
    let mut b = cached_resolver(&fs, &store, "b:");
    b.add_psr4("Lib\\", ["b"], false).unwrap();

    assert_eq!(a.resolve("Lib\\Tool"), Some(p("a/Tool.php")));
    assert_eq!(b.resolve("Lib\\Tool"), Some(p("b/Tool.php")));
}

#[test]
fn test_class_map_and_authoritative_precede_cache() {
    let fs = StubFs::with_files(&[]);
    let store = MemoryCache::shared();
    store.put("app:App\\Mapped", Some(p("stale/Mapped.php")));
    store.put("app:App\\Other", Some(p("stale/Other.php")));

    let mut resolver = cached_resolver(&fs, &store, "app:");
    resolver.add_class_map([("App\\Mapped", "lib/Mapped.php")]);
    resolver.set_authoritative(true);

    assert_eq!(resolver.resolve("App\\Mapped"), Some(p("lib/Mapped.php")));
    assert_eq!(resolver.resolve("App\\Other"), None);
}

#[test]
fn test_clearing_prefix_disables_cache() {
    let fs = StubFs::with_files(&["src/Thing.php"]);
    let store = MemoryCache::shared();
    let mut resolver = cached_resolver(&fs, &store, "app:");
    resolver.add_psr4("App\\", ["src"], false).unwrap();
    assert_eq!(resolver.cache_prefix(), Some("app:"));

    resolver.set_cache_prefix(None);
    assert_eq!(resolver.cache_prefix(), None);
    resolver.resolve("App\\Thing");
    assert!(store.is_empty());
}
