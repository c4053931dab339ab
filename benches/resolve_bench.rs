//! Resolution benchmarks.
//!
//! Measures lookup cost per strategy over a generated directory tree.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use std::fs;
use std::path::Path;
use symres::{MemoryCache, Resolver};
use tempfile::TempDir;

const MODULES: usize = 50;

/// `src/Module{n}/Service.php` for every module.
fn build_tree() -> TempDir {
    let dir = tempfile::tempdir().expect("temp dir");
    for n in 0..MODULES {
        let module = dir.path().join(format!("src/Module{n}"));
        fs::create_dir_all(&module).expect("module dir");
        fs::write(module.join("Service.php"), "<?php").expect("service file");
    }
    dir
}

fn namespace_resolver(root: &Path) -> Resolver {
    let mut resolver = Resolver::new();
    for n in 0..MODULES {
        resolver
            .add_psr4(
                &format!("App\\Module{n}\\"),
                [root.join(format!("src/Module{n}"))],
                false,
            )
            .expect("valid prefix");
    }
    resolver
}

fn bench_class_map(c: &mut Criterion) {
    let mut resolver = Resolver::new();
    resolver.add_class_map(
        (0..MODULES).map(|n| (format!("App\\Module{n}\\Service"), format!("src/Module{n}/Service.php"))),
    );

    c.bench_function("class_map_hit", |b| {
        b.iter(|| resolver.resolve(black_box("App\\Module25\\Service")))
    });
}

fn bench_prefix_walk(c: &mut Criterion) {
    let dir = build_tree();
    let mut group = c.benchmark_group("psr4_prefix");

    for n in [0, MODULES / 2, MODULES - 1] {
        let name = format!("App\\Module{n}\\Service");
        group.bench_with_input(BenchmarkId::from_parameter(n), &name, |b, name| {
            // Fresh resolver per batch so every lookup reaches the filesystem
            b.iter_batched(
                || namespace_resolver(dir.path()),
                |mut resolver| resolver.resolve(black_box(name)),
                criterion::BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_memoized_miss(c: &mut Criterion) {
    let dir = build_tree();
    let mut resolver = namespace_resolver(dir.path());
    resolver.resolve("App\\Module3\\Missing");

    c.bench_function("memoized_miss", |b| {
        b.iter(|| resolver.resolve(black_box("App\\Module3\\Missing")))
    });
}

fn bench_external_cache(c: &mut Criterion) {
    let dir = build_tree();
    let store = MemoryCache::shared();
    let mut warm = namespace_resolver(dir.path()).with_cache_store(store.clone());
    warm.set_cache_prefix(Some("bench:"));
    warm.resolve("App\\Module7\\Service");

    c.bench_function("external_cache_hit", |b| {
        b.iter_batched(
            || {
                let mut resolver = namespace_resolver(dir.path()).with_cache_store(store.clone());
                resolver.set_cache_prefix(Some("bench:"));
                resolver
            },
            |mut resolver| resolver.resolve(black_box("App\\Module7\\Service")),
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    bench_class_map,
    bench_prefix_walk,
    bench_memoized_miss,
    bench_external_cache
);
criterion_main!(benches);
