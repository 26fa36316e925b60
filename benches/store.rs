#![allow(unused)]
extern crate rescope;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use rescope::prelude::*;
use std::fmt::Write;
use std::hint::black_box;

const ENTRIES: usize = 512;

/// Builds an in-memory tree with a system root and one override root, plus
/// the matching generated constants.
fn build_fixture() -> (Memory, Memory, String) {
    let mut constants = String::new();
    let mut system_doc = String::from("<resources>");
    let mut app_doc = String::from("<resources>");
    for i in 0..ENTRIES {
        let _ = writeln!(constants, "int string entry_{i} 0x7f04{i:04x}");
        let _ = write!(system_doc, r#"<string name="entry_{i}">system value {i}</string>"#);
        if i % 2 == 0 {
            let _ = write!(app_doc, r#"<string name="entry_{i}">app value {i}</string>"#);
        }
    }
    system_doc.push_str("</resources>");
    app_doc.push_str("</resources>");

    let system = Memory::new();
    system.add_file("values/strings.xml", &system_doc).unwrap();
    let app = Memory::new();
    app.add_file("values/strings.xml", &app_doc).unwrap();

    (system, app, constants)
}

/// Benchmark a full load of a two-root store.
fn bench_initialize(c: &mut Criterion) {
    let (system, app, constants) = build_fixture();

    let mut group = c.benchmark_group("store_initialize");
    group.throughput(Throughput::Elements(ENTRIES as u64));
    group.bench_function("two_roots", |b| {
        b.iter(|| {
            let store = ResourceStoreBuilder::new()
                .register_text("app", &constants)
                .unwrap()
                .system_root(system.root())
                .system_package("app")
                .app_root(app.root(), "app")
                .build();
            store.initialize().unwrap();
            black_box(store)
        });
    });
    group.finish();
}

/// Benchmark typed lookups against a loaded store.
fn bench_lookup(c: &mut Criterion) {
    let (system, app, constants) = build_fixture();
    let store = ResourceStoreBuilder::new()
        .register_text("app", &constants)
        .unwrap()
        .system_root(system.root())
        .system_package("app")
        .app_root(app.root(), "app")
        .build();
    store.initialize().unwrap();

    let ids: Vec<ResourceId> = (0..ENTRIES)
        .map(|i| {
            store
                .resolve_id(&ResourceName::new(
                    "app",
                    ResourceKind::String,
                    format!("entry_{i}"),
                ))
                .unwrap()
        })
        .collect();

    let mut group = c.benchmark_group("store_lookup");
    group.throughput(Throughput::Elements(ENTRIES as u64));
    group.bench_function("string", |b| {
        b.iter(|| {
            for id in &ids {
                black_box(store.string(black_box(*id)).unwrap());
            }
        });
    });
    group.finish();
}

criterion_group!(benches, bench_initialize, bench_lookup);
criterion_main!(benches);
