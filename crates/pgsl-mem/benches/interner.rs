//! String interning benchmarks.
//!
//! Covers first-time interning, repeated interning of known names and
//! symbol resolution.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use pgsl_mem::StringInterner;

fn bench_intern_new(c: &mut Criterion) {
    let mut group = c.benchmark_group("intern_new");

    for size in [10, 100, 1_000, 10_000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let names: Vec<String> = (0..size).map(|i| format!("uniform_{i}")).collect();

            b.iter(|| {
                let mut interner = StringInterner::new();
                for name in &names {
                    black_box(interner.intern(name));
                }
            });
        });
    }

    group.finish();
}

fn bench_intern_known(c: &mut Criterion) {
    let mut group = c.benchmark_group("intern_known");

    for size in [10, 100, 1_000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let names: Vec<String> = (0..size).map(|i| format!("local_{i}")).collect();
            let mut interner = StringInterner::new();
            for name in &names {
                interner.intern(name);
            }

            b.iter(|| {
                for name in &names {
                    black_box(interner.intern(name));
                }
            });
        });
    }

    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let mut interner = StringInterner::new();
    let symbols: Vec<_> = (0..1_000).map(|i| interner.intern(&format!("v{i}"))).collect();

    c.bench_function("resolve_1000", |b| {
        b.iter(|| {
            for sym in &symbols {
                black_box(interner.resolve(*sym));
            }
        });
    });
}

criterion_group!(benches, bench_intern_new, bench_intern_known, bench_resolve);
criterion_main!(benches);
