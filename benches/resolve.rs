//! Benchmarks for translation resolution and number formatting
//!
//! Run with: cargo bench --bench resolve

use agri_advisor::i18n::{
    interpolate, DictionaryStore, LanguageCode, NullSink, NumberFormatOptions, Params, Resolver,
};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use std::sync::Arc;

fn resolver() -> Resolver {
    let store = DictionaryStore::embedded().expect("embedded dictionaries parse");
    Resolver::new(Arc::new(store)).with_sink(Arc::new(NullSink))
}

// =============================================================================
// Lookup: active hit, default fallback, missing key
// =============================================================================

fn bench_resolve(c: &mut Criterion) {
    let resolver = resolver();
    let none = Params::new();
    let mut group = c.benchmark_group("resolve");

    for (case, language, key) in [
        ("active", LanguageCode::Hi, "navbar.home"),
        ("fallback", LanguageCode::Ta, "economic.note"),
        ("missing", LanguageCode::Hi, "nope.missing"),
    ] {
        group.bench_with_input(BenchmarkId::new("lookup", case), &key, |b, key| {
            b.iter(|| black_box(resolver.resolve(language, black_box(key), &none)))
        });
    }

    let params = Params::new().with("count", 12).with("name", "Sunita");
    group.bench_function("plural", |b| {
        b.iter(|| black_box(resolver.resolve_plural(LanguageCode::En, "items", 12, &params)))
    });

    group.finish();
}

// =============================================================================
// Interpolation
// =============================================================================

fn bench_interpolate(c: &mut Criterion) {
    let params = Params::new().with("name", "Ramesh").with("min", 2);
    c.bench_function("interpolate/two_tokens", |b| {
        b.iter(|| {
            black_box(interpolate(
                black_box("Welcome back, {name}! Select at least {min} crops ({unknown})"),
                &params,
            ))
        })
    });
}

// =============================================================================
// Number formatting
// =============================================================================

fn bench_format_number(c: &mut Criterion) {
    let resolver = resolver();
    let currency = NumberFormatOptions::currency("INR");
    let mut group = c.benchmark_group("format_number");

    for language in [LanguageCode::En, LanguageCode::Hi, LanguageCode::Mr] {
        group.bench_with_input(
            BenchmarkId::new("currency", language.code()),
            &language,
            |b, &language| b.iter(|| black_box(resolver.format_number(language, 1_234_567.891, &currency))),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_resolve, bench_interpolate, bench_format_number);
criterion_main!(benches);
