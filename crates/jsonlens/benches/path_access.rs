#![allow(missing_docs)]
//! Path lookup and mutation benchmarks, with `serde_json` tree parsing as the
//! baseline a zero-copy accessor is supposed to beat.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use serde_json::Value as SerdeValue;

const MEDIUM: &[u8] = br#"{
  "person": {
    "name": {"first": "Leonid", "last": "Bugaev", "fullName": "Leonid Bugaev"},
    "github": {"handle": "buger", "followers": 109},
    "avatars": [
      {"url": "https://avatars1.example.com/u/14009?v=3", "type": "thumbnail"},
      {"url": "https://avatars2.example.com/u/14009?v=3", "type": "profile"}
    ]
  },
  "company": {"name": "Acme", "tags": ["json", "parser", "zero-copy"]}
}"#;

fn bench_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("get");

    group.bench_function("shallow", |b| {
        b.iter(|| {
            let v = jsonlens::get(black_box(MEDIUM), &["company", "name"]).unwrap();
            black_box(v.raw)
        });
    });

    group.bench_function("deep", |b| {
        b.iter(|| {
            let v = jsonlens::get(black_box(MEDIUM), &["person", "name", "fullName"]).unwrap();
            black_box(v.raw)
        });
    });

    group.bench_function("array_index", |b| {
        b.iter(|| {
            let v = jsonlens::get(
                black_box(MEDIUM),
                &["person", "avatars", "[1]", "type"],
            )
            .unwrap();
            black_box(v.raw)
        });
    });

    group.bench_function("serde_json_tree", |b| {
        b.iter(|| {
            let v: SerdeValue = serde_json::from_slice(black_box(MEDIUM)).unwrap();
            black_box(v["person"]["name"]["fullName"].as_str().unwrap().len())
        });
    });

    group.finish();
}

fn bench_each_key(c: &mut Criterion) {
    let mut group = c.benchmark_group("multi_path");

    let paths: &[&[&str]] = &[
        &["person", "name", "fullName"],
        &["person", "github", "followers"],
        &["company", "name"],
    ];

    group.bench_function("each_key_single_pass", |b| {
        b.iter(|| {
            let mut total = 0usize;
            let _ = jsonlens::each_key(
                black_box(MEDIUM),
                |_, res| total += res.map(|(raw, _)| raw.len()).unwrap_or(0),
                paths,
            );
            black_box(total)
        });
    });

    group.bench_function("repeated_get", |b| {
        b.iter(|| {
            let mut total = 0usize;
            for path in paths {
                total += jsonlens::get(black_box(MEDIUM), path).unwrap().raw.len();
            }
            black_box(total)
        });
    });

    group.finish();
}

fn bench_mutation(c: &mut Criterion) {
    let mut group = c.benchmark_group("mutation");

    group.bench_function("set_existing", |b| {
        b.iter(|| {
            let out =
                jsonlens::set(black_box(MEDIUM), b"110", &["person", "github", "followers"])
                    .unwrap();
            black_box(out.len())
        });
    });

    group.bench_function("set_new_nested", |b| {
        b.iter(|| {
            let out = jsonlens::set(black_box(MEDIUM), b"true", &["company", "active"]).unwrap();
            black_box(out.len())
        });
    });

    group.bench_function("delete", |b| {
        b.iter(|| {
            let out = jsonlens::delete(black_box(MEDIUM), &["person", "avatars"]);
            black_box(out.len())
        });
    });

    group.finish();
}

criterion_group!(benches, bench_get, bench_each_key, bench_mutation);
criterion_main!(benches);
