//! Benchmarks for AtlasDoc storage operations

use std::sync::Arc;

use atlasdoc::{Config, Engine, SilentLogger};
use criterion::{criterion_group, criterion_main, Criterion};
use serde::{Deserialize, Serialize};
use tempfile::TempDir;

#[derive(Serialize, Deserialize)]
struct Record {
    name: String,
    age: u32,
    tags: Vec<String>,
}

fn record(i: u32) -> Record {
    Record {
        name: format!("user{}", i),
        age: i % 90,
        tags: vec!["alpha".to_string(), "beta".to_string()],
    }
}

fn open(temp_dir: &TempDir) -> Engine {
    let config = Config::builder()
        .data_dir(temp_dir.path())
        .sync_writes(false)
        .logger(Arc::new(SilentLogger))
        .build();
    Engine::open(config).unwrap()
}

fn storage_benchmarks(c: &mut Criterion) {
    let temp_dir = TempDir::new().unwrap();
    let engine = open(&temp_dir);

    let mut i = 0u32;
    c.bench_function("write_overwrite", |b| {
        b.iter(|| {
            i = i.wrapping_add(1);
            engine.write("bench", "hot", &record(i)).unwrap();
        })
    });

    engine.write("bench", "cold", &record(7)).unwrap();
    c.bench_function("read_point", |b| {
        b.iter(|| {
            let _: Record = engine.read("bench", "cold").unwrap();
        })
    });

    for n in 0..100 {
        engine.write("scan", &format!("r{:03}", n), &record(n)).unwrap();
    }
    c.bench_function("read_all_100", |b| {
        b.iter(|| {
            let all: Vec<Record> = engine.read_all("scan").unwrap();
            assert_eq!(all.len(), 100);
        })
    });
}

criterion_group!(benches, storage_benchmarks);
criterion_main!(benches);
