//! Record decoding benchmarks.
//!
//! These benchmarks measure field decode cost through the store variants,
//! which dominates read paths in consumers of this crate.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ndrec::{
    ByteBuf, ByteOrder, CompositeStore, DataType, FieldDef, FixedStore, Range, RecordSchema,
    RecordStore, Shape,
};

fn bench_schema() -> Arc<RecordSchema> {
    Arc::new(
        RecordSchema::packed(vec![
            FieldDef::scalar("id", DataType::Int32),
            FieldDef::scalar("temp", DataType::Float64),
            FieldDef::scalar("pressure", DataType::Float64).with_order(ByteOrder::Little),
            FieldDef::new("wind", DataType::Float32, Shape::vector(4)),
        ])
        .unwrap(),
    )
}

fn bench_store(n: usize) -> RecordStore {
    let schema = bench_schema();
    let mut data = Vec::with_capacity(n * schema.record_size());
    for i in 0..n {
        data.extend_from_slice(&(i as i32).to_be_bytes());
        data.extend_from_slice(&(i as f64).to_be_bytes());
        data.extend_from_slice(&(1013.25f64).to_le_bytes());
        for w in 0..4 {
            data.extend_from_slice(&(w as f32).to_be_bytes());
        }
    }
    FixedStore::new(schema, Shape::vector(n), ByteBuf::new(data), ByteOrder::Big)
        .unwrap()
        .into_store()
}

fn bench_scalar_decode(c: &mut Criterion) {
    let store = bench_store(1024);
    let mut group = c.benchmark_group("scalar_decode");

    group.bench_function("int32_field", |b| {
        b.iter(|| {
            let record = store.record(black_box(512)).unwrap();
            black_box(record.get_i32("id").unwrap())
        });
    });

    group.bench_function("float64_field", |b| {
        b.iter(|| {
            let record = store.record(black_box(512)).unwrap();
            black_box(record.get_f64("temp").unwrap())
        });
    });

    group.bench_function("overridden_order_field", |b| {
        b.iter(|| {
            let record = store.record(black_box(512)).unwrap();
            black_box(record.get_f64("pressure").unwrap())
        });
    });

    group.finish();
}

fn bench_array_decode(c: &mut Criterion) {
    let store = bench_store(1024);
    c.bench_function("float32_array_field", |b| {
        b.iter(|| {
            let record = store.record(black_box(7)).unwrap();
            black_box(record.get_f32s("wind").unwrap())
        });
    });
}

fn bench_store_variants(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_scan");

    for n in [256usize, 4096] {
        let fixed = bench_store(n);
        group.bench_with_input(BenchmarkId::new("fixed", n), &fixed, |b, store| {
            b.iter(|| {
                let mut sum = 0.0;
                let mut source = store.source().unwrap();
                while let Some(record) = source.next_record().unwrap() {
                    sum += record.get_f64("temp").unwrap();
                }
                black_box(sum)
            });
        });

        let section = fixed.section(&Range::new(0, n - 1, 2).unwrap()).unwrap();
        group.bench_with_input(BenchmarkId::new("section", n), &section, |b, store| {
            b.iter(|| {
                let mut sum = 0.0;
                let mut source = store.source().unwrap();
                while let Some(record) = source.next_record().unwrap() {
                    sum += record.get_f64("temp").unwrap();
                }
                black_box(sum)
            });
        });

        let composite = CompositeStore::new(vec![bench_store(n / 2), bench_store(n / 2)])
            .unwrap()
            .into_store();
        group.bench_with_input(BenchmarkId::new("composite", n), &composite, |b, store| {
            b.iter(|| {
                let mut sum = 0.0;
                let mut source = store.source().unwrap();
                while let Some(record) = source.next_record().unwrap() {
                    sum += record.get_f64("temp").unwrap();
                }
                black_box(sum)
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_scalar_decode,
    bench_array_decode,
    bench_store_variants
);
criterion_main!(benches);
