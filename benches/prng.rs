use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use prngkey::kernels::{philox4x32_10, threefry2x32};
use prngkey::prelude::*;
use std::hint::black_box;

fn bench_hash(c: &mut Criterion) {
    let mut group = c.benchmark_group("hash");
    group.bench_function("threefry2x32", |b| {
        b.iter(|| threefry2x32(black_box([0x1319_8a2e, 0x0370_7344]), black_box([1, 2])))
    });
    group.bench_function("philox4x32_10", |b| {
        b.iter(|| philox4x32_10(black_box([1, 2, 3, 4]), black_box([5, 6])))
    });
    group.finish();
}

fn bench_random_bits(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_bits");
    for name in ["threefry2x32", "rbg", "unsafe_rbg"] {
        let k = key_with_impl(0, Some(name)).unwrap();
        for len in [1 << 10, 1 << 16, 1 << 20] {
            group.throughput(Throughput::Bytes(len as u64 * 4));
            group.bench_with_input(BenchmarkId::new(name, len), &len, |b, &len| {
                b.iter(|| random_bits(&k, 32, &[len]).unwrap())
            });
        }
    }
    group.finish();
}

fn bench_split(c: &mut Criterion) {
    let mut group = c.benchmark_group("split");
    for name in ["threefry2x32", "rbg", "unsafe_rbg"] {
        let k = key_with_impl(0, Some(name)).unwrap();
        group.bench_function(BenchmarkId::new(name, 2), |b| {
            b.iter(|| split(black_box(&k), 2).unwrap())
        });

        let batch = split(&k, 4096).unwrap();
        group.bench_function(BenchmarkId::new(format!("{name}/batched"), 4096), |b| {
            b.iter(|| split(black_box(&batch), 2).unwrap())
        });
    }
    group.finish();
}

fn bench_shard(c: &mut Criterion) {
    let k = key_with_impl(0, Some("threefry2x32")).unwrap();
    c.bench_function("random_bits_shard/1024x1024/quarter", |b| {
        b.iter(|| random_bits_shard(&k, 32, &[1024, 1024], &[512..1024, 512..1024]).unwrap())
    });
}

criterion_group!(benches, bench_hash, bench_random_bits, bench_split, bench_shard);
criterion_main!(benches);
