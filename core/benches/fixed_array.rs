//! Benchmarks for FixedArray vs Vec vs Box<[T]> vs SmallVec
//!
//! Run with: `cargo bench --bench fixed_array`

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use dynarray_core::FixedArray;
use smallvec::SmallVec;

fn bench_from_elem(c: &mut Criterion) {
    let mut group = c.benchmark_group("from_elem");

    for size in [4, 64, 1024] {
        group.bench_with_input(BenchmarkId::new("FixedArray", size), &size, |b, &size| {
            b.iter(|| black_box(FixedArray::from_elem(size, black_box(7u64))));
        });

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |b, &size| {
            b.iter(|| black_box(vec![black_box(7u64); size]));
        });

        group.bench_with_input(BenchmarkId::new("Box<[T]>", size), &size, |b, &size| {
            b.iter(|| black_box(vec![black_box(7u64); size].into_boxed_slice()));
        });

        group.bench_with_input(BenchmarkId::new("SmallVec<16>", size), &size, |b, &size| {
            b.iter(|| black_box(SmallVec::<[u64; 16]>::from_elem(black_box(7u64), size)));
        });
    }

    group.finish();
}

fn bench_clone(c: &mut Criterion) {
    let mut group = c.benchmark_group("clone");

    for size in [4, 64, 1024] {
        let array = FixedArray::from_fn(size, |i| i as u64);
        group.bench_with_input(BenchmarkId::new("FixedArray", size), &array, |b, array| {
            b.iter(|| black_box(array.clone()));
        });

        let vec: Vec<u64> = (0..size as u64).collect();
        group.bench_with_input(BenchmarkId::new("Vec", size), &vec, |b, vec| {
            b.iter(|| black_box(vec.clone()));
        });
    }

    group.finish();
}

fn bench_checked_access(c: &mut Criterion) {
    let mut group = c.benchmark_group("checked_access");
    let array = FixedArray::from_fn(1024, |i| i as u64);

    group.bench_function("at", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            for i in 0..1024 {
                sum += *array.at(black_box(i)).unwrap_or(&0);
            }
            black_box(sum)
        });
    });

    group.bench_function("cursor", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            let mut it = array.begin();
            while let Some(value) = it.get() {
                sum += value;
                it += 1;
            }
            black_box(sum)
        });
    });

    group.bench_function("iter", |b| {
        b.iter(|| black_box(array.iter().sum::<u64>()));
    });

    group.finish();
}

fn bench_size_of(c: &mut Criterion) {
    c.bench_function("size_of_FixedArray", |b| {
        b.iter(|| black_box(core::mem::size_of::<FixedArray<u8>>()));
    });

    c.bench_function("size_of_Vec", |b| {
        b.iter(|| black_box(core::mem::size_of::<Vec<u8>>()));
    });

    c.bench_function("size_of_SmallVec16", |b| {
        b.iter(|| black_box(core::mem::size_of::<SmallVec<[u8; 16]>>()));
    });
}

criterion_group!(
    benches,
    bench_from_elem,
    bench_clone,
    bench_checked_access,
    bench_size_of
);
criterion_main!(benches);
