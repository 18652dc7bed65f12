//! Basic benchmarks for the `slotted_array` crate.
#![allow(
    missing_docs,
    reason = "No need for API documentation in benchmark code"
)]

use std::hint::black_box;
use std::iter;
use std::time::Instant;

use alloc_tracker::Allocator;
use criterion::{Criterion, criterion_group, criterion_main};
use slotted_array::SlottedArray;

criterion_group!(benches, entrypoint);
criterion_main!(benches);

#[global_allocator]
static ALLOCATOR: Allocator<std::alloc::System> = Allocator::system();

type TestItem = usize;
const TEST_VALUE: TestItem = 1024;

fn entrypoint(c: &mut Criterion) {
    let allocs = alloc_tracker::Session::new();

    let mut group = c.benchmark_group("sa_basic");

    let allocs_op = allocs.operation("build_empty");
    group.bench_function("build_empty", |b| {
        b.iter_custom(|iters| {
            let _span = allocs_op.measure_thread().iterations(iters);

            let start = Instant::now();

            for _ in 0..iters {
                drop(black_box(SlottedArray::<TestItem>::new()));
            }

            start.elapsed()
        });
    });

    let allocs_op = allocs.operation("insert_one");
    group.bench_function("insert_one", |b| {
        b.iter_custom(|iters| {
            let mut arrays = iter::repeat_with(SlottedArray::<TestItem>::new)
                .take(usize::try_from(iters).unwrap())
                .collect::<Vec<_>>();

            let _span = allocs_op.measure_thread().iterations(iters);

            let start = Instant::now();

            for array in &mut arrays {
                _ = black_box(array.insert(black_box(TEST_VALUE)).unwrap());
            }

            start.elapsed()
        });
    });

    let allocs_op = allocs.operation("read_one");
    group.bench_function("read_one", |b| {
        b.iter_custom(|iters| {
            let mut array = SlottedArray::new();
            let index = array.insert(TEST_VALUE).unwrap();

            let _span = allocs_op.measure_thread().iterations(iters);

            let start = Instant::now();

            for _ in 0..iters {
                _ = black_box(array.get(black_box(index)));
            }

            start.elapsed()
        });
    });

    let allocs_op = allocs.operation("remove_one");
    group.bench_function("remove_one", |b| {
        b.iter_custom(|iters| {
            let mut arrays = iter::repeat_with(SlottedArray::new)
                .take(usize::try_from(iters).unwrap())
                .collect::<Vec<_>>();

            let indexes = arrays
                .iter_mut()
                .map(|array| array.insert(TEST_VALUE).unwrap())
                .collect::<Vec<_>>();

            let _span = allocs_op.measure_thread().iterations(iters);

            let start = Instant::now();

            for (array, index) in arrays.iter_mut().zip(indexes) {
                _ = black_box(array.remove(index).unwrap());
            }

            start.elapsed()
        });
    });

    group.finish();

    let mut group = c.benchmark_group("sa_slow");

    let allocs_op = allocs.operation("insert_10k");
    group.bench_function("insert_10k", |b| {
        b.iter_custom(|iters| {
            let mut arrays = iter::repeat_with(SlottedArray::new)
                .take(usize::try_from(iters).unwrap())
                .collect::<Vec<_>>();

            let _span = allocs_op.measure_thread().iterations(iters);

            let start = Instant::now();

            for array in &mut arrays {
                for _ in 0..10_000 {
                    _ = black_box(array.insert(black_box(TEST_VALUE)).unwrap());
                }
            }

            start.elapsed()
        });
    });

    let allocs_op = allocs.operation("compact_half_vacant_10k");
    group.bench_function("compact_half_vacant_10k", |b| {
        b.iter_custom(|iters| {
            let mut arrays = iter::repeat_with(|| {
                let mut array = SlottedArray::new();
                let indexes = (0..10_000)
                    .map(|_| array.insert(TEST_VALUE).unwrap())
                    .collect::<Vec<_>>();

                for index in indexes.iter().step_by(2) {
                    _ = array.remove(*index).unwrap();
                }

                array
            })
            .take(usize::try_from(iters).unwrap())
            .collect::<Vec<_>>();

            let _span = allocs_op.measure_thread().iterations(iters);

            let start = Instant::now();

            for array in &mut arrays {
                array.compact(true);
            }

            start.elapsed()
        });
    });

    group.finish();

    allocs.print_to_stdout();
}
