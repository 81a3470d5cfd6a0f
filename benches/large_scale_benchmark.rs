use criterion::{BatchSize, Criterion, Throughput, criterion_group, criterion_main};
use rand::Rng;
use sortscope::algo::{heap_sort, merge_sort, quick_sort, radix_sort, shell_sort};
use std::hint::black_box;
use std::time::Duration;

fn bench_100k_integers(c: &mut Criterion) {
    let mut group = c.benchmark_group("100k Integers");
    group.sample_size(10);
    group.measurement_time(Duration::from_secs(30));

    // Non-negative so Radix Sort takes part.
    let mut rng = rand::rng();
    let count = 100_000;
    let input: Vec<i64> = (0..count).map(|_| rng.random_range(0..1_000_000)).collect();

    group.throughput(Throughput::Elements(count as u64));

    group.bench_function("quick", |b| b.iter(|| quick_sort(black_box(&input))));
    group.bench_function("heap", |b| b.iter(|| heap_sort(black_box(&input))));
    group.bench_function("shell", |b| b.iter(|| shell_sort(black_box(&input))));
    group.bench_function("merge", |b| b.iter(|| merge_sort(black_box(&input))));
    group.bench_function("radix", |b| b.iter(|| radix_sort(black_box(&input))));

    // Std Sort Unstable
    group.bench_function("slice::sort_unstable", |b| {
        b.iter_batched(|| input.clone(), |mut data| data.sort_unstable(), BatchSize::LargeInput)
    });

    group.finish();
}

criterion_group!(benches, bench_100k_integers);
criterion_main!(benches);
