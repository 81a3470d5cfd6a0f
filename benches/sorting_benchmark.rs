use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use sortscope::dataset::{DatasetSource, RandomDatasets};
use sortscope::prelude::*;
use std::hint::black_box;

fn bench_data_types(c: &mut Criterion) {
    let count = 10_000;
    let mut source = RandomDatasets::seeded(42);

    for data_type in DataType::ALL {
        let mut group = c.benchmark_group(format!("{data_type} (10k)"));
        group.sample_size(10);

        let input = source.generate(data_type, count);

        for algorithm in Algorithm::ALL {
            // Random data holds negatives, which Radix Sort rejects.
            if algorithm == Algorithm::Radix && data_type == DataType::Random {
                continue;
            }
            group.bench_with_input(BenchmarkId::new(algorithm.id(), count), &input, |b, input| {
                b.iter(|| sort(algorithm, black_box(input)))
            });
        }

        // Std Sort (Stable)
        group.bench_function("slice::sort (stable)", |b| {
            b.iter_batched(|| input.clone(), |mut data| data.sort(), BatchSize::SmallInput)
        });

        // Std Sort Unstable
        group.bench_function("slice::sort_unstable", |b| {
            b.iter_batched(|| input.clone(), |mut data| data.sort_unstable(), BatchSize::SmallInput)
        });

        group.finish();
    }
}

fn bench_trace_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("Trace Generation");

    let input: Vec<i64> = vec![29, 10, 14, 37, 13, 5, 41, 10, 22, 8, 33, 17];
    for algorithm in Algorithm::ALL {
        let len = algorithm.max_trace_len().min(input.len());
        let data = &input[..len];
        group.bench_function(algorithm.id(), |b| b.iter(|| generate_trace(algorithm, black_box(data))));
    }

    group.finish();
}

criterion_group!(benches, bench_data_types, bench_trace_generation);
criterion_main!(benches);
