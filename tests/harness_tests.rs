use sortscope::alloc::{self, MemoryTracker, TrackingAllocator};
use sortscope::dataset::{DatasetSource, RandomDatasets};
use sortscope::harness::{VERIFICATION_FAILED, sweep_sizes};
use sortscope::prelude::*;
use sortscope::summary;
use sortscope::{BenchmarkMatrix, Progress};
use std::sync::mpsc;
use std::sync::{Mutex, MutexGuard};

#[global_allocator]
static ALLOC: TrackingAllocator = TrackingAllocator;

// The allocation ledger is process wide; measurements in this file take turns.
static SERIAL: Mutex<()> = Mutex::new(());

fn serial() -> MutexGuard<'static, ()> {
    SERIAL.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[test]
fn test_measure_twice_is_independent() {
    let _guard = serial();
    let data = RandomDatasets::seeded(3).generate(DataType::Random, 5_000);
    let snapshot = data.clone();

    let first = measure(Algorithm::Quick, &data, DataType::Random);
    let second = measure(Algorithm::Quick, &data, DataType::Random);

    for result in [&first, &second] {
        assert!(result.success(), "{result}");
        assert_eq!(result.algorithm_name(), "Quick Sort");
        assert_eq!(result.data_size(), 5_000);
        assert_eq!(result.data_type(), DataType::Random);
        assert!(result.time_ms() >= 0.0);
        assert!(result.error_message().is_empty());
    }
    assert_eq!(data, snapshot);
}

#[test]
fn test_memory_is_attributed_to_the_sort() {
    let _guard = serial();
    let data = RandomDatasets::seeded(9).generate(DataType::ReverseSorted, 10_000);

    let merge = measure(Algorithm::Merge, &data, DataType::ReverseSorted);
    assert!(alloc::is_installed());
    assert!(merge.success());
    // Output copy plus scratch buffer, 8 bytes per element each.
    assert!(merge.memory_kb() >= 150.0, "merge used {}", merge.format_memory());
}

#[test]
fn test_radix_on_negative_data_fails_with_zeroed_metrics() {
    let _guard = serial();
    let data = vec![5, -3, 2];
    let result = measure(Algorithm::Radix, &data, DataType::Random);

    assert!(!result.success());
    assert_eq!(result.time_ms(), 0.0);
    assert_eq!(result.memory_kb(), 0.0);
    assert!(result.error_message().contains("-3"), "{}", result.error_message());
    assert!(result.to_string().starts_with("Radix Sort: ERROR - "));
}

#[test]
fn test_broken_sort_fails_verification() {
    let _guard = serial();
    let mut harness = Harness::new();
    let result = harness.measure_fn(
        "Identity",
        |d: &[i64]| Ok::<_, std::convert::Infallible>(d.to_vec()),
        &[3, 1, 2],
        DataType::Random,
    );
    assert!(!result.success());
    assert_eq!(result.error_message(), VERIFICATION_FAILED);
    assert!(!harness.tracker().is_tracking());
}

#[test]
fn test_sweep_sizes_for_5000() {
    let sizes = sweep_sizes(5_000);
    assert_eq!(sizes.len(), 5);
    assert!(sizes.windows(2).all(|w| w[0] < w[1]));
    assert!(sizes.iter().all(|&s| s >= 100));
    assert_eq!(*sizes.last().unwrap(), 5_000);
}

#[test]
fn test_sweep_on_random_data() {
    let _guard = serial();
    let algorithms = [Algorithm::Merge, Algorithm::Quick, Algorithm::Radix];
    let mut progress: Vec<Progress> = Vec::new();
    let matrix = run_sweep(&algorithms, 5_000, DataType::Random, &mut progress);

    assert_eq!(matrix.data_type(), DataType::Random);
    assert_eq!(matrix.sizes(), &[1_000, 2_000, 3_000, 4_000, 5_000]);
    assert_eq!(matrix.algorithms().collect::<Vec<_>>(), algorithms.to_vec());
    assert_eq!(matrix.len(), 15);

    for &size in matrix.sizes() {
        assert!(matrix.get(Algorithm::Merge, size).unwrap().success());
        assert!(matrix.get(Algorithm::Quick, size).unwrap().success());
        // Random data spans negative values.
        let radix = matrix.get(Algorithm::Radix, size).unwrap();
        assert!(!radix.success());
        assert_eq!(radix.time_ms(), 0.0);
        assert_eq!(radix.data_size(), size);
    }
    assert_eq!(matrix.failures(), 5);

    // One report per measurement, then completion.
    assert_eq!(progress.len(), 16);
    assert_eq!(progress[0].fraction, 0.0);
    assert_eq!(progress[0].message, "Testing Merge Sort on 1000 elements...");
    assert!(progress.windows(2).all(|w| w[0].fraction <= w[1].fraction));
    assert_eq!(progress.last().unwrap().fraction, 1.0);

    let totals = summary::totals(&matrix);
    assert_eq!(totals[2].algorithm, Algorithm::Radix);
    assert_eq!(totals[2].failures, 5);
    assert_eq!(totals[2].total_time_ms, 0.0);
}

#[test]
fn test_sweep_with_seeded_source_and_channel() {
    let _guard = serial();
    let (tx, rx) = mpsc::channel();
    let mut sink = tx;
    let mut source = RandomDatasets::seeded(11);

    let matrix: BenchmarkMatrix = Harness::new().sweep(
        &[Algorithm::Heap, Algorithm::Shell, Algorithm::Heap],
        1_000,
        DataType::PartiallySorted,
        &mut source,
        &mut sink,
    );
    drop(sink);

    // The repeated selection is measured once.
    assert_eq!(matrix.algorithms().count(), 2);
    assert_eq!(matrix.len(), 10);
    assert_eq!(matrix.failures(), 0);

    let reports: Vec<Progress> = rx.iter().collect();
    assert_eq!(reports.len(), 11);
    assert_eq!(reports.last().unwrap().message, "Sweep complete");

    for (size, winners) in summary::summarize_sizes(&matrix) {
        let fastest = winners.fastest.unwrap();
        assert_eq!(fastest.data_size(), size);
        assert!(winners.most_memory_efficient.is_some());
    }
}

#[test]
fn test_compare_on_shared_data() {
    let _guard = serial();
    let data = RandomDatasets::seeded(5).generate(DataType::ReverseSorted, 2_000);
    let mut progress: Vec<Progress> = Vec::new();
    let results = Harness::new().compare(&Algorithm::ALL, &data, DataType::ReverseSorted, &mut progress);

    assert_eq!(results.len(), 5);
    assert!(results.iter().all(|r| r.success()), "{results:?}");
    let names: Vec<&str> = results.iter().map(|r| r.algorithm_name()).collect();
    assert_eq!(
        names,
        vec!["Quick Sort", "Heap Sort", "Shell Sort", "Merge Sort", "Radix Sort"]
    );
    assert_eq!(progress.len(), 6);
    assert_eq!(progress[4].fraction, 0.8);

    let ranked = summary::ranked_by_time(&results);
    assert_eq!(ranked.len(), 5);
    assert!(ranked.windows(2).all(|w| w[0].time_ms() <= w[1].time_ms()));
    assert!(summary::throughput(ranked[0]) > 0.0);
}
