//! Benchmark harness: timing, peak memory and multi-size sweeps.
//!
//! - [`Harness::measure`] isolates one run of one algorithm on a private copy
//!   of the data and returns a [`PerformanceResult`].
//! - [`Harness::compare`] measures several algorithms on the same array.
//! - [`Harness::sweep`] measures several algorithms across five increasing
//!   sizes and collects a [`BenchmarkMatrix`].
//!
//! Measurements never run concurrently: the peak-memory ledger is process
//! wide, so interleaving would mix allocations from different runs.
//! A failing measurement is recorded in its result and never aborts a sweep.

use crate::algo::{self, is_sorted};
use crate::alloc::{AllocTracker, MemoryTracker};
use crate::core::{Algorithm, DataType};
use crate::dataset::{DatasetSource, RandomDatasets};
use log::{debug, info, warn};
use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{Sender, SyncSender};
use std::time::Instant;

/// Message recorded when a sort returns an unsorted array.
pub const VERIFICATION_FAILED: &str = "Sorting verification failed";

/// Number of size points in a sweep.
pub const SWEEP_POINTS: usize = 5;

/// Smallest size a sweep will measure.
pub const MIN_SWEEP_SIZE: usize = 100;

/// Outcome of one (algorithm, dataset) measurement.
///
/// When `success` is `false` the timing fields are only meaningful for a
/// verification failure; execution failures report zero.
#[derive(Clone, Debug, PartialEq)]
pub struct PerformanceResult {
    algorithm_name: String,
    time_ms: f64,
    memory_kb: f64,
    data_size: usize,
    data_type: DataType,
    success: bool,
    error_message: String,
}

impl PerformanceResult {
    pub(crate) fn succeeded(name: &str, time_ms: f64, memory_kb: f64, data_size: usize, data_type: DataType) -> Self {
        Self {
            algorithm_name: name.to_string(),
            time_ms,
            memory_kb,
            data_size,
            data_type,
            success: true,
            error_message: String::new(),
        }
    }

    pub(crate) fn failed(
        name: &str,
        time_ms: f64,
        memory_kb: f64,
        data_size: usize,
        data_type: DataType,
        message: String,
    ) -> Self {
        Self {
            algorithm_name: name.to_string(),
            time_ms,
            memory_kb,
            data_size,
            data_type,
            success: false,
            error_message: message,
        }
    }

    pub fn algorithm_name(&self) -> &str {
        &self.algorithm_name
    }

    pub fn time_ms(&self) -> f64 {
        self.time_ms
    }

    pub fn memory_kb(&self) -> f64 {
        self.memory_kb
    }

    pub fn data_size(&self) -> usize {
        self.data_size
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    pub fn success(&self) -> bool {
        self.success
    }

    /// Empty on success.
    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    pub fn time_seconds(&self) -> f64 {
        self.time_ms / 1000.0
    }

    pub fn memory_mb(&self) -> f64 {
        self.memory_kb / 1024.0
    }

    /// `"12.34ms"`, or `"1.23s"` from one second up.
    pub fn format_time(&self) -> String {
        if self.time_ms >= 1000.0 {
            format!("{:.2}s", self.time_seconds())
        } else {
            format!("{:.2}ms", self.time_ms)
        }
    }

    /// `"12.34 KB"`, or `"1.23 MB"` from one megabyte up.
    pub fn format_memory(&self) -> String {
        if self.memory_kb >= 1024.0 {
            format!("{:.2} MB", self.memory_mb())
        } else {
            format!("{:.2} KB", self.memory_kb)
        }
    }
}

impl fmt::Display for PerformanceResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.success {
            write!(
                f,
                "{}: {}, {}",
                self.algorithm_name,
                self.format_time(),
                self.format_memory()
            )
        } else {
            write!(f, "{}: ERROR - {}", self.algorithm_name, self.error_message)
        }
    }
}

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

/// A progress notification.
#[derive(Clone, Debug, PartialEq)]
pub struct Progress {
    pub message: String,
    /// Completed share of the work, in `[0, 1]`.
    pub fraction: f64,
}

/// Receiver of progress notifications.
///
/// Reports are fire-and-forget: a sink that can no longer deliver (for
/// example a channel whose receiver hung up) drops them silently.
pub trait ProgressSink {
    fn report(&mut self, progress: Progress);
}

/// Discards every report.
impl ProgressSink for () {
    fn report(&mut self, _progress: Progress) {}
}

/// Collects every report in order.
impl ProgressSink for Vec<Progress> {
    fn report(&mut self, progress: Progress) {
        self.push(progress);
    }
}

impl ProgressSink for Sender<Progress> {
    fn report(&mut self, progress: Progress) {
        let _ = self.send(progress);
    }
}

impl ProgressSink for SyncSender<Progress> {
    fn report(&mut self, progress: Progress) {
        let _ = self.send(progress);
    }
}

impl<S: ProgressSink + ?Sized> ProgressSink for &mut S {
    fn report(&mut self, progress: Progress) {
        (**self).report(progress);
    }
}

fn notify<S: ProgressSink + ?Sized>(sink: &mut S, message: String, fraction: f64) {
    sink.report(Progress {
        message,
        fraction: fraction.clamp(0.0, 1.0),
    });
}

// ---------------------------------------------------------------------------
// Benchmark matrix
// ---------------------------------------------------------------------------

/// Results of a sweep: `algorithm -> size -> result`.
///
/// Algorithms iterate in selection order, sizes in increasing order.
#[derive(Clone, Debug, PartialEq)]
pub struct BenchmarkMatrix {
    data_type: DataType,
    sizes: Vec<usize>,
    rows: Vec<(Algorithm, BTreeMap<usize, PerformanceResult>)>,
}

impl BenchmarkMatrix {
    pub(crate) fn new(data_type: DataType, algorithms: &[Algorithm], sizes: Vec<usize>) -> Self {
        Self {
            data_type,
            sizes,
            rows: algorithms.iter().map(|&a| (a, BTreeMap::new())).collect(),
        }
    }

    pub(crate) fn insert(&mut self, algorithm: Algorithm, size: usize, result: PerformanceResult) {
        match self.rows.iter().position(|(a, _)| *a == algorithm) {
            Some(i) => {
                self.rows[i].1.insert(size, result);
            }
            None => {
                let mut row = BTreeMap::new();
                row.insert(size, result);
                self.rows.push((algorithm, row));
            }
        }
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    /// The measured sizes, increasing.
    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    pub fn algorithms(&self) -> impl Iterator<Item = Algorithm> + '_ {
        self.rows.iter().map(|(a, _)| *a)
    }

    pub fn row(&self, algorithm: Algorithm) -> Option<&BTreeMap<usize, PerformanceResult>> {
        self.rows.iter().find(|(a, _)| *a == algorithm).map(|(_, row)| row)
    }

    pub fn get(&self, algorithm: Algorithm, size: usize) -> Option<&PerformanceResult> {
        self.row(algorithm).and_then(|row| row.get(&size))
    }

    /// Every algorithm's result at `size`, in selection order.
    pub fn at_size(&self, size: usize) -> Vec<&PerformanceResult> {
        self.rows.iter().filter_map(|(_, row)| row.get(&size)).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Algorithm, &BTreeMap<usize, PerformanceResult>)> {
        self.rows.iter().map(|(a, row)| (*a, row))
    }

    /// Total number of results.
    pub fn len(&self) -> usize {
        self.rows.iter().map(|(_, row)| row.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of results with `success == false`.
    pub fn failures(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|(_, row)| row.values())
            .filter(|r| !r.success())
            .count()
    }
}

/// The five sizes measured by a sweep up to `max_size`.
///
/// `round(max_size * k / 5)` for `k = 1..=5`, each raised to at least
/// [`MIN_SWEEP_SIZE`]. Repeated sizes (only possible below 252) are collapsed.
///
/// # Examples
///
/// ```
/// use sortscope::harness::sweep_sizes;
///
/// assert_eq!(sweep_sizes(5000), vec![1000, 2000, 3000, 4000, 5000]);
/// assert_eq!(sweep_sizes(300), vec![100, 120, 180, 240, 300]);
/// ```
pub fn sweep_sizes(max_size: usize) -> Vec<usize> {
    let mut sizes: Vec<usize> = (1..=SWEEP_POINTS)
        .map(|k| (2 * max_size * k + SWEEP_POINTS) / (2 * SWEEP_POINTS))
        .map(|size| size.max(MIN_SWEEP_SIZE))
        .collect();
    sizes.dedup();
    sizes
}

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

/// Runs measurements through a [`MemoryTracker`].
#[derive(Debug, Default)]
pub struct Harness<M = AllocTracker> {
    tracker: M,
}

impl Harness<AllocTracker> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<M: MemoryTracker> Harness<M> {
    pub fn with_tracker(tracker: M) -> Self {
        Self { tracker }
    }

    pub fn tracker(&self) -> &M {
        &self.tracker
    }

    /// Measures one of the engine's algorithms on a private copy of `data`.
    pub fn measure(&mut self, algorithm: Algorithm, data: &[i64], data_type: DataType) -> PerformanceResult {
        self.measure_fn(algorithm.name(), |input| algo::sort(algorithm, input), data, data_type)
    }

    /// Measures an arbitrary sort routine.
    ///
    /// The routine receives a copy of `data`, so `data` can be reused for the
    /// next measurement. Time and peak memory cover the routine call only.
    ///
    /// - Returned array not sorted, or not a permutation of `data`: a
    ///   failed result with [`VERIFICATION_FAILED`], timings kept.
    /// - Routine returned an error or panicked: a failed result with the
    ///   error text and zeroed timings. The memory window is closed first.
    pub fn measure_fn<F, E>(&mut self, name: &str, sort_fn: F, data: &[i64], data_type: DataType) -> PerformanceResult
    where
        F: FnOnce(&[i64]) -> Result<Vec<i64>, E>,
        E: fmt::Display,
    {
        let input = data.to_vec();
        let size = input.len();

        self.tracker.start();
        let started = Instant::now();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| sort_fn(&input)));
        let elapsed = started.elapsed();
        let peak = self.tracker.stop();

        let result = match outcome {
            Ok(Ok(sorted)) => {
                let time_ms = elapsed.as_secs_f64() * 1000.0;
                let memory_kb = peak as f64 / 1024.0;
                if is_sorted(&sorted) && is_permutation_of(&sorted, data) {
                    PerformanceResult::succeeded(name, time_ms, memory_kb, size, data_type)
                } else {
                    warn!("{name}: output failed verification on {size} {data_type} elements");
                    PerformanceResult::failed(
                        name,
                        time_ms,
                        memory_kb,
                        size,
                        data_type,
                        VERIFICATION_FAILED.to_string(),
                    )
                }
            }
            Ok(Err(err)) => {
                warn!("{name}: failed on {size} {data_type} elements: {err}");
                PerformanceResult::failed(name, 0.0, 0.0, size, data_type, err.to_string())
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                warn!("{name}: panicked on {size} {data_type} elements: {message}");
                PerformanceResult::failed(name, 0.0, 0.0, size, data_type, message)
            }
        };

        debug!("{result} ({size} {data_type} elements)");
        result
    }

    /// Measures each algorithm once on the same `data`, in selection order.
    pub fn compare<S>(
        &mut self,
        algorithms: &[Algorithm],
        data: &[i64],
        data_type: DataType,
        sink: &mut S,
    ) -> Vec<PerformanceResult>
    where
        S: ProgressSink + ?Sized,
    {
        let total = algorithms.len();
        let results: Vec<PerformanceResult> = algorithms
            .iter()
            .enumerate()
            .map(|(i, &algorithm)| {
                notify(sink, format!("Testing {algorithm}..."), i as f64 / total as f64);
                self.measure(algorithm, data, data_type)
            })
            .collect();
        notify(sink, "Comparison complete".to_string(), 1.0);
        results
    }

    /// Measures every algorithm at each of [`sweep_sizes`]`(max_size)`.
    ///
    /// `max_size` is not validated here: below 252 the lower points collapse
    /// onto [`MIN_SWEEP_SIZE`] and fewer than five sizes are measured.
    ///
    /// One dataset is generated per size and every algorithm sorts its own
    /// copy of it. Sizes are visited in increasing order and, within a size,
    /// algorithms in selection order (repeated selections are measured once).
    /// `sink` hears about each measurement before it starts, then once more
    /// with a fraction of `1.0`.
    pub fn sweep<D, S>(
        &mut self,
        algorithms: &[Algorithm],
        max_size: usize,
        data_type: DataType,
        source: &mut D,
        sink: &mut S,
    ) -> BenchmarkMatrix
    where
        D: DatasetSource + ?Sized,
        S: ProgressSink + ?Sized,
    {
        let mut selected: Vec<Algorithm> = Vec::with_capacity(algorithms.len());
        for &algorithm in algorithms {
            if !selected.contains(&algorithm) {
                selected.push(algorithm);
            }
        }

        let sizes = sweep_sizes(max_size);
        info!(
            "sweep: {} algorithm(s) over sizes {:?} of {} data",
            selected.len(),
            sizes,
            data_type
        );

        let mut matrix = BenchmarkMatrix::new(data_type, &selected, sizes.clone());
        let total = selected.len() * sizes.len();
        let mut done = 0;

        for &size in &sizes {
            let data = source.generate(data_type, size);
            for &algorithm in &selected {
                notify(
                    sink,
                    format!("Testing {algorithm} on {size} elements..."),
                    done as f64 / total as f64,
                );
                let result = self.measure(algorithm, &data, data_type);
                matrix.insert(algorithm, size, result);
                done += 1;
            }
        }

        notify(sink, "Sweep complete".to_string(), 1.0);
        info!(
            "sweep finished: {} result(s), {} failure(s)",
            matrix.len(),
            matrix.failures()
        );
        matrix
    }
}

/// Measures `algorithm` on `data` with a fresh [`AllocTracker`].
pub fn measure(algorithm: Algorithm, data: &[i64], data_type: DataType) -> PerformanceResult {
    Harness::new().measure(algorithm, data, data_type)
}

/// Measures each of `algorithms` once on `data` with a fresh [`AllocTracker`].
pub fn run_comparison<S>(algorithms: &[Algorithm], data: &[i64], data_type: DataType, sink: &mut S) -> Vec<PerformanceResult>
where
    S: ProgressSink + ?Sized,
{
    Harness::new().compare(algorithms, data, data_type, sink)
}

/// Sweeps `algorithms` up to `max_size` on thread-local random datasets.
///
/// The core does not validate `max_size`. Five sizes are measured from 252
/// up, which [`BenchmarkConfig::validate`](crate::config::BenchmarkConfig::validate)
/// guarantees; smaller maxima yield fewer, deduplicated sizes (see
/// [`sweep_sizes`]).
pub fn run_sweep<S>(algorithms: &[Algorithm], max_size: usize, data_type: DataType, sink: &mut S) -> BenchmarkMatrix
where
    S: ProgressSink + ?Sized,
{
    let mut source = RandomDatasets::thread_local();
    Harness::new().sweep(algorithms, max_size, data_type, &mut source, sink)
}

fn is_permutation_of(sorted: &[i64], original: &[i64]) -> bool {
    if sorted.len() != original.len() {
        return false;
    }
    let mut expected = original.to_vec();
    expected.sort_unstable();
    expected == sorted
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "sort routine panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reports a fixed peak and counts windows.
    #[derive(Default)]
    struct FixedTracker {
        open: bool,
        windows: usize,
    }

    impl MemoryTracker for FixedTracker {
        fn start(&mut self) {
            self.open = true;
        }

        fn stop(&mut self) -> u64 {
            self.open = false;
            self.windows += 1;
            2048
        }

        fn is_tracking(&self) -> bool {
            self.open
        }
    }

    #[test]
    fn verification_failure_keeps_metrics() {
        let mut harness = Harness::with_tracker(FixedTracker::default());
        let result = harness.measure_fn(
            "Broken",
            |d: &[i64]| Ok::<_, String>(d.iter().rev().copied().collect()),
            &[1, 2, 3],
            DataType::Random,
        );
        assert!(!result.success());
        assert_eq!(result.error_message(), VERIFICATION_FAILED);
        assert_eq!(result.memory_kb(), 2.0);
    }

    #[test]
    fn dropped_element_fails_verification() {
        let mut harness = Harness::with_tracker(FixedTracker::default());
        let result = harness.measure_fn(
            "Lossy",
            |d: &[i64]| Ok::<_, String>(d[1..].to_vec()),
            &[1, 2, 3],
            DataType::Random,
        );
        assert_eq!(result.error_message(), VERIFICATION_FAILED);
    }

    #[test]
    fn panic_is_an_execution_failure() {
        let mut harness = Harness::with_tracker(FixedTracker::default());
        let result = harness.measure_fn(
            "Panicky",
            |_: &[i64]| -> Result<Vec<i64>, String> { panic!("boom") },
            &[3, 1],
            DataType::Random,
        );
        assert!(!result.success());
        assert_eq!(result.error_message(), "boom");
        assert_eq!(result.time_ms(), 0.0);
        assert_eq!(result.memory_kb(), 0.0);
        assert!(!harness.tracker().is_tracking());
        assert_eq!(harness.tracker().windows, 1);
    }

    #[test]
    fn formats_units() {
        let fast = PerformanceResult::succeeded("Quick Sort", 12.345, 512.0, 10, DataType::Random);
        assert_eq!(fast.format_time(), "12.35ms");
        assert_eq!(fast.format_memory(), "512.00 KB");
        assert_eq!(fast.to_string(), "Quick Sort: 12.35ms, 512.00 KB");

        let slow = PerformanceResult::succeeded("Heap Sort", 1500.0, 2048.0, 10, DataType::Random);
        assert_eq!(slow.format_time(), "1.50s");
        assert_eq!(slow.format_memory(), "2.00 MB");

        let failed = PerformanceResult::failed("Radix Sort", 0.0, 0.0, 10, DataType::Random, "bad".into());
        assert_eq!(failed.to_string(), "Radix Sort: ERROR - bad");
    }

    #[test]
    fn sweep_sizes_floor_small_maxima() {
        assert_eq!(sweep_sizes(100), vec![100]);
        assert_eq!(sweep_sizes(251), vec![100, 151, 201, 251]);
        assert_eq!(sweep_sizes(252).len(), SWEEP_POINTS);
        assert_eq!(sweep_sizes(1001), vec![200, 400, 601, 801, 1001]);
    }
}
