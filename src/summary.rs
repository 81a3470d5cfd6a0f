//! Summary statistics over benchmark results.
//!
//! Only successful results take part: a failed measurement's timings are not
//! trustworthy.

use crate::core::Algorithm;
use crate::harness::{BenchmarkMatrix, PerformanceResult};

/// Added to the elapsed seconds before dividing, so a zero-time run does not
/// divide by zero.
const THROUGHPUT_EPSILON_SECS: f64 = 1e-5;

/// Winners among a set of results.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Summary<'a> {
    pub fastest: Option<&'a PerformanceResult>,
    pub most_memory_efficient: Option<&'a PerformanceResult>,
}

/// Per-algorithm aggregate over a whole sweep.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AlgorithmTotals {
    pub algorithm: Algorithm,
    /// Sum of the successful runs' times.
    pub total_time_ms: f64,
    /// Largest peak among the successful runs.
    pub peak_memory_kb: f64,
    pub failures: usize,
}

/// Lowest time; the earliest result wins a tie.
pub fn fastest<'a, I>(results: I) -> Option<&'a PerformanceResult>
where
    I: IntoIterator<Item = &'a PerformanceResult>,
{
    results
        .into_iter()
        .filter(|r| r.success())
        .min_by(|a, b| a.time_ms().total_cmp(&b.time_ms()))
}

/// Lowest peak memory; the earliest result wins a tie.
pub fn most_memory_efficient<'a, I>(results: I) -> Option<&'a PerformanceResult>
where
    I: IntoIterator<Item = &'a PerformanceResult>,
{
    results
        .into_iter()
        .filter(|r| r.success())
        .min_by(|a, b| a.memory_kb().total_cmp(&b.memory_kb()))
}

pub fn summarize<'a, I>(results: I) -> Summary<'a>
where
    I: IntoIterator<Item = &'a PerformanceResult>,
    I::IntoIter: Clone,
{
    let results = results.into_iter();
    Summary {
        fastest: fastest(results.clone()),
        most_memory_efficient: most_memory_efficient(results),
    }
}

/// Successful results from fastest to slowest.
pub fn ranked_by_time<'a, I>(results: I) -> Vec<&'a PerformanceResult>
where
    I: IntoIterator<Item = &'a PerformanceResult>,
{
    let mut ranked: Vec<_> = results.into_iter().filter(|r| r.success()).collect();
    ranked.sort_by(|a, b| a.time_ms().total_cmp(&b.time_ms()));
    ranked
}

/// Elements sorted per second.
pub fn throughput(result: &PerformanceResult) -> f64 {
    result.data_size() as f64 / (result.time_seconds() + THROUGHPUT_EPSILON_SECS)
}

/// One [`Summary`] per measured size, in increasing size order.
pub fn summarize_sizes(matrix: &BenchmarkMatrix) -> Vec<(usize, Summary<'_>)> {
    matrix
        .sizes()
        .iter()
        .map(|&size| (size, summarize(matrix.at_size(size))))
        .collect()
}

/// Aggregates each algorithm's row, in selection order.
pub fn totals(matrix: &BenchmarkMatrix) -> Vec<AlgorithmTotals> {
    matrix
        .iter()
        .map(|(algorithm, row)| {
            let ok = || row.values().filter(|r| r.success());
            AlgorithmTotals {
                algorithm,
                total_time_ms: ok().map(|r| r.time_ms()).sum(),
                peak_memory_kb: ok().map(|r| r.memory_kb()).fold(0.0, f64::max),
                failures: row.values().filter(|r| !r.success()).count(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DataType;

    fn ok(name: &str, time_ms: f64, memory_kb: f64) -> PerformanceResult {
        PerformanceResult::succeeded(name, time_ms, memory_kb, 1000, DataType::Random)
    }

    fn err(name: &str) -> PerformanceResult {
        PerformanceResult::failed(name, 0.0, 0.0, 1000, DataType::Random, "nope".into())
    }

    #[test]
    fn failures_never_win() {
        let results = vec![ok("Quick Sort", 3.0, 40.0), err("Radix Sort"), ok("Heap Sort", 5.0, 8.0)];
        let summary = summarize(&results);
        assert_eq!(summary.fastest.unwrap().algorithm_name(), "Quick Sort");
        assert_eq!(
            summary.most_memory_efficient.unwrap().algorithm_name(),
            "Heap Sort"
        );
    }

    #[test]
    fn ties_go_to_the_first_result() {
        let results = vec![ok("Shell Sort", 2.0, 1.0), ok("Merge Sort", 2.0, 1.0)];
        assert_eq!(fastest(&results).unwrap().algorithm_name(), "Shell Sort");
        assert_eq!(
            most_memory_efficient(&results).unwrap().algorithm_name(),
            "Shell Sort"
        );
    }

    #[test]
    fn ranking_orders_by_time_and_drops_failures() {
        let results = vec![ok("A", 9.0, 0.0), err("B"), ok("C", 1.0, 0.0), ok("D", 4.0, 0.0)];
        let names: Vec<_> = ranked_by_time(&results)
            .into_iter()
            .map(|r| r.algorithm_name())
            .collect();
        assert_eq!(names, vec!["C", "D", "A"]);
    }

    #[test]
    fn empty_input_has_no_winner() {
        let results: Vec<PerformanceResult> = Vec::new();
        assert_eq!(summarize(&results), Summary::default());
    }

    #[test]
    fn throughput_is_items_per_second() {
        let r = ok("Quick Sort", 1000.0, 0.0);
        let expected = 1000.0 / (1.0 + THROUGHPUT_EPSILON_SECS);
        assert!((throughput(&r) - expected).abs() < 1e-9);
    }
}
