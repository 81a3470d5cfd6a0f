//! Core identifiers shared by the engine, the trace recorder and the harness.
//!
//! This module defines:
//! - [`Algorithm`]: the closed set of supported sorting algorithms.
//! - [`AlgorithmInfo`]: static complexity and behaviour notes for each algorithm.
//! - [`DataType`]: the dataset shapes used by benchmark runs.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// One of the five supported sorting algorithms.
///
/// The declaration order is the canonical selection order used by
/// [`Algorithm::ALL`] and by the default benchmark configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Algorithm {
    Quick,
    Heap,
    Shell,
    Merge,
    Radix,
}

/// Static description of an algorithm's behaviour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AlgorithmInfo {
    pub description: &'static str,
    pub time_best: &'static str,
    pub time_average: &'static str,
    pub time_worst: &'static str,
    pub space: &'static str,
    pub stable: bool,
    pub in_place: bool,
    pub how_it_works: [&'static str; 4],
}

impl Algorithm {
    /// All algorithms in canonical order.
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Quick,
        Algorithm::Heap,
        Algorithm::Shell,
        Algorithm::Merge,
        Algorithm::Radix,
    ];

    /// Human-readable name, e.g. `"Quick Sort"`.
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Quick => "Quick Sort",
            Algorithm::Heap => "Heap Sort",
            Algorithm::Shell => "Shell Sort",
            Algorithm::Merge => "Merge Sort",
            Algorithm::Radix => "Radix Sort",
        }
    }

    /// Short identifier accepted on the command line, e.g. `"quick"`.
    pub fn id(self) -> &'static str {
        match self {
            Algorithm::Quick => "quick",
            Algorithm::Heap => "heap",
            Algorithm::Shell => "shell",
            Algorithm::Merge => "merge",
            Algorithm::Radix => "radix",
        }
    }

    /// Whether equal values keep their relative order.
    pub fn is_stable(self) -> bool {
        self.info().stable
    }

    /// Largest input a trace should be generated for.
    ///
    /// Advisory only: the recorder itself accepts any length. Heap Sort is
    /// bounded tighter because its steps are also rendered as a tree.
    pub fn max_trace_len(self) -> usize {
        match self {
            Algorithm::Heap => 10,
            _ => 15,
        }
    }

    pub fn info(self) -> &'static AlgorithmInfo {
        match self {
            Algorithm::Quick => &QUICK_INFO,
            Algorithm::Heap => &HEAP_INFO,
            Algorithm::Shell => &SHELL_INFO,
            Algorithm::Merge => &MERGE_INFO,
            Algorithm::Radix => &RADIX_INFO,
        }
    }
}

static QUICK_INFO: AlgorithmInfo = AlgorithmInfo {
    description: "Divide-and-conquer with pivot",
    time_best: "O(n log n)",
    time_average: "O(n log n)",
    time_worst: "O(n²)",
    space: "O(log n)",
    stable: false,
    in_place: true,
    how_it_works: [
        "Pick a pivot element (median of first, middle and last)",
        "Partition: smaller or equal left, larger right",
        "Recursively sort both partitions",
        "Partitions are already in place, nothing to combine",
    ],
};

static HEAP_INFO: AlgorithmInfo = AlgorithmInfo {
    description: "Binary heap based sorting",
    time_best: "O(n log n)",
    time_average: "O(n log n)",
    time_worst: "O(n log n)",
    space: "O(1)",
    stable: false,
    in_place: true,
    how_it_works: [
        "Build a max-heap from the array",
        "Move the maximum (root) to the end",
        "Shrink the heap and restore the heap property",
        "Repeat until one element remains",
    ],
};

static SHELL_INFO: AlgorithmInfo = AlgorithmInfo {
    description: "Gap-based insertion sort",
    time_best: "O(n log n)",
    time_average: "O(n^1.25)",
    time_worst: "O(n²)",
    space: "O(1)",
    stable: false,
    in_place: true,
    how_it_works: [
        "Start with the largest Knuth gap below n/3",
        "Insertion sort elements that are gap apart",
        "Divide the gap by three",
        "Finish with an ordinary insertion sort (gap 1)",
    ],
};

static MERGE_INFO: AlgorithmInfo = AlgorithmInfo {
    description: "Stable divide-and-conquer",
    time_best: "O(n log n)",
    time_average: "O(n log n)",
    time_worst: "O(n log n)",
    space: "O(n)",
    stable: true,
    in_place: false,
    how_it_works: [
        "Split the array into two halves",
        "Recursively sort each half",
        "Merge the sorted halves",
        "Take from the left half on ties",
    ],
};

static RADIX_INFO: AlgorithmInfo = AlgorithmInfo {
    description: "Non-comparison digit sort",
    time_best: "O(nk)",
    time_average: "O(nk)",
    time_worst: "O(nk)",
    space: "O(n+k)",
    stable: true,
    in_place: false,
    how_it_works: [
        "Sort by the least significant decimal digit",
        "Use a stable counting sort for each digit",
        "Move to the next digit",
        "Stop once the largest value has no digits left",
    ],
};

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = ConfigError;

    /// Accepts the short id (`"quick"`), the bare name (`"quick sort"`) or the
    /// display name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Algorithm::ALL
            .into_iter()
            .find(|a| needle == a.id() || needle == a.name().to_ascii_lowercase())
            .ok_or_else(|| ConfigError::UnknownAlgorithm(s.to_string()))
    }
}

/// Shape of a generated dataset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DataType {
    /// Uniform integers in `[-10000, 10000]`.
    #[default]
    Random,
    /// `size, size-1, ..., 1`.
    ReverseSorted,
    /// `0..size` with `size / 10` random index-pair swaps.
    PartiallySorted,
}

impl DataType {
    pub const ALL: [DataType; 3] = [
        DataType::Random,
        DataType::ReverseSorted,
        DataType::PartiallySorted,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DataType::Random => "Random",
            DataType::ReverseSorted => "Reverse Sorted",
            DataType::PartiallySorted => "Partially Sorted",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DataType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(DataType::Random),
            "reverse" | "reverse sorted" | "reverse-sorted" => Ok(DataType::ReverseSorted),
            "partial" | "partially sorted" | "partially-sorted" => Ok(DataType::PartiallySorted),
            _ => Err(ConfigError::UnknownDataType(s.to_string())),
        }
    }
}
