//! # Sortscope
//!
//! `sortscope` is an instrumented sorting engine for teaching and comparing
//! five classic algorithms on integer arrays: **Quick Sort**, **Heap Sort**,
//! **Shell Sort**, **Merge Sort** and **LSD Radix Sort**.
//!
//! ## Key Features
//!
//! - **Sorting engine**: [`sort`] returns a sorted copy and never touches the
//!   caller's array. Quick Sort picks its pivot by median of three, Shell Sort
//!   uses Knuth's gaps, Merge and Radix are stable.
//! - **Step traces**: [`generate_trace`] replays an algorithm on a small array
//!   and records every comparison, exchange, pivot, gap, merge placement and
//!   digit pass as a highlighted [`Step`]. The resulting [`Trace`] is fully
//!   materialised and can be replayed any number of times.
//! - **Benchmarks**: the [`harness`] measures wall time and peak heap usage of
//!   each run, verifies the output and sweeps algorithms across five sizes
//!   into a [`BenchmarkMatrix`]. [`summary`] picks the winners.
//!
//! ## Usage
//!
//! ### Sorting
//!
//! ```rust
//! use sortscope::{Algorithm, sort};
//!
//! let data = vec![170, 45, 75, 90, 802, 24, 2, 66];
//! let sorted = sort(Algorithm::Radix, &data).unwrap();
//!
//! assert_eq!(sorted, vec![2, 24, 45, 66, 75, 90, 170, 802]);
//! assert_eq!(data[0], 170); // input untouched
//! ```
//!
//! ### Replaying a trace
//!
//! ```rust
//! use sortscope::{Algorithm, generate_trace};
//!
//! let trace = generate_trace(Algorithm::Quick, &[5, 3, 8, 1]).unwrap();
//! let mut player = trace.player();
//! while let Some(step) = player.step_forward() {
//!     println!("{:?}  {}", step.array(), step.description());
//! }
//! assert_eq!(trace.output(), &[1, 3, 5, 8]);
//! ```
//!
//! ### Benchmarking
//!
//! Peak memory is read from [`alloc::TrackingAllocator`], which the final
//! binary installs as its global allocator:
//!
//! ```rust,ignore
//! #[global_allocator]
//! static ALLOC: sortscope::alloc::TrackingAllocator = sortscope::alloc::TrackingAllocator;
//!
//! let matrix = sortscope::run_sweep(&sortscope::Algorithm::ALL, 10_000, sortscope::DataType::Random, &mut ());
//! ```
//!
//! ## Limitations
//!
//! Radix Sort only accepts non-negative integers and returns
//! [`SortError::NegativeInput`] otherwise; benchmark runs record that as a
//! failed measurement.

pub mod algo;
pub mod alloc;
pub mod config;
pub mod core;
pub mod dataset;
pub mod error;
pub mod harness;
pub mod summary;
pub mod trace;

pub use algo::sort;
pub use config::BenchmarkConfig;
pub use core::{Algorithm, AlgorithmInfo, DataType};
pub use error::{ConfigError, SortError};
pub use harness::{BenchmarkMatrix, Harness, PerformanceResult, Progress, ProgressSink, measure, run_comparison, run_sweep};
pub use trace::{HighlightRole, Step, Trace, TracePlayer, generate_trace};

pub mod prelude {
    pub use crate::algo::sort;
    pub use crate::core::{Algorithm, DataType};
    pub use crate::dataset::{DatasetSource, RandomDatasets};
    pub use crate::error::SortError;
    pub use crate::harness::{Harness, ProgressSink, measure, run_comparison, run_sweep};
    pub use crate::trace::{HighlightRole, generate_trace};
}
