//! Error types.
//!
//! - [`SortError`]: raised by a sort routine or trace generator on input it
//!   cannot handle.
//! - [`ConfigError`]: raised while building a [`BenchmarkConfig`](crate::config::BenchmarkConfig),
//!   before any sort runs.

use thiserror::Error;

/// Errors raised by the sorting engine and the trace recorder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SortError {
    /// Radix Sort only orders non-negative integers.
    #[error("radix sort requires non-negative integers, found {value} at index {index}")]
    NegativeInput { index: usize, value: i64 },
}

/// Errors raised while validating benchmark settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("no algorithms selected")]
    NoAlgorithms,

    #[error("data size {size} is outside the supported range {min}..={max}")]
    SizeOutOfRange { size: usize, min: usize, max: usize },

    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    #[error("unknown data type: {0}")]
    UnknownDataType(String),

    #[error("invalid number: {0}")]
    InvalidNumber(String),

    #[error("missing value for {0}")]
    MissingValue(&'static str),

    #[error("unknown argument: {0}")]
    UnknownArgument(String),
}
