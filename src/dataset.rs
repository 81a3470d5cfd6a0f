//! Benchmark input generation.
//!
//! The harness only depends on the [`DatasetSource`] trait; [`RandomDatasets`]
//! is the stock implementation driven by a [`rand`] generator.

use crate::core::DataType;
use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

/// Inclusive bounds of [`DataType::Random`] values.
pub const RANDOM_MIN: i64 = -10_000;
pub const RANDOM_MAX: i64 = 10_000;

/// Produces arrays of a requested shape and size.
pub trait DatasetSource {
    fn generate(&mut self, data_type: DataType, size: usize) -> Vec<i64>;
}

/// [`DatasetSource`] backed by a random number generator.
#[derive(Debug, Clone)]
pub struct RandomDatasets<R> {
    rng: R,
}

impl<R: Rng> RandomDatasets<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomDatasets<StdRng> {
    /// Deterministic datasets for reproducible runs and tests.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl RandomDatasets<ThreadRng> {
    pub fn thread_local() -> Self {
        Self::new(rand::rng())
    }
}

impl<R: Rng> DatasetSource for RandomDatasets<R> {
    fn generate(&mut self, data_type: DataType, size: usize) -> Vec<i64> {
        match data_type {
            DataType::Random => random(&mut self.rng, size),
            DataType::ReverseSorted => reverse_sorted(size),
            DataType::PartiallySorted => partially_sorted(&mut self.rng, size),
        }
    }
}

/// `size` uniform integers in `[RANDOM_MIN, RANDOM_MAX]`.
pub fn random<R: Rng>(rng: &mut R, size: usize) -> Vec<i64> {
    (0..size)
        .map(|_| rng.random_range(RANDOM_MIN..=RANDOM_MAX))
        .collect()
}

/// `size, size - 1, ..., 1`.
pub fn reverse_sorted(size: usize) -> Vec<i64> {
    (1..=size as i64).rev().collect()
}

/// `0..size` with `size / 10` random index-pair swaps.
///
/// A swap may pick the same index twice, which leaves the array unchanged.
pub fn partially_sorted<R: Rng>(rng: &mut R, size: usize) -> Vec<i64> {
    let mut data: Vec<i64> = (0..size as i64).collect();
    if size == 0 {
        return data;
    }
    for _ in 0..size / 10 {
        let i = rng.random_range(0..size);
        let j = rng.random_range(0..size);
        data.swap(i, j);
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_values_stay_in_range() {
        let data = RandomDatasets::seeded(7).generate(DataType::Random, 5_000);
        assert_eq!(data.len(), 5_000);
        assert!(data.iter().all(|v| (RANDOM_MIN..=RANDOM_MAX).contains(v)));
    }

    #[test]
    fn reverse_sorted_is_strictly_descending() {
        assert_eq!(reverse_sorted(5), vec![5, 4, 3, 2, 1]);
        assert!(reverse_sorted(0).is_empty());
    }

    #[test]
    fn partially_sorted_is_a_permutation() {
        let mut data = RandomDatasets::seeded(3).generate(DataType::PartiallySorted, 1_000);
        data.sort_unstable();
        assert_eq!(data, (0..1_000).collect::<Vec<i64>>());
    }

    #[test]
    fn seeded_sources_repeat() {
        let a = RandomDatasets::seeded(11).generate(DataType::Random, 100);
        let b = RandomDatasets::seeded(11).generate(DataType::Random, 100);
        assert_eq!(a, b);
    }
}
