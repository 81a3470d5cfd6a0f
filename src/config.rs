//! Benchmark configuration.
//!
//! The harness trusts its inputs; [`BenchmarkConfig::validate`] is where size
//! and selection errors are caught, before any measurement starts.

use crate::core::{Algorithm, DataType};
use crate::error::ConfigError;

pub const MIN_DATA_SIZE: usize = 1_000;
pub const MAX_DATA_SIZE: usize = 100_000;
pub const DEFAULT_DATA_SIZE: usize = 10_000;

/// What to benchmark.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BenchmarkConfig {
    /// Largest dataset size; a sweep measures five sizes up to it.
    pub data_size: usize,
    pub data_type: DataType,
    pub algorithms: Vec<Algorithm>,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            data_size: DEFAULT_DATA_SIZE,
            data_type: DataType::default(),
            algorithms: Algorithm::ALL.to_vec(),
        }
    }
}

impl BenchmarkConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.algorithms.is_empty() {
            return Err(ConfigError::NoAlgorithms);
        }
        if !(MIN_DATA_SIZE..=MAX_DATA_SIZE).contains(&self.data_size) {
            return Err(ConfigError::SizeOutOfRange {
                size: self.data_size,
                min: MIN_DATA_SIZE,
                max: MAX_DATA_SIZE,
            });
        }
        Ok(())
    }

    /// Builds a validated configuration from command-line style arguments.
    ///
    /// Recognised: `--size N`, `--type random|reverse|partial`,
    /// `--algorithms quick,heap,...`. Unspecified options keep their defaults.
    pub fn from_args<I, S>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut config = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_ref() {
                "--size" | "-n" => {
                    let value = args.next().ok_or(ConfigError::MissingValue("--size"))?;
                    config.data_size = parse_size(value.as_ref())?;
                }
                "--type" | "-t" => {
                    let value = args.next().ok_or(ConfigError::MissingValue("--type"))?;
                    config.data_type = value.as_ref().parse()?;
                }
                "--algorithms" | "-a" => {
                    let value = args
                        .next()
                        .ok_or(ConfigError::MissingValue("--algorithms"))?;
                    config.algorithms = parse_algorithms(value.as_ref())?;
                }
                other => return Err(ConfigError::UnknownArgument(other.to_string())),
            }
        }

        config.validate()?;
        Ok(config)
    }
}

/// Parses a size, allowing `_` and `,` as digit separators (`10_000`, `10,000`).
pub fn parse_size(value: &str) -> Result<usize, ConfigError> {
    let digits: String = value.chars().filter(|c| !matches!(c, '_' | ',')).collect();
    digits
        .parse()
        .map_err(|_| ConfigError::InvalidNumber(value.to_string()))
}

/// Parses a comma-separated algorithm list. Empty entries are skipped.
pub fn parse_algorithms(value: &str) -> Result<Vec<Algorithm>, ConfigError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse::<Algorithm>)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = BenchmarkConfig::default();
        assert_eq!(config.data_size, 10_000);
        assert_eq!(config.data_type, DataType::Random);
        assert_eq!(config.algorithms.len(), 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_empty_selection() {
        let config = BenchmarkConfig {
            algorithms: vec![],
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NoAlgorithms));
    }

    #[test]
    fn rejects_out_of_range_size() {
        let err = BenchmarkConfig::from_args(["--size", "999"]).unwrap_err();
        assert!(matches!(err, ConfigError::SizeOutOfRange { size: 999, .. }));
        assert!(BenchmarkConfig::from_args(["--size", "100001"]).is_err());
        assert!(BenchmarkConfig::from_args(["--size", "100,000"]).is_ok());
    }

    #[test]
    fn parses_all_options() {
        let config = BenchmarkConfig::from_args([
            "--size",
            "50_000",
            "--type",
            "partial",
            "--algorithms",
            "merge, radix",
        ])
        .unwrap();
        assert_eq!(config.data_size, 50_000);
        assert_eq!(config.data_type, DataType::PartiallySorted);
        assert_eq!(config.algorithms, vec![Algorithm::Merge, Algorithm::Radix]);
    }

    #[test]
    fn reports_bad_arguments() {
        assert_eq!(
            BenchmarkConfig::from_args(["--size"]),
            Err(ConfigError::MissingValue("--size"))
        );
        assert_eq!(
            BenchmarkConfig::from_args(["--algorithms", "bogo"]),
            Err(ConfigError::UnknownAlgorithm("bogo".to_string()))
        );
        assert_eq!(
            BenchmarkConfig::from_args(["--algorithms", " , "]),
            Err(ConfigError::NoAlgorithms)
        );
        assert!(matches!(
            BenchmarkConfig::from_args(["--fast"]),
            Err(ConfigError::UnknownArgument(_))
        ));
    }
}
