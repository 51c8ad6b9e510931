//! Error types shared by the tester, the landscape provider and the
//! experiment runner.

use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Averaging was requested over zero landscapes.
    #[error("cannot average an empty group of landscapes ({group})")]
    EmptyGroup { group: &'static str },

    /// The combined sample does not split into two groups of `group_size`.
    #[error("combined sample has {combined} landscapes, expected 2 * {group_size}")]
    InvalidPartition { combined: usize, group_size: usize },

    /// Fewer than one permutation trial was requested.
    #[error("number of permutation trials must be at least 1, got {0}")]
    InvalidTrialCount(usize),

    /// Exhaustive enumeration would visit more bipartitions than allowed.
    #[error("exact test would enumerate {count} bipartitions (limit {limit})")]
    EnumerationTooLarge { count: u128, limit: u128 },

    /// The significance threshold is NaN or infinite.
    #[error("baseline statistic must be finite, got {0}")]
    InvalidBaseline(f64),

    /// A trial produced a NaN or infinite statistic.
    #[error("trial {trial} produced a non-finite statistic ({value})")]
    NonFiniteStatistic { trial: usize, value: f64 },

    /// Two landscapes were combined without first being aligned.
    #[error("landscape grids differ: {left} vs {right}")]
    GridMismatch { left: String, right: String },

    /// Landscapes of different homological degree were combined.
    #[error("homological degrees differ: H{left} vs H{right}")]
    DegreeMismatch { left: usize, right: usize },

    /// A provider broke its own contract (e.g. `align` changed the count).
    #[error("landscape provider contract violated: {0}")]
    ProviderContract(String),

    /// Grid bounds or resolution are unusable.
    #[error("invalid grid: {0}")]
    InvalidGrid(String),

    /// Shape parameters are unusable for sampling.
    #[error("invalid shape: {0}")]
    InvalidShape(String),

    /// Experiment configuration is inconsistent.
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
