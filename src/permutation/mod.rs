//! Permutation Module: Significance of Landscape Group Differences
//!
//! Given landscapes from two labelled sources, e.g. samples of S² and S³,
//! decide whether their mean landscapes differ by more than relabeling
//! alone would explain.
//!
//! ## Statistic
//!
//!   s(A, B) = ‖ mean(A) - mean(B) ‖∞
//!
//! computed after snapping both means onto a common grid.
//!
//! ## Tests
//!
//! - [`run_permutation_test`]: Monte Carlo over random relabelings
//! - [`exact_permutation_test`]: every relabeling, for small samples

mod exact;
mod partition;
mod tester;

#[cfg(test)]
pub(crate) mod mock;

pub use exact::{
    binomial,
    exact_permutation_test,
    exact_permutation_test_with_limit,
    DEFAULT_ENUMERATION_LIMIT,
};
pub use partition::Bipartition;
pub use tester::{
    compute_baseline,
    permutation_test,
    run_permutation_test,
    trial_statistic,
    PermutationOutcome,
};
