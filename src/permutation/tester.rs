//! Permutation Significance Tester
//!
//! Tests H₀: "both groups of landscapes come from the same distribution".
//!
//! 1. Baseline: s₀ = ‖mean(A) - mean(B)‖∞ with the true labels
//! 2. For each trial, relabel the pooled sample uniformly at random into two
//!    pseudo-groups of the original size and compute the same statistic sᵢ
//! 3. p = #{i : sᵢ ≥ s₀} / trials
//!
//! A relabeling exactly as extreme as the baseline counts as significant.
//!
//! ## Reproducibility
//!
//! Before any trial runs, one `u64` seed per trial is drawn from the
//! caller's RNG. Each trial then owns a `ChaCha8Rng` built from its seed,
//! so the outcome depends only on the caller's RNG state and not on how
//! rayon schedules the trials.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Bipartition;
use crate::error::{Error, Result};
use crate::provider::LandscapeProvider;

/// Result of a permutation test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PermutationOutcome {
    /// Observed statistic with the true labels
    pub baseline: f64,
    /// Trials whose statistic was at least the baseline
    pub significant_count: usize,
    /// Number of relabelings evaluated
    pub num_trials: usize,
    /// significant_count / num_trials
    pub p_value: f64,
    /// Statistic of every trial, in trial order
    pub null_statistics: Vec<f64>,
}

impl PermutationOutcome {
    pub(crate) fn from_statistics(baseline: f64, null_statistics: Vec<f64>) -> Self {
        let significant_count = null_statistics
            .iter()
            .filter(|&&s| is_as_extreme(s, baseline))
            .count();
        let num_trials = null_statistics.len();

        Self {
            baseline,
            significant_count,
            num_trials,
            p_value: significant_count as f64 / num_trials as f64,
            null_statistics,
        }
    }

    /// Reject H₀ at level `alpha`
    pub fn is_significant_at(&self, alpha: f64) -> bool {
        self.p_value < alpha
    }
}

/// Ties count: `>=`, not `>`
#[inline]
fn is_as_extreme(statistic: f64, baseline: f64) -> bool {
    statistic >= baseline
}

/// Sup norm of the difference between the two true-label group means
pub fn compute_baseline<P: LandscapeProvider>(
    provider: &P,
    group_a: &[P::Landscape],
    group_b: &[P::Landscape],
) -> Result<f64> {
    if group_a.is_empty() {
        return Err(Error::EmptyGroup { group: "group A" });
    }
    if group_b.is_empty() {
        return Err(Error::EmptyGroup { group: "group B" });
    }

    let a: Vec<&P::Landscape> = group_a.iter().collect();
    let b: Vec<&P::Landscape> = group_b.iter().collect();
    let baseline = discrepancy(provider, &a, &b)?;
    debug!(baseline, n_a = a.len(), n_b = b.len(), "computed baseline");
    Ok(baseline)
}

/// Statistic of a single relabeling of `combined`
pub fn trial_statistic<P: LandscapeProvider>(
    provider: &P,
    combined: &[P::Landscape],
    partition: &Bipartition,
) -> Result<f64> {
    if partition.len() != combined.len() {
        return Err(Error::InvalidPartition {
            combined: combined.len(),
            group_size: partition.group_size(),
        });
    }

    let (a, b) = partition.split(combined);
    if a.is_empty() || b.is_empty() {
        return Err(Error::EmptyGroup { group: "pseudo-group" });
    }
    discrepancy(provider, &a, &b)
}

/// Randomized permutation test over `num_trials` relabelings of `combined`
pub fn run_permutation_test<P, R>(
    provider: &P,
    combined: &[P::Landscape],
    group_size: usize,
    num_trials: usize,
    baseline: f64,
    rng: &mut R,
) -> Result<PermutationOutcome>
where
    P: LandscapeProvider + Sync,
    R: Rng + ?Sized,
{
    validate_partition(combined.len(), group_size)?;
    if num_trials < 1 {
        return Err(Error::InvalidTrialCount(num_trials));
    }
    validate_baseline(baseline)?;

    let seeds: Vec<u64> = (0..num_trials).map(|_| rng.next_u64()).collect();
    debug!(num_trials, group_size, baseline, "starting randomized permutation test");

    let statistics = seeds
        .par_iter()
        .enumerate()
        .map(|(trial, &seed)| {
            let mut trial_rng = ChaCha8Rng::seed_from_u64(seed);
            let partition = Bipartition::random(combined.len(), group_size, &mut trial_rng)?;
            checked_statistic(provider, combined, &partition, trial)
        })
        .collect::<Result<Vec<f64>>>()?;

    let outcome = PermutationOutcome::from_statistics(baseline, statistics);
    debug!(
        significant = outcome.significant_count,
        p_value = outcome.p_value,
        "permutation test finished"
    );
    Ok(outcome)
}

/// Baseline plus randomized test for two equally sized groups
pub fn permutation_test<P, R>(
    provider: &P,
    group_a: &[P::Landscape],
    group_b: &[P::Landscape],
    num_trials: usize,
    rng: &mut R,
) -> Result<PermutationOutcome>
where
    P: LandscapeProvider + Sync,
    R: Rng + ?Sized,
{
    if group_a.len() != group_b.len() {
        return Err(Error::InvalidPartition {
            combined: group_a.len() + group_b.len(),
            group_size: group_a.len(),
        });
    }
    if num_trials < 1 {
        return Err(Error::InvalidTrialCount(num_trials));
    }

    let baseline = compute_baseline(provider, group_a, group_b)?;
    let combined: Vec<P::Landscape> = group_a.iter().chain(group_b).cloned().collect();
    run_permutation_test(provider, &combined, group_a.len(), num_trials, baseline, rng)
}

pub(crate) fn validate_partition(combined: usize, group_size: usize) -> Result<()> {
    if group_size.checked_mul(2) != Some(combined) {
        return Err(Error::InvalidPartition { combined, group_size });
    }
    if group_size == 0 {
        return Err(Error::EmptyGroup { group: "pseudo-group" });
    }
    Ok(())
}

pub(crate) fn validate_baseline(baseline: f64) -> Result<()> {
    if baseline.is_finite() {
        Ok(())
    } else {
        Err(Error::InvalidBaseline(baseline))
    }
}

/// Trial statistic that must be finite; anything else aborts the run
pub(crate) fn checked_statistic<P: LandscapeProvider>(
    provider: &P,
    combined: &[P::Landscape],
    partition: &Bipartition,
    trial: usize,
) -> Result<f64> {
    let value = trial_statistic(provider, combined, partition)?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::NonFiniteStatistic { trial, value })
    }
}

fn discrepancy<P: LandscapeProvider>(
    provider: &P,
    a: &[&P::Landscape],
    b: &[&P::Landscape],
) -> Result<f64> {
    let mean_a = provider.average(a)?;
    let mean_b = provider.average(b)?;

    let aligned = provider.align(&[&mean_a, &mean_b])?;
    match aligned.as_slice() {
        [x, y] => Ok(provider.sup_norm(&provider.difference(x, y)?)),
        other => Err(Error::ProviderContract(format!(
            "align returned {} landscapes for 2 inputs",
            other.len()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permutation::mock::{UnalignedProvider, VectorProvider};
    use rand::rngs::StdRng;

    fn sample_groups() -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
        let a = vec![vec![0.0, 1.0], vec![0.2, 0.8], vec![0.1, 1.1]];
        let b = vec![vec![3.0, 1.0], vec![2.8, 1.2], vec![3.1, 0.9]];
        (a, b)
    }

    #[test]
    fn test_baseline_value() {
        let provider = VectorProvider::default();
        let (a, b) = sample_groups();
        let baseline = compute_baseline(&provider, &a, &b).unwrap();
        // means: [0.1, 0.9667] and [2.9667, 1.0333]
        assert!((baseline - 2.8666666666666667).abs() < 1e-9);
    }

    #[test]
    fn test_baseline_rejects_empty_groups() {
        let provider = VectorProvider::default();
        let (a, _) = sample_groups();

        assert!(matches!(
            compute_baseline(&provider, &a, &[]),
            Err(Error::EmptyGroup { group: "group B" })
        ));
        assert!(matches!(
            compute_baseline(&provider, &[], &a),
            Err(Error::EmptyGroup { group: "group A" })
        ));
        assert_eq!(provider.average_calls(), 0);
    }

    #[test]
    fn test_baseline_does_not_depend_on_call() {
        let provider = VectorProvider::default();
        let (a, b) = sample_groups();
        let first = compute_baseline(&provider, &a, &b).unwrap();
        let second = compute_baseline(&provider, &a, &b).unwrap();
        assert_eq!(first, second);
        assert_eq!(a, sample_groups().0);
    }

    #[test]
    fn test_validation_before_sampling() {
        let provider = VectorProvider::default();
        let (a, b) = sample_groups();
        let combined: Vec<Vec<f64>> = a.into_iter().chain(b).collect();
        let mut rng = StdRng::seed_from_u64(0);

        assert!(matches!(
            run_permutation_test(&provider, &combined, 2, 10, 1.0, &mut rng),
            Err(Error::InvalidPartition { combined: 6, group_size: 2 })
        ));
        assert!(matches!(
            run_permutation_test(&provider, &combined, 3, 0, 1.0, &mut rng),
            Err(Error::InvalidTrialCount(0))
        ));
        assert!(matches!(
            run_permutation_test(&provider, &combined, 3, 5, f64::NAN, &mut rng),
            Err(Error::InvalidBaseline(_))
        ));
        assert!(matches!(
            run_permutation_test(&provider, &[], 0, 5, 1.0, &mut rng),
            Err(Error::EmptyGroup { .. })
        ));
        assert_eq!(provider.average_calls(), 0);
    }

    #[test]
    fn test_separated_groups_are_significant() {
        let provider = VectorProvider::default();
        let (a, b) = sample_groups();
        let mut rng = StdRng::seed_from_u64(17);

        let outcome = permutation_test(&provider, &a, &b, 200, &mut rng).unwrap();
        assert_eq!(outcome.num_trials, 200);
        assert_eq!(outcome.null_statistics.len(), 200);
        // Only the true split and its mirror reach the baseline: 2 of 20
        assert!(outcome.p_value < 0.25);
        assert!(outcome.significant_count > 0);
    }

    #[test]
    fn test_zero_baseline_counts_every_trial() {
        let provider = VectorProvider::default();
        let (a, b) = sample_groups();
        let combined: Vec<Vec<f64>> = a.into_iter().chain(b).collect();
        let mut rng = StdRng::seed_from_u64(3);

        let outcome = run_permutation_test(&provider, &combined, 3, 50, 0.0, &mut rng).unwrap();
        assert_eq!(outcome.significant_count, 50);
        assert_eq!(outcome.p_value, 1.0);
    }

    #[test]
    fn test_seeded_runs_agree() {
        let provider = VectorProvider::default();
        let (a, b) = sample_groups();
        let combined: Vec<Vec<f64>> = a.into_iter().chain(b).collect();

        let first = run_permutation_test(&provider, &combined, 3, 100, 1.5, &mut StdRng::seed_from_u64(9))
            .unwrap();
        let second = run_permutation_test(&provider, &combined, 3, 100, 1.5, &mut StdRng::seed_from_u64(9))
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_tie_counts_as_significant() {
        let provider = VectorProvider::default();
        let combined = vec![vec![0.0], vec![0.0], vec![5.0], vec![5.0]];
        let true_split = Bipartition::from_group_a(4, &[0, 1]).unwrap();
        let stat = trial_statistic(&provider, &combined, &true_split).unwrap();
        assert_eq!(stat, 5.0);

        let outcome = PermutationOutcome::from_statistics(5.0, vec![stat, 0.0]);
        assert_eq!(outcome.significant_count, 1);
        assert_eq!(outcome.p_value, 0.5);
    }

    #[test]
    fn test_unequal_groups_rejected() {
        let provider = VectorProvider::default();
        let (a, b) = sample_groups();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            permutation_test(&provider, &a, &b[..2], 10, &mut rng),
            Err(Error::InvalidPartition { .. })
        ));
    }

    #[test]
    fn test_non_finite_trial_aborts() {
        let provider = VectorProvider::default();
        let combined = vec![vec![f64::NAN], vec![0.0], vec![1.0], vec![2.0]];
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            run_permutation_test(&provider, &combined, 2, 20, 1.0, &mut rng),
            Err(Error::NonFiniteStatistic { .. })
        ));
    }

    #[test]
    fn test_provider_errors_pass_through() {
        let provider = UnalignedProvider;
        let (a, b) = sample_groups();

        assert!(matches!(
            compute_baseline(&provider, &a, &b),
            Err(Error::GridMismatch { .. })
        ));

        let combined: Vec<Vec<f64>> = a.into_iter().chain(b).collect();
        let mut rng = StdRng::seed_from_u64(5);
        assert!(matches!(
            run_permutation_test(&provider, &combined, 3, 10, 1.0, &mut rng),
            Err(Error::GridMismatch { .. })
        ));
    }
}
