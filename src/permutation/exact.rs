//! Exact permutation test: every relabeling instead of a random sample.
//!
//! For 2n landscapes there are C(2n, n) ways to choose pseudo-group A.
//! Enumerating them in lexicographic order gives the exact permutation
//! p-value with no Monte Carlo error. Each unordered split is visited
//! twice (once as A, once as B), which leaves the p-value unchanged.

use itertools::Itertools;
use rayon::prelude::*;
use tracing::debug;

use super::tester::{checked_statistic, validate_baseline, validate_partition, PermutationOutcome};
use super::Bipartition;
use crate::error::{Error, Result};
use crate::provider::LandscapeProvider;

/// Refuse enumerations larger than this unless asked explicitly
pub const DEFAULT_ENUMERATION_LIMIT: u128 = 1 << 20;

/// Subsets held in memory at once during enumeration
const ENUMERATION_CHUNK: usize = 4096;

/// C(n, k), saturating at `u128::MAX`
pub fn binomial(n: usize, k: usize) -> u128 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut acc: u128 = 1;
    for i in 0..k {
        acc = match acc.checked_mul((n - i) as u128) {
            Some(v) => v / (i as u128 + 1),
            None => return u128::MAX,
        };
    }
    acc
}

/// Exact test with [`DEFAULT_ENUMERATION_LIMIT`]
pub fn exact_permutation_test<P>(
    provider: &P,
    combined: &[P::Landscape],
    group_size: usize,
    baseline: f64,
) -> Result<PermutationOutcome>
where
    P: LandscapeProvider + Sync,
{
    exact_permutation_test_with_limit(provider, combined, group_size, baseline, DEFAULT_ENUMERATION_LIMIT)
}

/// Exact test over all C(2n, n) choices of pseudo-group A
pub fn exact_permutation_test_with_limit<P>(
    provider: &P,
    combined: &[P::Landscape],
    group_size: usize,
    baseline: f64,
    limit: u128,
) -> Result<PermutationOutcome>
where
    P: LandscapeProvider + Sync,
{
    validate_partition(combined.len(), group_size)?;
    validate_baseline(baseline)?;

    let count = binomial(combined.len(), group_size);
    if count > limit {
        return Err(Error::EnumerationTooLarge { count, limit });
    }
    debug!(count = %count, group_size, baseline, "enumerating all relabelings");

    // Subsets are materialised one chunk at a time; statistics keep
    // lexicographic subset order
    let mut statistics = Vec::with_capacity(usize::try_from(count).unwrap_or(0));
    let subsets = (0..combined.len()).combinations(group_size);
    for (chunk_idx, chunk) in (&subsets.chunks(ENUMERATION_CHUNK)).into_iter().enumerate() {
        let offset = chunk_idx * ENUMERATION_CHUNK;
        let chunk: Vec<Vec<usize>> = chunk.collect();
        let chunk_statistics = chunk
            .par_iter()
            .enumerate()
            .map(|(i, group_a)| {
                let partition = Bipartition::from_group_a(combined.len(), group_a)?;
                checked_statistic(provider, combined, &partition, offset + i)
            })
            .collect::<Result<Vec<f64>>>()?;
        statistics.extend(chunk_statistics);
    }

    Ok(PermutationOutcome::from_statistics(baseline, statistics))
}
