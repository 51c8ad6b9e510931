//! Two-shape discrimination run
//!
//! ## Protocol
//!
//! 1. Sample `num_runs` point clouds of `num_pts` points from each shape
//! 2. Summarise each cloud as a persistence landscape
//! 3. Baseline: sup norm between the two mean landscapes
//! 4. Permutation test of the pooled landscapes against the baseline

use std::fs;
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::ExperimentConfig;
use crate::error::{Error, Result};
use crate::permutation::{compute_baseline, exact_permutation_test, run_permutation_test, PermutationOutcome};
use crate::provider::{LandscapeProvider, RipsLandscapeProvider};

/// Which permutation test produced the outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestMethod {
    Randomized,
    Exact,
}

/// Everything needed to reproduce and interpret a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentReport {
    pub config: ExperimentConfig,
    pub label_a: String,
    pub label_b: String,
    /// Landscapes per group
    pub group_size: usize,
    pub method: TestMethod,
    pub outcome: PermutationOutcome,
}

impl ExperimentReport {
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }
}

/// Run the experiment described by `config`
pub fn run_experiment(config: &ExperimentConfig) -> Result<ExperimentReport> {
    config.validate()?;

    match config.threads {
        Some(threads) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|err| Error::Config(format!("thread pool: {err}")))?;
            pool.install(|| execute(config))
        }
        None => execute(config),
    }
}

/// `runs` independent landscapes of `shape`
///
/// One seed per run is drawn from `rng` up front, so the result does not
/// depend on scheduling.
pub fn sample_group<P, R>(
    provider: &P,
    shape: &P::Shape,
    runs: usize,
    num_points: usize,
    rng: &mut R,
) -> Result<Vec<P::Landscape>>
where
    P: LandscapeProvider + Sync,
    P::Shape: Sync,
    R: Rng + ?Sized,
{
    let seeds: Vec<u64> = (0..runs).map(|_| rng.next_u64()).collect();
    seeds
        .par_iter()
        .map(|&seed| {
            let mut run_rng = ChaCha8Rng::seed_from_u64(seed);
            provider.sample_and_summarize(shape, num_points, &mut run_rng)
        })
        .collect()
}

fn execute(config: &ExperimentConfig) -> Result<ExperimentReport> {
    let provider = RipsLandscapeProvider::new(config.landscape.clone())?;
    let mut rng = StdRng::seed_from_u64(config.seed);
    let label_a = config.shape_a.label();
    let label_b = config.shape_b.label();

    info!(label = %label_a, runs = config.num_runs, points = config.num_pts, "sampling group A");
    let group_a = sample_group(&provider, &config.shape_a, config.num_runs, config.num_pts, &mut rng)?;

    info!(label = %label_b, runs = config.num_runs, points = config.num_pts, "sampling group B");
    let group_b = sample_group(&provider, &config.shape_b, config.num_runs, config.num_pts, &mut rng)?;

    let baseline = compute_baseline(&provider, &group_a, &group_b)?;
    info!(baseline, "significance threshold");

    let combined: Vec<_> = group_a.into_iter().chain(group_b).collect();
    let (method, outcome) = if config.exact {
        let outcome = exact_permutation_test(&provider, &combined, config.num_runs, baseline)?;
        (TestMethod::Exact, outcome)
    } else {
        let outcome = run_permutation_test(
            &provider,
            &combined,
            config.num_runs,
            config.num_perms,
            baseline,
            &mut rng,
        )?;
        (TestMethod::Randomized, outcome)
    };

    info!(
        significant = outcome.significant_count,
        trials = outcome.num_trials,
        p_value = outcome.p_value,
        "permutation test complete"
    );

    Ok(ExperimentReport {
        config: config.clone(),
        label_a,
        label_b,
        group_size: config.num_runs,
        method,
        outcome,
    })
}
