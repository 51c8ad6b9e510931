//! Sphere Discrimination via Persistence Landscapes
//!
//! Samples landscapes from two shapes (by default the 2-sphere and the
//! 3-sphere), computes the sup-norm distance between the group means and
//! runs a permutation test against it.
//!
//! ```text
//! sphere_permutation --runs 50 --perms 500 --points 60 --seed 7
//! sphere_permutation --config experiment.toml --json report.json
//! RUST_LOG=debug sphere_permutation --runs 5 --exact
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tda_landscape_permutation::{run_experiment, ExperimentConfig, ExperimentReport};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sphere_permutation")]
#[command(version)]
#[command(about = "Permutation test for the difference between two groups of persistence landscapes", long_about = None)]
struct Args {
    /// TOML experiment file; flags below override its values
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Master seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Landscapes sampled per shape
    #[arg(short, long)]
    runs: Option<usize>,

    /// Random relabelings
    #[arg(short, long)]
    perms: Option<usize>,

    /// Points per point cloud
    #[arg(long)]
    points: Option<usize>,

    /// Homological degree of the landscapes
    #[arg(long)]
    hom_deg: Option<usize>,

    /// Enumerate every relabeling
    #[arg(long)]
    exact: bool,

    /// Worker threads
    #[arg(short, long)]
    threads: Option<usize>,

    /// Write the full report as JSON
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,
}

impl Args {
    fn into_config(self) -> Result<(ExperimentConfig, Option<PathBuf>)> {
        let mut config = match &self.config {
            Some(path) => ExperimentConfig::from_path(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => ExperimentConfig::default(),
        };

        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(runs) = self.runs {
            config.num_runs = runs;
        }
        if let Some(perms) = self.perms {
            config.num_perms = perms;
        }
        if let Some(points) = self.points {
            config.num_pts = points;
        }
        if let Some(hom_deg) = self.hom_deg {
            config.landscape.hom_deg = hom_deg;
        }
        if self.exact {
            config.exact = true;
        }
        if self.threads.is_some() {
            config.threads = self.threads;
        }

        config.validate().context("invalid experiment configuration")?;
        Ok((config, self.json))
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
}

fn print_report(report: &ExperimentReport) {
    let config = &report.config;
    let outcome = &report.outcome;

    println!("\n══════════════════════════════════════════════════════════════");
    println!("  Results");
    println!("══════════════════════════════════════════════════════════════\n");

    println!("  Group A: {} ({} landscapes)", report.label_a, report.group_size);
    println!("  Group B: {} ({} landscapes)", report.label_b, report.group_size);
    println!("  H{} landscapes, {} points per cloud", config.landscape.hom_deg, config.num_pts);
    println!();
    println!("  Baseline ‖λ̄_A - λ̄_B‖∞ = {:.6}", outcome.baseline);
    println!("  Method: {:?}", report.method);
    println!(
        "  Significant relabelings: {} / {}",
        outcome.significant_count, outcome.num_trials
    );
    println!("  p-value = {:.4}", outcome.p_value);
    println!();

    for alpha in [0.05, 0.01] {
        let verdict = if outcome.is_significant_at(alpha) {
            "distinguishable"
        } else {
            "not distinguishable"
        };
        println!("  α = {:.2}: {}", alpha, verdict);
    }
}

fn main() -> Result<()> {
    init_tracing();
    let (config, json_path) = Args::parse().into_config()?;

    println!("═══════════════════════════════════════════════════════════════");
    println!("  Persistence Landscape Permutation Test");
    println!("  {} vs {}", config.shape_a.label(), config.shape_b.label());
    println!("═══════════════════════════════════════════════════════════════\n");

    println!("Parameters:");
    println!("  runs per shape = {}", config.num_runs);
    if config.exact {
        println!("  relabelings    = all");
    } else {
        println!("  relabelings    = {}", config.num_perms);
    }
    println!("  points         = {}", config.num_pts);
    println!("  max_ε          = {:.2}", config.landscape.max_epsilon);
    println!("  seed           = {}", config.seed);

    let report = run_experiment(&config).context("experiment failed")?;
    print_report(&report);

    if let Some(path) = json_path {
        report
            .write_json(&path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("\n  Report written to {}", path.display());
    }

    Ok(())
}
