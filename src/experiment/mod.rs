//! Shape Discrimination Experiments
//!
//! Ties the pieces together: sample landscapes from two shapes, measure how
//! far apart their means are, and ask how often a random relabeling of the
//! pooled landscapes does at least as well.

mod config;
mod runner;

pub use config::ExperimentConfig;
pub use runner::{run_experiment, sample_group, ExperimentReport, TestMethod};
