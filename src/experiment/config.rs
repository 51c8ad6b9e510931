//! Experiment configuration, loadable from TOML.
//!
//! ```toml
//! num_runs = 100
//! num_perms = 1000
//! num_pts = 100
//! seed = 42
//!
//! [shape_a]
//! kind = "sphere"
//! dim = 2
//!
//! [shape_b]
//! kind = "sphere"
//! dim = 3
//! noise = 0.05
//!
//! [landscape]
//! hom_deg = 1
//! max_epsilon = 1.5
//! num_steps = 500
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::permutation::{binomial, DEFAULT_ENUMERATION_LIMIT};
use crate::provider::LandscapeConfig;
use crate::sampling::ShapeDescriptor;

/// Parameters of a two-shape discrimination experiment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExperimentConfig {
    /// Landscapes sampled per shape
    pub num_runs: usize,
    /// Random relabelings in the permutation test
    pub num_perms: usize,
    /// Points per sampled point cloud
    pub num_pts: usize,
    /// Master seed for sampling and relabeling
    pub seed: u64,
    pub shape_a: ShapeDescriptor,
    pub shape_b: ShapeDescriptor,
    pub landscape: LandscapeConfig,
    /// Enumerate every relabeling instead of sampling `num_perms`
    pub exact: bool,
    /// Size of the rayon pool; the global pool when unset
    pub threads: Option<usize>,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            num_runs: 100,
            num_perms: 1000,
            num_pts: 100,
            seed: 0,
            shape_a: ShapeDescriptor::sphere(2),
            shape_b: ShapeDescriptor::sphere(3),
            landscape: LandscapeConfig::default(),
            exact: false,
            threads: None,
        }
    }
}

impl ExperimentConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_runs == 0 {
            return Err(Error::Config("num_runs must be at least 1".into()));
        }
        if self.num_pts == 0 {
            return Err(Error::Config("num_pts must be at least 1".into()));
        }
        if !self.exact && self.num_perms == 0 {
            return Err(Error::Config("num_perms must be at least 1".into()));
        }
        if self.exact {
            let count = binomial(self.num_runs.saturating_mul(2), self.num_runs);
            if count > DEFAULT_ENUMERATION_LIMIT {
                return Err(Error::Config(format!(
                    "exact test over {count} relabelings exceeds the limit of {DEFAULT_ENUMERATION_LIMIT}; \
                     lower num_runs or use the randomized test"
                )));
            }
        }
        if self.threads == Some(0) {
            return Err(Error::Config("threads must be at least 1".into()));
        }
        self.shape_a.validate()?;
        self.shape_b.validate()?;
        self.landscape.validate()
    }
}
