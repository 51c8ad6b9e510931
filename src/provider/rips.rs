//! Rips landscape provider
//!
//! Pipeline for one sample:
//!
//!   shape ──sample──▶ point cloud ──VR_ε──▶ filtration ──reduce──▶ diagram
//!         ──tents──▶ landscape at `hom_deg`

use ndarray::Array2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::LandscapeProvider;
use crate::error::{Error, Result};
use crate::landscape::{align_landscapes, average_landscapes, Grid, PersistenceLandscape};
use crate::sampling::ShapeDescriptor;
use crate::topology::{compute_persistence, VietorisRips};

/// How point clouds are turned into landscapes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LandscapeConfig {
    /// Homological degree summarised by the landscape
    pub hom_deg: usize,
    /// Rips filtration cut-off
    pub max_epsilon: f64,
    /// Grid resolution of each landscape
    pub num_steps: usize,
    /// Keep at most this many landscape functions
    pub max_depth: Option<usize>,
    /// Fixed grid start; requires `stop`
    pub start: Option<f64>,
    /// Fixed grid stop; requires `start`
    pub stop: Option<f64>,
}

impl Default for LandscapeConfig {
    fn default() -> Self {
        Self {
            hom_deg: 1,
            max_epsilon: 1.5,
            num_steps: 500,
            max_depth: None,
            start: None,
            stop: None,
        }
    }
}

impl LandscapeConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.max_epsilon.is_finite() && self.max_epsilon > 0.0) {
            return Err(Error::Config(format!(
                "max_epsilon must be positive, got {}",
                self.max_epsilon
            )));
        }
        if self.num_steps == 0 {
            return Err(Error::Config("num_steps must be at least 1".into()));
        }
        self.fixed_grid().map(|_| ())
    }

    /// Grid pinned by `start`/`stop`, if both are set
    pub fn fixed_grid(&self) -> Result<Option<Grid>> {
        match (self.start, self.stop) {
            (Some(start), Some(stop)) => Grid::new(start, stop, self.num_steps).map(Some),
            (None, None) => Ok(None),
            _ => Err(Error::Config("start and stop must be set together".into())),
        }
    }
}

/// [`LandscapeProvider`] backed by Vietoris-Rips persistence
#[derive(Debug, Clone)]
pub struct RipsLandscapeProvider {
    config: LandscapeConfig,
    grid: Option<Grid>,
}

impl RipsLandscapeProvider {
    pub fn new(config: LandscapeConfig) -> Result<Self> {
        config.validate()?;
        let grid = config.fixed_grid()?;
        Ok(Self { config, grid })
    }

    pub fn config(&self) -> &LandscapeConfig {
        &self.config
    }

    /// Landscape of an already sampled point cloud (one point per row)
    pub fn summarize_points(&self, points: &Array2<f64>) -> Result<PersistenceLandscape> {
        let vr = VietorisRips::from_points(points, self.config.max_epsilon, self.config.hom_deg);
        let diagram = compute_persistence(&vr);
        debug!(
            points = points.nrows(),
            intervals = diagram.intervals.len(),
            "computed persistence"
        );

        match self.grid {
            Some(grid) => PersistenceLandscape::from_diagram_on(
                &diagram,
                self.config.hom_deg,
                grid,
                self.config.max_depth,
            ),
            None => PersistenceLandscape::from_diagram(
                &diagram,
                self.config.hom_deg,
                self.config.num_steps,
                self.config.max_depth,
            ),
        }
    }
}

impl LandscapeProvider for RipsLandscapeProvider {
    type Landscape = PersistenceLandscape;
    type Shape = ShapeDescriptor;

    fn sample_and_summarize<R: Rng + ?Sized>(
        &self,
        shape: &ShapeDescriptor,
        num_points: usize,
        rng: &mut R,
    ) -> Result<PersistenceLandscape> {
        let points = shape.sample(num_points, rng)?;
        self.summarize_points(&points)
    }

    fn average(&self, landscapes: &[&PersistenceLandscape]) -> Result<PersistenceLandscape> {
        average_landscapes(landscapes)
    }

    fn align(&self, landscapes: &[&PersistenceLandscape]) -> Result<Vec<PersistenceLandscape>> {
        align_landscapes(landscapes)
    }

    fn difference(
        &self,
        a: &PersistenceLandscape,
        b: &PersistenceLandscape,
    ) -> Result<PersistenceLandscape> {
        a.checked_sub(b)
    }

    fn sup_norm(&self, landscape: &PersistenceLandscape) -> f64 {
        landscape.sup_norm()
    }
}
