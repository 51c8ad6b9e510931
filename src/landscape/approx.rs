//! Persistence Landscapes sampled on a grid
//!
//! For a diagram D = {(bᵢ, dᵢ)} the tent function of an interval is
//!
//!   Λᵢ(t) = max(0, min(t - bᵢ, dᵢ - t))
//!
//! and the k-th landscape function λₖ(t) is the k-th largest value of
//! {Λᵢ(t)}. Each λₖ is stored as its values on a [`Grid`]; values between
//! grid points are recovered by linear interpolation.

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Grid;
use crate::error::{Error, Result};
use crate::topology::PersistenceDiagram;

/// Grid-approximated persistence landscape at a single homological degree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLandscape")]
pub struct PersistenceLandscape {
    /// Homological degree the landscape summarises
    hom_deg: usize,
    /// Sample points shared by every λₖ
    grid: Grid,
    /// Row k holds λₖ₊₁ on the grid
    values: Array2<f64>,
}

/// Unchecked wire form, validated through [`PersistenceLandscape::new`]
#[derive(Deserialize)]
struct RawLandscape {
    hom_deg: usize,
    grid: Grid,
    values: Array2<f64>,
}

impl TryFrom<RawLandscape> for PersistenceLandscape {
    type Error = Error;

    fn try_from(raw: RawLandscape) -> Result<Self> {
        PersistenceLandscape::new(raw.hom_deg, raw.grid, raw.values)
    }
}

impl PersistenceLandscape {
    pub fn new(hom_deg: usize, grid: Grid, values: Array2<f64>) -> Result<Self> {
        if values.nrows() == 0 {
            return Err(Error::InvalidGrid("landscape needs at least one function".into()));
        }
        if values.ncols() != grid.num_steps {
            return Err(Error::InvalidGrid(format!(
                "{} columns for grid {}",
                values.ncols(),
                grid
            )));
        }
        Ok(Self { hom_deg, grid, values })
    }

    /// Identically zero landscape of depth 1
    pub fn zeros(hom_deg: usize, grid: Grid) -> Self {
        Self {
            hom_deg,
            grid,
            values: Array2::zeros((1, grid.num_steps)),
        }
    }

    /// Landscape of the finite `hom_deg` intervals of `pd`, on a grid of
    /// `num_steps` points spanning them
    pub fn from_diagram(
        pd: &PersistenceDiagram,
        hom_deg: usize,
        num_steps: usize,
        max_depth: Option<usize>,
    ) -> Result<Self> {
        let intervals = pd.finite_intervals(hom_deg);
        if intervals.is_empty() {
            debug!(hom_deg, "no finite intervals, using zero landscape");
            return Ok(Self::zeros(hom_deg, Grid::point()));
        }

        let start = intervals.iter().map(|i| i.birth).fold(f64::INFINITY, f64::min);
        let stop = intervals.iter().map(|i| i.death).fold(f64::NEG_INFINITY, f64::max);
        let grid = Grid::new(start, stop, num_steps)?;

        Self::from_diagram_on(pd, hom_deg, grid, max_depth)
    }

    /// Landscape of the finite `hom_deg` intervals of `pd` on a fixed grid
    pub fn from_diagram_on(
        pd: &PersistenceDiagram,
        hom_deg: usize,
        grid: Grid,
        max_depth: Option<usize>,
    ) -> Result<Self> {
        let intervals: Vec<(f64, f64)> = pd
            .finite_intervals(hom_deg)
            .into_iter()
            .map(|i| (i.birth, i.death))
            .collect();

        let depth = max_depth
            .map_or(intervals.len(), |d| d.min(intervals.len()))
            .max(1);
        let mut values = Array2::zeros((depth, grid.num_steps));
        let mut tents = Vec::with_capacity(intervals.len());

        for (i, t) in grid.points().enumerate() {
            tents.clear();
            tents.extend(
                intervals
                    .iter()
                    .map(|&(b, d)| tent_function(t, b, d))
                    .filter(|&v| v > 0.0),
            );
            tents.sort_by(|a, b| b.total_cmp(a));

            for (k, &v) in tents.iter().take(depth).enumerate() {
                values[[k, i]] = v;
            }
        }

        Ok(Self { hom_deg, grid, values })
    }

    pub fn hom_deg(&self) -> usize {
        self.hom_deg
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Number of landscape functions λ₁..λₖ stored
    pub fn depth(&self) -> usize {
        self.values.nrows()
    }

    /// λₖ₊₁(t), linearly interpolated; zero outside the grid
    pub fn value_at(&self, k: usize, t: f64) -> f64 {
        if k >= self.depth() || !self.grid.contains(t) {
            return 0.0;
        }

        let step = self.grid.step();
        if step == 0.0 {
            return self.values[[k, 0]];
        }

        let pos = (t - self.grid.start) / step;
        let i = (pos.floor() as usize).min(self.grid.num_steps - 2);
        let frac = pos - i as f64;
        self.values[[k, i]] * (1.0 - frac) + self.values[[k, i + 1]] * frac
    }

    /// Re-sample onto `grid` with `depth` functions (extra rows are zero)
    pub fn resample(&self, grid: &Grid, depth: usize) -> Self {
        let values = if *grid == self.grid {
            Array2::from_shape_fn((depth, grid.num_steps), |(k, i)| {
                if k < self.depth() {
                    self.values[[k, i]]
                } else {
                    0.0
                }
            })
        } else {
            Array2::from_shape_fn((depth, grid.num_steps), |(k, i)| {
                self.value_at(k, grid.at(i))
            })
        };

        Self {
            hom_deg: self.hom_deg,
            grid: *grid,
            values,
        }
    }

    /// max |λₖ(t)| over all k and grid points; NaN if any value is NaN
    pub fn sup_norm(&self) -> f64 {
        self.values.iter().fold(0.0_f64, |acc, &v| {
            if acc.is_nan() || v.is_nan() {
                f64::NAN
            } else {
                acc.max(v.abs())
            }
        })
    }

    /// (Σₖ ∫|λₖ|ᵖ)^(1/p) by the trapezoid rule; `p = ∞` gives the sup norm
    pub fn p_norm(&self, p: f64) -> f64 {
        if p.is_infinite() {
            return self.sup_norm();
        }
        if self.grid.num_steps < 2 {
            return 0.0;
        }

        let dt = self.grid.step();
        let integral: f64 = self
            .values
            .rows()
            .into_iter()
            .map(|row| {
                row.windows(2)
                    .into_iter()
                    .map(|w| dt * (w[0].abs().powf(p) + w[1].abs().powf(p)) / 2.0)
                    .sum::<f64>()
            })
            .sum();

        integral.powf(1.0 / p)
    }

    /// L² inner product Σₖ ∫ λₖ μₖ over a shared grid
    pub fn inner_product(&self, other: &PersistenceLandscape) -> Result<f64> {
        self.check_compatible(other)?;
        if self.grid.num_steps < 2 {
            return Ok(0.0);
        }

        let dt = self.grid.step();
        let depth = self.depth().min(other.depth());
        let mut product = 0.0;
        for k in 0..depth {
            let f = self.values.row(k);
            let g = other.values.row(k);
            for i in 1..self.grid.num_steps {
                product += dt * (f[i] * g[i] + f[i - 1] * g[i - 1]) / 2.0;
            }
        }
        Ok(product)
    }

    /// Pointwise sum; both landscapes must share degree and grid
    pub fn checked_add(&self, other: &PersistenceLandscape) -> Result<Self> {
        self.combine(other, |a, b| a + b)
    }

    /// Pointwise difference; both landscapes must share degree and grid
    pub fn checked_sub(&self, other: &PersistenceLandscape) -> Result<Self> {
        self.combine(other, |a, b| a - b)
    }

    pub fn scale(&self, factor: f64) -> Self {
        Self {
            hom_deg: self.hom_deg,
            grid: self.grid,
            values: self.values.mapv(|v| v * factor),
        }
    }

    fn check_compatible(&self, other: &PersistenceLandscape) -> Result<()> {
        if self.hom_deg != other.hom_deg {
            return Err(Error::DegreeMismatch {
                left: self.hom_deg,
                right: other.hom_deg,
            });
        }
        if self.grid != other.grid {
            return Err(Error::GridMismatch {
                left: self.grid.to_string(),
                right: other.grid.to_string(),
            });
        }
        Ok(())
    }

    fn combine(&self, other: &PersistenceLandscape, op: impl Fn(f64, f64) -> f64) -> Result<Self> {
        self.check_compatible(other)?;
        let depth = self.depth().max(other.depth());
        let lhs = self.resample(&self.grid, depth);
        let rhs = other.resample(&other.grid, depth);

        let mut values = lhs.values;
        values.zip_mut_with(&rhs.values, |a, &b| *a = op(*a, b));

        Ok(Self {
            hom_deg: self.hom_deg,
            grid: self.grid,
            values,
        })
    }
}

/// Put landscapes onto the grid covering all of them, padding depths
pub fn align_landscapes(landscapes: &[&PersistenceLandscape]) -> Result<Vec<PersistenceLandscape>> {
    let first = landscapes.first().ok_or(Error::EmptyGroup { group: "alignment" })?;
    if let Some(other) = landscapes.iter().find(|l| l.hom_deg != first.hom_deg) {
        return Err(Error::DegreeMismatch {
            left: first.hom_deg,
            right: other.hom_deg,
        });
    }

    let grid = Grid::covering(landscapes.iter().map(|l| &l.grid))
        .ok_or(Error::EmptyGroup { group: "alignment" })?;
    let depth = landscapes.iter().map(|l| l.depth()).max().unwrap_or(1);

    Ok(landscapes.iter().map(|l| l.resample(&grid, depth)).collect())
}

/// Pointwise mean of the aligned landscapes
pub fn average_landscapes(landscapes: &[&PersistenceLandscape]) -> Result<PersistenceLandscape> {
    let aligned = align_landscapes(landscapes)?;
    let first = &aligned[0];

    let mut sum = Array2::<f64>::zeros(first.values.raw_dim());
    for landscape in &aligned {
        sum += &landscape.values;
    }
    let n = aligned.len() as f64;

    Ok(PersistenceLandscape {
        hom_deg: first.hom_deg,
        grid: first.grid,
        values: sum.mapv(|v| v / n),
    })
}

/// Tent function for persistence interval
fn tent_function(t: f64, birth: f64, death: f64) -> f64 {
    if t < birth || t > death {
        0.0
    } else {
        (t - birth).min(death - t)
    }
}
