//! Discretisation grids for approximate landscapes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// `num_steps` evenly spaced sample points covering `[start, stop]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct Grid {
    pub start: f64,
    pub stop: f64,
    pub num_steps: usize,
}

/// Unchecked wire form, validated through [`Grid::new`]
#[derive(Deserialize)]
struct RawGrid {
    start: f64,
    stop: f64,
    num_steps: usize,
}

impl TryFrom<RawGrid> for Grid {
    type Error = Error;

    fn try_from(raw: RawGrid) -> Result<Self> {
        Grid::new(raw.start, raw.stop, raw.num_steps)
    }
}

impl Grid {
    pub fn new(start: f64, stop: f64, num_steps: usize) -> Result<Self> {
        if !start.is_finite() || !stop.is_finite() {
            return Err(Error::InvalidGrid(format!(
                "bounds must be finite, got [{start}, {stop}]"
            )));
        }
        if start > stop {
            return Err(Error::InvalidGrid(format!(
                "start {start} exceeds stop {stop}"
            )));
        }
        if num_steps == 0 {
            return Err(Error::InvalidGrid("num_steps must be at least 1".into()));
        }
        Ok(Self { start, stop, num_steps })
    }

    /// Single-point grid at the origin, used for empty diagrams
    pub fn point() -> Self {
        Self {
            start: 0.0,
            stop: 0.0,
            num_steps: 1,
        }
    }

    /// Spacing between consecutive sample points
    pub fn step(&self) -> f64 {
        if self.num_steps <= 1 {
            0.0
        } else {
            (self.stop - self.start) / (self.num_steps - 1) as f64
        }
    }

    /// The i-th sample point
    pub fn at(&self, i: usize) -> f64 {
        if i + 1 >= self.num_steps {
            // Land exactly on `stop` instead of accumulating rounding error
            if self.num_steps == 1 {
                self.start
            } else {
                self.stop
            }
        } else {
            self.start + i as f64 * self.step()
        }
    }

    pub fn points(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.num_steps).map(move |i| self.at(i))
    }

    pub fn contains(&self, t: f64) -> bool {
        t >= self.start && t <= self.stop
    }

    /// Smallest grid covering every input grid at the finest resolution
    /// among them: min start, max stop, max num_steps.
    pub fn covering<'a>(grids: impl IntoIterator<Item = &'a Grid>) -> Option<Grid> {
        grids.into_iter().copied().reduce(|acc, g| Grid {
            start: acc.start.min(g.start),
            stop: acc.stop.max(g.stop),
            num_steps: acc.num_steps.max(g.num_steps),
        })
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}] x {}", self.start, self.stop, self.num_steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_hit_endpoints() {
        let grid = Grid::new(0.0, 1.0, 11).unwrap();
        let pts: Vec<f64> = grid.points().collect();
        assert_eq!(pts.len(), 11);
        assert_eq!(pts[0], 0.0);
        assert_eq!(pts[10], 1.0);
        assert!((pts[3] - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_bad_bounds() {
        assert!(matches!(Grid::new(1.0, 0.0, 5), Err(Error::InvalidGrid(_))));
        assert!(matches!(Grid::new(0.0, f64::NAN, 5), Err(Error::InvalidGrid(_))));
        assert!(matches!(Grid::new(0.0, 1.0, 0), Err(Error::InvalidGrid(_))));
    }

    #[test]
    fn test_covering() {
        let a = Grid::new(0.0, 1.0, 10).unwrap();
        let b = Grid::new(0.5, 2.0, 20).unwrap();
        let c = Grid::covering([&a, &b]).unwrap();
        assert_eq!(c, Grid::new(0.0, 2.0, 20).unwrap());
        assert!(Grid::covering(std::iter::empty::<&Grid>()).is_none());
    }

    #[test]
    fn test_deserialize_validates() {
        let grid: Grid = serde_json::from_str(r#"{"start":0.0,"stop":2.0,"num_steps":5}"#).unwrap();
        assert_eq!(grid, Grid::new(0.0, 2.0, 5).unwrap());

        assert!(serde_json::from_str::<Grid>(r#"{"start":2.0,"stop":0.0,"num_steps":5}"#).is_err());
        assert!(serde_json::from_str::<Grid>(r#"{"start":0.0,"stop":2.0,"num_steps":0}"#).is_err());
    }
}
