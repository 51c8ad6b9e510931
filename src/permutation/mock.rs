//! Vector-valued provider for exercising the tester without persistence.

use std::sync::atomic::{AtomicUsize, Ordering};

use rand::Rng;

use crate::error::{Error, Result};
use crate::provider::LandscapeProvider;

/// Landscapes are plain vectors; alignment zero-pads to the longest one
#[derive(Debug, Default)]
pub(crate) struct VectorProvider {
    averages: AtomicUsize,
}

impl VectorProvider {
    pub(crate) fn average_calls(&self) -> usize {
        self.averages.load(Ordering::SeqCst)
    }
}

impl LandscapeProvider for VectorProvider {
    type Landscape = Vec<f64>;
    /// Level around which samples scatter
    type Shape = f64;

    fn sample_and_summarize<R: Rng + ?Sized>(
        &self,
        level: &f64,
        num_points: usize,
        rng: &mut R,
    ) -> Result<Vec<f64>> {
        Ok((0..num_points).map(|_| level + rng.random::<f64>()).collect())
    }

    fn average(&self, landscapes: &[&Vec<f64>]) -> Result<Vec<f64>> {
        self.averages.fetch_add(1, Ordering::SeqCst);
        let aligned = self.align(landscapes)?;
        let n = aligned.len() as f64;
        let mut mean = vec![0.0; aligned[0].len()];
        for v in &aligned {
            for (m, x) in mean.iter_mut().zip(v) {
                *m += x / n;
            }
        }
        Ok(mean)
    }

    fn align(&self, landscapes: &[&Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        if landscapes.is_empty() {
            return Err(Error::EmptyGroup { group: "alignment" });
        }
        let len = landscapes.iter().map(|v| v.len()).max().unwrap_or(0);
        Ok(landscapes
            .iter()
            .map(|v| {
                let mut padded = (*v).clone();
                padded.resize(len, 0.0);
                padded
            })
            .collect())
    }

    fn difference(&self, a: &Vec<f64>, b: &Vec<f64>) -> Result<Vec<f64>> {
        if a.len() != b.len() {
            return Err(Error::GridMismatch {
                left: a.len().to_string(),
                right: b.len().to_string(),
            });
        }
        Ok(a.iter().zip(b).map(|(x, y)| x - y).collect())
    }

    fn sup_norm(&self, landscape: &Vec<f64>) -> f64 {
        landscape.iter().fold(0.0, |acc: f64, &v| {
            if acc.is_nan() || v.is_nan() {
                f64::NAN
            } else {
                acc.max(v.abs())
            }
        })
    }
}

/// Leaves landscapes on their own grids, so every `difference` fails
#[derive(Debug, Default)]
pub(crate) struct UnalignedProvider;

impl LandscapeProvider for UnalignedProvider {
    type Landscape = Vec<f64>;
    type Shape = f64;

    fn sample_and_summarize<R: Rng + ?Sized>(
        &self,
        level: &f64,
        num_points: usize,
        _rng: &mut R,
    ) -> Result<Vec<f64>> {
        Ok(vec![*level; num_points])
    }

    fn average(&self, landscapes: &[&Vec<f64>]) -> Result<Vec<f64>> {
        let first = landscapes.first().ok_or(Error::EmptyGroup { group: "average" })?;
        Ok((*first).clone())
    }

    fn align(&self, landscapes: &[&Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        Ok(landscapes.iter().map(|v| (*v).clone()).collect())
    }

    fn difference(&self, a: &Vec<f64>, b: &Vec<f64>) -> Result<Vec<f64>> {
        Err(Error::GridMismatch {
            left: format!("unaligned ({})", a.len()),
            right: format!("unaligned ({})", b.len()),
        })
    }

    fn sup_norm(&self, _landscape: &Vec<f64>) -> f64 {
        0.0
    }
}
