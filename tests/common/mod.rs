#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use rand::Rng;
use tda_landscape_permutation::{Error, LandscapeProvider, Result};

/// Landscapes as plain vectors of equal length
#[derive(Debug, Default)]
pub struct VectorProvider {
    averages: AtomicUsize,
}

impl VectorProvider {
    pub fn average_calls(&self) -> usize {
        self.averages.load(Ordering::SeqCst)
    }
}

impl LandscapeProvider for VectorProvider {
    type Landscape = Vec<f64>;
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
        let first = landscapes.first().ok_or(Error::EmptyGroup { group: "average" })?;
        let n = landscapes.len() as f64;
        let mut mean = vec![0.0; first.len()];
        for v in landscapes {
            for (m, x) in mean.iter_mut().zip(v.iter()) {
                *m += x / n;
            }
        }
        Ok(mean)
    }

    fn align(&self, landscapes: &[&Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        Ok(landscapes.iter().map(|v| (*v).clone()).collect())
    }

    fn difference(&self, a: &Vec<f64>, b: &Vec<f64>) -> Result<Vec<f64>> {
        Ok(a.iter().zip(b).map(|(x, y)| x - y).collect())
    }

    fn sup_norm(&self, landscape: &Vec<f64>) -> f64 {
        landscape.iter().fold(0.0, |acc: f64, v| acc.max(v.abs()))
    }
}

/// `2 * group_size` landscapes of width `width`, the second half shifted
pub fn shifted_groups(group_size: usize, width: usize, shift: f64) -> Vec<Vec<f64>> {
    (0..2 * group_size)
        .map(|i| {
            let offset = if i < group_size { 0.0 } else { shift };
            (0..width).map(|j| offset + ((i * 7 + j * 3) % 5) as f64 * 0.1).collect()
        })
        .collect()
}
