//! Exact Persistent Homology via the Standard Algorithm
//!
//! 1. Build the Vietoris-Rips filtration (simplices with birth values)
//! 2. Reduce the boundary matrix over Z/2 with left-to-right column additions
//! 3. Read persistence pairs off the pivots of the reduced matrix
//!
//! A persistence interval [b, d) represents a feature that is "born" at
//! filtration value b and "dies" at value d. Classes still alive at
//! `max_epsilon` are reported with an infinite death.
//!
//! ## Reference
//!
//! Edelsbrunner, Letscher, Zomorodian (2002). "Topological Persistence
//! and Simplification". Discrete & Computational Geometry.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use super::VietorisRips;

/// A persistence interval [birth, death)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PersistenceInterval {
    pub birth: f64,
    pub death: f64,
    pub dimension: usize,
}

impl PersistenceInterval {
    pub fn new(birth: f64, death: f64, dimension: usize) -> Self {
        Self { birth, death, dimension }
    }

    /// Lifetime of the feature
    pub fn persistence(&self) -> f64 {
        self.death - self.birth
    }

    /// Is this an essential feature (infinite persistence)?
    pub fn is_essential(&self) -> bool {
        self.death.is_infinite()
    }
}

/// Persistence diagram: collection of intervals across dimensions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistenceDiagram {
    pub intervals: Vec<PersistenceInterval>,
}

impl PersistenceDiagram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, interval: PersistenceInterval) {
        self.intervals.push(interval);
    }

    /// Get all intervals for a given dimension
    pub fn dim(&self, d: usize) -> Vec<&PersistenceInterval> {
        self.intervals.iter().filter(|i| i.dimension == d).collect()
    }

    /// Finite intervals for dimension d
    pub fn finite_intervals(&self, d: usize) -> Vec<&PersistenceInterval> {
        self.intervals
            .iter()
            .filter(|i| i.dimension == d && !i.is_essential())
            .collect()
    }
}

/// Sparse column of the boundary matrix
#[derive(Debug, Clone, Default)]
struct SparseColumn {
    rows: BTreeSet<usize>,
}

impl SparseColumn {
    fn is_zero(&self) -> bool {
        self.rows.is_empty()
    }

    /// Lowest (maximum) non-zero row index
    fn low(&self) -> Option<usize> {
        self.rows.iter().next_back().copied()
    }

    /// Toggle a single entry (addition in Z/2)
    fn toggle(&mut self, row: usize) {
        if !self.rows.remove(&row) {
            self.rows.insert(row);
        }
    }

    fn add_assign(&mut self, other: &SparseColumn) {
        for &row in &other.rows {
            self.toggle(row);
        }
    }
}

/// Compute persistent homology in degrees `0..=vr.max_dim()`
pub fn compute_persistence(vr: &VietorisRips) -> PersistenceDiagram {
    let simplices = vr.filtration();
    let max_dim = vr.max_dim();

    let index: HashMap<&[usize], usize> = simplices
        .iter()
        .enumerate()
        .map(|(idx, s)| (s.vertices.as_slice(), idx))
        .collect();

    let m = simplices.len();
    let mut columns: Vec<SparseColumn> = Vec::with_capacity(m);
    let mut low_to_col: HashMap<usize, usize> = HashMap::new();

    for (col_idx, simplex) in simplices.iter().enumerate() {
        let mut boundary = SparseColumn::default();

        if simplex.dimension() > 0 {
            let mut face = Vec::with_capacity(simplex.vertices.len() - 1);
            for skip in 0..simplex.vertices.len() {
                face.clear();
                face.extend(
                    simplex
                        .vertices
                        .iter()
                        .enumerate()
                        .filter(|&(i, _)| i != skip)
                        .map(|(_, &v)| v),
                );
                if let Some(&face_idx) = index.get(face.as_slice()) {
                    boundary.toggle(face_idx);
                }
            }
        }

        while let Some(low_idx) = boundary.low() {
            match low_to_col.get(&low_idx) {
                Some(&pivot_col) => boundary.add_assign(&columns[pivot_col]),
                None => break,
            }
        }

        if let Some(low_idx) = boundary.low() {
            low_to_col.insert(low_idx, col_idx);
        }

        columns.push(boundary);
    }

    let mut diagram = PersistenceDiagram::new();
    let mut paired = vec![false; m];

    for (col_idx, column) in columns.iter().enumerate() {
        if let Some(low_idx) = column.low() {
            paired[low_idx] = true;
            paired[col_idx] = true;

            let birth_simplex = &simplices[low_idx];
            let death_simplex = &simplices[col_idx];
            let dim = birth_simplex.dimension();

            // Zero-length pairs carry no information
            if dim <= max_dim && death_simplex.birth > birth_simplex.birth {
                diagram.add(PersistenceInterval::new(
                    birth_simplex.birth,
                    death_simplex.birth,
                    dim,
                ));
            }
        }
    }

    // Unpaired cycles survive past max_epsilon
    for (idx, simplex) in simplices.iter().enumerate() {
        if !paired[idx] && columns[idx].is_zero() && simplex.dimension() <= max_dim {
            diagram.add(PersistenceInterval::new(
                simplex.birth,
                f64::INFINITY,
                simplex.dimension(),
            ));
        }
    }

    diagram
}
