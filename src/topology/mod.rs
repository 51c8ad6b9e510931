//! Topology Module: Rips Filtrations and Persistent Homology
//!
//! Backs the landscape provider with the structures it needs:
//! - Euclidean distance matrices of sampled point clouds
//! - Vietoris-Rips filtration by clique expansion
//! - Exact persistence pairs via boundary matrix reduction over Z/2
//!
//! ## Mathematical Background
//!
//! For a point cloud X we build the filtration of simplicial complexes
//! VR_ε(X) indexed by the scale parameter ε and track the birth and death
//! of connected components, loops and voids across it.

mod persistence;
mod vietoris_rips;

pub use persistence::{compute_persistence, PersistenceDiagram, PersistenceInterval};
pub use vietoris_rips::{distance_matrix, Simplex, VietorisRips};
