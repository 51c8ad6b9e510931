//! Landscape Module: Functional Summaries of Persistence Diagrams
//!
//! Persistence landscapes turn a diagram into a sequence of piecewise-linear
//! functions λ₁ ≥ λ₂ ≥ ... that live in a vector space. That makes them
//! suitable for the statistics this crate needs:
//!
//! - averaging a group of landscapes (the mean landscape)
//! - differences and the supremum norm ‖λ - μ‖∞
//! - L^p norms and inner products
//!
//! Landscapes are stored on a discretisation [`Grid`]. Two landscapes can
//! only be combined once they share a grid; [`align_landscapes`] snaps a
//! collection onto the grid covering all of them.

mod approx;
mod grid;

pub use approx::{align_landscapes, average_landscapes, PersistenceLandscape};
pub use grid::Grid;
