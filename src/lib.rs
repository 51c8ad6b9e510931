//! # TDA-Landscape-Permutation
//!
//! Statistical Discrimination of Shapes via Persistence Landscapes
//!
//! ## Theoretical Framework
//!
//! A persistence landscape turns the persistence diagram of a point cloud
//! into a sequence of piecewise-linear functions λₖ : ℝ → ℝ. Landscapes live
//! in a vector space, so groups of them can be averaged and compared with
//! the supremum norm.
//!
//! ### Central Question
//!
//! Given n landscapes sampled from shape A and n from shape B, is the
//! distance between the two mean landscapes larger than chance would
//! produce?
//!
//! ### Methodology
//!
//! 1. **Persistent Homology**: Vietoris-Rips filtration of each sampled
//!    point cloud, reduced over Z/2 to a persistence diagram
//!
//! 2. **Landscapes**: Diagrams summarised as grid-discretised landscapes at
//!    a fixed homological degree
//!
//! 3. **Permutation Test**: Baseline s₀ = ‖λ̄_A - λ̄_B‖∞ compared with the
//!    same statistic under random relabelings of the pooled sample
//!
//! ## Key Result
//!
//!   p = #{i : sᵢ ≥ s₀} / N
//!
//! A small p-value means the two shapes are topologically distinguishable
//! at the chosen degree and sample size.
//!
//! ## References
//!
//! - Bubenik, "Statistical Topological Data Analysis using Persistence
//!   Landscapes", JMLR 16 (2015)
//! - Edelsbrunner & Harer, "Computational Topology" (2010)
//! - Good, "Permutation, Parametric and Bootstrap Tests of Hypotheses" (2005)

pub mod error;
pub mod experiment;
pub mod landscape;
pub mod permutation;
pub mod provider;
pub mod sampling;
pub mod topology;

pub use error::{Error, Result};

// Re-exports from topology
pub use topology::{
    compute_persistence,
    distance_matrix,
    PersistenceDiagram,
    PersistenceInterval,
    Simplex,
    VietorisRips,
};

// Re-exports from landscape
pub use landscape::{align_landscapes, average_landscapes, Grid, PersistenceLandscape};

// Re-exports from provider
pub use provider::{LandscapeConfig, LandscapeProvider, RipsLandscapeProvider};

// Re-exports from sampling
pub use sampling::ShapeDescriptor;

// Re-exports from permutation
pub use permutation::{
    binomial,
    compute_baseline,
    exact_permutation_test,
    exact_permutation_test_with_limit,
    permutation_test,
    run_permutation_test,
    trial_statistic,
    Bipartition,
    PermutationOutcome,
    DEFAULT_ENUMERATION_LIMIT,
};

// Re-exports from experiment
pub use experiment::{run_experiment, sample_group, ExperimentConfig, ExperimentReport, TestMethod};
