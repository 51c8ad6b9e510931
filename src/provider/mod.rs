//! Provider Module: where landscapes come from and how they combine
//!
//! [`LandscapeProvider`] is the seam between the permutation tester and
//! any concrete summary. [`RipsLandscapeProvider`] is the implementation
//! used by the sphere experiments.

mod rips;
mod traits;

pub use rips::{LandscapeConfig, RipsLandscapeProvider};
pub use traits::LandscapeProvider;
