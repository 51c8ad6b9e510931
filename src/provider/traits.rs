//! Landscape Provider Trait: the capability the permutation tester needs
//!
//! The tester never looks inside a landscape. Everything it does goes
//! through this trait:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   LandscapeProvider Trait                    │
//! ├─────────────────────────────────────────────────────────────┤
//! │  + sample_and_summarize() - Shape + n points → landscape    │
//! │  + average()              - Mean of a group                 │
//! │  + align()                - Snap onto a common grid         │
//! │  + difference()           - Pointwise a - b (aligned only)  │
//! │  + sup_norm()             - max |λ(t)|                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only aligned landscapes may be subtracted. Enforcing that is the
//! provider's job; `difference` returns an error rather than silently
//! resampling.

use rand::Rng;

use crate::error::Result;

/// Source of landscape-like summaries and their algebra
pub trait LandscapeProvider {
    /// Summary type produced from a sampled point cloud
    type Landscape: Clone + Send + Sync;

    /// Description of the geometric object to sample from
    type Shape: ?Sized;

    /// Sample `num_points` points from `shape` and summarise them
    fn sample_and_summarize<R: Rng + ?Sized>(
        &self,
        shape: &Self::Shape,
        num_points: usize,
        rng: &mut R,
    ) -> Result<Self::Landscape>;

    /// Mean of a non-empty group of landscapes
    fn average(&self, landscapes: &[&Self::Landscape]) -> Result<Self::Landscape>;

    /// The same landscapes on a shared discretisation, in input order
    fn align(&self, landscapes: &[&Self::Landscape]) -> Result<Vec<Self::Landscape>>;

    /// Pointwise `a - b` of two aligned landscapes
    fn difference(&self, a: &Self::Landscape, b: &Self::Landscape) -> Result<Self::Landscape>;

    /// Supremum norm; non-negative for finite landscapes
    fn sup_norm(&self, landscape: &Self::Landscape) -> f64;
}
