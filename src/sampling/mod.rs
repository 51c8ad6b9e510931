//! Sampling Module: Synthetic Point Clouds
//!
//! Randomness is always passed in by the caller, so every sample is
//! reproducible from a seed.

mod shapes;

pub use shapes::ShapeDescriptor;
