//! Mathematical utilities for shapes and sizing

/// Parametric outlines for the star and heart shapes
pub mod curves;
/// Fit-to-box scaling and smoothing kernel sizes
pub mod geometry;
