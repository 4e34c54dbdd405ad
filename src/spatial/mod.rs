//! Spatial data structures shared by mask construction and placement
//!
//! This module contains:
//! - The canvas coordinate space
//! - Binary acceptance masks
//! - Jittered grid anchors

/// Canvas dimensions and bounds checks
pub mod canvas;
/// Jittered grid partitioning
pub mod grid;
/// Binary acceptance mask
pub mod mask;

pub use canvas::Canvas;
pub use grid::{GridCell, GridDimensions};
pub use mask::Mask;
