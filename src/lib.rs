//! Shape-constrained photo collage layout
//!
//! Builds a binary acceptance mask for a requested shape, collects images from an
//! unreliable generation service under a bounded attempt budget, and scatters photo
//! positions over a jittered grid restricted to the mask. An optional compositor turns
//! the layout into a raster image with the shape applied as alpha.

#![forbid(unsafe_code)]

/// Placement sampling and the end-to-end collage pipeline
pub mod algorithm;
/// Generation service client and the bounded retry orchestrator
pub mod generation;
/// Input/output operations, configuration and error handling
pub mod io;
/// Geometry helpers shared by mask construction and placement
pub mod math;
/// Server-side compositing of a finished layout
pub mod render;
/// Mask construction for every supported shape kind
pub mod shape;
/// Canvas, mask and grid data structures
pub mod spatial;

pub use io::error::{CollageError, Result};
