//! Server-side raster rendering of computed layouts

/// Pastes photos onto the canvas and applies the mask
pub mod assembler;

pub use assembler::CollageAssembler;
