//! Mask construction for every supported shape kind
//!
//! Shape dispatch is a closed enum: adding a shape means adding a [`ShapeKind`]
//! variant and handling it in [`MaskBuilder::build`].

/// Mask builder dispatching on the shape kind
pub mod builder;
/// Free-hand drawing masks
pub mod drawing;
/// Shape kinds and request parameter validation
pub mod kind;
/// ONNX Runtime person-segmentation model
#[cfg(feature = "onnx")]
pub mod onnx;
/// Circle, star and heart masks
pub mod procedural;
/// Person silhouette masks from a segmentation model
pub mod silhouette;
/// Text glyph masks
pub mod text;

pub use builder::MaskBuilder;
pub use kind::ShapeKind;
pub use silhouette::{SegmentationModel, SilhouetteSegmenter};
