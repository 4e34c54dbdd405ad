//! Error types for collage construction
//!
//! Every fatal outcome of a request maps to one variant with a stable kind and a
//! human-readable message. Partial generation success is not an error and never
//! appears here.

use std::path::PathBuf;

/// Main error type for all collage operations
#[derive(Debug, thiserror::Error)]
pub enum CollageError {
    /// Reference photo, drawing or segmentation input could not be decoded
    #[error("Failed to decode {input}: {source}")]
    InputDecode {
        /// Which caller input was malformed
        input: &'static str,
        /// Underlying image decoding error
        source: image::ImageError,
    },

    /// A shape kind was requested without one of its required parameters
    #[error("Shape '{shape}' requires {parameter}")]
    InvalidShapeParams {
        /// Name of the requested shape kind
        shape: &'static str,
        /// Name of the missing parameter
        parameter: &'static str,
    },

    /// The attempt budget was spent without a single usable image
    #[error("No images were generated after {attempts} attempts")]
    GenerationExhausted {
        /// Number of service calls made
        attempts: usize,
    },

    /// Every jittered anchor fell outside the mask
    ///
    /// Relax the shape or use a denser grid.
    #[error(
        "No grid cell accepted an anchor (grid {}x{}); relax the shape or use a denser grid",
        .grid_dimensions.0,
        .grid_dimensions.1
    )]
    NoCandidateCells {
        /// Grid dimensions (columns, rows) that were sampled
        grid_dimensions: (u32, u32),
    },

    /// Placement was requested without a target photo
    #[error("No target image was supplied")]
    MissingTarget,

    /// The renderer could not fit the target photo inside the mask
    #[error("Target image could not be placed inside the mask after {attempts} attempts")]
    TargetPlacement {
        /// Number of tile positions tried
        attempts: usize,
    },

    /// Parameter validation failed
    #[error("Invalid parameter '{parameter}' = '{value}': {reason}")]
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Source data produced by a collaborator is unusable
    #[error("Invalid source data: {reason}")]
    InvalidSourceData {
        /// Description of what's wrong with the data
        reason: String,
    },

    /// Failed to encode or save an image
    #[error("Failed to export image to '{}': {source}", .path.display())]
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    #[error("File system error during {operation} on '{}': {source}", .path.display())]
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Result payload could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CollageError {
    /// Stable machine-readable kind for callers that map errors to responses
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::InputDecode { .. } => "input_decode",
            Self::InvalidShapeParams { .. } => "invalid_shape_params",
            Self::GenerationExhausted { .. } => "generation_exhausted",
            Self::NoCandidateCells { .. } => "no_candidate_cells",
            Self::MissingTarget => "missing_target",
            Self::TargetPlacement { .. } => "target_placement",
            Self::InvalidParameter { .. } => "invalid_parameter",
            Self::InvalidSourceData { .. } => "invalid_source_data",
            Self::ImageExport { .. } => "image_export",
            Self::FileSystem { .. } => "file_system",
            Self::Serialization(_) => "serialization",
        }
    }

    /// Whether the error is the caller's fault rather than an internal failure
    pub const fn is_caller_error(&self) -> bool {
        matches!(
            self,
            Self::InputDecode { .. }
                | Self::InvalidShapeParams { .. }
                | Self::NoCandidateCells { .. }
                | Self::MissingTarget
                | Self::InvalidParameter { .. }
        )
    }
}

/// Convenience type alias for collage results
pub type Result<T> = std::result::Result<T, CollageError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> CollageError {
    CollageError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a missing shape parameter error
pub const fn invalid_shape_params(shape: &'static str, parameter: &'static str) -> CollageError {
    CollageError::InvalidShapeParams { shape, parameter }
}

/// Create a decode error for the named caller input
pub fn decode_error(input: &'static str, source: image::ImageError) -> CollageError {
    CollageError::InputDecode { input, source }
}

/// Create a file system error for the given path and operation
pub fn file_system(
    path: impl Into<PathBuf>,
    operation: &'static str,
    source: std::io::Error,
) -> CollageError {
    CollageError::FileSystem {
        path: path.into(),
        operation,
        source,
    }
}
