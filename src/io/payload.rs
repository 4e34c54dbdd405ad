//! Request and result payloads exchanged with the caller
//!
//! Result types serialize with the keys the browser client reads
//! (`w`, `h`, `rotate`, `img_path`); the descriptive field names are accepted as
//! aliases when reading a stored result back.

use serde::{Deserialize, Serialize};

/// One collage request as produced by the transport layer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollageRequest {
    /// Requested shape name
    pub shape: String,
    /// Encoded target photo, also the reference for generation
    pub reference_image: Vec<u8>,
    /// Text for the text shape
    pub text_input: Option<String>,
    /// Encoded photo to segment for the silhouette shape
    pub custom_mask: Option<Vec<u8>>,
    /// Encoded drawing for the draw shape
    pub drawn_shape: Option<Vec<u8>>,
}

impl CollageRequest {
    /// Create a request for a shape and reference photo
    pub fn new(shape: impl Into<String>, reference_image: Vec<u8>) -> Self {
        Self {
            shape: shape.into(),
            reference_image,
            ..Self::default()
        }
    }

    /// Attach the text for the text shape
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text_input = Some(text.into());
        self
    }

    /// Attach the photo to segment for the silhouette shape
    #[must_use]
    pub fn with_custom_mask(mut self, bytes: Vec<u8>) -> Self {
        self.custom_mask = Some(bytes);
        self
    }

    /// Attach the drawing for the draw shape
    #[must_use]
    pub fn with_drawn_shape(mut self, bytes: Vec<u8>) -> Self {
        self.drawn_shape = Some(bytes);
        self
    }
}

/// On-canvas bounding box and rotation of one photo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementRecord {
    /// Left edge in canvas pixels (may be negative near the border)
    pub x: i64,
    /// Top edge in canvas pixels (may be negative near the border)
    pub y: i64,
    /// Width in pixels
    #[serde(rename = "w", alias = "width")]
    pub width: u32,
    /// Height in pixels
    #[serde(rename = "h", alias = "height")]
    pub height: u32,
    /// Rotation in whole degrees within `[0, 360)`
    #[serde(rename = "rotate", alias = "rotation_degrees")]
    pub rotation_degrees: u32,
}

impl PlacementRecord {
    /// Center of the bounding box
    pub const fn center(&self) -> (i64, i64) {
        (
            self.x + self.width as i64 / 2,
            self.y + self.height as i64 / 2,
        )
    }
}

/// Location of one photo referenced by a layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageReference {
    /// Path or URL resolved by the asset store
    #[serde(rename = "img_path", alias = "path")]
    pub path: String,
    /// Whether this is the target photo
    pub is_target: bool,
}

/// Layout handed to persistence and rendering
///
/// Built once per request and never mutated afterwards. The position list may be
/// longer than the image list; renderers reconcile the two.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollageResult {
    image_info: Vec<PlacementRecord>,
    images: Vec<ImageReference>,
}

impl CollageResult {
    /// Assemble a result from positions and image references
    pub fn new(image_info: Vec<PlacementRecord>, images: Vec<ImageReference>) -> Self {
        Self { image_info, images }
    }

    /// Positions in the order they were produced
    pub fn placements(&self) -> &[PlacementRecord] {
        &self.image_info
    }

    /// Image references, target first
    pub fn images(&self) -> &[ImageReference] {
        &self.images
    }

    /// The target photo's reference
    pub fn target(&self) -> Option<&ImageReference> {
        self.images.iter().find(|image| image.is_target)
    }

    /// References to generated photos, in generation order
    pub fn generated(&self) -> impl Iterator<Item = &ImageReference> {
        self.images.iter().filter(|image| !image.is_target)
    }

    /// Serialize as the JSON result payload
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
