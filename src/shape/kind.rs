//! Shape kinds and their required parameters

use crate::io::error::{Result, invalid_shape_params};
use crate::io::payload::CollageRequest;
use tracing::warn;

/// Requested collage outline together with the parameters it needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeKind {
    /// Whole canvas, no constraint
    Rectangle,
    /// Ellipse inscribed in the canvas with a margin
    Circle,
    /// Five-pointed star
    Star,
    /// Parametric heart
    Heart,
    /// Glyphs of the given text
    Text(String),
    /// Person silhouette segmented from an encoded reference photo
    Silhouette(Vec<u8>),
    /// Encoded free-hand drawing whose ink marks the accepted region
    Draw(Vec<u8>),
    /// A shape name this build does not know
    ///
    /// Placed without a mask so clients sending newer shape names keep working.
    Unrecognized(String),
}

impl ShapeKind {
    /// Resolve the request's shape name and check its required parameters
    ///
    /// Names are matched case-insensitively. `text_mask` and `silhouette` are
    /// accepted as aliases of `text` and `custom_silhouette`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CollageError::InvalidShapeParams`] if:
    /// - `text` has no non-blank `text_input`
    /// - `custom_silhouette` has no `custom_mask`
    /// - `draw` has no `drawn_shape`
    pub fn from_request(request: &CollageRequest) -> Result<Self> {
        let name = request.shape.trim().to_ascii_lowercase();
        let kind = match name.as_str() {
            "rectangle" => Self::Rectangle,
            "circle" => Self::Circle,
            "star" => Self::Star,
            "heart" => Self::Heart,
            "text" | "text_mask" => {
                let text = request
                    .text_input
                    .as_deref()
                    .map(str::trim)
                    .filter(|text| !text.is_empty())
                    .ok_or_else(|| invalid_shape_params("text", "text_input"))?;
                Self::Text(text.to_string())
            }
            "custom_silhouette" | "silhouette" => {
                let reference = request
                    .custom_mask
                    .clone()
                    .filter(|bytes| !bytes.is_empty())
                    .ok_or_else(|| invalid_shape_params("custom_silhouette", "custom_mask"))?;
                Self::Silhouette(reference)
            }
            "draw" => {
                let drawing = request
                    .drawn_shape
                    .clone()
                    .filter(|bytes| !bytes.is_empty())
                    .ok_or_else(|| invalid_shape_params("draw", "drawn_shape"))?;
                Self::Draw(drawing)
            }
            _ => {
                warn!(shape = %name, "unrecognized shape kind, placing without a mask");
                Self::Unrecognized(name)
            }
        };
        Ok(kind)
    }

    /// Canonical shape name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Rectangle => "rectangle",
            Self::Circle => "circle",
            Self::Star => "star",
            Self::Heart => "heart",
            Self::Text(_) => "text",
            Self::Silhouette(_) => "custom_silhouette",
            Self::Draw(_) => "draw",
            Self::Unrecognized(_) => "unrecognized",
        }
    }

    /// Whether this shape constrains placement at all
    pub const fn is_constrained(&self) -> bool {
        !matches!(self, Self::Rectangle | Self::Unrecognized(_))
    }
}
