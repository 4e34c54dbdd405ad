//! Mask builder dispatching on the shape kind

use crate::io::configuration::{DEFAULT_CIRCLE_MARGIN_RATIO, DEFAULT_TEXT_FILL_RATIO};
use crate::io::error::{Result, invalid_parameter};
use crate::shape::drawing::drawn_mask;
use crate::shape::procedural::{circle_mask, heart_mask, star_mask};
use crate::shape::text::{default_font, text_mask};
use crate::shape::{ShapeKind, SilhouetteSegmenter};
use crate::spatial::{Canvas, Mask};
use ab_glyph::FontArc;
use tracing::{debug, instrument};

/// Builds acceptance masks on a fixed canvas
///
/// Procedural shapes need nothing beyond the canvas. Text shapes use the
/// configured font, falling back to the bundled face. Silhouette shapes need a
/// segmenter supplied at construction.
#[derive(Debug)]
pub struct MaskBuilder {
    canvas: Canvas,
    circle_margin_ratio: f64,
    text_fill_ratio: f64,
    font: Option<FontArc>,
    segmenter: Option<SilhouetteSegmenter>,
}

impl MaskBuilder {
    /// Create a builder with default margins, the bundled font and no segmenter
    pub const fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            circle_margin_ratio: DEFAULT_CIRCLE_MARGIN_RATIO,
            text_fill_ratio: DEFAULT_TEXT_FILL_RATIO,
            font: None,
            segmenter: None,
        }
    }

    /// Use this font for text shapes
    #[must_use]
    pub fn with_font(mut self, font: FontArc) -> Self {
        self.font = Some(font);
        self
    }

    /// Use this segmenter for silhouette shapes
    #[must_use]
    pub fn with_segmenter(mut self, segmenter: SilhouetteSegmenter) -> Self {
        self.segmenter = Some(segmenter);
        self
    }

    /// Override the border excluded around the circle
    #[must_use]
    pub const fn with_circle_margin(mut self, ratio: f64) -> Self {
        self.circle_margin_ratio = ratio;
        self
    }

    /// Override the fraction of the canvas text must span
    #[must_use]
    pub const fn with_text_fill(mut self, ratio: f64) -> Self {
        self.text_fill_ratio = ratio;
        self
    }

    /// Canvas masks are built against
    pub const fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Build the mask for a shape
    ///
    /// Returns `None` for unconstrained shapes (rectangle and unrecognized names);
    /// callers skip containment checks entirely in that case. Every other shape
    /// yields a mask with the builder's canvas dimensions, and identical inputs
    /// always produce identical masks.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The circle margin is outside `[0, 0.5)`
    /// - The bundled font cannot be parsed
    /// - A silhouette shape is requested without a segmenter
    /// - The silhouette reference or drawing cannot be decoded
    #[instrument(level = "debug", skip_all, fields(shape = shape.name()))]
    pub fn build(&mut self, shape: &ShapeKind) -> Result<Option<Mask>> {
        let mask = match shape {
            ShapeKind::Rectangle | ShapeKind::Unrecognized(_) => None,
            ShapeKind::Circle => {
                if !(0.0..0.5).contains(&self.circle_margin_ratio) {
                    return Err(invalid_parameter(
                        "circle_margin_ratio",
                        &self.circle_margin_ratio,
                        &"must lie within [0, 0.5)",
                    ));
                }
                Some(circle_mask(self.canvas, self.circle_margin_ratio))
            }
            ShapeKind::Star => Some(star_mask(self.canvas)),
            ShapeKind::Heart => Some(heart_mask(self.canvas)),
            ShapeKind::Text(text) => {
                let font = match &mut self.font {
                    Some(font) => font,
                    empty => empty.insert(default_font()?),
                };
                Some(text_mask(self.canvas, text, font, self.text_fill_ratio)?)
            }
            ShapeKind::Silhouette(reference) => {
                let segmenter = self.segmenter.as_mut().ok_or_else(|| {
                    invalid_parameter(
                        "segmentation_model",
                        &"<none>",
                        &"silhouette shapes need a segmentation model",
                    )
                })?;
                Some(segmenter.segment(reference, self.canvas)?)
            }
            ShapeKind::Draw(drawing) => Some(drawn_mask(self.canvas, drawing)?),
        };

        if let Some(mask) = &mask {
            debug!(
                accepted = mask.accepted_count(),
                total = self.canvas.area(),
                "built mask"
            );
        }
        Ok(mask)
    }
}
