//! Binary acceptance mask over a canvas
//!
//! A mask is built once per request and never mutated afterwards. Each cell is
//! either accepted (inside the shape) or rejected. The absence of a mask means
//! "no constraint" and callers skip containment checks entirely.

use crate::io::configuration::MASK_THRESHOLD;
use crate::spatial::Canvas;
use bitvec::prelude::*;
use image::{GrayImage, Luma};

/// Value reported for accepted cells on the 0-255 scale
pub const ACCEPTED: u8 = 255;
/// Value reported for rejected cells on the 0-255 scale
pub const REJECTED: u8 = 0;

/// Immutable accept/reject map with the dimensions of its canvas
///
/// Stored row-major as one bit per pixel.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Mask {
    canvas: Canvas,
    bits: BitVec,
}

impl Mask {
    /// Mask accepting every cell
    pub fn full(canvas: Canvas) -> Self {
        Self {
            canvas,
            bits: bitvec![1; canvas.area()],
        }
    }

    /// Mask rejecting every cell
    pub fn empty(canvas: Canvas) -> Self {
        Self {
            canvas,
            bits: bitvec![0; canvas.area()],
        }
    }

    /// Binarise a grayscale image, accepting values at or above the mask threshold
    ///
    /// The canvas takes the image's dimensions; resize beforehand to target a
    /// different canvas.
    pub fn from_luma(image: &GrayImage) -> Self {
        let canvas = Canvas {
            width: image.width(),
            height: image.height(),
        };
        let bits = image
            .pixels()
            .map(|Luma([value])| *value >= MASK_THRESHOLD)
            .collect();
        Self { canvas, bits }
    }

    /// Canvas this mask is defined against
    pub const fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn offset(&self, x: i64, y: i64) -> Option<usize> {
        if self.canvas.contains(x, y) {
            Some(y as usize * self.canvas.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Check if a point is inside the canvas and on an accepted cell
    pub fn accepts(&self, x: i64, y: i64) -> bool {
        self.offset(x, y)
            .and_then(|index| self.bits.get(index).map(|bit| *bit))
            .unwrap_or(false)
    }

    /// Mask value at a point on the 0-255 scale
    ///
    /// Points outside the canvas read as rejected.
    pub fn value(&self, x: i64, y: i64) -> u8 {
        if self.accepts(x, y) { ACCEPTED } else { REJECTED }
    }

    /// Number of accepted cells
    pub fn accepted_count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Test if no cell is accepted
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Test if every cell is accepted
    pub fn is_full(&self) -> bool {
        self.bits.all()
    }

    /// Render the mask as a grayscale image (255 accepted, 0 rejected)
    pub fn to_luma(&self) -> GrayImage {
        GrayImage::from_fn(self.canvas.width, self.canvas.height, |x, y| {
            Luma([self.value(i64::from(x), i64::from(y))])
        })
    }
}
