//! Free-hand drawing masks
//!
//! The drawing arrives as dark ink on a light background, the ink outlining or
//! filling the wanted shape. It is resized to the canvas and inverted so the ink
//! becomes accepted and the untouched background becomes rejected.

use crate::io::error::Result;
use crate::io::image::decode_image;
use crate::spatial::{Canvas, Mask};
use image::GrayImage;
use image::imageops::{self, FilterType};

/// Decode, resize and invert a drawing into a mask
///
/// # Errors
///
/// Returns [`crate::CollageError::InputDecode`] if the drawing cannot be decoded
pub fn drawn_mask(canvas: Canvas, drawing: &[u8]) -> Result<Mask> {
    let luma = decode_image(drawing, "drawn shape")?.to_luma8();
    Ok(mask_from_drawing(canvas, &luma))
}

/// Resize and invert an already decoded drawing
pub fn mask_from_drawing(canvas: Canvas, drawing: &GrayImage) -> Mask {
    let mut resized = if drawing.dimensions() == (canvas.width, canvas.height) {
        drawing.clone()
    } else {
        imageops::resize(drawing, canvas.width, canvas.height, FilterType::Triangle)
    };
    imageops::invert(&mut resized);
    Mask::from_luma(&resized)
}
