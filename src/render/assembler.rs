//! Raster collage assembly
//!
//! Generated photos are pasted at their records in order, so later photos cover
//! earlier ones. The target photo goes on top at a grid-aligned tile whose
//! corners and center all lie inside the mask. The mask finally becomes the
//! alpha channel.

use crate::io::configuration::TARGET_PLACEMENT_ATTEMPTS;
use crate::io::error::{CollageError, Result, invalid_parameter};
use crate::io::payload::PlacementRecord;
use crate::spatial::{Canvas, Mask};
use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbaImage, RgbImage};
use imageproc::geometric_transformations::{Interpolation, rotate_about_center};
use rand::Rng;
use tracing::debug;

const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);
const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Renders layouts to RGBA images
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollageAssembler {
    canvas: Canvas,
    placement_attempts: usize,
}

impl CollageAssembler {
    /// Assembler for a canvas using the default target placement budget
    pub const fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            placement_attempts: TARGET_PLACEMENT_ATTEMPTS,
        }
    }

    /// Override how many tiles are tried for the target photo
    #[must_use]
    pub const fn with_placement_attempts(mut self, attempts: usize) -> Self {
        self.placement_attempts = attempts;
        self
    }

    /// Render a layout
    ///
    /// Generated photos are cycled over the placement records; with none, the
    /// records stay empty. The target photo takes the shared footprint of the
    /// first record. Without a mask the output is fully opaque.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `placements` is empty
    /// - The mask was built for another canvas
    /// - No sampled tile fits the target photo inside the mask
    pub fn render<R: Rng + ?Sized>(
        &self,
        placements: &[PlacementRecord],
        target: &RgbImage,
        generated: &[RgbImage],
        mask: Option<&Mask>,
        rng: &mut R,
    ) -> Result<RgbaImage> {
        let Some(footprint) = placements.first() else {
            return Err(invalid_parameter(
                "placements",
                &0,
                &"at least one placement is required",
            ));
        };
        if let Some(mask) = mask
            && mask.canvas() != self.canvas
        {
            return Err(invalid_parameter(
                "mask",
                &mask.canvas(),
                &format!("must match the {} canvas", self.canvas),
            ));
        }

        let mut canvas = RgbaImage::from_pixel(self.canvas.width, self.canvas.height, BACKGROUND);

        if !generated.is_empty() {
            for (record, photo) in placements.iter().zip(generated.iter().cycle()) {
                let tile = Self::prepare_tile(photo, record);
                imageops::overlay(&mut canvas, &tile, record.x, record.y);
            }
        }

        let (width, height) = (footprint.width, footprint.height);
        let (x, y) = self.place_target(width, height, mask, rng)?;
        let scaled = imageops::resize(target, width, height, FilterType::Triangle);
        imageops::overlay(&mut canvas, &DynamicImage::ImageRgb8(scaled).to_rgba8(), x, y);
        debug!(x, y, width, height, "placed target photo");

        for (x, y, pixel) in canvas.enumerate_pixels_mut() {
            pixel.0[3] = mask.map_or(u8::MAX, |mask| mask.value(i64::from(x), i64::from(y)));
        }
        Ok(canvas)
    }

    fn prepare_tile(photo: &RgbImage, record: &PlacementRecord) -> RgbaImage {
        let resized = imageops::resize(photo, record.width, record.height, FilterType::Triangle);
        let rgba = DynamicImage::ImageRgb8(resized).to_rgba8();
        if record.rotation_degrees == 0 {
            return rgba;
        }
        let theta = f64::from(record.rotation_degrees).to_radians() as f32;
        rotate_about_center(&rgba, theta, Interpolation::Bilinear, TRANSPARENT)
    }

    /// Sample grid-aligned tiles until one lies inside the mask
    fn place_target<R: Rng + ?Sized>(
        &self,
        width: u32,
        height: u32,
        mask: Option<&Mask>,
        rng: &mut R,
    ) -> Result<(i64, i64)> {
        let failure = CollageError::TargetPlacement {
            attempts: self.placement_attempts,
        };
        if width == 0 || height == 0 || width > self.canvas.width || height > self.canvas.height {
            return Err(failure);
        }
        let columns = (self.canvas.width - width) / width;
        let rows = (self.canvas.height - height) / height;

        for _ in 0..self.placement_attempts {
            let x = i64::from(rng.random_range(0..=columns) * width);
            let y = i64::from(rng.random_range(0..=rows) * height);
            if mask.is_none_or(|mask| tile_inside(mask, x, y, width, height)) {
                return Ok((x, y));
            }
        }
        Err(failure)
    }
}

/// Whether the four corners and the center of a box are accepted
pub fn tile_inside(mask: &Mask, x: i64, y: i64, width: u32, height: u32) -> bool {
    let (w, h) = (i64::from(width), i64::from(height));
    [
        (x, y),
        (x + w - 1, y),
        (x, y + h - 1),
        (x + w - 1, y + h - 1),
        (x + w / 2, y + h / 2),
    ]
    .into_iter()
    .all(|(px, py)| mask.accepts(px, py))
}
