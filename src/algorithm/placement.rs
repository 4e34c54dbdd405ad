//! Jittered-grid placement of photos inside a mask
//!
//! Every grid cell proposes one anchor near its center. Anchors the mask rejects
//! are dropped; each survivor becomes one placement record centered on it with a
//! random rotation. All records share the target photo's footprint.

use crate::generation::GeneratedImageAsset;
use crate::io::configuration::{FULL_TURN_DEGREES, PLACEMENT_SCALE};
use crate::io::error::{CollageError, Result, invalid_parameter};
use crate::io::payload::{CollageResult, ImageReference, PlacementRecord};
use crate::io::store::AssetHandle;
use crate::math::geometry::fit_to_box;
use crate::spatial::grid::{jittered_cells, validate_jitter};
use crate::spatial::{Canvas, GridDimensions, Mask};
use image::RgbImage;
use rand::Rng;
use tracing::debug;

/// The caller's photo, stored before placement
#[derive(Debug, Clone)]
pub struct TargetImage {
    /// Handle returned by the asset store
    pub handle: AssetHandle,
    /// Path or URL the store resolves the handle to
    pub location: String,
    /// Decoded pixels
    pub image: RgbImage,
}

/// Produces layouts on a fixed canvas and grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementEngine {
    canvas: Canvas,
    grid: GridDimensions,
    jitter_ratio: f64,
    cell_size: (u32, u32),
}

impl PlacementEngine {
    /// Create an engine for a canvas, grid and jitter ratio
    ///
    /// # Errors
    ///
    /// Returns an error if the grid is empty, finer than the canvas, or the
    /// jitter ratio lies outside `[0, 0.5]`
    pub fn new(canvas: Canvas, grid: GridDimensions, jitter_ratio: f64) -> Result<Self> {
        validate_jitter(jitter_ratio)?;
        let cell_size = grid.cell_size(canvas)?;
        Ok(Self {
            canvas,
            grid,
            jitter_ratio,
            cell_size,
        })
    }

    /// Canvas the layout is computed for
    pub const fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Grid cell size in pixels
    pub const fn cell_size(&self) -> (u32, u32) {
        self.cell_size
    }

    /// Side of the square every photo is fit into
    pub fn target_size(&self) -> u32 {
        let (cell_w, cell_h) = self.cell_size;
        (f64::from(cell_w.min(cell_h)) * PLACEMENT_SCALE) as u32
    }

    /// Anchors that survive the mask, in column-major cell order
    ///
    /// Without a mask every anchor is kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the mask was built for another canvas
    pub fn candidate_anchors<R: Rng + ?Sized>(
        &self,
        mask: Option<&Mask>,
        rng: &mut R,
    ) -> Result<Vec<(i64, i64)>> {
        if let Some(mask) = mask
            && mask.canvas() != self.canvas
        {
            return Err(invalid_parameter(
                "mask",
                &mask.canvas(),
                &format!("must match the {} canvas", self.canvas),
            ));
        }

        let cells = jittered_cells(self.canvas, self.grid, self.jitter_ratio, rng)?;
        Ok(cells
            .into_iter()
            .map(|cell| cell.anchor)
            .filter(|&(x, y)| mask.is_none_or(|mask| mask.accepts(x, y)))
            .collect())
    }

    /// Compute the layout for a target and its generated companions
    ///
    /// Image references list the target first, then the generated images in
    /// order. The position list usually outnumbers the images.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No target photo is supplied
    /// - The mask rejects every anchor
    /// - The mask was built for another canvas
    pub fn place<R: Rng + ?Sized>(
        &self,
        mask: Option<&Mask>,
        target: Option<&TargetImage>,
        generated: &[GeneratedImageAsset],
        rng: &mut R,
    ) -> Result<CollageResult> {
        let target = target.ok_or(CollageError::MissingTarget)?;
        let anchors = self.candidate_anchors(mask, rng)?;
        self.place_at(anchors, target, generated, rng)
    }

    /// Compute the layout on anchors sampled earlier with [`Self::candidate_anchors`]
    ///
    /// # Errors
    ///
    /// Returns [`CollageError::NoCandidateCells`] if `anchors` is empty
    pub fn place_at<R: Rng + ?Sized>(
        &self,
        anchors: Vec<(i64, i64)>,
        target: &TargetImage,
        generated: &[GeneratedImageAsset],
        rng: &mut R,
    ) -> Result<CollageResult> {
        if anchors.is_empty() {
            return Err(self.no_candidates());
        }

        let (width, height) = fit_to_box(
            target.image.width(),
            target.image.height(),
            self.target_size(),
        );
        let placements: Vec<PlacementRecord> = anchors
            .into_iter()
            .map(|(cx, cy)| PlacementRecord {
                x: cx - i64::from(width / 2),
                y: cy - i64::from(height / 2),
                width,
                height,
                rotation_degrees: rng.random_range(0..FULL_TURN_DEGREES),
            })
            .collect();

        let images = std::iter::once(ImageReference {
            path: target.location.clone(),
            is_target: true,
        })
        .chain(generated.iter().map(|asset| ImageReference {
            path: asset.location.clone(),
            is_target: false,
        }))
        .collect();

        debug!(
            positions = placements.len(),
            generated = generated.len(),
            width,
            height,
            "computed layout"
        );
        Ok(CollageResult::new(placements, images))
    }

    /// Error reported when no anchor survives the mask
    pub const fn no_candidates(&self) -> CollageError {
        CollageError::NoCandidateCells {
            grid_dimensions: (self.grid.columns, self.grid.rows),
        }
    }
}
