//! End-to-end collage pipeline
//!
//! Validation and decoding happen before any external call. Anchors are sampled
//! right after the mask is built, so a mask that rejects every anchor fails the
//! request before the target is stored or generation starts. The
//! request then flows through target storage, generation, placement and optional
//! rendering.

use crate::algorithm::placement::{PlacementEngine, TargetImage};
use crate::generation::{GenerationOrchestrator, GenerationProgress, ImageGenerationService};
use crate::io::configuration::{
    DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, DEFAULT_GRID_COLUMNS, DEFAULT_GRID_ROWS,
    DEFAULT_JITTER_RATIO, DEFAULT_MAX_ATTEMPTS, DEFAULT_TARGET_COUNT, JPEG_QUALITY,
};
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::{decode_image, encode_jpeg};
use crate::io::payload::{CollageRequest, CollageResult};
use crate::io::store::{AssetStore, unique_filename};
use crate::render::CollageAssembler;
use crate::shape::{MaskBuilder, ShapeKind};
use crate::spatial::{Canvas, GridDimensions, Mask};
use image::{RgbImage, RgbaImage};
use rand::Rng;
use tracing::info;

/// Layout and generation parameters for one request
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PipelineConfig {
    /// Canvas the layout is computed for
    pub canvas: Canvas,
    /// Grid of candidate cells
    pub grid: GridDimensions,
    /// Anchor jitter as a fraction of the cell size
    pub jitter_ratio: f64,
    /// Number of generated images wanted
    pub target_count: usize,
    /// Maximum number of generation calls
    pub max_attempts: usize,
    /// Whether to rasterize the layout
    pub render: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas {
                width: DEFAULT_CANVAS_WIDTH,
                height: DEFAULT_CANVAS_HEIGHT,
            },
            grid: GridDimensions::new(DEFAULT_GRID_COLUMNS, DEFAULT_GRID_ROWS),
            jitter_ratio: DEFAULT_JITTER_RATIO,
            target_count: DEFAULT_TARGET_COUNT,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            render: false,
        }
    }
}

/// Everything produced for one request
#[derive(Debug, Clone)]
pub struct CollageOutcome {
    /// Layout payload
    pub result: CollageResult,
    /// Acceptance mask, absent for unconstrained shapes
    pub mask: Option<Mask>,
    /// Number of generation calls made
    pub attempts: usize,
    /// Rasterized collage when rendering was requested
    pub render: Option<RgbaImage>,
}

/// Runs collage requests against injected collaborators
pub struct CollagePipeline<'a> {
    config: PipelineConfig,
    masks: MaskBuilder,
    service: &'a dyn ImageGenerationService,
    uploads: &'a dyn AssetStore,
    generated: &'a dyn AssetStore,
}

impl std::fmt::Debug for CollagePipeline<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollagePipeline")
            .field("config", &self.config)
            .field("masks", &self.masks)
            .finish_non_exhaustive()
    }
}

impl<'a> CollagePipeline<'a> {
    /// Assemble a pipeline
    ///
    /// Target photos go to `uploads` and generated photos to `generated`.
    ///
    /// # Errors
    ///
    /// Returns an error if the mask builder works on another canvas than the
    /// configuration
    pub fn new(
        config: PipelineConfig,
        masks: MaskBuilder,
        service: &'a dyn ImageGenerationService,
        uploads: &'a dyn AssetStore,
        generated: &'a dyn AssetStore,
    ) -> Result<Self> {
        if masks.canvas() != config.canvas {
            return Err(invalid_parameter(
                "canvas",
                &masks.canvas(),
                &format!("mask builder must use the {} canvas", config.canvas),
            ));
        }
        Ok(Self {
            config,
            masks,
            service,
            uploads,
            generated,
        })
    }

    /// Configuration in use
    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run one request without progress reporting
    ///
    /// # Errors
    ///
    /// See [`Self::run_with_progress`]
    pub fn run<R: Rng + ?Sized>(
        &mut self,
        request: &CollageRequest,
        rng: &mut R,
    ) -> Result<CollageOutcome> {
        self.run_with_progress(request, rng, &mut ())
    }

    /// Run one request
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Any supplied image cannot be decoded
    /// - The shape parameters or layout configuration are invalid
    /// - No generated image was obtained within the attempt budget
    /// - The mask leaves no candidate cell
    /// - Storing an image or rendering fails
    pub fn run_with_progress<R: Rng + ?Sized>(
        &mut self,
        request: &CollageRequest,
        rng: &mut R,
        progress: &mut dyn GenerationProgress,
    ) -> Result<CollageOutcome> {
        let reference = decode_image(&request.reference_image, "reference image")?.to_rgb8();
        let shape = ShapeKind::from_request(request)?;
        let engine = PlacementEngine::new(
            self.config.canvas,
            self.config.grid,
            self.config.jitter_ratio,
        )?;
        let mask = self.masks.build(&shape)?;
        let anchors = engine.candidate_anchors(mask.as_ref(), rng)?;
        if anchors.is_empty() {
            return Err(engine.no_candidates());
        }

        let target = self.store_target(reference)?;
        info!(shape = shape.name(), target = %target.handle, "stored target photo");

        let report = GenerationOrchestrator::new(self.service, self.generated)
            .generate_with_progress(
                &request.reference_image,
                self.config.target_count,
                self.config.max_attempts,
                progress,
            )?;

        let result = engine.place_at(anchors, &target, &report.assets, rng)?;
        info!(
            positions = result.placements().len(),
            generated = report.assets.len(),
            attempts = report.attempts,
            "collage layout ready"
        );

        let render = if self.config.render {
            let photos: Vec<RgbImage> = report
                .assets
                .into_iter()
                .map(|asset| asset.image)
                .collect();
            Some(CollageAssembler::new(self.config.canvas).render(
                result.placements(),
                &target.image,
                &photos,
                mask.as_ref(),
                rng,
            )?)
        } else {
            None
        };

        Ok(CollageOutcome {
            result,
            mask,
            attempts: report.attempts,
            render,
        })
    }

    fn store_target(&self, image: RgbImage) -> Result<TargetImage> {
        let bytes = encode_jpeg(&image, JPEG_QUALITY)?;
        let handle = self.uploads.save(&bytes, &unique_filename("", "jpg"))?;
        Ok(TargetImage {
            location: self.uploads.resolve(&handle),
            handle,
            image,
        })
    }
}
