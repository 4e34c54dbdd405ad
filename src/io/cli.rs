//! Command-line interface for building one collage from local files

use crate::algorithm::executor::{CollagePipeline, PipelineConfig};
use crate::generation::{GeminiClient, GeminiConfig};
use crate::io::configuration::{
    DEFAULT_ENDPOINT, DEFAULT_GENERATED_DIR, DEFAULT_JITTER_RATIO, DEFAULT_MAX_ATTEMPTS,
    DEFAULT_MAX_STORED_FILES, DEFAULT_MODEL, DEFAULT_SEED, DEFAULT_TARGET_COUNT,
    DEFAULT_UPLOAD_DIR, GENERATED_URL_PREFIX, UPLOAD_URL_PREFIX,
};
use crate::io::error::{Result, file_system, invalid_parameter};
use crate::io::image::export_png;
use crate::io::payload::CollageRequest;
use crate::io::progress::ProgressManager;
use crate::io::store::DirectoryAssetStore;
use crate::shape::MaskBuilder;
use crate::shape::text::load_font;
use crate::spatial::{Canvas, GridDimensions};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "shapecollage")]
#[command(
    author,
    version,
    about = "Scatter AI-generated look-alikes of a photo inside a shape"
)]
/// Command-line arguments for the collage tool
pub struct Cli {
    /// Reference photo, also placed in the collage as the target
    #[arg(value_name = "REFERENCE")]
    pub reference: PathBuf,

    /// Shape name: rectangle, circle, star, heart, text, custom_silhouette or draw
    #[arg(long, default_value = "rectangle")]
    pub shape: String,

    /// Text for the text shape
    #[arg(long)]
    pub text: Option<String>,

    /// Drawing for the draw shape (dark strokes on a light background)
    #[arg(long, value_name = "IMAGE")]
    pub drawing: Option<PathBuf>,

    /// Photo to segment for the silhouette shape
    #[arg(long, value_name = "IMAGE")]
    pub silhouette_reference: Option<PathBuf>,

    /// TrueType or OpenType font for the text shape, defaults to DejaVu Sans Mono Bold
    #[arg(long, value_name = "FONT")]
    pub font: Option<PathBuf>,

    /// ONNX person-segmentation model for the silhouette shape
    #[arg(long, value_name = "MODEL")]
    pub segmentation_model: Option<PathBuf>,

    /// Number of generated images wanted
    #[arg(short, long, default_value_t = DEFAULT_TARGET_COUNT)]
    pub count: usize,

    /// Maximum number of generation calls
    #[arg(short, long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub attempts: usize,

    /// Random seed for reproducible layouts
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Canvas size as WIDTHxHEIGHT
    #[arg(long, default_value = "600x600")]
    pub canvas: Canvas,

    /// Grid size as COLUMNSxROWS
    #[arg(long, default_value = "18x18")]
    pub grid: GridDimensions,

    /// Anchor jitter as a fraction of the cell size
    #[arg(long, default_value_t = DEFAULT_JITTER_RATIO)]
    pub jitter: f64,

    /// Write the layout JSON here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Also rasterize the collage to this PNG file
    #[arg(short, long, value_name = "PNG")]
    pub render: Option<PathBuf>,

    /// Directory for stored target photos
    #[arg(long, default_value = DEFAULT_UPLOAD_DIR)]
    pub uploads: PathBuf,

    /// Directory for generated photos
    #[arg(long, default_value = DEFAULT_GENERATED_DIR)]
    pub generated: PathBuf,

    /// File budget kept in each asset directory
    #[arg(long, default_value_t = DEFAULT_MAX_STORED_FILES)]
    pub max_files: usize,

    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Gemini model name
    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Gemini API base URL
    #[arg(long, env = "GEMINI_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Pipeline parameters selected on the command line
    pub const fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            canvas: self.canvas,
            grid: self.grid,
            jitter_ratio: self.jitter,
            target_count: self.count,
            max_attempts: self.attempts,
            render: self.render.is_some(),
        }
    }

    /// Read the input files into a collage request
    ///
    /// # Errors
    ///
    /// Returns an error if any referenced file cannot be read
    pub fn request(&self) -> Result<CollageRequest> {
        let mut request = CollageRequest::new(self.shape.clone(), read_input(&self.reference)?);
        if let Some(text) = &self.text {
            request = request.with_text(text.clone());
        }
        if let Some(path) = &self.drawing {
            request = request.with_drawn_shape(read_input(path)?);
        }
        if let Some(path) = &self.silhouette_reference {
            request = request.with_custom_mask(read_input(path)?);
        }
        Ok(request)
    }
}

fn read_input(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| file_system(path, "read", e))
}

/// Runs the collage pipeline for parsed arguments
pub struct CollageCommand {
    cli: Cli,
}

impl CollageCommand {
    /// Create a command for the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Build the collage and write its outputs
    ///
    /// # Errors
    ///
    /// Returns an error if reading inputs, running the pipeline or writing outputs
    /// fails
    pub fn run(&self) -> Result<()> {
        let start = Instant::now();
        let cli = &self.cli;
        let request = cli.request()?;
        let config = cli.pipeline_config();

        let uploads = DirectoryAssetStore::open(&cli.uploads, UPLOAD_URL_PREFIX, cli.max_files)?;
        let generated =
            DirectoryAssetStore::open(&cli.generated, GENERATED_URL_PREFIX, cli.max_files)?;
        for store in [&uploads, &generated] {
            if let Err(e) = store.cleanup() {
                warn!(directory = %store.root().display(), error = %e, "asset cleanup failed");
            }
        }

        let service = GeminiClient::new(
            &GeminiConfig::new(cli.api_key.clone())
                .with_model(cli.model.clone())
                .with_endpoint(cli.endpoint.clone()),
        )
        .map_err(|e| invalid_parameter("api_key", &"<hidden>", &e))?;

        let mut pipeline =
            CollagePipeline::new(config, self.mask_builder()?, &service, &uploads, &generated)?;
        let mut progress = if cli.should_show_progress() {
            ProgressManager::new(config.target_count, config.max_attempts)
        } else {
            ProgressManager::hidden()
        };
        let mut rng = StdRng::seed_from_u64(cli.seed);
        let outcome = pipeline.run_with_progress(&request, &mut rng, &mut progress);
        progress.finish();
        let outcome = outcome?;

        let json = outcome.result.to_json()?;
        match &cli.output {
            Some(path) => std::fs::write(path, json).map_err(|e| file_system(path, "write", e))?,
            None => {
                let mut stdout = std::io::stdout().lock();
                writeln!(stdout, "{json}").map_err(|e| file_system("<stdout>", "write", e))?;
            }
        }

        if let (Some(path), Some(image)) = (&cli.render, &outcome.render) {
            export_png(image, path)?;
            info!(path = %path.display(), "rendered collage");
        }

        info!(
            positions = outcome.result.placements().len(),
            attempts = outcome.attempts,
            elapsed_ms = start.elapsed().as_millis(),
            "collage complete"
        );
        Ok(())
    }

    fn mask_builder(&self) -> Result<MaskBuilder> {
        let mut builder = MaskBuilder::new(self.cli.canvas);
        if let Some(path) = &self.cli.font {
            builder = builder.with_font(load_font(path)?);
        }
        if let Some(path) = &self.cli.segmentation_model {
            builder = builder.with_segmenter(segmenter(path)?);
        }
        Ok(builder)
    }
}

#[cfg(feature = "onnx")]
fn segmenter(path: &Path) -> Result<crate::shape::SilhouetteSegmenter> {
    let model = crate::shape::onnx::OnnxSegmentationModel::from_file(path)?;
    Ok(crate::shape::SilhouetteSegmenter::new(model))
}

#[cfg(not(feature = "onnx"))]
fn segmenter(path: &Path) -> Result<crate::shape::SilhouetteSegmenter> {
    Err(invalid_parameter(
        "segmentation_model",
        &path.display(),
        &"built without the onnx feature",
    ))
}
