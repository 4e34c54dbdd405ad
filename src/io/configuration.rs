//! Layout constants and runtime configuration defaults

// Canvas and grid used by the browser client
/// Default canvas width in pixels
pub const DEFAULT_CANVAS_WIDTH: u32 = 600;
/// Default canvas height in pixels
pub const DEFAULT_CANVAS_HEIGHT: u32 = 600;
/// Default number of grid columns
pub const DEFAULT_GRID_COLUMNS: u32 = 18;
/// Default number of grid rows
pub const DEFAULT_GRID_ROWS: u32 = 18;

/// Fraction of a cell an anchor may drift from the cell center on each axis
pub const DEFAULT_JITTER_RATIO: f64 = 0.2;
/// Largest jitter ratio that keeps every anchor inside its own cell
pub const MAX_JITTER_RATIO: f64 = 0.5;

/// Photo footprint relative to the smaller cell dimension
pub const PLACEMENT_SCALE: f64 = 1.5;
/// Upper bound (exclusive) for random rotations in degrees
pub const FULL_TURN_DEGREES: u32 = 360;

// Mask construction
/// Border excluded on every side of the circle shape, relative to canvas size
pub const DEFAULT_CIRCLE_MARGIN_RATIO: f64 = 0.04;
/// Fraction of the canvas the text shape must span in at least one dimension
pub const DEFAULT_TEXT_FILL_RATIO: f64 = 0.8;
/// First font size tried when fitting text
pub const TEXT_START_SIZE: u32 = 10;
/// Font size increment while fitting text
pub const TEXT_SIZE_STEP: u32 = 2;
/// Stroke width is the font size divided by this, at least one pixel
pub const TEXT_STROKE_DIVISOR: u32 = 30;
/// Mask values at or above this threshold are accepted
pub const MASK_THRESHOLD: u8 = 128;

// Silhouette smoothing
/// Segmentation probability above which a pixel is foreground
pub const FOREGROUND_PROBABILITY: f32 = 0.5;
/// Blur kernel size relative to the smaller image dimension
pub const SILHOUETTE_BLUR_RATIO: f64 = 0.07;
/// Smallest blur kernel size
pub const SILHOUETTE_MIN_KERNEL: u32 = 7;
/// Blurred values above this threshold stay foreground
pub const SILHOUETTE_RETHRESHOLD: u8 = 127;

// Generation budget
/// Number of generated images requested per collage
pub const DEFAULT_TARGET_COUNT: usize = 10;
/// Maximum calls to the generation service per collage
pub const DEFAULT_MAX_ATTEMPTS: usize = 20;
/// Default generation model
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image";
/// Default generation API base URL
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Per-call timeout for the generation service
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
/// MIME type assumed when a reference format cannot be detected
pub const FALLBACK_MIME_TYPE: &str = "image/jpeg";

/// Prompt sent with every generation call
pub const DEFAULT_PROMPT: &str = "Create a high-resolution, photorealistic portrait inspired by the \
reference photo. The new person should resemble the original by roughly 30 to 50 percent, with the \
same gender and approximate age, but must clearly be someone else: vary facial features, hairstyle, \
hair color, eye and nose shape, jawline and expression. Center the subject in a portrait-style \
composition with soft natural lighting and realistic skin texture. Invent a new background that \
keeps the color tone, mood and lighting of the reference without copying it. Clothing color, \
accessories and camera angle may change freely. Never produce a clone or identical twin.";

// Asset storage
/// Files kept in an asset directory before the oldest are removed
pub const DEFAULT_MAX_STORED_FILES: usize = 100;
/// JPEG quality for stored photos
pub const JPEG_QUALITY: u8 = 90;
/// Prefix for generated image filenames
pub const GENERATED_PREFIX: &str = "edited_";
/// Default directory for uploaded target photos
pub const DEFAULT_UPLOAD_DIR: &str = "static/uploads";
/// Default directory for generated photos
pub const DEFAULT_GENERATED_DIR: &str = "static/generated_images";
/// URL prefix for uploaded target photos
pub const UPLOAD_URL_PREFIX: &str = "/static/uploads";
/// URL prefix for generated photos
pub const GENERATED_URL_PREFIX: &str = "/static/generated_images";

// Rendering
/// Tile positions tried before the target is reported as unplaceable
pub const TARGET_PLACEMENT_ATTEMPTS: usize = 100;

/// Fixed seed for reproducible layouts
pub const DEFAULT_SEED: u64 = 42;
