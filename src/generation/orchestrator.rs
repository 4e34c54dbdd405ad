//! Bounded retry loop over the generation service
//!
//! Every attempt moves through `Pending` to either `Success` or `Skipped`. When
//! the attempt budget runs out before enough images were collected the run ends
//! in `Exhausted`. Service failures never abort the loop; asset-store failures
//! do.

use crate::generation::service::{ImageGenerationService, InlineImage};
use crate::io::configuration::{DEFAULT_PROMPT, GENERATED_PREFIX, JPEG_QUALITY};
use crate::io::error::{CollageError, Result, invalid_parameter};
use crate::io::image::{encode_jpeg, guess_mime_type};
use crate::io::store::{AssetHandle, AssetStore, unique_filename};
use image::RgbImage;
use tracing::{info, instrument, warn};

/// One accepted image, already persisted
#[derive(Debug, Clone)]
pub struct GeneratedImageAsset {
    /// Handle returned by the asset store
    pub handle: AssetHandle,
    /// Path or URL the store resolves the handle to
    pub location: String,
    /// Decoded pixels, kept for rendering
    pub image: RgbImage,
}

/// Why an attempt produced nothing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The call failed, timed out or returned an error status
    ServiceFailed(String),
    /// The response carried no inline image parts
    NoImages,
    /// None of the inline parts could be decoded
    Undecodable(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ServiceFailed(reason) => write!(f, "service call failed: {reason}"),
            Self::NoImages => f.write_str("no image in response"),
            Self::Undecodable(reason) => write!(f, "undecodable image: {reason}"),
        }
    }
}

/// State of one generation attempt
#[derive(Debug, Clone)]
pub enum AttemptState {
    /// The call is about to be made
    Pending,
    /// An image was accepted and stored
    Success(GeneratedImageAsset),
    /// The call wasted the attempt
    Skipped(SkipReason),
    /// The budget ran out before the target count was reached
    Exhausted,
}

/// Observer notified of every attempt transition
pub trait GenerationProgress {
    /// Called with `Pending` before each call and with the outcome after it
    ///
    /// `collected` counts the images accepted so far, including this attempt's.
    fn on_attempt(&mut self, attempt: usize, state: &AttemptState, collected: usize) {
        let _ = (attempt, state, collected);
    }
}

impl GenerationProgress for () {}

/// Outcome of a generation run
#[derive(Debug, Clone)]
pub struct GenerationReport {
    /// Accepted images in generation order
    pub assets: Vec<GeneratedImageAsset>,
    /// Number of service calls made
    pub attempts: usize,
}

/// Drives the generation service until enough images are collected
pub struct GenerationOrchestrator<'a> {
    service: &'a dyn ImageGenerationService,
    store: &'a dyn AssetStore,
    prompt: String,
}

impl std::fmt::Debug for GenerationOrchestrator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationOrchestrator")
            .field("prompt", &self.prompt)
            .finish_non_exhaustive()
    }
}

impl<'a> GenerationOrchestrator<'a> {
    /// Orchestrator using the default portrait prompt
    pub fn new(service: &'a dyn ImageGenerationService, store: &'a dyn AssetStore) -> Self {
        Self {
            service,
            store,
            prompt: DEFAULT_PROMPT.to_string(),
        }
    }

    /// Replace the prompt sent with every call
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Collect up to `target_count` images within `max_attempts` calls
    ///
    /// # Errors
    ///
    /// See [`Self::generate_with_progress`]
    pub fn generate(
        &self,
        reference: &[u8],
        target_count: usize,
        max_attempts: usize,
    ) -> Result<GenerationReport> {
        self.generate_with_progress(reference, target_count, max_attempts, &mut ())
    }

    /// Collect up to `target_count` images, reporting each attempt
    ///
    /// Stops as soon as `target_count` images are stored or after `max_attempts`
    /// calls. Partial success is returned normally. A zero `target_count` returns
    /// an empty report without calling the service.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `max_attempts` is zero
    /// - No image was collected once the budget is spent
    /// - The asset store fails to persist an accepted image
    #[instrument(level = "debug", skip(self, reference, progress))]
    pub fn generate_with_progress(
        &self,
        reference: &[u8],
        target_count: usize,
        max_attempts: usize,
        progress: &mut dyn GenerationProgress,
    ) -> Result<GenerationReport> {
        if max_attempts == 0 {
            return Err(invalid_parameter(
                "max_attempts",
                &max_attempts,
                &"at least one attempt is required",
            ));
        }

        let mime_type = guess_mime_type(reference);
        let mut assets = Vec::with_capacity(target_count);
        let mut attempts = 0;

        while assets.len() < target_count {
            if attempts >= max_attempts {
                progress.on_attempt(attempts, &AttemptState::Exhausted, assets.len());
                break;
            }
            attempts += 1;
            progress.on_attempt(attempts, &AttemptState::Pending, assets.len());

            let state = self.attempt(reference, mime_type)?;
            match &state {
                AttemptState::Success(asset) => {
                    assets.push(asset.clone());
                    info!(attempt = attempts, collected = assets.len(), file = %asset.handle, "stored generated image");
                }
                AttemptState::Skipped(reason) => {
                    warn!(attempt = attempts, %reason, "generation attempt skipped");
                }
                AttemptState::Pending | AttemptState::Exhausted => {}
            }
            progress.on_attempt(attempts, &state, assets.len());
        }

        if assets.is_empty() && target_count > 0 {
            return Err(CollageError::GenerationExhausted { attempts });
        }
        Ok(GenerationReport { assets, attempts })
    }

    fn attempt(&self, reference: &[u8], mime_type: &str) -> Result<AttemptState> {
        let parts = match self.service.generate(reference, mime_type, &self.prompt) {
            Ok(parts) => parts,
            Err(e) => return Ok(AttemptState::Skipped(SkipReason::ServiceFailed(e.to_string()))),
        };
        match first_decodable(&parts) {
            Ok(image) => self.store_image(image).map(AttemptState::Success),
            Err(reason) => Ok(AttemptState::Skipped(reason)),
        }
    }

    fn store_image(&self, image: RgbImage) -> Result<GeneratedImageAsset> {
        let bytes = encode_jpeg(&image, JPEG_QUALITY)?;
        let handle = self
            .store
            .save(&bytes, &unique_filename(GENERATED_PREFIX, "jpg"))?;
        Ok(GeneratedImageAsset {
            location: self.store.resolve(&handle),
            handle,
            image,
        })
    }
}

fn first_decodable(parts: &[InlineImage]) -> std::result::Result<RgbImage, SkipReason> {
    let mut last_error = None;
    for part in parts {
        match image::load_from_memory(&part.data) {
            Ok(decoded) => return Ok(decoded.to_rgb8()),
            Err(e) => last_error = Some(e.to_string()),
        }
    }
    Err(last_error.map_or(SkipReason::NoImages, SkipReason::Undecodable))
}
