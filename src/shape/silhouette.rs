//! Person silhouette masks from a segmentation model
//!
//! The model yields a per-pixel foreground probability. The probability map is
//! thresholded, blurred to remove jagged segmentation edges, re-thresholded to a
//! crisp binary image and finally resized to the canvas with nearest-neighbour
//! sampling.

use crate::io::configuration::{FOREGROUND_PROBABILITY, SILHOUETTE_RETHRESHOLD};
use crate::io::error::{CollageError, Result};
use crate::io::image::decode_image;
use crate::math::geometry::{blur_kernel_size, gaussian_kernel, gaussian_sigma};
use crate::spatial::{Canvas, Mask};
use image::imageops::{self, FilterType};
use image::{GrayImage, Luma, RgbImage};
use imageproc::filter::separable_filter_equal;
use ndarray::Array2;
use tracing::debug;

/// Pretrained person-segmentation model
pub trait SegmentationModel {
    /// Foreground probability in `[0, 1]` for every pixel, shaped `(height, width)`
    ///
    /// # Errors
    ///
    /// Returns an error if inference fails
    fn foreground_probability(&mut self, image: &RgbImage) -> Result<Array2<f32>>;
}

/// Turns reference photos into binary silhouettes using a segmentation model
pub struct SilhouetteSegmenter {
    model: Box<dyn SegmentationModel + Send>,
}

impl std::fmt::Debug for SilhouetteSegmenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SilhouetteSegmenter").finish_non_exhaustive()
    }
}

impl SilhouetteSegmenter {
    /// Wrap a segmentation model
    pub fn new(model: impl SegmentationModel + Send + 'static) -> Self {
        Self {
            model: Box::new(model),
        }
    }

    /// Decode an encoded reference photo and segment it onto the canvas
    ///
    /// # Errors
    ///
    /// Returns [`CollageError::InputDecode`] if the reference cannot be decoded,
    /// or any error from [`Self::segment_image`]
    pub fn segment(&mut self, reference: &[u8], canvas: Canvas) -> Result<Mask> {
        let image = decode_image(reference, "silhouette reference")?.to_rgb8();
        self.segment_image(&image, canvas)
    }

    /// Segment a decoded photo onto the canvas
    ///
    /// # Errors
    ///
    /// Returns an error if inference fails or the model output does not match the
    /// image dimensions
    pub fn segment_image(&mut self, image: &RgbImage, canvas: Canvas) -> Result<Mask> {
        let probabilities = self.model.foreground_probability(image)?;
        let expected = (image.height() as usize, image.width() as usize);
        if probabilities.dim() != expected {
            return Err(CollageError::InvalidSourceData {
                reason: format!(
                    "segmentation output is {:?}, expected {expected:?}",
                    probabilities.dim()
                ),
            });
        }

        let smooth = smooth_silhouette(&probabilities);
        let resized = imageops::resize(&smooth, canvas.width, canvas.height, FilterType::Nearest);
        Ok(Mask::from_luma(&resized))
    }
}

/// Threshold, blur and re-threshold a probability map into a binary image
///
/// The blur kernel grows with the image (7% of the smaller side, odd, at least 7)
/// and is applied with exactly that many taps per axis, edges padded by
/// continuity.
pub fn smooth_silhouette(probabilities: &Array2<f32>) -> GrayImage {
    let (height, width) = probabilities.dim();
    let binary = GrayImage::from_fn(width as u32, height as u32, |x, y| {
        let p = probabilities
            .get((y as usize, x as usize))
            .copied()
            .unwrap_or(0.0);
        Luma([if p > FOREGROUND_PROBABILITY { 255 } else { 0 }])
    });

    let kernel = blur_kernel_size(binary.width(), binary.height());
    let sigma = gaussian_sigma(kernel);
    debug!(kernel, sigma, "smoothing silhouette");
    let mut blurred = separable_filter_equal(&binary, &gaussian_kernel(kernel, sigma));

    for Luma([value]) in blurred.pixels_mut() {
        *value = if *value > SILHOUETTE_RETHRESHOLD { 255 } else { 0 };
    }
    blurred
}
