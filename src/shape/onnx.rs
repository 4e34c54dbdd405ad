//! ONNX Runtime person-segmentation model
//!
//! Expects a selfie-segmentation style network: one NHWC float input in `[0, 1]`
//! and one single-channel probability output at the input resolution.

use crate::io::error::{CollageError, Result};
use crate::shape::SegmentationModel;
use image::imageops::{self, FilterType};
use image::{ImageBuffer, Luma, RgbImage};
use ndarray::{Array2, Array4};
use ort::session::Session;
use ort::value::TensorRef;
use std::path::Path;

/// Input width of the landscape selfie-segmentation model
pub const DEFAULT_INPUT_WIDTH: u32 = 256;
/// Input height of the landscape selfie-segmentation model
pub const DEFAULT_INPUT_HEIGHT: u32 = 144;

fn model_error(err: impl std::fmt::Display) -> CollageError {
    CollageError::InvalidSourceData {
        reason: format!("segmentation model: {err}"),
    }
}

/// Segmentation model executed with ONNX Runtime
pub struct OnnxSegmentationModel {
    session: Session,
    input_width: u32,
    input_height: u32,
}

impl OnnxSegmentationModel {
    /// Load a model file using the default input resolution
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be created from the file
    pub fn from_file(path: &Path) -> Result<Self> {
        Self::with_input_size(path, DEFAULT_INPUT_WIDTH, DEFAULT_INPUT_HEIGHT)
    }

    /// Load a model file with an explicit input resolution
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be created from the file
    pub fn with_input_size(path: &Path, input_width: u32, input_height: u32) -> Result<Self> {
        let session = Session::builder()
            .map_err(model_error)?
            .commit_from_file(path)
            .map_err(model_error)?;
        Ok(Self {
            session,
            input_width,
            input_height,
        })
    }

    fn input_tensor(&self, image: &RgbImage) -> Array4<f32> {
        let resized = imageops::resize(
            image,
            self.input_width,
            self.input_height,
            FilterType::Triangle,
        );
        let mut input = Array4::zeros((
            1,
            self.input_height as usize,
            self.input_width as usize,
            3,
        ));
        for (x, y, pixel) in resized.enumerate_pixels() {
            for (channel, value) in pixel.0.iter().enumerate() {
                if let Some(slot) = input.get_mut((0, y as usize, x as usize, channel)) {
                    *slot = f32::from(*value) / 255.0;
                }
            }
        }
        input
    }
}

impl SegmentationModel for OnnxSegmentationModel {
    fn foreground_probability(&mut self, image: &RgbImage) -> Result<Array2<f32>> {
        let input = self.input_tensor(image);
        let tensor = TensorRef::from_array_view(&input).map_err(model_error)?;
        let outputs = self
            .session
            .run(ort::inputs![tensor])
            .map_err(model_error)?;
        let (_, value) = outputs
            .iter()
            .next()
            .ok_or_else(|| model_error("model produced no outputs"))?;
        let (_, data) = value.try_extract_tensor::<f32>().map_err(model_error)?;

        let probabilities: ImageBuffer<Luma<f32>, Vec<f32>> =
            ImageBuffer::from_raw(self.input_width, self.input_height, data.to_vec())
                .ok_or_else(|| model_error("output size does not match the input resolution"))?;
        let resized = imageops::resize(
            &probabilities,
            image.width(),
            image.height(),
            FilterType::Triangle,
        );

        Array2::from_shape_vec(
            (image.height() as usize, image.width() as usize),
            resized.into_raw(),
        )
        .map_err(model_error)
    }
}
