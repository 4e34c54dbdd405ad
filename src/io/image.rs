//! Image decoding, JPEG encoding and PNG export

use crate::io::configuration::FALLBACK_MIME_TYPE;
use crate::io::error::{CollageError, Result, decode_error, file_system};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, RgbImage, RgbaImage};
use std::path::Path;

/// Decode caller-supplied bytes, naming the input in the error
///
/// # Errors
///
/// Returns [`CollageError::InputDecode`] if the bytes are not a supported image
pub fn decode_image(bytes: &[u8], input: &'static str) -> Result<DynamicImage> {
    image::load_from_memory(bytes).map_err(|e| decode_error(input, e))
}

/// Best-effort MIME type of encoded image bytes
///
/// Falls back to JPEG when the format cannot be recognised.
pub fn guess_mime_type(bytes: &[u8]) -> &'static str {
    image::guess_format(bytes).map_or(FALLBACK_MIME_TYPE, |format| format.to_mime_type())
}

/// Encode an RGB image as JPEG
///
/// # Errors
///
/// Returns an error if the encoder rejects the image
pub fn encode_jpeg(image: &RgbImage, quality: u8) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
    image
        .write_with_encoder(encoder)
        .map_err(|e| CollageError::ImageExport {
            path: "<memory>".into(),
            source: e,
        })?;
    Ok(buffer)
}

/// Export a composed collage as PNG, creating parent directories as needed
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_png(image: &RgbaImage, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| file_system(parent, "create directory", e))?;
    }

    image
        .save_with_format(output_path, ImageFormat::Png)
        .map_err(|e| CollageError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}
