//! Text glyph masks auto-sized to the canvas
//!
//! Sizing and centering use the ink bounds of the laid-out glyphs rather than
//! advance widths and line metrics, so the visible strokes end up in the middle
//! of the canvas regardless of ascent, descent and side bearings.

use crate::io::configuration::{TEXT_SIZE_STEP, TEXT_START_SIZE, TEXT_STROKE_DIVISOR};
use crate::io::error::{Result, file_system, invalid_parameter};
use crate::spatial::{Canvas, Mask};
use ab_glyph::{Font, FontArc, GlyphId, OutlinedGlyph, PxScale, Rect, ScaleFont, point};
use image::GrayImage;
use imageproc::distance_transform::Norm;
use imageproc::morphology::dilate;
use std::path::Path;
use tracing::debug;

/// Bold monospace face used when no font is configured
static DEFAULT_FONT: &[u8] = include_bytes!("../../assets/DejaVuSansMono-Bold.ttf");

/// Load a TrueType/OpenType font from disk
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a usable font
pub fn load_font(path: &Path) -> Result<FontArc> {
    let bytes = std::fs::read(path).map_err(|e| file_system(path, "read font", e))?;
    FontArc::try_from_vec(bytes)
        .map_err(|e| invalid_parameter("font", &path.display(), &e))
}

/// The bundled DejaVu Sans Mono Bold face
///
/// # Errors
///
/// Returns an error if the embedded font data cannot be parsed
pub fn default_font() -> Result<FontArc> {
    FontArc::try_from_slice(DEFAULT_FONT)
        .map_err(|e| invalid_parameter("font", &"<bundled>", &e))
}

/// Stroke width that thickens glyphs at the given font size
pub fn stroke_width(font_size: u32) -> u32 {
    (font_size / TEXT_STROKE_DIVISOR).max(1)
}

/// Outlined glyphs of a single line, pen starting at the origin on the ascent line
fn layout(font: &FontArc, text: &str, font_size: u32) -> Vec<OutlinedGlyph> {
    let scale = PxScale::from(font_size as f32);
    let scaled = font.as_scaled(scale);
    let mut caret = 0.0_f32;
    let mut previous: Option<GlyphId> = None;
    let mut glyphs = Vec::new();

    for c in text.chars() {
        let id = scaled.glyph_id(c);
        if let Some(previous) = previous {
            caret += scaled.kern(previous, id);
        }
        let glyph = id.with_scale_and_position(scale, point(caret, scaled.ascent()));
        caret += scaled.h_advance(id);
        previous = Some(id);
        if let Some(outlined) = scaled.outline_glyph(glyph) {
            glyphs.push(outlined);
        }
    }
    glyphs
}

/// Union of the pixel bounds of every outlined glyph
fn ink_bounds(glyphs: &[OutlinedGlyph]) -> Option<Rect> {
    glyphs
        .iter()
        .map(OutlinedGlyph::px_bounds)
        .reduce(|acc, bounds| Rect {
            min: point(acc.min.x.min(bounds.min.x), acc.min.y.min(bounds.min.y)),
            max: point(acc.max.x.max(bounds.max.x), acc.max.y.max(bounds.max.y)),
        })
}

/// Ink bounding box of `text` at `font_size`, including the stroke on both sides
///
/// Text without any visible glyph measures as the stroke alone.
pub fn measure(font: &FontArc, text: &str, font_size: u32) -> (u32, u32) {
    let stroke = 2 * stroke_width(font_size);
    ink_bounds(&layout(font, text, font_size)).map_or((stroke, stroke), |bounds| {
        (
            bounds.width().ceil() as u32 + stroke,
            bounds.height().ceil() as u32 + stroke,
        )
    })
}

/// Largest font size whose text box stays below `fill_ratio` of the canvas
///
/// Grows from the start size in fixed steps until the box reaches the fill ratio
/// in either dimension, then steps back once.
pub fn fit_font_size(canvas: Canvas, font: &FontArc, text: &str, fill_ratio: f64) -> u32 {
    let max_w = f64::from(canvas.width) * fill_ratio;
    let max_h = f64::from(canvas.height) * fill_ratio;
    let size_limit = 4 * canvas.width.max(canvas.height) + TEXT_START_SIZE;

    let mut size = TEXT_START_SIZE;
    loop {
        let (w, h) = measure(font, text, size);
        if f64::from(w) >= max_w || f64::from(h) >= max_h {
            size = size.saturating_sub(TEXT_SIZE_STEP);
            break;
        }
        if size >= size_limit {
            break;
        }
        size += TEXT_SIZE_STEP;
    }
    size.max(TEXT_SIZE_STEP)
}

/// Mask covering the glyphs of `text`, with the ink box centered on the canvas
///
/// # Errors
///
/// Returns an error if the fill ratio is not within `(0, 1]`
pub fn text_mask(canvas: Canvas, text: &str, font: &FontArc, fill_ratio: f64) -> Result<Mask> {
    if !(fill_ratio > 0.0 && fill_ratio <= 1.0) {
        return Err(invalid_parameter(
            "text_fill_ratio",
            &fill_ratio,
            &"must lie within (0, 1]",
        ));
    }

    let size = fit_font_size(canvas, font, text, fill_ratio);
    let stroke = stroke_width(size);
    let glyphs = layout(font, text, size);
    let mut image = GrayImage::new(canvas.width, canvas.height);
    let Some(bounds) = ink_bounds(&glyphs) else {
        return Ok(Mask::from_luma(&image));
    };

    // Shift that moves the ink box's top-left corner to the centered position
    let offset_x = (f64::from(canvas.width) - f64::from(bounds.width())) / 2.0
        - f64::from(bounds.min.x);
    let offset_y = (f64::from(canvas.height) - f64::from(bounds.height())) / 2.0
        - f64::from(bounds.min.y);
    let (offset_x, offset_y) = (offset_x.round() as i64, offset_y.round() as i64);
    debug!(
        font_size = size,
        stroke,
        width = bounds.width(),
        height = bounds.height(),
        "fitted text mask"
    );

    for glyph in &glyphs {
        let origin = glyph.px_bounds().min;
        let left = origin.x as i64 + offset_x;
        let top = origin.y as i64 + offset_y;
        glyph.draw(|gx, gy, coverage| {
            let (x, y) = (left + i64::from(gx), top + i64::from(gy));
            if canvas.contains(x, y) {
                let value = (coverage.clamp(0.0, 1.0) * 255.0).round() as u8;
                let pixel = image.get_pixel_mut(x as u32, y as u32);
                pixel.0[0] = pixel.0[0].max(value);
            }
        });
    }

    let stroked = dilate(&image, Norm::LInf, stroke.min(u32::from(u8::MAX)) as u8);
    Ok(Mask::from_luma(&stroked))
}
