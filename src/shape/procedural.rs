//! Circle, star and heart masks rasterised from closed-form outlines

use crate::math::curves::{heart_outline, star_outline};
use crate::spatial::{Canvas, Mask};
use image::{GrayImage, Luma};
use imageproc::drawing::{draw_filled_ellipse_mut, draw_polygon_mut};
use imageproc::point::Point;

const FILL: Luma<u8> = Luma([255]);

/// Ellipse inscribed in the canvas, shrunk by `margin_ratio` of each dimension
///
/// A 4% margin on a 600x600 canvas leaves a 24 pixel border excluded on every side.
pub fn circle_mask(canvas: Canvas, margin_ratio: f64) -> Mask {
    let margin_w = (f64::from(canvas.width) * margin_ratio) as i32;
    let margin_h = (f64::from(canvas.height) * margin_ratio) as i32;
    let width = canvas.width as i32;
    let height = canvas.height as i32;

    let mut image = GrayImage::new(canvas.width, canvas.height);
    let radius_w = (width - 2 * margin_w) / 2;
    let radius_h = (height - 2 * margin_h) / 2;
    if radius_w > 0 && radius_h > 0 {
        draw_filled_ellipse_mut(&mut image, (width / 2, height / 2), radius_w, radius_h, FILL);
    }
    Mask::from_luma(&image)
}

/// Five-pointed star centered on the canvas
pub fn star_mask(canvas: Canvas) -> Mask {
    polygon_mask(canvas, star_outline(canvas).into_iter().map(|(x, y)| Point::new(x, y)))
}

/// Parametric heart centered on the canvas
pub fn heart_mask(canvas: Canvas) -> Mask {
    polygon_mask(
        canvas,
        heart_outline(canvas)
            .into_iter()
            .map(|(x, y)| Point::new(x.round() as i32, y.round() as i32)),
    )
}

/// Fill a closed polygon given by its vertices
///
/// Consecutive duplicate vertices and a trailing copy of the first vertex are
/// dropped; outlines that collapse to fewer than three vertices yield an empty mask.
pub fn polygon_mask(canvas: Canvas, vertices: impl IntoIterator<Item = Point<i32>>) -> Mask {
    let mut polygon: Vec<Point<i32>> = Vec::new();
    for vertex in vertices {
        if polygon.last() != Some(&vertex) {
            polygon.push(vertex);
        }
    }
    while polygon.len() > 1 && polygon.first() == polygon.last() {
        polygon.pop();
    }

    let mut image = GrayImage::new(canvas.width, canvas.height);
    if polygon.len() >= 3 {
        draw_polygon_mut(&mut image, &polygon, FILL);
    }
    Mask::from_luma(&image)
}
