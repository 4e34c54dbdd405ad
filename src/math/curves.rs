//! Closed-form outlines for the procedural shapes
//!
//! Both outlines are centered on the canvas and expressed in canvas pixels.

use crate::spatial::Canvas;

/// Number of star vertices (five outer tips, five inner notches)
pub const STAR_VERTICES: u32 = 10;
/// Angle between consecutive star vertices in degrees
pub const STAR_STEP_DEGREES: f64 = 36.0;
/// Inner notch radius relative to the tip radius
pub const STAR_INNER_RATIO: f64 = 0.5;
/// Canvas size divisor mapping heart curve units to pixels
pub const HEART_SCALE_DIVISOR: f64 = 35.0;

/// Vertices of a five-pointed star
///
/// The first tip points straight up (-90 degrees); radii alternate between half
/// the smaller canvas dimension and half of that again.
pub fn star_outline(canvas: Canvas) -> Vec<(i32, i32)> {
    let (cx, cy) = canvas.center();
    let radius = f64::from(canvas.min_dimension() / 2);

    (0..STAR_VERTICES)
        .map(|i| {
            let angle = f64::from(i).mul_add(STAR_STEP_DEGREES, -90.0).to_radians();
            let r = if i % 2 == 0 {
                radius
            } else {
                radius * STAR_INNER_RATIO
            };
            (
                cx as i32 + (angle.cos() * r) as i32,
                cy as i32 + (angle.sin() * r) as i32,
            )
        })
        .collect()
}

/// Points on the classic parametric heart, one per whole degree
///
/// `x = 16 sin^3 t`, `y = 13 cos t - 5 cos 2t - 2 cos 3t - cos 4t`, with the y axis
/// flipped so the lobes sit at the top. The closing point at 360 degrees is
/// omitted because it coincides with the first.
pub fn heart_outline(canvas: Canvas) -> Vec<(f64, f64)> {
    let cx = f64::from(canvas.width) / 2.0;
    let cy = f64::from(canvas.height) / 2.0;
    let scale = f64::from(canvas.min_dimension()) / HEART_SCALE_DIVISOR;

    (0..360)
        .map(|degree| {
            let t = f64::from(degree).to_radians();
            let x = 16.0 * t.sin().powi(3);
            let y = 13.0 * t.cos()
                - 5.0 * (2.0 * t).cos()
                - 2.0 * (3.0 * t).cos()
                - (4.0 * t).cos();
            (x.mul_add(scale, cx), y.mul_add(-scale, cy))
        })
        .collect()
}
