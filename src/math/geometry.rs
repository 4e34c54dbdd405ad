//! Sizing helpers for photo footprints and smoothing kernels

use crate::io::configuration::{SILHOUETTE_BLUR_RATIO, SILHOUETTE_MIN_KERNEL};

/// Scale a `width x height` box to fit inside a `target x target` square
///
/// Aspect ratio is preserved and the longer side ends up equal to `target`
/// (up to truncation). Degenerate boxes collapse to zero.
pub fn fit_to_box(width: u32, height: u32, target: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }
    let target = f64::from(target);
    let scale = (target / f64::from(width)).min(target / f64::from(height));
    (
        (f64::from(width) * scale) as u32,
        (f64::from(height) * scale) as u32,
    )
}

/// Odd blur kernel size for smoothing a silhouette of the given size
///
/// Seven percent of the smaller dimension, forced odd, never below the minimum.
pub fn blur_kernel_size(width: u32, height: u32) -> u32 {
    let raw = (f64::from(width.min(height)) * SILHOUETTE_BLUR_RATIO) as u32;
    SILHOUETTE_MIN_KERNEL.max(raw / 2 * 2 + 1)
}

/// Gaussian sigma matching a kernel size when no sigma is given explicitly
///
/// `0.3 * ((k - 1) * 0.5 - 1) + 0.8`
pub fn gaussian_sigma(kernel_size: u32) -> f32 {
    let k = kernel_size as f32;
    0.3f32.mul_add((k - 1.0).mul_add(0.5, -1.0), 0.8)
}

/// Normalised 1-D Gaussian weights with exactly `kernel_size` taps
///
/// Taps are centered on the middle element; even sizes are widened by one so the
/// kernel stays symmetric.
pub fn gaussian_kernel(kernel_size: u32, sigma: f32) -> Vec<f32> {
    let radius = kernel_size / 2;
    let weights: Vec<f32> = (0..=2 * radius)
        .map(|i| {
            let offset = i as f32 - radius as f32;
            (-(offset * offset) / (2.0 * sigma * sigma)).exp()
        })
        .collect();
    let total: f32 = weights.iter().sum();
    weights.into_iter().map(|weight| weight / total).collect()
}
