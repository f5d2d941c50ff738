//! Grayscale, pre-blur and contrast preprocessing for edge detection.

use crate::pipeline::CancelToken;
use crate::raster::PixelBuffer;

use super::par_rows;

/// Luma plane of the buffer, values in `0..=255`.
pub(crate) fn grayscale(buffer: &PixelBuffer) -> Vec<f32> {
    let width = buffer.width() as usize;
    let height = buffer.height() as usize;
    let mut out = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            out.push(buffer.get_pixel(x as i32, y as i32).luma());
        }
    }
    out
}

/// Separable Gaussian blur with clamp-to-edge sampling.
///
/// `radius` controls both spread (σ = radius / 2) and kernel size
/// (`2·ceil(radius) + 1`). Returns `None` when cancelled between the
/// horizontal and vertical passes.
pub(crate) fn gaussian_blur(
    plane: &[f32],
    width: usize,
    height: usize,
    radius: f32,
    token: &CancelToken,
) -> Option<Vec<f32>> {
    let kernel = gaussian_kernel(radius);
    let half = (kernel.len() / 2) as i32;

    let horizontal = par_rows(height, width, token, |y, row| {
        for (x, out) in row.iter_mut().enumerate() {
            let mut sum = 0.0;
            for (k, &weight) in kernel.iter().enumerate() {
                let sx = (x as i32 + k as i32 - half).clamp(0, width as i32 - 1) as usize;
                sum += plane[y * width + sx] * weight;
            }
            *out = sum;
        }
    })?;

    par_rows(height, width, token, |y, row| {
        for (x, out) in row.iter_mut().enumerate() {
            let mut sum = 0.0;
            for (k, &weight) in kernel.iter().enumerate() {
                let sy = (y as i32 + k as i32 - half).clamp(0, height as i32 - 1) as usize;
                sum += horizontal[sy * width + x] * weight;
            }
            *out = sum;
        }
    })
}

fn gaussian_kernel(radius: f32) -> Vec<f32> {
    let sigma = (radius / 2.0).max(1e-3);
    let half = radius.ceil() as i32;
    let mut kernel: Vec<f32> = (-half..=half)
        .map(|x| (-((x * x) as f32) / (2.0 * sigma * sigma)).exp())
        .collect();
    let total: f32 = kernel.iter().sum();
    for w in &mut kernel {
        *w /= total;
    }
    kernel
}

/// Contrast stretch around the 128 midpoint, clamped to `0..=255`.
pub(crate) fn apply_contrast(plane: &mut [f32], factor: f32) {
    for v in plane {
        *v = ((*v - 128.0) * factor + 128.0).clamp(0.0, 255.0);
    }
}
