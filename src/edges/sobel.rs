//! Sobel edge magnitude.

use crate::pipeline::CancelToken;

use super::par_rows;

/// Raw Sobel gradient at `(x, y)` with clamp-to-edge sampling.
pub(crate) fn gradient(plane: &[f32], width: usize, height: usize, x: usize, y: usize) -> (f32, f32) {
    let sample = |dx: i32, dy: i32| -> f32 {
        let sx = (x as i32 + dx).clamp(0, width as i32 - 1) as usize;
        let sy = (y as i32 + dy).clamp(0, height as i32 - 1) as usize;
        plane[sy * width + sx]
    };

    let gx = -sample(-1, -1) - 2.0 * sample(-1, 0) - sample(-1, 1)
        + sample(1, -1)
        + 2.0 * sample(1, 0)
        + sample(1, 1);
    let gy = -sample(-1, -1) - 2.0 * sample(0, -1) - sample(1, -1)
        + sample(-1, 1)
        + 2.0 * sample(0, 1)
        + sample(1, 1);
    (gx, gy)
}

/// Normalized, thresholded Sobel magnitude map.
///
/// Magnitudes are divided by the plane maximum, then values below the
/// low-pass threshold `(100 − sensitivity)/100 · 0.3` are zeroed, so
/// higher sensitivity keeps weaker edges.
pub(crate) fn detect(
    plane: &[f32],
    width: usize,
    height: usize,
    sensitivity: f32,
    token: &CancelToken,
) -> Option<Vec<f32>> {
    let mut magnitudes = par_rows(height, width, token, |y, row| {
        for (x, out) in row.iter_mut().enumerate() {
            let (gx, gy) = gradient(plane, width, height, x, y);
            *out = (gx * gx + gy * gy).sqrt();
        }
    })?;

    let max = magnitudes.iter().copied().fold(0.0, f32::max);
    if max > 0.0 {
        let threshold = (100.0 - sensitivity) / 100.0 * 0.3;
        for v in &mut magnitudes {
            *v /= max;
            if *v < threshold {
                *v = 0.0;
            }
        }
    }
    Some(magnitudes)
}
