//! Edge magnitude computation.
//!
//! The edge stage turns the pixel buffer into a normalized edge map:
//!
//! 1. Grayscale (Rec. 601 luma)
//! 2. Optional separable Gaussian pre-blur (σ = radius / 2)
//! 3. Contrast stretch around the 128 midpoint
//! 4. Sobel magnitude (normalized, low-pass thresholded) or Canny
//!    (non-maximum suppression + hysteresis, binary output)
//!
//! Row bands run in parallel and check the cancellation token between
//! bands.

mod canny;
mod preprocess;
mod sobel;

use rayon::prelude::*;

use crate::pipeline::CancelToken;
use crate::raster::PixelBuffer;

/// Rows per parallel work band. Cancellation is checked per band.
pub(crate) const ROW_BAND: usize = 64;

/// Edge detection algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeMethod {
    #[default]
    Sobel,
    Canny,
}

/// Parameters of the edge stage.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeOptions {
    /// Gaussian pre-blur radius, `0..=10`. Zero disables the blur.
    pub pre_blur: f32,
    /// Contrast factor, `0.5..=2.0`.
    pub contrast: f32,
    pub method: EdgeMethod,
    /// Sensitivity `0..=100`; higher keeps weaker edges.
    pub sensitivity: f32,
}

impl Default for EdgeOptions {
    fn default() -> Self {
        Self {
            pre_blur: 1.0,
            contrast: 1.0,
            method: EdgeMethod::Sobel,
            sensitivity: 50.0,
        }
    }
}

/// A normalized edge map: one value per pixel in `[0, 1]`, higher
/// where the local gradient is stronger.
#[derive(Debug, Clone)]
pub struct EdgeMap {
    width: u32,
    height: u32,
    values: Vec<f32>,
}

impl EdgeMap {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Value at `(x, y)`; coordinates must be in bounds.
    pub fn get(&self, x: u32, y: u32) -> f32 {
        self.values[(y * self.width + x) as usize]
    }

    pub fn max_value(&self) -> f32 {
        self.values.iter().copied().fold(0.0, f32::max)
    }
}

/// Run the edge stage. Returns `None` when the token was cancelled
/// mid-computation.
pub fn detect(
    buffer: &PixelBuffer,
    options: &EdgeOptions,
    token: &CancelToken,
) -> Option<EdgeMap> {
    let width = buffer.width() as usize;
    let height = buffer.height() as usize;

    let mut luma = preprocess::grayscale(buffer);
    if token.is_cancelled() {
        return None;
    }
    if options.pre_blur > 0.0 {
        luma = preprocess::gaussian_blur(&luma, width, height, options.pre_blur, token)?;
    }
    if (options.contrast - 1.0).abs() > f32::EPSILON {
        preprocess::apply_contrast(&mut luma, options.contrast);
    }
    if token.is_cancelled() {
        return None;
    }

    let values = match options.method {
        EdgeMethod::Sobel => sobel::detect(&luma, width, height, options.sensitivity, token)?,
        EdgeMethod::Canny => canny::detect(&luma, width, height, options.sensitivity, token)?,
    };

    debug_assert_eq!(values.len(), width * height);
    Some(EdgeMap {
        width: buffer.width(),
        height: buffer.height(),
        values,
    })
}

/// Map a plane of values row-band-parallel, checking the token
/// between bands. Returns `None` when cancelled.
pub(crate) fn par_rows<F>(
    height: usize,
    width: usize,
    token: &CancelToken,
    f: F,
) -> Option<Vec<f32>>
where
    F: Fn(usize, &mut [f32]) + Sync,
{
    let mut out = vec![0.0f32; width * height];
    let cancelled = out
        .par_chunks_mut(width * ROW_BAND)
        .enumerate()
        .map(|(band, chunk)| {
            if token.is_cancelled() {
                return true;
            }
            for (row_in_band, row) in chunk.chunks_mut(width).enumerate() {
                f(band * ROW_BAND + row_in_band, row);
            }
            false
        })
        .reduce(|| false, |a, b| a || b);

    if cancelled {
        None
    } else {
        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;

    fn vertical_line_buffer(width: u32, height: u32, line_x: u32) -> PixelBuffer {
        let mut data = Vec::new();
        for _y in 0..height {
            for x in 0..width {
                let v = if x == line_x { 0 } else { 255 };
                data.extend_from_slice(&[v, v, v, 255]);
            }
        }
        PixelBuffer::from_rgba(width, height, data).unwrap()
    }

    #[test]
    fn edge_map_has_full_length_and_bounded_values() {
        let buffer = vertical_line_buffer(10, 10, 5);
        let options = EdgeOptions {
            pre_blur: 0.0,
            ..EdgeOptions::default()
        };
        let map = detect(&buffer, &options, &CancelToken::new()).unwrap();
        assert_eq!(map.values().len(), 100);
        assert!(map.max_value() <= 1.0);
        assert!(map.values().iter().all(|&v| v >= 0.0));
    }

    #[test]
    fn sobel_localizes_a_vertical_line() {
        let buffer = vertical_line_buffer(10, 10, 5);
        let options = EdgeOptions {
            pre_blur: 0.0,
            contrast: 1.0,
            method: EdgeMethod::Sobel,
            sensitivity: 50.0,
        };
        let map = detect(&buffer, &options, &CancelToken::new()).unwrap();

        for y in 0..10 {
            for x in 0..10 {
                let v = map.get(x, y);
                if !(4..=6).contains(&x) {
                    assert_eq!(v, 0.0, "column {} should carry no edge response", x);
                }
            }
        }
        // The strongest response sits against the line itself.
        let peak_x = (0..10)
            .max_by(|&a, &b| map.get(a, 5).total_cmp(&map.get(b, 5)))
            .unwrap();
        assert!((4..=6).contains(&peak_x), "peak at column {}", peak_x);
        assert!((map.get(peak_x, 5) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn solid_input_has_no_edges() {
        let buffer = PixelBuffer::solid(16, 16, Rgb::new(90, 90, 90)).unwrap();
        let map = detect(&buffer, &EdgeOptions::default(), &CancelToken::new()).unwrap();
        assert_eq!(map.max_value(), 0.0);
    }

    #[test]
    fn cancelled_token_aborts_detection() {
        let buffer = vertical_line_buffer(64, 64, 30);
        let token = CancelToken::new();
        token.cancel();
        assert!(detect(&buffer, &EdgeOptions::default(), &token).is_none());
    }

    #[test]
    fn canny_output_is_binary() {
        let buffer = vertical_line_buffer(12, 12, 6);
        let options = EdgeOptions {
            pre_blur: 0.0,
            contrast: 1.0,
            method: EdgeMethod::Canny,
            sensitivity: 50.0,
        };
        let map = detect(&buffer, &options, &CancelToken::new()).unwrap();
        assert!(
            map.values().iter().all(|&v| v == 0.0 || v == 1.0),
            "canny emits a binary map"
        );
        assert!(map.max_value() == 1.0, "the line must survive hysteresis");
    }
}
