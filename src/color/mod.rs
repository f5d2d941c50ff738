//! Color types and conversions.
//!
//! - [`Rgb`]: 8-bit RGB for sampling, palettes, and SVG output
//! - [`Hsl`]: hue/saturation/lightness for the adjustment passes
//! - [`redmean`]: perceptually weighted RGB distance for palette mapping

mod hsl;
mod rgb;

pub use hsl::Hsl;
pub use rgb::{ParseColorError, Rgb};

/// Redmean distance between two colors.
///
/// A perceptually weighted RGB distance that is cheap to compute and
/// close to CIE76 for typical display colors:
///
/// `sqrt((2 + r̄/256)·Δr² + 4·Δg² + (2 + (255 − r̄)/256)·Δb²)`
///
/// where `r̄` is the mean of the two red channels.
pub fn redmean(a: Rgb, b: Rgb) -> f32 {
    let r_mean = (a.r as f32 + b.r as f32) / 2.0;
    let dr = a.r as f32 - b.r as f32;
    let dg = a.g as f32 - b.g as f32;
    let db = a.b as f32 - b.b as f32;
    ((2.0 + r_mean / 256.0) * dr * dr
        + 4.0 * dg * dg
        + (2.0 + (255.0 - r_mean) / 256.0) * db * db)
        .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redmean_is_zero_for_identical_colors() {
        let c = Rgb::new(120, 45, 210);
        assert_eq!(redmean(c, c), 0.0);
    }

    #[test]
    fn redmean_is_symmetric() {
        let a = Rgb::new(255, 0, 0);
        let b = Rgb::new(0, 0, 255);
        assert_eq!(redmean(a, b), redmean(b, a));
    }

    #[test]
    fn redmean_weights_red_more_for_bright_reds() {
        // With a high mean red, red differences outweigh blue differences.
        let base = Rgb::new(200, 100, 100);
        let red_shift = Rgb::new(230, 100, 100);
        let blue_shift = Rgb::new(200, 100, 130);
        assert!(redmean(base, red_shift) > redmean(base, blue_shift));
    }
}
