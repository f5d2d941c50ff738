//! HSL color space for the adjustment passes.

use super::Rgb;

/// A color in hue/saturation/lightness space.
///
/// `h` is in degrees `[0, 360)`, `s` and `l` in `[0, 1]`. All of the
/// pipeline's tone adjustments (saturation/brightness multipliers,
/// frame hue rotation, transmission shading, glow saturation boost)
/// run through this type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

impl Hsl {
    pub fn new(h: f32, s: f32, l: f32) -> Self {
        Self { h, s, l }
    }

    /// Multiply saturation and lightness, clamping both to `[0, 1]`.
    pub fn adjust(self, saturation: f32, brightness: f32) -> Self {
        Self {
            h: self.h,
            s: (self.s * saturation).clamp(0.0, 1.0),
            l: (self.l * brightness).clamp(0.0, 1.0),
        }
    }

    /// Rotate hue by `degrees`, wrapping into `[0, 360)`.
    pub fn rotate_hue(self, degrees: f32) -> Self {
        Self {
            h: (self.h + degrees).rem_euclid(360.0),
            ..self
        }
    }

    /// Scale lightness by `factor`, clamping to `[0, 1]`.
    pub fn scale_lightness(self, factor: f32) -> Self {
        Self {
            l: (self.l * factor).clamp(0.0, 1.0),
            ..self
        }
    }

    /// Scale saturation by `factor`, clamping to `[0, 1]`.
    pub fn scale_saturation(self, factor: f32) -> Self {
        Self {
            s: (self.s * factor).clamp(0.0, 1.0),
            ..self
        }
    }

    /// `s · l` — the vibrance key used to rank ray clusters.
    pub fn vibrance(self) -> f32 {
        self.s * self.l
    }
}

impl From<Rgb> for Hsl {
    fn from(rgb: Rgb) -> Self {
        let r = rgb.r as f32 / 255.0;
        let g = rgb.g as f32 / 255.0;
        let b = rgb.b as f32 / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if max == min {
            return Self::new(0.0, 0.0, l);
        }

        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };

        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        Self::new(h * 60.0, s, l)
    }
}

impl From<Hsl> for Rgb {
    fn from(hsl: Hsl) -> Self {
        // Grayscale short-circuit: no hue contribution.
        if hsl.s <= 0.0 {
            let v = (hsl.l * 255.0).round().clamp(0.0, 255.0) as u8;
            return Rgb::new(v, v, v);
        }

        let h = hsl.h.rem_euclid(360.0) / 360.0;
        let q = if hsl.l < 0.5 {
            hsl.l * (1.0 + hsl.s)
        } else {
            hsl.l + hsl.s - hsl.l * hsl.s
        };
        let p = 2.0 * hsl.l - q;

        let channel = |t: f32| -> u8 {
            let t = t.rem_euclid(1.0);
            let v = if t < 1.0 / 6.0 {
                p + (q - p) * 6.0 * t
            } else if t < 0.5 {
                q
            } else if t < 2.0 / 3.0 {
                p + (q - p) * (2.0 / 3.0 - t) * 6.0
            } else {
                p
            };
            (v * 255.0).round().clamp(0.0, 255.0) as u8
        };

        Rgb::new(
            channel(h + 1.0 / 3.0),
            channel(h),
            channel(h - 1.0 / 3.0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel_delta(a: Rgb, b: Rgb) -> u8 {
        let d = |x: u8, y: u8| x.abs_diff(y);
        d(a.r, b.r).max(d(a.g, b.g)).max(d(a.b, b.b))
    }

    #[test]
    fn primary_colors_round_trip_exactly() {
        for c in [
            Rgb::new(255, 0, 0),
            Rgb::new(0, 255, 0),
            Rgb::new(0, 0, 255),
            Rgb::WHITE,
            Rgb::BLACK,
            Rgb::new(128, 128, 128),
        ] {
            assert_eq!(Rgb::from(Hsl::from(c)), c, "round trip failed for {}", c);
        }
    }

    #[test]
    fn arbitrary_colors_round_trip_within_one_unit() {
        for c in [
            Rgb::new(13, 77, 200),
            Rgb::new(240, 130, 7),
            Rgb::new(99, 180, 33),
            Rgb::new(1, 2, 3),
        ] {
            let back = Rgb::from(Hsl::from(c));
            assert!(
                channel_delta(c, back) <= 1,
                "round trip drift for {}: got {}",
                c,
                back
            );
        }
    }

    #[test]
    fn gray_has_zero_saturation() {
        let hsl = Hsl::from(Rgb::new(77, 77, 77));
        assert_eq!(hsl.s, 0.0);
        assert_eq!(hsl.h, 0.0);
    }

    #[test]
    fn identity_adjust_preserves_color() {
        let c = Rgb::new(180, 40, 90);
        let adjusted: Rgb = Hsl::from(c).adjust(1.0, 1.0).into();
        assert!(channel_delta(c, adjusted) <= 1);
    }

    #[test]
    fn saturation_zero_desaturates_to_gray() {
        let adjusted: Rgb = Hsl::from(Rgb::new(200, 50, 50)).adjust(0.0, 1.0).into();
        assert_eq!(adjusted.r, adjusted.g);
        assert_eq!(adjusted.g, adjusted.b);
    }

    #[test]
    fn brightness_zero_is_black() {
        let adjusted: Rgb = Hsl::from(Rgb::new(200, 50, 50)).adjust(1.0, 0.0).into();
        assert_eq!(adjusted, Rgb::BLACK);
    }

    #[test]
    fn hue_rotation_by_zero_is_identity() {
        let c = Rgb::new(10, 140, 220);
        let rotated: Rgb = Hsl::from(c).rotate_hue(0.0).into();
        assert!(channel_delta(c, rotated) <= 1);
    }

    #[test]
    fn hue_rotation_by_full_turn_is_identity_within_rounding() {
        let c = Rgb::new(10, 140, 220);
        let rotated: Rgb = Hsl::from(c).rotate_hue(360.0).into();
        assert!(channel_delta(c, rotated) <= 1);
    }

    #[test]
    fn hue_rotation_by_half_turn_changes_the_color() {
        let c = Rgb::new(255, 0, 0);
        let rotated: Rgb = Hsl::from(c).rotate_hue(180.0).into();
        assert_eq!(rotated, Rgb::new(0, 255, 255));
    }

    #[test]
    fn vibrance_ranks_saturated_midtones_above_grays() {
        let vivid = Hsl::from(Rgb::new(255, 40, 40)).vibrance();
        let gray = Hsl::from(Rgb::new(128, 128, 128)).vibrance();
        assert!(vivid > gray);
    }
}
