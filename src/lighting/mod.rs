//! Simulated light transmission.
//!
//! Runs only when lighting is enabled, on already-colored cells:
//!
//! - transmission shading: per-cell brightness from the cell's
//!   position relative to the light source
//! - god rays: gradient trapezoids grown from the most vibrant cell
//!   clusters, in a back layer (behind the glass) and a front layer
//!   (toward the viewer)
//! - glow: a blurred, saturation-boosted copy of the artwork
//!
//! Ray jitter draws from the caller's seeded RNG, so identical
//! settings produce identical scenes.

mod glow;
mod rays;
mod transmission;

use glam::Vec2;
use plane_voronoi::ClipRect;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::sample::ColoredCell;

pub use glow::GlowLayer;
pub use rays::Ray;

/// Where the light stands relative to the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LightPreset {
    #[default]
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
    /// Light at the image center; no direction.
    Center,
    /// Use [`LightSettings::angle`].
    Custom,
}

impl LightPreset {
    /// The effective angle in degrees, or `None` for [`Self::Center`].
    ///
    /// Angles are in screen coordinates (y grows downward): 0° puts
    /// the light at the left edge, 90° at the bottom, 315° top-left.
    pub fn angle_degrees(self, custom: f32) -> Option<f32> {
        match self {
            LightPreset::Left => Some(0.0),
            LightPreset::BottomLeft => Some(45.0),
            LightPreset::Bottom => Some(90.0),
            LightPreset::BottomRight => Some(135.0),
            LightPreset::Right => Some(180.0),
            LightPreset::TopRight => Some(225.0),
            LightPreset::Top => Some(270.0),
            LightPreset::TopLeft => Some(315.0),
            LightPreset::Custom => Some(custom.rem_euclid(360.0)),
            LightPreset::Center => None,
        }
    }
}

/// Unit vector from the image center toward a light at `degrees`.
pub(crate) fn direction_from_angle(degrees: f32) -> Vec2 {
    let radians = degrees.to_radians();
    Vec2::new(-radians.cos(), radians.sin())
}

/// God ray parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaySettings {
    pub enabled: bool,
    /// Ray count, `3..=12`.
    pub count: u32,
    /// Opacity scale, `0..=1`.
    pub intensity: f32,
    /// Angular spread in degrees, `0..=90`; scales the base width.
    pub spread: f32,
    /// Length as a fraction of the image diagonal, `0..=1`.
    pub length: f32,
}

impl Default for RaySettings {
    fn default() -> Self {
        Self {
            enabled: false,
            count: 6,
            intensity: 0.5,
            spread: 30.0,
            length: 0.5,
        }
    }
}

/// Glow layer parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlowSettings {
    pub enabled: bool,
    /// Opacity and blur scale, `0..=1`.
    pub intensity: f32,
    /// Blur radius in pixels, `0..=50`.
    pub radius: f32,
}

impl Default for GlowSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            intensity: 0.5,
            radius: 10.0,
        }
    }
}

/// The full lighting configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightSettings {
    pub enabled: bool,
    pub preset: LightPreset,
    /// Custom angle in degrees `[0, 360)`; only read by
    /// [`LightPreset::Custom`].
    pub angle: f32,
    /// Elevation in degrees `[0, 90]`; higher flattens the gradient.
    pub elevation: f32,
    /// Overall brightness multiplier, `0..=2`.
    pub intensity: f32,
    /// Ambient floor, `0..=1`.
    pub ambient: f32,
    pub dark_mode: bool,
    pub rays: RaySettings,
    pub glow: GlowSettings,
}

impl Default for LightSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            preset: LightPreset::TopLeft,
            angle: 315.0,
            elevation: 45.0,
            intensity: 1.0,
            ambient: 0.3,
            dark_mode: false,
            rays: RaySettings::default(),
            glow: GlowSettings::default(),
        }
    }
}

impl LightSettings {
    /// The conceptual light point: `2·max(W, H)` outside the image
    /// along the effective angle, or the image center for
    /// [`LightPreset::Center`].
    pub(crate) fn light_position(&self, width: f32, height: f32) -> Vec2 {
        let center = Vec2::new(width / 2.0, height / 2.0);
        match self.preset.angle_degrees(self.angle) {
            Some(degrees) => {
                center + direction_from_angle(degrees) * (2.0 * width.max(height))
            }
            None => center,
        }
    }
}

/// Lighting output: shaded cells plus the optional ray and glow layers.
#[derive(Debug, Clone)]
pub struct LitScene {
    pub cells: Vec<ColoredCell>,
    pub back_rays: Vec<Ray>,
    pub front_rays: Vec<Ray>,
    pub glow: Option<GlowLayer>,
}

/// Apply the lighting transformation.
///
/// With lighting disabled this is the identity on the cells and emits
/// no ray or glow layers.
pub fn apply(
    cells: &[ColoredCell],
    settings: &LightSettings,
    width: f32,
    height: f32,
    artwork_rect: ClipRect,
    rng: &mut ChaCha8Rng,
) -> LitScene {
    if !settings.enabled {
        return LitScene {
            cells: cells.to_vec(),
            back_rays: Vec::new(),
            front_rays: Vec::new(),
            glow: None,
        };
    }

    let shaded = transmission::shade(cells, settings, width, height);

    let (back_rays, front_rays) = if settings.rays.enabled {
        rays::generate(&shaded, settings, width, height, artwork_rect, rng)
    } else {
        (Vec::new(), Vec::new())
    };

    let glow = settings
        .glow
        .enabled
        .then(|| glow::build(&shaded, settings));

    LitScene {
        cells: shaded,
        back_rays,
        front_rays,
        glow,
    }
}

/// Centroid of a colored cell's polygon.
pub(crate) fn cell_centroid(cell: &ColoredCell) -> Vec2 {
    plane_voronoi::polygon_centroid(&cell.polygon)
}

/// Mean color of a slice of colors.
pub(crate) fn mean_color<'a>(colors: impl Iterator<Item = &'a Rgb>) -> Rgb {
    let mut sum = [0.0f32; 3];
    let mut count = 0u32;
    for color in colors {
        sum[0] += color.r as f32;
        sum[1] += color.g as f32;
        sum[2] += color.b as f32;
        count += 1;
    }
    let n = count.max(1) as f32;
    Rgb::from_f32([sum[0] / n, sum[1] / n, sum[2] / n])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn square_cell(x: f32, y: f32, size: f32, color: Rgb) -> ColoredCell {
        ColoredCell {
            polygon: vec![
                Vec2::new(x, y),
                Vec2::new(x + size, y),
                Vec2::new(x + size, y + size),
                Vec2::new(x, y + size),
            ],
            color,
        }
    }

    #[test]
    fn preset_angles_match_the_table() {
        assert_eq!(LightPreset::Left.angle_degrees(0.0), Some(0.0));
        assert_eq!(LightPreset::BottomLeft.angle_degrees(0.0), Some(45.0));
        assert_eq!(LightPreset::Bottom.angle_degrees(0.0), Some(90.0));
        assert_eq!(LightPreset::BottomRight.angle_degrees(0.0), Some(135.0));
        assert_eq!(LightPreset::Right.angle_degrees(0.0), Some(180.0));
        assert_eq!(LightPreset::TopRight.angle_degrees(0.0), Some(225.0));
        assert_eq!(LightPreset::Top.angle_degrees(0.0), Some(270.0));
        assert_eq!(LightPreset::TopLeft.angle_degrees(0.0), Some(315.0));
        assert_eq!(LightPreset::Center.angle_degrees(123.0), None);
        assert_eq!(LightPreset::Custom.angle_degrees(400.0), Some(40.0));
    }

    #[test]
    fn preset_directions_point_at_their_edges() {
        // Screen coordinates: y grows downward.
        let left = direction_from_angle(0.0);
        assert!(left.x < -0.99 && left.y.abs() < 1e-6);

        let bottom = direction_from_angle(90.0);
        assert!(bottom.y > 0.99 && bottom.x.abs() < 1e-5);

        let top_left = direction_from_angle(315.0);
        assert!(top_left.x < 0.0 && top_left.y < 0.0);
    }

    #[test]
    fn light_position_sits_outside_the_image() {
        let settings = LightSettings {
            enabled: true,
            preset: LightPreset::Left,
            ..LightSettings::default()
        };
        let position = settings.light_position(100.0, 80.0);
        assert!(position.x < 0.0, "left light must sit left of the image");
        assert!((position.y - 40.0).abs() < 1e-4);
    }

    #[test]
    fn center_preset_lights_from_the_center() {
        let settings = LightSettings {
            enabled: true,
            preset: LightPreset::Center,
            ..LightSettings::default()
        };
        assert_eq!(
            settings.light_position(100.0, 80.0),
            Vec2::new(50.0, 40.0)
        );
    }

    #[test]
    fn disabled_lighting_is_the_identity() {
        let cells = vec![
            square_cell(0.0, 0.0, 10.0, Rgb::new(200, 50, 50)),
            square_cell(10.0, 0.0, 10.0, Rgb::new(50, 200, 50)),
        ];
        let settings = LightSettings::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let scene = apply(
            &cells,
            &settings,
            20.0,
            10.0,
            ClipRect::new(0.0, 0.0, 20.0, 10.0),
            &mut rng,
        );
        assert_eq!(scene.cells, cells);
        assert!(scene.back_rays.is_empty());
        assert!(scene.front_rays.is_empty());
        assert!(scene.glow.is_none());
    }

    #[test]
    fn enabled_lighting_emits_rays_and_glow_when_requested() {
        let cells: Vec<ColoredCell> = (0..16)
            .map(|i| {
                square_cell(
                    (i % 4) as f32 * 25.0,
                    (i / 4) as f32 * 25.0,
                    25.0,
                    Rgb::new(200, 30, (i * 10) as u8),
                )
            })
            .collect();
        let settings = LightSettings {
            enabled: true,
            rays: RaySettings {
                enabled: true,
                count: 5,
                ..RaySettings::default()
            },
            glow: GlowSettings {
                enabled: true,
                ..GlowSettings::default()
            },
            ..LightSettings::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let scene = apply(
            &cells,
            &settings,
            100.0,
            100.0,
            ClipRect::new(0.0, 0.0, 100.0, 100.0),
            &mut rng,
        );
        assert!(!scene.back_rays.is_empty());
        assert_eq!(scene.back_rays.len(), scene.front_rays.len());
        assert!(scene.back_rays.len() <= 5);
        assert!(scene.glow.is_some());
    }
}
