//! The user-configurable settings record.
//!
//! `Settings` is the single input (besides the image) the pipeline
//! consumes. It serializes with per-field defaults so hosts can
//! persist partial records. Out-of-range values are never rejected:
//! [`Settings::normalized`] clamps them silently at run entry,
//! matching the control surface contract.

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::edges::{EdgeMethod, EdgeOptions};
use crate::frame::{FrameOptions, FrameStyle};
use crate::lighting::LightSettings;
use crate::palettes;
use crate::sample::{ColorMode, ColorOptions};
use crate::seeds::{PointDistribution, SeedOptions};
use crate::svg::EmitOptions;

/// Default RNG seed; any fixed value works, determinism is the point.
pub const DEFAULT_SEED: u64 = 0x5741_4c4c;

/// Complete pipeline configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Seed count, `50..=2000`.
    pub cell_count: usize,
    pub point_distribution: PointDistribution,
    /// Edge-weighting blend, `0..=1`.
    pub edge_influence: f32,
    /// Lloyd passes, `0..=5`.
    pub relaxation_iterations: u32,

    /// Gaussian pre-blur radius, `0..=10`.
    pub pre_blur: f32,
    /// Contrast factor, `0.5..=2`.
    pub contrast: f32,
    pub edge_method: EdgeMethod,
    /// Edge sensitivity, `0..=100`.
    pub edge_sensitivity: f32,

    /// Lead line width, `0.5..=10`.
    pub line_width: f32,
    /// Lead line color, hex-encoded in serialized form.
    pub line_color: Rgb,

    pub color_mode: ColorMode,
    /// k-means palette size, `4..=64`.
    pub palette_size: usize,
    /// Cell saturation multiplier, `0..=2`.
    pub saturation: f32,
    /// Cell brightness multiplier, `0..=2`.
    pub brightness: f32,
    /// Named palette id for cells; `original` disables mapping.
    pub color_palette: String,

    pub frame_style: FrameStyle,
    /// Frame depth as percent of `min(W, H)`, `2..=15`.
    pub frame_width: f32,
    /// Segmented frame segment size, `30..=150`.
    pub frame_cell_size: f32,
    /// Named palette id for the frame.
    pub frame_color_palette: String,
    /// Frame hue rotation, `[0, 360)`.
    pub frame_hue_shift: f32,
    pub frame_saturation: f32,
    pub frame_brightness: f32,

    pub lighting: LightSettings,

    /// Explicit RNG seed; identical settings and image produce a
    /// byte-identical document.
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            cell_count: 400,
            point_distribution: PointDistribution::default(),
            edge_influence: 0.5,
            relaxation_iterations: 1,
            pre_blur: 1.0,
            contrast: 1.0,
            edge_method: EdgeMethod::default(),
            edge_sensitivity: 50.0,
            line_width: 2.0,
            line_color: Rgb::new(0x1a, 0x1a, 0x1a),
            color_mode: ColorMode::default(),
            palette_size: 16,
            saturation: 1.0,
            brightness: 1.0,
            color_palette: palettes::ORIGINAL.to_string(),
            frame_style: FrameStyle::default(),
            frame_width: 5.0,
            frame_cell_size: 60.0,
            frame_color_palette: palettes::ORIGINAL.to_string(),
            frame_hue_shift: 0.0,
            frame_saturation: 1.0,
            frame_brightness: 1.0,
            lighting: LightSettings::default(),
            seed: DEFAULT_SEED,
        }
    }
}

impl Settings {
    /// A copy with every field clamped into its documented range.
    pub fn normalized(&self) -> Self {
        let mut s = self.clone();
        s.cell_count = s.cell_count.clamp(50, 2000);
        s.edge_influence = s.edge_influence.clamp(0.0, 1.0);
        s.relaxation_iterations = s.relaxation_iterations.min(5);
        s.pre_blur = s.pre_blur.clamp(0.0, 10.0);
        s.contrast = s.contrast.clamp(0.5, 2.0);
        s.edge_sensitivity = s.edge_sensitivity.clamp(0.0, 100.0);
        s.line_width = s.line_width.clamp(0.5, 10.0);
        s.palette_size = s.palette_size.clamp(4, 64);
        s.saturation = s.saturation.clamp(0.0, 2.0);
        s.brightness = s.brightness.clamp(0.0, 2.0);
        s.frame_width = s.frame_width.clamp(2.0, 15.0);
        s.frame_cell_size = s.frame_cell_size.clamp(30.0, 150.0);
        s.frame_hue_shift = s.frame_hue_shift.rem_euclid(360.0);
        s.frame_saturation = s.frame_saturation.clamp(0.0, 2.0);
        s.frame_brightness = s.frame_brightness.clamp(0.0, 2.0);

        let l = &mut s.lighting;
        l.angle = l.angle.rem_euclid(360.0);
        l.elevation = l.elevation.clamp(0.0, 90.0);
        l.intensity = l.intensity.clamp(0.0, 2.0);
        l.ambient = l.ambient.clamp(0.0, 1.0);
        l.rays.count = l.rays.count.clamp(3, 12);
        l.rays.intensity = l.rays.intensity.clamp(0.0, 1.0);
        l.rays.spread = l.rays.spread.clamp(0.0, 90.0);
        l.rays.length = l.rays.length.clamp(0.0, 1.0);
        l.glow.intensity = l.glow.intensity.clamp(0.0, 1.0);
        l.glow.radius = l.glow.radius.clamp(0.0, 50.0);
        s
    }

    pub(crate) fn edge_options(&self) -> EdgeOptions {
        EdgeOptions {
            pre_blur: self.pre_blur,
            contrast: self.contrast,
            method: self.edge_method,
            sensitivity: self.edge_sensitivity,
        }
    }

    pub(crate) fn seed_options(&self) -> SeedOptions {
        SeedOptions {
            count: self.cell_count,
            distribution: self.point_distribution,
            edge_influence: self.edge_influence,
        }
    }

    pub(crate) fn color_options(&self) -> ColorOptions {
        ColorOptions {
            mode: self.color_mode,
            palette_size: self.palette_size,
            saturation: self.saturation,
            brightness: self.brightness,
            palette_id: self.color_palette.clone(),
        }
    }

    pub(crate) fn frame_options(&self) -> FrameOptions {
        FrameOptions {
            style: self.frame_style,
            width_percent: self.frame_width,
            cell_size: self.frame_cell_size,
            palette_id: self.frame_color_palette.clone(),
            hue_shift: self.frame_hue_shift,
            saturation: self.frame_saturation,
            brightness: self.frame_brightness,
        }
    }

    pub(crate) fn emit_options(&self) -> EmitOptions {
        EmitOptions {
            line_width: self.line_width,
            line_color: self.line_color,
        }
    }
}
