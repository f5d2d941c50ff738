//! Per-cell transmission shading.

use glam::Vec2;
use rayon::prelude::*;

use crate::color::Hsl;
use crate::sample::ColoredCell;

use super::{cell_centroid, direction_from_angle, LightSettings};

/// Shade every cell by its position relative to the light.
pub(crate) fn shade(
    cells: &[ColoredCell],
    settings: &LightSettings,
    width: f32,
    height: f32,
) -> Vec<ColoredCell> {
    cells
        .par_iter()
        .map(|cell| {
            let factor = shade_factor(cell_centroid(cell), settings, width, height);
            ColoredCell {
                polygon: cell.polygon.clone(),
                color: Hsl::from(cell.color).scale_lightness(factor).into(),
            }
        })
        .collect()
}

/// The lightness multiplier for a cell centroid.
///
/// Directional light: project the centroid offset from the image
/// center onto the light direction, normalize by half the diagonal,
/// then flatten the gradient as elevation rises. Center light: a flat
/// brightness that grows with elevation. Both are combined with the
/// ambient floor and overall intensity.
pub(crate) fn shade_factor(
    centroid: Vec2,
    settings: &LightSettings,
    width: f32,
    height: f32,
) -> f32 {
    let brightness = match settings.preset.angle_degrees(settings.angle) {
        None => 0.5 + 0.5 * (settings.elevation / 90.0),
        Some(degrees) => {
            let center = Vec2::new(width / 2.0, height / 2.0);
            let normal = direction_from_angle(degrees);
            let half_diagonal = (width * width + height * height).sqrt() / 2.0;
            let projection = (centroid - center).dot(normal) / half_diagonal;
            let position = (projection + 1.0) / 2.0;
            let base = 0.3 + 0.7 * position;
            let gradient = 1.0 - 0.7 * (settings.elevation / 90.0);
            (0.5 + (base - 0.5) * gradient).clamp(0.2, 1.0)
        }
    };
    (settings.ambient + (1.0 - settings.ambient) * brightness) * settings.intensity
}
