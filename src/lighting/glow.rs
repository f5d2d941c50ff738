//! Glow layer: a blurred, saturation-boosted copy of the artwork.

use crate::color::Hsl;
use crate::sample::ColoredCell;

use super::LightSettings;

/// Saturation multiplier for glow colors.
const SATURATION_BOOST: f32 = 1.3;

/// The glow layer: boosted cell copies plus the blur and opacity the
/// emitter applies to the whole group.
#[derive(Debug, Clone, PartialEq)]
pub struct GlowLayer {
    pub cells: Vec<ColoredCell>,
    /// Gaussian blur σ for the layer filter.
    pub sigma: f32,
    /// Group opacity.
    pub opacity: f32,
}

pub(crate) fn build(cells: &[ColoredCell], settings: &LightSettings) -> GlowLayer {
    let boosted = cells
        .iter()
        .map(|cell| ColoredCell {
            polygon: cell.polygon.clone(),
            color: Hsl::from(cell.color)
                .scale_saturation(SATURATION_BOOST)
                .into(),
        })
        .collect();

    let mode_boost = if settings.dark_mode { 1.5 } else { 1.0 };
    GlowLayer {
        cells: boosted,
        sigma: settings.glow.radius * settings.glow.intensity,
        opacity: settings.glow.intensity * mode_boost * 0.7,
    }
}
