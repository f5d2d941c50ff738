//! Per-cell color sampling.
//!
//! Order is fixed: raw sample → (k-means quantization, palette mode
//! only) → (named-palette mapping, unless `original`) → HSL
//! adjustment. Each step sees the previous step's output; tests pin
//! the ordering.

mod kmeans;

use glam::Vec2;
use rayon::prelude::*;

use crate::color::{Hsl, Rgb};
use crate::palettes;
use crate::raster::PixelBuffer;
use crate::tessellate::VoronoiCell;

/// How a cell's fill color is derived from the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// The pixel under the rounded cell centroid.
    Exact,
    /// Mean over the pixels covered by the cell polygon.
    #[default]
    Average,
    /// Average samples quantized to a k-means palette.
    Palette,
}

/// Parameters of the color stage.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorOptions {
    pub mode: ColorMode,
    /// k for palette-mode quantization, `4..=64`.
    pub palette_size: usize,
    /// Saturation multiplier, `0..=2`.
    pub saturation: f32,
    /// Brightness (lightness) multiplier, `0..=2`.
    pub brightness: f32,
    /// Named palette id; `original` means no mapping.
    pub palette_id: String,
}

impl Default for ColorOptions {
    fn default() -> Self {
        Self {
            mode: ColorMode::Average,
            palette_size: 16,
            saturation: 1.0,
            brightness: 1.0,
            palette_id: palettes::ORIGINAL.to_string(),
        }
    }
}

/// A cell polygon with its final fill color.
#[derive(Debug, Clone, PartialEq)]
pub struct ColoredCell {
    pub polygon: Vec<Vec2>,
    pub color: Rgb,
}

/// Sample a color for every cell.
pub fn sample_cells(
    buffer: &PixelBuffer,
    cells: &[VoronoiCell],
    options: &ColorOptions,
) -> Vec<ColoredCell> {
    let raw: Vec<Rgb> = cells
        .par_iter()
        .map(|cell| match options.mode {
            ColorMode::Exact => exact_sample(buffer, cell),
            ColorMode::Average | ColorMode::Palette => average_sample(buffer, cell),
        })
        .collect();

    let quantized = if options.mode == ColorMode::Palette {
        kmeans::quantize(&raw, options.palette_size)
    } else {
        raw
    };

    let mapped = match palettes::lookup(&options.palette_id) {
        Some(palette) => quantized
            .into_iter()
            .map(|color| palettes::map_color(color, palette))
            .collect(),
        None => quantized,
    };

    let adjust = (options.saturation - 1.0).abs() > f32::EPSILON
        || (options.brightness - 1.0).abs() > f32::EPSILON;

    cells
        .iter()
        .zip(mapped)
        .map(|(cell, color)| {
            let color = if adjust {
                Hsl::from(color)
                    .adjust(options.saturation, options.brightness)
                    .into()
            } else {
                color
            };
            ColoredCell {
                polygon: cell.polygon.clone(),
                color,
            }
        })
        .collect()
}

/// The pixel under the rounded centroid.
fn exact_sample(buffer: &PixelBuffer, cell: &VoronoiCell) -> Rgb {
    buffer.get_pixel(
        cell.centroid.x.round() as i32,
        cell.centroid.y.round() as i32,
    )
}

/// Mean over pixels whose centers fall inside the polygon; falls back
/// to the centroid sample when the bounding-box scan hits nothing
/// (sub-pixel cells).
fn average_sample(buffer: &PixelBuffer, cell: &VoronoiCell) -> Rgb {
    let (min, max) = polygon_bounds(&cell.polygon);
    let x0 = (min.x.floor().max(0.0)) as i32;
    let y0 = (min.y.floor().max(0.0)) as i32;
    let x1 = (max.x.ceil() as i32).min(buffer.width() as i32 - 1);
    let y1 = (max.y.ceil() as i32).min(buffer.height() as i32 - 1);

    let mut sum = [0.0f64; 3];
    let mut count = 0u64;
    for y in y0..=y1 {
        for x in x0..=x1 {
            let center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
            if point_in_polygon(&cell.polygon, center) {
                let px = buffer.get_pixel(x, y);
                sum[0] += px.r as f64;
                sum[1] += px.g as f64;
                sum[2] += px.b as f64;
                count += 1;
            }
        }
    }

    if count == 0 {
        return exact_sample(buffer, cell);
    }
    let n = count as f64;
    Rgb::from_f32([
        (sum[0] / n) as f32,
        (sum[1] / n) as f32,
        (sum[2] / n) as f32,
    ])
}

fn polygon_bounds(polygon: &[Vec2]) -> (Vec2, Vec2) {
    let mut min = Vec2::splat(f32::INFINITY);
    let mut max = Vec2::splat(f32::NEG_INFINITY);
    for v in polygon {
        min = min.min(*v);
        max = max.max(*v);
    }
    (min, max)
}

/// Even-odd ray casting point-in-polygon test.
pub(crate) fn point_in_polygon(polygon: &[Vec2], p: Vec2) -> bool {
    let n = polygon.len();
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[j];
        if (a.y > p.y) != (b.y > p.y) {
            let x_cross = a.x + (p.y - a.y) / (b.y - a.y) * (b.x - a.x);
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;
    use plane_voronoi::ClipRect;

    fn cell_covering(clip: ClipRect) -> VoronoiCell {
        let polygon = clip.corners();
        let centroid = Vec2::new(
            (clip.min_x + clip.max_x) / 2.0,
            (clip.min_y + clip.max_y) / 2.0,
        );
        VoronoiCell {
            index: 0,
            polygon,
            centroid,
        }
    }

    fn half_red_half_blue(width: u32, height: u32) -> PixelBuffer {
        let mut data = Vec::new();
        for _y in 0..height {
            for x in 0..width {
                if x < width / 2 {
                    data.extend_from_slice(&[255, 0, 0, 255]);
                } else {
                    data.extend_from_slice(&[0, 0, 255, 255]);
                }
            }
        }
        PixelBuffer::from_rgba(width, height, data).unwrap()
    }

    #[test]
    fn exact_mode_reads_the_centroid_pixel() {
        let buffer = half_red_half_blue(10, 10);
        let cell = cell_covering(ClipRect::new(0.0, 0.0, 4.0, 10.0));
        let options = ColorOptions {
            mode: ColorMode::Exact,
            ..ColorOptions::default()
        };
        let colored = sample_cells(&buffer, &[cell], &options);
        assert_eq!(colored[0].color, Rgb::new(255, 0, 0));
    }

    #[test]
    fn exact_mode_with_identity_adjustments_is_exact() {
        let buffer = PixelBuffer::solid(8, 8, Rgb::new(13, 199, 87)).unwrap();
        let cell = cell_covering(ClipRect::new(0.0, 0.0, 8.0, 8.0));
        let options = ColorOptions {
            mode: ColorMode::Exact,
            saturation: 1.0,
            brightness: 1.0,
            ..ColorOptions::default()
        };
        let colored = sample_cells(&buffer, &[cell], &options);
        assert_eq!(colored[0].color, Rgb::new(13, 199, 87));
    }

    #[test]
    fn average_mode_mixes_covered_pixels() {
        let buffer = half_red_half_blue(10, 10);
        let cell = cell_covering(ClipRect::new(0.0, 0.0, 10.0, 10.0));
        let options = ColorOptions {
            mode: ColorMode::Average,
            ..ColorOptions::default()
        };
        let colored = sample_cells(&buffer, &[cell], &options);
        // Half red, half blue, averaged.
        assert_eq!(colored[0].color, Rgb::new(128, 0, 128));
    }

    #[test]
    fn subpixel_cell_falls_back_to_centroid_sample() {
        let buffer = half_red_half_blue(10, 10);
        // A sliver that contains no pixel center.
        let cell = VoronoiCell {
            index: 0,
            polygon: vec![
                Vec2::new(1.1, 1.1),
                Vec2::new(1.3, 1.1),
                Vec2::new(1.2, 1.3),
            ],
            centroid: Vec2::new(1.2, 1.17),
        };
        let options = ColorOptions {
            mode: ColorMode::Average,
            ..ColorOptions::default()
        };
        let colored = sample_cells(&buffer, &[cell], &options);
        assert_eq!(colored[0].color, Rgb::new(255, 0, 0));
    }

    #[test]
    fn palette_mode_bounds_distinct_colors() {
        let buffer = half_red_half_blue(20, 20);
        let cells: Vec<VoronoiCell> = (0..10)
            .map(|i| {
                let x = i as f32 * 2.0;
                cell_covering(ClipRect::new(x, 0.0, x + 2.0, 20.0))
            })
            .collect();
        let options = ColorOptions {
            mode: ColorMode::Palette,
            palette_size: 4,
            ..ColorOptions::default()
        };
        let colored = sample_cells(&buffer, &cells, &options);
        let distinct: std::collections::HashSet<Rgb> =
            colored.iter().map(|c| c.color).collect();
        assert!(distinct.len() <= 4);
    }

    #[test]
    fn named_palette_closes_the_color_set() {
        let buffer = half_red_half_blue(10, 10);
        let cells = vec![
            cell_covering(ClipRect::new(0.0, 0.0, 5.0, 10.0)),
            cell_covering(ClipRect::new(5.0, 0.0, 10.0, 10.0)),
        ];
        let options = ColorOptions {
            palette_id: "monochrome-blue".to_string(),
            ..ColorOptions::default()
        };
        let colored = sample_cells(&buffer, &cells, &options);
        for cell in &colored {
            assert!(
                crate::palettes::MONOCHROME_BLUE.contains(&cell.color),
                "{} is not in monochrome-blue",
                cell.color
            );
        }
    }

    #[test]
    fn brightness_multiplier_darkens() {
        let buffer = PixelBuffer::solid(8, 8, Rgb::new(200, 200, 200)).unwrap();
        let cell = cell_covering(ClipRect::new(0.0, 0.0, 8.0, 8.0));
        let options = ColorOptions {
            brightness: 0.5,
            ..ColorOptions::default()
        };
        let colored = sample_cells(&buffer, &[cell], &options);
        assert_eq!(colored[0].color, Rgb::new(100, 100, 100));
    }

    #[test]
    fn point_in_polygon_basics() {
        let square = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(4.0, 0.0),
            Vec2::new(4.0, 4.0),
            Vec2::new(0.0, 4.0),
        ];
        assert!(point_in_polygon(&square, Vec2::new(2.0, 2.0)));
        assert!(!point_in_polygon(&square, Vec2::new(5.0, 2.0)));
        assert!(!point_in_polygon(&square, Vec2::new(-1.0, 2.0)));
    }
}
