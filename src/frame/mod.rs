//! Decorative frame synthesis.
//!
//! The frame occupies the annulus between the image border and the
//! inner artwork rectangle `[d, d, W−d, H−d]`, where
//! `d = round(min(W, H) · width_percent / 100)`. Its elements tile
//! that annulus without gaps or overlaps, and every element is colored
//! by sampling the image near the corresponding edge so the frame
//! picks up the artwork's palette.

use glam::Vec2;
use plane_voronoi::ClipRect;

use crate::color::{Hsl, Rgb};
use crate::palettes;
use crate::raster::PixelBuffer;

/// Extra inset past the frame depth when sampling edge colors, so the
/// samples land inside the artwork rather than on the frame itself.
const SAMPLE_INSET: i32 = 5;

/// Samples per face for the simple frame's mean color.
const FACE_SAMPLES: u32 = 10;

/// Neighborhood side for segmented frame sampling.
const SEGMENT_NEIGHBORHOOD: u32 = 7;

/// Frame style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameStyle {
    #[default]
    None,
    /// Four mitered trapezoids.
    Simple,
    /// Corner squares plus equal segments along each side.
    Segmented,
}

/// Parameters of the frame stage.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOptions {
    pub style: FrameStyle,
    /// Frame depth as a percentage of `min(W, H)`, `2..=15`.
    pub width_percent: f32,
    /// Target segment size in pixels for the segmented style,
    /// `30..=150`.
    pub cell_size: f32,
    /// Named palette applied to frame colors; `original` disables.
    pub palette_id: String,
    /// Hue rotation in degrees `[0, 360)`.
    pub hue_shift: f32,
    pub saturation: f32,
    pub brightness: f32,
}

impl Default for FrameOptions {
    fn default() -> Self {
        Self {
            style: FrameStyle::None,
            width_percent: 5.0,
            cell_size: 60.0,
            palette_id: palettes::ORIGINAL.to_string(),
            hue_shift: 0.0,
            saturation: 1.0,
            brightness: 1.0,
        }
    }
}

/// One frame polygon with its color.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameElement {
    pub polygon: Vec<Vec2>,
    pub color: Rgb,
}

/// The frame stage output: elements plus the inner artwork rectangle
/// that the tessellation clips to.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameLayer {
    pub elements: Vec<FrameElement>,
    pub inner_rect: ClipRect,
}

/// Build the frame for the buffer.
pub fn build(buffer: &PixelBuffer, options: &FrameOptions) -> FrameLayer {
    let w = buffer.width() as f32;
    let h = buffer.height() as f32;
    let full = ClipRect::new(0.0, 0.0, w, h);

    if options.style == FrameStyle::None {
        return FrameLayer {
            elements: Vec::new(),
            inner_rect: full,
        };
    }

    let d = (w.min(h) * options.width_percent / 100.0).round();
    // A frame that would swallow the artwork degenerates to none.
    if d <= 0.0 || 2.0 * d >= w || 2.0 * d >= h {
        return FrameLayer {
            elements: Vec::new(),
            inner_rect: full,
        };
    }
    let inner_rect = ClipRect::new(d, d, w - d, h - d);

    let mut elements = match options.style {
        FrameStyle::None => unreachable!(),
        FrameStyle::Simple => simple_elements(buffer, w, h, d),
        FrameStyle::Segmented => segmented_elements(buffer, w, h, d, options.cell_size),
    };

    let palette = palettes::lookup(&options.palette_id);
    for element in &mut elements {
        element.color = post_process(element.color, palette, options);
    }

    FrameLayer {
        elements,
        inner_rect,
    }
}

/// Fixed order: palette map → hue shift → saturation/brightness.
fn post_process(color: Rgb, palette: Option<&[Rgb]>, options: &FrameOptions) -> Rgb {
    let mut color = match palette {
        Some(palette) => palettes::map_color(color, palette),
        None => color,
    };
    if options.hue_shift != 0.0 {
        color = Hsl::from(color).rotate_hue(options.hue_shift).into();
    }
    if (options.saturation - 1.0).abs() > f32::EPSILON
        || (options.brightness - 1.0).abs() > f32::EPSILON
    {
        color = Hsl::from(color)
            .adjust(options.saturation, options.brightness)
            .into();
    }
    color
}

/// Which image edge a frame element sits against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

/// Four mitered trapezoids whose outer edges are the image border and
/// inner edges the artwork rectangle.
fn simple_elements(buffer: &PixelBuffer, w: f32, h: f32, d: f32) -> Vec<FrameElement> {
    let faces = [
        (
            Edge::Top,
            vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(w, 0.0),
                Vec2::new(w - d, d),
                Vec2::new(d, d),
            ],
        ),
        (
            Edge::Right,
            vec![
                Vec2::new(w, 0.0),
                Vec2::new(w, h),
                Vec2::new(w - d, h - d),
                Vec2::new(w - d, d),
            ],
        ),
        (
            Edge::Bottom,
            vec![
                Vec2::new(w, h),
                Vec2::new(0.0, h),
                Vec2::new(d, h - d),
                Vec2::new(w - d, h - d),
            ],
        ),
        (
            Edge::Left,
            vec![
                Vec2::new(0.0, h),
                Vec2::new(0.0, 0.0),
                Vec2::new(d, d),
                Vec2::new(d, h - d),
            ],
        ),
    ];

    faces
        .into_iter()
        .map(|(edge, polygon)| FrameElement {
            color: face_mean(buffer, edge, d),
            polygon,
        })
        .collect()
}

/// Mean of `FACE_SAMPLES` pixels spread along the image edge, taken
/// `d + SAMPLE_INSET` pixels into the image.
fn face_mean(buffer: &PixelBuffer, edge: Edge, d: f32) -> Rgb {
    let w = buffer.width() as i32;
    let h = buffer.height() as i32;
    let inset = d as i32 + SAMPLE_INSET;

    let mut sum = [0.0f32; 3];
    for i in 0..FACE_SAMPLES {
        let t = (i as f32 + 0.5) / FACE_SAMPLES as f32;
        let (x, y) = match edge {
            Edge::Top => ((t * w as f32) as i32, inset),
            Edge::Right => (w - 1 - inset, (t * h as f32) as i32),
            Edge::Bottom => ((t * w as f32) as i32, h - 1 - inset),
            Edge::Left => (inset, (t * h as f32) as i32),
        };
        let px = buffer.get_pixel(x, y);
        sum[0] += px.r as f32;
        sum[1] += px.g as f32;
        sum[2] += px.b as f32;
    }
    let n = FACE_SAMPLES as f32;
    Rgb::from_f32([sum[0] / n, sum[1] / n, sum[2] / n])
}

/// Corner squares of side `d` plus equal-size segments along each
/// side. Segment counts follow `max(1, round(span / s))` with
/// `s = max(cell_size, 20)`.
fn segmented_elements(
    buffer: &PixelBuffer,
    w: f32,
    h: f32,
    d: f32,
    cell_size: f32,
) -> Vec<FrameElement> {
    let s = cell_size.max(20.0);
    let n_h = ((w - 2.0 * d) / s).round().max(1.0) as usize;
    let n_v = ((h - 2.0 * d) / s).round().max(1.0) as usize;

    let mut elements = Vec::with_capacity(4 + 2 * n_h + 2 * n_v);

    // Corner squares.
    let corners = [
        (0.0, 0.0),
        (w - d, 0.0),
        (w - d, h - d),
        (0.0, h - d),
    ];
    for (x, y) in corners {
        let polygon = rect_polygon(x, y, d, d);
        let center = Vec2::new(x + d / 2.0, y + d / 2.0);
        elements.push(FrameElement {
            color: segment_color(buffer, center, d),
            polygon,
        });
    }

    // Top and bottom runs.
    let seg_w = (w - 2.0 * d) / n_h as f32;
    for i in 0..n_h {
        let x = d + i as f32 * seg_w;
        for y in [0.0, h - d] {
            let polygon = rect_polygon(x, y, seg_w, d);
            let center = Vec2::new(x + seg_w / 2.0, y + d / 2.0);
            elements.push(FrameElement {
                color: segment_color(buffer, center, d),
                polygon,
            });
        }
    }

    // Left and right runs.
    let seg_h = (h - 2.0 * d) / n_v as f32;
    for i in 0..n_v {
        let y = d + i as f32 * seg_h;
        for x in [0.0, w - d] {
            let polygon = rect_polygon(x, y, d, seg_h);
            let center = Vec2::new(x + d / 2.0, y + seg_h / 2.0);
            elements.push(FrameElement {
                color: segment_color(buffer, center, d),
                polygon,
            });
        }
    }

    elements
}

fn rect_polygon(x: f32, y: f32, w: f32, h: f32) -> Vec<Vec2> {
    vec![
        Vec2::new(x, y),
        Vec2::new(x + w, y),
        Vec2::new(x + w, y + h),
        Vec2::new(x, y + h),
    ]
}

/// Neighborhood mean at the point on the nearest image edge closest to
/// the segment center, `d + SAMPLE_INSET` pixels inward.
fn segment_color(buffer: &PixelBuffer, center: Vec2, d: f32) -> Rgb {
    let w = buffer.width() as f32;
    let h = buffer.height() as f32;
    let inset = d + SAMPLE_INSET as f32;

    let to_top = center.y;
    let to_bottom = h - center.y;
    let to_left = center.x;
    let to_right = w - center.x;
    let nearest = to_top.min(to_bottom).min(to_left).min(to_right);

    let (x, y) = if nearest == to_top {
        (center.x, inset)
    } else if nearest == to_bottom {
        (center.x, h - 1.0 - inset)
    } else if nearest == to_left {
        (inset, center.y)
    } else {
        (w - 1.0 - inset, center.y)
    };

    buffer.neighborhood_mean(x as i32, y as i32, SEGMENT_NEIGHBORHOOD)
}
