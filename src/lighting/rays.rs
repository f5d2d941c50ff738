//! God ray synthesis.
//!
//! Cells cluster into a coarse grid; the most vibrant clusters each
//! spawn one back ray (behind the glass, widening toward it) and one
//! front ray (projecting toward the viewer, widening away). Widths and
//! lengths jitter within the spec'd ranges from the caller's RNG.

use std::f32::consts::TAU;

use glam::Vec2;
use plane_voronoi::ClipRect;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::color::{Hsl, Rgb};
use crate::sample::ColoredCell;

use super::{cell_centroid, mean_color, LightSettings};

/// A single gradient trapezoid.
#[derive(Debug, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec2,
    /// Direction of travel in radians.
    pub direction: f32,
    pub color: Rgb,
    pub opacity: f32,
    /// Base width in pixels; the trapezoid narrows to 0.6× at its
    /// origin and flares to 1.6× at its far end.
    pub width: f32,
    pub length: f32,
}

impl Ray {
    /// The four corners of the ray trapezoid, origin edge first.
    pub fn polygon(&self) -> Vec<Vec2> {
        let dir = Vec2::new(self.direction.cos(), self.direction.sin());
        let perp = Vec2::new(-dir.y, dir.x);
        let end = self.origin + dir * self.length;
        let near_half = 0.6 * self.width / 2.0;
        let far_half = 1.6 * self.width / 2.0;
        vec![
            self.origin - perp * near_half,
            self.origin + perp * near_half,
            end + perp * far_half,
            end - perp * far_half,
        ]
    }

    /// End point of the ray's centerline (gradient far stop).
    pub fn end(&self) -> Vec2 {
        self.origin + Vec2::new(self.direction.cos(), self.direction.sin()) * self.length
    }
}

/// A cluster of cells bucketed by centroid.
struct Cluster {
    center: Vec2,
    color: Rgb,
}

/// Generate the back and front ray layers.
pub(crate) fn generate(
    cells: &[ColoredCell],
    settings: &LightSettings,
    width: f32,
    height: f32,
    artwork_rect: ClipRect,
    rng: &mut ChaCha8Rng,
) -> (Vec<Ray>, Vec<Ray>) {
    let count = settings.rays.count.max(1) as usize;
    let clusters = cluster_cells(cells, count, artwork_rect);
    let selected = select_vibrant(clusters, count);
    if selected.is_empty() {
        return (Vec::new(), Vec::new());
    }

    let diagonal = (width * width + height * height).sqrt();
    let base_width = (width / count as f32) * (settings.rays.spread / 45.0);
    let front_length = diagonal * settings.rays.length;
    let back_length = 0.25 * front_length;
    let light = settings.light_position(width, height);
    let is_center = settings.preset.angle_degrees(settings.angle).is_none();

    let mut back = Vec::with_capacity(selected.len());
    let mut front = Vec::with_capacity(selected.len());

    for (i, cluster) in selected.iter().enumerate() {
        let direction = if is_center {
            (i as f32 / count as f32) * TAU
        } else {
            (cluster.center.y - light.y).atan2(cluster.center.x - light.x)
        };
        let dir = Vec2::new(direction.cos(), direction.sin());

        // Back ray: shifted toward the light, widening toward the glass.
        let back_width = 0.7 * base_width * (0.5 + rng.gen_range(0.0..0.5));
        let back_len = back_length * (0.7 + rng.gen_range(0.0..0.3));
        back.push(Ray {
            origin: cluster.center - dir * (0.3 * back_length),
            direction,
            color: cluster.color,
            opacity: 0.8 * settings.rays.intensity,
            width: back_width,
            length: back_len,
        });

        // Front ray: from the cluster itself, away from the light.
        let front_width = base_width * (0.5 + rng.gen_range(0.0..0.5));
        let front_len = front_length * (0.7 + rng.gen_range(0.0..0.3));
        front.push(Ray {
            origin: cluster.center,
            direction,
            color: cluster.color,
            opacity: 0.5 * settings.rays.intensity,
            width: front_width,
            length: front_len,
        });
    }

    (back, front)
}

/// Bucket cells into a `g × g` grid over the artwork rectangle, with
/// `g = ceil(sqrt(2·count))`. Each non-empty bucket becomes a cluster
/// centered on the bucket and colored by the mean of its members.
fn cluster_cells(cells: &[ColoredCell], count: usize, rect: ClipRect) -> Vec<Cluster> {
    let g = ((2.0 * count as f32).sqrt().ceil() as usize).max(1);
    let cell_w = rect.width() / g as f32;
    let cell_h = rect.height() / g as f32;

    let mut buckets: Vec<Vec<&ColoredCell>> = vec![Vec::new(); g * g];
    for cell in cells {
        let centroid = cell_centroid(cell);
        let gx = (((centroid.x - rect.min_x) / cell_w) as usize).min(g - 1);
        let gy = (((centroid.y - rect.min_y) / cell_h) as usize).min(g - 1);
        buckets[gy * g + gx].push(cell);
    }

    buckets
        .into_iter()
        .enumerate()
        .filter(|(_, members)| !members.is_empty())
        .map(|(index, members)| {
            let gx = index % g;
            let gy = index / g;
            Cluster {
                center: Vec2::new(
                    rect.min_x + (gx as f32 + 0.5) * cell_w,
                    rect.min_y + (gy as f32 + 0.5) * cell_h,
                ),
                color: mean_color(members.iter().map(|c| &c.color)),
            }
        })
        .collect()
}

/// Keep the `count` most vibrant clusters (HSL `s·l`, descending).
fn select_vibrant(mut clusters: Vec<Cluster>, count: usize) -> Vec<Cluster> {
    clusters.sort_by(|a, b| {
        Hsl::from(b.color)
            .vibrance()
            .total_cmp(&Hsl::from(a.color).vibrance())
    });
    clusters.truncate(count);
    clusters
}
