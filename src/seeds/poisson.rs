//! Bridson Poisson-disk sampling.

use std::f32::consts::PI;

use glam::Vec2;
use plane_voronoi::ClipRect;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

/// Candidate attempts per active point.
const ATTEMPTS: usize = 30;

/// Generate exactly `count` points with Poisson-disk spacing.
///
/// The minimum distance is `0.8·sqrt(area / (π·count))` — 80% of the
/// spacing a perfect hex packing of `count` points would allow, which
/// lets Bridson reliably reach the requested count. Sampling stops
/// once the active set drains or `2·count` points exist; the result is
/// truncated or topped up with uniform samples to exactly `count`.
pub(crate) fn generate(count: usize, clip: ClipRect, rng: &mut ChaCha8Rng) -> Vec<Vec2> {
    if count == 0 {
        return Vec::new();
    }

    let width = clip.width();
    let height = clip.height();
    let radius = 0.8 * (clip.area() / (PI * count as f32)).sqrt();
    let cell_size = radius / 2.0_f32.sqrt();
    let cols = (width / cell_size).ceil().max(1.0) as usize;
    let rows = (height / cell_size).ceil().max(1.0) as usize;

    // One point per background grid cell at most.
    let mut grid: Vec<Option<usize>> = vec![None; cols * rows];
    let mut points: Vec<Vec2> = Vec::with_capacity(2 * count);
    let mut active: Vec<usize> = Vec::new();

    let cell_of = |p: Vec2| -> (usize, usize) {
        let cx = (((p.x - clip.min_x) / cell_size) as usize).min(cols - 1);
        let cy = (((p.y - clip.min_y) / cell_size) as usize).min(rows - 1);
        (cx, cy)
    };

    let first = Vec2::new(
        rng.gen_range(clip.min_x..clip.max_x),
        rng.gen_range(clip.min_y..clip.max_y),
    );
    let (cx, cy) = cell_of(first);
    grid[cy * cols + cx] = Some(0);
    points.push(first);
    active.push(0);

    while !active.is_empty() && points.len() < 2 * count {
        let slot = rng.gen_range(0..active.len());
        let base = points[active[slot]];

        let mut placed = false;
        for _ in 0..ATTEMPTS {
            let angle = rng.gen_range(0.0..2.0 * PI);
            let distance = rng.gen_range(radius..2.0 * radius);
            let candidate = base + Vec2::new(angle.cos(), angle.sin()) * distance;
            if !clip.contains(candidate) {
                continue;
            }
            let (cx, cy) = cell_of(candidate);
            if neighborhood_is_free(&grid, &points, candidate, cx, cy, cols, rows, radius) {
                let index = points.len();
                grid[cy * cols + cx] = Some(index);
                points.push(candidate);
                active.push(index);
                placed = true;
                break;
            }
        }
        if !placed {
            active.swap_remove(slot);
        }
    }

    // Exact-count contract: truncate the surplus or top up uniformly.
    points.truncate(count);
    while points.len() < count {
        points.push(Vec2::new(
            rng.gen_range(clip.min_x..clip.max_x),
            rng.gen_range(clip.min_y..clip.max_y),
        ));
    }
    points
}

/// True when no existing point within ±2 grid cells is closer than
/// `radius` to `candidate`.
#[allow(clippy::too_many_arguments)]
fn neighborhood_is_free(
    grid: &[Option<usize>],
    points: &[Vec2],
    candidate: Vec2,
    cx: usize,
    cy: usize,
    cols: usize,
    rows: usize,
    radius: f32,
) -> bool {
    let x0 = cx.saturating_sub(2);
    let y0 = cy.saturating_sub(2);
    let x1 = (cx + 2).min(cols - 1);
    let y1 = (cy + 2).min(rows - 1);
    for gy in y0..=y1 {
        for gx in x0..=x1 {
            if let Some(index) = grid[gy * cols + gx] {
                if points[index].distance(candidate) < radius {
                    return false;
                }
            }
        }
    }
    true
}
