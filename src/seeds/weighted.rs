//! Edge-weighted seed sampling.

use glam::Vec2;
use plane_voronoi::ClipRect;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::edges::EdgeMap;

/// Generate `count` points whose density follows the edge map.
///
/// Each pixel in the clip window gets the weight
/// `(1 − influence) + influence · (edge + 0.1)`; the `+ 0.1` floor
/// keeps flat regions reachable even at full influence. Draws walk a
/// prefix sum by binary search, land on the pixel's full-image
/// coordinates, and jitter by half a pixel per axis.
pub(crate) fn generate(
    count: usize,
    clip: ClipRect,
    edge_map: &EdgeMap,
    influence: f32,
    rng: &mut ChaCha8Rng,
) -> Vec<Vec2> {
    let influence = influence.clamp(0.0, 1.0);

    // Integer window of the clip rect, addressed in full-image
    // coordinates.
    let x0 = (clip.min_x.floor().max(0.0)) as u32;
    let y0 = (clip.min_y.floor().max(0.0)) as u32;
    let x1 = (clip.max_x.ceil() as u32).min(edge_map.width()).max(x0 + 1);
    let y1 = (clip.max_y.ceil() as u32).min(edge_map.height()).max(y0 + 1);
    let window_w = (x1 - x0) as usize;
    let window_h = (y1 - y0) as usize;

    let mut prefix: Vec<f64> = Vec::with_capacity(window_w * window_h);
    let mut total = 0.0f64;
    for y in y0..y1 {
        for x in x0..x1 {
            let edge = edge_map.get(x, y);
            let weight = (1.0 - influence) + influence * (edge + 0.1);
            total += weight as f64;
            prefix.push(total);
        }
    }

    (0..count)
        .map(|_| {
            let u = rng.gen_range(0.0..total);
            let index = prefix.partition_point(|&p| p < u).min(prefix.len() - 1);
            let px = x0 + (index % window_w) as u32;
            let py = y0 + (index / window_w) as u32;
            let jitter_x: f32 = rng.gen_range(-0.5..0.5);
            let jitter_y: f32 = rng.gen_range(-0.5..0.5);
            clip.clamp_point(Vec2::new(px as f32 + jitter_x, py as f32 + jitter_y))
        })
        .collect()
}
