//! Seed point generation.
//!
//! Seeds become Voronoi sites. Three strategies:
//!
//! - uniform: independent uniform samples over the clip rectangle
//! - poisson: Bridson Poisson-disk sampling for even spacing
//! - edge-weighted: density follows the edge map, so detail-heavy
//!   regions get more (and therefore smaller) cells
//!
//! All strategies draw from the caller's seeded RNG; identical
//! settings produce identical seed sets.

mod poisson;
mod weighted;

use glam::Vec2;
use plane_voronoi::ClipRect;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::edges::EdgeMap;

/// Seed placement strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PointDistribution {
    Uniform,
    #[default]
    Poisson,
    EdgeWeighted,
}

/// Parameters of the seed stage.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedOptions {
    /// Number of seeds to emit. The output always has exactly this
    /// many points.
    pub count: usize,
    pub distribution: PointDistribution,
    /// Blend between uniform (0) and fully edge-driven (1) weighting;
    /// only used by [`PointDistribution::EdgeWeighted`].
    pub edge_influence: f32,
}

/// Generate exactly `options.count` seed points inside `clip`.
///
/// The edge map is addressed in full-image coordinates; when `clip` is
/// the inner artwork rectangle the weighted strategy samples only its
/// window. An edge-weighted request without an edge map falls back to
/// uniform placement.
pub fn generate(
    options: &SeedOptions,
    clip: ClipRect,
    edge_map: Option<&EdgeMap>,
    rng: &mut ChaCha8Rng,
) -> Vec<Vec2> {
    let points = match options.distribution {
        PointDistribution::Uniform => uniform(options.count, clip, rng),
        PointDistribution::Poisson => poisson::generate(options.count, clip, rng),
        PointDistribution::EdgeWeighted => match edge_map {
            Some(map) => weighted::generate(options.count, clip, map, options.edge_influence, rng),
            None => uniform(options.count, clip, rng),
        },
    };
    debug_assert_eq!(points.len(), options.count);
    debug_assert!(points.iter().all(|&p| clip.contains(p)));
    points
}

/// Independent uniform samples over the rectangle.
pub(crate) fn uniform(count: usize, clip: ClipRect, rng: &mut ChaCha8Rng) -> Vec<Vec2> {
    (0..count)
        .map(|_| {
            Vec2::new(
                rng.gen_range(clip.min_x..clip.max_x),
                rng.gen_range(clip.min_y..clip.max_y),
            )
        })
        .collect()
}
