//! Partition correctness over randomized inputs.

use glam::Vec2;
use plane_voronoi::{compute, ClipRect};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn random_sites(count: usize, clip: ClipRect, seed: u64) -> Vec<Vec2> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            Vec2::new(
                rng.gen_range(clip.min_x..clip.max_x),
                rng.gen_range(clip.min_y..clip.max_y),
            )
        })
        .collect()
}

/// Point-in-convex-polygon for counter-clockwise polygons.
fn inside(polygon: &[Vec2], p: Vec2, tolerance: f32) -> bool {
    let n = polygon.len();
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];
        let edge = b - a;
        let cross = edge.x * (p.y - a.y) - edge.y * (p.x - a.x);
        if cross < -tolerance {
            return false;
        }
    }
    true
}

#[test]
fn areas_sum_to_clip_area() {
    let clip = ClipRect::new(0.0, 0.0, 640.0, 480.0);
    for seed in 0..4u64 {
        let sites = random_sites(300, clip, seed);
        let diagram = compute(&sites, clip).unwrap();
        let total = diagram.total_area();
        assert!(
            (total - clip.area()).abs() < clip.area() * 1e-3,
            "seed {}: areas sum to {} but clip area is {}",
            seed,
            total,
            clip.area()
        );
    }
}

#[test]
fn every_cell_has_at_least_three_vertices() {
    let clip = ClipRect::new(0.0, 0.0, 200.0, 200.0);
    let sites = random_sites(500, clip, 7);
    let diagram = compute(&sites, clip).unwrap();
    for cell in diagram.cells() {
        assert!(
            cell.polygon.len() >= 3,
            "cell {} has only {} vertices",
            cell.index,
            cell.polygon.len()
        );
    }
}

#[test]
fn lattice_points_land_in_their_nearest_site_cell() {
    let clip = ClipRect::new(0.0, 0.0, 100.0, 100.0);
    let sites = random_sites(50, clip, 11);
    let diagram = compute(&sites, clip).unwrap();

    let mut rng = ChaCha8Rng::seed_from_u64(99);
    for _ in 0..400 {
        let p = Vec2::new(rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0));
        let nearest = (0..sites.len())
            .min_by(|&a, &b| {
                sites[a]
                    .distance_squared(p)
                    .total_cmp(&sites[b].distance_squared(p))
            })
            .unwrap();
        // Skip points essentially equidistant to two sites; ownership
        // there is legitimately ambiguous at float precision.
        let mut distances: Vec<f32> = sites.iter().map(|s| s.distance(p)).collect();
        distances.sort_by(f32::total_cmp);
        if distances[1] - distances[0] < 1e-2 {
            continue;
        }
        let cell = diagram
            .cells()
            .iter()
            .find(|c| c.index == nearest)
            .expect("nearest site's cell must exist");
        assert!(
            inside(&cell.polygon, p, 1e-2),
            "point {:?} not inside cell of its nearest site {}",
            p,
            nearest
        );
    }
}

#[test]
fn cell_ordering_matches_site_ordering() {
    let clip = ClipRect::new(0.0, 0.0, 300.0, 300.0);
    let sites = random_sites(120, clip, 3);
    let diagram = compute(&sites, clip).unwrap();
    let indices: Vec<usize> = diagram.cells().iter().map(|c| c.index).collect();
    let mut sorted = indices.clone();
    sorted.sort_unstable();
    assert_eq!(indices, sorted, "cells must keep ascending site order");
}
