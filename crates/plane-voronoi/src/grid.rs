//! Uniform bucket grid over the sites.
//!
//! Neighbor queries walk outward in square rings around a site's
//! bucket. Ring `k` holds every bucket at Chebyshev distance `k`, so
//! any site in ring `k` is at least `(k - 1) * cell_size` away from
//! the query site. That lower bound drives the clipping termination
//! test in [`crate::diagram`].

use glam::Vec2;
use rustc_hash::FxHashMap;

use crate::types::ClipRect;

pub(crate) struct SiteGrid {
    cell_size: f32,
    cols: i32,
    rows: i32,
    origin: Vec2,
    buckets: FxHashMap<(i32, i32), Vec<usize>>,
}

impl SiteGrid {
    /// Build a grid sized for roughly one site per bucket.
    pub fn build(sites: &[Vec2], clip: ClipRect) -> Self {
        let target = (sites.len() as f32).sqrt().max(1.0);
        let cell_size = (clip.width().max(clip.height()) / target).max(1e-3);
        let cols = (clip.width() / cell_size).ceil().max(1.0) as i32;
        let rows = (clip.height() / cell_size).ceil().max(1.0) as i32;

        let origin = Vec2::new(clip.min_x, clip.min_y);
        let mut buckets: FxHashMap<(i32, i32), Vec<usize>> = FxHashMap::default();
        for (index, site) in sites.iter().enumerate() {
            let key = bucket_of(*site, origin, cell_size, cols, rows);
            buckets.entry(key).or_default().push(index);
        }

        Self {
            cell_size,
            cols,
            rows,
            origin,
            buckets,
        }
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Largest ring index that can contain any bucket.
    pub fn max_ring(&self) -> i32 {
        self.cols.max(self.rows)
    }

    /// Collect site indices in ring `k` around `site` (ring 0 is the
    /// site's own bucket). Out-of-range buckets are skipped.
    pub fn ring(&self, site: Vec2, k: i32, out: &mut Vec<usize>) {
        out.clear();
        let (cx, cy) = bucket_of(site, self.origin, self.cell_size, self.cols, self.rows);
        if k == 0 {
            if let Some(b) = self.buckets.get(&(cx, cy)) {
                out.extend_from_slice(b);
            }
            return;
        }
        for dx in -k..=k {
            for dy in -k..=k {
                if dx.abs() != k && dy.abs() != k {
                    continue;
                }
                let key = (cx + dx, cy + dy);
                if key.0 < 0 || key.1 < 0 || key.0 >= self.cols || key.1 >= self.rows {
                    continue;
                }
                if let Some(b) = self.buckets.get(&key) {
                    out.extend_from_slice(b);
                }
            }
        }
    }
}

fn bucket_of(p: Vec2, origin: Vec2, cell_size: f32, cols: i32, rows: i32) -> (i32, i32) {
    let x = (((p.x - origin.x) / cell_size) as i32).clamp(0, cols - 1);
    let y = (((p.y - origin.y) / cell_size) as i32).clamp(0, rows - 1);
    (x, y)
}
