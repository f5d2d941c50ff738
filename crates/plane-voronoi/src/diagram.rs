//! Cell construction and the diagram container.

use glam::Vec2;
use rayon::prelude::*;

use crate::clip::clip_by_bisector;
use crate::grid::SiteGrid;
use crate::types::{polygon_centroid, Cell, ClipRect};
use crate::VoronoiConfig;

/// A computed Voronoi diagram: surviving cells in site order.
#[derive(Debug, Clone)]
pub struct Diagram {
    clip: ClipRect,
    cells: Vec<Cell>,
}

impl Diagram {
    /// The cells, ordered by site index. Sites whose cell degenerated
    /// are absent; use [`Cell::index`] to map back to the input.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Consume the diagram, yielding its cells.
    pub fn into_cells(self) -> Vec<Cell> {
        self.cells
    }

    /// The clip rectangle the diagram was computed against.
    pub fn clip(&self) -> ClipRect {
        self.clip
    }

    /// Total area of all cells. Equals the clip rectangle area up to
    /// numerical tolerance when no cell was dropped.
    pub fn total_area(&self) -> f32 {
        self.cells.iter().map(Cell::area).sum()
    }
}

pub(crate) fn build(sites: &[Vec2], clip: ClipRect, config: &VoronoiConfig) -> Diagram {
    let grid = SiteGrid::build(sites, clip);

    let cells: Vec<Cell> = (0..sites.len())
        .into_par_iter()
        .filter_map(|i| build_cell(i, sites, clip, &grid, config))
        .collect();

    Diagram { clip, cells }
}

/// Build the cell of site `i` by clipping the rectangle against the
/// bisectors of nearby sites, nearest first.
///
/// Termination: once every site in the next ring is farther than twice
/// the farthest current cell vertex, its bisector lies entirely
/// outside the cell and clipping is complete.
fn build_cell(
    i: usize,
    sites: &[Vec2],
    clip: ClipRect,
    grid: &SiteGrid,
    config: &VoronoiConfig,
) -> Option<Cell> {
    let site = sites[i];
    let mut polygon = clip.corners();
    let mut ring_sites: Vec<usize> = Vec::new();
    let mut ordered: Vec<(f32, usize)> = Vec::new();

    for k in 0..=grid.max_ring() {
        if k >= 2 {
            let ring_lower_bound = (k - 1) as f32 * grid.cell_size();
            if ring_lower_bound > 2.0 * max_vertex_distance(&polygon, site) {
                break;
            }
        }

        grid.ring(site, k, &mut ring_sites);
        ordered.clear();
        for &j in &ring_sites {
            if j != i {
                ordered.push((site.distance_squared(sites[j]), j));
            }
        }
        ordered.sort_unstable_by(|a, b| a.0.total_cmp(&b.0));

        for &(d2, j) in &ordered {
            if d2 == 0.0 {
                // Coincident sites: the lower index keeps the cell.
                if j < i {
                    return None;
                }
                continue;
            }
            let reach = 2.0 * max_vertex_distance(&polygon, site);
            if d2.sqrt() > reach {
                // Sites in this ring are sorted; the rest are farther.
                break;
            }
            polygon = clip_by_bisector(&polygon, site, sites[j]);
            if polygon.len() < 3 {
                return None;
            }
        }
    }

    let polygon = dedup_vertices(polygon, config.merge_epsilon);
    if polygon.len() < 3 {
        return None;
    }
    let centroid = polygon_centroid(&polygon);
    Some(Cell {
        index: i,
        polygon,
        centroid,
    })
}

fn max_vertex_distance(polygon: &[Vec2], from: Vec2) -> f32 {
    polygon
        .iter()
        .map(|v| v.distance(from))
        .fold(0.0, f32::max)
}

/// Remove consecutive vertices closer than `epsilon` (including the
/// closing wrap-around pair).
fn dedup_vertices(polygon: Vec<Vec2>, epsilon: f32) -> Vec<Vec2> {
    let mut out: Vec<Vec2> = Vec::with_capacity(polygon.len());
    for v in polygon {
        if out.last().map_or(true, |last| last.distance(v) > epsilon) {
            out.push(v);
        }
    }
    while out.len() >= 2 && out[0].distance(*out.last().unwrap()) <= epsilon {
        out.pop();
    }
    out
}
