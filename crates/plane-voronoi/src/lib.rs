//! Clipped planar Voronoi diagrams.
//!
//! This crate computes Voronoi cells for point sites inside an
//! axis-aligned clip rectangle using nearest-first half-plane clipping:
//! every cell starts as the full rectangle and is cut by the
//! perpendicular bisector of its site and each neighboring site, in
//! order of increasing distance, until no farther site can still
//! intersect the cell.
//!
//! Compared with building a Delaunay triangulation and taking its dual,
//! this construction has no degenerate-triangle cases: cocircular or
//! collinear sites simply produce the same cuts.
//!
//! # Example
//!
//! ```
//! use glam::Vec2;
//! use plane_voronoi::{compute, ClipRect};
//!
//! let sites = vec![
//!     Vec2::new(25.0, 25.0),
//!     Vec2::new(75.0, 25.0),
//!     Vec2::new(50.0, 75.0),
//! ];
//! let diagram = compute(&sites, ClipRect::new(0.0, 0.0, 100.0, 100.0)).unwrap();
//! assert_eq!(diagram.cells().len(), 3);
//! ```

mod clip;
mod diagram;
mod error;
mod grid;
mod lloyd;
mod types;

pub use diagram::Diagram;
pub use error::VoronoiError;
pub use lloyd::relax;
pub use types::{polygon_centroid, polygon_signed_area, Cell, ClipRect};

use glam::Vec2;

/// Configuration for Voronoi computation.
#[derive(Debug, Clone)]
pub struct VoronoiConfig {
    /// Vertices closer than this are merged when checking cell validity.
    /// Cells with fewer than three distinct vertices after merging are
    /// dropped from the diagram.
    pub merge_epsilon: f32,
}

impl Default for VoronoiConfig {
    fn default() -> Self {
        Self {
            merge_epsilon: 1e-4,
        }
    }
}

/// Compute a clipped Voronoi diagram with default settings.
///
/// Cells are returned in site order; sites whose cell degenerates to
/// fewer than three distinct vertices are omitted. Each surviving
/// [`Cell`] records the index of its site.
///
/// Errors are reserved for invalid inputs: an empty site list, a
/// zero-area clip rectangle, or a non-finite site coordinate.
pub fn compute(sites: &[Vec2], clip: ClipRect) -> Result<Diagram, VoronoiError> {
    compute_with(sites, clip, &VoronoiConfig::default())
}

/// Compute a clipped Voronoi diagram with explicit configuration.
pub fn compute_with(
    sites: &[Vec2],
    clip: ClipRect,
    config: &VoronoiConfig,
) -> Result<Diagram, VoronoiError> {
    if sites.is_empty() {
        return Err(VoronoiError::NoSites);
    }
    if !clip.is_valid() {
        return Err(VoronoiError::EmptyClipRect {
            width: clip.width(),
            height: clip.height(),
        });
    }
    if let Some(index) = sites.iter().position(|s| !s.is_finite()) {
        return Err(VoronoiError::NonFiniteSite(index));
    }

    Ok(diagram::build(sites, clip, config))
}
