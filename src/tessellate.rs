//! Tessellation stage: seeds to Voronoi cells.
//!
//! Thin adapter over the `plane-voronoi` crate. Lloyd relaxation
//! mutates the seed set in place (the only mutation seeds ever see),
//! then the final diagram is computed against the clip rectangle.

use glam::Vec2;
pub use plane_voronoi::{Cell as VoronoiCell, ClipRect};

use crate::error::PipelineError;

/// Relax `seeds` for `passes` Lloyd iterations, then tessellate.
///
/// Cells come back in seed order; seeds whose cell degenerated are
/// dropped silently and left unmoved by relaxation.
pub fn tessellate(
    seeds: &mut [Vec2],
    clip: ClipRect,
    passes: u32,
) -> Result<Vec<VoronoiCell>, PipelineError> {
    plane_voronoi::relax(seeds, clip, passes)?;
    let diagram = plane_voronoi::compute(seeds, clip)?;
    Ok(diagram.into_cells())
}
