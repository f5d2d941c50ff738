//! Lloyd relaxation over clipped Voronoi cells.

use glam::Vec2;

use crate::types::ClipRect;
use crate::{compute, VoronoiError};

/// Movement factor per pass. Full-step movement (factor 1.0)
/// oscillates on small site sets, so sites keep 30% of their position.
const KEEP: f32 = 0.3;
const PULL: f32 = 0.7;

/// Run `passes` Lloyd relaxation passes over `sites` in place.
///
/// Each pass recomputes the diagram and moves every surviving site
/// toward its cell centroid: `p' = 0.3·p + 0.7·centroid`. Sites whose
/// cell was dropped stay where they are. Moved sites are clamped into
/// the clip rectangle.
pub fn relax(sites: &mut [Vec2], clip: ClipRect, passes: u32) -> Result<(), VoronoiError> {
    for _ in 0..passes {
        let diagram = compute(sites, clip)?;
        for cell in diagram.cells() {
            let p = sites[cell.index];
            sites[cell.index] = clip.clamp_point(p * KEEP + cell.centroid * PULL);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relaxation_is_non_expansive() {
        let clip = ClipRect::new(0.0, 0.0, 100.0, 100.0);
        let mut sites = vec![
            Vec2::new(1.0, 1.0),
            Vec2::new(2.0, 1.5),
            Vec2::new(99.0, 99.0),
            Vec2::new(50.0, 10.0),
        ];
        let before = sites.clone();
        let diagram = compute(&sites, clip).unwrap();

        relax(&mut sites, clip, 1).unwrap();

        for cell in diagram.cells() {
            let moved = before[cell.index].distance(sites[cell.index]);
            let diameter = cell.max_vertex_distance(cell.centroid) * 2.0;
            assert!(
                moved <= diameter,
                "site {} moved {} which exceeds its cell diameter {}",
                cell.index,
                moved,
                diameter
            );
        }
    }

    #[test]
    fn zero_passes_leave_sites_unchanged() {
        let clip = ClipRect::new(0.0, 0.0, 10.0, 10.0);
        let mut sites = vec![Vec2::new(2.0, 2.0), Vec2::new(8.0, 8.0)];
        let before = sites.clone();
        relax(&mut sites, clip, 0).unwrap();
        assert_eq!(sites, before);
    }

    #[test]
    fn relaxation_spreads_clustered_sites() {
        let clip = ClipRect::new(0.0, 0.0, 100.0, 100.0);
        let mut sites = vec![
            Vec2::new(49.0, 50.0),
            Vec2::new(51.0, 50.0),
            Vec2::new(50.0, 49.0),
            Vec2::new(50.0, 51.0),
        ];
        let spread_before = mean_pairwise_distance(&sites);
        relax(&mut sites, clip, 3).unwrap();
        let spread_after = mean_pairwise_distance(&sites);
        assert!(
            spread_after > spread_before,
            "relaxation should spread clustered sites: {} -> {}",
            spread_before,
            spread_after
        );
    }

    fn mean_pairwise_distance(sites: &[Vec2]) -> f32 {
        let mut sum = 0.0;
        let mut count = 0;
        for i in 0..sites.len() {
            for j in (i + 1)..sites.len() {
                sum += sites[i].distance(sites[j]);
                count += 1;
            }
        }
        sum / count as f32
    }
}
