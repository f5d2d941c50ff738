//! Convex polygon clipping against a half-plane.

use glam::Vec2;

/// Clip a convex polygon to the half-plane of points at least as close
/// to `site` as to `other` (the side of the perpendicular bisector
/// containing `site`).
///
/// Sutherland-Hodgman against the single bisector edge. The input
/// polygon must be convex; the output is convex and keeps the input
/// orientation. Returns an empty polygon when everything is cut away.
pub(crate) fn clip_by_bisector(polygon: &[Vec2], site: Vec2, other: Vec2) -> Vec<Vec2> {
    let normal = other - site;
    let mid = (site + other) * 0.5;

    // Signed distance along the bisector normal; <= 0 is the kept side.
    let side = |p: Vec2| -> f32 { (p - mid).dot(normal) };

    let n = polygon.len();
    let mut out = Vec::with_capacity(n + 1);
    for i in 0..n {
        let current = polygon[i];
        let next = polygon[(i + 1) % n];
        let dc = side(current);
        let dn = side(next);

        if dc <= 0.0 {
            out.push(current);
            if dn > 0.0 {
                out.push(intersect(current, next, dc, dn));
            }
        } else if dn <= 0.0 {
            out.push(intersect(current, next, dc, dn));
        }
    }
    out
}

/// Intersection of segment `a..b` with the bisector, from the signed
/// distances of its endpoints.
fn intersect(a: Vec2, b: Vec2, da: f32, db: f32) -> Vec2 {
    let t = da / (da - db);
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Vec<Vec2> {
        vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ]
    }

    #[test]
    fn bisector_halves_the_square() {
        // Sites left and right of center: bisector is the vertical midline.
        let clipped = clip_by_bisector(&unit_square(), Vec2::new(0.25, 0.5), Vec2::new(0.75, 0.5));
        assert_eq!(clipped.len(), 4);
        for v in &clipped {
            assert!(v.x <= 0.5 + 1e-6, "kept side must be x <= 0.5, got {}", v.x);
        }
    }

    #[test]
    fn far_site_leaves_polygon_untouched() {
        let square = unit_square();
        let clipped = clip_by_bisector(&square, Vec2::new(0.5, 0.5), Vec2::new(50.0, 0.5));
        assert_eq!(clipped, square);
    }

    #[test]
    fn engulfing_site_cuts_everything() {
        // `other` is on top of the polygon while `site` is far away.
        let clipped = clip_by_bisector(&unit_square(), Vec2::new(50.0, 0.5), Vec2::new(0.5, 0.5));
        assert!(clipped.is_empty());
    }

    #[test]
    fn diagonal_cut_halves_the_square() {
        let clipped = clip_by_bisector(&unit_square(), Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0));
        // Corners on the bisector may duplicate; shape is what matters.
        let area = crate::types::polygon_signed_area(&clipped).abs();
        assert!((area - 0.5).abs() < 1e-6, "area {}", area);
        for v in &clipped {
            assert!(v.x + v.y <= 1.0 + 1e-6, "vertex {:?} on the wrong side", v);
        }
    }
}
