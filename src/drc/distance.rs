//! Distance and facing-pair helpers for DRC
//!
//! Closest-approach calculations between edges, and the facing-pair
//! predicate (antiparallel directions with overlapping projections) that
//! width, spacing, and notch checks share.

use crate::geometry::{segment_intersection, Edge};

/// Minimum distance between two edges plus the closest point on each
pub fn closest_approach(a: &Edge, b: &Edge) -> (f64, [f64; 2], [f64; 2]) {
    if let Some(p) = segment_intersection(a.p1, a.p2, b.p1, b.p2) {
        let fp = p.to_f64();
        return (0.0, fp, fp);
    }

    let fa1 = a.p1.to_f64();
    let fa2 = a.p2.to_f64();
    let fb1 = b.p1.to_f64();
    let fb2 = b.p2.to_f64();

    let mut best = (f64::MAX, [0.0; 2], [0.0; 2]);
    for (p, s1, s2, p_on_a) in [
        (fa1, fb1, fb2, true),
        (fa2, fb1, fb2, true),
        (fb1, fa1, fa2, false),
        (fb2, fa1, fa2, false),
    ] {
        let (d, q) = point_segment_closest(p, s1, s2);
        if d < best.0 {
            best = if p_on_a { (d, p, q) } else { (d, q, p) };
        }
    }
    best
}

/// Point-to-segment distance with the closest point on the segment
pub fn point_segment_closest(p: [f64; 2], a: [f64; 2], b: [f64; 2]) -> (f64, [f64; 2]) {
    let ab = [b[0] - a[0], b[1] - a[1]];
    let ap = [p[0] - a[0], p[1] - a[1]];
    let ab_len2 = ab[0] * ab[0] + ab[1] * ab[1];

    if ab_len2 == 0.0 {
        // Degenerate segment
        return ((ap[0] * ap[0] + ap[1] * ap[1]).sqrt(), a);
    }

    let t = ((ap[0] * ab[0] + ap[1] * ab[1]) / ab_len2).clamp(0.0, 1.0);
    let closest = [a[0] + t * ab[0], a[1] + t * ab[1]];
    let dx = p[0] - closest[0];
    let dy = p[1] - closest[1];
    ((dx * dx + dy * dy).sqrt(), closest)
}

/// True iff two edges face each other: antiparallel directions and
/// overlapping projections along the first edge's direction
pub fn edges_facing(a: &Edge, b: &Edge) -> bool {
    let da = a.delta();
    let db = b.delta();
    let la = (da[0] * da[0] + da[1] * da[1]).sqrt();
    let lb = (db[0] * db[0] + db[1] * db[1]).sqrt();
    if la == 0.0 || lb == 0.0 {
        return false;
    }
    let dot = (da[0] * db[0] + da[1] * db[1]) / (la * lb);
    if dot >= -1e-9 {
        return false;
    }

    // Projection intervals along a's direction
    let u = [da[0] / la, da[1] / la];
    let proj = |p: [f64; 2]| p[0] * u[0] + p[1] * u[1];
    let (a_lo, a_hi) = minmax(proj(a.p1.to_f64()), proj(a.p2.to_f64()));
    let (b_lo, b_hi) = minmax(proj(b.p1.to_f64()), proj(b.p2.to_f64()));
    a_lo.max(b_lo) < a_hi.min(b_hi)
}

/// Unit normal of an edge (left of travel)
pub fn edge_normal(e: &Edge) -> [f64; 2] {
    let d = e.delta();
    let len = (d[0] * d[0] + d[1] * d[1]).sqrt();
    if len == 0.0 {
        return [0.0, 0.0];
    }
    [-d[1] / len, d[0] / len]
}

fn minmax(a: f64, b: f64) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    #[test]
    fn test_closest_approach_parallel() {
        let a = Edge::new(Point::new(0, 0), Point::new(10, 0));
        let b = Edge::new(Point::new(0, 5), Point::new(10, 5));
        let (d, pa, pb) = closest_approach(&a, &b);
        assert_eq!(d, 5.0);
        assert_eq!(pa[1], 0.0);
        assert_eq!(pb[1], 5.0);
    }

    #[test]
    fn test_closest_approach_crossing() {
        let a = Edge::new(Point::new(0, 0), Point::new(10, 10));
        let b = Edge::new(Point::new(0, 10), Point::new(10, 0));
        let (d, _, _) = closest_approach(&a, &b);
        assert_eq!(d, 0.0);
    }

    #[test]
    fn test_edges_facing() {
        // Opposite edges of a CCW rectangle face each other
        let bottom = Edge::new(Point::new(0, 0), Point::new(10, 0));
        let top = Edge::new(Point::new(10, 5), Point::new(0, 5));
        assert!(edges_facing(&bottom, &top));

        // Perpendicular edges never face
        let right = Edge::new(Point::new(10, 0), Point::new(10, 5));
        assert!(!edges_facing(&bottom, &right));

        // Antiparallel but laterally disjoint: no projection overlap
        let far = Edge::new(Point::new(30, 5), Point::new(20, 5));
        assert!(!edges_facing(&bottom, &far));
    }

    #[test]
    fn test_edge_normal() {
        let e = Edge::new(Point::new(0, 0), Point::new(10, 0));
        assert_eq!(edge_normal(&e), [0.0, 1.0]);
    }
}
