//! Low-level geometric primitives on point rings
//!
//! Pure functions over point sequences: signed area, orientation and
//! closure normalization, containment, segment intersection and distance.
//! Rings are treated as explicitly closed (first point repeated at the
//! end); functions tolerate open input where noted.
//!
//! All predicates that can be decided in integer arithmetic are, so
//! results are exact for any i32 coordinates. Distances are f64.

use super::types::{Edge, Point};

/// Doubled signed area of a ring (shoelace sum), exact for i32 coordinates.
///
/// Positive for counter-clockwise winding, negative for clockwise, zero
/// for degenerate rings. The i128 accumulator cannot overflow: each cross
/// term fits in i64 and ring lengths are bounded by memory.
pub fn signed_area2(ring: &[Point]) -> i128 {
    let mut sum: i128 = 0;
    for (a, b) in ring_segments(ring) {
        sum += (a.x as i64 as i128) * (b.y as i64 as i128)
            - (b.x as i64 as i128) * (a.y as i64 as i128);
    }
    sum
}

/// Signed area as f64: positive CCW, negative CW
pub fn signed_area(ring: &[Point]) -> f64 {
    signed_area2(ring) as f64 / 2.0
}

/// Absolute area of a ring
pub fn area(ring: &[Point]) -> f64 {
    signed_area(ring).abs()
}

/// Reverses the ring if its winding is clockwise, producing the CCW form
pub fn ensure_ccw(ring: &mut Vec<Point>) {
    if signed_area2(ring) < 0 {
        ring.reverse();
    }
}

/// Appends the first point if the ring is not explicitly closed
pub fn ensure_closed(ring: &mut Vec<Point>) {
    if let (Some(&first), Some(&last)) = (ring.first(), ring.last()) {
        if first != last {
            ring.push(first);
        }
    }
}

/// True iff every edge of the ring is axis-aligned
pub fn is_manhattan(ring: &[Point]) -> bool {
    ring_segments(ring).all(|(a, b)| a.x == b.x || a.y == b.y)
}

/// One edge per consecutive point pair.
///
/// For an explicitly closed n-point ring this yields n-1 edges; no
/// synthetic wrap-around edge is added beyond what closure encodes.
pub fn edges(ring: &[Point]) -> Vec<Edge> {
    ring.windows(2).map(|w| Edge::new(w[0], w[1])).collect()
}

/// Even-odd containment test.
///
/// Points exactly on the boundary count as inside; this is detected with
/// exact integer cross products before the ray cast, so enclosure checks
/// see a contained polygon as contained even when it touches the outer
/// boundary.
pub fn point_in_polygon(p: Point, ring: &[Point]) -> bool {
    if ring.len() < 2 {
        return ring.first() == Some(&p);
    }
    for (a, b) in ring_segments(ring) {
        if point_on_segment(p, a, b) {
            return true;
        }
    }
    let mut inside = false;
    for (a, b) in ring_segments(ring) {
        if (a.y > p.y) != (b.y > p.y) {
            let d = (b.y as i64) - (a.y as i64);
            // p.x < x-intercept of the edge at height p.y, cross-multiplied
            let cross = ((b.x as i64) - (a.x as i64)) * ((p.y as i64) - (a.y as i64))
                - ((p.x as i64) - (a.x as i64)) * ((b.y as i64) - (a.y as i64));
            if (d > 0 && cross > 0) || (d < 0 && cross < 0) {
                inside = !inside;
            }
        }
    }
    inside
}

/// Proper crossing point of two finite segments.
///
/// Returns the intersection only when it lies strictly inside both
/// parametric ranges; parallel, collinear, touching, and non-crossing
/// pairs yield `None`. The crossing predicate is integer-exact; the
/// returned point is rounded to the grid.
pub fn segment_intersection(a1: Point, a2: Point, b1: Point, b2: Point) -> Option<Point> {
    let d1x = (a2.x as i64) - (a1.x as i64);
    let d1y = (a2.y as i64) - (a1.y as i64);
    let d2x = (b2.x as i64) - (b1.x as i64);
    let d2y = (b2.y as i64) - (b1.y as i64);

    let mut denom = (d1x as i128) * (d2y as i128) - (d1y as i128) * (d2x as i128);
    if denom == 0 {
        return None;
    }

    let ex = (b1.x as i64) - (a1.x as i64);
    let ey = (b1.y as i64) - (a1.y as i64);
    let mut tn = (ex as i128) * (d2y as i128) - (ey as i128) * (d2x as i128);
    let mut un = (ex as i128) * (d1y as i128) - (ey as i128) * (d1x as i128);
    if denom < 0 {
        denom = -denom;
        tn = -tn;
        un = -un;
    }
    if tn <= 0 || tn >= denom || un <= 0 || un >= denom {
        return None;
    }

    let t = tn as f64 / denom as f64;
    let x = (a1.x as f64) + t * (d1x as f64);
    let y = (a1.y as f64) + t * (d1y as f64);
    Some(Point::new(x.round() as i32, y.round() as i32))
}

/// Minimum Euclidean distance between two finite segments
pub fn segment_distance(a1: Point, a2: Point, b1: Point, b2: Point) -> f64 {
    if segment_intersection(a1, a2, b1, b2).is_some() {
        return 0.0;
    }
    let fa1 = a1.to_f64();
    let fa2 = a2.to_f64();
    let fb1 = b1.to_f64();
    let fb2 = b2.to_f64();
    point_segment_distance(fa1, fb1, fb2)
        .min(point_segment_distance(fa2, fb1, fb2))
        .min(point_segment_distance(fb1, fa1, fa2))
        .min(point_segment_distance(fb2, fa1, fa2))
}

/// Point-to-segment minimum distance in f64 coordinates
pub fn point_segment_distance(p: [f64; 2], a: [f64; 2], b: [f64; 2]) -> f64 {
    let ab = [b[0] - a[0], b[1] - a[1]];
    let ap = [p[0] - a[0], p[1] - a[1]];
    let ab_len2 = ab[0] * ab[0] + ab[1] * ab[1];

    if ab_len2 == 0.0 {
        // Degenerate segment
        return (ap[0] * ap[0] + ap[1] * ap[1]).sqrt();
    }

    let t = ((ap[0] * ab[0] + ap[1] * ab[1]) / ab_len2).clamp(0.0, 1.0);
    let dx = p[0] - (a[0] + t * ab[0]);
    let dy = p[1] - (a[1] + t * ab[1]);
    (dx * dx + dy * dy).sqrt()
}

/// True iff `p` lies on the closed segment `[a, b]`, integer-exact
pub fn point_on_segment(p: Point, a: Point, b: Point) -> bool {
    let cross = ((b.x as i64) - (a.x as i64)) * ((p.y as i64) - (a.y as i64))
        - ((b.y as i64) - (a.y as i64)) * ((p.x as i64) - (a.x as i64));
    if cross != 0 {
        return false;
    }
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

/// Consecutive point pairs of a ring, wrapping only when the ring is open
fn ring_segments(ring: &[Point]) -> impl Iterator<Item = (Point, Point)> + '_ {
    let wrap = ring.len() >= 2 && ring.first() != ring.last();
    ring.windows(2)
        .map(|w| (w[0], w[1]))
        .chain(wrap.then(|| (*ring.last().unwrap(), ring[0])))
}
