//! Convex polygon clipping
//!
//! Sutherland–Hodgman clipping of an arbitrary (possibly concave) subject
//! ring against a convex, counter-clockwise clip ring. The subject is
//! clipped against each clip edge's half-plane in turn.
//!
//! This is a public primitive for convex-mask intersection; the general
//! Boolean engine in `region::boolean` handles concave/concave operand
//! combinations and does not reuse this routine.

use super::types::Point;

/// Clips `subject` against the convex CCW ring `clip`.
///
/// Both rings may be open or explicitly closed. Returns the resulting
/// open vertex list, or `None` when the polygons do not overlap; callers
/// close the ring before computing area.
pub fn clip_polygon(subject: &[Point], clip: &[Point]) -> Option<Vec<Point>> {
    let subject = open_ring(subject);
    let clip = open_ring(clip);
    if subject.len() < 3 || clip.len() < 3 {
        return None;
    }

    let mut output: Vec<[f64; 2]> = subject.iter().map(|p| p.to_f64()).collect();

    let n = clip.len();
    for i in 0..n {
        if output.is_empty() {
            break;
        }
        let e1 = clip[i].to_f64();
        let e2 = clip[(i + 1) % n].to_f64();

        let input = output;
        output = Vec::new();

        let m = input.len();
        for j in 0..m {
            let current = input[j];
            let next = input[(j + 1) % m];

            let current_inside = is_inside(current, e1, e2);
            let next_inside = is_inside(next, e1, e2);

            if current_inside {
                output.push(current);
                if !next_inside {
                    // Exiting the half-plane
                    if let Some(p) = line_intersection(current, next, e1, e2) {
                        output.push(p);
                    }
                }
            } else if next_inside {
                // Entering the half-plane
                if let Some(p) = line_intersection(current, next, e1, e2) {
                    output.push(p);
                }
            }
        }
    }

    let mut result: Vec<Point> = output
        .iter()
        .map(|p| Point::new(p[0].round() as i32, p[1].round() as i32))
        .collect();
    result.dedup();
    if result.len() >= 2 && result.first() == result.last() {
        result.pop();
    }

    if result.len() < 3 {
        None
    } else {
        Some(result)
    }
}

/// Point on the left side (inside) of a directed clip edge
#[inline]
fn is_inside(p: [f64; 2], e1: [f64; 2], e2: [f64; 2]) -> bool {
    (e2[0] - e1[0]) * (p[1] - e1[1]) - (e2[1] - e1[1]) * (p[0] - e1[0]) >= 0.0
}

/// Intersection of the infinite lines through (p1,p2) and (p3,p4)
fn line_intersection(p1: [f64; 2], p2: [f64; 2], p3: [f64; 2], p4: [f64; 2]) -> Option<[f64; 2]> {
    let d1x = p2[0] - p1[0];
    let d1y = p2[1] - p1[1];
    let d2x = p4[0] - p3[0];
    let d2y = p4[1] - p3[1];

    let denom = d1x * d2y - d1y * d2x;
    if denom == 0.0 {
        return None;
    }
    let t = ((p3[0] - p1[0]) * d2y - (p3[1] - p1[1]) * d2x) / denom;
    Some([p1[0] + t * d1x, p1[1] + t * d1y])
}

/// Strips the explicit closing point if present
fn open_ring(ring: &[Point]) -> &[Point] {
    if ring.len() >= 2 && ring.first() == ring.last() {
        &ring[..ring.len() - 1]
    } else {
        ring
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::primitives::{area, ensure_closed};

    fn rect(x1: i32, y1: i32, x2: i32, y2: i32) -> Vec<Point> {
        vec![
            Point::new(x1, y1),
            Point::new(x2, y1),
            Point::new(x2, y2),
            Point::new(x1, y2),
        ]
    }

    fn closed_area(mut ring: Vec<Point>) -> f64 {
        ensure_closed(&mut ring);
        area(&ring)
    }

    #[test]
    fn test_clip_overlapping_squares() {
        let result = clip_polygon(&rect(0, 0, 100, 100), &rect(50, 50, 150, 150)).unwrap();
        assert_eq!(closed_area(result), 2500.0);
    }

    #[test]
    fn test_clip_no_overlap() {
        assert!(clip_polygon(&rect(0, 0, 10, 10), &rect(20, 0, 30, 10)).is_none());
    }

    #[test]
    fn test_clip_subject_contained() {
        let result = clip_polygon(&rect(10, 10, 20, 20), &rect(0, 0, 100, 100)).unwrap();
        assert_eq!(closed_area(result), 100.0);
    }

    #[test]
    fn test_clip_concave_subject() {
        // L-shape clipped against a square mask covering its lower arm
        let l = vec![
            Point::new(0, 0),
            Point::new(100, 0),
            Point::new(100, 50),
            Point::new(50, 50),
            Point::new(50, 100),
            Point::new(0, 100),
        ];
        let result = clip_polygon(&l, &rect(0, 0, 100, 40)).unwrap();
        assert_eq!(closed_area(result), 4000.0);
    }

    #[test]
    fn test_clip_triangle() {
        let tri = vec![Point::new(0, 0), Point::new(100, 0), Point::new(0, 100)];
        let result = clip_polygon(&tri, &rect(0, 0, 50, 50)).unwrap();
        // Square minus the corner cut by the hypotenuse x + y = 100: the
        // mask lies entirely under it, so the full 50x50 square survives.
        assert_eq!(closed_area(result), 2500.0);
    }

    #[test]
    fn test_clip_accepts_closed_rings() {
        let mut subject = rect(0, 0, 100, 100);
        let mut clip = rect(25, 25, 75, 75);
        ensure_closed(&mut subject);
        ensure_closed(&mut clip);
        let result = clip_polygon(&subject, &clip).unwrap();
        assert_eq!(closed_area(result), 2500.0);
    }
}
