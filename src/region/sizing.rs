//! Polygon sizing (offsetting)
//!
//! Grows or shrinks every ring of a region by a fixed perpendicular
//! distance. Corner behavior is selected by `CornerMode`: sharp miter
//! corners, 45-degree tangent chamfers, or inscribed arc fans.
//!
//! A ring whose offset image collapses (any displaced edge reverses
//! direction, or the rounded result loses its positive area) vanishes
//! from the output instead of inverting or self-intersecting.

use serde::{Deserialize, Serialize};

use crate::geometry::{signed_area2, Point};

/// Corner treatment for the sizing operator.
///
/// For a convex input and equal positive offset, resulting area is
/// ordered `Square >= Octagonal >= Round { .. }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CornerMode {
    /// Displaced edges extend to their mutual intersection (maximal,
    /// sharp-corner offset; exact Minkowski sum with a square for
    /// axis-aligned input).
    Square,
    /// Corners chamfered by a 45-degree cut tangent to the offset circle.
    Octagonal,
    /// Corners filleted with an inscribed arc polyline of `segments`
    /// chords; area grows with `segments` toward the Minkowski sum with
    /// a disk.
    Round { segments: u32 },
}

/// Offsets every ring by `amount` DBU (positive grows, negative shrinks)
pub(crate) fn size_rings(rings: &[Vec<Point>], amount: i32, mode: CornerMode) -> Vec<Vec<Point>> {
    if amount == 0 {
        return rings.to_vec();
    }
    rings
        .iter()
        .filter_map(|ring| size_ring(ring, amount as f64, mode))
        .collect()
}

fn size_ring(ring: &[Point], amount: f64, mode: CornerMode) -> Option<Vec<Point>> {
    let r = prepare(ring)?;
    let n = r.len();

    // Per-vertex point groups; displaced edge i runs from the last point
    // of group i to the first point of group i+1.
    let mut groups: Vec<Vec<[f64; 2]>> = Vec::with_capacity(n);
    let mut edge_dirs: Vec<[f64; 2]> = Vec::with_capacity(n);

    for i in 0..n {
        let prev = r[(i + n - 1) % n];
        let cur = r[i];
        let next = r[(i + 1) % n];

        let d1 = unit(sub(cur, prev));
        let d2 = unit(sub(next, cur));
        // Outward normals of a CCW ring point to the right of travel
        let n1 = [d1[1], -d1[0]];
        let n2 = [d2[1], -d2[0]];
        let cross = d1[0] * d2[1] - d1[1] * d2[0];
        edge_dirs.push(d2);

        // Corner treatment applies on the displacement side of the turn:
        // convex corners when growing, reflex corners when shrinking.
        let treated = cross * amount > 1e-12;

        let group = if !treated {
            vec![miter(cur, d1, n1, d2, n2, amount)]
        } else {
            match mode {
                CornerMode::Square => vec![miter(cur, d1, n1, d2, n2, amount)],
                CornerMode::Octagonal => chamfer(cur, d1, n1, d2, n2, amount),
                CornerMode::Round { segments } => fillet(cur, n1, n2, cross, amount, segments),
            }
        };
        groups.push(group);
    }

    // Collapse detection: a shrink past half the local extent reverses a
    // displaced edge relative to its source edge.
    for i in 0..n {
        let a = *groups[i].last().unwrap();
        let b = *groups[(i + 1) % n].first().unwrap();
        let d = edge_dirs[i];
        if (b[0] - a[0]) * d[0] + (b[1] - a[1]) * d[1] < -1e-9 {
            return None;
        }
    }

    let mut out: Vec<Point> = groups
        .into_iter()
        .flatten()
        .map(|p| Point::new(p[0].round() as i32, p[1].round() as i32))
        .collect();
    out.dedup();
    while out.len() >= 2 && out.first() == out.last() {
        out.pop();
    }
    if out.len() < 3 || signed_area2(&out) <= 0 {
        return None;
    }
    Some(out)
}

/// Intersection of the two displaced edge lines through a vertex
fn miter(cur: [f64; 2], d1: [f64; 2], n1: [f64; 2], d2: [f64; 2], n2: [f64; 2], amount: f64) -> [f64; 2] {
    let p1 = add(cur, scale(n1, amount));
    let p2 = add(cur, scale(n2, amount));
    let denom = d1[0] * d2[1] - d1[1] * d2[0];
    if denom.abs() < 1e-12 {
        // Collinear edges: plain perpendicular displacement
        return p1;
    }
    let t = ((p2[0] - p1[0]) * d2[1] - (p2[1] - p1[1]) * d2[0]) / denom;
    add(p1, scale(d1, t))
}

/// 45-degree cut tangent to the offset circle at the corner bisector
fn chamfer(cur: [f64; 2], d1: [f64; 2], n1: [f64; 2], d2: [f64; 2], n2: [f64; 2], amount: f64) -> Vec<[f64; 2]> {
    let bx = n1[0] + n2[0];
    let by = n1[1] + n2[1];
    let blen = (bx * bx + by * by).sqrt();
    if blen < 1e-9 {
        // Degenerate spike (edges reverse); fall back to displacement
        return vec![add(cur, scale(n1, amount))];
    }
    let b = [bx / blen, by / blen];
    let c = add(cur, scale(b, amount));
    let tb = [-b[1], b[0]];

    let q1 = line_intersect(add(cur, scale(n1, amount)), d1, c, tb);
    let q2 = line_intersect(add(cur, scale(n2, amount)), d2, c, tb);
    match (q1, q2) {
        (Some(q1), Some(q2)) => vec![q1, q2],
        _ => vec![add(cur, scale(n1, amount)), add(cur, scale(n2, amount))],
    }
}

/// Inscribed arc fan from the first displaced endpoint to the second
fn fillet(cur: [f64; 2], n1: [f64; 2], n2: [f64; 2], cross: f64, amount: f64, segments: u32) -> Vec<[f64; 2]> {
    let segments = segments.max(1);
    let a1 = n1[1].atan2(n1[0]);
    let dot = n1[0] * n2[0] + n1[1] * n2[1];
    let phi = cross.atan2(dot);

    (0..=segments)
        .map(|k| {
            let ang = a1 + phi * (k as f64) / (segments as f64);
            add(cur, scale([ang.cos(), ang.sin()], amount))
        })
        .collect()
}

fn line_intersect(p1: [f64; 2], d1: [f64; 2], p2: [f64; 2], d2: [f64; 2]) -> Option<[f64; 2]> {
    let denom = d1[0] * d2[1] - d1[1] * d2[0];
    if denom.abs() < 1e-12 {
        return None;
    }
    let t = ((p2[0] - p1[0]) * d2[1] - (p2[1] - p1[1]) * d2[0]) / denom;
    Some(add(p1, scale(d1, t)))
}

/// Open CCW f64 ring; `None` for degenerate input
fn prepare(ring: &[Point]) -> Option<Vec<[f64; 2]>> {
    let mut r = ring.to_vec();
    r.dedup();
    while r.len() >= 2 && r.first() == r.last() {
        r.pop();
    }
    if r.len() < 3 || signed_area2(&r) == 0 {
        return None;
    }
    if signed_area2(&r) < 0 {
        r.reverse();
    }
    Some(r.iter().map(|p| p.to_f64()).collect())
}

fn sub(a: [f64; 2], b: [f64; 2]) -> [f64; 2] {
    [a[0] - b[0], a[1] - b[1]]
}

fn add(a: [f64; 2], b: [f64; 2]) -> [f64; 2] {
    [a[0] + b[0], a[1] + b[1]]
}

fn scale(a: [f64; 2], s: f64) -> [f64; 2] {
    [a[0] * s, a[1] * s]
}

fn unit(a: [f64; 2]) -> [f64; 2] {
    let len = (a[0] * a[0] + a[1] * a[1]).sqrt();
    [a[0] / len, a[1] / len]
}
