//! Design-rule check implementations
//!
//! Each check is a pure function over one or two regions producing a
//! list of violation markers. A violation always means strictly failing
//! the limit; values exactly at the limit pass.
//!
//! Region-level functions iterate rings serially; the per-ring and
//! per-pair helpers they delegate to are shared with the parallel batch
//! runners.

use crate::geometry::{edges, BoundingBox, Edge, LayerId, Point};
use crate::region::Region;

use super::distance::{closest_approach, edge_normal, edges_facing};
use super::types::{Metric, Violation, ViolationKind};

const ANGLE_TOL: f64 = 1e-6;

/// Local width measurements below `min_width`, one violation per failing
/// facing edge pair. An axis-aligned rectangle failing in both extents
/// yields two violations.
pub fn width_violations(region: &Region, min_width: f64, metric: Metric) -> Vec<Violation> {
    region
        .rings()
        .iter()
        .enumerate()
        .flat_map(|(i, ring)| ring_width_violations(region.layer(), i, ring, min_width, metric))
        .collect()
}

/// Facing-edge gaps across the exterior of a single ring (notches)
/// narrower than `min_notch`
pub fn notch_violations(region: &Region, min_notch: f64) -> Vec<Violation> {
    region
        .rings()
        .iter()
        .enumerate()
        .flat_map(|(i, ring)| ring_notch_violations(region.layer(), i, ring, min_notch))
        .collect()
}

/// Spacing between polygon pairs of two regions, restricted to facing
/// edges with projection overlap. One violation per ring pair whose gap
/// is strictly between zero and `min_space`; touching pairs pass.
pub fn space_violations(
    region: &Region,
    other: &Region,
    min_space: f64,
    metric: Metric,
) -> Vec<Violation> {
    let mut out = Vec::new();
    for (ia, ring_a) in region.rings().iter().enumerate() {
        for (ib, ring_b) in other.rings().iter().enumerate() {
            if let Some(v) = space_violation_for_pair(
                region.layer(),
                ia,
                ring_a,
                ib,
                ring_b,
                min_space,
                metric,
            ) {
                out.push(v);
            }
        }
    }
    out
}

/// Non-axis-restricted spacing generalization: minimum distance over all
/// edge pairs of each polygon pair
pub fn separation_violations(
    region: &Region,
    other: &Region,
    min_separation: f64,
) -> Vec<Violation> {
    let mut out = Vec::new();
    for (ia, ring_a) in region.rings().iter().enumerate() {
        for (ib, ring_b) in other.rings().iter().enumerate() {
            if let Some(v) =
                separation_violation_for_pair(region.layer(), ia, ring_a, ib, ring_b, min_separation)
            {
                out.push(v);
            }
        }
    }
    out
}

/// Containment margins of inner polygons inside outer polygons.
///
/// Only inner rings fully contained in an outer ring are evaluated; each
/// inner edge whose margin to the outer boundary falls below
/// `min_enclosure` yields one violation (nominally four margins for a
/// rectangle). Non-contained pairs produce none.
pub fn enclosure_violations(
    outer: &Region,
    inner: &Region,
    min_enclosure: f64,
    metric: Metric,
) -> Vec<Violation> {
    let mut out = Vec::new();
    for (ii, inner_ring) in inner.rings().iter().enumerate() {
        for (oi, outer_ring) in outer.rings().iter().enumerate() {
            if !ring_contains_ring(outer_ring, inner_ring) {
                continue;
            }
            out.extend(enclosure_violations_for_pair(
                outer.layer(),
                oi,
                outer_ring,
                ii,
                inner_ring,
                min_enclosure,
                metric,
            ));
            break; // first enclosing ring wins
        }
    }
    out
}

/// Edges whose direction modulo 180 degrees is not in `allowed_angles`
pub fn angle_violations(region: &Region, allowed_angles: &[f64]) -> Vec<Violation> {
    region
        .rings()
        .iter()
        .enumerate()
        .flat_map(|(i, ring)| ring_angle_violations(region.layer(), i, ring, allowed_angles))
        .collect()
}

/// Vertices whose x is not an exact multiple of `grid_x` or y of
/// `grid_y`. Exact divisibility, correct for negative coordinates.
pub fn grid_violations(region: &Region, grid_x: i32, grid_y: i32) -> Vec<Violation> {
    region
        .rings()
        .iter()
        .enumerate()
        .flat_map(|(i, ring)| ring_grid_violations(region.layer(), i, ring, grid_x, grid_y))
        .collect()
}

// ---------------------------------------------------------------------
// Per-ring and per-pair helpers (shared with the batch runners)
// ---------------------------------------------------------------------

pub(crate) fn ring_width_violations(
    layer: LayerId,
    ring_idx: usize,
    ring: &[Point],
    min_width: f64,
    metric: Metric,
) -> Vec<Violation> {
    facing_pair_violations(layer, ring_idx, ring, min_width, metric, true, ViolationKind::Width)
}

pub(crate) fn ring_notch_violations(
    layer: LayerId,
    ring_idx: usize,
    ring: &[Point],
    min_notch: f64,
) -> Vec<Violation> {
    facing_pair_violations(
        layer,
        ring_idx,
        ring,
        min_notch,
        Metric::Euclidean,
        false,
        ViolationKind::Notch,
    )
}

/// Shared body of width (measure across interior) and notch (measure
/// across exterior): non-adjacent facing edge pairs within one ring
fn facing_pair_violations(
    layer: LayerId,
    ring_idx: usize,
    ring: &[Point],
    limit: f64,
    metric: Metric,
    interior: bool,
    kind: ViolationKind,
) -> Vec<Violation> {
    let ring_edges = edges(ring);
    let m = ring_edges.len();
    let mut out = Vec::new();

    for i in 0..m {
        for j in (i + 1)..m {
            // Adjacent edges share a vertex and measure nothing
            if j == i + 1 || (i == 0 && j == m - 1) {
                continue;
            }
            let ea = &ring_edges[i];
            let eb = &ring_edges[j];
            if !edges_facing(ea, eb) {
                continue;
            }
            let (d, pa, pb) = closest_approach(ea, eb);
            if d <= 0.0 {
                continue;
            }
            let mid = [(pa[0] + pb[0]) / 2.0, (pa[1] + pb[1]) / 2.0];
            if inside_ring_f64(mid, ring) != interior {
                continue;
            }
            let measured = metric.measure(pb[0] - pa[0], pb[1] - pa[1], edge_normal(ea));
            if measured < limit {
                out.push(Violation::edge_pair(
                    kind, layer, ring_idx, None, *ea, *eb, measured, limit,
                ));
            }
        }
    }
    out
}

pub(crate) fn space_violation_for_pair(
    layer: LayerId,
    ia: usize,
    ring_a: &[Point],
    ib: usize,
    ring_b: &[Point],
    min_space: f64,
    metric: Metric,
) -> Option<Violation> {
    if bbox_gap_at_least(ring_a, ring_b, min_space) {
        return None;
    }
    // Nested rings have an enclosure margin, not an exterior gap
    if ring_contains_ring(ring_a, ring_b) || ring_contains_ring(ring_b, ring_a) {
        return None;
    }

    let mut best: Option<(f64, Edge, Edge)> = None;
    for ea in edges(ring_a) {
        for eb in edges(ring_b) {
            if !edges_facing(&ea, &eb) {
                continue;
            }
            let (_, pa, pb) = closest_approach(&ea, &eb);
            let gap = metric.measure(pb[0] - pa[0], pb[1] - pa[1], edge_normal(&ea));
            if best.map_or(true, |(g, _, _)| gap < g) {
                best = Some((gap, ea, eb));
            }
        }
    }

    let (gap, ea, eb) = best?;
    if gap > 0.0 && gap < min_space {
        Some(Violation::edge_pair(
            ViolationKind::Space,
            layer,
            ia,
            Some(ib),
            ea,
            eb,
            gap,
            min_space,
        ))
    } else {
        None
    }
}

pub(crate) fn separation_violation_for_pair(
    layer: LayerId,
    ia: usize,
    ring_a: &[Point],
    ib: usize,
    ring_b: &[Point],
    min_separation: f64,
) -> Option<Violation> {
    if bbox_gap_at_least(ring_a, ring_b, min_separation) {
        return None;
    }
    if ring_contains_ring(ring_a, ring_b) || ring_contains_ring(ring_b, ring_a) {
        return None;
    }

    let mut best: Option<(f64, Edge, Edge)> = None;
    for ea in edges(ring_a) {
        for eb in edges(ring_b) {
            let (d, _, _) = closest_approach(&ea, &eb);
            if best.map_or(true, |(g, _, _)| d < g) {
                best = Some((d, ea, eb));
            }
        }
    }

    let (gap, ea, eb) = best?;
    if gap > 0.0 && gap < min_separation {
        Some(Violation::edge_pair(
            ViolationKind::Separation,
            layer,
            ia,
            Some(ib),
            ea,
            eb,
            gap,
            min_separation,
        ))
    } else {
        None
    }
}

pub(crate) fn enclosure_violations_for_pair(
    layer: LayerId,
    outer_idx: usize,
    outer_ring: &[Point],
    inner_idx: usize,
    inner_ring: &[Point],
    min_enclosure: f64,
    metric: Metric,
) -> Vec<Violation> {
    let mut out = Vec::new();
    for inner_edge in edges(inner_ring) {
        let Some((margin_vec, outer_edge)) = margin_to_outer(&inner_edge, outer_ring) else {
            continue;
        };
        let margin = metric.measure(margin_vec[0], margin_vec[1], edge_normal(&inner_edge));
        if margin < min_enclosure {
            out.push(Violation::edge_pair(
                ViolationKind::Enclosure,
                layer,
                inner_idx,
                Some(outer_idx),
                inner_edge,
                outer_edge,
                margin,
                min_enclosure,
            ));
        }
    }
    out
}

pub(crate) fn ring_angle_violations(
    layer: LayerId,
    ring_idx: usize,
    ring: &[Point],
    allowed: &[f64],
) -> Vec<Violation> {
    let mut out = Vec::new();
    for e in edges(ring) {
        if e.p1 == e.p2 {
            continue;
        }
        let dir = e.direction_degrees();
        let ok = allowed.iter().any(|a| {
            let diff = (dir - a).rem_euclid(180.0);
            diff < ANGLE_TOL || diff > 180.0 - ANGLE_TOL
        });
        if !ok {
            out.push(Violation::single_edge(
                ViolationKind::Angle,
                layer,
                ring_idx,
                e,
                dir,
            ));
        }
    }
    out
}

pub(crate) fn ring_grid_violations(
    layer: LayerId,
    ring_idx: usize,
    ring: &[Point],
    grid_x: i32,
    grid_y: i32,
) -> Vec<Violation> {
    // Skip the duplicated closing vertex
    let span = if ring.len() >= 2 && ring.first() == ring.last() {
        &ring[..ring.len() - 1]
    } else {
        ring
    };
    span.iter()
        .filter(|p| {
            (grid_x > 0 && p.x.rem_euclid(grid_x) != 0)
                || (grid_y > 0 && p.y.rem_euclid(grid_y) != 0)
        })
        .map(|p| Violation::at_vertex(ViolationKind::Grid, layer, ring_idx, *p))
        .collect()
}

// ---------------------------------------------------------------------
// Support
// ---------------------------------------------------------------------

/// Margin from an inner edge to the outer boundary, measured along the
/// inner edge's outward normal from its midpoint. Returns the margin
/// vector and the outer edge that was hit.
fn margin_to_outer(inner_edge: &Edge, outer_ring: &[Point]) -> Option<([f64; 2], Edge)> {
    let m = inner_edge.midpoint();
    // Interior of a CCW inner ring is left of travel; outward is right
    let n = edge_normal(inner_edge);
    let dir = [-n[0], -n[1]];

    let mut best: Option<(f64, Edge)> = None;
    for e in edges(outer_ring) {
        let a = e.p1.to_f64();
        let b = e.p2.to_f64();
        let ex = b[0] - a[0];
        let ey = b[1] - a[1];
        let denom = dir[0] * ey - dir[1] * ex;
        if denom.abs() < 1e-12 {
            continue;
        }
        let wx = a[0] - m[0];
        let wy = a[1] - m[1];
        let t = (wx * ey - wy * ex) / denom;
        let s = (wx * dir[1] - wy * dir[0]) / denom;
        if t >= 0.0 && s >= -1e-9 && s <= 1.0 + 1e-9 && best.map_or(true, |(bt, _)| t < bt) {
            best = Some((t, e));
        }
    }
    let (t, e) = best?;
    Some(([dir[0] * t, dir[1] * t], e))
}

/// True iff every vertex of `inner` is inside or on `outer` and the
/// bounding boxes nest
pub(crate) fn ring_contains_ring(outer: &[Point], inner: &[Point]) -> bool {
    let (Some(ob), Some(ib)) = (BoundingBox::from_ring(outer), BoundingBox::from_ring(inner))
    else {
        return false;
    };
    if !ob.contains_box(&ib) {
        return false;
    }
    inner
        .iter()
        .all(|p| crate::geometry::point_in_polygon(*p, outer))
}

/// Quick reject: bounding boxes already at least `gap` apart
fn bbox_gap_at_least(a: &[Point], b: &[Point], gap: f64) -> bool {
    let (Some(ba), Some(bb)) = (BoundingBox::from_ring(a), BoundingBox::from_ring(b)) else {
        return true;
    };
    let dx = ((ba.min_x.max(bb.min_x) as f64) - (ba.max_x.min(bb.max_x) as f64)).max(0.0);
    let dy = ((ba.min_y.max(bb.min_y) as f64) - (ba.max_y.min(bb.max_y) as f64)).max(0.0);
    (dx * dx + dy * dy).sqrt() >= gap
}

/// Even-odd containment in f64, over one ring
fn inside_ring_f64(p: [f64; 2], ring: &[Point]) -> bool {
    let mut inside = false;
    let wrap = ring.len() >= 2 && ring.first() != ring.last();
    let pairs = ring
        .windows(2)
        .map(|w| (w[0], w[1]))
        .chain(wrap.then(|| (*ring.last().unwrap(), ring[0])));
    for (a, b) in pairs {
        let ay = a.y as f64;
        let by = b.y as f64;
        if (ay > p[1]) != (by > p[1]) {
            let x = (a.x as f64) + (p[1] - ay) / (by - ay) * ((b.x as f64) - (a.x as f64));
            if p[0] < x {
                inside = !inside;
            }
        }
    }
    inside
}
