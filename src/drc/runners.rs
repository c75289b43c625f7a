//! DRC runner functions
//!
//! Batch entry points that apply a `DesignRules` table to whole regions:
//! single-region rules run per ring in parallel, inter-region rules go
//! through an R-tree so only bounding-box neighbors pay for exact
//! distance work.

use rayon::prelude::*;

use crate::geometry::{expanded_envelope, index_rings};
use crate::region::Region;

use super::checks;
use super::types::{DesignRules, Violation};

/// Runs all enabled single-region rules (width, notch, angle, grid) on
/// one region. Returns the violations found.
pub fn run_region_checks(region: &Region, rules: &DesignRules) -> Vec<Violation> {
    let start = std::time::Instant::now();
    let layer = region.layer();

    let violations: Vec<Violation> = region
        .rings()
        .par_iter()
        .enumerate()
        .flat_map(|(i, ring)| {
            let mut found = Vec::new();
            if let Some(min_width) = rules.min_width {
                found.extend(checks::ring_width_violations(
                    layer,
                    i,
                    ring,
                    min_width,
                    rules.metric,
                ));
            }
            if let Some(min_notch) = rules.min_notch {
                found.extend(checks::ring_notch_violations(layer, i, ring, min_notch));
            }
            if let Some(angles) = &rules.allowed_angles {
                found.extend(checks::ring_angle_violations(layer, i, ring, angles));
            }
            if let Some((gx, gy)) = rules.grid {
                found.extend(checks::ring_grid_violations(layer, i, ring, gx, gy));
            }
            found
        })
        .collect();

    eprintln!(
        "[DRC] Region check on layer {}: {} rings checked, {} violations found in {:?}",
        layer,
        region.ring_count(),
        violations.len(),
        start.elapsed()
    );

    violations
}

/// Runs the enabled inter-region rules (space, separation) between two
/// regions. Ring pairs are pre-filtered through an R-tree over `other`,
/// expanded by the largest enabled clearance.
pub fn run_clearance_checks(
    region: &Region,
    other: &Region,
    rules: &DesignRules,
) -> Vec<Violation> {
    let start = std::time::Instant::now();
    let layer = region.layer();

    let margin = rules
        .min_space
        .into_iter()
        .chain(rules.min_separation)
        .fold(0.0_f64, f64::max);
    if margin == 0.0 {
        return Vec::new();
    }

    let tree = index_rings(other.rings());

    let violations: Vec<Violation> = region
        .rings()
        .par_iter()
        .enumerate()
        .flat_map(|(ia, ring_a)| {
            let mut found = Vec::new();
            let Some(query) = expanded_envelope(ring_a, margin) else {
                return found;
            };
            for candidate in tree.locate_in_envelope_intersecting(&query) {
                let ib = candidate.index;
                let ring_b = &other.rings()[ib];
                if let Some(min_space) = rules.min_space {
                    found.extend(checks::space_violation_for_pair(
                        layer,
                        ia,
                        ring_a,
                        ib,
                        ring_b,
                        min_space,
                        rules.metric,
                    ));
                }
                if let Some(min_separation) = rules.min_separation {
                    found.extend(checks::separation_violation_for_pair(
                        layer,
                        ia,
                        ring_a,
                        ib,
                        ring_b,
                        min_separation,
                    ));
                }
            }
            found
        })
        .collect();

    eprintln!(
        "[DRC] Clearance check {} vs {}: {} x {} rings, {} violations found in {:?}",
        layer,
        other.layer(),
        region.ring_count(),
        other.ring_count(),
        violations.len(),
        start.elapsed()
    );

    violations
}

/// Runs the enclosure rule for every `inner` ring against its enclosing
/// `outer` ring, if any. Candidate outers come from the R-tree; the
/// first ring that fully contains an inner ring is the one measured.
pub fn run_enclosure_checks(
    outer: &Region,
    inner: &Region,
    rules: &DesignRules,
) -> Vec<Violation> {
    let start = std::time::Instant::now();

    let Some(min_enclosure) = rules.min_enclosure else {
        return Vec::new();
    };

    let tree = index_rings(outer.rings());
    let layer = outer.layer();

    let violations: Vec<Violation> = inner
        .rings()
        .par_iter()
        .enumerate()
        .flat_map(|(ii, inner_ring)| {
            let Some(query) = expanded_envelope(inner_ring, 0.0) else {
                return Vec::new();
            };
            for candidate in tree.locate_in_envelope_intersecting(&query) {
                let oi = candidate.index;
                let outer_ring = &outer.rings()[oi];
                if !checks::ring_contains_ring(outer_ring, inner_ring) {
                    continue;
                }
                return checks::enclosure_violations_for_pair(
                    layer,
                    oi,
                    outer_ring,
                    ii,
                    inner_ring,
                    min_enclosure,
                    rules.metric,
                );
            }
            Vec::new()
        })
        .collect();

    eprintln!(
        "[DRC] Enclosure check {} around {}: {} inner rings, {} violations found in {:?}",
        layer,
        inner.layer(),
        inner.ring_count(),
        violations.len(),
        start.elapsed()
    );

    violations
}
