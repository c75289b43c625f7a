//! DRC data types
//!
//! Violation records, measurement metrics, and rule definitions.

use serde::{Deserialize, Serialize};

use crate::geometry::{Edge, EdgePair, LayerId, Point};

/// Which check produced a violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViolationKind {
    Width,
    Space,
    Separation,
    Enclosure,
    Notch,
    Angle,
    Grid,
}

/// How gaps and widths are measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Metric {
    /// True Euclidean distance
    #[default]
    Euclidean,
    /// Chebyshev distance: max of the axis deltas
    Square,
    /// Distance projected onto the facing edges' normal
    Projection,
}

impl Metric {
    /// Measures a closest-approach vector `(dx, dy)` under this metric.
    /// `normal` is the unit normal of the reference edge, used by the
    /// projection metric.
    pub fn measure(&self, dx: f64, dy: f64, normal: [f64; 2]) -> f64 {
        match self {
            Metric::Euclidean => (dx * dx + dy * dy).sqrt(),
            Metric::Square => dx.abs().max(dy.abs()),
            Metric::Projection => (dx * normal[0] + dy * normal[1]).abs(),
        }
    }
}

/// A single rule violation.
///
/// One record per violating feature; findings are never aggregated.
/// Which optional fields are present depends on the kind: pair checks
/// carry two ring indices and an edge pair, single-edge checks one edge,
/// the grid check a vertex.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Violation {
    pub kind: ViolationKind,
    pub layer: LayerId,
    /// Ring index in the checked region
    pub ring_a: usize,
    /// Ring index in the second region, for pair checks
    pub ring_b: Option<usize>,
    /// Offending edge pair, when the check measures between edges
    pub edges: Option<EdgePair>,
    /// Offending single edge, for per-edge checks like angle
    pub edge: Option<Edge>,
    /// Offending vertex, for the grid check
    pub vertex: Option<Point>,
    /// Measured value (gap, width, margin, or angle in degrees)
    pub measured: Option<f64>,
    /// The rule limit that was violated
    pub limit: Option<f64>,
}

impl Violation {
    pub fn edge_pair(
        kind: ViolationKind,
        layer: LayerId,
        ring_a: usize,
        ring_b: Option<usize>,
        a: Edge,
        b: Edge,
        measured: f64,
        limit: f64,
    ) -> Self {
        Self {
            kind,
            layer,
            ring_a,
            ring_b,
            edges: Some(EdgePair::new(a, b)),
            edge: None,
            vertex: None,
            measured: Some(measured),
            limit: Some(limit),
        }
    }

    pub fn single_edge(
        kind: ViolationKind,
        layer: LayerId,
        ring_a: usize,
        edge: Edge,
        measured: f64,
    ) -> Self {
        Self {
            kind,
            layer,
            ring_a,
            ring_b: None,
            edges: None,
            edge: Some(edge),
            vertex: None,
            measured: Some(measured),
            limit: None,
        }
    }

    pub fn at_vertex(kind: ViolationKind, layer: LayerId, ring_a: usize, vertex: Point) -> Self {
        Self {
            kind,
            layer,
            ring_a,
            ring_b: None,
            edges: None,
            edge: None,
            vertex: Some(vertex),
            measured: None,
            limit: None,
        }
    }
}

/// Rule limits for the batch runners. `None` disables a check; the pure
/// check functions remain callable directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignRules {
    pub min_width: Option<f64>,
    pub min_space: Option<f64>,
    pub min_separation: Option<f64>,
    pub min_enclosure: Option<f64>,
    pub min_notch: Option<f64>,
    /// Allowed edge directions in degrees modulo 180
    pub allowed_angles: Option<Vec<f64>>,
    /// Vertex grid in DBU (x, y)
    pub grid: Option<(i32, i32)>,
    pub metric: Metric,
}

impl Default for DesignRules {
    fn default() -> Self {
        Self {
            min_width: Some(10.0),
            min_space: Some(10.0),
            min_separation: None,
            min_enclosure: None,
            min_notch: Some(10.0),
            allowed_angles: Some(vec![0.0, 45.0, 90.0, 135.0]),
            grid: Some((1, 1)),
            metric: Metric::Euclidean,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_measure() {
        assert_eq!(Metric::Euclidean.measure(3.0, 4.0, [1.0, 0.0]), 5.0);
        assert_eq!(Metric::Square.measure(3.0, 4.0, [1.0, 0.0]), 4.0);
        assert_eq!(Metric::Projection.measure(3.0, 4.0, [1.0, 0.0]), 3.0);
    }

    #[test]
    fn test_default_rules_enable_core_checks() {
        let rules = DesignRules::default();
        assert!(rules.min_width.is_some());
        assert!(rules.min_space.is_some());
        assert!(rules.min_separation.is_none());
    }
}
