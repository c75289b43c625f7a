//! Core geometry types for layout data
//!
//! This module contains the fundamental value types used throughout the
//! engine: points, edges, edge pairs, bounding boxes, and layer identifiers.
//! All coordinates are 32-bit signed integers in database units (DBU).

use serde::{Deserialize, Serialize};

/// A 2D point on the database grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = (other.x as f64) - (self.x as f64);
        let dy = (other.y as f64) - (self.y as f64);
        (dx * dx + dy * dy).sqrt()
    }

    /// Coordinates as an f64 pair, for intermediate computation
    pub fn to_f64(&self) -> [f64; 2] {
        [self.x as f64, self.y as f64]
    }
}

/// A directed edge between two grid points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub p1: Point,
    pub p2: Point,
}

impl Edge {
    pub fn new(p1: Point, p2: Point) -> Self {
        Self { p1, p2 }
    }

    /// Euclidean length
    pub fn length(&self) -> f64 {
        self.p1.distance_to(&self.p2)
    }

    /// The same edge with endpoints swapped
    pub fn reversed(&self) -> Edge {
        Edge::new(self.p2, self.p1)
    }

    /// Coordinate deltas as f64
    pub fn delta(&self) -> [f64; 2] {
        [
            (self.p2.x as f64) - (self.p1.x as f64),
            (self.p2.y as f64) - (self.p1.y as f64),
        ]
    }

    /// Midpoint (exact in f64 for i32 endpoints)
    pub fn midpoint(&self) -> [f64; 2] {
        [
            ((self.p1.x as f64) + (self.p2.x as f64)) / 2.0,
            ((self.p1.y as f64) + (self.p2.y as f64)) / 2.0,
        ]
    }

    /// True iff the edge is horizontal or vertical
    pub fn is_axis_aligned(&self) -> bool {
        self.p1.x == self.p2.x || self.p1.y == self.p2.y
    }

    /// Edge direction in degrees, normalized to [0, 180)
    pub fn direction_degrees(&self) -> f64 {
        let [dx, dy] = self.delta();
        dy.atan2(dx).to_degrees().rem_euclid(180.0)
    }
}

/// Two associated edges, typically a facing pair found by a DRC check.
///
/// Exposes the distance between the edge midpoints, which spacing
/// heuristics use as a cheap stand-in for full segment distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgePair {
    pub a: Edge,
    pub b: Edge,
}

impl EdgePair {
    pub fn new(a: Edge, b: Edge) -> Self {
        Self { a, b }
    }

    /// Distance between the two edge midpoints
    pub fn midpoint_distance(&self) -> f64 {
        let ma = self.a.midpoint();
        let mb = self.b.midpoint();
        let dx = mb[0] - ma[0];
        let dy = mb[1] - ma[1];
        (dx * dx + dy * dy).sqrt()
    }
}

/// Axis-aligned bounding box in DBU
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl BoundingBox {
    /// Bounding box of a point sequence, `None` for an empty sequence
    pub fn from_ring(ring: &[Point]) -> Option<Self> {
        let first = ring.first()?;
        let mut bbox = BoundingBox {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        for p in &ring[1..] {
            bbox.min_x = bbox.min_x.min(p.x);
            bbox.min_y = bbox.min_y.min(p.y);
            bbox.max_x = bbox.max_x.max(p.x);
            bbox.max_y = bbox.max_y.max(p.y);
        }
        Some(bbox)
    }

    pub fn width(&self) -> i64 {
        (self.max_x as i64) - (self.min_x as i64)
    }

    pub fn height(&self) -> i64 {
        (self.max_y as i64) - (self.min_y as i64)
    }

    pub fn center(&self) -> [f64; 2] {
        [
            ((self.min_x as f64) + (self.max_x as f64)) / 2.0,
            ((self.min_y as f64) + (self.max_y as f64)) / 2.0,
        ]
    }

    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.min_x <= other.max_x
            && self.max_x >= other.min_x
            && self.min_y <= other.max_y
            && self.max_y >= other.min_y
    }

    /// True iff `other` lies entirely within this box (boundaries included)
    pub fn contains_box(&self, other: &BoundingBox) -> bool {
        self.min_x <= other.min_x
            && self.min_y <= other.min_y
            && self.max_x >= other.max_x
            && self.max_y >= other.max_y
    }

    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }
}

/// GDS-style layer identifier: layer number plus datatype
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct LayerId {
    pub layer: u16,
    pub datatype: u16,
}

impl LayerId {
    pub fn new(layer: u16, datatype: u16) -> Self {
        Self { layer, datatype }
    }
}

impl std::fmt::Display for LayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.layer, self.datatype)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_ordering() {
        assert!(Point::new(0, 5) < Point::new(1, 0));
        assert!(Point::new(1, 0) < Point::new(1, 2));
        assert_eq!(Point::new(3, 4), Point::new(3, 4));
    }

    #[test]
    fn test_edge_length_and_reversal() {
        let e = Edge::new(Point::new(0, 0), Point::new(3, 4));
        assert_eq!(e.length(), 5.0);
        assert_eq!(e.reversed().p1, Point::new(3, 4));
        assert_eq!(e.reversed().reversed(), e);
    }

    #[test]
    fn test_edge_pair_midpoint_distance() {
        let a = Edge::new(Point::new(0, 0), Point::new(10, 0));
        let b = Edge::new(Point::new(0, 20), Point::new(10, 20));
        let pair = EdgePair::new(a, b);
        assert_eq!(pair.midpoint_distance(), 20.0);
    }

    #[test]
    fn test_bounding_box_from_ring() {
        assert!(BoundingBox::from_ring(&[]).is_none());
        let bbox = BoundingBox::from_ring(&[
            Point::new(-5, 2),
            Point::new(10, -3),
            Point::new(4, 7),
        ])
        .unwrap();
        assert_eq!(bbox.min_x, -5);
        assert_eq!(bbox.min_y, -3);
        assert_eq!(bbox.max_x, 10);
        assert_eq!(bbox.max_y, 7);
        assert_eq!(bbox.width(), 15);
        assert_eq!(bbox.height(), 10);
    }

    #[test]
    fn test_layer_id_display() {
        assert_eq!(LayerId::new(8, 0).to_string(), "8/0");
    }
}
