//! Region: layer-tagged polygon sets with Boolean algebra
//!
//! The central value type of the engine. A `Region` is an immutable set
//! of closed, CCW-normalized polygon rings on one layer. Every operator
//! returns a new `Region`; nothing mutates its receiver or arguments.
//!
//! # Submodules
//! - `boolean` - union/intersection/xor/difference engine
//! - `sizing` - grow/shrink offsetting with corner modes

mod boolean;
mod sizing;

pub use sizing::CornerMode;

use serde::{Deserialize, Serialize};

use crate::geometry::{
    area, edges, ensure_ccw, ensure_closed, BoundingBox, LayerId, Point,
};

use boolean::{boolean_op, BoolOp};

/// An immutable set of closed polygon rings tagged with a layer.
///
/// Rings are normalized on construction: explicitly closed (first point
/// repeated at the end) and wound counter-clockwise. A region with zero
/// rings is the canonical empty region, a valid value rather than an
/// error state. Degenerate rings (fewer than three distinct points) are
/// representable and carry zero area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    layer: LayerId,
    rings: Vec<Vec<Point>>,
}

impl Region {
    /// Builds a region from externally supplied rings, normalizing each
    /// to closed CCW form
    pub fn new(layer: LayerId, rings: Vec<Vec<Point>>) -> Self {
        let rings = rings
            .into_iter()
            .map(|mut ring| {
                ensure_closed(&mut ring);
                ensure_ccw(&mut ring);
                ring
            })
            .collect();
        Self { layer, rings }
    }

    /// The canonical empty region on a layer
    pub fn empty(layer: LayerId) -> Self {
        Self {
            layer,
            rings: Vec::new(),
        }
    }

    pub fn layer(&self) -> LayerId {
        self.layer
    }

    pub fn rings(&self) -> &[Vec<Point>] {
        &self.rings
    }

    pub fn ring_count(&self) -> usize {
        self.rings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }

    /// Total area in DBU^2, summed per ring with overflow-safe
    /// accumulation
    pub fn area(&self) -> f64 {
        self.rings.iter().map(|r| area(r)).sum()
    }

    /// Total number of edges across all rings
    pub fn edge_count(&self) -> usize {
        self.rings.iter().map(|r| r.len().saturating_sub(1)).sum()
    }

    /// Bounding box of all rings, `None` iff the region is empty
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        self.rings
            .iter()
            .filter_map(|r| BoundingBox::from_ring(r))
            .reduce(|a, b| a.union(&b))
    }

    /// All edges of all rings, in storage order
    pub fn all_edges(&self) -> Vec<crate::geometry::Edge> {
        self.rings.iter().flat_map(|r| edges(r)).collect()
    }

    /// Geometric union. Overlapping or edge-touching polygons merge;
    /// disjoint polygons remain separate. The result carries this
    /// region's layer.
    pub fn or(&self, other: &Region) -> Region {
        Region::new(self.layer, boolean_op(&self.rings, &other.rings, BoolOp::Or))
    }

    /// Geometric intersection; empty when the operands do not overlap
    pub fn and(&self, other: &Region) -> Region {
        Region::new(
            self.layer,
            boolean_op(&self.rings, &other.rings, BoolOp::And),
        )
    }

    /// Symmetric difference; empty for identical operands
    pub fn xor(&self, other: &Region) -> Region {
        let mut rings = boolean_op(&self.rings, &other.rings, BoolOp::Not);
        rings.extend(boolean_op(&other.rings, &self.rings, BoolOp::Not));
        Region::new(self.layer, rings)
    }

    /// Set difference (self minus other); identity for disjoint operands
    pub fn not(&self, other: &Region) -> Region {
        Region::new(
            self.layer,
            boolean_op(&self.rings, &other.rings, BoolOp::Not),
        )
    }

    /// Grows (`amount > 0`) or shrinks (`amount < 0`) every ring by
    /// `|amount|` DBU perpendicular to each edge, with the given corner
    /// treatment. Rings shrunk past half their smallest extent vanish.
    pub fn sized(&self, amount: i32, mode: CornerMode) -> Region {
        Region::new(self.layer, sizing::size_rings(&self.rings, amount, mode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect_region(x1: i32, y1: i32, x2: i32, y2: i32) -> Region {
        Region::new(
            LayerId::new(1, 0),
            vec![vec![
                Point::new(x1, y1),
                Point::new(x2, y1),
                Point::new(x2, y2),
                Point::new(x1, y2),
            ]],
        )
    }

    #[test]
    fn test_construction_normalizes_rings() {
        // Clockwise, open input comes out closed and CCW
        let region = Region::new(
            LayerId::new(1, 0),
            vec![vec![
                Point::new(0, 0),
                Point::new(0, 10),
                Point::new(10, 10),
                Point::new(10, 0),
            ]],
        );
        let ring = &region.rings()[0];
        assert_eq!(ring.first(), ring.last());
        assert!(crate::geometry::signed_area2(ring) > 0);
        assert_eq!(region.area(), 100.0);
    }

    #[test]
    fn test_empty_region_queries() {
        let empty = Region::empty(LayerId::new(2, 0));
        assert!(empty.is_empty());
        assert_eq!(empty.area(), 0.0);
        assert_eq!(empty.edge_count(), 0);
        assert!(empty.bounding_box().is_none());
    }

    #[test]
    fn test_degenerate_ring_is_a_value() {
        let region = Region::new(LayerId::new(1, 0), vec![vec![Point::new(5, 5)]]);
        assert!(!region.is_empty());
        assert_eq!(region.area(), 0.0);
    }

    #[test]
    fn test_result_layer_comes_from_receiver() {
        let a = Region::new(
            LayerId::new(3, 0),
            vec![vec![
                Point::new(0, 0),
                Point::new(10, 0),
                Point::new(10, 10),
                Point::new(0, 10),
            ]],
        );
        let b = Region::new(
            LayerId::new(7, 1),
            vec![vec![
                Point::new(5, 0),
                Point::new(15, 0),
                Point::new(15, 10),
                Point::new(5, 10),
            ]],
        );
        assert_eq!(a.or(&b).layer(), LayerId::new(3, 0));
        assert_eq!(b.or(&a).layer(), LayerId::new(7, 1));
    }

    #[test]
    fn test_operands_are_not_mutated() {
        let a = rect_region(0, 0, 100, 100);
        let b = rect_region(50, 0, 150, 100);
        let a_before = a.clone();
        let b_before = b.clone();
        let _ = a.or(&b);
        let _ = a.and(&b);
        let _ = a.xor(&b);
        let _ = a.not(&b);
        let _ = a.sized(10, CornerMode::Square);
        assert_eq!(a, a_before);
        assert_eq!(b, b_before);
    }

    #[test]
    fn test_edge_count_and_bbox() {
        let a = rect_region(0, 0, 100, 100);
        assert_eq!(a.edge_count(), 4);
        let bbox = a.bounding_box().unwrap();
        assert_eq!((bbox.min_x, bbox.min_y, bbox.max_x, bbox.max_y), (0, 0, 100, 100));
    }
}
