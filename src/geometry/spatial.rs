//! Spatial indexing for polygon rings
//!
//! R-tree wrapper types used by the DRC runners to filter candidate ring
//! pairs by bounding box before any exact distance work is done.

use rstar::{RTree, RTreeObject, AABB};

use super::types::{BoundingBox, Point};

/// A ring's position in its region plus its envelope, for R-tree storage
#[derive(Clone, Debug)]
pub struct IndexedRing {
    pub index: usize,
    pub bounds: AABB<[f64; 2]>,
}

impl IndexedRing {
    pub fn new(index: usize, ring: &[Point]) -> Option<Self> {
        let bbox = BoundingBox::from_ring(ring)?;
        Some(Self {
            index,
            bounds: AABB::from_corners(
                [bbox.min_x as f64, bbox.min_y as f64],
                [bbox.max_x as f64, bbox.max_y as f64],
            ),
        })
    }
}

impl RTreeObject for IndexedRing {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        self.bounds
    }
}

impl rstar::PointDistance for IndexedRing {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        self.bounds.distance_2(point)
    }
}

/// Builds an R-tree over all non-empty rings of a ring list
pub fn index_rings(rings: &[Vec<Point>]) -> RTree<IndexedRing> {
    let entries: Vec<IndexedRing> = rings
        .iter()
        .enumerate()
        .filter_map(|(i, ring)| IndexedRing::new(i, ring))
        .collect();
    RTree::bulk_load(entries)
}

/// Envelope of a ring expanded by a clearance margin on all sides
pub fn expanded_envelope(ring: &[Point], margin: f64) -> Option<AABB<[f64; 2]>> {
    let bbox = BoundingBox::from_ring(ring)?;
    Some(AABB::from_corners(
        [bbox.min_x as f64 - margin, bbox.min_y as f64 - margin],
        [bbox.max_x as f64 + margin, bbox.max_y as f64 + margin],
    ))
}
