//! Geometry module for integer-grid layout data
//!
//! Provides the fundamental value types and pure geometric primitives the
//! Region engine and the DRC checks are built from.
//!
//! # Submodules
//! - `types` - Core value types (Point, Edge, EdgePair, BoundingBox, LayerId)
//! - `primitives` - Signed area, orientation, containment, segment math
//! - `clip` - Sutherland–Hodgman convex clipping
//! - `spatial` - R-tree indexing of rings for candidate-pair filtering

mod clip;
mod primitives;
mod spatial;
mod types;

pub use types::{BoundingBox, Edge, EdgePair, LayerId, Point};

pub use primitives::{
    area, edges, ensure_ccw, ensure_closed, is_manhattan, point_in_polygon, point_on_segment,
    point_segment_distance, segment_distance, segment_intersection, signed_area, signed_area2,
};

pub use clip::clip_polygon;

pub use spatial::{expanded_envelope, index_rings, IndexedRing};
