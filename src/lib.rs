//! Integer-grid polygon geometry engine for IC layout
//!
//! Polygon sets (`Region`) on a fixed database-unit grid, with exact
//! Boolean algebra (union, intersection, difference, symmetric
//! difference), sizing with selectable corner treatment, and a family of
//! design-rule checks (width, spacing, separation, enclosure, notch,
//! angle, grid).
//!
//! All coordinates are `i32` database units; area accumulation runs in
//! `i128` so full-range rings cannot overflow. Boolean results are again
//! integer-grid regions, so operations compose.
//!
//! # Modules
//! - `geometry` - value types and pure geometric primitives
//! - `region` - the Region type, Boolean engine, and sizing
//! - `drc` - rule checks and batch runners

pub mod drc;
pub mod geometry;
pub mod region;

pub use drc::{DesignRules, Metric, Violation, ViolationKind};
pub use geometry::{BoundingBox, Edge, EdgePair, LayerId, Point};
pub use region::{CornerMode, Region};
