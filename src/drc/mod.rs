//! Design-rule checking (DRC)
//!
//! Geometric rule checks over regions: minimum width, spacing,
//! separation, enclosure, notch, edge angle, and vertex grid. Checks are
//! pure functions producing flat violation records; the runners apply a
//! whole rule table in parallel with R-tree candidate filtering.
//!
//! # Submodules
//! - `types` - violation records, metrics, and rule tables
//! - `distance` - closest-approach and facing-pair helpers
//! - `checks` - the individual rule implementations
//! - `runners` - batch entry points over whole regions

pub mod checks;
pub mod distance;
pub mod runners;
pub mod types;

pub use checks::{
    angle_violations, enclosure_violations, grid_violations, notch_violations,
    separation_violations, space_violations, width_violations,
};
pub use distance::{closest_approach, edges_facing};
pub use runners::{run_clearance_checks, run_enclosure_checks, run_region_checks};
pub use types::{DesignRules, Metric, Violation, ViolationKind};
