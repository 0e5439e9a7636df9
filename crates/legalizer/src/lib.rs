//! Branch-and-bound legalization of cell placements.
//!
//! Layers, bottom-up
//! - `flow`: incremental min-cost flow (cycle canceling) whose potentials are
//!   coordinates and whose cost is wirelength.
//! - `geometry`: rectangles, cells, pins and nets plus pitch and overlap helpers.
//! - `legalizer`: one placement sub-problem (two flow networks) with
//!   feasibility, relaxed cost, legality check and branching.
//! - `search`: depth-first branch-and-bound with a stall budget.
//! - `instance`: problem input (text format, JSON, random draws).
//!
//! API Policy
//! - This crate is project-internal. There is no stable public API; `api`
//!   collects the names callers are expected to use.

pub mod api;
pub mod flow;
pub mod geometry;
pub mod instance;
pub mod legalizer;
pub mod search;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use geometry::Point;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::geometry::{Axis, Cell, Net, Pin, Point, Rect};
    pub use crate::instance::{draw_instance, Instance, InstanceCfg, ReplayToken};
    pub use crate::legalizer::{BranchRule, Endpoint, Legalizer};
    pub use crate::search::{solve, Outcome, SearchCfg, SearchReport};
}
