//! Placement sub-problems on top of two flow networks.
//!
//! Purpose
//! - Encode one placement sub-problem per axis as a `FlowNetwork` whose
//!   potentials are cell coordinates and whose cost is the half-perimeter
//!   wirelength of the relaxed placement (overlaps ignored).
//! - Expose what a branch-and-bound search needs: feasibility, a cost lower
//!   bound, relaxed positions, a legality check, and branching on overlaps.
//!
//! Why this design
//! - Branching only ever adds arcs, and the flow network absorbs one arc at
//!   a time by canceling cycles, so a child costs one clone plus a few
//!   incremental insertions.
//! - Sub-problems are values: `branch` returns fresh copies and never touches
//!   the parent, which keeps the search free of aliasing.
//!
//! Code cross-refs: `build` (node layout and base arcs), `branch` (conflict
//! scoring and splitting), `tighten` (region propagation), `rule::BranchRule`.

mod branch;
mod build;
mod rule;
mod state;
mod tighten;
mod types;

pub use branch::{Conflict, Obstruction};
pub use rule::{BranchRule, RuleParseError};
pub use state::Legalizer;
pub use types::{Endpoint, LegalizeError, Placement, RelativeConstraint, Separation};
