//! Incremental min-cost flow over difference constraints.
//!
//! Purpose
//! - Keep an optimal flow, and the node potentials that certify it, for a
//!   growing set of arcs. Each arc `(source, dest, cost)` is the difference
//!   constraint `π(dest) − π(source) ≤ cost` on the potentials, and the
//!   potentials double as coordinates.
//! - Restore optimality after every insertion by canceling negative cycles
//!   that run through the new arc, so a legalizer can add one separation at a
//!   time and re-query cost and feasibility cheaply.
//!
//! Why this design
//! - Edges live in one arena and adjacency lists hold arena indices only, so
//!   collapsing a duplicate `(source, dest)` pair rewrites one slot in place
//!   and never leaves a dangling index behind.
//! - Forward arcs have unbounded capacity. A negative cycle made of forward
//!   arcs only therefore means the constraint system has no solution; the
//!   network records that in a sticky `bounded` flag instead of erroring.
//!
//! Code cross-refs: `types::{Edge, Label, QueueEntry}`, `network::FlowNetwork`,
//! `check` (invariant oracles used by tests and debug assertions).

mod check;
mod network;
mod types;

pub use network::FlowNetwork;
pub use types::{Edge, EdgeId, NodeId, UNBOUNDED_FLOW, UNREACHABLE};

#[cfg(test)]
mod tests;
