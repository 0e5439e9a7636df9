//! Curated internal API (UNSTABLE).
//!
//! Important
//! - This is not a public API. It is a convenience surface for the CLI,
//!   benches and experiments. Breaking changes are allowed and expected.

// Flow networks
pub use crate::flow::{Edge, EdgeId, FlowNetwork, NodeId, UNBOUNDED_FLOW, UNREACHABLE};
// Geometry
pub use crate::geometry::{
    find_overlap, is_aligned, round_down_to_pitch, round_up_to_pitch, Axis, Cell, Net, Pin, Point,
    Rect,
};
// Sub-problems and branching
pub use crate::legalizer::{
    BranchRule, Conflict, Endpoint, LegalizeError, Legalizer, Obstruction, Placement,
    RelativeConstraint, RuleParseError, Separation,
};
// Search
pub use crate::search::{solve, Improvement, Outcome, SearchCfg, SearchReport, SearchStats};
// Instances
pub use crate::instance::{
    draw_instance, Instance, InstanceCfg, ParseError, ReplayToken as InstanceReplay,
};
