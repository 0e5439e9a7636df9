//! Arena entries, search labels and numeric sentinels for the flow network.

/// Distance given to nodes a shortest-path pass never reaches.
///
/// Kept well below `i64::MAX / 2` so that adding one arc cost (or one
/// distance) to it cannot overflow.
pub const UNREACHABLE: i64 = i64::MAX / 4;

/// Residual capacity of a forward arc. Any bottleneck at or above this value
/// means the cycle can carry arbitrary flow.
pub const UNBOUNDED_FLOW: i64 = UNREACHABLE;

pub type NodeId = usize;
pub type EdgeId = usize;

/// Directed arc with its current flow.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
    pub source: NodeId,
    pub dest: NodeId,
    pub cost: i64,
    pub flow: i64,
}

impl Edge {
    #[inline]
    pub fn new(source: NodeId, dest: NodeId, cost: i64) -> Self {
        Self::with_flow(source, dest, cost, 0)
    }

    #[inline]
    pub fn with_flow(source: NodeId, dest: NodeId, cost: i64, flow: i64) -> Self {
        Self {
            source,
            dest,
            cost,
            flow,
        }
    }

    /// `cost − (π(dest) − π(source))`; never negative at optimality.
    #[inline]
    pub fn reduced_cost(&self, potentials: &[i64]) -> i64 {
        self.cost - (potentials[self.dest] - potentials[self.source])
    }

    /// Residual step out of `node`: the forward arc if `node` is the source,
    /// the reversed arc (negated cost) if `node` is the dest and flow can be
    /// pushed back.
    #[inline]
    pub(crate) fn residual_step(&self, node: NodeId) -> Option<(NodeId, i64)> {
        if self.source == node {
            Some((self.dest, self.cost))
        } else if self.flow > 0 {
            Some((self.source, -self.cost))
        } else {
            None
        }
    }
}

/// Shortest-path label: best distance so far and the arc it arrived through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Label {
    pub dist: i64,
    pub incoming: Option<EdgeId>,
}

impl Label {
    pub const UNREACHED: Label = Label {
        dist: UNREACHABLE,
        incoming: None,
    };

    #[inline]
    pub fn is_reached(&self) -> bool {
        self.dist < UNREACHABLE
    }
}

/// Pending relaxation in the label-correcting queue.
#[derive(Clone, Copy, Debug)]
pub(crate) struct QueueEntry {
    pub node: NodeId,
    pub label: Label,
}

/// Negative cycle closed by a candidate arc, as found by the probe.
#[derive(Clone, Debug)]
pub(crate) struct Cycle {
    /// Path cost back to the arc's source plus the arc's own cost (< 0).
    pub gain: i64,
    /// Arcs traversed along their direction (flow increases).
    pub forward: Vec<EdgeId>,
    /// Arcs traversed against their direction (flow decreases).
    pub backward: Vec<EdgeId>,
    /// Smallest flow among `backward`, or `UNBOUNDED_FLOW` if there is none.
    pub bottleneck: i64,
}

impl Cycle {
    #[inline]
    pub fn is_unbounded(&self) -> bool {
        self.bottleneck >= UNBOUNDED_FLOW
    }
}
