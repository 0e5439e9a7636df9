//! `FlowNetwork`: arc arena, cycle canceling and potential recomputation.

use std::collections::VecDeque;

use super::types::{Cycle, Edge, EdgeId, Label, NodeId, QueueEntry, UNBOUNDED_FLOW};

/// Incremental min-cost flow with potentials.
///
/// Invariants:
/// - `cost == Σ −edge.cost · edge.flow` over all arcs.
/// - While `bounded`: every arc satisfies `π(dest) − π(source) ≤ cost`, with
///   equality on arcs that carry flow (nodes unreachable from node 0 keep the
///   `UNREACHABLE` potential and are exempt).
/// - `bounded` only ever goes from `true` to `false`.
///
/// Node 0 is the reference; its potential is the coordinate origin.
#[derive(Clone, Debug)]
pub struct FlowNetwork {
    pub(super) edges: Vec<Edge>,
    pub(super) adjacency: Vec<Vec<EdgeId>>,
    pub(super) potentials: Vec<i64>,
    pub(super) cost: i64,
    pub(super) bounded: bool,
}

impl FlowNetwork {
    /// Build from an arc set whose flows are already optimal (e.g. a forest of
    /// flow-carrying arcs) and compute potentials from node 0.
    ///
    /// Panics on self-loops, node ids out of range or negative flows.
    pub fn new(node_count: usize, edges: Vec<Edge>) -> Self {
        let mut adjacency = vec![Vec::new(); node_count];
        for (idx, e) in edges.iter().enumerate() {
            assert_arc(node_count, e.source, e.dest);
            assert!(e.flow >= 0, "negative initial flow {} on arc {idx}", e.flow);
            adjacency[e.source].push(idx);
            adjacency[e.dest].push(idx);
        }
        let cost = edges.iter().map(|e| -e.cost * e.flow).sum();
        let mut net = Self {
            edges,
            adjacency,
            potentials: vec![0; node_count],
            cost,
            bounded: true,
        };
        net.recompute_potentials();
        net
    }

    /// Network with `node_count` nodes and no arcs.
    pub fn empty(node_count: usize) -> Self {
        Self::new(node_count, Vec::new())
    }

    #[inline]
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Current potential per node; doubles as the node's coordinate.
    #[inline]
    pub fn potentials(&self) -> &[i64] {
        &self.potentials
    }

    /// Running total `Σ −cost · flow`. Only meaningful while bounded.
    #[inline]
    pub fn cost(&self) -> i64 {
        self.cost
    }

    #[inline]
    pub fn is_bounded(&self) -> bool {
        self.bounded
    }

    /// Arena index of the arc `source → dest`, if present.
    pub fn find_edge(&self, source: NodeId, dest: NodeId) -> Option<EdgeId> {
        self.adjacency.get(source)?.iter().copied().find(|&e| {
            let edge = &self.edges[e];
            edge.source == source && edge.dest == dest
        })
    }

    /// Insert `π(dest) − π(source) ≤ cost` and restore optimality.
    ///
    /// A second arc for the same `(source, dest)` pair only takes effect when
    /// strictly cheaper; it then replaces the old arc and inherits its flow.
    /// Panics on self-loops and node ids out of range.
    pub fn add_edge(&mut self, source: NodeId, dest: NodeId, cost: i64) {
        self.insert_edge(source, dest, cost);
        if self.bounded {
            self.recompute_potentials();
        }
        debug_assert!(self.check_cost_bookkeeping(), "cost bookkeeping drifted");
    }

    /// Insert many arcs, recomputing potentials once at the end.
    pub fn add_edges<I>(&mut self, arcs: I)
    where
        I: IntoIterator<Item = (NodeId, NodeId, i64)>,
    {
        for (source, dest, cost) in arcs {
            self.insert_edge(source, dest, cost);
        }
        if self.bounded {
            self.recompute_potentials();
        }
        debug_assert!(self.check_cost_bookkeeping(), "cost bookkeeping drifted");
    }

    /// Cost `add_edge(source, dest, cost)` would produce, without mutating.
    ///
    /// Returns `None` when the insertion would make (or the network already
    /// is) unbounded. A single probe settles the common case where no
    /// improving cycle exists; otherwise the insertion runs on a scratch copy.
    pub fn try_edge(&self, source: NodeId, dest: NodeId, cost: i64) -> Option<i64> {
        assert_arc(self.node_count(), source, dest);
        if !self.bounded {
            return None;
        }
        let needs_simulation = match self.find_edge(source, dest) {
            Some(idx) => cost < self.edges[idx].cost,
            None => self.improving_cycle(source, dest, cost, None).is_some(),
        };
        if !needs_simulation {
            return Some(self.cost);
        }
        let mut scratch = self.clone();
        scratch.insert_edge(source, dest, cost);
        scratch.bounded.then_some(scratch.cost)
    }

    /// Insert or collapse the arc and cancel cycles; potentials are left stale.
    fn insert_edge(&mut self, source: NodeId, dest: NodeId, cost: i64) {
        assert_arc(self.node_count(), source, dest);
        let idx = match self.find_edge(source, dest) {
            Some(idx) => {
                let old = self.edges[idx];
                if cost >= old.cost {
                    return;
                }
                // The cheaper arc takes over the slot and the flow it carried.
                self.edges[idx].cost = cost;
                self.cost += old.flow * (old.cost - cost);
                idx
            }
            None => {
                let idx = self.edges.len();
                self.edges.push(Edge::new(source, dest, cost));
                self.adjacency[source].push(idx);
                self.adjacency[dest].push(idx);
                idx
            }
        };
        self.cancel_cycles(idx);
    }

    /// Push flow around negative cycles through arc `idx` until none is left
    /// or one turns out to have unbounded capacity.
    fn cancel_cycles(&mut self, idx: EdgeId) {
        let Edge {
            source, dest, cost, ..
        } = self.edges[idx];
        while self.bounded {
            let Some(cycle) = self.improving_cycle(source, dest, cost, Some(idx)) else {
                break;
            };
            if cycle.is_unbounded() {
                tracing::trace!(source, dest, cost, "unbounded cycle");
                self.bounded = false;
                break;
            }
            let amount = cycle.bottleneck;
            for &e in &cycle.forward {
                self.edges[e].flow += amount;
            }
            for &e in &cycle.backward {
                self.edges[e].flow -= amount;
            }
            self.edges[idx].flow += amount;
            self.cost -= amount * cycle.gain;
            tracing::trace!(source, dest, amount, gain = cycle.gain, "canceled cycle");
        }
    }

    /// Shortest residual path `dest ⇝ source`; a negative cycle exists when
    /// its cost plus `cost` is below zero. `skip` hides one arc from the
    /// search (the arc the cycle is closed with).
    pub(crate) fn improving_cycle(
        &self,
        source: NodeId,
        dest: NodeId,
        cost: i64,
        skip: Option<EdgeId>,
    ) -> Option<Cycle> {
        let labels = self.shortest_paths(dest, skip);
        let reach = labels[source];
        if !reach.is_reached() {
            return None;
        }
        let gain = reach.dist + cost;
        if gain >= 0 {
            return None;
        }
        let mut cycle = Cycle {
            gain,
            forward: Vec::new(),
            backward: Vec::new(),
            bottleneck: UNBOUNDED_FLOW,
        };
        let mut node = source;
        while let Some(e) = labels[node].incoming {
            let edge = &self.edges[e];
            if edge.dest == node {
                cycle.forward.push(e);
                node = edge.source;
            } else {
                cycle.backward.push(e);
                cycle.bottleneck = cycle.bottleneck.min(edge.flow);
                node = edge.dest;
            }
        }
        debug_assert_eq!(node, dest, "predecessor chain must end at the root");
        Some(cycle)
    }

    /// Label-correcting single-source shortest paths over the residual graph.
    ///
    /// Requires that the residual graph (minus `skip`) has no negative cycle,
    /// which holds whenever the current flow is optimal.
    pub(crate) fn shortest_paths(&self, root: NodeId, skip: Option<EdgeId>) -> Vec<Label> {
        let n = self.node_count();
        let mut labels = vec![Label::UNREACHED; n];
        let mut queue = VecDeque::new();
        labels[root] = Label {
            dist: 0,
            incoming: None,
        };
        queue.push_back(QueueEntry {
            node: root,
            label: labels[root],
        });
        let mut processed: usize = 0;
        while let Some(entry) = queue.pop_front() {
            if entry.label.dist > labels[entry.node].dist {
                continue; // stale
            }
            processed += 1;
            debug_assert!(
                processed <= n.saturating_mul(self.edges.len() + 1),
                "negative residual cycle"
            );
            for &e in &self.adjacency[entry.node] {
                if Some(e) == skip {
                    continue;
                }
                let Some((next, step)) = self.edges[e].residual_step(entry.node) else {
                    continue;
                };
                let dist = entry.label.dist + step;
                if dist < labels[next].dist {
                    labels[next] = Label {
                        dist,
                        incoming: Some(e),
                    };
                    queue.push_back(QueueEntry {
                        node: next,
                        label: labels[next],
                    });
                }
            }
        }
        labels
    }

    /// Fresh shortest-path pass from node 0. Unreached nodes get `UNREACHABLE`.
    fn recompute_potentials(&mut self) {
        if self.node_count() == 0 {
            return;
        }
        self.potentials = self
            .shortest_paths(0, None)
            .into_iter()
            .map(|label| label.dist)
            .collect();
        debug_assert!(self.check_duality(), "potentials violate duality");
    }
}

#[inline]
fn assert_arc(node_count: usize, source: NodeId, dest: NodeId) {
    assert!(source != dest, "self-loop on node {source}");
    assert!(
        source < node_count && dest < node_count,
        "arc {source} -> {dest} out of range for {node_count} nodes"
    );
}
