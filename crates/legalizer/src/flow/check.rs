//! Invariant oracles for `FlowNetwork`.
//!
//! Cheap enough for debug assertions on every insertion, and public so tests
//! (including the legalizer's) can use them directly.

use super::network::FlowNetwork;
use super::types::{EdgeId, NodeId, UNREACHABLE};

impl FlowNetwork {
    /// `Σ −cost · flow` recomputed from the arena.
    pub fn recomputed_cost(&self) -> i64 {
        self.edges.iter().map(|e| -e.cost * e.flow).sum()
    }

    pub fn check_cost_bookkeeping(&self) -> bool {
        self.cost == self.recomputed_cost()
    }

    /// Arcs whose reduced cost is negative, or positive while carrying flow.
    /// Arcs touching a node without a finite potential are skipped.
    pub fn duality_violations(&self) -> Vec<EdgeId> {
        if !self.bounded {
            return Vec::new();
        }
        let pi = &self.potentials;
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, e)| pi[e.source] < UNREACHABLE && pi[e.dest] < UNREACHABLE)
            .filter(|(_, e)| {
                let reduced = e.reduced_cost(pi);
                reduced < 0 || (e.flow > 0 && reduced != 0)
            })
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Vacuously true once unbounded.
    pub fn check_duality(&self) -> bool {
        self.duality_violations().is_empty()
    }

    /// Inflow minus outflow at `node`. Cycle canceling never changes it.
    pub fn excess(&self, node: NodeId) -> i64 {
        self.adjacency[node]
            .iter()
            .map(|&e| {
                let edge = &self.edges[e];
                if edge.dest == node {
                    edge.flow
                } else {
                    -edge.flow
                }
            })
            .sum()
    }
}
