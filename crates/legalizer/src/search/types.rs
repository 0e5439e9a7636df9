//! Configuration, counters and the final report of a search run.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::legalizer::BranchRule;

/// Search configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchCfg {
    pub rule: BranchRule,
    /// Wall-clock budget measured from the last improvement (or the start).
    pub stall_budget: Duration,
    /// The stall clock is read once every `poll_interval` evaluated nodes.
    pub poll_interval: u64,
    /// Hard cap on evaluated nodes; `None` means no cap.
    pub node_limit: Option<u64>,
    /// Tighten the root so that every sub-problem carries pitch-rounded,
    /// constraint-propagated regions.
    pub tighten: bool,
    /// Cost of a known legal solution; only strictly cheaper ones are kept.
    pub baseline_cost: Option<i64>,
}

impl Default for SearchCfg {
    fn default() -> Self {
        Self {
            rule: BranchRule::Area,
            stall_budget: Duration::from_millis(500),
            poll_interval: 1000,
            node_limit: None,
            tighten: true,
            baseline_cost: None,
        }
    }
}

/// How a search ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    /// Exhausted with a solution: the best one found is optimal.
    Optimal,
    /// Budget ran out after finding at least one solution.
    Unproven,
    /// Exhausted without any solution (better than the baseline, if given).
    Infeasible,
    /// Budget ran out before any solution was found.
    BudgetExceeded,
}

impl Outcome {
    pub fn from_flags(found: bool, exhausted: bool) -> Self {
        match (found, exhausted) {
            (true, true) => Outcome::Optimal,
            (true, false) => Outcome::Unproven,
            (false, true) => Outcome::Infeasible,
            (false, false) => Outcome::BudgetExceeded,
        }
    }

    /// One-letter report code.
    pub fn code(self) -> char {
        match self {
            Outcome::Optimal => 'O',
            Outcome::Unproven => 'U',
            Outcome::Infeasible => 'I',
            Outcome::BudgetExceeded => 'F',
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Node counters. Every evaluated node lands in exactly one of the other
/// buckets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    pub evaluated: u64,
    pub bound_pruned: u64,
    pub feasibility_pruned: u64,
    pub solutions: u64,
    pub branched: u64,
    /// Feasible, not correct, yet without children.
    pub dead_ends: u64,
}

/// A new incumbent and when it was found.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Improvement {
    pub cost: i64,
    pub elapsed: Duration,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchReport {
    pub outcome: Outcome,
    pub best_cost: Option<i64>,
    pub best_positions: Option<Vec<Point>>,
    pub baseline_cost: Option<i64>,
    pub stats: SearchStats,
    pub elapsed: Duration,
    pub improvements: Vec<Improvement>,
}

impl SearchReport {
    /// Cost of the best known legal solution, search result or baseline.
    pub fn best_known_cost(&self) -> Option<i64> {
        self.best_cost.or(self.baseline_cost)
    }
}
