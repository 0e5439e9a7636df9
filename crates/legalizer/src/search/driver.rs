//! Depth-first branch-and-bound over `Legalizer` sub-problems.

use std::time::{Duration, Instant};

use crate::geometry::Point;
use crate::legalizer::Legalizer;

use super::types::{Improvement, Outcome, SearchCfg, SearchReport, SearchStats};

/// Run branch-and-bound from `root` until the stack is empty or a budget
/// runs out.
pub fn solve(root: &Legalizer, cfg: &SearchCfg) -> SearchReport {
    SearchRunner::new(cfg).run(root)
}

/// Why a budget stopped the search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stop {
    Stalled,
    NodeLimit,
}

/// Runner carrying the stack, the incumbent and the counters.
struct SearchRunner<'a> {
    cfg: &'a SearchCfg,
    stack: Vec<Legalizer>,
    best_cost: Option<i64>,
    best_positions: Option<Vec<Point>>,
    stats: SearchStats,
    improvements: Vec<Improvement>,
    started: Instant,
    last_improvement: Instant,
}

impl<'a> SearchRunner<'a> {
    fn new(cfg: &'a SearchCfg) -> Self {
        let now = Instant::now();
        Self {
            cfg,
            stack: Vec::new(),
            best_cost: None,
            best_positions: None,
            stats: SearchStats::default(),
            improvements: Vec::new(),
            started: now,
            last_improvement: now,
        }
    }

    /// Incumbent bound: the best solution found, else the baseline.
    #[inline]
    fn bound(&self) -> Option<i64> {
        self.best_cost.or(self.cfg.baseline_cost)
    }

    fn run(mut self, root: &Legalizer) -> SearchReport {
        let mut root = root.clone();
        if self.cfg.tighten {
            root.tighten();
        }
        self.stack.push(root);

        let mut stop = None;
        while let Some(node) = self.stack.pop() {
            self.visit(node);
            stop = self.budget_check();
            if stop.is_some() {
                break;
            }
        }
        if let Some(reason) = stop {
            tracing::debug!(?reason, pending = self.stack.len(), "search stopped early");
        }
        self.finish(stop.is_none())
    }

    fn visit(&mut self, node: Legalizer) {
        self.stats.evaluated += 1;
        let cost = node.cost();
        if self.bound().is_some_and(|bound| cost >= bound) {
            self.stats.bound_pruned += 1;
        } else if node.is_correct() {
            self.stats.solutions += 1;
            self.record(cost, node.positions());
        } else if node.is_feasible() {
            let children = node.branch(self.cfg.rule);
            if children.is_empty() {
                self.stats.dead_ends += 1;
            } else {
                self.stats.branched += 1;
                // Reversed so the cheapest child is popped first.
                self.stack.extend(children.into_iter().rev());
            }
        } else {
            self.stats.feasibility_pruned += 1;
        }
    }

    fn record(&mut self, cost: i64, positions: Vec<Point>) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.started);
        tracing::debug!(
            cost,
            evaluated = self.stats.evaluated,
            elapsed_ms = elapsed.as_millis() as u64,
            "new incumbent"
        );
        self.best_cost = Some(cost);
        self.best_positions = Some(positions);
        self.improvements.push(Improvement { cost, elapsed });
        self.last_improvement = now;
    }

    fn budget_check(&self) -> Option<Stop> {
        if self
            .cfg
            .node_limit
            .is_some_and(|limit| self.stats.evaluated >= limit)
        {
            return Some(Stop::NodeLimit);
        }
        let poll = self.cfg.poll_interval.max(1);
        if self.stats.evaluated % poll == 0 {
            let stalled = self.last_improvement.elapsed();
            tracing::debug!(
                evaluated = self.stats.evaluated,
                pending = self.stack.len(),
                stalled_ms = stalled.as_millis() as u64,
                "search poll"
            );
            if stalled > self.cfg.stall_budget {
                return Some(Stop::Stalled);
            }
        }
        None
    }

    fn finish(self, exhausted: bool) -> SearchReport {
        let outcome = Outcome::from_flags(self.best_cost.is_some(), exhausted);
        let elapsed: Duration = self.started.elapsed();
        tracing::info!(
            outcome = %outcome,
            best = ?self.best_cost,
            baseline = ?self.cfg.baseline_cost,
            evaluated = self.stats.evaluated,
            bound_pruned = self.stats.bound_pruned,
            feasibility_pruned = self.stats.feasibility_pruned,
            elapsed_ms = elapsed.as_millis() as u64,
            "search finished"
        );
        SearchReport {
            outcome,
            best_cost: self.best_cost,
            best_positions: self.best_positions,
            baseline_cost: self.cfg.baseline_cost,
            stats: self.stats,
            elapsed,
            improvements: self.improvements,
        }
    }
}
