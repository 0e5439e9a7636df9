//! Branching: pick an overlapping pair and split on how to separate it.
//!
//! A cell/cell or cell/obstacle pair can be separated in four ways (left,
//! right, below, above). Child `k` applies separation `k` plus the negation of
//! separations `0..k`, so the children are mutually exclusive and together
//! cover every non-overlapping arrangement of the pair. Infeasible children are
//! dropped; the rest are returned by increasing relaxed cost.
//!
//! When no pair overlaps but a coordinate is off its pitch grid, the same
//! scheme splits that coordinate into "at or below the grid point under it"
//! and "at or above the grid point over it".

use crate::geometry::{round_down_to_pitch, round_up_to_pitch, Axis, Point, Rect};

use super::rule::BranchRule;
use super::state::Legalizer;
use super::types::{Endpoint, Separation};

/// What a cell overlaps with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Obstruction {
    Cell(usize),
    Obstacle(usize),
}

/// An overlapping pair and the four ways to separate it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Conflict {
    pub cell: usize,
    pub other: Obstruction,
    /// Intersection of the two rectangles (positive area).
    pub overlap: Rect,
    /// Width and height of the cell, then of the obstruction.
    pub dimensions: [i64; 4],
    pub separations: [Separation; 4],
}

impl Legalizer {
    /// Overlapping pairs under the relaxed positions: cell pairs `(i, j)` with
    /// `i < j` first, then cell/obstacle pairs, both in index order.
    pub fn conflicts(&self) -> Vec<Conflict> {
        self.conflicts_at(&self.positions())
    }

    fn conflicts_at(&self, positions: &[Point]) -> Vec<Conflict> {
        let placement = self.placement();
        let cells = &placement.cells;
        let rects: Vec<Rect> = cells
            .iter()
            .zip(positions)
            .map(|(c, &p)| c.rect_at(p))
            .collect();
        let mut out = Vec::new();
        for i in 0..cells.len() {
            for j in i + 1..cells.len() {
                let Some(overlap) = rects[i].intersection(&rects[j]) else {
                    continue;
                };
                let (a, b) = (cells[i], cells[j]);
                let (ci, cj) = (Endpoint::Cell(i), Endpoint::Cell(j));
                out.push(Conflict {
                    cell: i,
                    other: Obstruction::Cell(j),
                    overlap,
                    dimensions: [a.width, a.height, b.width, b.height],
                    separations: [
                        Separation::new(Axis::X, ci, cj, a.width),
                        Separation::new(Axis::X, cj, ci, b.width),
                        Separation::new(Axis::Y, ci, cj, a.height),
                        Separation::new(Axis::Y, cj, ci, b.height),
                    ],
                });
            }
        }
        for (i, rect) in rects.iter().enumerate() {
            for (k, obstacle) in placement.obstacles.iter().enumerate() {
                let Some(overlap) = rect.intersection(obstacle) else {
                    continue;
                };
                let a = cells[i];
                let ci = Endpoint::Cell(i);
                let fixed = Endpoint::Fixed;
                out.push(Conflict {
                    cell: i,
                    other: Obstruction::Obstacle(k),
                    overlap,
                    dimensions: [a.width, a.height, obstacle.width(), obstacle.height()],
                    separations: [
                        Separation::new(Axis::X, fixed, ci, obstacle.xmax),
                        Separation::new(Axis::X, ci, fixed, a.width - obstacle.xmin),
                        Separation::new(Axis::Y, fixed, ci, obstacle.ymax),
                        Separation::new(Axis::Y, ci, fixed, a.height - obstacle.ymin),
                    ],
                });
            }
        }
        out
    }

    /// Highest-scoring conflict under `rule`; ties go to the first one.
    pub fn select_conflict(&self, rule: BranchRule) -> Option<Conflict> {
        let positions = self.positions();
        let mut best: Option<(i64, Conflict)> = None;
        for conflict in self.conflicts_at(&positions) {
            let score = self.score(&conflict, &positions, rule);
            if best.as_ref().map_or(true, |(s, _)| score > *s) {
                best = Some((score, conflict));
            }
        }
        best.map(|(_, conflict)| conflict)
    }

    fn score(&self, conflict: &Conflict, positions: &[Point], rule: BranchRule) -> i64 {
        let shortfalls = conflict.separations.map(|s| s.shortfall(positions));
        let dims = conflict.dimensions;
        match rule {
            BranchRule::Area => conflict.overlap.area(),
            BranchRule::MinDisplacement => shortfalls.into_iter().min().unwrap_or(0),
            BranchRule::MaxDisplacement => shortfalls.into_iter().max().unwrap_or(0),
            // Sums over a fixed count of four order like means.
            BranchRule::AvgDisplacement => shortfalls.into_iter().sum(),
            BranchRule::MinDimension => dims.into_iter().min().unwrap_or(0),
            BranchRule::MaxDimension => dims.into_iter().max().unwrap_or(0),
            BranchRule::AvgDimension => dims.into_iter().sum(),
            BranchRule::CostProbe => self.cheapest_separation(conflict, false),
            BranchRule::CostTrial => self.cheapest_separation(conflict, true),
        }
    }

    /// Lowest relaxed cost reachable by applying one separation, or `i64::MAX`
    /// when none of them is feasible (such a pair is settled immediately).
    fn cheapest_separation(&self, conflict: &Conflict, trial: bool) -> i64 {
        conflict
            .separations
            .iter()
            .filter_map(|&sep| {
                if trial {
                    let mut scratch = self.clone();
                    scratch.apply(sep);
                    scratch.is_feasible().then(|| scratch.cost())
                } else {
                    let (source, dest, cost) = sep.constraint.arc();
                    let other = self.flow(sep.axis.other()).cost();
                    self.flow(sep.axis)
                        .try_edge(source, dest, cost)
                        .map(|projected| projected + other)
                }
            })
            .min()
            .unwrap_or(i64::MAX)
    }

    /// Split on the first off-grid coordinate, if any.
    fn pitch_separations(&self, positions: &[Point]) -> Option<[Separation; 2]> {
        let cells = &self.placement().cells;
        cells.iter().zip(positions).enumerate().find_map(|(i, (cell, &p))| {
            Axis::BOTH.into_iter().find_map(|axis| {
                let pitch = cell.pitch(axis);
                let coord = axis.of(p);
                if coord.rem_euclid(pitch) == 0 {
                    return None;
                }
                let ci = Endpoint::Cell(i);
                Some([
                    Separation::new(axis, Endpoint::Fixed, ci, round_up_to_pitch(coord, pitch)),
                    Separation::new(axis, ci, Endpoint::Fixed, -round_down_to_pitch(coord, pitch)),
                ])
            })
        })
    }

    /// Children of this sub-problem under `rule`, cheapest first.
    ///
    /// Empty when the sub-problem is infeasible or already correct.
    pub fn branch(&self, rule: BranchRule) -> Vec<Legalizer> {
        if !self.is_feasible() {
            return Vec::new();
        }
        if let Some(conflict) = self.select_conflict(rule) {
            tracing::trace!(cell = conflict.cell, other = ?conflict.other, %rule, "branching on overlap");
            return self.split(&conflict.separations);
        }
        match self.pitch_separations(&self.positions()) {
            Some(separations) => self.split(&separations),
            None => Vec::new(),
        }
    }

    /// Child `k` gets `separations[k]` and the negation of every earlier one.
    pub fn split(&self, separations: &[Separation]) -> Vec<Legalizer> {
        let mut children = Vec::with_capacity(separations.len());
        let mut rest = self.clone();
        for (k, &sep) in separations.iter().enumerate() {
            let mut child = rest.clone();
            child.apply(sep);
            if child.tightened {
                child.tighten();
            }
            if child.is_feasible() {
                children.push(child);
            }
            if k + 1 < separations.len() {
                rest.apply(sep.negated());
                if !rest.is_feasible() {
                    break;
                }
            }
        }
        children.sort_by_key(Legalizer::cost);
        children
    }
}
