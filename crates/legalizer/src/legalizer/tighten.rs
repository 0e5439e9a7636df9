//! Region tightening: pitch rounding plus propagation of recorded constraints.
//!
//! Only `regions` change, never the flow networks, so tightening sharpens
//! `is_feasible` / `is_correct` without touching the relaxation.

use crate::geometry::{round_down_to_pitch, round_up_to_pitch, Axis, Cell, Rect};

use super::state::Legalizer;
use super::types::{Endpoint, RelativeConstraint};

impl Legalizer {
    /// Shrink every region to what the recorded constraints and pitches allow.
    ///
    /// Marks the sub-problem so that its children are tightened after each
    /// branching step as well.
    pub fn tighten(&mut self) {
        self.tightened = true;
        align_regions(&mut self.regions, &self.placement.cells);
        let mut changed = true;
        // Bellman-Ford bound: a consistent system settles within n + 1 rounds.
        for _ in 0..=self.regions.len() {
            if !changed || self.regions.iter().any(Rect::is_inverted) {
                break;
            }
            changed = false;
            for (axis, constraints) in [
                (Axis::X, &self.x_constraints),
                (Axis::Y, &self.y_constraints),
            ] {
                for c in constraints {
                    changed |= propagate(&mut self.regions, axis, c);
                }
            }
            changed |= align_regions(&mut self.regions, &self.placement.cells);
        }
    }
}

fn align_regions(regions: &mut [Rect], cells: &[Cell]) -> bool {
    let mut changed = false;
    for (region, cell) in regions.iter_mut().zip(cells) {
        for axis in Axis::BOTH {
            let pitch = cell.pitch(axis);
            let lo = round_up_to_pitch(region.lo(axis), pitch);
            let hi = round_down_to_pitch(region.hi(axis), pitch);
            if lo != region.lo(axis) || hi != region.hi(axis) {
                region.set_lo(axis, lo);
                region.set_hi(axis, hi);
                changed = true;
            }
        }
    }
    changed
}

#[inline]
fn bounds(regions: &[Rect], end: Endpoint, axis: Axis) -> (i64, i64) {
    match end {
        Endpoint::Fixed => (0, 0),
        Endpoint::Cell(i) => (regions[i].lo(axis), regions[i].hi(axis)),
    }
}

/// `second ≥ first + d` raises `lo(second)` and lowers `hi(first)`.
fn propagate(regions: &mut [Rect], axis: Axis, c: &RelativeConstraint) -> bool {
    let (first_lo, first_hi) = bounds(regions, c.first, axis);
    let (second_lo, second_hi) = bounds(regions, c.second, axis);
    let mut changed = false;
    if let Endpoint::Cell(j) = c.second {
        let lo = first_lo + c.min_dist;
        if lo > second_lo {
            regions[j].set_lo(axis, lo);
            changed = true;
        }
    }
    if let Endpoint::Cell(i) = c.first {
        let hi = second_hi - c.min_dist;
        if hi < first_hi {
            regions[i].set_hi(axis, hi);
            changed = true;
        }
    }
    changed
}
