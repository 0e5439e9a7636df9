//! The `Legalizer` value and its queries.

use std::sync::Arc;

use crate::flow::FlowNetwork;
use crate::geometry::{find_overlap, is_aligned, Axis, Point, Rect};

use super::types::{cell_node, Endpoint, Placement, RelativeConstraint, Separation, REFERENCE};

/// One placement sub-problem: two flow networks (x and y) over the same
/// problem data plus the constraints applied so far.
///
/// Branching clones; a `Legalizer` handed to the search is never mutated
/// again. The problem data sits behind an `Arc` because it never changes.
#[derive(Clone, Debug)]
pub struct Legalizer {
    pub(super) placement: Arc<Placement>,
    pub(super) x_flow: FlowNetwork,
    pub(super) y_flow: FlowNetwork,
    /// Admissible lower-left corner per cell (`min..=max` on each axis).
    pub(super) regions: Vec<Rect>,
    pub(super) x_constraints: Vec<RelativeConstraint>,
    pub(super) y_constraints: Vec<RelativeConstraint>,
    pub(super) tightened: bool,
}

impl Legalizer {
    #[inline]
    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.placement.cells.len()
    }

    #[inline]
    pub fn net_count(&self) -> usize {
        self.placement.nets.len()
    }

    #[inline]
    pub fn obstacle_count(&self) -> usize {
        self.placement.obstacles.len()
    }

    #[inline]
    pub fn flow(&self, axis: Axis) -> &FlowNetwork {
        match axis {
            Axis::X => &self.x_flow,
            Axis::Y => &self.y_flow,
        }
    }

    #[inline]
    fn flow_mut(&mut self, axis: Axis) -> &mut FlowNetwork {
        match axis {
            Axis::X => &mut self.x_flow,
            Axis::Y => &mut self.y_flow,
        }
    }

    /// Per-cell admissible position ranges.
    #[inline]
    pub fn regions(&self) -> &[Rect] {
        &self.regions
    }

    /// Relative constraints recorded on `axis`, in application order.
    #[inline]
    pub fn constraints(&self, axis: Axis) -> &[RelativeConstraint] {
        match axis {
            Axis::X => &self.x_constraints,
            Axis::Y => &self.y_constraints,
        }
    }

    #[inline]
    pub fn is_tightened(&self) -> bool {
        self.tightened
    }

    /// Relaxed wirelength: a lower bound on every legal solution below this node.
    #[inline]
    pub fn cost(&self) -> i64 {
        self.x_flow.cost() + self.y_flow.cost()
    }

    pub fn is_feasible(&self) -> bool {
        self.x_flow.is_bounded()
            && self.y_flow.is_bounded()
            && !self.regions.iter().any(Rect::is_inverted)
    }

    /// Relaxed positions, `π(cell) − π(reference)` per axis.
    ///
    /// Integral and consistent with every applied constraint, but cells may
    /// still overlap. Meaningless when infeasible.
    pub fn positions(&self) -> Vec<Point> {
        let xs = self.x_flow.potentials();
        let ys = self.y_flow.potentials();
        (0..self.cell_count())
            .map(|i| {
                let node = cell_node(i);
                Point::new(xs[node] - xs[REFERENCE], ys[node] - ys[REFERENCE])
            })
            .collect()
    }

    /// Feasible and the relaxed positions form a legal placement.
    pub fn is_correct(&self) -> bool {
        self.is_feasible() && self.is_solution_correct(&self.positions())
    }

    /// Pitch-aligned, inside every cell's region, and free of cell/cell and
    /// cell/obstacle overlaps.
    pub fn is_solution_correct(&self, positions: &[Point]) -> bool {
        let placement = &*self.placement;
        if positions.len() != placement.cells.len() {
            return false;
        }
        let placed = placement
            .cells
            .iter()
            .zip(positions)
            .zip(&self.regions)
            .all(|((cell, &p), region)| {
                is_aligned(p.x, cell.x_pitch)
                    && is_aligned(p.y, cell.y_pitch)
                    && region.contains_point(p)
            });
        if !placed {
            return false;
        }
        let mut rects: Vec<Rect> = placement
            .cells
            .iter()
            .zip(positions)
            .map(|(cell, &p)| cell.rect_at(p))
            .collect();
        let mut fixed = vec![false; rects.len()];
        rects.extend_from_slice(&placement.obstacles);
        fixed.resize(rects.len(), true);
        find_overlap(&rects, &fixed).is_none()
    }

    /// Half-perimeter wirelength of explicit `positions`.
    pub fn solution_cost(&self, positions: &[Point]) -> i64 {
        self.placement.wirelength(positions)
    }

    /// Record `constraint` on `axis` and insert its arc.
    ///
    /// Panics if an endpoint names a cell that does not exist.
    pub fn apply_constraint(&mut self, axis: Axis, constraint: RelativeConstraint) {
        let cells = self.cell_count();
        for end in [constraint.first, constraint.second] {
            if let Endpoint::Cell(i) = end {
                assert!(i < cells, "constraint on cell {i}, but there are {cells} cells");
            }
        }
        let (source, dest, cost) = constraint.arc();
        self.flow_mut(axis).add_edge(source, dest, cost);
        match axis {
            Axis::X => self.x_constraints.push(constraint),
            Axis::Y => self.y_constraints.push(constraint),
        }
    }

    #[inline]
    pub fn apply(&mut self, separation: Separation) {
        self.apply_constraint(separation.axis, separation.constraint);
    }

    /// `x(second) − x(first) ≥ min_dist`.
    pub fn add_x_constraint(&mut self, first: Endpoint, second: Endpoint, min_dist: i64) {
        self.apply_constraint(Axis::X, RelativeConstraint::new(first, second, min_dist));
    }

    /// `y(second) − y(first) ≥ min_dist`.
    pub fn add_y_constraint(&mut self, first: Endpoint, second: Endpoint, min_dist: i64) {
        self.apply_constraint(Axis::Y, RelativeConstraint::new(first, second, min_dist));
    }
}
