//! Constraint and input types shared by construction, branching and tightening.

use thiserror::Error;

use crate::flow::NodeId;
use crate::geometry::{Axis, Cell, Net, Point, Rect};

/// Flow node of the fixed reference (coordinate 0).
pub(crate) const REFERENCE: NodeId = 0;

/// Flow node of cell `i`.
#[inline]
pub(crate) fn cell_node(i: usize) -> NodeId {
    i + 1
}

/// `(upper, lower)` flow nodes of net `k` in a problem with `cells` cells.
#[inline]
pub(crate) fn net_nodes(cells: usize, k: usize) -> (NodeId, NodeId) {
    (1 + cells + 2 * k, 2 + cells + 2 * k)
}

/// One side of a relative constraint: a movable cell or the fixed origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Fixed,
    Cell(usize),
}

impl Endpoint {
    #[inline]
    pub(crate) fn node(self) -> NodeId {
        match self {
            Endpoint::Fixed => REFERENCE,
            Endpoint::Cell(i) => cell_node(i),
        }
    }

    #[inline]
    pub fn coord(self, positions: &[Point], axis: Axis) -> i64 {
        match self {
            Endpoint::Fixed => 0,
            Endpoint::Cell(i) => axis.of(positions[i]),
        }
    }
}

/// `coord(second) − coord(first) ≥ min_dist` on one axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RelativeConstraint {
    pub first: Endpoint,
    pub second: Endpoint,
    pub min_dist: i64,
}

impl RelativeConstraint {
    #[inline]
    pub fn new(first: Endpoint, second: Endpoint, min_dist: i64) -> Self {
        Self {
            first,
            second,
            min_dist,
        }
    }

    /// Integer complement: `coord(first) − coord(second) ≥ 1 − min_dist`.
    #[inline]
    pub fn negated(&self) -> Self {
        Self {
            first: self.second,
            second: self.first,
            min_dist: 1 - self.min_dist,
        }
    }

    /// How far the constraint is from binding; negative when violated.
    #[inline]
    pub fn slack(&self, positions: &[Point], axis: Axis) -> i64 {
        self.second.coord(positions, axis) - self.first.coord(positions, axis) - self.min_dist
    }

    #[inline]
    pub fn is_satisfied(&self, positions: &[Point], axis: Axis) -> bool {
        self.slack(positions, axis) >= 0
    }

    /// Arc `(source, dest, cost)` encoding the constraint as
    /// `π(first) − π(second) ≤ −min_dist`.
    #[inline]
    pub(crate) fn arc(&self) -> (NodeId, NodeId, i64) {
        (self.second.node(), self.first.node(), -self.min_dist)
    }
}

/// A relative constraint together with the axis it applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Separation {
    pub axis: Axis,
    pub constraint: RelativeConstraint,
}

impl Separation {
    #[inline]
    pub fn new(axis: Axis, first: Endpoint, second: Endpoint, min_dist: i64) -> Self {
        Self {
            axis,
            constraint: RelativeConstraint::new(first, second, min_dist),
        }
    }

    #[inline]
    pub fn negated(&self) -> Self {
        Self {
            axis: self.axis,
            constraint: self.constraint.negated(),
        }
    }

    /// Displacement still required to satisfy the separation (0 if it holds).
    #[inline]
    pub fn shortfall(&self, positions: &[Point]) -> i64 {
        (-self.constraint.slack(positions, self.axis)).max(0)
    }

    #[inline]
    pub fn is_satisfied(&self, positions: &[Point]) -> bool {
        self.constraint.is_satisfied(positions, self.axis)
    }
}

/// Immutable problem data shared by every sub-problem of one search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    pub bbox: Rect,
    pub cells: Vec<Cell>,
    pub nets: Vec<Net>,
    /// Obstacles clipped to `bbox`; those falling outside it are dropped.
    pub obstacles: Vec<Rect>,
}

impl Placement {
    /// Total half-perimeter wirelength of `positions`.
    pub fn wirelength(&self, positions: &[Point]) -> i64 {
        self.nets.iter().map(|net| net.half_perimeter(positions)).sum()
    }
}

/// Rejected construction input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LegalizeError {
    #[error("bounding box {0:?} is inverted")]
    InvalidBoundingBox(Rect),
    #[error("cell {index} has non-positive pitch ({x_pitch}, {y_pitch})")]
    InvalidPitch {
        index: usize,
        x_pitch: i64,
        y_pitch: i64,
    },
    #[error("cell {index} has negative extent ({width} x {height})")]
    NegativeExtent {
        index: usize,
        width: i64,
        height: i64,
    },
    #[error("net {net}, pin {pin} refers to cell {owner}, but there are {cells} cells")]
    UnknownOwner {
        net: usize,
        pin: usize,
        owner: usize,
        cells: usize,
    },
}
