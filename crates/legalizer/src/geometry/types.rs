//! Passive placement data: rectangles, cells, pins and nets.
//!
//! Conventions
//! - All coordinates are integers. A cell at position `p` occupies the
//!   half-open box `[p.x, p.x + width) × [p.y, p.y + height)`.
//! - Two rectangles overlap only if their intersection has positive area.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Integer point; cell positions are lower-left corners.
pub type Point = Vector2<i64>;

/// Placement axis. Every constraint and flow network lives on one of them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub const BOTH: [Axis; 2] = [Axis::X, Axis::Y];

    #[inline]
    pub fn of(self, p: Point) -> i64 {
        match self {
            Axis::X => p.x,
            Axis::Y => p.y,
        }
    }

    #[inline]
    pub fn other(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }
}

/// Axis-aligned rectangle `(xmin, ymin, xmax, ymax)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub xmin: i64,
    pub ymin: i64,
    pub xmax: i64,
    pub ymax: i64,
}

impl Rect {
    #[inline]
    pub fn new(xmin: i64, ymin: i64, xmax: i64, ymax: i64) -> Self {
        Self {
            xmin,
            ymin,
            xmax,
            ymax,
        }
    }

    #[inline]
    pub fn width(&self) -> i64 {
        self.xmax - self.xmin
    }

    #[inline]
    pub fn height(&self) -> i64 {
        self.ymax - self.ymin
    }

    #[inline]
    pub fn lo(&self, axis: Axis) -> i64 {
        match axis {
            Axis::X => self.xmin,
            Axis::Y => self.ymin,
        }
    }

    #[inline]
    pub fn hi(&self, axis: Axis) -> i64 {
        match axis {
            Axis::X => self.xmax,
            Axis::Y => self.ymax,
        }
    }

    #[inline]
    pub fn set_lo(&mut self, axis: Axis, v: i64) {
        match axis {
            Axis::X => self.xmin = v,
            Axis::Y => self.ymin = v,
        }
    }

    #[inline]
    pub fn set_hi(&mut self, axis: Axis, v: i64) {
        match axis {
            Axis::X => self.xmax = v,
            Axis::Y => self.ymax = v,
        }
    }

    /// Some `min > max`. Used for position ranges, where `min == max` is a
    /// single admissible coordinate and still fine.
    #[inline]
    pub fn is_inverted(&self) -> bool {
        self.xmin > self.xmax || self.ymin > self.ymax
    }

    /// No positive area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.xmin >= self.xmax || self.ymin >= self.ymax
    }

    #[inline]
    pub fn contains_point(&self, p: Point) -> bool {
        self.xmin <= p.x && p.x <= self.xmax && self.ymin <= p.y && p.y <= self.ymax
    }

    #[inline]
    pub fn translate(&self, by: Point) -> Rect {
        Rect::new(
            self.xmin + by.x,
            self.ymin + by.y,
            self.xmax + by.x,
            self.ymax + by.y,
        )
    }

    /// Common part with positive area, if any.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let r = Rect::new(
            self.xmin.max(other.xmin),
            self.ymin.max(other.ymin),
            self.xmax.min(other.xmax),
            self.ymax.min(other.ymax),
        );
        (!r.is_empty()).then_some(r)
    }

    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.intersection(other).is_some()
    }

    #[inline]
    pub fn area(&self) -> i64 {
        if self.is_empty() {
            0
        } else {
            self.width() * self.height()
        }
    }

    /// Smallest rectangle containing both.
    pub fn union(&self, other: &Rect) -> Rect {
        Rect::new(
            self.xmin.min(other.xmin),
            self.ymin.min(other.ymin),
            self.xmax.max(other.xmax),
            self.ymax.max(other.ymax),
        )
    }

    #[inline]
    pub fn half_perimeter(&self) -> i64 {
        self.width() + self.height()
    }
}

/// Movable cell: extent plus the grid step its coordinate must align to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub width: i64,
    pub height: i64,
    pub x_pitch: i64,
    pub y_pitch: i64,
}

impl Cell {
    #[inline]
    pub fn new(width: i64, height: i64, x_pitch: i64, y_pitch: i64) -> Self {
        Self {
            width,
            height,
            x_pitch,
            y_pitch,
        }
    }

    #[inline]
    pub fn extent(&self, axis: Axis) -> i64 {
        match axis {
            Axis::X => self.width,
            Axis::Y => self.height,
        }
    }

    #[inline]
    pub fn pitch(&self, axis: Axis) -> i64 {
        match axis {
            Axis::X => self.x_pitch,
            Axis::Y => self.y_pitch,
        }
    }

    /// Occupied box when the lower-left corner sits at `p`.
    #[inline]
    pub fn rect_at(&self, p: Point) -> Rect {
        Rect::new(p.x, p.y, p.x + self.width, p.y + self.height)
    }
}

/// Pin rectangle, relative to its owning cell or absolute when `owner` is `None`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pin {
    pub owner: Option<usize>,
    pub offset: Rect,
}

impl Pin {
    #[inline]
    pub fn on_cell(cell: usize, offset: Rect) -> Self {
        Self {
            owner: Some(cell),
            offset,
        }
    }

    #[inline]
    pub fn external(at: Rect) -> Self {
        Self {
            owner: None,
            offset: at,
        }
    }

    /// Absolute pin rectangle under `positions`.
    #[inline]
    pub fn resolve(&self, positions: &[Point]) -> Rect {
        match self.owner {
            Some(cell) => self.offset.translate(positions[cell]),
            None => self.offset,
        }
    }
}

/// Ordered pin collection; its cost is the half-perimeter of the pins' bounding box.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Net {
    pub pins: Vec<Pin>,
}

impl Net {
    pub fn new(pins: Vec<Pin>) -> Self {
        Self { pins }
    }

    /// Bounding box of all resolved pins; `None` for a net without pins.
    pub fn bounding_box(&self, positions: &[Point]) -> Option<Rect> {
        self.pins
            .iter()
            .map(|pin| pin.resolve(positions))
            .reduce(|acc, r| acc.union(&r))
    }

    pub fn half_perimeter(&self, positions: &[Point]) -> i64 {
        self.bounding_box(positions)
            .map_or(0, |bb| bb.half_perimeter())
    }
}
