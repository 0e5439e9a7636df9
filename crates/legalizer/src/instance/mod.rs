//! Problem instances: the data a legalization run starts from.
//!
//! An `Instance` is the raw input (bounding box, cells, obstacles, nets and
//! an optional baseline placement). It reads and writes a compact text
//! format (`text`), round-trips through serde as JSON, and can be drawn at
//! random with a legal baseline (`rand`).

mod rand;
mod text;

use serde::{Deserialize, Serialize};

use crate::geometry::{Cell, Net, Point, Rect};
use crate::legalizer::{LegalizeError, Legalizer};

pub use self::rand::{draw_instance, InstanceCfg, ReplayToken};
pub use text::ParseError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    pub bbox: Rect,
    pub cells: Vec<Cell>,
    #[serde(default)]
    pub obstacles: Vec<Rect>,
    #[serde(default)]
    pub nets: Vec<Net>,
    /// One lower-left corner per cell, when a starting placement is known.
    #[serde(default)]
    pub baseline: Option<Vec<Point>>,
}

impl Instance {
    /// Root sub-problem for this instance.
    pub fn legalizer(&self) -> Result<Legalizer, LegalizeError> {
        Legalizer::new(
            self.bbox,
            self.cells.clone(),
            self.nets.clone(),
            self.obstacles.clone(),
        )
    }

    /// Half-perimeter wirelength of the baseline; `None` without a complete
    /// baseline.
    pub fn baseline_cost(&self) -> Option<i64> {
        let baseline = self.baseline.as_deref()?;
        if baseline.len() != self.cells.len() {
            return None;
        }
        Some(self.nets.iter().map(|n| n.half_perimeter(baseline)).sum())
    }
}

#[cfg(test)]
mod tests;
