//! Random placement instances with a legal baseline (slot grid + replay tokens).
//!
//! Model
//! - The bounding box is a grid of equal slots, one per cell and one per
//!   obstacle, shuffled. Each cell sits at the lower-left corner of its slot
//!   and each obstacle stays inside its own slot, so the baseline is legal.
//! - Slot sides are multiples of every pitch in use, which keeps slot corners
//!   on each cell's grid.
//! - Nets pick random pins on random cells; some pins are external points.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::geometry::{Cell, Net, Pin, Point, Rect};

use super::Instance;

/// Generator configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InstanceCfg {
    pub cells: usize,
    pub nets: usize,
    pub obstacles: usize,
    /// Cell sides are drawn from `1..=max_side`.
    pub max_side: i64,
    /// Pitches are drawn from `1..=max_pitch`.
    pub max_pitch: i64,
    pub min_pins: usize,
    pub max_pins: usize,
    /// Probability that a pin is external. Clamped to [0, 1].
    pub external_pin_prob: f64,
}

impl Default for InstanceCfg {
    fn default() -> Self {
        Self {
            cells: 6,
            nets: 4,
            obstacles: 1,
            max_side: 4,
            max_pitch: 2,
            min_pins: 2,
            max_pins: 4,
            external_pin_prob: 0.1,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    pub fn new(seed: u64, index: u64) -> Self {
        Self { seed, index }
    }

    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64 finalizer.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

fn gcd(a: i64, b: i64) -> i64 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

/// Smallest multiple of every pitch in `1..=max_pitch` that is at least `side`.
fn slot_side(side: i64, max_pitch: i64) -> i64 {
    let lcm = (1..=max_pitch).fold(1, |l, p| l / gcd(l, p) * p);
    (side + lcm - 1) / lcm * lcm
}

/// Draw one instance. The baseline is always a legal solution.
pub fn draw_instance(cfg: InstanceCfg, tok: ReplayToken) -> Instance {
    let mut rng = tok.to_std_rng();
    let max_side = cfg.max_side.max(1);
    let max_pitch = cfg.max_pitch.max(1);
    let slot = slot_side(max_side, max_pitch);

    let slots = (cfg.cells + cfg.obstacles).max(1);
    let columns = (1..=slots).find(|c| c * c >= slots).unwrap_or(slots);
    let rows = slots.div_ceil(columns);
    let bbox = Rect::new(0, 0, columns as i64 * slot, rows as i64 * slot);
    let mut corners: Vec<Point> = (0..rows * columns)
        .map(|k| Point::new((k % columns) as i64 * slot, (k / columns) as i64 * slot))
        .collect();
    corners.shuffle(&mut rng);

    let cells: Vec<Cell> = (0..cfg.cells)
        .map(|_| {
            Cell::new(
                rng.gen_range(1..=max_side),
                rng.gen_range(1..=max_side),
                rng.gen_range(1..=max_pitch),
                rng.gen_range(1..=max_pitch),
            )
        })
        .collect();
    let baseline: Vec<Point> = corners[..cfg.cells].to_vec();

    let obstacles: Vec<Rect> = corners[cfg.cells..cfg.cells + cfg.obstacles]
        .iter()
        .map(|corner| {
            let xmin = corner.x + rng.gen_range(0..slot);
            let ymin = corner.y + rng.gen_range(0..slot);
            let xmax = rng.gen_range(xmin + 1..=corner.x + slot);
            let ymax = rng.gen_range(ymin + 1..=corner.y + slot);
            Rect::new(xmin, ymin, xmax, ymax)
        })
        .collect();

    let external_prob = cfg.external_pin_prob.clamp(0.0, 1.0);
    let min_pins = cfg.min_pins.max(1);
    let max_pins = cfg.max_pins.max(min_pins);
    let nets: Vec<Net> = (0..cfg.nets)
        .map(|_| {
            let pin_count = rng.gen_range(min_pins..=max_pins);
            let pins = (0..pin_count)
                .map(|_| {
                    if cells.is_empty() || rng.gen_bool(external_prob) {
                        let x = rng.gen_range(bbox.xmin..=bbox.xmax);
                        let y = rng.gen_range(bbox.ymin..=bbox.ymax);
                        Pin::external(Rect::new(x, y, x, y))
                    } else {
                        let owner = rng.gen_range(0..cells.len());
                        let cell = cells[owner];
                        let x = rng.gen_range(0..=cell.width);
                        let y = rng.gen_range(0..=cell.height);
                        Pin::on_cell(owner, Rect::new(x, y, x, y))
                    }
                })
                .collect();
            Net::new(pins)
        })
        .collect();

    Instance {
        bbox,
        cells,
        obstacles,
        nets,
        baseline: Some(baseline),
    }
}
