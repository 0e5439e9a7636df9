//! Geometry model: rectangles, cells, pins, nets, plus pitch and overlap helpers.
//!
//! This module holds data only; the legalizer owns every algorithm that
//! moves cells.

mod types;
mod util;

pub use types::{Axis, Cell, Net, Pin, Point, Rect};
pub use util::{find_overlap, is_aligned, round_down_to_pitch, round_up_to_pitch};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pitch_rounding_uses_mathematical_modulo() {
        assert_eq!(round_up_to_pitch(7, 4), 8);
        assert_eq!(round_up_to_pitch(8, 4), 8);
        assert_eq!(round_up_to_pitch(-7, 4), -4);
        assert_eq!(round_down_to_pitch(7, 4), 4);
        assert_eq!(round_down_to_pitch(-7, 4), -8);
        assert_eq!(round_down_to_pitch(-8, 4), -8);
        assert!(is_aligned(-12, 3));
        assert!(!is_aligned(5, 3));
    }

    #[test]
    fn touching_rectangles_do_not_overlap() {
        let a = Rect::new(0, 0, 4, 4);
        let b = Rect::new(4, 0, 8, 4);
        let c = Rect::new(3, 3, 5, 5);
        assert!(!a.overlaps(&b));
        assert_eq!(a.intersection(&c), Some(Rect::new(3, 3, 4, 4)));
        assert_eq!(a.intersection(&c).map(|r| r.area()), Some(1));
        assert_eq!(Rect::new(2, 2, 2, 5).area(), 0);
    }

    #[test]
    fn sweep_skips_fixed_pairs_and_finds_movable_overlap() {
        let rects = [
            Rect::new(0, 0, 4, 4), // obstacle
            Rect::new(2, 2, 6, 6),
            Rect::new(10, 0, 12, 2),
            Rect::new(1, 1, 3, 3), // obstacle inside the first one
        ];
        assert_eq!(find_overlap(&rects, &[true, false, false, true]), Some((0, 1)));
        assert_eq!(find_overlap(&rects[2..], &[false, true]), None);
        assert_eq!(find_overlap(&[rects[0], rects[3]], &[true, true]), None);
    }

    #[test]
    fn net_half_perimeter_covers_pin_rectangles() {
        let positions = [Point::new(0, 0), Point::new(5, 2)];
        let net = Net::new(vec![
            Pin::on_cell(0, Rect::new(1, 1, 2, 2)),
            Pin::on_cell(1, Rect::new(0, 0, 1, 1)),
            Pin::external(Rect::new(3, 7, 3, 7)),
        ]);
        // x: [1, 6], y: [1, 7]
        assert_eq!(net.half_perimeter(&positions), 5 + 6);
        assert_eq!(Net::default().half_perimeter(&positions), 0);
    }
}
