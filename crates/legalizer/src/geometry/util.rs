//! Pitch rounding and overlap detection.

use super::types::Rect;

/// Smallest multiple of `pitch` that is `>= pos`. Correct for negative `pos`.
#[inline]
pub fn round_up_to_pitch(pos: i64, pitch: i64) -> i64 {
    let r = pos.rem_euclid(pitch);
    if r == 0 {
        pos
    } else {
        pos + pitch - r
    }
}

/// Largest multiple of `pitch` that is `<= pos`. Correct for negative `pos`.
#[inline]
pub fn round_down_to_pitch(pos: i64, pitch: i64) -> i64 {
    pos - pos.rem_euclid(pitch)
}

#[inline]
pub fn is_aligned(pos: i64, pitch: i64) -> bool {
    pos.rem_euclid(pitch) == 0
}

/// First overlapping pair found by a sweep over increasing `xmin`.
///
/// `fixed` marks rectangles that may overlap each other (obstacles); pairs
/// where both are fixed are ignored. Returns indices into `rects` with the
/// smaller index first.
pub fn find_overlap(rects: &[Rect], fixed: &[bool]) -> Option<(usize, usize)> {
    debug_assert_eq!(rects.len(), fixed.len());
    let mut order: Vec<usize> = (0..rects.len()).filter(|&i| !rects[i].is_empty()).collect();
    order.sort_by_key(|&i| rects[i].xmin);
    let mut active: Vec<usize> = Vec::new();
    for &i in &order {
        let r = &rects[i];
        active.retain(|&j| rects[j].xmax > r.xmin);
        if let Some(&j) = active
            .iter()
            .find(|&&j| !(fixed[i] && fixed[j]) && rects[j].overlaps(r))
        {
            return Some((i.min(j), i.max(j)));
        }
        active.push(i);
    }
    None
}
