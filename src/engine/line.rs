use super::{Move, Score};
use super::state::SIZE;

/// Collapse one line that is already ordered in the direction of travel.
///
/// `tiles` holds only occupied values (empties filtered out), front first.
/// Equal neighbours merge once per pass: a freshly merged tile is never
/// compared against its new successor, so `[2, 2, 2, 2]` becomes `[4, 4]`
/// and `[4, 2, 2]` becomes `[4, 4]`, not `[8]`.
///
/// Returns the compacted tiles and the points earned: each merge of two
/// tiles of value `v` earns `v`. The caller pads the result back to the
/// line length with empties.
pub fn collapse_line(tiles: &[u32]) -> (Vec<u32>, Score) {
    let mut out = tiles.to_vec();
    let mut gained: Score = 0;
    let mut idx = 0;
    while idx + 1 < out.len() {
        if out[idx] == out[idx + 1] {
            let value = out[idx];
            out[idx] = value * 2;
            out.remove(idx + 1);
            gained += Score::from(value);
        }
        idx += 1;
    }
    (out, gained)
}

/// Board coordinates `(column, row)` of line `line_idx`, listed in travel order.
///
/// Up walks each column top to bottom, Down bottom to top, Left each row
/// left to right and Right each row right to left. Writing a collapsed
/// line back through the same coordinates is the inverse mapping.
#[inline]
pub(crate) fn line_coords(dir: Move, line_idx: usize) -> [(usize, usize); SIZE] {
    let mut coords = [(0, 0); SIZE];
    for (step, slot) in coords.iter_mut().enumerate() {
        let back = SIZE - 1 - step;
        *slot = match dir {
            Move::Up => (line_idx, step),
            Move::Down => (line_idx, back),
            Move::Left => (step, line_idx),
            Move::Right => (back, line_idx),
        };
    }
    coords
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_collapse_line() {
        assert_eq!(collapse_line(&[]), (vec![], 0));
        assert_eq!(collapse_line(&[8]), (vec![8], 0));
        assert_eq!(collapse_line(&[2, 4, 2, 4]), (vec![2, 4, 2, 4], 0));
        assert_eq!(collapse_line(&[2, 2, 4]), (vec![4, 4], 2));
        assert_eq!(collapse_line(&[4, 4, 8, 8]), (vec![8, 16], 12));
    }

    #[test]
    fn pairs_merge_once_per_pass() {
        assert_eq!(collapse_line(&[2, 2, 2, 2]), (vec![4, 4], 4));
        assert_eq!(collapse_line(&[2, 2, 2]), (vec![4, 2], 2));
        assert_eq!(collapse_line(&[4, 2, 2]), (vec![4, 4], 2));
    }

    #[test]
    fn coords_follow_travel_order() {
        assert_eq!(line_coords(Move::Up, 1), [(1, 0), (1, 1), (1, 2), (1, 3)]);
        assert_eq!(line_coords(Move::Down, 1), [(1, 3), (1, 2), (1, 1), (1, 0)]);
        assert_eq!(line_coords(Move::Left, 2), [(0, 2), (1, 2), (2, 2), (3, 2)]);
        assert_eq!(line_coords(Move::Right, 2), [(3, 2), (2, 2), (1, 2), (0, 2)]);
    }
}
