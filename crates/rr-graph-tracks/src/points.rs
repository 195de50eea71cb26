// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Choosing the columns and rows that cover a bag of wire points.

use std::collections::BTreeMap;

use tracing::{debug, instrument, trace};

use crate::{Coord, TrackError};

/// Candidate lines along one axis, keyed by column (or row), each holding the
/// indices of the points it covers.
type Lines = BTreeMap<i32, Vec<usize>>;

/// Pick a set of columns `xs` and rows `ys` that together cover `points`.
///
/// The result is the input [`make_tracks`](crate::make_tracks) expects. A
/// point at `(x, y)` is covered by column `x` or `x - 1`, or by row `y` or
/// `y - 1`. Columns only cover points with `y > 0` and rows only cover points
/// with `x > 0`; with a grid size, points in the last two rows (columns) are
/// left to rows (columns) alone.
///
/// Starting from every candidate line, lines are dropped smallest first
/// while every point keeps at least one covering line and neither axis is
/// emptied while the other still has several lines. Both lists come back
/// sorted ascending.
///
/// With `right_only`, pins sit on the right edge of their tile only: points
/// attach to column `x` alone and rows serve purely as cross bars.
///
/// Points in a grid corner are rejected with [`TrackError::CornerPoint`]; a
/// point the final lines leave uncovered is reported as
/// [`TrackError::UncoveredPoint`].
#[instrument(skip(points), fields(points = points.len()))]
pub fn decompose_points_into_tracks(
    points: &[Coord],
    grid_width: Option<i32>,
    grid_height: Option<i32>,
    right_only: bool,
) -> Result<(Vec<i32>, Vec<i32>), TrackError> {
    let Some(&(first_x, first_y)) = points.first() else {
        return Err(TrackError::NoPoints);
    };
    let (mut x_min, mut x_max, mut y_min, mut y_max) = (first_x, first_x, first_y, first_y);
    for &(x, y) in points {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }
    let x_min = x_min.saturating_sub(1).max(0);
    let y_min = y_min.saturating_sub(1).max(0);
    if let Some(width) = grid_width {
        x_max = x_max.min(width.saturating_sub(2));
    }
    if let Some(height) = grid_height {
        y_max = y_max.min(height.saturating_sub(2));
    }

    let grid = Grid {
        width: grid_width,
        height: grid_height,
    };
    let mut columns: Lines = (x_min..=x_max).map(|x| (x, Vec::new())).collect();
    let mut rows: Lines = (y_min..=y_max).map(|y| (y, Vec::new())).collect();
    let mut cover_count = vec![0u32; points.len()];

    for (idx, &(x, y)) in points.iter().enumerate() {
        if grid.is_corner((x, y)) {
            return Err(TrackError::CornerPoint { x, y });
        }
        if grid.on_column((x, y)) && columns.contains_key(&x) {
            if x > 0 && !right_only {
                attach(&mut columns, x - 1, idx, &mut cover_count);
            }
            attach(&mut columns, x, idx, &mut cover_count);
        }
        if grid.on_row((x, y)) && !right_only && rows.contains_key(&y) {
            if y > 0 {
                attach(&mut rows, y - 1, idx, &mut cover_count);
            }
            attach(&mut rows, y, idx, &mut cover_count);
        }
    }

    // Alternate between the axes, always trying the sparser line first.
    while let (Some(column), Some(row)) = (sparsest(&columns), sparsest(&rows)) {
        let removed = if columns[&column].len() < rows[&row].len() {
            try_remove(&mut columns, &rows, column, &mut cover_count)
                || try_remove(&mut rows, &columns, row, &mut cover_count)
        } else {
            try_remove(&mut rows, &columns, row, &mut cover_count)
                || try_remove(&mut columns, &rows, column, &mut cover_count)
        };
        if !removed {
            break;
        }
    }
    while let Some(column) = sparsest(&columns) {
        if !try_remove(&mut columns, &rows, column, &mut cover_count) {
            break;
        }
    }
    while let Some(row) = sparsest(&rows) {
        if !try_remove(&mut rows, &columns, row, &mut cover_count) {
            break;
        }
    }
    for column in by_density(&columns) {
        try_remove(&mut columns, &rows, column, &mut cover_count);
    }
    for row in by_density(&rows) {
        try_remove(&mut rows, &columns, row, &mut cover_count);
    }

    for &(x, y) in points {
        let on_column = grid.on_column((x, y))
            && (columns.contains_key(&x) || (x > 0 && columns.contains_key(&(x - 1))));
        let on_row = grid.on_row((x, y))
            && (rows.contains_key(&y) || (y > 0 && rows.contains_key(&(y - 1))));
        if !on_column && !on_row {
            return Err(TrackError::UncoveredPoint { x, y });
        }
    }

    let xs: Vec<i32> = columns.into_keys().collect();
    let ys: Vec<i32> = rows.into_keys().collect();
    debug!(?xs, ?ys, "points decomposed");
    Ok((xs, ys))
}

#[derive(Clone, Copy, Debug)]
struct Grid {
    width: Option<i32>,
    height: Option<i32>,
}

impl Grid {
    /// Columns run from row 1 up to `height - 2`.
    fn on_column(self, (_, y): Coord) -> bool {
        y > 0 && self.height.is_none_or(|h| y < h.saturating_sub(2))
    }

    /// Rows run from column 1 up to `width - 2`.
    fn on_row(self, (x, _): Coord) -> bool {
        x > 0 && self.width.is_none_or(|w| x < w.saturating_sub(2))
    }

    fn is_corner(self, (x, y): Coord) -> bool {
        let last_x = self.width.map(|w| w.saturating_sub(1));
        let last_y = self.height.map(|h| h.saturating_sub(1));
        let at_left = x == 0;
        let at_right = last_x == Some(x);
        let at_bottom = y == 0;
        let at_top = last_y == Some(y);
        (at_left || at_right) && (at_bottom || at_top)
    }
}

fn attach(lines: &mut Lines, dim: i32, point: usize, cover_count: &mut [u32]) {
    if let Some(covered) = lines.get_mut(&dim) {
        covered.push(point);
        cover_count[point] += 1;
    }
}

/// Line covering the fewest points; ties go to the lowest coordinate.
fn sparsest(lines: &Lines) -> Option<i32> {
    lines
        .iter()
        .min_by_key(|(_, covered)| covered.len())
        .map(|(&dim, _)| dim)
}

/// Every line, fewest points first; ties in coordinate order.
fn by_density(lines: &Lines) -> Vec<i32> {
    let mut order: Vec<(usize, i32)> = lines.iter().map(|(&dim, c)| (c.len(), dim)).collect();
    order.sort_unstable();
    order.into_iter().map(|(_, dim)| dim).collect()
}

/// Drop line `dim` unless a point depends on it alone, or it is the last
/// line of its axis while the other axis still has several.
fn try_remove(lines: &mut Lines, others: &Lines, dim: i32, cover_count: &mut [u32]) -> bool {
    let Some(covered) = lines.get(&dim) else {
        return false;
    };
    if covered.iter().any(|&point| cover_count[point] <= 1) {
        return false;
    }
    if lines.len() <= 1 && others.len() > 1 {
        return false;
    }
    for &point in covered {
        cover_count[point] -= 1;
    }
    lines.remove(&dim);
    trace!(dim, "line removed");
    true
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::{make_tracks, Tracks};

    fn decompose(points: &[Coord]) -> (Vec<i32>, Vec<i32>) {
        decompose_points_into_tracks(points, None, None, false).unwrap()
    }

    #[test]
    fn single_point_takes_a_row() {
        assert_eq!(decompose(&[(1, 0)]), (vec![], vec![0]));
    }

    #[test]
    fn horizontal_line_takes_a_row() {
        assert_eq!(decompose(&[(1, 0), (2, 0)]), (vec![], vec![0]));
    }

    #[test]
    fn vertical_line_takes_a_column() {
        assert_eq!(decompose(&[(1, 2), (1, 3)]), (vec![1], vec![]));
    }

    #[test]
    fn cross_takes_one_of_each() {
        let pos = [(2, 1), (1, 2), (2, 2), (3, 2), (2, 3)];
        assert_eq!(decompose(&pos), (vec![2], vec![2]));
    }

    #[test]
    fn cross_at_edge_shifts_to_zero() {
        let pos = [(1, 0), (0, 1), (1, 1), (2, 1), (1, 2)];
        assert_eq!(decompose(&pos), (vec![0], vec![0]));
    }

    #[test]
    fn two_horizontal_bars() {
        let pos = [
            (1, 0),
            (0, 1),
            (1, 1),
            (2, 1),
            (3, 1),
            (0, 2),
            (1, 2),
            (2, 2),
            (3, 2),
            (1, 3),
        ];
        assert_eq!(decompose(&pos), (vec![0], vec![0, 1]));
    }

    #[test]
    fn h_shape_on_its_side() {
        let pos = [
            (1, 1),
            (3, 1),
            (1, 2),
            (3, 2),
            (1, 3),
            (3, 3),
            (1, 4),
            (2, 4),
            (3, 4),
            (1, 5),
            (3, 5),
        ];
        assert_eq!(decompose(&pos), (vec![1, 2], vec![4]));
    }

    #[test]
    fn corner_bend_takes_a_column() {
        assert_eq!(decompose(&[(0, 1), (1, 1), (1, 2)]), (vec![0], vec![]));
    }

    #[test]
    fn long_bend_matches_make_tracks_input() {
        let pos = [
            (68, 48),
            (69, 48),
            (68, 49),
            (69, 49),
            (69, 50),
            (69, 51),
            (69, 52),
            (69, 53),
            (70, 53),
            (71, 53),
            (72, 53),
        ];
        assert_eq!(decompose(&pos), (vec![68], vec![52]));
    }

    #[test]
    fn right_only_pins_use_their_own_column() {
        let (xs, ys) = decompose_points_into_tracks(&[(1, 1), (1, 2)], None, None, true).unwrap();
        assert_eq!((xs, ys), (vec![1], vec![]));
    }

    #[test]
    fn right_only_rows_are_cross_bars() {
        let (xs, ys) = decompose_points_into_tracks(&[(2, 2), (3, 3), (4, 3)], None, None, true)
            .unwrap();
        assert_eq!((xs, ys), (vec![2, 3, 4], vec![3]));
    }

    #[test]
    fn grid_size_bounds_candidate_lines() {
        let (xs, ys) =
            decompose_points_into_tracks(&[(2, 2), (5, 5), (2, 6)], Some(8), Some(8), false)
                .unwrap();
        assert_eq!((xs, ys), (vec![2], vec![5]));
    }

    #[test]
    fn decomposition_feeds_make_tracks() {
        let pos = [(2, 1), (1, 2), (2, 2), (3, 2), (2, 3)];
        let (xs, ys) = decompose(&pos);
        let (tracks, conns) = make_tracks(&xs, &ys, &pos, None, None).unwrap();
        assert_eq!(conns, vec![(1, 0)]);
        Tracks::new(tracks, conns).verify_tracks().unwrap();
    }

    #[test]
    fn no_points_is_rejected() {
        assert_eq!(
            decompose_points_into_tracks(&[], None, None, false),
            Err(TrackError::NoPoints)
        );
    }

    #[test]
    fn corner_points_are_rejected() {
        assert_eq!(
            decompose_points_into_tracks(&[(1, 1), (0, 0)], None, None, false),
            Err(TrackError::CornerPoint { x: 0, y: 0 })
        );
        assert_eq!(
            decompose_points_into_tracks(&[(2, 2), (4, 0)], Some(5), Some(5), false),
            Err(TrackError::CornerPoint { x: 4, y: 0 })
        );
        assert_eq!(
            decompose_points_into_tracks(&[(2, 2), (0, 4)], Some(5), Some(5), false),
            Err(TrackError::CornerPoint { x: 0, y: 4 })
        );
    }

    #[test]
    fn degenerate_grid_leaves_point_uncovered() {
        assert_eq!(
            decompose_points_into_tracks(&[(1, 1)], Some(i32::MIN), Some(i32::MIN), false),
            Err(TrackError::UncoveredPoint { x: 1, y: 1 })
        );
    }
}
