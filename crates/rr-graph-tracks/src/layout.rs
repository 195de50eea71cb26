// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Track layout over a set of wire positions.

use std::collections::BTreeSet;

use tracing::{debug, instrument};

use crate::TrackError;

/// Grid position `(x, y)`.
pub type Coord = (i32, i32);

/// Pair of track indices joined by a switch.
pub type Connection = (usize, usize);

/// Axis a track runs along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Axis {
    /// Horizontal track; `y_low == y_high`.
    X,
    /// Vertical track; `x_low == x_high`.
    Y,
}

/// Straight wire spanning an inclusive box on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Track {
    /// Axis the track runs along.
    pub direction: Axis,
    /// Lowest column covered.
    pub x_low: i32,
    /// Highest column covered.
    pub x_high: i32,
    /// Lowest row covered.
    pub y_low: i32,
    /// Highest row covered.
    pub y_high: i32,
}

/// Lay tracks over `points` using the columns `xs` and rows `ys`.
///
/// Every point must sit on a column or a row, where a wire at `x > 0` is also
/// covered by column `x - 1` (same for rows). One Y track is emitted per
/// column, then one X track per row; spans start at 1 and are clamped to
/// `grid - 2` when a grid size is given.
///
/// Connections join every X track to the first Y track and every Y track to
/// the first X track. The X track index comes first in each pair and the list
/// is sorted and free of duplicates.
#[instrument(skip(points), fields(points = points.len()))]
pub fn make_tracks(
    xs: &[i32],
    ys: &[i32],
    points: &[Coord],
    grid_width: Option<i32>,
    grid_height: Option<i32>,
) -> Result<(Vec<Track>, Vec<Connection>), TrackError> {
    let x_set: BTreeSet<i32> = xs.iter().copied().collect();
    let y_set: BTreeSet<i32> = ys.iter().copied().collect();
    let covered =
        |set: &BTreeSet<i32>, v: i32| set.contains(&v) || (v > 0 && set.contains(&(v - 1)));
    for &(x, y) in points {
        if !covered(&x_set, x) && !covered(&y_set, y) {
            return Err(TrackError::UncoveredPoint { x, y });
        }
    }

    let (mut x_min, mut x_max, mut y_min, mut y_max) = match points.first() {
        Some(&(x, y)) => (x, x, y, y),
        None => return Err(TrackError::NoPoints),
    };
    for &(x, y) in points {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }

    let mut tracks = Vec::with_capacity(xs.len() + ys.len());
    for &x in xs {
        let y_high = grid_height.map_or(y_max, |h| y_max.min(h.saturating_sub(2)));
        tracks.push(Track {
            direction: Axis::Y,
            x_low: x,
            x_high: x,
            y_low: y_min.max(1),
            y_high,
        });
    }
    for &y in ys {
        let x_high = grid_width.map_or(x_max, |w| x_max.min(w.saturating_sub(2)));
        tracks.push(Track {
            direction: Axis::X,
            x_low: x_min.max(1),
            x_high,
            y_low: y,
            y_high: y,
        });
    }

    if tracks.len() == 1 {
        return Ok((tracks, Vec::new()));
    }
    if xs.is_empty() || ys.is_empty() {
        return Err(TrackError::MissingDimension {
            columns: xs.len(),
            rows: ys.len(),
        });
    }

    let first_y = 0;
    let first_x = xs.len();
    let connections: BTreeSet<Connection> = tracks
        .iter()
        .enumerate()
        .map(|(idx, track)| match track.direction {
            Axis::X => (idx, first_y),
            Axis::Y => (first_x, idx),
        })
        .collect();

    debug!(
        tracks = tracks.len(),
        connections = connections.len(),
        "tracks laid out"
    );
    Ok((tracks, connections.into_iter().collect()))
}
