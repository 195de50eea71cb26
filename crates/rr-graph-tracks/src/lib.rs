// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Channel tracks and the connections between them.
//!
//! A track is a straight wire running along the X or Y axis of the device
//! grid. [`decompose_points_into_tracks`] picks the columns and rows that
//! cover a set of wire positions, [`make_tracks`] lays tracks along them and
//! links them into a single spine; [`Tracks`] answers adjacency queries and
//! writes the connections into an edge list through `rr_graph_edges`.

use rr_graph_edges::EdgeListError;
use thiserror::Error;

mod layout;
mod points;
mod tracks;

pub use layout::{make_tracks, Axis, Connection, Coord, Track};
pub use points::decompose_points_into_tracks;
pub use tracks::{Side, Tracks};

/// Errors raised while building or checking tracks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackError {
    /// No wire positions were supplied.
    #[error("[TRACKS_NO_POINTS] no points to cover")]
    NoPoints,
    /// A position lies on no column and no row.
    #[error("[TRACKS_UNCOVERED] point ({x}, {y}) is not on any track column or row")]
    UncoveredPoint {
        /// Column of the point.
        x: i32,
        /// Row of the point.
        y: i32,
    },
    /// A position sits in a corner of the grid, where no track can reach it.
    #[error("[TRACKS_CORNER] point ({x}, {y}) is in a grid corner")]
    CornerPoint {
        /// Column of the point.
        x: i32,
        /// Row of the point.
        y: i32,
    },
    /// More than one track was requested without both axes present.
    #[error("[TRACKS_MISSING_DIMENSION] {columns} columns and {rows} rows cannot be joined")]
    MissingDimension {
        /// Number of Y tracks requested.
        columns: usize,
        /// Number of X tracks requested.
        rows: usize,
    },
    /// An index does not name a track.
    #[error("[TRACKS_UNKNOWN] no track at index {0}")]
    UnknownTrack(usize),
    /// A connection joins two tracks on the same axis.
    #[error("[TRACKS_PARALLEL] tracks {0} and {1} run along the same axis")]
    ParallelConnection(usize, usize),
    /// Connections do not join every track into one group.
    #[error("[TRACKS_DISCONNECTED] tracks form {components} groups")]
    Disconnected {
        /// Number of connected groups found.
        components: usize,
    },
    /// Connection count does not fit an edge list.
    #[error("[TRACKS_TOO_MANY] {0} connections exceed the edge list limit")]
    TooManyConnections(usize),
    /// Writing the edge list failed.
    #[error(transparent)]
    Edges(#[from] EdgeListError),
}
