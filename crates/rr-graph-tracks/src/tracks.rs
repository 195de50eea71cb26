// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Track groups: connectivity checks, wire adjacency and edge export.

use std::collections::{BTreeMap, HashMap};

use rr_graph_edges::EdgeListBuilder;
use rr_graph_schema::{NodeId, RrGraphRoot, SwitchId};
use tracing::{debug, instrument};

use crate::{Axis, Connection, Coord, Track, TrackError};

/// Side of a track a wire attaches from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Side {
    /// Not adjacent.
    NoSide,
    /// Wire is one column right of a Y track.
    Left,
    /// Wire shares the column of a Y track.
    Right,
    /// Wire shares the row of an X track.
    Top,
    /// Wire is one row above an X track.
    Bottom,
}

/// Tracks together with the connections between them.
#[derive(Clone, Debug, Default)]
pub struct Tracks {
    tracks: Vec<Track>,
    connections: Vec<Connection>,
    wire_cache: HashMap<Coord, BTreeMap<Side, usize>>,
}

impl Tracks {
    /// Group `tracks` with their `connections`.
    pub fn new(tracks: Vec<Track>, connections: Vec<Connection>) -> Self {
        Self {
            tracks,
            connections,
            wire_cache: HashMap::new(),
        }
    }

    /// Tracks in index order.
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Connections as track index pairs.
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Check that connections join all tracks into one group and that every
    /// merging connection crosses axes.
    pub fn verify_tracks(&self) -> Result<(), TrackError> {
        let mut parent: Vec<usize> = (0..self.tracks.len()).collect();
        let mut components = self.tracks.len();

        for &(a, b) in &self.connections {
            let track_a = self.track(a)?;
            let track_b = self.track(b)?;
            let root_a = find(&mut parent, a);
            let root_b = find(&mut parent, b);
            if root_a == root_b {
                continue;
            }
            if track_a.direction == track_b.direction {
                return Err(TrackError::ParallelConnection(a, b));
            }
            parent[root_b] = root_a;
            components -= 1;
        }

        if components == 1 {
            Ok(())
        } else {
            Err(TrackError::Disconnected { components })
        }
    }

    /// Side from which a wire at `coord` touches track `idx`.
    pub fn is_wire_adjacent_to_track(&self, idx: usize, coord: Coord) -> Result<Side, TrackError> {
        Ok(side_of(self.track(idx)?, coord))
    }

    /// Track reachable on each side of a wire at `coord`.
    ///
    /// When several tracks touch the same side the highest index wins.
    /// Results are cached per coordinate.
    pub fn get_tracks_for_wire_at_coord(&mut self, coord: Coord) -> &BTreeMap<Side, usize> {
        let tracks = &self.tracks;
        self.wire_cache.entry(coord).or_insert_with(|| {
            tracks
                .iter()
                .enumerate()
                .filter_map(|(idx, track)| match side_of(track, coord) {
                    Side::NoSide => None,
                    side => Some((side, idx)),
                })
                .collect()
        })
    }

    /// Emit every connection as an edge into `root`.
    ///
    /// Edge `i` runs from `node_of(a)` to `node_of(b)` for connection
    /// `i = (a, b)`, through `switch_id`.
    #[instrument(skip(self, root, node_of), fields(connections = self.connections.len()))]
    pub fn write_connections<R, F>(
        &self,
        root: &mut R,
        node_of: F,
        switch_id: SwitchId,
    ) -> Result<(), TrackError>
    where
        R: RrGraphRoot,
        F: Fn(usize) -> NodeId,
    {
        let count = u32::try_from(self.connections.len())
            .map_err(|_| TrackError::TooManyConnections(self.connections.len()))?;
        let mut edges = EdgeListBuilder::new();
        edges.init(root, count)?;
        for (index, &(a, b)) in (0..count).zip(&self.connections) {
            edges.set(index, node_of(a), node_of(b), switch_id)?;
        }
        debug!(count, "track connections written");
        Ok(())
    }

    fn track(&self, idx: usize) -> Result<&Track, TrackError> {
        self.tracks.get(idx).ok_or(TrackError::UnknownTrack(idx))
    }
}

fn side_of(track: &Track, (wire_x, wire_y): Coord) -> Side {
    match track.direction {
        Axis::X => {
            let along = (track.x_low..=track.x_high).contains(&wire_x);
            if !along {
                Side::NoSide
            } else if track.y_low == wire_y {
                Side::Top
            } else if wire_y.checked_sub(1) == Some(track.y_low) {
                Side::Bottom
            } else {
                Side::NoSide
            }
        }
        Axis::Y => {
            let along = (track.y_low..=track.y_high).contains(&wire_y);
            if !along {
                Side::NoSide
            } else if track.x_low == wire_x {
                Side::Right
            } else if wire_x.checked_sub(1) == Some(track.x_low) {
                Side::Left
            } else {
                Side::NoSide
            }
        }
    }
}

fn find(parent: &mut [usize], mut idx: usize) -> usize {
    while parent[idx] != idx {
        parent[idx] = parent[parent[idx]];
        idx = parent[idx];
    }
    idx
}
