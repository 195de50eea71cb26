// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! In-memory graph root backed by a plain `Vec<Edge>`.
//!
//! [`EdgeVec`] is the array-shaped [`RrGraphRoot`]: edges are populated in
//! place and handed to a separate encoder afterwards.

use crate::{Edge, RrGraphRoot, SchemaError};

/// Graph root whose edge sequence is an owned `Vec<Edge>`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EdgeVec {
    edges: Vec<Edge>,
}

impl EdgeVec {
    /// Create a root with an empty edge sequence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current edge sequence.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Consume the root and return its edges.
    pub fn into_edges(self) -> Vec<Edge> {
        self.edges
    }
}

impl RrGraphRoot for EdgeVec {
    type Edges<'a> = &'a mut [Edge];

    fn init_edges(&mut self, count: u32) -> Result<Self::Edges<'_>, SchemaError> {
        let len = count as usize;
        self.edges.clear();
        self.edges
            .try_reserve_exact(len)
            .map_err(|_| SchemaError::Allocation { requested: count })?;
        self.edges.resize(len, Edge::default());
        Ok(self.edges.as_mut_slice())
    }
}
