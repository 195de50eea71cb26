// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Edge-list builder for routing-resource graph messages.
//!
//! [`EdgeListBuilder`] reserves an exact number of edge records inside an
//! outgoing message and fills them by index, in any order:
//!
//! ```
//! use rr_graph_edges::EdgeListBuilder;
//! use rr_graph_schema::{Edge, EdgeVec};
//!
//! let mut root = EdgeVec::new();
//! let mut edges = EdgeListBuilder::new();
//! edges.init(&mut root, 2)?;
//! edges.set(1, 30, 40, 2)?;
//! edges.set(0, 10, 20, 1)?;
//! drop(edges);
//! assert_eq!(root.edges(), &[Edge::new(10, 20, 1), Edge::new(30, 40, 2)]);
//! # Ok::<(), rr_graph_edges::EdgeListError>(())
//! ```
//!
//! # Contract
//!
//! - `init` runs exactly once per builder. A second call is rejected with
//!   [`EdgeListError::AlreadyInitialized`] and the message is not touched.
//! - `set` before `init` fails with [`EdgeListError::NotInitialized`].
//! - `set` with `index >= count` fails with
//!   [`EdgeListError::IndexOutOfRange`] before any field is written.
//! - Writing the same index twice overwrites the record.
//!
//! Node and switch ids are trusted; validating them against the rest of the
//! graph is the caller's job.

use rr_graph_schema::{Edge, EdgeSlots, NodeId, RrGraphRoot, SchemaError, SwitchId};
use thiserror::Error;
use tracing::{debug, instrument, trace, warn};

/// Contract violations and message-side failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EdgeListError {
    /// `set` was called before `init`.
    #[error("[EDGES_NOT_INITIALIZED] set called before init")]
    NotInitialized,
    /// `init` was called on an initialized builder.
    #[error("[EDGES_ALREADY_INITIALIZED] edge list already holds {count} slots")]
    AlreadyInitialized {
        /// Slot count from the first `init`.
        count: usize,
    },
    /// `set` index outside `0..count`.
    #[error("[EDGES_INDEX_OUT_OF_RANGE] index {index} outside 0..{count}")]
    IndexOutOfRange {
        /// The rejected index.
        index: u32,
        /// Slot count from `init`.
        count: usize,
    },
    /// The message rejected the allocation or a write.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Random-access writer over a pre-sized edge sequence.
///
/// Holds an exclusive borrow of the message root for `'m`; the root owns the
/// storage and must outlive the builder. Drop the builder to finalize the
/// message.
pub struct EdgeListBuilder<'m, R>
where
    R: RrGraphRoot + 'm,
{
    edges: Option<R::Edges<'m>>,
}

impl<'m, R> Default for EdgeListBuilder<'m, R>
where
    R: RrGraphRoot + 'm,
{
    fn default() -> Self {
        Self { edges: None }
    }
}

impl<'m, R> EdgeListBuilder<'m, R>
where
    R: RrGraphRoot + 'm,
{
    /// Create an uninitialized builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve exactly `count` edge records in `root`.
    #[instrument(skip(self, root))]
    pub fn init(&mut self, root: &'m mut R, count: u32) -> Result<(), EdgeListError> {
        if let Some(edges) = &self.edges {
            let count = edges.len();
            warn!(count, "edge list initialized twice");
            return Err(EdgeListError::AlreadyInitialized { count });
        }
        let edges = root.init_edges(count)?;
        debug!(count, "edge list reserved");
        self.edges = Some(edges);
        Ok(())
    }

    /// Write record `index`.
    pub fn set(
        &mut self,
        index: u32,
        src_node: NodeId,
        sink_node: NodeId,
        switch_id: SwitchId,
    ) -> Result<(), EdgeListError> {
        let edges = self.edges.as_mut().ok_or_else(|| {
            warn!(index, "edge set before init");
            EdgeListError::NotInitialized
        })?;
        let count = edges.len();
        let slot = index as usize;
        if slot >= count {
            warn!(index, count, "edge index out of range");
            return Err(EdgeListError::IndexOutOfRange { index, count });
        }
        edges.set_src_node(slot, src_node)?;
        edges.set_sink_node(slot, sink_node)?;
        edges.set_switch_id(slot, switch_id)?;
        trace!(index, src_node, sink_node, switch_id, "edge set");
        Ok(())
    }

    /// Write record `index` from an [`Edge`].
    pub fn set_edge(&mut self, index: u32, edge: Edge) -> Result<(), EdgeListError> {
        self.set(index, edge.src_node, edge.sink_node, edge.switch_id)
    }

    /// Returns `true` once `init` has succeeded.
    pub fn is_initialized(&self) -> bool {
        self.edges.is_some()
    }

    /// Slot count reserved by `init` (zero before).
    pub fn len(&self) -> usize {
        self.edges.as_ref().map_or(0, EdgeSlots::len)
    }

    /// Returns `true` if no slots are reserved.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
