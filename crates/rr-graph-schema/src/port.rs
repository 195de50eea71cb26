// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Port traits between edge-list writers and message storage.

use crate::{Edge, NodeId, SchemaError, SwitchId};

/// Mutable, indexable view over a fixed number of edge records.
///
/// The view borrows a region owned by the enclosing message. Its length is
/// fixed when the view is created and never changes.
///
/// # Bounds
///
/// Every setter rejects `index >= len()` with
/// [`SchemaError::IndexOutOfRange`] and leaves storage untouched. Writers that
/// set all three fields should check the index once up front so a record is
/// never left half-written.
pub trait EdgeSlots {
    /// Number of records in the view.
    fn len(&self) -> usize;

    /// Returns `true` if the view holds no records.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Write the `srcNode` field of record `index`.
    fn set_src_node(&mut self, index: usize, node: NodeId) -> Result<(), SchemaError>;

    /// Write the `sinkNode` field of record `index`.
    fn set_sink_node(&mut self, index: usize, node: NodeId) -> Result<(), SchemaError>;

    /// Write the `switchId` field of record `index`.
    fn set_switch_id(&mut self, index: usize, switch: SwitchId) -> Result<(), SchemaError>;

    /// Read back record `index`.
    fn get(&self, index: usize) -> Result<Edge, SchemaError>;
}

/// Root of an outgoing routing-resource graph message.
///
/// The root owns the backing storage. [`init_edges`](RrGraphRoot::init_edges)
/// locates (or creates) the graph's `edges` field and sizes it to exactly
/// `count` zeroed records, returning a view borrowed from the root.
pub trait RrGraphRoot {
    /// View type over the edge-sequence region.
    type Edges<'a>: EdgeSlots
    where
        Self: 'a;

    /// Allocate the edge sequence with exactly `count` records.
    ///
    /// Allocation failures (limits, out of memory) are reported here; the
    /// root is left without a usable edge list in that case.
    fn init_edges(&mut self, count: u32) -> Result<Self::Edges<'_>, SchemaError>;
}

impl EdgeSlots for &mut [Edge] {
    fn len(&self) -> usize {
        <[Edge]>::len(self)
    }

    fn set_src_node(&mut self, index: usize, node: NodeId) -> Result<(), SchemaError> {
        record_mut(self, index)?.src_node = node;
        Ok(())
    }

    fn set_sink_node(&mut self, index: usize, node: NodeId) -> Result<(), SchemaError> {
        record_mut(self, index)?.sink_node = node;
        Ok(())
    }

    fn set_switch_id(&mut self, index: usize, switch: SwitchId) -> Result<(), SchemaError> {
        record_mut(self, index)?.switch_id = switch;
        Ok(())
    }

    fn get(&self, index: usize) -> Result<Edge, SchemaError> {
        <[Edge]>::get(self, index).copied().ok_or(SchemaError::IndexOutOfRange {
            index,
            len: <[Edge]>::len(self),
        })
    }
}

fn record_mut<'s>(records: &'s mut [Edge], index: usize) -> Result<&'s mut Edge, SchemaError> {
    let len = records.len();
    records
        .get_mut(index)
        .ok_or(SchemaError::IndexOutOfRange { index, len })
}
