// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Outgoing message segment and the edge-record view into it.

use std::io::Write;

use rr_graph_schema::{
    Edge, EdgeSlots, NodeId, RrGraphRoot, SchemaError, SwitchId, EDGE_RECORD_LEN,
};
use tracing::{debug, trace};

use crate::codec::decode_record;
use crate::{BuilderOptions, MessageError, HEADER_LEN, MAGIC};

const SRC_NODE_OFFSET: usize = 0;
const SINK_NODE_OFFSET: usize = 4;
const SWITCH_ID_OFFSET: usize = 8;

/// Owner of an outgoing routing-resource graph message.
///
/// The segment always holds a valid header; until [`init_edges`] runs the edge
/// count is zero. The builder is the sole owner of the backing storage and
/// lends out [`EdgeListSlots`] views that cannot outlive it.
///
/// [`init_edges`]: MessageBuilder::init_edges
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageBuilder {
    segment: Vec<u8>,
    options: BuilderOptions,
}

impl Default for MessageBuilder {
    fn default() -> Self {
        Self::with_options(BuilderOptions::default())
    }
}

impl MessageBuilder {
    /// Create an empty message with default limits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty message with the given limits.
    pub fn with_options(options: BuilderOptions) -> Self {
        let mut segment = Vec::with_capacity(HEADER_LEN);
        segment.extend_from_slice(&MAGIC);
        segment.extend_from_slice(&0u32.to_le_bytes());
        Self { segment, options }
    }

    /// Limits this message was created with.
    pub fn options(&self) -> BuilderOptions {
        self.options
    }

    /// Number of records in the edge sequence.
    pub fn edge_count(&self) -> usize {
        (self.segment.len() - HEADER_LEN) / EDGE_RECORD_LEN
    }

    /// Allocate the edge sequence with exactly `count` zeroed records.
    ///
    /// Any previous edge list is discarded. On error the message keeps an
    /// empty edge list.
    pub fn init_edges(&mut self, count: u32) -> Result<EdgeListSlots<'_>, SchemaError> {
        self.segment.truncate(HEADER_LEN);
        self.write_count(0);
        if count > self.options.max_edges {
            return Err(SchemaError::CapacityExceeded {
                requested: count,
                limit: self.options.max_edges,
            });
        }
        let bytes = (count as usize)
            .checked_mul(EDGE_RECORD_LEN)
            .ok_or(SchemaError::Allocation { requested: count })?;
        self.segment
            .try_reserve_exact(bytes)
            .map_err(|_| SchemaError::Allocation { requested: count })?;
        self.segment.resize(HEADER_LEN + bytes, 0);
        self.write_count(count);
        debug!(count, bytes, "allocated edge sequence");
        Ok(EdgeListSlots {
            records: &mut self.segment[HEADER_LEN..],
        })
    }

    /// Read-only view of the current edge records.
    pub fn edges(&self) -> impl ExactSizeIterator<Item = Edge> + '_ {
        self.segment[HEADER_LEN..]
            .chunks_exact(EDGE_RECORD_LEN)
            .map(decode_record)
    }

    /// Finalized segment bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.segment.clone()
    }

    /// Consume the message and return its segment.
    pub fn into_bytes(self) -> Vec<u8> {
        self.segment
    }

    /// Stream the finalized segment to `writer`.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<(), MessageError> {
        writer.write_all(&self.segment)?;
        writer.flush()?;
        Ok(())
    }

    fn write_count(&mut self, count: u32) {
        self.segment[MAGIC.len()..HEADER_LEN].copy_from_slice(&count.to_le_bytes());
    }
}

impl RrGraphRoot for MessageBuilder {
    type Edges<'a> = EdgeListSlots<'a>;

    fn init_edges(&mut self, count: u32) -> Result<Self::Edges<'_>, SchemaError> {
        MessageBuilder::init_edges(self, count)
    }
}

/// Mutable view over the fixed-stride edge records of a [`MessageBuilder`].
#[derive(Debug)]
pub struct EdgeListSlots<'a> {
    records: &'a mut [u8],
}

impl<'a> EdgeListSlots<'a> {
    /// Split into two disjoint views at record `mid`.
    ///
    /// The halves cover `0..mid` and `mid..len` and may be written from
    /// different threads.
    pub fn split_at_mut(self, mid: usize) -> Result<(Self, Self), SchemaError> {
        let len = self.len();
        if mid > len {
            return Err(SchemaError::IndexOutOfRange { index: mid, len });
        }
        let Self { records } = self;
        let (left, right) = records.split_at_mut(mid * EDGE_RECORD_LEN);
        Ok((Self { records: left }, Self { records: right }))
    }

    fn field_mut(&mut self, index: usize, offset: usize) -> Result<&mut [u8], SchemaError> {
        let len = self.len();
        if index >= len {
            return Err(SchemaError::IndexOutOfRange { index, len });
        }
        let start = index * EDGE_RECORD_LEN + offset;
        Ok(&mut self.records[start..start + 4])
    }

    fn write_field(&mut self, index: usize, offset: usize, value: u32) -> Result<(), SchemaError> {
        self.field_mut(index, offset)?
            .copy_from_slice(&value.to_le_bytes());
        trace!(index, offset, value, "edge field written");
        Ok(())
    }
}

impl EdgeSlots for EdgeListSlots<'_> {
    fn len(&self) -> usize {
        self.records.len() / EDGE_RECORD_LEN
    }

    fn set_src_node(&mut self, index: usize, node: NodeId) -> Result<(), SchemaError> {
        self.write_field(index, SRC_NODE_OFFSET, node)
    }

    fn set_sink_node(&mut self, index: usize, node: NodeId) -> Result<(), SchemaError> {
        self.write_field(index, SINK_NODE_OFFSET, node)
    }

    fn set_switch_id(&mut self, index: usize, switch: SwitchId) -> Result<(), SchemaError> {
        self.write_field(index, SWITCH_ID_OFFSET, switch)
    }

    fn get(&self, index: usize) -> Result<Edge, SchemaError> {
        let len = self.len();
        self.records
            .chunks_exact(EDGE_RECORD_LEN)
            .nth(index)
            .map(decode_record)
            .ok_or(SchemaError::IndexOutOfRange { index, len })
    }
}
