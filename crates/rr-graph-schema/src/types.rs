// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Edge record shape shared by every message implementation.

/// Identifier of a routing-resource graph node.
pub type NodeId = u32;
/// Identifier of a switch type in the graph's switch table.
pub type SwitchId = u32;

/// Encoded size of one edge record: three little-endian `u32` fields.
pub const EDGE_RECORD_LEN: usize = 12;

/// Directed connection between two graph nodes through a switch.
///
/// Ids are opaque references into tables owned by the enclosing graph; no
/// range checking happens here.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Edge {
    /// Originating node (`srcNode`).
    pub src_node: NodeId,
    /// Destination node (`sinkNode`).
    pub sink_node: NodeId,
    /// Switch connecting the two nodes (`switchId`).
    pub switch_id: SwitchId,
}

impl Edge {
    /// Build an edge from its three fields.
    pub const fn new(src_node: NodeId, sink_node: NodeId, switch_id: SwitchId) -> Self {
        Self {
            src_node,
            sink_node,
            switch_id,
        }
    }

    /// Encode as a fixed-size little-endian record.
    pub fn to_le_bytes(self) -> [u8; EDGE_RECORD_LEN] {
        let mut out = [0u8; EDGE_RECORD_LEN];
        out[0..4].copy_from_slice(&self.src_node.to_le_bytes());
        out[4..8].copy_from_slice(&self.sink_node.to_le_bytes());
        out[8..12].copy_from_slice(&self.switch_id.to_le_bytes());
        out
    }

    /// Decode a fixed-size little-endian record.
    pub fn from_le_bytes(raw: [u8; EDGE_RECORD_LEN]) -> Self {
        let field =
            |at: usize| u32::from_le_bytes([raw[at], raw[at + 1], raw[at + 2], raw[at + 3]]);
        Self {
            src_node: field(0),
            sink_node: field(4),
            switch_id: field(8),
        }
    }
}

impl From<(NodeId, NodeId, SwitchId)> for Edge {
    fn from((src_node, sink_node, switch_id): (NodeId, NodeId, SwitchId)) -> Self {
        Self::new(src_node, sink_node, switch_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_layout_is_src_sink_switch_le() {
        let edge = Edge::new(0x0102_0304, 5, 0xAABB_CCDD);
        let raw = edge.to_le_bytes();
        assert_eq!(&raw[0..4], &[0x04, 0x03, 0x02, 0x01]);
        assert_eq!(&raw[4..8], &[5, 0, 0, 0]);
        assert_eq!(&raw[8..12], &[0xDD, 0xCC, 0xBB, 0xAA]);
        assert_eq!(Edge::from_le_bytes(raw), edge);
    }

    #[test]
    fn default_edge_is_zeroed() {
        assert_eq!(Edge::default().to_le_bytes(), [0u8; EDGE_RECORD_LEN]);
    }
}
