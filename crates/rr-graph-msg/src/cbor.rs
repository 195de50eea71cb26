// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! CBOR encoder for edge lists populated in memory.
//!
//! Pairs with `rr_graph_schema::EdgeVec`: populate the array through the
//! edge-list builder, then serialize it here. Records are encoded as maps
//! with the schema field names (`srcNode`, `sinkNode`, `switchId`).

use ciborium::{de::from_reader, ser::into_writer};
use rr_graph_schema::Edge;

use crate::MessageError;

/// Encode an edge list as a CBOR array.
pub fn encode_edges(edges: &[Edge]) -> Result<Vec<u8>, MessageError> {
    let mut bytes = Vec::new();
    into_writer(edges, &mut bytes).map_err(|e| MessageError::Cbor(e.to_string()))?;
    Ok(bytes)
}

/// Decode an edge list produced by [`encode_edges`].
pub fn decode_edges(bytes: &[u8]) -> Result<Vec<Edge>, MessageError> {
    from_reader(bytes).map_err(|e| MessageError::Cbor(e.to_string()))
}
