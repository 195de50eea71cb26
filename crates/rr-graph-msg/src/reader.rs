// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Validated read-only view over a finalized message segment.

use rr_graph_schema::{Edge, EDGE_RECORD_LEN};
use tracing::{instrument, warn};

use crate::codec::decode_record;
use crate::{MessageError, Reader, ReaderOptions, HEADER_LEN, MAGIC};

/// Read-only edge list decoded from a finalized segment.
///
/// Construction validates the whole segment up front, so accessors never
/// fail afterwards.
#[derive(Clone, Copy, Debug)]
pub struct MessageReader<'a> {
    records: &'a [u8],
}

impl<'a> MessageReader<'a> {
    /// Validate `bytes` and expose its edge list.
    ///
    /// Rejects a wrong magic, content larger than
    /// [`ReaderOptions::traversal_limit_bytes`], short segments and trailing
    /// bytes.
    #[instrument(skip(bytes), fields(len = bytes.len()))]
    pub fn from_bytes(bytes: &'a [u8], options: ReaderOptions) -> Result<Self, MessageError> {
        let mut reader = Reader::new(bytes);
        let found: [u8; 4] = reader.read_array()?;
        if found != MAGIC {
            warn!(?found, "rejecting segment with bad magic");
            return Err(MessageError::BadMagic {
                expected: MAGIC,
                found,
            });
        }
        let count = reader.read_u32_le()? as usize;
        let needed = count
            .checked_mul(EDGE_RECORD_LEN)
            .and_then(|records| records.checked_add(HEADER_LEN))
            .unwrap_or(usize::MAX);
        if needed > options.traversal_limit_bytes {
            warn!(needed, limit = options.traversal_limit_bytes, "traversal limit exceeded");
            return Err(MessageError::TraversalLimitExceeded {
                needed,
                limit: options.traversal_limit_bytes,
            });
        }
        let records = reader.take(needed - HEADER_LEN)?;
        if reader.remaining() != 0 {
            return Err(MessageError::TrailingBytes {
                expected: needed,
                actual: bytes.len(),
            });
        }
        Ok(Self { records })
    }

    /// Number of edges in the message.
    pub fn len(&self) -> usize {
        self.records.len() / EDGE_RECORD_LEN
    }

    /// Returns `true` if the edge list is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Edge at `index`, if present.
    pub fn edge(&self, index: usize) -> Option<Edge> {
        self.edges().nth(index)
    }

    /// Iterate edges in index order.
    pub fn edges(&self) -> impl ExactSizeIterator<Item = Edge> + 'a {
        self.records
            .chunks_exact(EDGE_RECORD_LEN)
            .map(decode_record)
    }

    /// Copy the edge list out of the segment.
    pub fn to_vec(&self) -> Vec<Edge> {
        self.edges().collect()
    }
}
