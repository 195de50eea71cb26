// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Bounds-checked little-endian reader over a message segment.

use rr_graph_schema::{Edge, EDGE_RECORD_LEN};

use crate::MessageError;

/// Sequential reader for little-endian scalars and fixed-size records.
#[derive(Debug)]
pub struct Reader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    /// Create a reader over the provided byte slice.
    #[must_use]
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.offset
    }

    /// Consume `len` bytes.
    pub fn take(&mut self, len: usize) -> Result<&'a [u8], MessageError> {
        let end = self
            .offset
            .checked_add(len)
            .filter(|end| *end <= self.bytes.len())
            .ok_or(MessageError::Truncated {
                expected: self.offset.saturating_add(len),
                actual: self.bytes.len(),
            })?;
        let out = &self.bytes[self.offset..end];
        self.offset = end;
        Ok(out)
    }

    /// Read exactly `N` bytes.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], MessageError> {
        let chunk = self.take(N)?;
        let mut raw = [0u8; N];
        raw.copy_from_slice(chunk);
        Ok(raw)
    }

    /// Read a little-endian u32.
    pub fn read_u32_le(&mut self) -> Result<u32, MessageError> {
        Ok(u32::from_le_bytes(self.read_array()?))
    }
}

/// Decode one record from a `chunks_exact(EDGE_RECORD_LEN)` chunk.
pub(crate) fn decode_record(chunk: &[u8]) -> Edge {
    let mut raw = [0u8; EDGE_RECORD_LEN];
    raw.copy_from_slice(chunk);
    Edge::from_le_bytes(raw)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn reads_scalars_and_records_in_order() {
        let mut bytes = 7u32.to_le_bytes().to_vec();
        bytes.extend_from_slice(&Edge::new(1, 2, 3).to_le_bytes());
        let mut r = Reader::new(&bytes);
        assert_eq!(r.read_u32_le().unwrap(), 7);
        let record = r.take(EDGE_RECORD_LEN).unwrap();
        assert_eq!(decode_record(record), Edge::new(1, 2, 3));
        assert_eq!(r.remaining(), 0);
    }

    #[test]
    fn short_read_reports_truncation() {
        let mut r = Reader::new(&[1, 2, 3]);
        match r.read_u32_le() {
            Err(MessageError::Truncated { expected, actual }) => {
                assert_eq!(expected, 4);
                assert_eq!(actual, 3);
            }
            other => panic!("unexpected {other:?}"),
        }
        // A failed read consumes nothing.
        assert_eq!(r.remaining(), 3);
    }
}
