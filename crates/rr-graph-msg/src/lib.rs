// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Flat binary routing-resource graph message.
//!
//! A message is one contiguous little-endian segment:
//!
//! ```text
//! offset  size  field
//! 0       4     magic  b"RRG1"
//! 4       4     edge count (u32 LE)
//! 8       12*n  edge records: srcNode | sinkNode | switchId (u32 LE each)
//! ```
//!
//! [`MessageBuilder`] is the outgoing root and implements
//! [`rr_graph_schema::RrGraphRoot`]; [`MessageReader`] is the validated
//! read-only view over finalized bytes. The [`cbor`] module is the separate
//! encoder for edges held in memory (`rr_graph_schema::EdgeVec`).

use thiserror::Error;

pub mod cbor;
mod codec;
mod message;
mod options;
mod reader;

pub use codec::Reader;
pub use message::{EdgeListSlots, MessageBuilder};
pub use options::{BuilderOptions, MessageOptions, ReaderOptions};
pub use reader::MessageReader;

/// Leading bytes of every message segment.
pub const MAGIC: [u8; 4] = *b"RRG1";

/// Size of the segment header (magic + edge count).
pub const HEADER_LEN: usize = 8;

/// Errors produced while finalizing, reading, or configuring messages.
#[derive(Debug, Error)]
pub enum MessageError {
    /// The segment does not start with [`MAGIC`].
    #[error("[RRG_BAD_MAGIC] expected {expected:?}, found {found:?}")]
    BadMagic {
        /// Magic this crate writes.
        expected: [u8; 4],
        /// Bytes found at the start of the segment.
        found: [u8; 4],
    },
    /// The segment ended before the declared content.
    #[error("[RRG_TRUNCATED] expected {expected} bytes, got {actual}")]
    Truncated {
        /// Bytes the header requires.
        expected: usize,
        /// Bytes available.
        actual: usize,
    },
    /// Bytes follow the last declared edge record.
    #[error("[RRG_TRAILING] expected {expected} bytes, got {actual}")]
    TrailingBytes {
        /// Bytes the header requires.
        expected: usize,
        /// Bytes available.
        actual: usize,
    },
    /// The declared content exceeds the reader's traversal limit.
    #[error("[RRG_TRAVERSAL_LIMIT] message needs {needed} bytes, limit is {limit}")]
    TraversalLimitExceeded {
        /// Bytes the header requires.
        needed: usize,
        /// Configured limit.
        limit: usize,
    },
    /// I/O error while streaming the segment.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Options could not be parsed.
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
    /// CBOR encode/decode failure.
    #[error("cbor error: {0}")]
    Cbor(String),
}
