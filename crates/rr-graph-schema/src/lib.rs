// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Schema contract for routing-resource graph messages.
//!
//! This crate defines the record shapes of the edge list and the two ports an
//! edge-list writer targets. It contains NO wire format; the flat binary
//! message lives in `rr-graph-msg`.
//!
//! # Ports
//!
//! - [`RrGraphRoot`] — the root of an outgoing graph message. It owns the
//!   storage and hands out the edge-sequence field sized to an exact count.
//! - [`EdgeSlots`] — a mutable, indexable view over `N` fixed-shape edge
//!   records with typed field setters.
//!
//! Any binary-schema library, a hand-rolled flat buffer, or the in-memory
//! [`EdgeVec`] can implement both.
//!
//! # Crate Features
//!
//! - `serde` (default): derives `Serialize`/`Deserialize` on [`Edge`].

use thiserror::Error;

mod memory;
mod port;
mod types;

pub use memory::EdgeVec;
pub use port::{EdgeSlots, RrGraphRoot};
pub use types::{Edge, NodeId, SwitchId, EDGE_RECORD_LEN};

/// Errors raised by schema port implementations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A record index was outside the edge sequence.
    #[error("[RRG_INDEX_OUT_OF_RANGE] index {index} outside edge list of length {len}")]
    IndexOutOfRange {
        /// The rejected index.
        index: usize,
        /// Length of the edge sequence.
        len: usize,
    },
    /// The requested edge count exceeds the message's configured limit.
    #[error("[RRG_CAPACITY] requested {requested} edges, limit is {limit}")]
    CapacityExceeded {
        /// Number of edges requested.
        requested: u32,
        /// Maximum the message accepts.
        limit: u32,
    },
    /// Storage for the edge sequence could not be reserved.
    #[error("[RRG_ALLOC] could not reserve storage for {requested} edges")]
    Allocation {
        /// Number of edges requested.
        requested: u32,
    },
}
