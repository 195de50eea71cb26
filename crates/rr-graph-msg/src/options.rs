// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Builder and reader limits, loadable from JSON.

use serde::{Deserialize, Serialize};

use crate::MessageError;

/// Default reader traversal limit: 8 Mi words of 8 bytes.
pub const DEFAULT_TRAVERSAL_LIMIT_BYTES: usize = 8 * 1024 * 1024 * 8;

/// Limits applied when allocating the edge sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderOptions {
    /// Largest edge count `init_edges` accepts.
    pub max_edges: u32,
}

impl Default for BuilderOptions {
    fn default() -> Self {
        Self {
            max_edges: u32::MAX,
        }
    }
}

/// Limits applied when validating a finalized segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderOptions {
    /// Largest segment (header + records) the reader will accept.
    pub traversal_limit_bytes: usize,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            traversal_limit_bytes: DEFAULT_TRAVERSAL_LIMIT_BYTES,
        }
    }
}

/// Combined options document, e.g. `{"builder": {"max_edges": 1000}}`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageOptions {
    /// Builder-side limits.
    pub builder: BuilderOptions,
    /// Reader-side limits.
    pub reader: ReaderOptions,
}

impl MessageOptions {
    /// Parse options from JSON; missing fields keep their defaults.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, MessageError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let opts = MessageOptions::from_json_slice(b"{}").unwrap();
        assert_eq!(opts, MessageOptions::default());
        assert_eq!(opts.builder.max_edges, u32::MAX);
        assert_eq!(opts.reader.traversal_limit_bytes, 64 * 1024 * 1024);
    }

    #[test]
    fn partial_document_overrides_named_fields() {
        let opts = MessageOptions::from_json_slice(br#"{"builder": {"max_edges": 16}}"#).unwrap();
        assert_eq!(opts.builder.max_edges, 16);
        assert_eq!(opts.reader, ReaderOptions::default());
    }

    #[test]
    fn malformed_document_is_config_error() {
        let err = MessageOptions::from_json_slice(b"{\"builder\": 3}").unwrap_err();
        assert!(matches!(err, MessageError::Config(_)));
    }
}
