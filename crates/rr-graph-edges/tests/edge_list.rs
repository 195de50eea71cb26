// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(clippy::unwrap_used)]
//! Edge-list builder against the flat binary message.

use proptest::prelude::*;
use rr_graph_edges::{EdgeListBuilder, EdgeListError};
use rr_graph_msg::{BuilderOptions, MessageBuilder, MessageReader, ReaderOptions};
use rr_graph_schema::{Edge, SchemaError};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn build(count: u32, writes: &[(u32, Edge)]) -> Vec<u8> {
    let mut msg = MessageBuilder::new();
    let mut edges = EdgeListBuilder::new();
    edges.init(&mut msg, count).unwrap();
    for (index, edge) in writes {
        edges.set_edge(*index, *edge).unwrap();
    }
    drop(edges);
    msg.into_bytes()
}

fn read(bytes: &[u8]) -> Vec<Edge> {
    MessageReader::from_bytes(bytes, ReaderOptions::default())
        .unwrap()
        .to_vec()
}

#[test]
fn scenario_three_edges_out_of_order() {
    init_tracing();
    let mut msg = MessageBuilder::new();
    let mut edges = EdgeListBuilder::new();
    edges.init(&mut msg, 3).unwrap();
    edges.set(0, 10, 20, 1).unwrap();
    edges.set(2, 30, 40, 2).unwrap();
    edges.set(1, 50, 60, 3).unwrap();
    drop(edges);

    assert_eq!(
        read(&msg.to_bytes()),
        vec![
            Edge::new(10, 20, 1),
            Edge::new(50, 60, 3),
            Edge::new(30, 40, 2)
        ]
    );
}

#[test]
fn scenario_empty_list() {
    init_tracing();
    let mut msg = MessageBuilder::new();
    let mut edges = EdgeListBuilder::new();
    edges.init(&mut msg, 0).unwrap();
    assert_eq!(
        edges.set(0, 1, 1, 1),
        Err(EdgeListError::IndexOutOfRange { index: 0, count: 0 })
    );
    drop(edges);
    assert!(read(&msg.into_bytes()).is_empty());
}

#[test]
fn scenario_double_init_rejected() {
    init_tracing();
    let mut msg = MessageBuilder::new();
    let mut other = MessageBuilder::new();
    let mut edges = EdgeListBuilder::new();
    edges.init(&mut msg, 5).unwrap();
    assert_eq!(
        edges.init(&mut other, 5),
        Err(EdgeListError::AlreadyInitialized { count: 5 })
    );
    drop(edges);
    assert_eq!(msg.edge_count(), 5);
    assert_eq!(other.edge_count(), 0);
}

#[test]
fn capacity_every_index_writable_none_past_end() {
    let mut msg = MessageBuilder::new();
    let mut edges = EdgeListBuilder::new();
    edges.init(&mut msg, 4).unwrap();
    for i in 0..4 {
        edges.set(i, i, i + 1, 0).unwrap();
    }
    for i in [4, 5, u32::MAX] {
        assert!(matches!(
            edges.set(i, 0, 0, 0),
            Err(EdgeListError::IndexOutOfRange { count: 4, .. })
        ));
    }
}

#[test]
fn rejected_write_leaves_message_unchanged() {
    let mut msg = MessageBuilder::new();
    let mut edges = EdgeListBuilder::new();
    edges.init(&mut msg, 2).unwrap();
    edges.set(0, 7, 8, 9).unwrap();
    assert!(edges.set(2, 1, 1, 1).is_err());
    drop(edges);
    assert_eq!(
        read(&msg.into_bytes()),
        vec![Edge::new(7, 8, 9), Edge::default()]
    );
}

#[test]
fn message_limit_surfaces_as_schema_error() {
    let mut msg = MessageBuilder::with_options(BuilderOptions { max_edges: 8 });
    let mut edges = EdgeListBuilder::new();
    assert_eq!(
        edges.init(&mut msg, 9),
        Err(EdgeListError::Schema(SchemaError::CapacityExceeded {
            requested: 9,
            limit: 8
        }))
    );
    assert!(!edges.is_initialized());
}

#[test]
fn overwrite_replaces_all_fields() {
    let bytes = build(
        2,
        &[
            (1, Edge::new(1, 2, 3)),
            (1, Edge::new(4, 5, 6)),
            (0, Edge::new(9, 9, 9)),
        ],
    );
    assert_eq!(read(&bytes), vec![Edge::new(9, 9, 9), Edge::new(4, 5, 6)]);
}

fn edge_strategy() -> impl Strategy<Value = Edge> {
    (any::<u32>(), any::<u32>(), any::<u32>()).prop_map(Edge::from)
}

proptest! {
    #[test]
    fn every_record_reads_back_exactly(edges in prop::collection::vec(edge_strategy(), 0..64)) {
        let count = u32::try_from(edges.len()).unwrap();
        let writes: Vec<_> = (0..count).zip(edges.iter().copied()).collect();
        let bytes = build(count, &writes);
        prop_assert_eq!(read(&bytes), edges);
    }

    #[test]
    fn write_order_does_not_matter(
        shuffled in prop::collection::vec(edge_strategy(), 1..48)
            .prop_flat_map(|edges| {
                let indices: Vec<u32> = (0..u32::try_from(edges.len()).unwrap_or(0)).collect();
                (Just(edges), Just(indices).prop_shuffle())
            })
    ) {
        let (edges, order) = shuffled;
        let count = u32::try_from(edges.len()).unwrap();
        let ascending: Vec<_> = (0..count).zip(edges.iter().copied()).collect();
        let permuted: Vec<_> = order.iter().map(|&i| (i, edges[i as usize])).collect();
        prop_assert_eq!(build(count, &ascending), build(count, &permuted));
    }
}
