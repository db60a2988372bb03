//! Literal-friendly helpers for assembling graph entries.
//!
//! Pattern and host graphs are written inline in client code and tests, so
//! these helpers accept plain tuples and raw ids and produce the
//! [`NodeEntry`] values [`Graph::build`](crate::graph::Graph::build) expects.

use std::collections::HashMap;

use crate::graph::NodeEntry;
use crate::id::NodeId;
use crate::node::Node;

/// A vertex entry from a position tuple, label, and raw neighbour ids.
pub fn vertex(
    pos: (f64, f64),
    label: &str,
    neighbours: impl IntoIterator<Item = u32>,
) -> NodeEntry {
    NodeEntry::new(
        Node::vertex(pos.into(), label),
        neighbours.into_iter().map(NodeId),
    )
}

/// Like [`vertex`], with an attribute map.
pub fn vertex_attrs(
    pos: (f64, f64),
    label: &str,
    neighbours: impl IntoIterator<Item = u32>,
    attrs: impl IntoIterator<Item = (&'static str, &'static str)>,
) -> NodeEntry {
    NodeEntry::new(
        Node::vertex(pos.into(), label).with_attribs(collect_attrs(attrs)),
        neighbours.into_iter().map(NodeId),
    )
}

/// A hyperedge entry from a position tuple, label, and raw neighbour ids.
pub fn hyperedge(
    pos: (f64, f64),
    label: &str,
    neighbours: impl IntoIterator<Item = u32>,
) -> NodeEntry {
    NodeEntry::new(
        Node::hyperedge(pos.into(), label),
        neighbours.into_iter().map(NodeId),
    )
}

/// Like [`hyperedge`], with an attribute map.
pub fn hyperedge_attrs(
    pos: (f64, f64),
    label: &str,
    neighbours: impl IntoIterator<Item = u32>,
    attrs: impl IntoIterator<Item = (&'static str, &'static str)>,
) -> NodeEntry {
    NodeEntry::new(
        Node::hyperedge(pos.into(), label).with_attribs(collect_attrs(attrs)),
        neighbours.into_iter().map(NodeId),
    )
}

fn collect_attrs(
    attrs: impl IntoIterator<Item = (&'static str, &'static str)>,
) -> HashMap<String, String> {
    attrs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
