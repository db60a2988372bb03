//! Node payloads: vertices and hyperedges.
//!
//! A [`Node`] describes one hypergraph element. Vertices and hyperedges share
//! the same payload shape and live in the same id space -- a hyperedge is
//! simply a node flagged `is_hyperedge`, connecting whatever appears in its
//! adjacency list (no arity limit).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::point::Point;

/// A single hypergraph element: vertex or hyperedge.
///
/// Identity for matching purposes is `(is_hyperedge, label)`; position and
/// attributes are carried along but never consulted by the isomorphism
/// search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Vertex (`false`) or hyperedge (`true`).
    pub is_hyperedge: bool,
    /// Position in the plane.
    pub pos: Point,
    /// Semantic tag consulted by matching.
    pub label: String,
    /// Free-form metadata, mutable independently of identity.
    pub attribs: HashMap<String, String>,
}

impl Node {
    /// Creates a vertex with no attributes.
    pub fn vertex(pos: Point, label: impl Into<String>) -> Self {
        Node {
            is_hyperedge: false,
            pos,
            label: label.into(),
            attribs: HashMap::new(),
        }
    }

    /// Creates a hyperedge with no attributes.
    pub fn hyperedge(pos: Point, label: impl Into<String>) -> Self {
        Node {
            is_hyperedge: true,
            pos,
            label: label.into(),
            attribs: HashMap::new(),
        }
    }

    /// Replaces the attribute map, builder-style.
    pub fn with_attribs(mut self, attribs: HashMap<String, String>) -> Self {
        self.attribs = attribs;
        self
    }

    /// Returns `true` if `self` and `other` are interchangeable for matching:
    /// same kind and same label. Position and attributes are irrelevant.
    pub fn matches(&self, other: &Node) -> bool {
        self.is_hyperedge == other.is_hyperedge && self.label == other.label
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_constructor() {
        let v = Node::vertex(Point::new(1.0, 2.0), "A");
        assert!(!v.is_hyperedge);
        assert_eq!(v.label, "A");
        assert!(v.attribs.is_empty());
    }

    #[test]
    fn hyperedge_constructor() {
        let e = Node::hyperedge(Point::new(0.0, 0.0), "s");
        assert!(e.is_hyperedge);
        assert_eq!(e.label, "s");
    }

    #[test]
    fn matches_ignores_position_and_attribs() {
        let a = Node::vertex(Point::new(0.0, 0.0), "A");
        let b = Node::vertex(Point::new(5.0, -3.0), "A")
            .with_attribs(HashMap::from([("k".to_string(), "v".to_string())]));
        assert!(a.matches(&b));
        assert!(b.matches(&a));
    }

    #[test]
    fn matches_requires_same_kind() {
        let v = Node::vertex(Point::new(0.0, 0.0), "s");
        let e = Node::hyperedge(Point::new(0.0, 0.0), "s");
        assert!(!v.matches(&e));
    }

    #[test]
    fn matches_requires_same_label() {
        let a = Node::vertex(Point::new(0.0, 0.0), "A");
        let b = Node::vertex(Point::new(0.0, 0.0), "B");
        assert!(!a.matches(&b));
    }

    #[test]
    fn serde_roundtrip() {
        let node = Node::hyperedge(Point::new(1.0, -1.0), "t")
            .with_attribs(HashMap::from([("w".to_string(), "3".to_string())]));
        let json = serde_json::to_string(&node).unwrap();
        let back: Node = serde_json::from_str(&json).unwrap();
        assert_eq!(node, back);
    }
}
