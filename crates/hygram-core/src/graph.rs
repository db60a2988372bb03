//! The hypergraph container: an id-keyed node map with undirected adjacency.
//!
//! [`Graph`] owns every node and the full adjacency structure. It is created
//! once from a backing map and never mutated afterwards -- every rewrite
//! produces a fresh `Graph` value, so a graph handed to the isomorphism
//! search or to a production stays stable for the duration of the call.
//!
//! # Adjacency symmetry
//!
//! Adjacency is undirected: if `b` appears in `a`'s neighbour list then `a`
//! appears in `b`'s. The constructor enforces this once by adding the missing
//! back-reference for every declared forward edge. Producers of new node maps
//! (rewrites) rebuild through the constructor and therefore re-establish the
//! invariant; nothing repairs adjacency on later edits because there are no
//! later edits.
//!
//! # Id allocation
//!
//! `first_free_id()` is `max(existing ids) + 1`. Callers must not pre-allocate
//! ids above the current maximum, and a deleted id is never handed out again
//! within one graph lineage.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::CoreError;
use crate::id::NodeId;
use crate::node::Node;

/// Neighbour list of a single node. Most nodes in grammar patterns touch a
/// handful of others, so the ids are kept inline.
pub type Neighbours = SmallVec<[NodeId; 4]>;

/// One slot of the graph's backing map: a node plus its adjacency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeEntry {
    /// The node payload.
    pub node: Node,
    /// Ids of adjacent nodes, in declaration order.
    pub neighbours: Neighbours,
}

impl NodeEntry {
    /// Creates an entry from a node and its declared neighbours.
    pub fn new(node: Node, neighbours: impl IntoIterator<Item = NodeId>) -> Self {
        NodeEntry {
            node,
            neighbours: neighbours.into_iter().collect(),
        }
    }
}

/// A labeled hypergraph embedded in the plane.
///
/// The backing map is insertion-ordered, which makes every id enumeration
/// (seed candidates during search, iteration during rewrites) deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Graph {
    nodes: IndexMap<NodeId, NodeEntry>,
}

impl Graph {
    /// Creates a graph from a backing map, symmetrizing adjacency.
    ///
    /// For every declared edge `a -> b` where `b` exists in the map, `a` is
    /// appended to `b`'s neighbour list if not already present. Neighbour ids
    /// that are absent from the map are carried through untouched: dangling
    /// references are a documented obligation of production authors, not a
    /// construction failure (see [`Graph::validate`]).
    pub fn new(mut nodes: IndexMap<NodeId, NodeEntry>) -> Self {
        let ids: Vec<NodeId> = nodes.keys().copied().collect();
        for a in ids {
            let forward: Vec<NodeId> = nodes[&a].neighbours.to_vec();
            for b in forward {
                if let Some(entry) = nodes.get_mut(&b) {
                    if !entry.neighbours.contains(&a) {
                        entry.neighbours.push(a);
                    }
                }
            }
        }
        Graph { nodes }
    }

    /// Assembles a graph from `(raw id, entry)` literals.
    ///
    /// Convenience for writing pattern and host graphs inline; see the
    /// [`builder`](crate::builder) helpers for the entry side.
    pub fn build(entries: impl IntoIterator<Item = (u32, NodeEntry)>) -> Self {
        Graph::new(
            entries
                .into_iter()
                .map(|(id, entry)| (NodeId(id), entry))
                .collect(),
        )
    }

    /// Looks up a node payload by id.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id).map(|entry| &entry.node)
    }

    /// Looks up a full entry (node + adjacency) by id.
    pub fn entry(&self, id: NodeId) -> Option<&NodeEntry> {
        self.nodes.get(&id)
    }

    /// Returns the neighbour ids of `id`, or the empty slice if `id` is not
    /// in the graph.
    pub fn neighbours(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(&id)
            .map(|entry| entry.neighbours.as_slice())
            .unwrap_or(&[])
    }

    /// Returns `true` if `id` is present.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Iterates over all ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// Iterates over `(id, entry)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &NodeEntry)> + '_ {
        self.nodes.iter().map(|(id, entry)| (*id, entry))
    }

    /// Read-only access to the backing map. Rewrites clone this to mutate a
    /// private copy.
    pub fn entries(&self) -> &IndexMap<NodeId, NodeEntry> {
        &self.nodes
    }

    /// Number of nodes (vertices and hyperedges).
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The next id a producer of new nodes may use: max existing id + 1
    /// (0 on the empty graph).
    pub fn first_free_id(&self) -> NodeId {
        NodeId(
            self.nodes
                .keys()
                .map(|id| id.0)
                .max()
                .map_or(0, |max| max + 1),
        )
    }

    /// Nodes other than `id` reachable through one adjacent hyperedge.
    ///
    /// Duplicates are preserved when several hyperedges connect the same
    /// pair; callers wanting a set can collect into one.
    pub fn hyperedge_neighbours(&self, id: NodeId) -> Vec<NodeId> {
        self.neighbours(id)
            .iter()
            .filter(|edge| self.node(**edge).is_some_and(|n| n.is_hyperedge))
            .flat_map(|edge| self.neighbours(*edge))
            .copied()
            .filter(|other| *other != id)
            .collect()
    }

    /// Checks the graph for dangling neighbour references.
    ///
    /// The rewrite path never calls this -- a removed node may legitimately
    /// remain referenced mid-derivation. It is offered to callers that want
    /// the post-condition checked at the end of a derivation.
    pub fn validate(&self) -> Result<(), CoreError> {
        for (id, entry) in &self.nodes {
            for neighbour in &entry.neighbours {
                if !self.nodes.contains_key(neighbour) {
                    return Err(CoreError::DanglingNeighbour {
                        id: *id,
                        neighbour: *neighbour,
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{hyperedge, vertex};

    fn triangle() -> Graph {
        // Two vertices joined by a hyperedge; only forward edges declared.
        Graph::build([
            (0, vertex((0.0, 0.0), "A", [2])),
            (1, vertex((1.0, 0.0), "B", [2])),
            (2, hyperedge((0.5, 0.5), "s", [])),
        ])
    }

    #[test]
    fn constructor_adds_missing_back_references() {
        let g = triangle();
        assert_eq!(g.neighbours(NodeId(2)), &[NodeId(0), NodeId(1)]);
        assert_eq!(g.neighbours(NodeId(0)), &[NodeId(2)]);
        assert_eq!(g.neighbours(NodeId(1)), &[NodeId(2)]);
    }

    #[test]
    fn symmetry_holds_for_all_pairs() {
        let g = triangle();
        for a in g.ids() {
            for b in g.neighbours(a) {
                assert!(
                    g.neighbours(*b).contains(&a),
                    "edge {a} -> {b} has no back-reference"
                );
            }
        }
    }

    #[test]
    fn constructor_does_not_duplicate_existing_back_references() {
        // Both directions declared up front; symmetrization must not double up.
        let g = Graph::build([
            (0, vertex((0.0, 0.0), "A", [1])),
            (1, hyperedge((1.0, 0.0), "s", [0])),
        ]);
        assert_eq!(g.neighbours(NodeId(0)), &[NodeId(1)]);
        assert_eq!(g.neighbours(NodeId(1)), &[NodeId(0)]);
    }

    #[test]
    fn dangling_neighbour_survives_construction() {
        let g = Graph::build([(0, vertex((0.0, 0.0), "A", [9]))]);
        assert_eq!(g.neighbours(NodeId(0)), &[NodeId(9)]);
        assert!(matches!(
            g.validate(),
            Err(CoreError::DanglingNeighbour {
                id: NodeId(0),
                neighbour: NodeId(9),
            })
        ));
    }

    #[test]
    fn validate_accepts_well_formed_graph() {
        assert!(triangle().validate().is_ok());
    }

    #[test]
    fn first_free_id_is_max_plus_one() {
        assert_eq!(triangle().first_free_id(), NodeId(3));
        let sparse = Graph::build([
            (0, vertex((0.0, 0.0), "A", [])),
            (7, vertex((1.0, 0.0), "B", [])),
        ]);
        assert_eq!(sparse.first_free_id(), NodeId(8));
    }

    #[test]
    fn first_free_id_on_empty_graph() {
        let g = Graph::new(IndexMap::new());
        assert!(g.is_empty());
        assert_eq!(g.first_free_id(), NodeId(0));
    }

    #[test]
    fn neighbours_of_unknown_id_is_empty() {
        assert!(triangle().neighbours(NodeId(42)).is_empty());
    }

    #[test]
    fn hyperedge_neighbours_crosses_one_hyperedge() {
        let g = triangle();
        assert_eq!(g.hyperedge_neighbours(NodeId(0)), vec![NodeId(1)]);
        assert_eq!(g.hyperedge_neighbours(NodeId(1)), vec![NodeId(0)]);
        // The hyperedge's own plain-vertex neighbours are not hyperedges.
        assert!(g.hyperedge_neighbours(NodeId(2)).is_empty());
    }

    #[test]
    fn hyperedge_neighbours_keeps_duplicates() {
        // Two parallel hyperedges between the same vertices.
        let g = Graph::build([
            (0, vertex((0.0, 0.0), "A", [2, 3])),
            (1, vertex((1.0, 0.0), "B", [2, 3])),
            (2, hyperedge((0.5, 0.3), "s", [])),
            (3, hyperedge((0.5, 0.7), "s", [])),
        ]);
        assert_eq!(g.hyperedge_neighbours(NodeId(0)), vec![NodeId(1), NodeId(1)]);
    }

    #[test]
    fn serde_roundtrip() {
        let g = triangle();
        let json = serde_json::to_string(&g).unwrap();
        let back: Graph = serde_json::from_str(&json).unwrap();
        assert_eq!(g, back);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        /// Random one-directional adjacency declarations over a small id range.
        fn declarations() -> impl Strategy<Value = Vec<Vec<u32>>> {
            prop::collection::vec(prop::collection::vec(0u32..8, 0..4), 1..8)
        }

        proptest! {
            #[test]
            fn symmetry_after_construction(decls in declarations()) {
                let node_count = decls.len() as u32;
                let g = Graph::build(decls.into_iter().enumerate().map(|(i, ns)| {
                    let ns: Vec<u32> = ns.into_iter().filter(|n| *n < node_count).collect();
                    (i as u32, vertex((i as f64, 0.0), "A", ns))
                }));
                for a in g.ids() {
                    for b in g.neighbours(a) {
                        prop_assert!(g.neighbours(*b).contains(&a));
                    }
                }
            }

            #[test]
            fn first_free_id_above_every_id(decls in declarations()) {
                let g = Graph::build(
                    decls
                        .into_iter()
                        .enumerate()
                        .map(|(i, _)| (i as u32 * 3, vertex((0.0, 0.0), "A", []))),
                );
                let free = g.first_free_id();
                for id in g.ids() {
                    prop_assert!(id < free);
                }
            }
        }
    }
}
