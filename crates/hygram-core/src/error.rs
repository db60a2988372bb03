//! Core error types for hygram-core.

use thiserror::Error;

use crate::id::NodeId;

/// Errors produced by the core graph data model.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A neighbour list references an id with no entry in the graph.
    /// Reported by [`Graph::validate`](crate::graph::Graph::validate) only;
    /// construction and rewriting tolerate dangling references by design.
    #[error("node {id} references missing neighbour {neighbour}")]
    DanglingNeighbour { id: NodeId, neighbour: NodeId },
}
