//! Stable ID newtype for hypergraph nodes.
//!
//! Ids are assigned by the owning [`Graph`](crate::graph::Graph) and are never
//! reused for distinct logical entities within one graph lineage: fresh ids
//! always come from `first_free_id()` (max existing id + 1), so a deleted id
//! stays dead.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable node identifier within a [`Graph`](crate::graph::Graph).
///
/// Covers both vertices and hyperedges -- the two are distinguished by the
/// node payload, not by the id space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Returns the id shifted forward by `offset`. Used when allocating a
    /// block of fresh ids starting at `first_free_id()`.
    pub fn offset(self, offset: u32) -> Self {
        NodeId(self.0 + offset)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for NodeId {
    fn from(raw: u32) -> Self {
        NodeId(raw)
    }
}
