//! A finished match: the mapping from pattern ids to host ids.

use std::collections::HashMap;

use hygram_core::NodeId;

/// An embedding of a pattern graph into a host graph.
///
/// Every pattern node is mapped to a host node with equal
/// `(is_hyperedge, label)`, and every pattern adjacency edge lands on a real
/// host adjacency edge. The mapping is injective on host ids; the host may
/// carry extra edges the pattern does not require.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Embedding {
    map: HashMap<NodeId, NodeId>,
}

impl Embedding {
    pub(crate) fn new(map: HashMap<NodeId, NodeId>) -> Self {
        Embedding { map }
    }

    /// Builds an embedding from explicit `(pattern id, host id)` pairs.
    ///
    /// Intended for callers that obtain a mapping by means other than
    /// [`find_isomorphic`](crate::search::find_isomorphic); no structural
    /// checks are performed here.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (NodeId, NodeId)>) -> Self {
        Embedding {
            map: pairs.into_iter().collect(),
        }
    }

    /// The host id a pattern id is mapped to, if any.
    pub fn host_id(&self, pattern_id: NodeId) -> Option<NodeId> {
        self.map.get(&pattern_id).copied()
    }

    /// Returns `true` if `pattern_id` is covered by this embedding.
    pub fn contains_pattern(&self, pattern_id: NodeId) -> bool {
        self.map.contains_key(&pattern_id)
    }

    /// Iterates over `(pattern id, host id)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.map.iter().map(|(p, h)| (*p, *h))
    }

    /// Number of mapped pattern nodes.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if nothing is mapped.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Read-only view of the underlying map.
    pub fn as_map(&self) -> &HashMap<NodeId, NodeId> {
        &self.map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_pairs_and_lookup() {
        let e = Embedding::from_pairs([(NodeId(0), NodeId(5)), (NodeId(1), NodeId(7))]);
        assert_eq!(e.len(), 2);
        assert_eq!(e.host_id(NodeId(0)), Some(NodeId(5)));
        assert_eq!(e.host_id(NodeId(1)), Some(NodeId(7)));
        assert_eq!(e.host_id(NodeId(2)), None);
        assert!(e.contains_pattern(NodeId(1)));
        assert!(!e.contains_pattern(NodeId(2)));
    }

    #[test]
    fn empty_embedding() {
        let e = Embedding::default();
        assert!(e.is_empty());
        assert_eq!(e.iter().count(), 0);
    }
}
