//! The behavioral side of a production: applicability and attribute
//! derivation over a matched context.
//!
//! Structural matching says nothing about attributes, so a production
//! carries a [`RuleBehavior`] deciding (a) whether a structurally valid
//! match is semantically applicable and (b) what attribute values the
//! rewritten nodes receive. Both hooks see the same [`MatchContext`]: the
//! host nodes the left pattern matched, keyed by pattern id.

use std::collections::HashMap;

use hygram_core::{Node, NodeId};

/// Attribute map of a single node.
pub type AttribMap = HashMap<String, String>;

/// The matched host nodes a behavior gets to inspect, keyed by
/// left-pattern id.
#[derive(Debug, Clone)]
pub struct MatchContext {
    nodes: HashMap<NodeId, Node>,
}

impl MatchContext {
    pub(crate) fn new(nodes: HashMap<NodeId, Node>) -> Self {
        MatchContext { nodes }
    }

    /// The host node matched by a left-pattern id.
    pub fn node(&self, pattern_id: NodeId) -> Option<&Node> {
        self.nodes.get(&pattern_id)
    }

    /// Convenience: an attribute of the node matched by `pattern_id`.
    pub fn attrib(&self, pattern_id: NodeId, key: &str) -> Option<&str> {
        self.node(pattern_id)
            .and_then(|node| node.attribs.get(key))
            .map(String::as_str)
    }

    /// Iterates over `(pattern id, matched node)` pairs in no particular
    /// order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes.iter().map(|(id, node)| (*id, node))
    }

    /// Number of matched pattern nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the context is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Applicability predicate and attribute derivation for a production.
///
/// The defaults make a purely structural rule: every match is applicable
/// and no attributes change.
pub trait RuleBehavior {
    /// Gates whether a structurally valid match may be rewritten. When this
    /// returns `false`, `apply` is a no-op returning the input graph
    /// unchanged.
    fn applicable(&self, _context: &MatchContext) -> bool {
        true
    }

    /// Derives new attribute maps for rewritten nodes, keyed by pattern id.
    /// Runs after the structural rewrite and overwrites whatever attributes
    /// the targeted nodes carry at that point.
    fn derive_attribs(&self, _context: &MatchContext) -> HashMap<NodeId, AttribMap> {
        HashMap::new()
    }
}

/// Always applicable, attribute-preserving behavior.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultBehavior;

impl RuleBehavior for DefaultBehavior {}

#[cfg(test)]
mod tests {
    use super::*;
    use hygram_core::Point;

    fn context() -> MatchContext {
        let mut nodes = HashMap::new();
        nodes.insert(
            NodeId(0),
            Node::vertex(Point::new(0.0, 0.0), "a").with_attribs(HashMap::from([(
                "weight".to_string(),
                "2".to_string(),
            )])),
        );
        nodes.insert(NodeId(1), Node::hyperedge(Point::new(1.0, 0.0), "s"));
        MatchContext::new(nodes)
    }

    #[test]
    fn context_lookups() {
        let ctx = context();
        assert_eq!(ctx.len(), 2);
        assert_eq!(ctx.node(NodeId(0)).map(|n| n.label.as_str()), Some("a"));
        assert_eq!(ctx.attrib(NodeId(0), "weight"), Some("2"));
        assert_eq!(ctx.attrib(NodeId(0), "missing"), None);
        assert_eq!(ctx.attrib(NodeId(7), "weight"), None);
    }

    #[test]
    fn default_behavior_is_identity() {
        let ctx = context();
        assert!(DefaultBehavior.applicable(&ctx));
        assert!(DefaultBehavior.derive_attribs(&ctx).is_empty());
    }
}
