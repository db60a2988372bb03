//! Productions: rewriting rules over matched occurrences.
//!
//! A production replaces one matched occurrence of its left pattern with the
//! shape of its right pattern, re-placing every inserted and modified node
//! through the affine map solved from the three anchor correspondences
//! (left ids 0..=2). The two patterns share ids: an id in both is modified
//! in place, an id only in `right` is inserted under a fresh host id, an id
//! only in `left` is removed.

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use hygram_core::{Graph, Neighbours, NodeEntry, NodeId, Point};
use hygram_match::Embedding;

use crate::affine::AffineMap;
use crate::behavior::{DefaultBehavior, MatchContext, RuleBehavior};
use crate::error::RewriteError;

/// Number of anchor nodes a left pattern reserves (ids 0..=2).
const ANCHOR_COUNT: u32 = 3;

/// A rewriting rule: left pattern, right pattern, seed, and behavior.
pub struct Production {
    left: Graph,
    right: Graph,
    seed: NodeId,
    behavior: Box<dyn RuleBehavior>,
}

impl Production {
    /// Creates a purely structural production (always applicable, no
    /// attribute changes).
    ///
    /// Fails when `seed` is not a node of `left`, or when `left` lacks one
    /// of the three anchor ids -- both are authoring bugs caught before the
    /// rule can ever run.
    pub fn new(left: Graph, right: Graph, seed: NodeId) -> Result<Self, RewriteError> {
        Self::with_behavior(left, right, seed, Box::new(DefaultBehavior))
    }

    /// Creates a production with an explicit [`RuleBehavior`].
    pub fn with_behavior(
        left: Graph,
        right: Graph,
        seed: NodeId,
        behavior: Box<dyn RuleBehavior>,
    ) -> Result<Self, RewriteError> {
        if !left.contains(seed) {
            return Err(RewriteError::SeedNotInPattern { id: seed });
        }
        for raw in 0..ANCHOR_COUNT {
            let id = NodeId(raw);
            if !left.contains(id) {
                return Err(RewriteError::MissingAnchor { id });
            }
        }
        Ok(Production {
            left,
            right,
            seed,
            behavior,
        })
    }

    /// The pattern that must be matched before rewriting.
    pub fn left(&self) -> &Graph {
        &self.left
    }

    /// The replacement pattern, in the pattern's local coordinate space.
    pub fn right(&self) -> &Graph {
        &self.right
    }

    /// The left-pattern id every search for this rule is anchored at.
    pub fn seed(&self) -> NodeId {
        self.seed
    }

    /// Ids present in `right` but not in `left`, ascending. Fresh host ids
    /// are allocated in this order.
    pub fn inserted_ids(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self
            .right
            .ids()
            .filter(|id| !self.left.contains(*id))
            .collect();
        ids.sort();
        ids
    }

    /// Ids present in both patterns, ascending.
    pub fn modified_ids(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self
            .right
            .ids()
            .filter(|id| self.left.contains(*id))
            .collect();
        ids.sort();
        ids
    }

    /// Ids present in `left` but not in `right`, ascending.
    pub fn removed_ids(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self
            .left
            .ids()
            .filter(|id| !self.right.contains(*id))
            .collect();
        ids.sort();
        ids
    }

    /// Predicate check for the strategy layer.
    pub(crate) fn behavior_applicable(&self, context: &MatchContext) -> bool {
        self.behavior.applicable(context)
    }

    /// Builds the matched context the behavior hooks see: every left-pattern
    /// id resolved to the host node it matched.
    ///
    /// Fails with [`RewriteError::IncompleteEmbedding`] when the embedding
    /// misses a left id or maps one to a node absent from the host.
    pub fn match_context(
        &self,
        graph: &Graph,
        embedding: &Embedding,
    ) -> Result<MatchContext, RewriteError> {
        let mut nodes = HashMap::new();
        for pattern_id in self.left.ids() {
            let host_id = embedding
                .host_id(pattern_id)
                .ok_or(RewriteError::IncompleteEmbedding {
                    missing: pattern_id,
                })?;
            let node = graph
                .node(host_id)
                .ok_or(RewriteError::IncompleteEmbedding {
                    missing: pattern_id,
                })?;
            nodes.insert(pattern_id, node.clone());
        }
        Ok(MatchContext::new(nodes))
    }

    /// Solves the affine map sending the three left anchors onto the host
    /// nodes they matched.
    pub fn anchor_transform(
        &self,
        graph: &Graph,
        embedding: &Embedding,
    ) -> Result<AffineMap, RewriteError> {
        let mut from = [Point::new(0.0, 0.0); ANCHOR_COUNT as usize];
        let mut to = from;
        for raw in 0..ANCHOR_COUNT {
            let id = NodeId(raw);
            let left_node = self
                .left
                .node(id)
                .ok_or(RewriteError::MissingAnchor { id })?;
            let host_id = embedding
                .host_id(id)
                .ok_or(RewriteError::IncompleteEmbedding { missing: id })?;
            let host_node = graph
                .node(host_id)
                .ok_or(RewriteError::IncompleteEmbedding { missing: id })?;
            from[raw as usize] = left_node.pos;
            to[raw as usize] = host_node.pos;
        }
        AffineMap::from_anchors(from, to)
    }

    /// Rewrites one matched occurrence, returning a new graph.
    ///
    /// The embedding must be a complete embedding of `left` into `graph`
    /// (normally one yielded by the isomorphism search). When the behavior's
    /// predicate rejects the match, the input graph is returned unchanged.
    /// The input graph is never mutated; on error no new graph exists.
    pub fn apply(&self, graph: &Graph, embedding: &Embedding) -> Result<Graph, RewriteError> {
        let context = self.match_context(graph, embedding)?;
        if !self.behavior.applicable(&context) {
            return Ok(graph.clone());
        }

        let transform = self.anchor_transform(graph, embedding)?;

        // Extend the embedding with fresh host ids for every inserted node.
        let mut id_map: HashMap<NodeId, NodeId> = embedding.as_map().clone();
        let free = graph.first_free_id();
        let inserted = self.inserted_ids();
        for (offset, id) in inserted.iter().enumerate() {
            id_map.insert(*id, free.offset(offset as u32));
        }
        let map_id = |id: NodeId| -> Result<NodeId, RewriteError> {
            id_map
                .get(&id)
                .copied()
                .ok_or(RewriteError::UnmappedPatternId { id })
        };

        let mut nodes = graph.entries().clone();

        // Inserted nodes: re-placed copies of the right pattern.
        for (id, entry) in self.right.iter() {
            if self.left.contains(id) {
                continue;
            }
            let new_id = map_id(id)?;
            let mut node = entry.node.clone();
            node.pos = transform.apply(node.pos);
            let neighbours = entry
                .neighbours
                .iter()
                .map(|n| map_id(*n))
                .collect::<Result<Neighbours, _>>()?;
            nodes.insert(new_id, NodeEntry { node, neighbours });
        }

        // Modified nodes: re-placed, attributes taken from the current host
        // node, neighbours unioned -- a modified node never loses an
        // existing edge, it only gains the ones the pattern specifies.
        for (id, entry) in self.right.iter() {
            if !self.left.contains(id) {
                continue;
            }
            let host_id = map_id(id)?;
            let existing = graph
                .entry(host_id)
                .ok_or(RewriteError::IncompleteEmbedding { missing: id })?;
            let mut node = entry.node.clone();
            node.pos = transform.apply(node.pos);
            node.attribs = existing.node.attribs.clone();
            let mut neighbours = existing.neighbours.clone();
            for n in &entry.neighbours {
                let mapped = map_id(*n)?;
                if !neighbours.contains(&mapped) {
                    neighbours.push(mapped);
                }
            }
            nodes.insert(host_id, NodeEntry { node, neighbours });
        }

        // Removed nodes disappear entirely. A surviving neighbour list may
        // still reference them; keeping that from happening is the
        // production author's obligation.
        let removed = self.removed_ids();
        for id in &removed {
            let host_id = map_id(*id)?;
            nodes.shift_remove(&host_id);
        }

        // Attribute derivation runs last and overrides the modified-node
        // attribute copy. Targets that no longer exist are skipped.
        for (pattern_id, attribs) in self.behavior.derive_attribs(&context) {
            let Some(host_id) = id_map.get(&pattern_id) else {
                continue;
            };
            if let Some(entry) = nodes.get_mut(host_id) {
                entry.node.attribs = attribs;
            }
        }

        debug!(
            inserted = inserted.len(),
            modified = self.modified_ids().len(),
            removed = removed.len(),
            "production applied"
        );
        Ok(Graph::new(nodes))
    }
}

impl fmt::Debug for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Production")
            .field("left", &self.left)
            .field("right", &self.right)
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}
