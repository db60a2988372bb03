//! Anchored backtracking enumeration of pattern embeddings.
//!
//! [`find_isomorphic`] lazily yields every embedding of a pattern graph into
//! a host graph, anchored at a designated seed pattern node. Each host node
//! matching the seed roots an independent depth-first branch; within a
//! branch, pattern nodes are placed one at a time against host candidates
//! drawn from the neighbourhood of nodes already placed.
//!
//! The search is a monomorphism check preserving adjacency: every pattern
//! edge must land on a host edge, but host nodes are free to carry extra
//! edges. Symmetric patterns can yield the same mapping more than once;
//! nothing deduplicates.
//!
//! Depth-first backtracking is driven by an explicit frame stack rather than
//! recursion, so the iterator suspends between yields for free and dropping
//! it abandons the remaining search tree at no cost.

use std::collections::HashMap;

use tracing::trace;

use hygram_core::{Graph, NodeId};

use crate::embedding::Embedding;

/// Lazily enumerates every embedding of `pattern` into `host`, anchored at
/// `seed_pattern_id`.
///
/// Host seed candidates are enumerated in the host map's insertion order.
/// The returned iterator is finite and independent of any previous search;
/// calling this again restarts from scratch. A seed id absent from the
/// pattern produces an empty iterator.
pub fn find_isomorphic<'g>(
    host: &'g Graph,
    pattern: &'g Graph,
    seed_pattern_id: NodeId,
) -> Isomorphisms<'g> {
    let seeds: Vec<NodeId> = match pattern.node(seed_pattern_id) {
        Some(seed_node) => host
            .iter()
            .filter(|(_, entry)| entry.node.matches(seed_node))
            .map(|(id, _)| id)
            .collect(),
        None => Vec::new(),
    };
    trace!(candidates = seeds.len(), "seed candidates enumerated");
    Isomorphisms {
        host,
        pattern,
        seed_pattern_id,
        seeds,
        next_seed: 0,
        stack: Vec::new(),
    }
}

/// One suspended decision point of the depth-first search: a pattern node
/// being placed, the partial state it extends, and the host candidates left
/// to try for it.
struct Frame {
    /// Partial mapping before `pattern_id` is placed.
    map: HashMap<NodeId, NodeId>,
    /// Pattern ids still waiting to be placed (LIFO), `pattern_id` excluded.
    pending: Vec<NodeId>,
    /// The pattern id this frame is placing.
    pattern_id: NodeId,
    /// Host ids of the already-placed pattern-neighbours of `pattern_id`.
    /// A candidate must be host-adjacent to every one of them.
    required: Vec<NodeId>,
    /// Host candidates: the neighbour list of the first required id.
    candidates: Vec<NodeId>,
    /// Index of the next candidate to try.
    next: usize,
}

/// Pull-based iterator over the embeddings of one (host, pattern, seed)
/// search. See [`find_isomorphic`].
pub struct Isomorphisms<'g> {
    host: &'g Graph,
    pattern: &'g Graph,
    seed_pattern_id: NodeId,
    seeds: Vec<NodeId>,
    next_seed: usize,
    stack: Vec<Frame>,
}

impl Isomorphisms<'_> {
    fn is_complete(&self, map: &HashMap<NodeId, NodeId>) -> bool {
        self.pattern.ids().all(|pid| map.contains_key(&pid))
    }

    /// Whether `candidate` can stand in for the pattern node this frame is
    /// placing: unused so far, node-matching, and adjacent to every already
    /// placed pattern-neighbour.
    fn accepts(&self, frame: &Frame, candidate: NodeId) -> bool {
        if frame.map.values().any(|used| *used == candidate) {
            return false;
        }
        let (Some(candidate_node), Some(pattern_node)) = (
            self.host.node(candidate),
            self.pattern.node(frame.pattern_id),
        ) else {
            return false;
        };
        if !candidate_node.matches(pattern_node) {
            return false;
        }
        let candidate_neighbours = self.host.neighbours(candidate);
        frame
            .required
            .iter()
            .all(|required| candidate_neighbours.contains(required))
    }

    /// Pops the next frontier id off `pending` and pushes the frame that
    /// will place it. Candidates are restricted to the host neighbours of
    /// the first already-placed pattern-neighbour; a frontier id with no
    /// placed neighbour (only possible for a pattern disconnected from the
    /// seed) gets an empty candidate list and the frame backtracks
    /// immediately.
    fn push_frame(&mut self, map: HashMap<NodeId, NodeId>, mut pending: Vec<NodeId>) {
        let Some(pattern_id) = pending.pop() else {
            return;
        };
        let required: Vec<NodeId> = self
            .pattern
            .neighbours(pattern_id)
            .iter()
            .filter_map(|p| map.get(p).copied())
            .collect();
        let candidates: Vec<NodeId> = match required.first() {
            Some(first) => self.host.neighbours(*first).to_vec(),
            None => Vec::new(),
        };
        self.stack.push(Frame {
            map,
            pending,
            pattern_id,
            required,
            candidates,
            next: 0,
        });
    }
}

impl Iterator for Isomorphisms<'_> {
    type Item = Embedding;

    fn next(&mut self) -> Option<Embedding> {
        loop {
            if self.stack.is_empty() {
                // Open the next seed branch.
                let seed_host = match self.seeds.get(self.next_seed) {
                    Some(seed) => *seed,
                    None => return None,
                };
                self.next_seed += 1;
                trace!(seed = %seed_host, "starting seed branch");

                let mut map = HashMap::new();
                map.insert(self.seed_pattern_id, seed_host);
                let pending: Vec<NodeId> = self.pattern.neighbours(self.seed_pattern_id).to_vec();
                if pending.is_empty() {
                    // Single-node pattern: the seed alone may already be a
                    // full embedding.
                    if self.is_complete(&map) {
                        return Some(Embedding::new(map));
                    }
                    continue;
                }
                self.push_frame(map, pending);
                continue;
            }

            // Advance the deepest frame to its next candidate.
            let top = self.stack.len() - 1;
            let candidate = {
                let frame = &mut self.stack[top];
                if frame.next < frame.candidates.len() {
                    let candidate = frame.candidates[frame.next];
                    frame.next += 1;
                    Some(candidate)
                } else {
                    None
                }
            };
            let Some(candidate) = candidate else {
                // Frame exhausted: backtrack.
                self.stack.pop();
                continue;
            };

            let frame = &self.stack[top];
            if !self.accepts(frame, candidate) {
                continue;
            }

            // Extend the partial state with this placement.
            let mut map = frame.map.clone();
            map.insert(frame.pattern_id, candidate);
            let mut pending = frame.pending.clone();
            for neighbour in self.pattern.neighbours(frame.pattern_id) {
                if !pending.contains(neighbour) && !map.contains_key(neighbour) {
                    pending.push(*neighbour);
                }
            }

            if pending.is_empty() {
                if self.is_complete(&map) {
                    trace!(size = map.len(), "embedding found");
                    return Some(Embedding::new(map));
                }
                // Frontier drained without covering the pattern: the pattern
                // has nodes unreachable from the seed and this branch can
                // never complete. Keep trying the remaining candidates.
                continue;
            }
            self.push_frame(map, pending);
        }
    }
}
