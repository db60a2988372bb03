//! The three ways to drive a production against a host graph.
//!
//! `apply_once` rewrites the first structural match, `apply_many` iterates
//! to a (bounded) fixpoint, and `apply_all_possible` explores every match of
//! the original graph as an independent alternative. Anything fancier --
//! scheduling rules, interleaving several productions -- is client
//! territory.

use tracing::debug;

use hygram_core::Graph;
use hygram_match::find_isomorphic;

use crate::error::RewriteError;
use crate::production::Production;

impl Production {
    /// Rewrites the first structural match found in `graph`.
    ///
    /// Match selection is purely structural -- the behavior's predicate is
    /// not consulted when picking the match, so a rejected predicate makes
    /// this a no-op rather than moving on to the next match. Fails with
    /// [`RewriteError::NoMatch`] when no structural embedding exists.
    pub fn apply_once(&self, graph: &Graph) -> Result<Graph, RewriteError> {
        let embedding = find_isomorphic(graph, self.left(), self.seed())
            .next()
            .ok_or(RewriteError::NoMatch)?;
        self.apply(graph, &embedding)
    }

    /// Rewrites applicable matches until none remain or `limit` rewrites
    /// have been performed (unbounded when `None`).
    ///
    /// Each round searches the graph produced by the previous rewrite and
    /// takes the first match that is both structural and accepted by the
    /// predicate, so later matches reflect earlier rewrites. Returns the
    /// final graph and the number of rewrites performed. An always
    /// applicable, ever-matching production does not terminate without a
    /// limit; bounding is the caller's job.
    pub fn apply_many(
        &self,
        graph: &Graph,
        limit: Option<usize>,
    ) -> Result<(Graph, usize), RewriteError> {
        let mut current = graph.clone();
        let mut applied = 0;
        while limit.map_or(true, |max| applied < max) {
            let mut next = None;
            for embedding in find_isomorphic(&current, self.left(), self.seed()) {
                let context = self.match_context(&current, &embedding)?;
                if self.behavior_applicable(&context) {
                    next = Some(embedding);
                    break;
                }
            }
            let Some(embedding) = next else {
                break;
            };
            current = self.apply(&current, &embedding)?;
            applied += 1;
        }
        debug!(applied, "fixpoint application finished");
        Ok((current, applied))
    }

    /// Lazily yields one rewritten graph per structural match of the
    /// **original** graph.
    ///
    /// Every element is an independent alternative derived from the same
    /// input -- a branching exploration, not an accumulated chain. Matches
    /// whose predicate is rejected come through as unchanged copies of the
    /// input, mirroring [`Production::apply`].
    pub fn apply_all_possible<'a>(
        &'a self,
        graph: &'a Graph,
    ) -> impl Iterator<Item = Result<Graph, RewriteError>> + 'a {
        find_isomorphic(graph, self.left(), self.seed())
            .map(move |embedding| self.apply(graph, &embedding))
    }
}
