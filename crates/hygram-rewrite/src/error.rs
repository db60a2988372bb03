//! Error types for production construction and application.
//!
//! Everything here propagates straight to the caller: the rewrite core never
//! retries, and a failed `apply` never exposes a partially rewritten graph
//! (mutation happens on a private copy of the node map).

use thiserror::Error;

use hygram_core::{NodeId, Point};

/// Errors produced while constructing or applying a [`Production`](crate::production::Production).
#[derive(Debug, Error)]
pub enum RewriteError {
    /// No structural embedding of the left pattern exists in the host graph.
    #[error("no structural match of the left pattern in the host graph")]
    NoMatch,

    /// The production's seed id is not a node of its left pattern.
    #[error("seed node {id} is not present in the left pattern")]
    SeedNotInPattern { id: NodeId },

    /// The left pattern lacks one of the three anchor nodes (ids 0..=2)
    /// required for the geometric transform.
    #[error("anchor node {id} is missing from the left pattern")]
    MissingAnchor { id: NodeId },

    /// The three anchor positions are collinear or coincident, so no unique
    /// affine map exists. An authoring bug in the production, never retried.
    #[error("anchor positions are collinear or coincident; the affine system is singular")]
    SingularAnchors,

    /// The solved affine map fails to reproduce an anchor correspondence
    /// within tolerance. An authoring bug in the production, never retried.
    #[error("anchor {anchor} maps to {actual:?}, expected {expected:?}")]
    AnchorMismatch {
        anchor: NodeId,
        expected: Point,
        actual: Point,
    },

    /// The embedding passed to `apply` does not cover every left-pattern id
    /// with a node present in the host graph. Violates the precondition that
    /// the id map is a complete embedding of the left pattern.
    #[error("embedding does not cover left-pattern node {missing}")]
    IncompleteEmbedding { missing: NodeId },

    /// A right-pattern neighbour list references an id that neither the
    /// embedding nor the fresh-id allocation can resolve.
    #[error("right-pattern neighbour {id} has no mapping into the host graph")]
    UnmappedPatternId { id: NodeId },
}
