pub mod affine;
pub mod behavior;
pub mod error;
pub mod production;
pub mod strategy;

// Re-export commonly used types
pub use affine::{AffineMap, ANCHOR_TOLERANCE};
pub use behavior::{AttribMap, DefaultBehavior, MatchContext, RuleBehavior};
pub use error::RewriteError;
pub use production::Production;
