pub mod embedding;
pub mod search;

// Re-export commonly used types
pub use embedding::Embedding;
pub use search::{find_isomorphic, Isomorphisms};
