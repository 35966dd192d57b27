//! Error types for the enumeration core and the generator layer.

use thiserror::Error;

/// Precondition failures of the enumeration core.
///
/// Every variant is raised before any bit-index arithmetic runs, so a failed
/// call has done no enumeration work.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnumerationError {
    /// Zero nodes, or more nodes than the 64-bit upper-triangle encoding holds.
    #[error("invalid node count {count}: expected between 1 and {max} nodes")]
    InvalidNodeCount { count: usize, max: usize },

    /// Colors must start at 0 and grow by at most one per position.
    #[error("invalid coloring at position {position}: color {color} cannot follow {previous:?}")]
    InvalidColoring {
        position: usize,
        color: u32,
        previous: Option<u32>,
    },

    /// `min > max`, or either bound is negative.
    #[error("invalid degree bounds: min_degree={min}, max_degree={max}")]
    InvalidDegreeBounds { min: i64, max: i64 },
}

/// Failures of the graph generator, its caches and its configuration.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error(transparent)]
    Enumeration(#[from] EnumerationError),

    #[error("the node alphabet must not be empty")]
    EmptyAlphabet,

    #[error("invalid node range: min_nodes={min}, max_nodes={max}")]
    InvalidNodeRange { min: usize, max: usize },

    #[error("invalid sample size for cached configurations")]
    InvalidSampleSize,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = EnumerationError> = std::result::Result<T, E>;
