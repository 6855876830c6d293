//! Error types for partition sessions and encoding helpers.

use thiserror::Error;

/// Errors reported by this crate.
///
/// Logically empty requests (more blocks than elements, an inverted range, ...)
/// are not errors: they produce empty sequences.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A set size below zero was supplied at a signed boundary.
    #[error("set size must be non-negative, got {0}")]
    NegativeSize(i64),

    /// A query string could not be parsed.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// A label needed by the session does not fit into the label type.
    #[error("label {label} does not fit into the label type")]
    LabelOverflow {
        /// The label that could not be represented
        label: usize,
    },

    /// The backing storage cannot hold the arrays of the session.
    #[error("storage holds at most {capacity} entries, {len} required")]
    Capacity {
        /// Number of entries required
        len: usize,
        /// Number of entries available
        capacity: usize,
    },

    /// The sequence is not a restricted growth sequence.
    #[error("not a restricted growth sequence at position {position}")]
    NotRestrictedGrowth {
        /// First offending position (0-based)
        position: usize,
    },

    /// A list of blocks is not a partition of {1..n}.
    #[error("invalid blocks: {0}")]
    InvalidBlocks(String),
}

/// A specialized Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
