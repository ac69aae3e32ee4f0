//! Error types for the core library.

use crate::node::Node;
use thiserror::Error;

/// Result type alias for the core library.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building placement parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Malformed tag list
    #[error("Invalid tags: {0}")]
    InvalidTags(String),
    /// Same node listed twice in a tag list
    #[error("Duplicate tag assignment for node {0}")]
    DuplicateNode(Node),
}

/// A broken RI invariant, reported by [`crate::RI::verify`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RiViolation {
    #[error("matrix has {rows} rows, expected {expected}")]
    RowCount { rows: usize, expected: usize },
    #[error("row {row} has {len} columns, expected {expected}")]
    RowLength { row: usize, len: usize, expected: usize },
    #[error("row {row} has {count} replicas, expected {expected}")]
    RowSum { row: usize, count: usize, expected: usize },
    #[error("column {col} holds {count} replicas, expected {expected}")]
    ColumnSum { col: usize, count: usize, expected: usize },
    #[error("node {replica} replicates node {owner} within the same tag")]
    SameTag { owner: usize, replica: usize },
}
