//! Node and tag identifiers.
//!
//! Nodes are addressed by their position in the cluster (0..num_nodes) and
//! carry a failure-domain `Tag` (rack, zone, server group). Both are compact
//! newtypes that are cheap to copy, compare and hash.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a node in the cluster.
///
/// Row `i` / column `j` of an RI matrix correspond to `Node(i)` / `Node(j)`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Node(pub usize);

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for Node {
    fn from(index: usize) -> Self {
        Node(index)
    }
}

/// Failure-domain identifier attached to a node.
///
/// Tag ids are non-negative integers, as wide as node indices so every
/// node can carry a tag of its own. Replicas must never be placed on
/// a node that shares a tag with the source node.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag(pub usize);

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for Tag {
    fn from(id: usize) -> Self {
        Tag(id)
    }
}
