//! Core library for replica placement.
//!
//! This crate provides the types every RI generator shares:
//! - Node and tag identifiers
//! - Placement parameters (node count, replicas per node, tag assignment)
//! - The replica indicator (RI) matrix and its invariant checks

pub mod error;
pub mod node;
pub mod params;
pub mod ri;

pub use error::{Error, Result, RiViolation};
pub use node::{Node, Tag};
pub use params::{SearchParams, Tags, VbmapParams};
pub use ri::{TagAwarenessRank, RI};
