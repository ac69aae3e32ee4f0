//! Replica placement strategies.
//!
//! This crate provides pluggable RI generators that determine:
//! - Which nodes hold replicas of each node's data
//! - How strictly replicas stay out of the source node's failure domain
//!
//! The solver-backed generator drives an external MIP solver; its free-form
//! output goes to an injected [`diag::DiagnosticsSink`].

pub mod diag;
pub mod error;
pub mod strategy;

pub use diag::{CapturingSink, DiagnosticsSink, TracingSink};
pub use error::{Artifact, FormatError, GenerateError, ProcessError, RenderError};
pub use strategy::glpk::{ConstraintSolver, Glpsol};
pub use strategy::{GeneratorKind, GlpkConfig, GlpkRiGenerator, RiGenerator};
