//! RI generator abstractions.
//!
//! An RI generator turns placement parameters into a replica indicator
//! matrix. Different generators trade off different goals:
//!
//! - **GlpkRiGenerator**: exact model handed to an external MIP solver;
//!   strictly tag aware, bounded by the solver's time limit
//!
//! Generators are selected by name (see [`GeneratorKind`]) so the choice can
//! come from configuration.

pub mod glpk;

pub use glpk::{GlpkConfig, GlpkRiGenerator};

use crate::diag::DiagnosticsSink;
use crate::error::{GenerateError, Result};
use corelib::{SearchParams, VbmapParams, RI};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Trait for RI generators.
///
/// A generator determines:
/// 1. Which nodes receive replicas of each node's data
/// 2. How strictly tags are respected (reported through the RI's rank)
///
/// # Thread Safety
///
/// Implementations must be thread-safe (Send + Sync); a single generator may
/// serve concurrent `generate` calls.
pub trait RiGenerator: Send + Sync {
    /// Generate an RI for `params`.
    ///
    /// # Returns
    /// A matrix satisfying every invariant checked by [`RI::verify`], or the
    /// error of the stage that failed. Partial results are never returned.
    fn generate(&self, params: &VbmapParams, search: &SearchParams) -> Result<RI>;

    /// Get the generator name (for selection and logging).
    fn name(&self) -> &'static str;

    /// Apply generator-specific params.
    ///
    /// The default rejects anything but an empty map.
    fn set_params(&mut self, params: &HashMap<String, String>) -> Result<()> {
        if params.is_empty() {
            Ok(())
        } else {
            Err(GenerateError::Params(format!(
                "{} generator doesn't support params",
                self.name()
            )))
        }
    }
}

/// Available generator strategies.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GeneratorKind {
    Glpk,
}

impl GeneratorKind {
    pub const ALL: &'static [GeneratorKind] = &[GeneratorKind::Glpk];

    pub fn name(&self) -> &'static str {
        match self {
            GeneratorKind::Glpk => "glpk",
        }
    }

    /// Instantiate the generator, wiring in its config and diagnostics sink.
    pub fn build(&self, glpk: GlpkConfig, sink: Arc<dyn DiagnosticsSink>) -> Box<dyn RiGenerator> {
        match self {
            GeneratorKind::Glpk => Box::new(GlpkRiGenerator::new(glpk, sink)),
        }
    }
}

impl fmt::Display for GeneratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GeneratorKind {
    type Err = GenerateError;

    fn from_str(s: &str) -> Result<Self> {
        GeneratorKind::ALL
            .iter()
            .find(|kind| kind.name() == s)
            .copied()
            .ok_or_else(|| GenerateError::Params(format!("unknown generator '{}'", s)))
    }
}
