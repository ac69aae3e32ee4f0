//! GLPK-backed RI generator.
//!
//! Formulates RI generation as a mixed integer program (see [`model`]),
//! binds it to the cluster's parameters (see [`data`]), runs a
//! [`ConstraintSolver`] on it and reads the matrix back (see [`solution`]).
//!
//! # Guarantees
//!
//! A returned RI has exactly `num_slaves` replicas per row and per column and
//! no replica inside the source node's tag, so it is always ranked
//! `StrictlyTagAware`. Infeasible parameters (for example more slaves than
//! there are nodes outside a tag) yield
//! [`NoSolution`](crate::error::GenerateError::NoSolution).
//!
//! # Limitations
//!
//! - Needs `glpsol` installed (unless another solver is plugged in)
//! - The solver stops within 50% of the best bound or after 10 seconds,
//!   so the tag balance is good but not certified optimal

pub mod config;
pub mod data;
pub mod model;
pub mod solution;
pub mod solver;

pub use config::GlpkConfig;
pub use solver::{ConstraintSolver, Glpsol};

use crate::diag::DiagnosticsSink;
use crate::error::Result;
use crate::strategy::RiGenerator;
use corelib::{SearchParams, VbmapParams, RI};
use std::sync::Arc;

/// RI generator that lets a MIP solver find the matrix.
///
/// # Example
///
/// ```rust,no_run
/// use corelib::{SearchParams, Tags, VbmapParams};
/// use replication::diag::TracingSink;
/// use replication::{GlpkConfig, GlpkRiGenerator, RiGenerator};
/// use std::sync::Arc;
///
/// let generator = GlpkRiGenerator::new(GlpkConfig::default(), Arc::new(TracingSink));
/// let params = VbmapParams::new(4, 1, "0:0,1:0,2:1,3:1".parse::<Tags>().unwrap());
/// let ri = generator.generate(&params, &SearchParams::default()).unwrap();
/// assert_eq!(ri.row_sum(0), 1);
/// ```
pub struct GlpkRiGenerator {
    solver: Box<dyn ConstraintSolver>,
    sink: Arc<dyn DiagnosticsSink>,
}

impl GlpkRiGenerator {
    /// Generator running `glpsol` as configured.
    pub fn new(config: GlpkConfig, sink: Arc<dyn DiagnosticsSink>) -> Self {
        Self::with_solver(Box::new(Glpsol::new(config)), sink)
    }

    /// Generator backed by any constraint solver.
    pub fn with_solver(solver: Box<dyn ConstraintSolver>, sink: Arc<dyn DiagnosticsSink>) -> Self {
        Self { solver, sink }
    }
}

impl RiGenerator for GlpkRiGenerator {
    /// Search params don't apply to an exact model and are ignored.
    fn generate(&self, params: &VbmapParams, _search: &SearchParams) -> Result<RI> {
        self.solver.solve(params, self.sink.as_ref())
    }

    fn name(&self) -> &'static str {
        "glpk"
    }
}
