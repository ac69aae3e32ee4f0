//! Errors returned by RI generators.
//!
//! Every stage of a solver-backed run fails with its own variant so callers
//! can tell infeasibility (`NoSolution`) apart from environment, process and
//! output-format faults.

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for generator operations.
pub type Result<T> = std::result::Result<T, GenerateError>;

/// Transient files a solver run needs.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Artifact {
    Data,
    Output,
    Model,
    /// Captured solver terminal output.
    Terminal,
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Artifact::Data => "data",
            Artifact::Output => "output",
            Artifact::Model => "model",
            Artifact::Terminal => "terminal",
        })
    }
}

#[derive(Debug, Error)]
pub enum GenerateError {
    /// A transient artifact could not be created.
    #[error("Couldn't create {artifact} file: {source}")]
    Resource {
        artifact: Artifact,
        #[source]
        source: io::Error,
    },

    /// A transient artifact was created but couldn't be written.
    #[error("Couldn't populate {artifact} file {}: {source}", .path.display())]
    Populate {
        artifact: Artifact,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Couldn't generate data file {}: {source}", .path.display())]
    Render {
        path: PathBuf,
        #[source]
        source: RenderError,
    },

    #[error("Solver process failed: {0}")]
    Process(#[from] ProcessError),

    #[error("Couldn't open solver output {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The constraint problem has no solution for the given parameters.
    #[error("No solution found")]
    NoSolution,

    #[error("Invalid solver output ({0})")]
    Format(#[from] FormatError),

    /// Generator-specific params were rejected.
    #[error("Invalid generator params: {0}")]
    Params(String),
}

impl GenerateError {
    /// True for the expected "infeasible parameters" outcome.
    pub fn is_no_solution(&self) -> bool {
        matches!(self, GenerateError::NoSolution)
    }
}

/// The data section could not be written.
#[derive(Debug, Error)]
#[error("rendering failed: {0}")]
pub struct RenderError(#[from] pub io::Error);

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("couldn't launch solver: {0}")]
    Spawn(#[source] io::Error),

    #[error("couldn't wait for solver: {0}")]
    Wait(#[source] io::Error),

    #[error("solver exited with {0}")]
    Exit(ExitStatus),

    #[error("solver killed after {0:?}")]
    TimedOut(Duration),
}

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("expected {expected} values, got {index}")]
    Truncated { index: usize, expected: usize },

    #[error("a {nodes}x{nodes} grid doesn't fit in memory")]
    GridTooLarge { nodes: usize },

    #[error("value #{index} is not an integer: '{token}'")]
    InvalidToken { index: usize, token: String },

    #[error("{0}")]
    Io(#[from] io::Error),
}
