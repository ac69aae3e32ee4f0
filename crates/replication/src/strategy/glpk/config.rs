//! Solver invocation settings.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// How to run `glpsol`.
///
/// Every field has a default, so a config file only needs the keys it
/// overrides:
///
/// ```json
/// { "program": "/opt/glpk/bin/glpsol", "process_timeout_secs": 30 }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlpkConfig {
    /// Solver executable, looked up on `PATH` when relative.
    pub program: PathBuf,
    /// Arguments placed before the solver flags (e.g. when `program` is a
    /// wrapper such as `nice` or an interpreter running a script).
    pub prefix_args: Vec<String>,
    /// Passed as `--tmlim`.
    pub time_limit_secs: u64,
    /// Passed as `--mipgap`.
    pub mip_gap: f64,
    /// Kill the solver if it is still running after this many seconds.
    /// Unset means waiting for as long as the solver runs.
    pub process_timeout_secs: Option<u64>,
    /// Directory for the model, data and output files. Unset means the
    /// system temp dir.
    pub temp_dir: Option<PathBuf>,
}

impl GlpkConfig {
    pub fn process_timeout(&self) -> Option<Duration> {
        self.process_timeout_secs.map(Duration::from_secs)
    }
}

impl Default for GlpkConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from("glpsol"),
            prefix_args: Vec::new(),
            time_limit_secs: 10,
            mip_gap: 0.5,
            process_timeout_secs: None,
            temp_dir: None,
        }
    }
}
