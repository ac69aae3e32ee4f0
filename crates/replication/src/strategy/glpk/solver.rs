//! Constraint solver port and its `glpsol` implementation.
//!
//! # Protocol
//!
//! 1. Create uniquely named data, output and model files in the temp dir
//! 2. Write the static model and the rendered data section
//! 3. Run `glpsol --model M --tmlim T --data D --display O --seed S --mipgap G`
//!    with stdout and stderr sharing one capture file
//! 4. Hand the captured terminal text to the diagnostics sink
//! 5. On a clean exit, parse the display file
//!
//! All files are removed when `solve` returns, whichever way it returns.

use super::config::GlpkConfig;
use super::{data, model, solution};
use crate::diag::DiagnosticsSink;
use crate::error::{Artifact, GenerateError, ProcessError, Result};
use corelib::{VbmapParams, RI};
use rand::Rng;
use std::fs::File;
use std::io::{BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

const BANNER_START: &str = "=======================GLPK output=======================";
const BANNER_END: &str = "=========================================================";

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Something that can turn placement parameters into an RI by solving a
/// constraint model.
///
/// The generator facade only talks to this trait, so an embedded solver can
/// replace the external process without touching it.
pub trait ConstraintSolver: Send + Sync {
    fn solve(&self, params: &VbmapParams, diag: &dyn DiagnosticsSink) -> Result<RI>;
}

/// Runs the GLPK command-line solver.
#[derive(Clone, Debug, Default)]
pub struct Glpsol {
    config: GlpkConfig,
}

impl Glpsol {
    pub fn new(config: GlpkConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GlpkConfig {
        &self.config
    }

    fn command(&self, model: &NamedTempFile, data: &NamedTempFile, output: &NamedTempFile, seed: i32) -> Command {
        let mut cmd = Command::new(&self.config.program);
        cmd.args(&self.config.prefix_args)
            .arg("--model")
            .arg(model.path())
            .arg("--tmlim")
            .arg(self.config.time_limit_secs.to_string())
            .arg("--data")
            .arg(data.path())
            .arg("--display")
            .arg(output.path())
            .arg("--seed")
            .arg(seed.to_string())
            .arg("--mipgap")
            .arg(self.config.mip_gap.to_string());
        cmd
    }

    fn wait(&self, mut child: Child) -> std::result::Result<ExitStatus, ProcessError> {
        let Some(timeout) = self.config.process_timeout() else {
            return child.wait().map_err(ProcessError::Wait);
        };

        let deadline = Instant::now() + timeout;
        loop {
            match child.try_wait().map_err(ProcessError::Wait)? {
                Some(status) => return Ok(status),
                None if Instant::now() >= deadline => {
                    warn!(pid = child.id(), ?timeout, "killing solver");
                    // The child may exit on its own between try_wait and kill.
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(ProcessError::TimedOut(timeout));
                }
                None => thread::sleep(POLL_INTERVAL),
            }
        }
    }
}

impl ConstraintSolver for Glpsol {
    fn solve(&self, params: &VbmapParams, diag: &dyn DiagnosticsSink) -> Result<RI> {
        let temp_dir = self.config.temp_dir.as_deref();
        let mut data_file = temp_artifact(temp_dir, "vbmap_glpk_data", Artifact::Data)?;
        let output_file = temp_artifact(temp_dir, "vbmap_glpk_output", Artifact::Output)?;
        let mut model_file = temp_artifact(temp_dir, "vbmap_glpk_model", Artifact::Model)?;

        let model_path = model_file.path().to_path_buf();
        populate_model(model_file.as_file_mut(), &model_path)?;

        let rendered = {
            let mut out = BufWriter::new(data_file.as_file_mut());
            data::render(params, &mut out)
        };
        rendered.map_err(|source| GenerateError::Render {
            path: data_file.path().to_path_buf(),
            source,
        })?;

        debug!(
            model = %model_file.path().display(),
            data = %data_file.path().display(),
            output = %output_file.path().display(),
            "solver artifacts ready"
        );

        let terminal = match temp_dir {
            Some(dir) => tempfile::tempfile_in(dir),
            None => tempfile::tempfile(),
        };
        let mut terminal = terminal.map_err(|source| GenerateError::Resource {
            artifact: Artifact::Terminal,
            source,
        })?;

        let seed = rand::thread_rng().gen_range(0..=i32::MAX);
        let mut cmd = self.command(&model_file, &data_file, &output_file, seed);

        info!(
            program = %self.config.program.display(),
            nodes = params.num_nodes,
            slaves = params.num_slaves,
            seed,
            "running solver"
        );

        let status = spawn_captured(&mut cmd, &terminal).and_then(|child| self.wait(child));

        diag.log(BANNER_START);
        diag.log(&read_terminal(&mut terminal));
        diag.log(BANNER_END);

        let status = status.map_err(|err| {
            warn!(error = %err, "solver failed");
            err
        })?;

        if !status.success() {
            warn!(%status, "solver exited abnormally");
            return Err(ProcessError::Exit(status).into());
        }

        solution::parse(params, output_file.path())
    }
}

/// Create a uniquely named artifact in `dir`, or in the system temp dir.
fn temp_artifact(dir: Option<&Path>, prefix: &str, artifact: Artifact) -> Result<NamedTempFile> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(prefix);

    let file = match dir {
        Some(dir) => builder.tempfile_in(dir),
        None => builder.tempfile(),
    };
    file.map_err(|source| GenerateError::Resource { artifact, source })
}

fn populate_model<W: Write>(out: &mut W, path: &Path) -> Result<()> {
    out.write_all(model::MODEL.as_bytes())
        .and_then(|_| out.flush())
        .map_err(|source| GenerateError::Populate {
            artifact: Artifact::Model,
            path: path.to_path_buf(),
            source,
        })
}

fn spawn_captured(cmd: &mut Command, terminal: &File) -> std::result::Result<Child, ProcessError> {
    let stdout = terminal.try_clone().map_err(ProcessError::Spawn)?;
    let stderr = terminal.try_clone().map_err(ProcessError::Spawn)?;

    cmd.stdin(Stdio::null())
        .stdout(Stdio::from(stdout))
        .stderr(Stdio::from(stderr))
        .spawn()
        .map_err(ProcessError::Spawn)
}

fn read_terminal(terminal: &mut File) -> String {
    let mut buf = Vec::new();
    let read = terminal
        .seek(SeekFrom::Start(0))
        .and_then(|_| terminal.read_to_end(&mut buf));

    match read {
        Ok(_) => String::from_utf8_lossy(&buf).into_owned(),
        Err(err) => format!("<couldn't read solver output: {}>", err),
    }
}
