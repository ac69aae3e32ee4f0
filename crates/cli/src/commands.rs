//! CLI commands.

use anyhow::{bail, Context};
use clap::{Args, Subcommand, ValueEnum};
use corelib::{SearchParams, Tags, VbmapParams, RI};
use replication::{GeneratorKind, GlpkConfig, TracingSink};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a replica indicator (RI) matrix
    Generate(GenerateArgs),
    /// List available RI generators
    Engines,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Number of nodes in the cluster
    #[arg(short, long, conflicts_with = "params")]
    pub nodes: Option<usize>,

    /// Replicas per node
    #[arg(short, long, default_value_t = 1, conflicts_with = "params")]
    pub slaves: usize,

    /// Node tags as `node:tag` pairs or a positional list; every node gets
    /// its own tag when omitted
    #[arg(short, long, conflicts_with = "params")]
    pub tags: Option<Tags>,

    /// Read nodes, slaves and tags from a JSON file instead
    #[arg(long)]
    pub params: Option<PathBuf>,

    /// RI generator to use
    #[arg(short, long, default_value = "glpk")]
    pub engine: GeneratorKind,

    /// Generator-specific `key=value` params
    #[arg(long = "engine-param", value_parser = parse_key_val)]
    pub engine_params: Vec<(String, String)>,

    /// Solver settings (JSON)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Path to the glpsol executable (overrides the config file)
    #[arg(long)]
    pub glpsol: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Check the balance and tag invariants of the result
    #[arg(long)]
    pub verify: bool,
}

impl GenerateArgs {
    pub fn vbmap_params(&self) -> anyhow::Result<VbmapParams> {
        if let Some(path) = &self.params {
            return load_json(path);
        }

        let Some(nodes) = self.nodes else {
            bail!("either --nodes or --params is required");
        };
        let tags = self.tags.clone().unwrap_or_else(|| Tags::trivial(nodes));
        Ok(VbmapParams::new(nodes, self.slaves, tags))
    }

    pub fn glpk_config(&self) -> anyhow::Result<GlpkConfig> {
        let mut config = match &self.config {
            Some(path) => load_json(path)?,
            None => GlpkConfig::default(),
        };
        if let Some(program) = &self.glpsol {
            config.program = program.clone();
        }
        Ok(config)
    }
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{}'", s))
}

fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("couldn't read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("couldn't parse {}", path.display()))
}

/// What a command produced, ready to print.
#[derive(Debug)]
pub enum CommandResult {
    Ri { ri: RI, format: OutputFormat },
    Engines(Vec<&'static str>),
}

impl CommandResult {
    pub fn render(&self) -> anyhow::Result<String> {
        match self {
            CommandResult::Ri {
                ri,
                format: OutputFormat::Json,
            } => Ok(serde_json::to_string_pretty(ri)? + "\n"),
            other => Ok(other.to_string()),
        }
    }
}

impl fmt::Display for CommandResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandResult::Ri { ri, .. } => {
                writeln!(f, "# {}", ri.tag_awareness_rank)?;
                write!(f, "{}", ri)
            }
            CommandResult::Engines(names) => {
                for name in names {
                    writeln!(f, "{}", name)?;
                }
                Ok(())
            }
        }
    }
}

impl Command {
    pub fn execute(&self) -> anyhow::Result<CommandResult> {
        match self {
            Command::Generate(args) => generate(args),
            Command::Engines => Ok(CommandResult::Engines(
                GeneratorKind::ALL.iter().map(GeneratorKind::name).collect(),
            )),
        }
    }
}

fn generate(args: &GenerateArgs) -> anyhow::Result<CommandResult> {
    let params = args.vbmap_params()?;
    let config = args.glpk_config()?;

    let mut generator = args.engine.build(config, Arc::new(TracingSink));
    let engine_params: HashMap<String, String> = args.engine_params.iter().cloned().collect();
    generator.set_params(&engine_params)?;

    info!(
        engine = generator.name(),
        nodes = params.num_nodes,
        slaves = params.num_slaves,
        tags = params.tags_count(),
        "generating RI"
    );

    let ri = generator
        .generate(&params, &SearchParams::default())
        .with_context(|| format!("{} generator failed", generator.name()))?;

    if args.verify {
        ri.verify(&params).context("generated RI is invalid")?;
        info!("RI verified");
    }

    Ok(CommandResult::Ri {
        ri,
        format: args.format,
    })
}
