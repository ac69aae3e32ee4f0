//! Command-line configuration and logging setup.

use crate::commands::Command;
use clap::{ArgAction, Parser};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "vbmap")]
#[command(author, version, about = "Replica placement matrix generator", long_about = None)]
#[command(propagate_version = true)]
pub struct CliConfig {
    /// More logging (-v shows solver output, -vv everything)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

impl CliConfig {
    pub fn run(self) -> anyhow::Result<()> {
        init_tracing(self.verbose);

        let result = self.command.execute()?;
        print!("{}", result.render()?);
        Ok(())
    }

    fn default_filter(verbose: u8) -> &'static str {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

/// `RUST_LOG` wins over `-v` when set.
fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(CliConfig::default_filter(verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
