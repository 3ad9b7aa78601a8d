mod cmd;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cmd::{PlanArgs, cmd_check, cmd_plan};

/// jarsmith - Java module build planner
#[derive(Parser)]
#[command(name = "jarsmith")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable debug logging
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Generate the build plan of a build file
  Plan(PlanArgs),

  /// Generate a build file and report failing modules
  Check {
    /// Path to the build file (.lua or .json)
    #[arg(default_value = "build.lua")]
    file: PathBuf,
  },
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let success = match cli.command {
    Commands::Plan(args) => cmd_plan(&args)?,
    Commands::Check { file } => cmd_check(&file)?,
  };

  if !success {
    std::process::exit(1);
  }
  Ok(())
}
