//! Implementation of the `jarsmith plan` command.
//!
//! Loads a build file, generates every module variant and prints either a
//! summary or the whole plan as JSON.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use jarsmith_lib::action::BuildAction;
use jarsmith_lib::config::BuildConfig;
use jarsmith_lib::sdk::Target;
use jarsmith_lib::util::hash::Hashable;
use jarsmith_lib::workspace::BuildPlan;

use super::generate;
use crate::output::{OutputFormat, print_error, print_info, print_json, print_stat, print_warning};

#[derive(Args, Debug)]
pub struct PlanArgs {
  /// Path to the build file (.lua or .json)
  #[arg(default_value = "build.lua")]
  pub file: PathBuf,

  /// Root of intermediate outputs
  #[arg(long, default_value = "out")]
  pub out_dir: PathBuf,

  /// Root of the install tree
  #[arg(long, default_value = "install")]
  pub install_dir: PathBuf,

  /// Only generate variants for this target
  #[arg(long, value_parser = parse_target)]
  pub target: Option<Target>,

  /// Output format
  #[arg(short = 'o', long, value_enum, default_value = "text")]
  pub output: OutputFormat,
}

fn parse_target(value: &str) -> Result<Target, String> {
  match value {
    "device" => Ok(Target::Device),
    "host" => Ok(Target::Host),
    other => Err(format!("unknown target '{}': expected device or host", other)),
  }
}

/// Returns whether every module generated.
pub fn cmd_plan(args: &PlanArgs) -> Result<bool> {
  let mut config = BuildConfig::from_env(&args.out_dir, &args.install_dir);
  if let Some(target) = args.target {
    config = config.with_targets(vec![target]);
  }
  debug!(?config, "plan configuration");

  let plan = generate(&args.file, &config)?;

  if args.output.is_json() {
    print_json(&plan)?;
  } else {
    print_summary(&plan)?;
  }
  Ok(plan.is_success())
}

fn print_summary(plan: &BuildPlan) -> Result<()> {
  let hash = plan.compute_hash().context("Failed to compute plan hash")?;

  println!("Plan: {}", hash);
  for module in &plan.modules {
    let names: Vec<&str> = module.actions.iter().map(|a| a.name()).collect();
    println!("{}", module.id);
    print_stat("actions", &names.join(" -> "));
    for action in &module.actions {
      if let BuildAction::Javac { flags, .. } = action {
        let args = flags.to_args();
        if !args.is_empty() {
          print_stat("javac", &args.join(" "));
        }
      }
    }
    if let Some(exports) = &module.exports {
      print_stat("classpath", &exports.classpath_file.display().to_string());
    }
    for install in &module.installs {
      print_stat("install", &install.dest.display().to_string());
    }
  }

  for failure in &plan.failed {
    print_error(&format!("{}: {}", failure.module, failure.error));
  }
  for skipped in &plan.skipped {
    print_warning(&format!("{}: skipped, {} failed", skipped.module, skipped.dependency));
  }

  print_info(&format!(
    "{} module(s), {} action(s), {} install(s)",
    plan.modules.len(),
    plan.action_count(),
    plan.install_count()
  ));
  Ok(())
}
