mod check;
mod plan;

pub use check::cmd_check;
pub use plan::{PlanArgs, cmd_plan};

use std::path::Path;

use anyhow::{Context, Result};

use jarsmith_lib::config::BuildConfig;
use jarsmith_lib::eval::{build_file_root, load_build_file};
use jarsmith_lib::workspace::{BuildPlan, Workspace};

/// Load `file` and generate its plan under `config`.
fn generate(file: &Path, config: &BuildConfig) -> Result<BuildPlan> {
  let build_file =
    load_build_file(file).with_context(|| format!("Failed to load build file: {}", file.display()))?;
  let mut workspace = Workspace::from_build_file(build_file, &build_file_root(file))
    .with_context(|| format!("Invalid build file: {}", file.display()))?;
  workspace.generate(config).context("Failed to generate build plan")
}
