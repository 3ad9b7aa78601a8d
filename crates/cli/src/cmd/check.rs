//! Implementation of the `jarsmith check` command.

use std::path::Path;

use anyhow::Result;

use jarsmith_lib::config::BuildConfig;

use super::generate;
use crate::output::{print_error, print_success, print_warning};

/// Returns whether every module generated.
pub fn cmd_check(file: &Path) -> Result<bool> {
  let config = BuildConfig::from_env("out", "install");
  let plan = generate(file, &config)?;

  for failure in &plan.failed {
    print_error(&format!("{}: {}", failure.module, failure.error));
  }
  for skipped in &plan.skipped {
    print_warning(&format!("{}: skipped, {} failed", skipped.module, skipped.dependency));
  }

  if plan.is_success() {
    print_success(&format!("{} module(s) OK", plan.modules.len()));
  }
  Ok(plan.is_success())
}
