//! Per-run build configuration.
//!
//! A [`BuildConfig`] is passed explicitly into every module's action
//! generation. Nothing here is global; two generations with different configs
//! never observe each other.

use std::path::{Path, PathBuf};

use crate::sdk::Target;

/// Disables dex optimization when set to a non-empty value.
pub const NO_OPTIMIZE_DX_ENV: &str = "NO_OPTIMIZE_DX";

/// Enables verbose dex output and a class dump when set to a non-empty value.
pub const GENERATE_DEX_DEBUG_ENV: &str = "GENERATE_DEX_DEBUG";

/// Diagnostic switches for the dex translation step.
///
/// These only add arguments to the translation action. They never decide
/// whether translation runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TranslateOptions {
  pub no_optimize: bool,
  pub debug_dump: bool,
}

impl TranslateOptions {
  /// Read the switches from the process environment.
  pub fn from_env() -> Self {
    Self {
      no_optimize: env_flag(NO_OPTIMIZE_DX_ENV),
      debug_dump: env_flag(GENERATE_DEX_DEBUG_ENV),
    }
  }
}

fn env_flag(name: &str) -> bool {
  std::env::var_os(name).is_some_and(|v| !v.is_empty())
}

#[derive(Debug, Clone)]
pub struct BuildConfig {
  /// Root for intermediate outputs; each variant writes under
  /// `<out_dir>/<target>/<module>`.
  pub out_dir: PathBuf,

  /// Root of the install tree; each target installs under
  /// `<install_dir>/<target>`.
  pub install_dir: PathBuf,

  /// Targets to generate variants for.
  pub targets: Vec<Target>,

  pub translate: TranslateOptions,
}

impl BuildConfig {
  pub fn new(out_dir: impl Into<PathBuf>, install_dir: impl Into<PathBuf>) -> Self {
    Self {
      out_dir: out_dir.into(),
      install_dir: install_dir.into(),
      targets: vec![Target::Device, Target::Host],
      translate: TranslateOptions::default(),
    }
  }

  /// Like [`BuildConfig::new`], with translation switches from the environment.
  pub fn from_env(out_dir: impl Into<PathBuf>, install_dir: impl Into<PathBuf>) -> Self {
    Self::new(out_dir, install_dir).with_translate(TranslateOptions::from_env())
  }

  pub fn with_targets(mut self, targets: Vec<Target>) -> Self {
    self.targets = targets;
    self
  }

  pub fn with_translate(mut self, translate: TranslateOptions) -> Self {
    self.translate = translate;
    self
  }

  pub fn builds_target(&self, target: Target) -> bool {
    self.targets.contains(&target)
  }

  /// Intermediate directory of one module variant.
  pub fn module_out_dir(&self, name: &str, target: Target) -> PathBuf {
    self.out_dir.join(target.as_str()).join(name)
  }

  /// Install directory of one target, e.g. `<install>/device/framework`.
  pub fn target_install_dir(&self, target: Target, subdir: impl AsRef<Path>) -> PathBuf {
    self.install_dir.join(target.as_str()).join(subdir)
  }
}
