//! Errors and results of workspace generation.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::action::{BuildAction, InstallStep};
use crate::jar::JarSpec;
use crate::module::{ClassifyError, JavaDependency, ModuleId};
use crate::sdk::Target;
use crate::util::hash::Hashable;

/// Errors that abort a whole generation.
#[derive(Debug, Error)]
pub enum WorkspaceError {
  #[error("module {0} is declared more than once")]
  DuplicateModule(ModuleId),

  #[error("dependency cycle detected involving {0}")]
  CycleDetected(ModuleId),

  #[error(transparent)]
  Classification(#[from] ClassifyError),
}

/// What a generated module exposes to its dependents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Exports {
  pub classpath_file: PathBuf,
  pub class_jar_specs: Vec<JarSpec>,
  pub resource_jar_specs: Vec<JarSpec>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub aidl_include_dirs: Vec<PathBuf>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub aidl_preprocessed: Option<PathBuf>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub extra_src_lists: Vec<PathBuf>,
}

impl Exports {
  pub fn of(dep: &dyn JavaDependency) -> Self {
    Self {
      classpath_file: dep.classpath_file().to_path_buf(),
      class_jar_specs: dep.class_jar_specs().to_vec(),
      resource_jar_specs: dep.resource_jar_specs().to_vec(),
      aidl_include_dirs: dep.aidl_include_dirs().to_vec(),
      aidl_preprocessed: dep.aidl_preprocessed().map(PathBuf::from),
      extra_src_lists: dep.extra_src_lists().to_vec(),
    }
  }
}

/// Everything one module variant emitted.
#[derive(Debug, Clone, Serialize)]
pub struct ModulePlan {
  pub id: ModuleId,
  pub actions: Vec<BuildAction>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub installs: Vec<InstallStep>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub checkbuild: Vec<PathBuf>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub exports: Option<Exports>,
}

/// A module whose generation reported an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleFailure {
  pub module: ModuleId,
  pub error: String,
}

/// A module not generated because a dependency failed or was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedModule {
  pub module: ModuleId,
  pub dependency: ModuleId,
}

/// The result of generating a workspace.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BuildPlan {
  /// Generated modules, dependencies first.
  pub modules: Vec<ModulePlan>,
  /// Actions spanning every module.
  pub global_actions: Vec<BuildAction>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub failed: Vec<ModuleFailure>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub skipped: Vec<SkippedModule>,
}

impl Hashable for BuildPlan {}

impl BuildPlan {
  /// Returns true if every module generated.
  pub fn is_success(&self) -> bool {
    self.failed.is_empty() && self.skipped.is_empty()
  }

  pub fn module(&self, name: &str, target: Target) -> Option<&ModulePlan> {
    self.modules.iter().find(|m| m.id.name == name && m.id.target == target)
  }

  pub fn action_count(&self) -> usize {
    self.modules.iter().map(|m| m.actions.len()).sum::<usize>() + self.global_actions.len()
  }

  pub fn install_count(&self) -> usize {
    self.modules.iter().map(|m| m.installs.len()).sum()
  }
}
