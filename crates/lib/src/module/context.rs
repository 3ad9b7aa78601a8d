use std::path::{Path, PathBuf};

use crate::action::{ActionCtx, BuildAction, InstallStep, StageError};
use crate::config::BuildConfig;
use crate::module::{JavaDependency, Module, ModuleId, SourceFileGenerator};
use crate::sdk::Target;

/// Everything a module variant sees while generating its actions.
///
/// Holds the variant's resolved direct dependencies (already generated, in
/// declaration order) and records the actions, install steps and checkbuild
/// files the variant emits.
pub struct ModuleContext<'a> {
  id: &'a ModuleId,
  src_dir: &'a Path,
  config: &'a BuildConfig,
  deps: Vec<(&'a str, &'a dyn Module)>,
  actions: ActionCtx,
  installs: Vec<InstallStep>,
  checkbuild: Vec<PathBuf>,
}

/// What a module variant emitted.
#[derive(Debug, Default)]
pub struct ModuleOutputs {
  pub actions: Vec<BuildAction>,
  pub installs: Vec<InstallStep>,
  pub checkbuild: Vec<PathBuf>,
}

impl<'a> ModuleContext<'a> {
  pub fn new(
    id: &'a ModuleId,
    src_dir: &'a Path,
    config: &'a BuildConfig,
    deps: Vec<(&'a str, &'a dyn Module)>,
  ) -> Self {
    Self {
      id,
      src_dir,
      config,
      deps,
      actions: ActionCtx::new(),
      installs: Vec::new(),
      checkbuild: Vec::new(),
    }
  }

  pub fn id(&self) -> &'a ModuleId {
    self.id
  }

  pub fn module_name(&self) -> &'a str {
    &self.id.name
  }

  pub fn target(&self) -> Target {
    self.id.target
  }

  pub fn config(&self) -> &'a BuildConfig {
    self.config
  }

  /// The module's source directory.
  pub fn src_dir(&self) -> &'a Path {
    self.src_dir
  }

  pub fn path_for_src(&self, rel: impl AsRef<Path>) -> PathBuf {
    self.src_dir.join(rel)
  }

  /// The variant's intermediate directory.
  pub fn out_dir(&self) -> PathBuf {
    self.config.module_out_dir(&self.id.name, self.id.target)
  }

  pub fn path_for_out(&self, rel: impl AsRef<Path>) -> PathBuf {
    self.out_dir().join(rel)
  }

  /// Direct dependencies that expose Java outputs, in declaration order.
  pub fn java_deps(&self) -> Vec<(&'a str, &'a dyn JavaDependency)> {
    self
      .deps
      .iter()
      .filter_map(|&(name, module)| module.as_java_dependency().map(|dep| (name, dep)))
      .collect()
  }

  /// Direct dependencies that generate source files, in declaration order.
  pub fn source_generators(&self) -> Vec<(&'a str, &'a dyn SourceFileGenerator)> {
    self
      .deps
      .iter()
      .filter_map(|&(name, module)| module.as_source_generator().map(|generator| (name, generator)))
      .collect()
  }

  pub fn record(&mut self, action: BuildAction) -> Result<usize, StageError> {
    self.actions.record(action)
  }

  pub fn actions(&self) -> &[BuildAction] {
    self.actions.actions()
  }

  /// Install `src` as `<install>/<target>/<subdir>/<name>`, returning the
  /// installed path. `after` orders this install behind another installed file.
  pub fn install_file(&mut self, subdir: &str, name: &str, src: &Path, after: Option<&Path>) -> PathBuf {
    let dest = self.config.target_install_dir(self.id.target, subdir).join(name);
    self.installs.push(InstallStep {
      src: src.to_path_buf(),
      dest: dest.clone(),
      after: after.map(Path::to_path_buf),
    });
    dest
  }

  /// Mark a file as built by a plain `checkbuild`.
  pub fn checkbuild_file(&mut self, path: PathBuf) {
    self.checkbuild.push(path);
  }

  pub fn into_outputs(self) -> ModuleOutputs {
    ModuleOutputs {
      actions: self.actions.into_actions(),
      installs: self.installs,
      checkbuild: self.checkbuild,
    }
  }
}
