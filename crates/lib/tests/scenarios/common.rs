use std::path::{Path, PathBuf};

use jarsmith_lib::action::{BuildAction, JavacFlags};
use jarsmith_lib::config::BuildConfig;
use jarsmith_lib::jar::JarSpec;
use jarsmith_lib::module::{ModuleDecl, ModuleKind};
use jarsmith_lib::workspace::{BuildPlan, ModulePlan, Workspace, WorkspaceError};

pub const SRC_ROOT: &str = "/src";

pub fn config() -> BuildConfig {
  BuildConfig::new("/out", "/install")
}

/// A device library that builds without the standard libraries.
pub fn lib(name: &str, srcs: &[&str]) -> ModuleDecl {
  let mut decl = ModuleDecl::new(ModuleKind::JavaLibrary, name);
  decl.dir = Some(name.to_string());
  decl.no_standard_libraries = true;
  decl.srcs = srcs.iter().map(|s| s.to_string()).collect();
  decl
}

pub fn prebuilt(kind: ModuleKind, name: &str, srcs: &[&str]) -> ModuleDecl {
  let mut decl = ModuleDecl::new(kind, name);
  decl.dir = Some("prebuilts".to_string());
  decl.srcs = srcs.iter().map(|s| s.to_string()).collect();
  decl
}

pub fn strings(values: &[&str]) -> Vec<String> {
  values.iter().map(|s| s.to_string()).collect()
}

pub fn generate_with(decls: Vec<ModuleDecl>, config: &BuildConfig) -> Result<BuildPlan, WorkspaceError> {
  let mut workspace = Workspace::from_decls(decls, Path::new(SRC_ROOT))?;
  workspace.generate(config)
}

pub fn generate(decls: Vec<ModuleDecl>) -> Result<BuildPlan, WorkspaceError> {
  generate_with(decls, &config())
}

/// Generate against module directories under `root` instead of the fixed
/// source root, for declarations that read the filesystem.
pub fn generate_in(decls: Vec<ModuleDecl>, root: &Path) -> Result<BuildPlan, WorkspaceError> {
  let mut workspace = Workspace::from_decls(decls, root)?;
  workspace.generate(&config())
}

pub fn touch(root: &Path, rel: &str) {
  let path = root.join(rel);
  std::fs::create_dir_all(path.parent().unwrap()).unwrap();
  std::fs::write(path, "").unwrap();
}

pub fn action_names(module: &ModulePlan) -> Vec<&'static str> {
  module.actions.iter().map(BuildAction::name).collect()
}

pub fn javac_flags(module: &ModulePlan) -> &JavacFlags {
  module
    .actions
    .iter()
    .find_map(|a| match a {
      BuildAction::Javac { flags, .. } => Some(flags),
      _ => None,
    })
    .unwrap_or_else(|| panic!("{} has no javac action", module.id))
}

pub fn merge_inputs(module: &ModulePlan) -> Vec<PathBuf> {
  module
    .actions
    .iter()
    .find_map(|a| match a {
      BuildAction::MergeJars { inputs, .. } => Some(inputs.iter().map(container).collect()),
      _ => None,
    })
    .unwrap_or_else(|| panic!("{} has no merge action", module.id))
}

pub fn container(spec: &JarSpec) -> PathBuf {
  spec.container().path().to_path_buf()
}
