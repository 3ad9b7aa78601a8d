use std::path::{Path, PathBuf};

use tracing::debug;

use crate::action::BuildAction;
use crate::jar::JarSpec;
use crate::module::{GenerateError, JavaDependency, Module, ModuleContext, ModuleDecl};

/// A compiled resource package whose generated Java sources are handed to
/// dependents that list it in `src_list_libs`.
pub struct ResourceBundle {
  decl: ModuleDecl,
  package: PathBuf,
  src_lists: Vec<PathBuf>,
}

impl ResourceBundle {
  pub fn new(decl: ModuleDecl) -> Self {
    Self {
      decl,
      package: PathBuf::new(),
      src_lists: Vec::new(),
    }
  }
}

impl Module for ResourceBundle {
  fn name(&self) -> &str {
    &self.decl.name
  }

  fn dependencies(&self) -> Vec<String> {
    Vec::new()
  }

  fn generate_build_actions(&mut self, ctx: &mut ModuleContext<'_>) -> Result<(), GenerateError> {
    let resource_dirs: Vec<PathBuf> = self.decl.resource_dirs.iter().map(|d| ctx.path_for_src(d)).collect();
    let package = ctx.path_for_out("package-res.apk");
    let src_list = ctx.path_for_out("gen/aapt/java-files.list");
    let manifest = self.decl.manifest.as_ref().map(|m| ctx.path_for_src(m));

    debug!(module = %ctx.id(), dirs = resource_dirs.len(), "compiling resources");
    ctx.record(BuildAction::Aapt {
      manifest,
      resource_dirs,
      package: package.clone(),
      src_list: src_list.clone(),
    })?;
    ctx.checkbuild_file(package.clone());

    self.package = package;
    self.src_lists = vec![src_list];
    Ok(())
  }

  fn as_java_dependency(&self) -> Option<&dyn JavaDependency> {
    (!self.src_lists.is_empty()).then_some(self as &dyn JavaDependency)
  }
}

impl JavaDependency for ResourceBundle {
  fn classpath_file(&self) -> &Path {
    &self.package
  }

  fn class_jar_specs(&self) -> &[JarSpec] {
    &[]
  }

  fn resource_jar_specs(&self) -> &[JarSpec] {
    &[]
  }

  fn aidl_include_dirs(&self) -> &[PathBuf] {
    &[]
  }

  fn extra_src_lists(&self) -> &[PathBuf] {
    &self.src_lists
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::BuildConfig;
  use crate::module::{ModuleId, ModuleKind};
  use crate::sdk::Target;

  #[test]
  fn exposes_generated_source_list() {
    let mut decl = ModuleDecl::new(ModuleKind::ResourceBundle, "framework-res");
    decl.resource_dirs = vec!["res".to_string()];
    decl.manifest = Some("AndroidManifest.xml".to_string());
    let mut bundle = ResourceBundle::new(decl);
    assert!(bundle.as_java_dependency().is_none());

    let id = ModuleId::new("framework-res", Target::Device);
    let config = BuildConfig::new("/out", "/install");
    let dir = PathBuf::from("/src/res");
    let mut ctx = ModuleContext::new(&id, &dir, &config, Vec::new());
    bundle.generate_build_actions(&mut ctx).unwrap();

    match &ctx.actions()[0] {
      BuildAction::Aapt {
        manifest,
        resource_dirs,
        ..
      } => {
        assert_eq!(manifest.as_deref(), Some(Path::new("/src/res/AndroidManifest.xml")));
        assert_eq!(resource_dirs, &vec![PathBuf::from("/src/res/res")]);
      }
      other => panic!("expected aapt, got {other:?}"),
    }

    let dep = bundle.as_java_dependency().unwrap();
    assert_eq!(
      dep.extra_src_lists(),
      &[PathBuf::from("/out/device/framework-res/gen/aapt/java-files.list")]
    );
    assert!(dep.class_jar_specs().is_empty());
  }
}
