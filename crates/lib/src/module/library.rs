//! Compiled Java modules: libraries and binaries.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::deps::DependencyPolicy;
use crate::jar::JarSpec;
use crate::module::{GenerateError, JavaDependency, Module, ModuleContext, ModuleDecl, ModuleError};
use crate::pipeline::{self, JavaArtifacts};
use crate::sdk::Target;

/// Install subdirectory of library jars.
pub const FRAMEWORK_DIR: &str = "framework";
/// Install subdirectory of binary wrappers.
pub const BIN_DIR: &str = "bin";

pub struct JavaLibrary {
  decl: ModuleDecl,
  target: Target,
  dex: bool,
  artifacts: Option<JavaArtifacts>,
}

impl JavaLibrary {
  pub fn new(decl: ModuleDecl, target: Target) -> Self {
    let dex = decl.kind.dex();
    Self {
      decl,
      target,
      dex,
      artifacts: None,
    }
  }

  /// Run the pipeline and install the terminal artifact, returning the
  /// installed jar.
  fn generate_and_install(&mut self, ctx: &mut ModuleContext<'_>) -> Result<PathBuf, GenerateError> {
    let artifacts = pipeline::generate_java(ctx, &self.decl, self.dex)?;
    let jar_name = format!("{}.jar", self.decl.name);
    let installed = ctx.install_file(FRAMEWORK_DIR, &jar_name, &artifacts.output_file, None);
    debug!(module = %ctx.id(), dest = %installed.display(), "installing library");
    self.artifacts = Some(artifacts);
    Ok(installed)
  }
}

impl Module for JavaLibrary {
  fn name(&self) -> &str {
    &self.decl.name
  }

  fn dependencies(&self) -> Vec<String> {
    let mut deps = DependencyPolicy::new(&self.decl, self.target, self.dex).dependencies();
    for name in &self.decl.generated_srcs {
      if !deps.contains(name) {
        deps.push(name.clone());
      }
    }
    deps
  }

  fn generate_build_actions(&mut self, ctx: &mut ModuleContext<'_>) -> Result<(), GenerateError> {
    self.generate_and_install(ctx)?;
    Ok(())
  }

  fn as_java_dependency(&self) -> Option<&dyn JavaDependency> {
    self.artifacts.as_ref().map(|a| a as &dyn JavaDependency)
  }

  fn logtags(&self) -> &[PathBuf] {
    self.artifacts.as_ref().map(|a| a.logtags.as_slice()).unwrap_or_default()
  }
}

impl JavaDependency for JavaArtifacts {
  fn classpath_file(&self) -> &Path {
    &self.classpath_file
  }

  fn class_jar_specs(&self) -> &[JarSpec] {
    &self.class_jar_specs
  }

  fn resource_jar_specs(&self) -> &[JarSpec] {
    &self.resource_jar_specs
  }

  fn aidl_include_dirs(&self) -> &[PathBuf] {
    &self.aidl_include_dirs
  }
}

/// A library plus a wrapper script that runs it.
pub struct JavaBinary {
  library: JavaLibrary,
}

impl JavaBinary {
  pub fn new(decl: ModuleDecl, target: Target) -> Self {
    Self {
      library: JavaLibrary::new(decl, target),
    }
  }
}

impl Module for JavaBinary {
  fn name(&self) -> &str {
    self.library.name()
  }

  fn dependencies(&self) -> Vec<String> {
    self.library.dependencies()
  }

  fn generate_build_actions(&mut self, ctx: &mut ModuleContext<'_>) -> Result<(), GenerateError> {
    let wrapper = self
      .library
      .decl
      .wrapper
      .as_ref()
      .map(|w| ctx.path_for_src(w))
      .ok_or(ModuleError::MissingProperty("wrapper"))?;

    let jar = self.library.generate_and_install(ctx)?;
    let file_name = wrapper
      .file_name()
      .map(|n| n.to_string_lossy().into_owned())
      .unwrap_or_else(|| self.library.decl.name.clone());
    ctx.install_file(BIN_DIR, &file_name, &wrapper, Some(&jar));
    Ok(())
  }

  fn as_java_dependency(&self) -> Option<&dyn JavaDependency> {
    self.library.as_java_dependency()
  }

  fn logtags(&self) -> &[PathBuf] {
    self.library.logtags()
  }
}
