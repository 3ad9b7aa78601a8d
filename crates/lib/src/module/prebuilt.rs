//! Modules backed by an existing archive.

use std::path::{Path, PathBuf};

use crate::jar::JarSpec;
use crate::module::library::FRAMEWORK_DIR;
use crate::module::{GenerateError, JavaDependency, Module, ModuleContext, ModuleDecl, ModuleError};
use crate::pipeline::{ArtifactState, JavaArtifacts, stages};

/// A prebuilt jar, extracted so static dependents can merge its content.
pub struct JavaPrebuilt {
  decl: ModuleDecl,
  artifacts: Option<JavaArtifacts>,
}

impl JavaPrebuilt {
  pub fn new(decl: ModuleDecl) -> Self {
    Self { decl, artifacts: None }
  }
}

impl Module for JavaPrebuilt {
  fn name(&self) -> &str {
    &self.decl.name
  }

  fn dependencies(&self) -> Vec<String> {
    Vec::new()
  }

  fn generate_build_actions(&mut self, ctx: &mut ModuleContext<'_>) -> Result<(), GenerateError> {
    let [src] = self.decl.srcs.as_slice() else {
      return Err(
        ModuleError::PrebuiltSources {
          found: self.decl.srcs.len(),
        }
        .into(),
      );
    };
    let prebuilt = ctx.path_for_src(src);

    let (classes, resources) = stages::extract_jar(ctx, &prebuilt)?;
    let jar_name = format!("{}.jar", self.decl.name);
    ctx.install_file(FRAMEWORK_DIR, &jar_name, &prebuilt, None);

    self.artifacts = Some(JavaArtifacts {
      classpath_file: prebuilt.clone(),
      output_file: prebuilt,
      class_jar_specs: vec![classes],
      resource_jar_specs: vec![resources],
      aidl_include_dirs: Vec::new(),
      logtags: Vec::new(),
      state: ArtifactState::Extracted,
    });
    Ok(())
  }

  fn as_java_dependency(&self) -> Option<&dyn JavaDependency> {
    self.artifacts.as_ref().map(|a| a as &dyn JavaDependency)
  }
}

/// An SDK stubs jar, optionally carrying preprocessed aidl definitions.
pub struct SdkPrebuilt {
  prebuilt: JavaPrebuilt,
  aidl_preprocessed: Option<PathBuf>,
}

impl SdkPrebuilt {
  pub fn new(decl: ModuleDecl) -> Self {
    Self {
      prebuilt: JavaPrebuilt::new(decl),
      aidl_preprocessed: None,
    }
  }
}

impl Module for SdkPrebuilt {
  fn name(&self) -> &str {
    self.prebuilt.name()
  }

  fn dependencies(&self) -> Vec<String> {
    Vec::new()
  }

  fn generate_build_actions(&mut self, ctx: &mut ModuleContext<'_>) -> Result<(), GenerateError> {
    self.prebuilt.generate_build_actions(ctx)?;
    self.aidl_preprocessed = self.prebuilt.decl.aidl_preprocessed.as_ref().map(|p| ctx.path_for_src(p));
    Ok(())
  }

  fn as_java_dependency(&self) -> Option<&dyn JavaDependency> {
    self.prebuilt.artifacts.as_ref().map(|_| self as &dyn JavaDependency)
  }
}

impl JavaDependency for SdkPrebuilt {
  fn classpath_file(&self) -> &Path {
    self
      .prebuilt
      .artifacts
      .as_ref()
      .map_or(Path::new(""), |a| a.classpath_file.as_path())
  }

  fn class_jar_specs(&self) -> &[JarSpec] {
    self
      .prebuilt
      .artifacts
      .as_ref()
      .map(|a| a.class_jar_specs.as_slice())
      .unwrap_or_default()
  }

  fn resource_jar_specs(&self) -> &[JarSpec] {
    self
      .prebuilt
      .artifacts
      .as_ref()
      .map(|a| a.resource_jar_specs.as_slice())
      .unwrap_or_default()
  }

  fn aidl_include_dirs(&self) -> &[PathBuf] {
    &[]
  }

  fn aidl_preprocessed(&self) -> Option<&Path> {
    self.aidl_preprocessed.as_deref()
  }
}
