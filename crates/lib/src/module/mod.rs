//! Module variants and the capabilities they expose to dependents.
//!
//! Every declared module becomes one [`Module`] per target. Dependents never
//! look at a module's concrete type; they reach its outputs through the
//! capability traits:
//!
//! - [`JavaDependency`] - classpath file and class/resource JarSpecs
//! - [`SourceFileGenerator`] - generated source files
//!
//! # Submodules
//!
//! - [`library`] - `java_library` and `java_binary`
//! - [`prebuilt`] - `prebuilt_java_library` and `prebuilt_sdk`
//! - [`resources`] - `resource_bundle`
//! - [`genrule`] - `genrule`

mod context;
mod error;
pub mod genrule;
pub mod library;
pub mod prebuilt;
pub mod resources;
mod types;

pub use context::*;
pub use error::*;
pub use types::*;

use std::path::{Path, PathBuf};

use crate::jar::JarSpec;
use crate::sdk::Target;

/// Outputs of a module that other Java modules compile against or merge in.
pub trait JavaDependency {
  /// File suitable for a dependent's classpath.
  fn classpath_file(&self) -> &Path;

  /// Class content a static dependent merges into its own jar.
  fn class_jar_specs(&self) -> &[JarSpec];

  /// Resource content a static dependent merges into its own jar.
  fn resource_jar_specs(&self) -> &[JarSpec];

  /// Directories dependents pass to aidl as include dirs.
  fn aidl_include_dirs(&self) -> &[PathBuf];

  /// Preprocessed aidl definitions, exposed only by SDK prebuilts.
  fn aidl_preprocessed(&self) -> Option<&Path> {
    None
  }

  /// Generated source file lists offered to dependents that ask for them
  /// through `src_list_libs`.
  fn extra_src_lists(&self) -> &[PathBuf] {
    &[]
  }
}

/// Modules whose generated files are compiled by their dependents.
pub trait SourceFileGenerator {
  fn generated_source_files(&self) -> &[PathBuf];
}

/// A module variant in the build graph.
pub trait Module {
  fn name(&self) -> &str;

  /// Names of the modules this variant depends on, in declaration order.
  fn dependencies(&self) -> Vec<String>;

  /// Emit this variant's actions into `ctx`.
  ///
  /// Called once, after every dependency has generated successfully.
  fn generate_build_actions(&mut self, ctx: &mut ModuleContext<'_>) -> Result<(), GenerateError>;

  fn as_java_dependency(&self) -> Option<&dyn JavaDependency> {
    None
  }

  fn as_source_generator(&self) -> Option<&dyn SourceFileGenerator> {
    None
  }

  /// Event-log-tags sources, collected into the global tags file.
  fn logtags(&self) -> &[PathBuf] {
    &[]
  }
}

/// Create the variant of `decl` for `target`.
pub fn instantiate(decl: ModuleDecl, target: Target) -> Box<dyn Module> {
  match decl.kind {
    ModuleKind::JavaLibrary | ModuleKind::JavaLibraryStatic | ModuleKind::JavaLibraryHost => {
      Box::new(library::JavaLibrary::new(decl, target))
    }
    ModuleKind::JavaBinary | ModuleKind::JavaBinaryHost => Box::new(library::JavaBinary::new(decl, target)),
    ModuleKind::PrebuiltJavaLibrary => Box::new(prebuilt::JavaPrebuilt::new(decl)),
    ModuleKind::PrebuiltSdk => Box::new(prebuilt::SdkPrebuilt::new(decl)),
    ModuleKind::ResourceBundle => Box::new(resources::ResourceBundle::new(decl)),
    ModuleKind::Genrule => Box::new(genrule::Genrule::new(decl)),
  }
}
