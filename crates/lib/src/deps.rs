//! Dependency classification.
//!
//! A Java module's dependency edges fall into exactly one of five categories,
//! decided purely from the module's declared reference lists and its SDK
//! policy. The category decides what the dependency contributes:
//!
//! | category | classpath | merged content | other |
//! |---|---|---|---|
//! | boot classpath | boot entry | - | - |
//! | default library | yes | - | - |
//! | shared library (`java_libs`) | yes | - | - |
//! | static library (`java_static_libs`) | yes | classes + resources | - |
//! | source lists (`src_list_libs`) | - | - | generated file lists |
//!
//! Every edge also contributes its exported aidl include dirs, and at most one
//! edge may expose preprocessed aidl definitions. An edge that fits no
//! category is a fatal [`ClassifyError`].

use std::path::PathBuf;

use tracing::debug;

use crate::jar::JarSpec;
use crate::module::{ClassifyError, GenerateError, JavaDependency, ModuleDecl, ModuleError};
use crate::sdk::{self, DEFAULT_JAVA_LIBRARIES, Target};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DepCategory {
  BootClasspath,
  DefaultLibrary,
  SharedLibrary,
  StaticLibrary,
  SourceLists,
}

/// The reference lists and SDK policy of one module variant.
#[derive(Debug, Clone)]
pub struct DependencyPolicy<'a> {
  boot_classpath: Option<String>,
  default_libraries: bool,
  libs: &'a [String],
  static_libs: &'a [String],
  src_list_libs: &'a [String],
}

impl<'a> DependencyPolicy<'a> {
  pub fn new(decl: &'a ModuleDecl, target: Target, dex: bool) -> Self {
    let (boot_classpath, default_libraries) = if decl.no_standard_libraries {
      (None, false)
    } else {
      (
        sdk::boot_classpath(target, &decl.sdk_version, dex),
        sdk::uses_default_libraries(target, &decl.sdk_version),
      )
    };

    Self {
      boot_classpath,
      default_libraries,
      libs: &decl.java_libs,
      static_libs: &decl.java_static_libs,
      src_list_libs: &decl.src_list_libs,
    }
  }

  pub fn boot_classpath(&self) -> Option<&str> {
    self.boot_classpath.as_deref()
  }

  /// Dependency names in declaration order: boot classpath, default
  /// libraries, shared, static, then source-list providers. Each name
  /// appears once, at its first position.
  pub fn dependencies(&self) -> Vec<String> {
    let defaults: &[&str] = if self.default_libraries {
      DEFAULT_JAVA_LIBRARIES
    } else {
      &[]
    };

    let mut deps: Vec<String> = Vec::new();
    let names = self
      .boot_classpath
      .iter()
      .map(String::as_str)
      .chain(defaults.iter().copied())
      .chain(self.libs.iter().map(String::as_str))
      .chain(self.static_libs.iter().map(String::as_str))
      .chain(self.src_list_libs.iter().map(String::as_str));
    for name in names {
      if !deps.iter().any(|d| d == name) {
        deps.push(name.to_string());
      }
    }
    deps
  }

  /// Category of the edge to `name`, or `None` if no declaration covers it.
  pub fn category(&self, name: &str) -> Option<DepCategory> {
    if self.boot_classpath.as_deref() == Some(name) {
      Some(DepCategory::BootClasspath)
    } else if self.default_libraries && DEFAULT_JAVA_LIBRARIES.contains(&name) {
      Some(DepCategory::DefaultLibrary)
    } else if self.libs.iter().any(|l| l == name) {
      Some(DepCategory::SharedLibrary)
    } else if self.static_libs.iter().any(|l| l == name) {
      Some(DepCategory::StaticLibrary)
    } else if self.src_list_libs.iter().any(|l| l == name) {
      Some(DepCategory::SourceLists)
    } else {
      None
    }
  }
}

/// What a module's dependencies contribute to its compile and merge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedDeps {
  pub boot_classpath: Option<PathBuf>,
  pub classpath: Vec<PathBuf>,
  /// Class specs of static libraries, in dependency order.
  pub class_jar_specs: Vec<JarSpec>,
  /// Resource specs of static libraries, in dependency order.
  pub resource_jar_specs: Vec<JarSpec>,
  pub aidl_include_dirs: Vec<PathBuf>,
  pub aidl_preprocessed: Option<PathBuf>,
  pub src_file_lists: Vec<PathBuf>,
}

/// Classify the Java dependency edges of `module`, in traversal order.
///
/// A second dependency exposing preprocessed aidl is reported as a
/// [`ModuleError`] once every edge has been looked at; an edge with no
/// category aborts immediately with a [`ClassifyError`].
pub fn classify<'d, I>(module: &str, policy: &DependencyPolicy<'_>, deps: I) -> Result<ClassifiedDeps, GenerateError>
where
  I: IntoIterator<Item = (&'d str, &'d dyn JavaDependency)>,
{
  let mut out = ClassifiedDeps::default();
  let mut reported: Option<ModuleError> = None;

  for (name, dep) in deps {
    let Some(category) = policy.category(name) else {
      return Err(
        ClassifyError {
          module: module.to_string(),
          dependency: name.to_string(),
        }
        .into(),
      );
    };
    debug!(module, dependency = name, ?category, "classified dependency");

    match category {
      DepCategory::BootClasspath => {
        out.boot_classpath = Some(dep.classpath_file().to_path_buf());
      }
      DepCategory::DefaultLibrary | DepCategory::SharedLibrary => {
        out.classpath.push(dep.classpath_file().to_path_buf());
      }
      DepCategory::StaticLibrary => {
        out.classpath.push(dep.classpath_file().to_path_buf());
        out.class_jar_specs.extend_from_slice(dep.class_jar_specs());
        out.resource_jar_specs.extend_from_slice(dep.resource_jar_specs());
      }
      DepCategory::SourceLists => {
        out.src_file_lists.extend_from_slice(dep.extra_src_lists());
      }
    }

    out.aidl_include_dirs.extend_from_slice(dep.aidl_include_dirs());

    if let Some(preprocessed) = dep.aidl_preprocessed() {
      match &out.aidl_preprocessed {
        Some(first) => {
          if reported.is_none() {
            reported = Some(ModuleError::MultiplePreprocessedAidl {
              first: first.clone(),
              second: preprocessed.to_path_buf(),
            });
          }
        }
        None => out.aidl_preprocessed = Some(preprocessed.to_path_buf()),
      }
    }
  }

  match reported {
    Some(err) => Err(err.into()),
    None => Ok(out),
  }
}
