use std::fmt;

use serde::{Deserialize, Serialize};

use crate::sdk::{SdkVersion, Target};

/// The `type` of a module declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleKind {
  JavaLibrary,
  JavaLibraryStatic,
  JavaLibraryHost,
  JavaBinary,
  JavaBinaryHost,
  PrebuiltJavaLibrary,
  PrebuiltSdk,
  ResourceBundle,
  Genrule,
}

impl ModuleKind {
  /// Targets a declaration of this kind produces variants for.
  pub fn targets(&self, host_supported: bool) -> Vec<Target> {
    match self {
      ModuleKind::JavaLibraryHost | ModuleKind::JavaBinaryHost => vec![Target::Host],
      ModuleKind::ResourceBundle => vec![Target::Device],
      ModuleKind::Genrule => vec![Target::Device, Target::Host],
      ModuleKind::JavaLibrary
      | ModuleKind::JavaLibraryStatic
      | ModuleKind::JavaBinary
      | ModuleKind::PrebuiltJavaLibrary
      | ModuleKind::PrebuiltSdk => {
        if host_supported {
          vec![Target::Device, Target::Host]
        } else {
          vec![Target::Device]
        }
      }
    }
  }

  /// Whether variants of this kind are translated to dex.
  ///
  /// Set for device libraries and for host variants of device libraries.
  pub fn dex(&self) -> bool {
    matches!(
      self,
      ModuleKind::JavaLibrary | ModuleKind::JavaLibraryStatic | ModuleKind::JavaBinary
    )
  }
}

/// One module declaration from a build file.
///
/// Every kind shares this flat property set; properties a kind does not use
/// are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleDecl {
  #[serde(rename = "type")]
  pub kind: ModuleKind,
  pub name: String,

  /// Module directory, relative to the build file.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub dir: Option<String>,

  /// Also build a host variant.
  #[serde(default)]
  pub host_supported: bool,

  /// Source files (`.java`, `.aidl`, `.logtags`); globs allowed.
  #[serde(default)]
  pub srcs: Vec<String>,
  #[serde(default)]
  pub exclude_srcs: Vec<String>,

  #[serde(default)]
  pub java_resource_dirs: Vec<String>,
  #[serde(default)]
  pub exclude_java_resource_dirs: Vec<String>,

  /// Don't build against the boot classpath and default libraries.
  #[serde(default)]
  pub no_standard_libraries: bool,

  #[serde(default)]
  pub javacflags: Vec<String>,
  #[serde(default)]
  pub dxflags: Vec<String>,

  /// Libraries on the classpath.
  #[serde(default)]
  pub java_libs: Vec<String>,
  /// Libraries compiled into the resulting jar.
  #[serde(default)]
  pub java_static_libs: Vec<String>,
  /// Modules providing generated source file lists (e.g. `resource_bundle`).
  #[serde(default)]
  pub src_list_libs: Vec<String>,
  /// `genrule` modules whose outputs are compiled as sources.
  #[serde(default)]
  pub generated_srcs: Vec<String>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub manifest: Option<String>,
  #[serde(default)]
  pub sdk_version: SdkVersion,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub jarjar_rules: Option<String>,

  #[serde(default)]
  pub aidl_includes: Vec<String>,
  #[serde(default)]
  pub export_aidl_include_dirs: Vec<String>,

  /// `java_binary`: script installed to run the jar.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub wrapper: Option<String>,

  /// `prebuilt_sdk`: preprocessed framework.aidl.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub aidl_preprocessed: Option<String>,

  /// `resource_bundle`: resource directories.
  #[serde(default)]
  pub resource_dirs: Vec<String>,

  /// `genrule`: command and declared outputs.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub cmd: Option<String>,
  #[serde(default)]
  pub out: Vec<String>,
}

impl ModuleDecl {
  pub fn new(kind: ModuleKind, name: impl Into<String>) -> Self {
    Self {
      kind,
      name: name.into(),
      dir: None,
      host_supported: false,
      srcs: Vec::new(),
      exclude_srcs: Vec::new(),
      java_resource_dirs: Vec::new(),
      exclude_java_resource_dirs: Vec::new(),
      no_standard_libraries: false,
      javacflags: Vec::new(),
      dxflags: Vec::new(),
      java_libs: Vec::new(),
      java_static_libs: Vec::new(),
      src_list_libs: Vec::new(),
      generated_srcs: Vec::new(),
      manifest: None,
      sdk_version: SdkVersion::None,
      jarjar_rules: None,
      aidl_includes: Vec::new(),
      export_aidl_include_dirs: Vec::new(),
      wrapper: None,
      aidl_preprocessed: None,
      resource_dirs: Vec::new(),
      cmd: None,
      out: Vec::new(),
    }
  }
}

/// The contents of a build file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildFile {
  #[serde(default)]
  pub modules: Vec<ModuleDecl>,
}

/// A module variant: one declaration built for one target.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ModuleId {
  pub name: String,
  pub target: Target,
}

impl ModuleId {
  pub fn new(name: impl Into<String>, target: Target) -> Self {
    Self {
      name: name.into(),
      target,
    }
  }
}

impl fmt::Display for ModuleId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}@{}", self.name, self.target)
  }
}
