use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::jar::JarSpec;

/// Flags for a javac invocation, owned by the module that issues it.
///
/// Each compile action carries its own copy, so no flag string is shared
/// between modules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JavacFlags {
  /// Module-specific `javacflags`, passed through verbatim.
  pub javac_flags: Vec<String>,
  pub boot_classpath: Option<PathBuf>,
  pub classpath: Vec<PathBuf>,
}

impl JavacFlags {
  /// Render the flags as javac arguments.
  pub fn to_args(&self) -> Vec<String> {
    let mut args = self.javac_flags.clone();
    if let Some(boot) = &self.boot_classpath {
      args.push("-bootclasspath".to_string());
      args.push(boot.display().to_string());
    }
    if !self.classpath.is_empty() {
      let joined: Vec<String> = self.classpath.iter().map(|p| p.display().to_string()).collect();
      args.push("-classpath".to_string());
      args.push(joined.join(":"));
    }
    args
  }
}

/// An action emitted while generating a module.
///
/// Actions are declarative: they name their inputs and outputs and are handed
/// to the execution engine as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum BuildAction {
  /// Generate a Java source from an AIDL file.
  Aidl { src: PathBuf, out: PathBuf, flags: Vec<String> },

  /// Generate a Java source from an event-log-tags file.
  Logtags { src: PathBuf, out: PathBuf },

  /// Opaque user command producing source files.
  Genrule {
    cmd: String,
    srcs: Vec<PathBuf>,
    outs: Vec<PathBuf>,
  },

  /// Compile resources and emit the generated Java sources as a file list.
  Aapt {
    manifest: Option<PathBuf>,
    resource_dirs: Vec<PathBuf>,
    package: PathBuf,
    src_list: PathBuf,
  },

  /// Compile Java sources into a directory of classes.
  Javac {
    srcs: Vec<PathBuf>,
    src_lists: Vec<PathBuf>,
    flags: JavacFlags,
    /// Files the compile reads besides sources (classpath entries).
    implicits: Vec<PathBuf>,
    classes: JarSpec,
  },

  /// Merge class and resource specs, in order, into one jar.
  MergeJars {
    inputs: Vec<JarSpec>,
    manifest: Option<PathBuf>,
    output: JarSpec,
  },

  /// Rewrite class namespaces with a jarjar rules file.
  Jarjar { input: PathBuf, rules: PathBuf, output: PathBuf },

  /// Split an existing jar into class and resource specs.
  ExtractJar {
    input: PathBuf,
    classes: JarSpec,
    resources: JarSpec,
  },

  /// Translate a class jar into dex bytecode.
  Dex {
    input: PathBuf,
    flags: Vec<String>,
    output: JarSpec,
  },

  /// Combine dex output with resources into the installable jar.
  Javalib {
    resources: Vec<JarSpec>,
    dex: JarSpec,
    output: PathBuf,
  },

  /// Concatenate the event-log-tags of every module.
  MergeLogtags { inputs: Vec<PathBuf>, output: PathBuf },
}

impl BuildAction {
  /// Short name used in logs and summaries.
  pub fn name(&self) -> &'static str {
    match self {
      BuildAction::Aidl { .. } => "aidl",
      BuildAction::Logtags { .. } => "logtags",
      BuildAction::Genrule { .. } => "genrule",
      BuildAction::Aapt { .. } => "aapt",
      BuildAction::Javac { .. } => "javac",
      BuildAction::MergeJars { .. } => "merge_jars",
      BuildAction::Jarjar { .. } => "jarjar",
      BuildAction::ExtractJar { .. } => "extract_jar",
      BuildAction::Dex { .. } => "dex",
      BuildAction::Javalib { .. } => "javalib",
      BuildAction::MergeLogtags { .. } => "merge_logtags",
    }
  }

  /// Every path this action writes.
  pub fn outputs(&self) -> Vec<PathBuf> {
    match self {
      BuildAction::Aidl { out, .. } | BuildAction::Logtags { out, .. } => vec![out.clone()],
      BuildAction::Genrule { outs, .. } => outs.clone(),
      BuildAction::Aapt { package, src_list, .. } => vec![package.clone(), src_list.clone()],
      BuildAction::Javac { classes, .. } => classes.outputs(),
      BuildAction::MergeJars { output, .. } | BuildAction::Dex { output, .. } => output.outputs(),
      BuildAction::Jarjar { output, .. }
      | BuildAction::Javalib { output, .. }
      | BuildAction::MergeLogtags { output, .. } => vec![output.clone()],
      BuildAction::ExtractJar { classes, resources, .. } => {
        let mut outputs = classes.outputs();
        outputs.extend(resources.outputs());
        outputs
      }
    }
  }
}

/// Copy of a built file into the install tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstallStep {
  pub src: PathBuf,
  pub dest: PathBuf,
  /// Installed file that must exist before this one is installed.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub after: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn javac_flags_render_boot_and_classpath() {
    let flags = JavacFlags {
      javac_flags: vec!["-Xlint:all".to_string()],
      boot_classpath: Some(PathBuf::from("/out/core.jar")),
      classpath: vec![PathBuf::from("/out/a.jar"), PathBuf::from("/out/b.jar")],
    };

    assert_eq!(
      flags.to_args(),
      vec![
        "-Xlint:all",
        "-bootclasspath",
        "/out/core.jar",
        "-classpath",
        "/out/a.jar:/out/b.jar"
      ]
    );
  }

  #[test]
  fn javac_flags_empty_render_nothing() {
    assert!(JavacFlags::default().to_args().is_empty());
  }

  #[test]
  fn extract_outputs_cover_both_specs() {
    let action = BuildAction::ExtractJar {
      input: PathBuf::from("/in.jar"),
      classes: JarSpec::deferred_dir("/out/classes", "/out/classes.list"),
      resources: JarSpec::deferred_dir("/out/res", "/out/res.list"),
    };

    assert_eq!(
      action.outputs(),
      vec![
        PathBuf::from("/out/classes"),
        PathBuf::from("/out/classes.list"),
        PathBuf::from("/out/res"),
        PathBuf::from("/out/res.list"),
      ]
    );
  }

  #[test]
  fn action_serializes_with_tag() {
    let action = BuildAction::Jarjar {
      input: PathBuf::from("a.jar"),
      rules: PathBuf::from("rules.txt"),
      output: PathBuf::from("b.jar"),
    };
    let json = serde_json::to_value(&action).unwrap();
    assert_eq!(json["action"], "jarjar");
  }
}
