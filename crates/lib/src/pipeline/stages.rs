//! The individual pipeline stages.
//!
//! Each stage records exactly one action into the module context and returns
//! the description of what that action will produce. A stage never looks at
//! files on disk.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::action::{BuildAction, JavacFlags, StageError};
use crate::jar::{self, JarSpec};
use crate::module::ModuleContext;

/// Combined archive of the module's classes and resources.
pub const COMBINED_JAR: &str = "classes-full-debug.jar";
pub const JARJAR_JAR: &str = "classes-jarjar.jar";
pub const JAVALIB_JAR: &str = "javalib.jar";

/// Compile `srcs` into the module's class directory.
///
/// Callers skip this stage when there is nothing to compile; being called
/// with no sources is an error.
pub fn compile_java(
  ctx: &mut ModuleContext<'_>,
  srcs: Vec<PathBuf>,
  src_lists: Vec<PathBuf>,
  flags: JavacFlags,
) -> Result<JarSpec, StageError> {
  if srcs.is_empty() {
    return Err(StageError::NoSources);
  }

  let classes = JarSpec::deferred_dir(ctx.path_for_out("classes"), ctx.path_for_out("classes.list"));
  let implicits: Vec<PathBuf> = flags.boot_classpath.iter().chain(&flags.classpath).cloned().collect();

  debug!(module = %ctx.id(), sources = srcs.len(), "compiling");
  ctx.record(BuildAction::Javac {
    srcs,
    src_lists,
    flags,
    implicits,
    classes: classes.clone(),
  })?;
  Ok(classes)
}

/// Merge `inputs`, in order, into the combined archive.
pub fn merge_jars(
  ctx: &mut ModuleContext<'_>,
  inputs: Vec<JarSpec>,
  manifest: Option<PathBuf>,
) -> Result<JarSpec, StageError> {
  let output = jar::merge_specs(&inputs, &ctx.path_for_out(COMBINED_JAR));
  debug!(module = %ctx.id(), inputs = inputs.len(), "merging jars");
  ctx.record(BuildAction::MergeJars {
    inputs,
    manifest,
    output: output.clone(),
  })?;
  Ok(output)
}

/// Rewrite class namespaces of `input` according to `rules`.
pub fn jarjar(ctx: &mut ModuleContext<'_>, input: &Path, rules: PathBuf) -> Result<PathBuf, StageError> {
  let output = ctx.path_for_out(JARJAR_JAR);
  ctx.record(BuildAction::Jarjar {
    input: input.to_path_buf(),
    rules,
    output: output.clone(),
  })?;
  Ok(output)
}

/// Extract `input` into a class spec and a resource spec.
pub fn extract_jar(ctx: &mut ModuleContext<'_>, input: &Path) -> Result<(JarSpec, JarSpec), StageError> {
  let dir = ctx.path_for_out("extracted");
  let classes = JarSpec::deferred_dir(dir.join("classes"), dir.join("classes.list"));
  let resources = JarSpec::deferred_dir(dir.join("resources"), dir.join("resources.list"));
  ctx.record(BuildAction::ExtractJar {
    input: input.to_path_buf(),
    classes: classes.clone(),
    resources: resources.clone(),
  })?;
  Ok((classes, resources))
}

/// Translate the class archive `input` to dex.
pub fn dex(ctx: &mut ModuleContext<'_>, input: &Path, flags: Vec<String>) -> Result<JarSpec, StageError> {
  let dir = ctx.path_for_out("dex");
  let output = JarSpec::deferred_dir(&dir, dir.join("dex.filelist"));
  ctx.record(BuildAction::Dex {
    input: input.to_path_buf(),
    flags,
    output: output.clone(),
  })?;
  Ok(output)
}

/// Combine translated output with `resources` into the installable jar.
pub fn javalib(ctx: &mut ModuleContext<'_>, resources: Vec<JarSpec>, dex: JarSpec) -> Result<PathBuf, StageError> {
  let output = ctx.path_for_out(JAVALIB_JAR);
  ctx.record(BuildAction::Javalib {
    resources,
    dex,
    output: output.clone(),
  })?;
  Ok(output)
}
