//! The staged artifact pipeline of a compiled Java module.
//!
//! A module's output evolves through a fixed sequence of stages, each fed by
//! the previous one:
//!
//! ```text
//! classify -> sources -> compile -> merge -> [jarjar] -> [dex + javalib]
//! ```
//!
//! The bracketed stages are gated by module configuration. A failing stage
//! stops the pipeline; later stages are never issued.

pub mod flags;
pub mod stages;

use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, info};

use crate::action::JavacFlags;
use crate::deps::{self, DependencyPolicy};
use crate::jar::JarSpec;
use crate::module::{GenerateError, ModuleContext, ModuleDecl};
use crate::source;

/// How far a module's terminal artifact got through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactState {
  /// Taken from an existing archive.
  Extracted,
  /// Compiled and merged into the combined archive.
  Merged,
  /// Namespaces rewritten by jarjar.
  Repackaged,
  /// Translated to dex and reassembled with resources.
  Translated,
}

/// What a Java module exposes once its actions have been generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JavaArtifacts {
  /// Archive dependents compile against.
  pub classpath_file: PathBuf,
  /// Terminal artifact: installed and checkbuilt.
  pub output_file: PathBuf,
  pub class_jar_specs: Vec<JarSpec>,
  pub resource_jar_specs: Vec<JarSpec>,
  /// Exported aidl include dirs.
  pub aidl_include_dirs: Vec<PathBuf>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub logtags: Vec<PathBuf>,
  pub state: ArtifactState,
}

/// Run the full pipeline for a library or binary variant.
pub fn generate_java(
  ctx: &mut ModuleContext<'_>,
  decl: &ModuleDecl,
  dex: bool,
) -> Result<JavaArtifacts, GenerateError> {
  let exported: Vec<PathBuf> = decl.export_aidl_include_dirs.iter().map(|d| ctx.path_for_src(d)).collect();

  let policy = DependencyPolicy::new(decl, ctx.target(), dex);
  let classified = deps::classify(ctx.module_name(), &policy, ctx.java_deps())?;

  let local: Vec<PathBuf> = decl.aidl_includes.iter().map(|d| ctx.path_for_src(d)).collect();
  let aidl_flags = flags::aidl_flags(
    ctx.src_dir(),
    classified.aidl_preprocessed.as_deref(),
    &classified.aidl_include_dirs,
    &exported,
    &local,
  );

  let javac_flags = JavacFlags {
    javac_flags: decl.javacflags.clone(),
    boot_classpath: classified.boot_classpath.clone(),
    classpath: classified.classpath.clone(),
  };

  let expanded = source::expand_sources(ctx.src_dir(), &decl.srcs, &decl.exclude_srcs)?;
  let resolved = source::gen_sources(ctx, expanded, &aidl_flags)?;
  let mut srcs = resolved.srcs;
  for (name, generator) in ctx.source_generators() {
    let files = generator.generated_source_files();
    debug!(module = %ctx.id(), generator = name, count = files.len(), "adding generated sources");
    srcs.extend_from_slice(files);
  }
  let compiled = !srcs.is_empty();

  let mut class_jar_specs = Vec::new();
  if compiled {
    class_jar_specs.push(stages::compile_java(
      ctx,
      srcs,
      classified.src_file_lists,
      javac_flags,
    )?);
  } else {
    debug!(module = %ctx.id(), "no sources, skipping compile");
  }
  class_jar_specs.extend(classified.class_jar_specs);

  let mut resource_jar_specs =
    source::resource_jar_specs(ctx.src_dir(), &decl.java_resource_dirs, &decl.exclude_java_resource_dirs)?;
  resource_jar_specs.extend(classified.resource_jar_specs);

  let manifest = decl.manifest.as_ref().map(|m| ctx.path_for_src(m));
  let inputs: Vec<JarSpec> = class_jar_specs.iter().chain(&resource_jar_specs).cloned().collect();
  let combined = stages::merge_jars(ctx, inputs, manifest)?;
  let mut output_file = combined.container().path().to_path_buf();
  let mut state = ArtifactState::Merged;

  if let Some(rules) = &decl.jarjar_rules {
    let rules = ctx.path_for_src(rules);
    output_file = stages::jarjar(ctx, &output_file, rules)?;
    let (classes, _) = stages::extract_jar(ctx, &output_file)?;
    class_jar_specs = vec![classes];
    state = ArtifactState::Repackaged;
  }

  let classpath_file = output_file.clone();

  if dex && compiled {
    let dex_flags = flags::dex_flags(&decl.dxflags, ctx.config().translate, &ctx.out_dir());
    let dexed = stages::dex(ctx, &output_file, dex_flags)?;
    output_file = stages::javalib(ctx, resource_jar_specs.clone(), dexed)?;
    state = ArtifactState::Translated;
  }

  ctx.checkbuild_file(output_file.clone());
  info!(module = %ctx.id(), ?state, output = %output_file.display(), "generated java module");

  Ok(JavaArtifacts {
    classpath_file,
    output_file,
    class_jar_specs,
    resource_jar_specs,
    aidl_include_dirs: exported,
    logtags: resolved.logtags,
    state,
  })
}
