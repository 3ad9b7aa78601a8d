//! Source and resource resolution.
//!
//! Source patterns are relative to the module directory. Patterns containing
//! glob syntax are matched against the files under the module directory,
//! walked in sorted order; plain paths are taken as written. Exclusions are
//! globs as well. Tool-based generation turns `.aidl` and `.logtags` sources
//! into Java files under the module's `gen/` directory.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobBuilder, GlobMatcher, GlobSet, GlobSetBuilder};
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

use crate::action::BuildAction;
use crate::jar::{FileList, JarContainer, JarSpec};
use crate::module::{GenerateError, ModuleContext};

#[derive(Debug, Error)]
pub enum SourceError {
  #[error("invalid pattern {pattern:?}: {source}")]
  Pattern {
    pattern: String,
    #[source]
    source: globset::Error,
  },

  #[error("failed to walk {path}: {message}")]
  Walk { path: String, message: String },

  #[error("unsupported source file {}", .0.display())]
  Unsupported(PathBuf),
}

/// Sources after tool-based generation.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ResolvedSources {
  /// Java sources to compile, in order.
  pub srcs: Vec<PathBuf>,
  /// The `.logtags` inputs among the declared sources.
  pub logtags: Vec<PathBuf>,
}

fn is_glob(pattern: &str) -> bool {
  pattern.contains(['*', '?', '[', '{'])
}

/// Compile `pattern` so that `*` and `?` stop at `/`. Includes and excludes
/// share this, so a pattern selects the same files in either list.
fn glob(pattern: &str) -> Result<Glob, SourceError> {
  GlobBuilder::new(pattern)
    .literal_separator(true)
    .build()
    .map_err(|source| SourceError::Pattern {
      pattern: pattern.to_string(),
      source,
    })
}

fn matcher(pattern: &str) -> Result<GlobMatcher, SourceError> {
  Ok(glob(pattern)?.compile_matcher())
}

fn exclusion_set(patterns: &[String]) -> Result<GlobSet, SourceError> {
  let mut builder = GlobSetBuilder::new();
  for pattern in patterns {
    builder.add(glob(pattern)?);
  }
  builder.build().map_err(|source| SourceError::Pattern {
    pattern: patterns.join(","),
    source,
  })
}

/// Relative paths of every entry under `dir` (files or directories), sorted.
fn walk_relative(dir: &Path, want_dirs: bool) -> Result<Vec<PathBuf>, SourceError> {
  let mut entries = Vec::new();
  for entry in WalkDir::new(dir).min_depth(1).sort_by_file_name() {
    let entry = entry.map_err(|e| SourceError::Walk {
      path: dir.display().to_string(),
      message: e.to_string(),
    })?;
    if entry.file_type().is_dir() != want_dirs {
      continue;
    }
    if let Ok(rel) = entry.path().strip_prefix(dir) {
      entries.push(rel.to_path_buf());
    }
  }
  Ok(entries)
}

/// Expand `patterns` minus `excludes` to module-relative paths, in pattern
/// order. A path matched twice keeps its first position.
fn expand_relative(
  dir: &Path,
  patterns: &[String],
  excludes: &[String],
  want_dirs: bool,
) -> Result<Vec<PathBuf>, SourceError> {
  let excluded = exclusion_set(excludes)?;
  let mut listing: Option<Vec<PathBuf>> = None;
  let mut out: Vec<PathBuf> = Vec::new();

  for pattern in patterns {
    let matched: Vec<PathBuf> = if is_glob(pattern) {
      let glob = matcher(pattern)?;
      if listing.is_none() {
        listing = Some(walk_relative(dir, want_dirs)?);
      }
      listing
        .iter()
        .flatten()
        .filter(|rel| glob.is_match(rel))
        .cloned()
        .collect()
    } else {
      vec![PathBuf::from(pattern)]
    };

    for rel in matched {
      if excluded.is_match(&rel) || out.contains(&rel) {
        continue;
      }
      out.push(rel);
    }
  }

  Ok(out)
}

/// Expand source patterns to paths under `dir`.
pub fn expand_sources(dir: &Path, patterns: &[String], excludes: &[String]) -> Result<Vec<PathBuf>, SourceError> {
  Ok(
    expand_relative(dir, patterns, excludes, false)?
      .into_iter()
      .map(|rel| dir.join(rel))
      .collect(),
  )
}

/// One JarSpec per resource directory, listing its files in sorted order.
///
/// Directories that don't exist contribute nothing.
pub fn resource_jar_specs(dir: &Path, resource_dirs: &[String], excludes: &[String]) -> Result<Vec<JarSpec>, SourceError> {
  let mut specs = Vec::new();
  for rel in expand_relative(dir, resource_dirs, excludes, true)? {
    let root = dir.join(&rel);
    if !root.is_dir() {
      debug!(dir = %root.display(), "skipping missing resource directory");
      continue;
    }
    let files = walk_relative(&root, false)?;
    specs.push(JarSpec::new(JarContainer::Directory(root), FileList::Listed(files)));
  }
  Ok(specs)
}

/// Path of a generated file: `rel` under `gen_dir`, with a new extension.
fn generated_path(ctx: &ModuleContext<'_>, gen_dir: &str, src: &Path, ext: &str) -> PathBuf {
  let rel = src
    .strip_prefix(ctx.src_dir())
    .map(Path::to_path_buf)
    .unwrap_or_else(|_| src.file_name().map(PathBuf::from).unwrap_or_default());
  ctx.path_for_out(Path::new("gen").join(gen_dir).join(rel.with_extension(ext)))
}

/// Run source generators over `srcs`, keeping order.
///
/// `.java` files pass through; `.aidl` and `.logtags` files are replaced by
/// the Java file their generation action writes.
pub fn gen_sources(
  ctx: &mut ModuleContext<'_>,
  srcs: Vec<PathBuf>,
  aidl_flags: &[String],
) -> Result<ResolvedSources, GenerateError> {
  let mut resolved = ResolvedSources::default();

  for src in srcs {
    match src.extension().and_then(|e| e.to_str()) {
      Some("java") => resolved.srcs.push(src),
      Some("aidl") => {
        let out = generated_path(ctx, "aidl", &src, "java");
        ctx.record(BuildAction::Aidl {
          src,
          out: out.clone(),
          flags: aidl_flags.to_vec(),
        })?;
        resolved.srcs.push(out);
      }
      Some("logtags") => {
        let out = generated_path(ctx, "logtags", &src, "java");
        resolved.logtags.push(src.clone());
        ctx.record(BuildAction::Logtags { src, out: out.clone() })?;
        resolved.srcs.push(out);
      }
      _ => return Err(SourceError::Unsupported(src).into()),
    }
  }

  Ok(resolved)
}
