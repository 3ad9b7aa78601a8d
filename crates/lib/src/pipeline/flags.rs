use std::path::{Path, PathBuf};

use crate::config::TranslateOptions;

fn include(dir: &Path) -> String {
  format!("-I{}", dir.display())
}

/// Arguments for every aidl invocation of a module.
///
/// A preprocessed definitions file from a dependency replaces the inherited
/// include dirs; the module's own dirs are always added.
pub fn aidl_flags(
  module_dir: &Path,
  preprocessed: Option<&Path>,
  inherited: &[PathBuf],
  exported: &[PathBuf],
  local: &[PathBuf],
) -> Vec<String> {
  let mut flags = Vec::new();
  match preprocessed {
    Some(path) => flags.push(format!("-p{}", path.display())),
    None => flags.extend(inherited.iter().map(|dir| include(dir))),
  }
  flags.extend(exported.iter().map(|dir| include(dir)));
  flags.extend(local.iter().map(|dir| include(dir)));
  flags.push(include(module_dir));
  flags.push(include(&module_dir.join("src")));
  flags
}

/// Arguments for the dex translation of a module.
///
/// `dump_dir` receives the class dump when debug output is on.
pub fn dex_flags(dxflags: &[String], options: TranslateOptions, dump_dir: &Path) -> Vec<String> {
  let mut flags = dxflags.to_vec();
  if options.no_optimize {
    flags.push("--no-optimize".to_string());
  }
  if options.debug_dump {
    flags.push("--debug".to_string());
    flags.push("--verbose".to_string());
    flags.push(format!("--dump-to={}", dump_dir.join("classes.lst").display()));
    flags.push("--dump-width=1000".to_string());
  }
  flags
}
