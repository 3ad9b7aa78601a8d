//! Partial packaging units.
//!
//! A [`JarSpec`] describes content that will end up inside a jar: either a
//! single archive, or a directory of extracted class/resource files together
//! with the list of files to take from it. JarSpecs are the currency of every
//! merge in the pipeline. They are never mutated once produced; merging builds
//! a new one.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Where the content of a [`JarSpec`] lives.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "path", rename_all = "snake_case")]
pub enum JarContainer {
  /// A single archive file.
  Archive(PathBuf),
  /// A directory of extracted files.
  Directory(PathBuf),
}

impl JarContainer {
  pub fn path(&self) -> &Path {
    match self {
      JarContainer::Archive(path) | JarContainer::Directory(path) => path,
    }
  }
}

/// The ordered list of relative paths a [`JarSpec`] contributes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileList {
  /// Entries known at generation time (e.g. resource directories).
  Listed(Vec<PathBuf>),
  /// Entries written to a list file by the action producing the spec.
  Deferred(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JarSpec {
  container: JarContainer,
  files: FileList,
}

impl JarSpec {
  pub fn new(container: JarContainer, files: FileList) -> Self {
    Self { container, files }
  }

  /// A directory whose file list is produced by the action that fills it.
  pub fn deferred_dir(dir: impl Into<PathBuf>, list_file: impl Into<PathBuf>) -> Self {
    Self::new(JarContainer::Directory(dir.into()), FileList::Deferred(list_file.into()))
  }

  pub fn container(&self) -> &JarContainer {
    &self.container
  }

  pub fn files(&self) -> &FileList {
    &self.files
  }

  /// Entries if they are known at generation time.
  pub fn entries(&self) -> Option<&[PathBuf]> {
    match &self.files {
      FileList::Listed(entries) => Some(entries),
      FileList::Deferred(_) => None,
    }
  }

  /// Paths an action must write to produce this spec.
  pub fn outputs(&self) -> Vec<PathBuf> {
    let mut outputs = vec![self.container.path().to_path_buf()];
    if let FileList::Deferred(list) = &self.files {
      outputs.push(list.clone());
    }
    outputs
  }
}

/// Describe the archive produced by merging `inputs`, in order, into `archive`.
///
/// When every input has a known listing the result is listed too. A path that
/// appears in more than one input is kept once, at its first position, so the
/// earlier input wins. Otherwise the listing is deferred to
/// `<archive>.list`, written by the merge action.
pub fn merge_specs(inputs: &[JarSpec], archive: &Path) -> JarSpec {
  let container = JarContainer::Archive(archive.to_path_buf());

  let listed: Option<Vec<&[PathBuf]>> = inputs.iter().map(JarSpec::entries).collect();
  let files = match listed {
    Some(listings) => {
      let mut seen = HashSet::new();
      let entries = listings
        .into_iter()
        .flatten()
        .filter(|entry| seen.insert(entry.as_path()))
        .cloned()
        .collect();
      FileList::Listed(entries)
    }
    None => FileList::Deferred(list_file_for(archive)),
  };

  JarSpec::new(container, files)
}

/// `foo.jar` -> `foo.jar.list`
pub fn list_file_for(path: &Path) -> PathBuf {
  let mut name = path.as_os_str().to_os_string();
  name.push(".list");
  PathBuf::from(name)
}
