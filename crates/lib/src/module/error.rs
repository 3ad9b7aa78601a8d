//! Errors raised while generating a module's actions.
//!
//! There are two tiers. A [`ModuleError`] is reported against one module
//! variant: its remaining actions are abandoned and its dependents skipped,
//! while unrelated modules keep going. A [`ClassifyError`] means the build
//! definition itself is inconsistent and aborts the whole generation.

use std::path::PathBuf;

use thiserror::Error;

use crate::action::StageError;
use crate::source::SourceError;

/// A recoverable, per-module failure.
#[derive(Debug, Error)]
pub enum ModuleError {
  #[error("expected exactly one archive in sources, found {found}")]
  PrebuiltSources { found: usize },

  #[error("multiple dependencies with preprocessed aidls:\n {}\n {}", first.display(), second.display())]
  MultiplePreprocessedAidl { first: PathBuf, second: PathBuf },

  #[error("depends on undefined module {dependency:?}")]
  UnknownDependency { dependency: String },

  #[error("missing required property `{0}`")]
  MissingProperty(&'static str),

  #[error("source error: {0}")]
  Source(#[from] SourceError),

  #[error("stage failed: {0}")]
  Stage(#[from] StageError),
}

/// A dependency edge that matches none of the module's declared references.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown dependency {dependency:?} for {module:?}")]
pub struct ClassifyError {
  pub module: String,
  pub dependency: String,
}

/// Result of a module's action generation.
#[derive(Debug, Error)]
pub enum GenerateError {
  #[error(transparent)]
  Module(#[from] ModuleError),

  #[error("fatal: {0}")]
  Fatal(#[from] ClassifyError),
}

impl From<StageError> for GenerateError {
  fn from(err: StageError) -> Self {
    GenerateError::Module(err.into())
  }
}

impl From<SourceError> for GenerateError {
  fn from(err: SourceError) -> Self {
    GenerateError::Module(err.into())
  }
}
