//! Build action recording.
//!
//! Module generation does not run any tool. Each stage records a declarative
//! [`BuildAction`] into the module's [`ActionCtx`], which checks that no two
//! actions of the module claim the same output. A rejected action is a stage
//! failure: the caller stops issuing further stages for that module.
//!
//! # Action Types
//!
//! - Source generation: [`BuildAction::Aidl`], [`BuildAction::Logtags`],
//!   [`BuildAction::Genrule`], [`BuildAction::Aapt`]
//! - Compile and merge: [`BuildAction::Javac`], [`BuildAction::MergeJars`]
//! - Optional rewrites: [`BuildAction::Jarjar`], [`BuildAction::ExtractJar`],
//!   [`BuildAction::Dex`], [`BuildAction::Javalib`]

mod types;

pub use types::*;

use std::collections::HashMap;
use std::path::PathBuf;

use thiserror::Error;
use tracing::trace;

/// Failure of a single pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StageError {
  /// The compile stage was invoked without anything to compile.
  #[error("compile invoked with no sources")]
  NoSources,

  /// Two actions of the same module write the same path.
  #[error("{path} is produced by both {first} and {second}")]
  DuplicateOutput {
    path: String,
    first: &'static str,
    second: &'static str,
  },
}

/// Ordered record of the actions a module emits.
#[derive(Debug, Default)]
pub struct ActionCtx {
  actions: Vec<BuildAction>,
  /// Output path -> index of the action producing it.
  outputs: HashMap<PathBuf, usize>,
}

impl ActionCtx {
  pub fn new() -> Self {
    Self::default()
  }

  /// Record an action, returning its index.
  ///
  /// Fails without recording anything if one of its outputs is already
  /// produced by an earlier action.
  pub fn record(&mut self, action: BuildAction) -> Result<usize, StageError> {
    let outputs = action.outputs();
    for path in &outputs {
      if let Some(&existing) = self.outputs.get(path) {
        return Err(StageError::DuplicateOutput {
          path: path.display().to_string(),
          first: self.actions[existing].name(),
          second: action.name(),
        });
      }
    }

    let index = self.actions.len();
    trace!(index, action = action.name(), "recorded action");
    for path in outputs {
      self.outputs.insert(path, index);
    }
    self.actions.push(action);
    Ok(index)
  }

  pub fn actions(&self) -> &[BuildAction] {
    &self.actions
  }

  pub fn len(&self) -> usize {
    self.actions.len()
  }

  pub fn is_empty(&self) -> bool {
    self.actions.is_empty()
  }

  pub fn into_actions(self) -> Vec<BuildAction> {
    self.actions
  }
}
