//! Generation of every module variant in a build file.
//!
//! The workspace instantiates one variant per (declaration, target), orders
//! them so each dependency is generated before its dependents, and runs each
//! variant's action generation against its already-generated dependencies.
//!
//! Failures follow two tiers:
//! - A reported module error marks the variant failed. Its dependents are
//!   skipped; unrelated variants keep going.
//! - A classification error aborts the generation immediately.

mod dag;
mod types;

pub use types::*;

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use crate::action::BuildAction;
use crate::config::BuildConfig;
use crate::module::{self, BuildFile, GenerateError, Module, ModuleContext, ModuleDecl, ModuleError, ModuleId};
use crate::sdk::Target;

use dag::ModuleGraph;

/// Name of the aggregated event-log-tags file under the output root.
pub const ALL_LOGTAGS_FILE: &str = "all-event-log-tags.txt";

struct Variant {
  id: ModuleId,
  dir: PathBuf,
}

/// The instantiated module variants of a build file.
pub struct Workspace {
  variants: Vec<Variant>,
  modules: Vec<Option<Box<dyn Module>>>,
}

impl Workspace {
  /// Instantiate every variant of `decls`.
  ///
  /// Module directories are resolved against `root`.
  pub fn from_decls(decls: Vec<ModuleDecl>, root: &Path) -> Result<Self, WorkspaceError> {
    let mut variants = Vec::new();
    let mut modules: Vec<Option<Box<dyn Module>>> = Vec::new();
    let mut seen = HashSet::new();

    for decl in decls {
      let dir = match &decl.dir {
        Some(dir) => root.join(dir),
        None => root.to_path_buf(),
      };
      for target in decl.kind.targets(decl.host_supported) {
        let id = ModuleId::new(decl.name.clone(), target);
        if !seen.insert(id.clone()) {
          return Err(WorkspaceError::DuplicateModule(id));
        }
        debug!(module = %id, dir = %dir.display(), "instantiating variant");
        modules.push(Some(module::instantiate(decl.clone(), target)));
        variants.push(Variant { id, dir: dir.clone() });
      }
    }

    Ok(Self { variants, modules })
  }

  pub fn from_build_file(file: BuildFile, root: &Path) -> Result<Self, WorkspaceError> {
    Self::from_decls(file.modules, root)
  }

  pub fn len(&self) -> usize {
    self.variants.len()
  }

  pub fn is_empty(&self) -> bool {
    self.variants.is_empty()
  }

  pub fn ids(&self) -> impl Iterator<Item = &ModuleId> {
    self.variants.iter().map(|v| &v.id)
  }

  /// Generate the actions of every variant whose target `config` builds.
  pub fn generate(&mut self, config: &BuildConfig) -> Result<BuildPlan, WorkspaceError> {
    let active: Vec<usize> = (0..self.variants.len())
      .filter(|&i| config.builds_target(self.variants[i].id.target))
      .collect();
    info!(variants = active.len(), "generating workspace");

    let lookup: HashMap<(&str, Target), usize> = self
      .variants
      .iter()
      .enumerate()
      .map(|(i, v)| ((v.id.name.as_str(), v.id.target), i))
      .collect();
    let graph = ModuleGraph::new(
      self.variants.len(),
      &active,
      |i| self.modules[i].as_ref().map(|m| m.dependencies()).unwrap_or_default(),
      |i, name| lookup.get(&(name, self.variants[i].id.target)).copied(),
    );
    let order = graph
      .order()
      .map_err(|i| WorkspaceError::CycleDetected(self.variants[i].id.clone()))?;

    let mut plan = BuildPlan::default();
    let mut broken: HashSet<usize> = HashSet::new();
    let mut logtags: Vec<PathBuf> = Vec::new();

    for index in order {
      let id = self.variants[index].id.clone();

      if let Some(name) = graph.missing(index).first() {
        let err = ModuleError::UnknownDependency { dependency: name.clone() };
        error!(module = %id, error = %err, "module failed");
        plan.failed.push(ModuleFailure {
          module: id,
          error: err.to_string(),
        });
        broken.insert(index);
        continue;
      }

      if let Some(&dep) = graph.dependencies(index).iter().find(|d| broken.contains(d)) {
        let dependency = self.variants[dep].id.clone();
        warn!(module = %id, dependency = %dependency, "skipping module due to failed dependency");
        plan.skipped.push(SkippedModule { module: id, dependency });
        broken.insert(index);
        continue;
      }

      let Some(mut current) = self.modules[index].take() else {
        continue;
      };

      let (result, outputs) = {
        let deps: Vec<(&str, &dyn Module)> = graph
          .dependencies(index)
          .iter()
          .filter_map(|&d| {
            self.modules[d]
              .as_deref()
              .map(|m| (self.variants[d].id.name.as_str(), m))
          })
          .collect();
        let variant = &self.variants[index];
        let mut ctx = ModuleContext::new(&variant.id, &variant.dir, config, deps);
        let result = current.generate_build_actions(&mut ctx);
        (result, ctx.into_outputs())
      };

      match result {
        Ok(()) => {
          for tag in current.logtags() {
            if !logtags.contains(tag) {
              logtags.push(tag.clone());
            }
          }
          info!(module = %id, actions = outputs.actions.len(), "module generated");
          plan.modules.push(ModulePlan {
            exports: current.as_java_dependency().map(Exports::of),
            id,
            actions: outputs.actions,
            installs: outputs.installs,
            checkbuild: outputs.checkbuild,
          });
        }
        Err(GenerateError::Module(err)) => {
          error!(module = %id, error = %err, "module failed");
          plan.failed.push(ModuleFailure {
            module: id,
            error: err.to_string(),
          });
          broken.insert(index);
        }
        Err(GenerateError::Fatal(err)) => {
          error!(module = %id, error = %err, "aborting generation");
          self.modules[index] = Some(current);
          return Err(err.into());
        }
      }

      self.modules[index] = Some(current);
    }

    plan.global_actions.push(BuildAction::MergeLogtags {
      inputs: logtags,
      output: config.out_dir.join(ALL_LOGTAGS_FILE),
    });

    info!(
      modules = plan.modules.len(),
      failed = plan.failed.len(),
      skipped = plan.skipped.len(),
      "workspace generated"
    );
    Ok(plan)
  }
}
