use std::path::PathBuf;

use crate::action::BuildAction;
use crate::module::{GenerateError, Module, ModuleContext, ModuleDecl, ModuleError, SourceFileGenerator};
use crate::source;

/// An opaque command producing source files for its dependents.
pub struct Genrule {
  decl: ModuleDecl,
  outputs: Vec<PathBuf>,
}

impl Genrule {
  pub fn new(decl: ModuleDecl) -> Self {
    Self {
      decl,
      outputs: Vec::new(),
    }
  }
}

impl Module for Genrule {
  fn name(&self) -> &str {
    &self.decl.name
  }

  fn dependencies(&self) -> Vec<String> {
    Vec::new()
  }

  fn generate_build_actions(&mut self, ctx: &mut ModuleContext<'_>) -> Result<(), GenerateError> {
    let cmd = self.decl.cmd.clone().ok_or(ModuleError::MissingProperty("cmd"))?;
    if self.decl.out.is_empty() {
      return Err(ModuleError::MissingProperty("out").into());
    }

    let srcs = source::expand_sources(ctx.src_dir(), &self.decl.srcs, &self.decl.exclude_srcs)?;
    let outs: Vec<PathBuf> = self
      .decl
      .out
      .iter()
      .map(|o| ctx.path_for_out(PathBuf::from("gen").join(o)))
      .collect();

    ctx.record(BuildAction::Genrule {
      cmd,
      srcs,
      outs: outs.clone(),
    })?;
    self.outputs = outs;
    Ok(())
  }

  fn as_source_generator(&self) -> Option<&dyn SourceFileGenerator> {
    Some(self)
  }
}

impl SourceFileGenerator for Genrule {
  fn generated_source_files(&self) -> &[PathBuf] {
    &self.outputs
  }
}
