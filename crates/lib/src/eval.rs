//! Build file evaluation.
//!
//! A build file returns a table of module declarations:
//!
//! ```lua
//! return {
//!   modules = {
//!     { type = "java_library", name = "util", srcs = { "src/**/*.java" } },
//!   },
//! }
//! ```
//!
//! Files ending in `.json` are read as the same structure in JSON. Lua files
//! see a `__dir` global holding the directory of the file.

use std::fs;
use std::path::{Path, PathBuf};

use mlua::prelude::*;
use tracing::{debug, info};

use crate::module::BuildFile;

#[derive(Debug, thiserror::Error)]
pub enum EvalError {
  #[error("cannot read {}: {source}", path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("lua error: {0}")]
  Lua(#[from] LuaError),

  #[error("invalid build file: {0}")]
  Json(#[from] serde_json::Error),
}

/// Directory module paths in `path` are relative to.
pub fn build_file_root(path: &Path) -> PathBuf {
  match path.parent() {
    Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
    _ => PathBuf::from("."),
  }
}

/// Load the module declarations of a Lua or JSON build file.
pub fn load_build_file(path: &Path) -> Result<BuildFile, EvalError> {
  let content = fs::read_to_string(path).map_err(|source| EvalError::Read {
    path: path.to_path_buf(),
    source,
  })?;

  let file = if path.extension().is_some_and(|ext| ext == "json") {
    serde_json::from_str(&content)?
  } else {
    eval_lua(&content, path)?
  };

  info!(path = %path.display(), modules = file.modules.len(), "loaded build file");
  Ok(file)
}

fn eval_lua(content: &str, path: &Path) -> LuaResult<BuildFile> {
  let lua = Lua::new();

  let env = lua.create_table()?;
  env.set("__dir", build_file_root(path).to_string_lossy().into_owned())?;
  let mt = lua.create_table()?;
  mt.set("__index", lua.globals())?;
  env.set_metatable(Some(mt))?;

  let value = lua
    .load(content)
    .set_name(format!("@{}", path.display()))
    .set_environment(env)
    .eval::<LuaValue>()?;

  match value {
    LuaValue::Table(_) => {
      debug!(path = %path.display(), "converting build file table");
      lua.from_value(value)
    }
    _ => Err(LuaError::external("build file must return a table with a 'modules' field")),
  }
}
