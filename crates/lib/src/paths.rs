use std::path::PathBuf;

use crate::consts::{DEFAULT_TOOLCHAIN, ROOT_ENV, TOOLCHAIN_ENV};
use crate::error::{PublishError, Result};

/// Returns the workspace root: `PUBWIN_ROOT` if set, otherwise the current directory
pub fn root_dir() -> Result<PathBuf> {
  let root = match std::env::var_os(ROOT_ENV) {
    Some(root) if !root.is_empty() => PathBuf::from(root),
    _ => std::env::current_dir().map_err(PublishError::CurrentDir)?,
  };
  Ok(dunce::canonicalize(&root).unwrap_or(root))
}

/// Returns the toolchain program: `PUBWIN_TOOLCHAIN` if set, otherwise `dotnet`
pub fn toolchain_program() -> String {
  std::env::var(TOOLCHAIN_ENV)
    .ok()
    .filter(|program| !program.is_empty())
    .unwrap_or_else(|| DEFAULT_TOOLCHAIN.to_string())
}
