//! The workspace a publish runs in.

use std::path::{Path, PathBuf};

use crate::consts::{DEFAULT_ARTIFACT, DEFAULT_PROJECT};
use crate::error::Result;
use crate::paths;

/// Where to build from and what to build with.
///
/// Constructed once at startup and passed by reference; nothing in the crate
/// reads the environment after this point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishContext {
  pub root: PathBuf,
  pub project: PathBuf,
  pub toolchain: String,
  pub artifact_name: String,
}

impl PublishContext {
  pub fn new(root: impl Into<PathBuf>, toolchain: impl Into<String>) -> Self {
    Self {
      root: root.into(),
      project: PathBuf::from(DEFAULT_PROJECT),
      toolchain: toolchain.into(),
      artifact_name: DEFAULT_ARTIFACT.to_string(),
    }
  }

  /// Build a context from `PUBWIN_ROOT` / `PUBWIN_TOOLCHAIN` with default project and artifact.
  pub fn from_env() -> Result<Self> {
    Ok(Self::new(paths::root_dir()?, paths::toolchain_program()))
  }

  pub fn with_project(mut self, project: impl Into<PathBuf>) -> Self {
    self.project = project.into();
    self
  }

  pub fn with_artifact_name(mut self, name: impl Into<String>) -> Self {
    self.artifact_name = name.into();
    self
  }

  /// The project path handed to the toolchain; relative paths resolve against the root.
  pub fn project_path(&self) -> PathBuf {
    if self.project.is_absolute() {
      self.project.clone()
    } else {
      self.root.join(&self.project)
    }
  }

  pub fn artifact_path(&self, output_dir: &Path) -> PathBuf {
    output_dir.join(&self.artifact_name)
  }
}
