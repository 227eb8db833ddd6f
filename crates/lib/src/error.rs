//! Error types for publish runs.
//!
//! Every variant maps to a process exit code so the CLI stays scriptable:
//! toolchain failures keep the toolchain's own code, validation failures use
//! the usage-error code, and everything else is a generic failure.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::toolchain::ToolchainAction;

/// Exit code for arguments rejected before any side effect.
pub const EXIT_VALIDATION: i32 = 2;

/// Exit code for environment and filesystem failures.
pub const EXIT_FAILURE: i32 = 1;

/// Exit code when a termination signal interrupted the toolchain.
pub const EXIT_INTERRUPTED: i32 = 130;

#[derive(Debug, Error)]
pub enum PublishError {
  #[error("invalid configuration '{0}' (expected Debug or Release)")]
  InvalidConfiguration(String),

  #[error("invalid architecture '{0}' (expected x64, x86 or arm64)")]
  InvalidArchitecture(String),

  #[error("could not determine the working directory: {0}")]
  CurrentDir(#[source] io::Error),

  #[error("toolchain not found: {program}")]
  ToolchainNotFound { program: String },

  #[error("failed to run {program}: {source}")]
  Spawn {
    program: String,
    #[source]
    source: io::Error,
  },

  #[error("{action} failed with exit code {code}")]
  ToolchainFailed { action: ToolchainAction, code: i32 },

  #[error("{action} was terminated before it could exit")]
  ToolchainKilled { action: ToolchainAction },

  #[error("interrupted while {action} was running")]
  Interrupted { action: ToolchainAction },

  #[error("failed to remove output directory {}: {source}", .path.display())]
  RemoveOutput {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed to read artifact {}: {source}", .path.display())]
  Artifact {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

impl PublishError {
  /// The process exit code this error should produce.
  pub fn exit_code(&self) -> i32 {
    match self {
      PublishError::InvalidConfiguration(_) | PublishError::InvalidArchitecture(_) => EXIT_VALIDATION,
      PublishError::ToolchainFailed { code, .. } => *code,
      PublishError::Interrupted { .. } => EXIT_INTERRUPTED,
      _ => EXIT_FAILURE,
    }
  }
}

pub type Result<T> = std::result::Result<T, PublishError>;
