//! Publish requests and the policy applied to them.
//!
//! A [`BuildRequest`] holds the options exactly as the user gave them. Resolving
//! it against a workspace root yields a [`ResolvedRequest`] with the runtime
//! identifier derived, the output directory filled in, and the trim policy
//! applied.
//!
//! # Trimming implies self-contained
//!
//! The toolchain only trims self-contained output. When `trimmed` is requested
//! without `self_contained`, resolution does not reject the request: it turns
//! `self_contained` on, logs a warning, and records the change in
//! [`ResolvedRequest::self_contained_promoted`] so callers can surface it.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Serialize;
use tracing::warn;

use crate::consts::ARTIFACTS_DIR;
use crate::error::PublishError;
use crate::target::{Architecture, RuntimeIdentifier};

/// Build variant passed to the toolchain's `-c` flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Configuration {
  Debug,
  #[default]
  Release,
}

impl Configuration {
  pub const ALL: [Configuration; 2] = [Configuration::Debug, Configuration::Release];

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Debug => "Debug",
      Self::Release => "Release",
    }
  }
}

impl fmt::Display for Configuration {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl FromStr for Configuration {
  type Err = PublishError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::ALL
      .into_iter()
      .find(|config| config.as_str().eq_ignore_ascii_case(s))
      .ok_or_else(|| PublishError::InvalidConfiguration(s.to_string()))
  }
}

/// Options for a single publish run, as given on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildRequest {
  pub configuration: Configuration,
  pub architecture: Architecture,
  pub self_contained: bool,
  pub single_file: bool,
  /// Only honored for self-contained output; see the module docs.
  pub trimmed: bool,
  /// Overrides `<root>/artifacts/<runtime identifier>`.
  pub output_dir: Option<PathBuf>,
  pub clean: bool,
}

impl BuildRequest {
  pub fn runtime_identifier(&self) -> RuntimeIdentifier {
    RuntimeIdentifier::new(self.architecture)
  }

  /// Apply defaults and policy, producing the request that will actually run.
  pub fn resolve(&self, root: &Path) -> ResolvedRequest {
    let runtime_identifier = self.runtime_identifier();

    let output_dir = match &self.output_dir {
      Some(dir) => dir.clone(),
      None => default_output_dir(root, runtime_identifier),
    };

    let self_contained_promoted = self.trimmed && !self.self_contained;
    if self_contained_promoted {
      warn!("trimming requires a self-contained build, enabling self-contained");
    }

    ResolvedRequest {
      configuration: self.configuration,
      runtime_identifier,
      self_contained: self.self_contained || self.trimmed,
      single_file: self.single_file,
      trimmed: self.trimmed,
      output_dir,
      clean: self.clean,
      self_contained_promoted,
    }
  }
}

/// Default output location for a runtime: `<root>/artifacts/<rid>`.
pub fn default_output_dir(root: &Path, runtime_identifier: RuntimeIdentifier) -> PathBuf {
  root.join(ARTIFACTS_DIR).join(runtime_identifier.as_string())
}

/// A request with defaults filled in and the trim policy applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedRequest {
  pub configuration: Configuration,
  pub runtime_identifier: RuntimeIdentifier,
  pub self_contained: bool,
  pub single_file: bool,
  pub trimmed: bool,
  pub output_dir: PathBuf,
  pub clean: bool,
  /// Set when `self_contained` was forced on because trimming was requested.
  pub self_contained_promoted: bool,
}
