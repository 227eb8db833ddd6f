use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::consts::PLATFORM_TAG;
use crate::error::PublishError;

/// CPU architectures a publish can target
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Architecture {
  #[default]
  X64,
  X86,
  Arm64,
}

impl Architecture {
  pub const ALL: [Architecture; 3] = [Architecture::X64, Architecture::X86, Architecture::Arm64];

  /// Returns the toolchain's identifier for this architecture
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::X64 => "x64",
      Self::X86 => "x86",
      Self::Arm64 => "arm64",
    }
  }
}

impl fmt::Display for Architecture {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl FromStr for Architecture {
  type Err = PublishError;

  /// Parses an architecture name, ignoring case.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::ALL
      .into_iter()
      .find(|arch| arch.as_str().eq_ignore_ascii_case(s))
      .ok_or_else(|| PublishError::InvalidArchitecture(s.to_string()))
  }
}

/// Runtime identifier combining the platform tag and architecture (e.g., "win-arm64")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RuntimeIdentifier {
  pub arch: Architecture,
}

impl RuntimeIdentifier {
  pub fn new(arch: Architecture) -> Self {
    Self { arch }
  }

  /// Returns the identifier string passed to the toolchain's `-r` flag
  pub fn as_string(&self) -> String {
    format!("{}-{}", PLATFORM_TAG, self.arch)
  }
}

impl fmt::Display for RuntimeIdentifier {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_string())
  }
}

impl Serialize for RuntimeIdentifier {
  fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(self)
  }
}
