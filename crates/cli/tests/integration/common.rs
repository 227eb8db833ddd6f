//! Shared test helpers for CLI integration tests.

use std::path::PathBuf;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use pubwin_lib::testutil::FakeToolchain;
use tempfile::TempDir;

/// Isolated test environment.
///
/// Each test gets its own temporary root and a fake toolchain that records
/// its arguments.
pub struct TestEnv {
  pub temp: TempDir,
  toolchain: Option<FakeToolchain>,
}

impl TestEnv {
  /// Create an environment whose toolchain exits with `exit_code`.
  pub fn with_toolchain(exit_code: i32) -> Self {
    Self::build(exit_code, None)
  }

  /// Create an environment whose toolchain also writes `name` with `size` bytes on publish.
  pub fn with_artifact(name: &str, size: u64) -> Self {
    Self::build(0, Some((name, size)))
  }

  /// Create an environment with no toolchain at all.
  pub fn without_toolchain() -> Self {
    Self {
      temp: TempDir::new().unwrap(),
      toolchain: None,
    }
  }

  fn build(exit_code: i32, artifact: Option<(&str, u64)>) -> Self {
    let temp = TempDir::new().unwrap();
    let toolchain = FakeToolchain::new(temp.path(), exit_code, artifact);
    Self {
      temp,
      toolchain: Some(toolchain),
    }
  }

  /// Workspace root (isolated per test).
  pub fn root_path(&self) -> PathBuf {
    let p = self.temp.path().join("root");
    std::fs::create_dir_all(&p).unwrap();
    dunce::canonicalize(&p).unwrap_or(p)
  }

  /// Default output directory for an architecture.
  pub fn output_path(&self, arch: &str) -> PathBuf {
    self.root_path().join("artifacts").join(format!("win-{}", arch))
  }

  /// Arguments passed to the toolchain, one entry per invocation.
  pub fn calls(&self) -> Vec<String> {
    self.toolchain.as_ref().map(FakeToolchain::calls).unwrap_or_default()
  }

  /// Get a pre-configured Command for the pubwin binary.
  ///
  /// Sets environment variables for isolated testing:
  /// - `PUBWIN_ROOT`: Isolated root path
  /// - `PUBWIN_TOOLCHAIN`: The fake toolchain, or a program that does not exist
  pub fn pubwin_cmd(&self) -> Command {
    let toolchain = match &self.toolchain {
      Some(fake) => fake.program_path().to_path_buf(),
      None => self.temp.path().join("missing-toolchain"),
    };

    let mut cmd: Command = cargo_bin_cmd!("pubwin");
    cmd.env("PUBWIN_ROOT", self.root_path());
    cmd.env("PUBWIN_TOOLCHAIN", toolchain);
    cmd.env_remove("RUST_LOG");
    cmd
  }
}
