//! Test utilities for pubwin-lib.
//!
//! Provides a fake toolchain: a small script that appends its arguments to a
//! log file, prints a build-log line on stdout like the real toolchain does,
//! optionally writes an artifact into the `-o` directory on `publish`, and
//! exits with a chosen code.
//!
//! Compiled for this crate's tests and, with the `testutil` feature, for
//! other crates' integration tests.

use std::path::{Path, PathBuf};

/// Line the fake toolchain prints on stdout for every invocation.
pub const BUILD_LOG_LINE: &str = "Restore complete (0.4s)";

pub struct FakeToolchain {
  program: PathBuf,
  log: PathBuf,
}

impl FakeToolchain {
  /// Write the fake toolchain into `dir`.
  ///
  /// `artifact` is an optional `(file name, size in bytes)` to create in the
  /// output directory when invoked with `publish`.
  pub fn new(dir: &Path, exit_code: i32, artifact: Option<(&str, u64)>) -> Self {
    let log = dir.join("calls.log");
    let program = write_script(dir, &log, exit_code, artifact);
    Self { program, log }
  }

  pub fn program(&self) -> String {
    self.program.display().to_string()
  }

  pub fn program_path(&self) -> &Path {
    &self.program
  }

  /// One entry per invocation, arguments joined by single spaces.
  pub fn calls(&self) -> Vec<String> {
    match std::fs::read_to_string(&self.log) {
      Ok(content) => content.lines().map(|line| line.trim_end().to_string()).collect(),
      Err(_) => Vec::new(),
    }
  }
}

#[cfg(unix)]
fn write_script(dir: &Path, log: &Path, exit_code: i32, artifact: Option<(&str, u64)>) -> PathBuf {
  use std::os::unix::fs::PermissionsExt;

  let make_artifact = match artifact {
    Some((name, size)) => format!("mkdir -p \"$out\" && head -c {size} /dev/zero > \"$out/{name}\""),
    None => ":".to_string(),
  };

  let script = format!(
    r#"#!/bin/sh
echo "$*" >> '{log}'
echo "{BUILD_LOG_LINE}"
if [ "$1" = "publish" ]; then
  out=""
  while [ $# -gt 0 ]; do
    if [ "$1" = "-o" ]; then out="$2"; fi
    shift
  done
  {make_artifact}
fi
exit {exit_code}
"#,
    log = log.display(),
  );

  let path = dir.join("fake-toolchain.sh");
  std::fs::write(&path, script).unwrap();
  std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
  path
}

#[cfg(windows)]
fn write_script(dir: &Path, log: &Path, exit_code: i32, artifact: Option<(&str, u64)>) -> PathBuf {
  let make_artifact = match artifact {
    Some((name, size)) => format!(
      "if \"%ACTION%\"==\"publish\" if defined OUT (mkdir \"%OUT%\" 2>nul & fsutil file createnew \"%OUT%\\{name}\" {size} >nul)"
    ),
    None => "rem".to_string(),
  };

  let script = format!(
    "@echo off\r\n\
     echo %*>>\"{log}\"\r\n\
     echo {BUILD_LOG_LINE}\r\n\
     set \"ACTION=%~1\"\r\n\
     set \"OUT=\"\r\n\
     :loop\r\n\
     if \"%~1\"==\"\" goto done\r\n\
     if \"%~1\"==\"-o\" set \"OUT=%~2\"\r\n\
     shift\r\n\
     goto loop\r\n\
     :done\r\n\
     {make_artifact}\r\n\
     exit /b {exit_code}\r\n",
    log = log.display(),
  );

  let path = dir.join("fake-toolchain.cmd");
  std::fs::write(&path, script).unwrap();
  path
}
