//! Toolchain invocation.
//!
//! This module assembles the argument lists for the toolchain's `clean` and
//! `publish` actions and runs them with the caller's standard streams. Only
//! the exit status is consulted; output is never captured.

use std::fmt;
use std::io;
use std::path::Path;
use std::process::Stdio;

use serde::Serialize;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::error::{PublishError, Result};
use crate::request::{Configuration, ResolvedRequest};

/// Property flags that turn on single-file output. Always emitted as a pair.
pub const SINGLE_FILE_FLAGS: [&str; 2] = [
  "-p:PublishSingleFile=true",
  "-p:IncludeNativeLibrariesForSelfExtract=true",
];

pub const TRIM_FLAG: &str = "-p:PublishTrimmed=true";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolchainAction {
  Clean,
  Publish,
}

impl ToolchainAction {
  /// The toolchain verb for this action
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Clean => "clean",
      Self::Publish => "publish",
    }
  }
}

impl fmt::Display for ToolchainAction {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// A single toolchain command: program plus its full argument list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Invocation {
  pub action: ToolchainAction,
  pub program: String,
  pub args: Vec<String>,
}

impl Invocation {
  pub fn clean(program: &str, project: &Path, configuration: Configuration) -> Self {
    Self {
      action: ToolchainAction::Clean,
      program: program.to_string(),
      args: clean_args(project, configuration),
    }
  }

  pub fn publish(program: &str, project: &Path, request: &ResolvedRequest) -> Self {
    Self {
      action: ToolchainAction::Publish,
      program: program.to_string(),
      args: publish_args(project, request),
    }
  }

  /// Render as a shell-like command line for display. Arguments containing
  /// whitespace are double-quoted.
  pub fn command_line(&self) -> String {
    std::iter::once(self.program.as_str())
      .chain(self.args.iter().map(String::as_str))
      .map(|part| {
        if part.is_empty() || part.chars().any(char::is_whitespace) {
          format!("\"{}\"", part)
        } else {
          part.to_string()
        }
      })
      .collect::<Vec<_>>()
      .join(" ")
  }
}

/// Arguments for `clean <project> -c <configuration>`.
pub fn clean_args(project: &Path, configuration: Configuration) -> Vec<String> {
  vec![
    ToolchainAction::Clean.as_str().to_string(),
    project.display().to_string(),
    "-c".to_string(),
    configuration.to_string(),
  ]
}

/// Arguments for `publish`, in a fixed order:
///
/// `publish <project> -c <cfg> -r <rid> -o <dir> --self-contained <bool>`,
/// then the single-file pair if requested, then the trim flag if requested.
pub fn publish_args(project: &Path, request: &ResolvedRequest) -> Vec<String> {
  let mut args = vec![
    ToolchainAction::Publish.as_str().to_string(),
    project.display().to_string(),
    "-c".to_string(),
    request.configuration.to_string(),
    "-r".to_string(),
    request.runtime_identifier.to_string(),
    "-o".to_string(),
    request.output_dir.display().to_string(),
    "--self-contained".to_string(),
    request.self_contained.to_string(),
  ];

  if request.single_file {
    args.extend(SINGLE_FILE_FLAGS.iter().map(|flag| flag.to_string()));
  }

  if request.trimmed {
    args.push(TRIM_FLAG.to_string());
  }

  args
}

/// Where the toolchain's standard output goes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChildStdout {
  /// Share this process's stdout.
  #[default]
  Inherit,
  /// Send it to this process's stderr, keeping stdout free for machine-readable output.
  Stderr,
}

impl ChildStdout {
  fn stdio(self) -> Stdio {
    match self {
      Self::Inherit => Stdio::inherit(),
      Self::Stderr => Stdio::from(std::io::stderr()),
    }
  }
}

/// Run an invocation to completion. Stdin and stderr are inherited; stdout
/// follows `stdout`.
///
/// The child is killed if this future is dropped, and on Ctrl-C (or SIGTERM on
/// unix) it is killed and reaped before returning [`PublishError::Interrupted`].
pub async fn run(invocation: &Invocation, stdout: ChildStdout) -> Result<()> {
  let action = invocation.action;
  info!(action = %action, program = %invocation.program, "running toolchain");
  debug!(args = ?invocation.args, "toolchain arguments");

  let mut child = Command::new(&invocation.program)
    .args(&invocation.args)
    .stdin(Stdio::inherit())
    .stdout(stdout.stdio())
    .stderr(Stdio::inherit())
    .kill_on_drop(true)
    .spawn()
    .map_err(|source| spawn_error(&invocation.program, source))?;

  let waited = tokio::select! {
    status = child.wait() => Some(status),
    _ = shutdown_signal() => None,
  };

  let Some(status) = waited else {
    warn!(action = %action, "termination signal received, stopping toolchain");
    if let Err(err) = child.kill().await {
      debug!(error = %err, "failed to kill toolchain process");
    }
    return Err(PublishError::Interrupted { action });
  };
  let status = status.map_err(|source| spawn_error(&invocation.program, source))?;

  debug!(action = %action, status = %status, "toolchain exited");

  if status.success() {
    return Ok(());
  }

  match status.code() {
    Some(code) => Err(PublishError::ToolchainFailed { action, code }),
    None => Err(PublishError::ToolchainKilled { action }),
  }
}

fn spawn_error(program: &str, source: io::Error) -> PublishError {
  if source.kind() == io::ErrorKind::NotFound {
    PublishError::ToolchainNotFound {
      program: program.to_string(),
    }
  } else {
    PublishError::Spawn {
      program: program.to_string(),
      source,
    }
  }
}

/// Resolves when the process is asked to stop. Never resolves if no handler
/// could be installed.
async fn shutdown_signal() {
  #[cfg(unix)]
  {
    use tokio::signal::unix::{SignalKind, signal};

    match signal(SignalKind::terminate()) {
      Ok(mut terminate) => {
        tokio::select! {
          _ = ctrl_c() => {}
          _ = terminate.recv() => {}
        }
      }
      Err(err) => {
        debug!(error = %err, "could not install SIGTERM handler");
        ctrl_c().await;
      }
    }
  }

  #[cfg(not(unix))]
  {
    ctrl_c().await;
  }
}

async fn ctrl_c() {
  if let Err(err) = tokio::signal::ctrl_c().await {
    debug!(error = %err, "could not install Ctrl-C handler");
    std::future::pending::<()>().await;
  }
}
