//! Publish orchestration for pubwin.
//!
//! This module provides the high-level `publish` flow:
//!
//! 1. Resolve the request (derive the runtime identifier and output
//!    directory, apply the trim policy)
//! 2. If cleaning, remove the output directory and run the toolchain's
//!    `clean` action
//! 3. Run the toolchain's `publish` action
//! 4. Probe the output directory for the well-known artifact
//!
//! Any failure in steps 2-3 stops the flow. The probe in step 4 only feeds
//! the report and never fails a successful publish.

use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::artifact::{self, Artifact};
use crate::context::PublishContext;
use crate::error::{PublishError, Result};
use crate::request::{BuildRequest, Configuration, ResolvedRequest};
use crate::target::RuntimeIdentifier;
use crate::toolchain::{self, ChildStdout, Invocation};

/// Everything a publish run will do, computed before any side effect.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublishPlan {
  pub request: ResolvedRequest,
  /// Present only when the request asks for a clean.
  pub clean: Option<Invocation>,
  pub publish: Invocation,
  pub artifact_path: PathBuf,
}

impl PublishPlan {
  /// Toolchain invocations in the order they will run.
  pub fn invocations(&self) -> impl Iterator<Item = &Invocation> {
    self.clean.iter().chain(std::iter::once(&self.publish))
  }
}

/// Result of a successful publish.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublishReport {
  pub output_dir: PathBuf,
  pub runtime_identifier: RuntimeIdentifier,
  pub configuration: Configuration,
  pub self_contained: bool,
  pub self_contained_promoted: bool,
  /// Whether a previous output directory existed and was removed.
  pub removed_output: bool,
  pub artifact: Option<Artifact>,
}

/// Resolve a request into the commands it will run. Pure; touches nothing.
pub fn plan(ctx: &PublishContext, request: &BuildRequest) -> PublishPlan {
  let resolved = request.resolve(&ctx.root);
  let project = ctx.project_path();

  let clean = resolved
    .clean
    .then(|| Invocation::clean(&ctx.toolchain, &project, resolved.configuration));
  let publish = Invocation::publish(&ctx.toolchain, &project, &resolved);
  let artifact_path = ctx.artifact_path(&resolved.output_dir);

  PublishPlan {
    request: resolved,
    clean,
    publish,
    artifact_path,
  }
}

/// Run a previously computed plan.
///
/// The returned report has no artifact yet: callers announce success first and
/// then fill it in with [`find_artifact`].
pub async fn execute(plan: &PublishPlan, stdout: ChildStdout) -> Result<PublishReport> {
  let request = &plan.request;

  let mut removed_output = false;
  if let Some(clean) = &plan.clean {
    removed_output = remove_output_dir(&request.output_dir).await?;
    toolchain::run(clean, stdout).await?;
  }

  toolchain::run(&plan.publish, stdout).await?;
  info!(output = %request.output_dir.display(), "publish succeeded");

  Ok(PublishReport {
    output_dir: request.output_dir.clone(),
    runtime_identifier: request.runtime_identifier,
    configuration: request.configuration,
    self_contained: request.self_contained,
    self_contained_promoted: request.self_contained_promoted,
    removed_output,
    artifact: None,
  })
}

/// Probe for the artifact after a successful publish.
///
/// Only used for reporting, so a probe failure is logged and treated like a
/// missing artifact instead of failing the run.
pub async fn find_artifact(path: &Path) -> Option<Artifact> {
  match artifact::probe(path).await {
    Ok(artifact) => artifact,
    Err(err) => {
      warn!(error = %err, "could not read artifact size");
      None
    }
  }
}

/// Plan, execute, and probe in one step.
pub async fn publish(ctx: &PublishContext, request: &BuildRequest) -> Result<PublishReport> {
  let plan = plan(ctx, request);
  let mut report = execute(&plan, ChildStdout::Inherit).await?;
  report.artifact = find_artifact(&plan.artifact_path).await;
  Ok(report)
}

/// Remove a previous output directory. Returns `false` if there was nothing to remove.
pub async fn remove_output_dir(path: &Path) -> Result<bool> {
  match tokio::fs::remove_dir_all(path).await {
    Ok(()) => {
      info!(path = %path.display(), "removed previous output");
      Ok(true)
    }
    Err(err) if err.kind() == io::ErrorKind::NotFound => {
      debug!(path = %path.display(), "no previous output to remove");
      Ok(false)
    }
    Err(source) => Err(PublishError::RemoveOutput {
      path: path.to_path_buf(),
      source,
    }),
  }
}
