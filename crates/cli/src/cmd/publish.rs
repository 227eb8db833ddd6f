//! Implementation of the publish command.
//!
//! Resolves the request against the workspace, optionally cleans, runs the
//! toolchain's publish action, and reports the output directory and artifact
//! size.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::debug;

use pubwin_lib::context::PublishContext;
use pubwin_lib::publish::{self, PublishPlan, PublishReport};
use pubwin_lib::request::BuildRequest;
use pubwin_lib::toolchain::ChildStdout;

use crate::output::{
  OutputFormat, format_duration, format_mib, print_command, print_info, print_json, print_stat, print_success,
  print_warning,
};

pub struct PublishArgs {
  pub request: BuildRequest,
  pub project: Option<PathBuf>,
  pub artifact: Option<String>,
  pub dry_run: bool,
  pub output: OutputFormat,
}

/// Execute the publish command.
///
/// With `dry_run`, prints the planned toolchain commands and stops before any
/// side effect. Otherwise runs the plan on a single-threaded runtime, prints
/// the summary, then probes for the artifact size. In JSON mode the
/// toolchain's stdout goes to stderr so stdout holds only the report. Errors are returned unchanged so the caller can map
/// toolchain exit codes.
pub fn cmd_publish(args: PublishArgs) -> Result<()> {
  let mut ctx = PublishContext::from_env()?;
  if let Some(project) = args.project {
    ctx = ctx.with_project(project);
  }
  if let Some(artifact) = args.artifact {
    ctx = ctx.with_artifact_name(artifact);
  }
  debug!(root = %ctx.root.display(), toolchain = %ctx.toolchain, "resolved context");

  let plan = publish::plan(&ctx, &args.request);

  if plan.request.self_contained_promoted {
    print_warning("--trimmed requires a self-contained build; enabling --self-contained");
  }

  if args.dry_run {
    return print_plan(&plan, args.output);
  }

  if !args.output.is_json() {
    print_info(&format!(
      "Publishing {} ({}, {})",
      ctx.project_path().display(),
      plan.request.configuration,
      plan.request.runtime_identifier
    ));
  }

  let start = Instant::now();
  let rt = tokio::runtime::Builder::new_current_thread()
    .enable_all()
    .build()
    .context("Failed to create async runtime")?;
  let stdout = if args.output.is_json() {
    ChildStdout::Stderr
  } else {
    ChildStdout::Inherit
  };
  let mut report = rt.block_on(publish::execute(&plan, stdout))?;
  let elapsed = start.elapsed();

  if args.output.is_json() {
    report.artifact = rt.block_on(publish::find_artifact(&plan.artifact_path));
    print_json(&report)?;
  } else {
    print_summary(&report);
    report.artifact = rt.block_on(publish::find_artifact(&plan.artifact_path));
    match &report.artifact {
      Some(artifact) => print_stat("Size", &format_mib(artifact.size_mib)),
      None => debug!(path = %plan.artifact_path.display(), "no artifact size to report"),
    }
    print_stat("Duration", &format_duration(elapsed));
  }

  Ok(())
}

fn print_plan(plan: &PublishPlan, output: OutputFormat) -> Result<()> {
  if output.is_json() {
    return print_json(plan);
  }

  print_info("Dry run - no changes made");
  if plan.request.clean {
    print_command(&format!("remove {}", plan.request.output_dir.display()));
  }
  for invocation in plan.invocations() {
    print_command(&invocation.command_line());
  }
  Ok(())
}

fn print_summary(report: &PublishReport) {
  println!();
  print_success("Publish complete!");
  print_stat("Output", &report.output_dir.display().to_string());
  print_stat("Runtime", &report.runtime_identifier.to_string());
}
