mod cmd;
mod output;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use pubwin_lib::error::{EXIT_FAILURE, PublishError};
use pubwin_lib::request::{BuildRequest, Configuration};
use pubwin_lib::target::Architecture;

use crate::cmd::PublishArgs;
use crate::output::{OutputFormat, print_error};

/// pubwin - publish a project for a Windows runtime
///
/// Trimming only works on self-contained output: `--trimmed` without
/// `--self-contained` turns self-contained on and prints a warning.
#[derive(Parser)]
#[command(name = "pubwin")]
#[command(author, version, about, long_about)]
struct Cli {
  /// Build configuration [possible values: Debug, Release]
  #[arg(short, long, default_value = "Release")]
  configuration: Configuration,

  /// Target architecture [possible values: x64, x86, arm64]
  #[arg(short, long, default_value = "x64")]
  architecture: Architecture,

  /// Bundle the runtime with the output
  #[arg(long)]
  self_contained: bool,

  /// Merge the output into a single executable
  #[arg(long)]
  single_file: bool,

  /// Trim unused code (implies --self-contained)
  #[arg(long)]
  trimmed: bool,

  /// Output directory (default: <root>/artifacts/win-<arch>)
  #[arg(short, long)]
  output_dir: Option<PathBuf>,

  /// Remove previous output and run the toolchain's clean first
  #[arg(long)]
  clean: bool,

  /// Project to publish, relative to the root (default: src/App/App.csproj)
  #[arg(long)]
  project: Option<PathBuf>,

  /// Artifact to report the size of after a successful publish (default: App.exe)
  #[arg(long)]
  artifact: Option<String>,

  /// Print the commands that would run without running them
  #[arg(long)]
  dry_run: bool,

  /// Output format
  #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
  format: OutputFormat,

  /// Enable verbose output
  #[arg(short, long)]
  verbose: bool,
}

impl Cli {
  fn request(&self) -> BuildRequest {
    BuildRequest {
      configuration: self.configuration,
      architecture: self.architecture,
      self_contained: self.self_contained,
      single_file: self.single_file,
      trimmed: self.trimmed,
      output_dir: self.output_dir.clone(),
      clean: self.clean,
    }
  }
}

fn main() {
  let cli = Cli::parse();

  let filter = if cli.verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::from_default_env()
  };
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let args = PublishArgs {
    request: cli.request(),
    project: cli.project,
    artifact: cli.artifact,
    dry_run: cli.dry_run,
    output: cli.format,
  };

  if let Err(err) = cmd::cmd_publish(args) {
    std::process::exit(report_failure(&err));
  }
}

/// Print a failure and return the exit code to leave with.
///
/// Toolchain failures keep the toolchain's own code unchanged, including
/// Windows codes above 255 or negative as `i32`.
fn report_failure(err: &anyhow::Error) -> i32 {
  match err.downcast_ref::<PublishError>() {
    Some(PublishError::ToolchainFailed { action, code }) => {
      print_error(&format!("{} failed (exit code {})", action, code));
      *code
    }
    Some(publish_err) => {
      print_error(&publish_err.to_string());
      publish_err.exit_code()
    }
    None => {
      print_error(&format!("{:#}", err));
      EXIT_FAILURE
    }
  }
}
