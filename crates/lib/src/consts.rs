/// Platform half of every runtime identifier (`win-x64`, `win-arm64`, ...).
pub const PLATFORM_TAG: &str = "win";

/// Directory under the workspace root that holds per-runtime output.
pub const ARTIFACTS_DIR: &str = "artifacts";

/// Project built when `--project` is not given, relative to the root.
pub const DEFAULT_PROJECT: &str = "src/App/App.csproj";

/// Executable probed in the output directory after a successful publish.
pub const DEFAULT_ARTIFACT: &str = "App.exe";

/// Toolchain program used when `PUBWIN_TOOLCHAIN` is unset.
pub const DEFAULT_TOOLCHAIN: &str = "dotnet";

pub const ROOT_ENV: &str = "PUBWIN_ROOT";
pub const TOOLCHAIN_ENV: &str = "PUBWIN_TOOLCHAIN";
