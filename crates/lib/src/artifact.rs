//! Post-build artifact probing.

use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::error::{PublishError, Result};

pub const BYTES_PER_MIB: f64 = 1_048_576.0;

/// The well-known executable found after a successful publish.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Artifact {
  pub path: PathBuf,
  pub bytes: u64,
  /// `bytes` in mebibytes, rounded to two decimal places.
  pub size_mib: f64,
}

/// Convert a byte count to mebibytes rounded to two decimal places.
pub fn mebibytes(bytes: u64) -> f64 {
  (bytes as f64 / BYTES_PER_MIB * 100.0).round() / 100.0
}

/// Look for the artifact at `path`. A missing file is not an error.
pub async fn probe(path: &Path) -> Result<Option<Artifact>> {
  let metadata = match tokio::fs::metadata(path).await {
    Ok(metadata) => metadata,
    Err(err) if err.kind() == io::ErrorKind::NotFound => {
      debug!(path = %path.display(), "no artifact found");
      return Ok(None);
    }
    Err(source) => {
      return Err(PublishError::Artifact {
        path: path.to_path_buf(),
        source,
      });
    }
  };

  if !metadata.is_file() {
    debug!(path = %path.display(), "artifact path is not a file");
    return Ok(None);
  }

  let bytes = metadata.len();
  Ok(Some(Artifact {
    path: path.to_path_buf(),
    bytes,
    size_mib: mebibytes(bytes),
  }))
}
