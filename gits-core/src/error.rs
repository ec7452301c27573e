//! # Launch Errors
//!
//! Every way the launcher can fail before handing off to the GUI. All of
//! them are fatal for the invocation and map to the same exit code; the
//! variants exist so each failure carries its own actionable hint.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::consts::EXIT_PRECONDITION_FAILED;

/// Errors raised by the precondition gates and the dispatch step
#[derive(Debug, Error)]
pub enum LaunchError {
  #[error("{filename} not found in {}", .directory.display())]
  TargetMissing {
    filename: String,
    directory: PathBuf,
    expected: PathBuf,
  },

  #[error("Python 3 is not installed or not in PATH (tried: {})", .candidates.join(", "))]
  InterpreterMissing {
    candidates: Vec<String>,
    download_url: String,
  },

  #[error("{package} is not installed for {interpreter} (could not import '{module}')")]
  DependencyMissing {
    interpreter: String,
    module: String,
    package: String,
  },

  #[error("Could not determine the launcher location: {0}")]
  LauncherLocation(#[source] io::Error),

  #[error("Could not determine the current directory: {0}")]
  WorkingDirectory(#[source] io::Error),

  #[error("Failed to start {interpreter} {}: {source}", .program.display())]
  Spawn {
    interpreter: String,
    program: PathBuf,
    #[source]
    source: io::Error,
  },
}

impl LaunchError {
  /// Process exit code for this failure
  pub const fn exit_code(&self) -> i32 {
    EXIT_PRECONDITION_FAILED
  }

  /// Follow-up advice printed after the error line
  pub fn hint(&self) -> Option<String> {
    match self {
      LaunchError::TargetMissing { expected, .. } => Some(format!("Expected location: {}", expected.display())),
      LaunchError::InterpreterMissing { download_url, .. } => {
        Some(format!("Please install Python 3 from {download_url}"))
      }
      LaunchError::DependencyMissing { package, .. } => Some(format!("Please install it with: pip install {package}")),
      LaunchError::LauncherLocation(_) | LaunchError::WorkingDirectory(_) | LaunchError::Spawn { .. } => None,
    }
  }
}
