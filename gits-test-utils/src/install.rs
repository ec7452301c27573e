//! Relocated launcher installs for testing
//!
//! The launcher finds the GUI next to its own executable, so integration
//! tests copy the built binary into a temporary directory and control what
//! sits beside it.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

/// File name the launcher looks for next to itself
pub const TARGET_PROGRAM: &str = "git_python_gui.py";

/// A copy of the launcher binary in its own temporary directory
pub struct LauncherInstall {
  /// The directory holding the launcher copy
  pub temp_dir: TempDir,
  /// Path of the copied launcher executable
  pub exe: PathBuf,
}

impl LauncherInstall {
  /// Copy `binary` into a fresh directory, without a GUI stub
  pub fn new(binary: &Path) -> Result<Self> {
    let temp_dir = TempDir::new().context("Failed to create install directory")?;
    let file_name = binary
      .file_name()
      .with_context(|| format!("{} has no file name", binary.display()))?;
    let exe = temp_dir.path().join(file_name);

    // fs::copy carries the executable bit across
    fs::copy(binary, &exe).with_context(|| format!("Failed to copy launcher to {}", exe.display()))?;

    Ok(Self { temp_dir, exe })
  }

  /// Copy `binary` and place a GUI stub beside it
  pub fn with_target(binary: &Path) -> Result<Self> {
    let install = Self::new(binary)?;
    fs::write(install.target_path(), "import sys\nprint(sys.argv)\n").context("Failed to write GUI stub")?;
    Ok(install)
  }

  /// Directory the launcher will resolve as its own
  pub fn dir(&self) -> PathBuf {
    // Canonical, matching what the launcher computes from current_exe
    self
      .temp_dir
      .path()
      .canonicalize()
      .unwrap_or_else(|_| self.temp_dir.path().to_path_buf())
  }

  /// Where the launcher expects the GUI
  pub fn target_path(&self) -> PathBuf {
    self.dir().join(TARGET_PROGRAM)
  }
}
