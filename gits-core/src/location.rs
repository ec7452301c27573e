//! # Launcher Location
//!
//! Resolves the directory the launcher runs from and the target program
//! path derived from it. The directory always comes from the running
//! executable; nothing here searches other locations.

use std::env;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::LaunchError;

/// Directory containing the running launcher executable
pub fn resolve_launcher_dir() -> Result<PathBuf, LaunchError> {
  let exe = env::current_exe().map_err(LaunchError::LauncherLocation)?;
  // Resolve symlinks so a linked launcher still finds its real siblings
  let exe = exe.canonicalize().unwrap_or(exe);
  debug!("Launcher executable: {}", exe.display());
  launcher_dir_from_exe(&exe)
}

/// Parent directory of an executable path, in canonical form
pub fn launcher_dir_from_exe(exe: &Path) -> Result<PathBuf, LaunchError> {
  let parent = exe.parent().filter(|p| !p.as_os_str().is_empty()).ok_or_else(|| {
    LaunchError::LauncherLocation(std::io::Error::new(
      std::io::ErrorKind::NotFound,
      format!("{} has no parent directory", exe.display()),
    ))
  })?;

  Ok(strip_trailing_separator(parent))
}

/// Drop trailing separators while keeping a bare root intact
pub fn strip_trailing_separator(path: &Path) -> PathBuf {
  // Rebuilding from components normalizes `a/b/` and `a//b` to `a/b`
  path.components().collect()
}

/// Path the target program is expected at
pub fn target_program_path(launcher_dir: &Path, filename: &str) -> PathBuf {
  launcher_dir.join(filename)
}

/// Fail unless the target program exists as a file
pub fn ensure_target_exists(launcher_dir: &Path, filename: &str) -> Result<PathBuf, LaunchError> {
  let expected = target_program_path(launcher_dir, filename);

  if expected.is_file() {
    debug!("Found target program at {}", expected.display());
    Ok(expected)
  } else {
    Err(LaunchError::TargetMissing {
      filename: filename.to_string(),
      directory: launcher_dir.to_path_buf(),
      expected,
    })
  }
}

#[cfg(test)]
mod tests {
  use std::fs;

  use tempfile::TempDir;

  use super::*;

  #[test]
  fn test_launcher_dir_from_exe() {
    let exe = Path::new("/opt/gits/bin/gits");
    assert_eq!(launcher_dir_from_exe(exe).unwrap(), PathBuf::from("/opt/gits/bin"));
  }

  #[test]
  fn test_launcher_dir_from_bare_name_fails() {
    let err = launcher_dir_from_exe(Path::new("gits")).unwrap_err();
    assert!(matches!(err, LaunchError::LauncherLocation(_)));
  }

  #[cfg(unix)]
  #[test]
  fn test_strip_trailing_separator() {
    assert_eq!(strip_trailing_separator(Path::new("/opt/gits/")), PathBuf::from("/opt/gits"));
    assert_eq!(strip_trailing_separator(Path::new("/opt//gits")), PathBuf::from("/opt/gits"));
    assert_eq!(strip_trailing_separator(Path::new("/")), PathBuf::from("/"));
    assert_eq!(
      strip_trailing_separator(Path::new("/opt/gits/")).to_string_lossy(),
      "/opt/gits"
    );
  }

  #[test]
  fn test_resolve_launcher_dir_contains_current_exe() {
    let dir = resolve_launcher_dir().unwrap();
    let exe = env::current_exe().unwrap().canonicalize().unwrap();
    assert_eq!(exe.parent().unwrap(), dir);
  }

  #[test]
  fn test_ensure_target_exists() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("git_python_gui.py"), "print('hi')\n").unwrap();

    let found = ensure_target_exists(temp_dir.path(), "git_python_gui.py").unwrap();
    assert_eq!(found, temp_dir.path().join("git_python_gui.py"));
  }

  #[test]
  fn test_ensure_target_missing_reports_expected_path() {
    let temp_dir = TempDir::new().unwrap();

    let err = ensure_target_exists(temp_dir.path(), "git_python_gui.py").unwrap_err();
    match err {
      LaunchError::TargetMissing {
        filename,
        directory,
        expected,
      } => {
        assert_eq!(filename, "git_python_gui.py");
        assert_eq!(directory, temp_dir.path());
        assert_eq!(expected, temp_dir.path().join("git_python_gui.py"));
      }
      other => panic!("unexpected error: {other}"),
    }
  }

  #[test]
  fn test_directory_named_like_target_is_not_accepted() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir(temp_dir.path().join("git_python_gui.py")).unwrap();

    assert!(ensure_target_exists(temp_dir.path(), "git_python_gui.py").is_err());
  }
}
