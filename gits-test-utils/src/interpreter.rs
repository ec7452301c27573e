//! Fake Python interpreters for testing
//!
//! Each fake is a POSIX shell script that answers `--version` and
//! `-c "import ..."` the way its configuration says, and otherwise acts as
//! the GUI: it echoes the program path and every argument it received as
//! `PROGRAM:` / `ARG:` lines on stdout, then exits with a chosen code.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

/// Version banner printed by responsive fakes
pub const FAKE_VERSION_BANNER: &str = "Python 3.11.4 (gits-test)";

/// Noise a failing import prints, which the launcher must swallow
pub const FAKE_IMPORT_ERROR: &str = "ModuleNotFoundError: No module named 'git'";

/// Behaviour of one fake interpreter command
#[derive(Debug, Clone)]
pub struct FakeInterpreter {
  name: String,
  responds_to_version: bool,
  can_import: bool,
  exit_code: i32,
}

impl FakeInterpreter {
  /// A working interpreter with the dependency installed
  pub fn new(name: &str) -> Self {
    Self {
      name: name.to_string(),
      responds_to_version: true,
      can_import: true,
      exit_code: 0,
    }
  }

  /// Present on PATH but fails its version query
  pub fn broken(mut self) -> Self {
    self.responds_to_version = false;
    self
  }

  /// Runs, but every import fails
  pub fn without_dependency(mut self) -> Self {
    self.can_import = false;
    self
  }

  /// Exit code used when acting as the GUI
  pub fn exiting_with(mut self, code: i32) -> Self {
    self.exit_code = code;
    self
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  /// Shell source for this fake
  pub fn script(&self) -> String {
    let version = if self.responds_to_version {
      format!("echo \"{FAKE_VERSION_BANNER}\"; exit 0")
    } else {
      "echo \"not a python\" >&2; exit 9".to_string()
    };
    let import = if self.can_import {
      "exit 0".to_string()
    } else {
      format!("echo \"{FAKE_IMPORT_ERROR}\" >&2; exit 1")
    };

    format!(
      "#!/bin/sh\n\
       case \"$1\" in\n\
       \x20 --version) {version} ;;\n\
       \x20 -c) {import} ;;\n\
       esac\n\
       printf 'PROGRAM:%s\\n' \"$1\"\n\
       shift\n\
       for arg in \"$@\"; do\n\
       \x20 printf 'ARG:%s\\n' \"$arg\"\n\
       done\n\
       exit {}\n",
      self.exit_code
    )
  }

  /// Write the script into `dir` as an executable file
  pub fn install_into(&self, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(&self.name);
    fs::write(&path, self.script()).with_context(|| format!("Failed to write {}", path.display()))?;

    #[cfg(unix)]
    {
      use std::os::unix::fs::PermissionsExt;
      fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
        .with_context(|| format!("Failed to make {} executable", path.display()))?;
    }

    Ok(path)
  }
}

/// A temporary directory of fake interpreters, used as the whole `PATH`
pub struct InterpreterDir {
  pub temp_dir: TempDir,
}

impl InterpreterDir {
  /// Create a directory holding `interpreters`; an empty list gives a `PATH`
  /// where no interpreter resolves
  pub fn new(interpreters: &[FakeInterpreter]) -> Result<Self> {
    let temp_dir = TempDir::new().context("Failed to create interpreter directory")?;
    for interpreter in interpreters {
      interpreter.install_into(temp_dir.path())?;
    }
    Ok(Self { temp_dir })
  }

  pub fn path(&self) -> &Path {
    self.temp_dir.path()
  }
}

/// Pull the `ARG:` lines a fake printed while acting as the GUI
pub fn parse_forwarded_args(stdout: &str) -> Vec<String> {
  stdout
    .lines()
    .filter_map(|line| line.strip_prefix("ARG:"))
    .map(str::to_string)
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_script_reflects_behaviour() {
    let ok = FakeInterpreter::new("python3").script();
    assert!(ok.starts_with("#!/bin/sh\n"));
    assert!(ok.contains(FAKE_VERSION_BANNER));
    assert!(ok.ends_with("exit 0\n"));

    let no_dep = FakeInterpreter::new("python3").without_dependency().exiting_with(4).script();
    assert!(no_dep.contains(FAKE_IMPORT_ERROR));
    assert!(no_dep.ends_with("exit 4\n"));
  }

  #[test]
  fn test_parse_forwarded_args() {
    let stdout = "PROGRAM:/x/git_python_gui.py\nARG:/tmp/repo\nARG:--flag\nother\nARG:\n";
    assert_eq!(parse_forwarded_args(stdout), vec!["/tmp/repo", "--flag", ""]);
  }

  #[test]
  fn test_interpreter_dir_installs_scripts() {
    let dir = InterpreterDir::new(&[FakeInterpreter::new("python3"), FakeInterpreter::new("python")]).unwrap();
    assert!(dir.path().join("python3").is_file());
    assert!(dir.path().join("python").is_file());
  }
}
