//! # Invocation Context
//!
//! Runs the precondition gates in order and, when all pass, produces the
//! [`InvocationContext`] the dispatch step consumes. Each gate fails fast;
//! nothing is retried.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::LauncherConfig;
use crate::dispatch::LaunchTarget;
use crate::error::LaunchError;
use crate::location::ensure_target_exists;
use crate::probe::{Probe, check_dependency, discover_interpreter};

/// Everything needed to hand off to the target program
///
/// Built once per invocation and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationContext {
  launcher_dir: PathBuf,
  interpreter: String,
  target_program: PathBuf,
  args: Vec<OsString>,
  launch_target: LaunchTarget,
}

impl InvocationContext {
  /// Directory the launcher runs from
  pub fn launcher_dir(&self) -> &Path {
    &self.launcher_dir
  }

  /// Interpreter command that passed discovery
  pub fn interpreter(&self) -> &str {
    &self.interpreter
  }

  /// Absolute path of the target program
  pub fn target_program(&self) -> &Path {
    &self.target_program
  }

  /// Caller arguments, exactly as received
  pub fn args(&self) -> &[OsString] {
    &self.args
  }

  /// Path the GUI opens: the captured working directory when no arguments
  /// were given, otherwise the first argument
  pub fn launch_target(&self) -> &LaunchTarget {
    &self.launch_target
  }
}

/// Precondition gates bound to a configuration and a probe
pub struct Launcher<'a, P: Probe + ?Sized> {
  config: &'a LauncherConfig,
  probe: &'a P,
  launcher_dir: PathBuf,
}

impl<'a, P: Probe + ?Sized> Launcher<'a, P> {
  pub fn new(config: &'a LauncherConfig, probe: &'a P, launcher_dir: PathBuf) -> Self {
    Self {
      config,
      probe,
      launcher_dir,
    }
  }

  /// Run every gate and build the context for dispatch
  ///
  /// `current_dir` is the result of reading the working directory once at
  /// start. It only matters when `args` is empty, and a failed read is only
  /// reported after every other gate has passed.
  pub fn prepare(
    &self,
    args: Vec<OsString>,
    current_dir: io::Result<PathBuf>,
  ) -> Result<InvocationContext, LaunchError> {
    let target_program = ensure_target_exists(&self.launcher_dir, &self.config.target_filename)?;
    let interpreter = discover_interpreter(self.probe, self.config)?;
    check_dependency(self.probe, &interpreter, self.config)?;

    let launch_target = match args.first() {
      Some(first) => LaunchTarget::Explicit(first.clone()),
      None => LaunchTarget::CurrentDirectory(current_dir.map_err(LaunchError::WorkingDirectory)?),
    };

    info!(
      "Preconditions met: {} {} ({} argument(s))",
      interpreter,
      target_program.display(),
      args.len()
    );

    Ok(InvocationContext {
      launcher_dir: self.launcher_dir.clone(),
      interpreter,
      target_program,
      args,
      launch_target,
    })
  }
}

#[cfg(test)]
mod tests {
  use std::fs;

  use tempfile::TempDir;

  use super::*;
  use crate::probe::fake::FakeProbe;

  fn install_target(dir: &Path) {
    fs::write(dir.join("git_python_gui.py"), "import sys\n").unwrap();
  }

  fn config() -> LauncherConfig {
    LauncherConfig::default().with_interpreter_candidates(["python3", "python"])
  }

  fn ready_probe() -> FakeProbe {
    FakeProbe::default()
      .with_interpreter("python3", "Python 3.11.4")
      .with_module("python3", "git")
  }

  #[test]
  fn test_prepare_success() {
    let temp_dir = TempDir::new().unwrap();
    install_target(temp_dir.path());
    let config = config();
    let probe = ready_probe();

    let launcher = Launcher::new(&config, &probe, temp_dir.path().to_path_buf());
    let ctx = launcher
      .prepare(vec![OsString::from("/tmp/repo")], Ok(PathBuf::from("/home/user")))
      .unwrap();

    assert_eq!(ctx.interpreter(), "python3");
    assert_eq!(ctx.target_program(), temp_dir.path().join("git_python_gui.py"));
    assert_eq!(ctx.launcher_dir(), temp_dir.path());
    assert_eq!(ctx.args(), &[OsString::from("/tmp/repo")]);
    assert_eq!(ctx.launch_target(), &LaunchTarget::Explicit(OsString::from("/tmp/repo")));
  }

  #[test]
  fn test_missing_target_stops_before_probing() {
    let temp_dir = TempDir::new().unwrap();
    let config = config();
    let probe = ready_probe();

    let launcher = Launcher::new(&config, &probe, temp_dir.path().to_path_buf());
    let err = launcher.prepare(Vec::new(), Ok(PathBuf::from("/"))).unwrap_err();

    assert!(matches!(err, LaunchError::TargetMissing { .. }));
    assert!(probe.calls.borrow().is_empty());
  }

  #[test]
  fn test_missing_interpreter_skips_import_check() {
    let temp_dir = TempDir::new().unwrap();
    install_target(temp_dir.path());
    let config = config();
    let probe = FakeProbe::default();

    let launcher = Launcher::new(&config, &probe, temp_dir.path().to_path_buf());
    let err = launcher.prepare(Vec::new(), Ok(PathBuf::from("/"))).unwrap_err();

    assert!(matches!(err, LaunchError::InterpreterMissing { .. }));
    assert!(probe.calls.borrow().iter().all(|call| call.starts_with("version:")));
  }

  #[test]
  fn test_missing_dependency() {
    let temp_dir = TempDir::new().unwrap();
    install_target(temp_dir.path());
    let config = config();
    let probe = FakeProbe::default().with_interpreter("python", "Python 3.9.0");

    let launcher = Launcher::new(&config, &probe, temp_dir.path().to_path_buf());
    let err = launcher.prepare(Vec::new(), Ok(PathBuf::from("/"))).unwrap_err();

    assert!(matches!(err, LaunchError::DependencyMissing { ref interpreter, .. } if interpreter == "python"));
    assert_eq!(err.hint().unwrap(), "Please install it with: pip install GitPython");
  }

  #[test]
  fn test_prepare_is_repeatable() {
    let temp_dir = TempDir::new().unwrap();
    install_target(temp_dir.path());
    let config = config();
    let probe = ready_probe();
    let launcher = Launcher::new(&config, &probe, temp_dir.path().to_path_buf());

    let first = launcher.prepare(vec![OsString::from("a")], Ok(PathBuf::from("/w"))).unwrap();
    let second = launcher.prepare(vec![OsString::from("a")], Ok(PathBuf::from("/w"))).unwrap();
    assert_eq!(first, second);
  }

  fn unreadable_cwd() -> io::Result<PathBuf> {
    Err(io::Error::new(io::ErrorKind::NotFound, "No such file or directory"))
  }

  #[test]
  fn test_unreadable_cwd_ignored_with_arguments() {
    let temp_dir = TempDir::new().unwrap();
    install_target(temp_dir.path());
    let config = config();
    let probe = ready_probe();

    let launcher = Launcher::new(&config, &probe, temp_dir.path().to_path_buf());
    let ctx = launcher
      .prepare(vec![OsString::from("/tmp/repo")], unreadable_cwd())
      .unwrap();
    assert_eq!(ctx.launch_target(), &LaunchTarget::Explicit(OsString::from("/tmp/repo")));
  }

  #[test]
  fn test_unreadable_cwd_fails_without_arguments() {
    let temp_dir = TempDir::new().unwrap();
    install_target(temp_dir.path());
    let config = config();
    let probe = ready_probe();

    let launcher = Launcher::new(&config, &probe, temp_dir.path().to_path_buf());
    let err = launcher.prepare(Vec::new(), unreadable_cwd()).unwrap_err();
    assert!(matches!(err, LaunchError::WorkingDirectory(_)));
    assert_eq!(err.exit_code(), 1);
  }

  #[test]
  fn test_missing_target_reported_before_unreadable_cwd() {
    let temp_dir = TempDir::new().unwrap();
    let config = config();
    let probe = ready_probe();

    let launcher = Launcher::new(&config, &probe, temp_dir.path().to_path_buf());
    let err = launcher.prepare(Vec::new(), unreadable_cwd()).unwrap_err();
    assert!(matches!(err, LaunchError::TargetMissing { .. }));
  }
}
