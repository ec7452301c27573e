//! # Dispatch
//!
//! Turns an [`InvocationContext`] into the command line for the target
//! program and runs it. With no caller arguments the GUI receives the
//! captured working directory; otherwise it receives the caller's
//! arguments untouched.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};

use tracing::debug;

use crate::consts::EXIT_PRECONDITION_FAILED;
use crate::context::InvocationContext;
use crate::error::LaunchError;

/// Which path the GUI is being opened on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchTarget {
  /// No arguments were given; the working directory is passed instead
  CurrentDirectory(PathBuf),
  /// Arguments were forwarded; this is the first of them
  Explicit(OsString),
}

/// Fully resolved command line for the target program
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchPlan {
  interpreter: String,
  program: PathBuf,
  args: Vec<OsString>,
  target: LaunchTarget,
}

impl DispatchPlan {
  pub fn from_context(ctx: &InvocationContext) -> Self {
    let target = ctx.launch_target().clone();
    let args = match &target {
      LaunchTarget::CurrentDirectory(cwd) => vec![cwd.clone().into_os_string()],
      LaunchTarget::Explicit(_) => ctx.args().to_vec(),
    };

    Self {
      interpreter: ctx.interpreter().to_string(),
      program: ctx.target_program().to_path_buf(),
      args,
      target,
    }
  }

  /// Arguments passed after the program path
  pub fn args(&self) -> &[OsString] {
    &self.args
  }

  pub fn target(&self) -> &LaunchTarget {
    &self.target
  }

  /// Status line printed right before the hand-off
  pub fn announcement(&self, display_name: &str) -> String {
    match &self.target {
      LaunchTarget::CurrentDirectory(cwd) => {
        format!("Launching {display_name} in current directory: {}", cwd.display())
      }
      LaunchTarget::Explicit(path) => {
        format!("Launching {display_name} with path: {}", path.to_string_lossy())
      }
    }
  }

  /// `<interpreter> <program> <args...>` with inherited stdio
  pub fn command(&self) -> Command {
    let mut cmd = Command::new(&self.interpreter);
    cmd
      .arg(&self.program)
      .args(&self.args)
      .stdin(Stdio::inherit())
      .stdout(Stdio::inherit())
      .stderr(Stdio::inherit());
    cmd
  }

  /// Run the target program and wait for it to exit
  pub fn execute(&self) -> Result<ExitStatus, LaunchError> {
    debug!(
      "Executing {} {} {:?}",
      self.interpreter,
      self.program.display(),
      self.args
    );

    self.command().status().map_err(|source| LaunchError::Spawn {
      interpreter: self.interpreter.clone(),
      program: self.program.clone(),
      source,
    })
  }
}

/// Exit code the launcher reports for a finished target program
///
/// A target killed by a signal has no code and is reported as a failure.
pub fn exit_code_for(status: ExitStatus) -> i32 {
  status.code().unwrap_or(EXIT_PRECONDITION_FAILED)
}
