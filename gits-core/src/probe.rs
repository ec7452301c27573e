//! # Capability Probes
//!
//! Silent checks against the host: does an interpreter respond, and can it
//! import a module. Probe output is captured or discarded, never shown to
//! the user; the launcher prints its own messages based on the result.

use std::process::{Command, Stdio};

use tracing::{debug, trace};

use crate::config::LauncherConfig;
use crate::error::LaunchError;

/// Host capability checks used by the precondition gates
pub trait Probe {
  /// Version banner of `interpreter`, or `None` if it cannot be run
  fn interpreter_version(&self, interpreter: &str) -> Option<String>;

  /// Whether `interpreter` can import `module`
  fn can_import(&self, interpreter: &str, module: &str) -> bool;

  /// Whether `interpreter` responds to a version query
  fn interpreter_available(&self, interpreter: &str) -> bool {
    self.interpreter_version(interpreter).is_some()
  }
}

/// Probes that spawn real processes, resolved through `PATH`
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProbe;

impl Probe for SystemProbe {
  fn interpreter_version(&self, interpreter: &str) -> Option<String> {
    let output = Command::new(interpreter)
      .arg("--version")
      .stdin(Stdio::null())
      .output()
      .inspect_err(|e| trace!("{interpreter} --version failed to start: {e}"))
      .ok()?;

    if !output.status.success() {
      trace!("{interpreter} --version exited with {}", output.status);
      return None;
    }

    // Older interpreters print the banner to stderr
    let banner = if output.stdout.is_empty() {
      String::from_utf8_lossy(&output.stderr)
    } else {
      String::from_utf8_lossy(&output.stdout)
    };

    Some(banner.trim().to_string())
  }

  fn can_import(&self, interpreter: &str, module: &str) -> bool {
    Command::new(interpreter)
      .args(["-c", &format!("import {module}")])
      .stdin(Stdio::null())
      .stdout(Stdio::null())
      .stderr(Stdio::null())
      .status()
      .map(|status| status.success())
      .unwrap_or(false)
  }
}

/// First candidate interpreter that responds to a version query
pub fn discover_interpreter<P: Probe + ?Sized>(probe: &P, config: &LauncherConfig) -> Result<String, LaunchError> {
  for candidate in &config.interpreter_candidates {
    if probe.interpreter_available(candidate) {
      debug!("Using interpreter '{candidate}'");
      return Ok(candidate.clone());
    }
    debug!("Interpreter '{candidate}' not available");
  }

  Err(LaunchError::InterpreterMissing {
    candidates: config.interpreter_candidates.clone(),
    download_url: config.interpreter_download_url.clone(),
  })
}

/// Fail unless `interpreter` can import the required module
pub fn check_dependency<P: Probe + ?Sized>(
  probe: &P,
  interpreter: &str,
  config: &LauncherConfig,
) -> Result<(), LaunchError> {
  if probe.can_import(interpreter, &config.required_module) {
    debug!("'{}' is importable with {interpreter}", config.required_module);
    Ok(())
  } else {
    Err(LaunchError::DependencyMissing {
      interpreter: interpreter.to_string(),
      module: config.required_module.clone(),
      package: config.required_package.clone(),
    })
  }
}

#[cfg(test)]
pub(crate) mod fake {
  use std::cell::RefCell;
  use std::collections::HashMap;

  use super::Probe;

  /// In-memory probe recording every call it receives
  #[derive(Debug, Default)]
  pub struct FakeProbe {
    pub versions: HashMap<String, String>,
    pub importable: Vec<(String, String)>,
    pub calls: RefCell<Vec<String>>,
  }

  impl FakeProbe {
    pub fn with_interpreter(mut self, name: &str, version: &str) -> Self {
      self.versions.insert(name.to_string(), version.to_string());
      self
    }

    pub fn with_module(mut self, interpreter: &str, module: &str) -> Self {
      self.importable.push((interpreter.to_string(), module.to_string()));
      self
    }
  }

  impl Probe for FakeProbe {
    fn interpreter_version(&self, interpreter: &str) -> Option<String> {
      self.calls.borrow_mut().push(format!("version:{interpreter}"));
      self.versions.get(interpreter).cloned()
    }

    fn can_import(&self, interpreter: &str, module: &str) -> bool {
      self.calls.borrow_mut().push(format!("import:{interpreter}:{module}"));
      self
        .importable
        .iter()
        .any(|(i, m)| i == interpreter && m == module)
    }
  }
}
