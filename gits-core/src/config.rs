//! # Launch Configuration
//!
//! The fixed parameters of a launch. There is no config file and nothing is
//! read from the environment; [`LauncherConfig::default`] carries the
//! compiled-in values and tests substitute their own.

use crate::consts::{
  DISPLAY_NAME, INTERPRETER_CANDIDATES, INTERPRETER_DOWNLOAD_URL, REQUIRED_MODULE, REQUIRED_PACKAGE, TARGET_PROGRAM,
};

/// Parameters that drive the precondition gates and the dispatch step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherConfig {
  /// File name of the target program, joined onto the launcher directory
  pub target_filename: String,
  /// Name shown in status lines
  pub display_name: String,
  /// Interpreter command names, probed in order
  pub interpreter_candidates: Vec<String>,
  /// Module the interpreter must be able to import
  pub required_module: String,
  /// Package to suggest when the import fails
  pub required_package: String,
  /// Download hint shown when no interpreter responds
  pub interpreter_download_url: String,
}

impl Default for LauncherConfig {
  fn default() -> Self {
    Self {
      target_filename: TARGET_PROGRAM.to_string(),
      display_name: DISPLAY_NAME.to_string(),
      interpreter_candidates: INTERPRETER_CANDIDATES.iter().map(|c| c.to_string()).collect(),
      required_module: REQUIRED_MODULE.to_string(),
      required_package: REQUIRED_PACKAGE.to_string(),
      interpreter_download_url: INTERPRETER_DOWNLOAD_URL.to_string(),
    }
  }
}

impl LauncherConfig {
  /// Replace the interpreter candidate list
  pub fn with_interpreter_candidates<I, S>(mut self, candidates: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.interpreter_candidates = candidates.into_iter().map(Into::into).collect();
    self
  }

  /// Replace the target program file name
  pub fn with_target_filename(mut self, filename: impl Into<String>) -> Self {
    self.target_filename = filename.into();
    self
  }

  /// Install command suggested when the dependency is missing
  pub fn install_command(&self) -> String {
    format!("pip install {}", self.required_package)
  }
}
