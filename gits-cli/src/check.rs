//! # Prerequisite Check
//!
//! Runs every launch gate without stopping at the first failure and prints
//! what it found. Nothing is dispatched.

use std::path::{Path, PathBuf};

use anyhow::Result;
use gits_core::location::ensure_target_exists;
use gits_core::output::{format_command, format_path, print_error, print_header, print_hint, print_success};
use gits_core::{LaunchError, LauncherConfig, Probe, resolve_launcher_dir};
use tracing::debug;

/// Result of probing a single interpreter candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpreterStatus {
  pub name: String,
  pub version: Option<String>,
}

/// Everything `--check` found
#[derive(Debug)]
pub struct CheckReport {
  pub launcher_dir: PathBuf,
  pub target: Result<PathBuf, LaunchError>,
  pub interpreters: Vec<InterpreterStatus>,
  /// `None` when there was no interpreter to import with
  pub dependency_ok: Option<bool>,
}

impl CheckReport {
  /// First candidate that responded, the one a launch would use
  pub fn selected_interpreter(&self) -> Option<&str> {
    self
      .interpreters
      .iter()
      .find(|status| status.version.is_some())
      .map(|status| status.name.as_str())
  }

  pub fn passed(&self) -> bool {
    self.target.is_ok() && self.dependency_ok == Some(true)
  }
}

/// Probe everything a launch from `launcher_dir` depends on
pub fn collect_report<P: Probe + ?Sized>(config: &LauncherConfig, probe: &P, launcher_dir: &Path) -> CheckReport {
  let target = ensure_target_exists(launcher_dir, &config.target_filename);

  let interpreters: Vec<InterpreterStatus> = config
    .interpreter_candidates
    .iter()
    .map(|name| InterpreterStatus {
      name: name.clone(),
      version: probe.interpreter_version(name),
    })
    .collect();

  let dependency_ok = interpreters
    .iter()
    .find(|status| status.version.is_some())
    .map(|status| probe.can_import(&status.name, &config.required_module));

  CheckReport {
    launcher_dir: launcher_dir.to_path_buf(),
    target,
    interpreters,
    dependency_ok,
  }
}

/// Print a report in the order the gates run
pub fn print_report(report: &CheckReport, config: &LauncherConfig) {
  print_header("Launcher Check");
  println!();

  println!("Launcher:");
  println!(
    "  Directory: {}",
    format_path(&report.launcher_dir.display().to_string())
  );
  match &report.target {
    Ok(path) => println!("  Target: {}", format_path(&path.display().to_string())),
    Err(err) => {
      print_error(&format!("  Target: {err}"));
      if let Some(hint) = err.hint() {
        print_hint(&hint);
      }
    }
  }
  println!();

  println!("Interpreters:");
  let selected = report.selected_interpreter();
  for status in &report.interpreters {
    match &status.version {
      Some(version) if Some(status.name.as_str()) == selected => {
        println!("  {}: {version} (selected)", status.name)
      }
      Some(version) => println!("  {}: {version}", status.name),
      None => println!("  {}: Not found", status.name),
    }
  }
  if selected.is_none() {
    print_error("  No Python interpreter found");
    print_hint(&format!(
      "Please install Python 3 from {}",
      config.interpreter_download_url
    ));
  }
  println!();

  println!("Dependencies:");
  match report.dependency_ok {
    Some(true) => println!("  {}: Found", config.required_package),
    Some(false) => {
      print_error(&format!("  {}: Not installed", config.required_package));
      print_hint(&format!(
        "Please install it with: {}",
        format_command(&config.install_command())
      ));
    }
    None => println!("  {}: Not checked (no interpreter)", config.required_package),
  }
  println!();

  if report.passed() {
    print_success("All prerequisites met");
  } else {
    print_error("Some prerequisites are missing");
  }
}

/// `gits --check`: report on every gate, exit 0 only if all passed
pub fn run_check<P: Probe + ?Sized>(config: &LauncherConfig, probe: &P) -> Result<i32> {
  let launcher_dir = match resolve_launcher_dir() {
    Ok(dir) => dir,
    Err(err) => {
      print_error(&err.to_string());
      return Ok(err.exit_code());
    }
  };

  let report = collect_report(config, probe, &launcher_dir);
  debug!("Check report: {report:?}");
  print_report(&report, config);

  Ok(if report.passed() { 0 } else { 1 })
}
