//! # Command Line Interface
//!
//! Defines the launcher's command line and the top-level handler that runs
//! the precondition gates and hands off to the GUI.

use std::env;
use std::ffi::OsString;

use anyhow::Result;
use clap::{ArgAction, Parser};
use gits_core::output::{cli_styles, print_info, report_launch_error};
use gits_core::{
  ColorMode, DispatchPlan, LaunchError, Launcher, LauncherConfig, Probe, SystemProbe, exit_code_for,
  resolve_launcher_dir,
};
use tracing::debug;

use crate::check;

const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GITS_GIT_HASH"), ")");

/// Top-level CLI command for the gits launcher
#[derive(Parser, Debug)]
#[command(name = "gits")]
#[command(display_name = "GITS")]
#[command(about = "Launch the Git Python GUI for a repository")]
#[command(
  long_about = "Launches the Git Python GUI that ships next to this executable.\n\n\
        Before launching, gits checks that git_python_gui.py is present, that a\n\
        Python interpreter is on PATH, and that the GitPython package can be\n\
        imported. With no PATH the GUI opens the current directory; otherwise\n\
        every argument from PATH onward is passed to the GUI unchanged."
)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_version = LONG_VERSION)]
#[command(max_term_width = 120)]
#[command(styles = cli_styles())]
pub struct Cli {
  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    long_help = "Sets the level of verbosity for tracing output on stderr.\n\n\
             -v: Show info level messages\n\
             -vv: Show debug level messages\n\
             -vvv: Show trace level messages"
  )]
  pub verbose: u8,

  /// Controls when colored output is used
  #[arg(
    long,
    value_enum,
    ignore_case = true,
    default_value_t = ColorMode::Auto,
  )]
  pub colors: ColorMode,

  /// Check prerequisites and print a report instead of launching
  #[arg(long, conflicts_with = "args")]
  pub check: bool,

  /// Repository path, followed by any extra arguments for the GUI
  #[arg(
    value_name = "PATH",
    trailing_var_arg = true,
    allow_hyphen_values = true,
    long_help = "Repository path to open. Defaults to the current directory.\n\n\
             Launcher options are only recognized before PATH. PATH and everything\n\
             after it is forwarded to the GUI verbatim; use -- to forward an\n\
             argument list that starts with a dash."
  )]
  pub args: Vec<OsString>,
}

/// Run the launcher and return the process exit code
pub fn handle_cli(cli: Cli) -> Result<i32> {
  cli.colors.apply();

  let config = LauncherConfig::default();
  let probe = SystemProbe;

  if cli.check {
    return check::run_check(&config, &probe);
  }

  match launch(&config, &probe, cli.args) {
    Ok(code) => Ok(code),
    Err(err) => {
      debug!("Launch failed: {err:?}");
      report_launch_error(&err);
      Ok(err.exit_code())
    }
  }
}

/// Capture the start-up state, run every gate, and dispatch
///
/// Returns the exit code of the GUI once it finishes.
pub fn launch<P: Probe + ?Sized>(config: &LauncherConfig, probe: &P, args: Vec<OsString>) -> Result<i32, LaunchError> {
  let current_dir = env::current_dir();
  let launcher_dir = resolve_launcher_dir()?;
  debug!("Launcher directory: {}", launcher_dir.display());
  debug!("Current directory: {current_dir:?}");

  let ctx = Launcher::new(config, probe, launcher_dir).prepare(args, current_dir)?;
  let plan = DispatchPlan::from_context(&ctx);

  print_info(&plan.announcement(&config.display_name));

  let status = plan.execute()?;
  debug!("{} exited with {status}", config.display_name);

  Ok(exit_code_for(status))
}

#[cfg(test)]
mod tests {
  use clap::CommandFactory;

  use super::*;

  #[test]
  fn test_cli_definition_is_valid() {
    Cli::command().debug_assert();
  }

  #[test]
  fn test_no_arguments() {
    let cli = Cli::try_parse_from(["gits"]).unwrap();
    assert!(cli.args.is_empty());
    assert!(!cli.check);
    assert_eq!(cli.verbose, 0);
    assert_eq!(cli.colors, ColorMode::Auto);
  }

  #[test]
  fn test_arguments_after_path_are_forwarded() {
    let cli = Cli::try_parse_from(["gits", "/repo/a", "--flag", "-v", "--check"]).unwrap();
    assert_eq!(cli.args, vec!["/repo/a", "--flag", "-v", "--check"]);
    assert_eq!(cli.verbose, 0);
    assert!(!cli.check);
  }

  #[test]
  fn test_launcher_options_before_path() {
    let cli = Cli::try_parse_from(["gits", "-vv", "--colors", "never", "/tmp/repo"]).unwrap();
    assert_eq!(cli.verbose, 2);
    assert_eq!(cli.colors, ColorMode::Never);
    assert_eq!(cli.args, vec!["/tmp/repo"]);
  }

  #[test]
  fn test_double_dash_forwards_leading_dash() {
    let cli = Cli::try_parse_from(["gits", "--", "-weird-name"]).unwrap();
    assert_eq!(cli.args, vec!["-weird-name"]);
  }

  #[test]
  fn test_check_flag() {
    let cli = Cli::try_parse_from(["gits", "--check"]).unwrap();
    assert!(cli.check);
  }

  #[test]
  fn test_check_rejects_path() {
    let err = Cli::try_parse_from(["gits", "--check", "/repo"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
  }

  #[test]
  fn test_leading_launcher_flag_is_consumed() {
    let cli = Cli::try_parse_from(["gits", "-v"]).unwrap();
    assert_eq!(cli.verbose, 1);
    assert!(cli.args.is_empty());
  }
}
