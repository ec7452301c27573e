//! # Output Formatting
//!
//! Formatted output functions with colors and emojis for the launcher's
//! user-facing messages. Status goes to stdout, failures to stderr.

use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use owo_colors::{OwoColorize, Stream, Style};

use crate::error::LaunchError;

/// Enum representing different color modes for output
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
  /// Enable colored output
  Yes,
  /// Enable colored output (alias for Yes)
  Always,
  /// Automatically detect if colors should be used based on terminal
  /// capabilities
  Auto,
  /// Disable colored output
  No,
  /// Disable colored output (alias for No)
  Never,
}

impl ColorMode {
  /// Apply this mode as the global `owo-colors` override
  pub fn apply(self) {
    match self {
      ColorMode::Always | ColorMode::Yes => owo_colors::set_override(true),
      ColorMode::Never | ColorMode::No => owo_colors::set_override(false),
      // Leave terminal detection to owo-colors
      ColorMode::Auto => {}
    }
  }
}

/// Help styling shared by the launcher's clap commands
pub fn cli_styles() -> Styles {
  Styles::styled()
    .header(AnsiColor::BrightGreen.on_default().bold().underline())
    .usage(AnsiColor::Green.on_default().bold())
    .literal(AnsiColor::BrightGreen.on_default().bold())
    .placeholder(AnsiColor::BrightWhite.on_default().italic())
    .valid(AnsiColor::Green.on_default())
    .invalid(AnsiColor::BrightRed.on_default().bold())
}

/// Helper function to safely get an emoji or fallback to a default character
pub fn get_emoji_or_default(name: &str, default: &str) -> String {
  match emojis::get_by_shortcode(name) {
    Some(emoji) => emoji.to_string(),
    None => default.to_string(),
  }
}

/// Print a success message
pub fn print_success(message: &str) {
  let check = get_emoji_or_default("white_check_mark", "✓");
  println!(
    "{} {}",
    check.if_supports_color(Stream::Stdout, |t| t.style(Style::new().green().bold())),
    message
  );
}

/// Print an error message
pub fn print_error(message: &str) {
  let cross = get_emoji_or_default("x", "✗");
  eprintln!(
    "{} {}",
    cross.if_supports_color(Stream::Stderr, |t| t.style(Style::new().red().bold())),
    message
  );
}

/// Print an info message
pub fn print_info(message: &str) {
  let info = get_emoji_or_default("information_source", "ℹ");
  println!(
    "{} {}",
    info.if_supports_color(Stream::Stdout, |t| t.style(Style::new().blue().bold())),
    message
  );
}

/// Print an indented follow-up line under an error
pub fn print_hint(message: &str) {
  eprintln!("  {}", message.if_supports_color(Stream::Stderr, |t| t.bright_black()));
}

/// Print a section header
pub fn print_header(header: &str) {
  println!(
    "\n{}",
    header.if_supports_color(Stream::Stdout, |t| t.style(Style::new().blue().bold()))
  );
}

/// Format a filesystem path
pub fn format_path(path: &str) -> String {
  path
    .if_supports_color(Stream::Stdout, |t| t.bright_green())
    .to_string()
}

/// Format a command or command example
pub fn format_command(cmd: &str) -> String {
  cmd.if_supports_color(Stream::Stdout, |t| t.purple()).to_string()
}

/// Print a launch failure and its hint to stderr
pub fn report_launch_error(err: &LaunchError) {
  print_error(&err.to_string());
  if let Some(hint) = err.hint() {
    print_hint(&hint);
  }
}

#[cfg(test)]
mod tests {
  use std::path::PathBuf;

  use super::*;

  #[test]
  fn test_get_emoji_or_default() {
    let result = get_emoji_or_default("warning", "⚠");
    assert!(!result.is_empty());

    let result = get_emoji_or_default("nonexistent_emoji", "fallback");
    assert_eq!(result, "fallback");
  }

  #[test]
  fn test_format_functions_keep_text() {
    owo_colors::set_override(false);
    assert_eq!(format_path("/opt/gits"), "/opt/gits");
    assert_eq!(format_command("pip install GitPython"), "pip install GitPython");
  }

  #[test]
  fn test_report_launch_error_does_not_panic() {
    report_launch_error(&LaunchError::TargetMissing {
      filename: "git_python_gui.py".to_string(),
      directory: PathBuf::from("/nowhere"),
      expected: PathBuf::from("/nowhere/git_python_gui.py"),
    });
  }
}
