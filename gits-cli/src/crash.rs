//! # Crash Handler
//!
//! Replaces the default panic output with a short banner and writes a TOML
//! crash report to the temp directory. Only installed in release builds so
//! debug runs keep the standard panic message.

use std::env;
use std::fs::File;
use std::io::{self, Write};
use std::panic::{self, PanicHookInfo};
use std::path::PathBuf;

use anyhow::{Result, bail};
use backtrace::Backtrace;
use owo_colors::OwoColorize;

/// Crash handler settings
#[derive(Debug, Clone)]
pub struct CrashConfig {
  /// Application name used in the banner and report file name
  pub name: String,
  pub version: String,
  /// Where reports go, defaults to the system temp directory
  pub report_directory: Option<PathBuf>,
  pub generate_reports: bool,
  /// Longer panic messages are truncated in the banner
  pub max_message_length: usize,
}

impl Default for CrashConfig {
  fn default() -> Self {
    Self {
      name: "gits".to_string(),
      version: env!("CARGO_PKG_VERSION").to_string(),
      report_directory: None,
      generate_reports: true,
      max_message_length: 500,
    }
  }
}

impl CrashConfig {
  pub fn validate(&self) -> Result<()> {
    if self.name.is_empty() {
      bail!("Application name cannot be empty");
    }
    if self.max_message_length == 0 {
      bail!("max_message_length must be greater than 0");
    }
    if let Some(dir) = &self.report_directory
      && !dir.is_dir()
    {
      bail!("Report directory not found: {}", dir.display());
    }
    Ok(())
  }
}

/// What the report records about a panic
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanicDetails {
  pub file: Option<String>,
  pub line: Option<u32>,
  pub message: Option<String>,
}

impl PanicDetails {
  fn from_info(info: &PanicHookInfo) -> Self {
    let message = info
      .payload()
      .downcast_ref::<&str>()
      .map(|s| s.to_string())
      .or_else(|| info.payload().downcast_ref::<String>().cloned());

    Self {
      file: info.location().map(|l| l.file().to_string()),
      line: info.location().map(|l| l.line()),
      message,
    }
  }
}

/// Install the crash handler (no-op in debug builds)
pub fn install(config: CrashConfig) -> Result<()> {
  if cfg!(debug_assertions) {
    return Ok(());
  }

  config.validate()?;

  panic::set_hook(Box::new(move |info: &PanicHookInfo| {
    let details = PanicDetails::from_info(info);
    let trace = format!("{:?}", Backtrace::new());

    let report_path = if config.generate_reports {
      // A failed report must not turn into a second panic
      write_report_file(&details, &trace, &config).ok()
    } else {
      None
    };

    print_banner(&details, report_path.as_ref(), &config);
  }));

  Ok(())
}

fn print_banner(details: &PanicDetails, report_path: Option<&PathBuf>, config: &CrashConfig) {
  let use_colors = is_terminal::is_terminal(io::stderr());

  if use_colors {
    eprintln!("{} {}", config.name.bright_blue().bold(), "crashed unexpectedly.".red());
  } else {
    eprintln!("{} crashed unexpectedly.", config.name);
  }

  if let (Some(file), Some(line)) = (&details.file, details.line) {
    eprintln!("\n  Location: {file}:{line}");
  }

  if let Some(message) = &details.message {
    eprintln!("  Message: {}", truncate(message, config.max_message_length));
  }

  if let Some(path) = report_path {
    if use_colors {
      eprintln!(
        "\n  {} {}",
        "Crash report saved:".bright_white(),
        path.display().to_string().yellow()
      );
    } else {
      eprintln!("\n  Crash report saved: {}", path.display());
    }
  }
}

fn truncate(message: &str, max_len: usize) -> String {
  if message.chars().count() > max_len {
    let head: String = message.chars().take(max_len).collect();
    format!("{head}... (truncated)")
  } else {
    message.to_string()
  }
}

fn write_report_file(details: &PanicDetails, trace: &str, config: &CrashConfig) -> io::Result<PathBuf> {
  let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
  let filename = format!(
    "crash_report_{}_{timestamp}.toml",
    config.name.to_lowercase().replace(|c: char| !c.is_alphanumeric(), "_")
  );
  let path = config.report_directory.clone().unwrap_or_else(env::temp_dir).join(filename);

  let mut file = File::create(&path)?;
  write_crash_report(&mut file, details, trace, config)?;
  Ok(path)
}

/// Quote `value` as a single-line TOML basic string
fn toml_string(value: &str) -> String {
  let mut quoted = String::with_capacity(value.len() + 2);
  quoted.push('"');
  for c in value.chars() {
    match c {
      '"' => quoted.push_str("\\\""),
      '\\' => quoted.push_str("\\\\"),
      '\n' => quoted.push_str("\\n"),
      '\r' => quoted.push_str("\\r"),
      '\t' => quoted.push_str("\\t"),
      c if c.is_control() => quoted.push_str(&format!("\\u{:04X}", c as u32)),
      c => quoted.push(c),
    }
  }
  quoted.push('"');
  quoted
}

/// Write a crash report in TOML format
pub fn write_crash_report<W: Write>(
  out: &mut W,
  details: &PanicDetails,
  trace: &str,
  config: &CrashConfig,
) -> io::Result<()> {
  writeln!(out, "# {} crash report\n", config.name)?;

  writeln!(out, "[application]")?;
  writeln!(out, "name = {}", toml_string(&config.name))?;
  writeln!(out, "version = {}", toml_string(&config.version))?;

  writeln!(out, "\n[system]")?;
  writeln!(out, "operating_system = {}", toml_string(env::consts::OS))?;
  writeln!(out, "architecture = {}", toml_string(env::consts::ARCH))?;
  writeln!(out, "timestamp = {}", toml_string(&chrono::Utc::now().to_rfc3339()))?;

  writeln!(out, "\n[panic]")?;
  if let Some(file) = &details.file {
    writeln!(out, "file = {}", toml_string(file))?;
  }
  if let Some(line) = details.line {
    writeln!(out, "line = {line}")?;
  }
  if let Some(message) = &details.message {
    writeln!(out, "message = {}", toml_string(message))?;
  }

  writeln!(out, "\n[backtrace]")?;
  writeln!(out, "trace = {}", toml_string(trace.trim_end()))?;

  Ok(())
}
