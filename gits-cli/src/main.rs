//! # Gits Entry Point
//!
//! Launches the Git Python GUI that lives next to this executable, after
//! checking that Python and GitPython are available.

use anyhow::Result;
use clap::Parser;
use gits_cli::cli::{Cli, handle_cli};
use gits_cli::crash::{self, CrashConfig};
use tracing::debug;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> Result<()> {
  crash::install(CrashConfig::default())?;

  let cmd = Cli::parse();

  let level = match cmd.verbose {
    0 => tracing::Level::WARN,  // Default: warnings and errors
    1 => tracing::Level::INFO,  // -v: info, warnings, and errors
    2 => tracing::Level::DEBUG, // -vv: debug, info, warnings, and errors
    _ => tracing::Level::TRACE, // -vvv or more: trace and everything else
  };

  // Built without RUST_LOG; the launcher reads no environment of its own
  tracing_subscriber::registry()
    .with(fmt::layer().with_writer(std::io::stderr))
    .with(EnvFilter::default().add_directive(level.into()))
    .init();

  debug!("Tracing initialized with level: {}", level);

  let code = handle_cli(cmd)?;
  std::process::exit(code);
}
