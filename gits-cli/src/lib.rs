//! # Gits CLI Library
//!
//! Command line handling for the gits launcher: argument parsing, the
//! launch and `--check` handlers, and the release-build crash handler.

pub mod check;
pub mod cli;
pub mod crash;
