//! Test utilities shared across the gits workspace
//!
//! This crate provides the fixtures the launcher's integration tests run
//! against:
//! - Fake Python interpreters written as shell scripts ([`FakeInterpreter`])
//! - Relocated launcher copies with or without a GUI stub
//!   ([`LauncherInstall`])
//!
//! The clippy dead_code lint is disabled for this crate because test utilities
//! may not be used by all tests, and the compiler cannot detect usage across
//! crate boundaries in development dependencies.

#![allow(dead_code)]

pub mod install;
pub mod interpreter;

// Re-export commonly used items
pub use install::LauncherInstall;
pub use interpreter::{FakeInterpreter, InterpreterDir, parse_forwarded_args};
