//! Constants for the gits launcher
//!
//! Fixed names the launcher relies on: the GUI entry point it hands off to,
//! the interpreter commands it probes, and the Python dependency it checks
//! for.

/// File name of the GUI entry point, expected next to the launcher executable
pub const TARGET_PROGRAM: &str = "git_python_gui.py";

/// Human-readable name of the GUI used in status lines
pub const DISPLAY_NAME: &str = "Git Python GUI";

/// Interpreter commands probed in order, first responsive one wins
#[cfg(windows)]
pub const INTERPRETER_CANDIDATES: &[&str] = &["python", "py"];

/// Interpreter commands probed in order, first responsive one wins
#[cfg(not(windows))]
pub const INTERPRETER_CANDIDATES: &[&str] = &["python3", "python"];

/// Module name passed to `import` when checking the dependency
pub const REQUIRED_MODULE: &str = "git";

/// Package name users install to provide [`REQUIRED_MODULE`]. Not derivable
/// from the module name.
pub const REQUIRED_PACKAGE: &str = "GitPython";

/// Where to point users who have no Python interpreter at all
pub const INTERPRETER_DOWNLOAD_URL: &str = "https://www.python.org/downloads/";

/// Exit code for every failed precondition
pub const EXIT_PRECONDITION_FAILED: i32 = 1;
