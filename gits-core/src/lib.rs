//! # Gits Core Library
//!
//! Launch configuration, precondition gates, and dispatch for the gits
//! launcher. The binary in `gits-cli` wires these together; everything here
//! takes its inputs explicitly so the gate sequence can be driven from tests.

pub mod config;
pub mod consts;
pub mod context;
pub mod dispatch;
pub mod error;
pub mod location;
pub mod output;
pub mod probe;

pub use config::LauncherConfig;
pub use context::{InvocationContext, Launcher};
pub use dispatch::{DispatchPlan, LaunchTarget, exit_code_for};
pub use error::LaunchError;
pub use location::resolve_launcher_dir;
pub use output::{ColorMode, print_error, print_info, print_success};
pub use probe::{Probe, SystemProbe};
