//! Build script for the gits launcher
//!
//! Embeds version metadata for `gits --version`

use std::process::Command;

/// Entry point for the build script.
fn main() {
  embed_build_info();
  set_rerun_conditions();
}

/// Exposes the short Git commit hash as `GITS_GIT_HASH`.
///
/// Always set, falling back to `unknown` outside a Git checkout so the
/// `env!` lookup in the CLI never fails.
fn embed_build_info() {
  let git_hash = Command::new("git")
    .args(["rev-parse", "--short", "HEAD"])
    .output()
    .ok()
    .filter(|output| output.status.success())
    .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
    .filter(|hash| !hash.is_empty())
    .unwrap_or_else(|| "unknown".to_string());

  println!("cargo:rustc-env=GITS_GIT_HASH={git_hash}");
}

/// Configures conditions that trigger build script re-execution.
fn set_rerun_conditions() {
  println!("cargo:rerun-if-changed=build.rs");

  // Re-run when Git HEAD changes to update commit hash
  println!("cargo:rerun-if-changed=../.git/HEAD");
}
