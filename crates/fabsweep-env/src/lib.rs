//! Interpreter discovery, virtual environment setup, and delegated execution.
//!
//! The crate owns every piece of mutable process state the teardown flow
//! touches (working directory, activation env vars) and scopes each one with
//! an RAII guard so cleanup runs on all exit paths.

pub mod builder;
pub mod guard;
pub mod interpreter;
pub mod runner;

use std::path::PathBuf;

/// Typed errors for the configuration taxonomy; callers wrap these in
/// `anyhow::Error` and add context.
#[derive(Debug, thiserror::Error)]
pub enum EnvError {
    /// No candidate interpreter answered a `--version` probe.
    #[error("no usable Python interpreter found (tried: {tried})")]
    MissingInterpreter { tried: String },

    /// The venv exists but its activation entry point is absent.
    #[error("virtual environment activation entry point missing: {0}")]
    ActivationMissing(PathBuf),

    /// Dependency installation was requested but the manifest is gone.
    #[error("dependency manifest not found: {0}")]
    ManifestMissing(PathBuf),

    /// The delegated teardown script exited non-zero.
    #[error("delegated teardown script failed with exit code {0}")]
    DelegatedFailure(i32),
}

// Process-global state (cwd, env vars) is mutated by several test modules;
// they serialize through this lock.
#[cfg(test)]
pub(crate) static TEST_ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
