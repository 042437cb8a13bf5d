//! Structured configuration read from environment variables and CLI flags.

use serde::Serialize;

use super::env_keys;
use super::loader::{env_bool, env_optional, env_or};

/// Which setup steps to skip before delegating to the teardown script.
///
/// Priority per field: CLI flag > environment variable > default (run the step).
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct SetupFlags {
    /// Skip creating/reusing the `.venv` and run with the system interpreter.
    pub skip_venv: bool,
    /// Skip dependency installation entirely.
    pub skip_deps: bool,
    /// Skip the best-effort pip self-upgrade.
    pub skip_pip_upgrade: bool,
}

impl SetupFlags {
    /// Load skip flags from `FABSWEEP_SKIP_*` environment variables.
    pub fn from_env() -> Self {
        Self {
            skip_venv: env_bool(env_keys::FABSWEEP_SKIP_VENV, &[], false),
            skip_deps: env_bool(env_keys::FABSWEEP_SKIP_DEPS, &[], false),
            skip_pip_upgrade: env_bool(env_keys::FABSWEEP_SKIP_PIP_UPGRADE, &[], false),
        }
    }

    /// Apply CLI flags on top of the environment. A flag can only turn a skip
    /// on; absence of a flag leaves the environment's choice in place.
    pub fn with_cli_overrides(mut self, skip_venv: bool, skip_deps: bool, skip_pip_upgrade: bool) -> Self {
        if skip_venv {
            self.skip_venv = true;
        }
        if skip_deps {
            self.skip_deps = true;
        }
        if skip_pip_upgrade {
            self.skip_pip_upgrade = true;
        }
        self
    }
}

/// Logging and audit configuration.
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// When set, only WARN and above are logged.
    pub quiet: bool,
    /// EnvFilter directive used when `RUST_LOG` is not set.
    pub log_level: String,
    /// Emit logs as JSON lines instead of human-readable text.
    pub log_json: bool,
    /// Path of the audit JSONL file; `None` disables audit events.
    pub audit_log: Option<String>,
}

impl ObservabilityConfig {
    pub fn from_env() -> Self {
        Self {
            quiet: env_bool(env_keys::FABSWEEP_QUIET, &[], false),
            log_level: env_or(env_keys::FABSWEEP_LOG_LEVEL, &[], || {
                "fabsweep=info".to_string()
            }),
            log_json: env_bool(env_keys::FABSWEEP_LOG_JSON, &[], false),
            audit_log: env_optional(env_keys::FABSWEEP_AUDIT_LOG, &[]),
        }
    }
}

/// Interpreter selection: an explicit path is taken as-is, otherwise the
/// candidate list is probed.
pub fn interpreter_override(cli_python: Option<&str>) -> Option<String> {
    cli_python
        .map(String::from)
        .or_else(|| env_optional(env_keys::FABSWEEP_PYTHON, &[]))
}
