//! Environment variable key constants.
//!
//! Wrapper configuration uses `FABSWEEP_*`; the delegated teardown script reads
//! the `FABRIC_*` variables, which this wrapper passes through untouched.

// ─── Wrapper configuration ───────────────────────────────────────────────────
pub const FABSWEEP_REPO_ROOT: &str = "FABSWEEP_REPO_ROOT";
pub const FABSWEEP_PYTHON: &str = "FABSWEEP_PYTHON";
pub const FABSWEEP_SKIP_VENV: &str = "FABSWEEP_SKIP_VENV";
pub const FABSWEEP_SKIP_DEPS: &str = "FABSWEEP_SKIP_DEPS";
pub const FABSWEEP_SKIP_PIP_UPGRADE: &str = "FABSWEEP_SKIP_PIP_UPGRADE";

// ─── Observability ───────────────────────────────────────────────────────────
pub const FABSWEEP_QUIET: &str = "FABSWEEP_QUIET";
pub const FABSWEEP_LOG_LEVEL: &str = "FABSWEEP_LOG_LEVEL";
pub const FABSWEEP_LOG_JSON: &str = "FABSWEEP_LOG_JSON";
pub const FABSWEEP_AUDIT_LOG: &str = "FABSWEEP_AUDIT_LOG";

/// Variables consumed by the delegated teardown script. The wrapper never reads
/// their values; `fabsweep info` reports set/unset status only.
pub mod fabric {
    /// Mandatory for the delegated script: suffix identifying the deployment.
    pub const FABRIC_WORKSPACE_SUFFIX: &str = "FABRIC_WORKSPACE_SUFFIX";
    /// Optional: select the target workspace by display name.
    pub const FABRIC_WORKSPACE_NAME: &str = "FABRIC_WORKSPACE_NAME";
    /// Optional: select the target workspace by identifier.
    pub const FABRIC_WORKSPACE_ID: &str = "FABRIC_WORKSPACE_ID";

    pub const ALL: &[&str] = &[
        FABRIC_WORKSPACE_SUFFIX,
        FABRIC_WORKSPACE_NAME,
        FABRIC_WORKSPACE_ID,
    ];
}
