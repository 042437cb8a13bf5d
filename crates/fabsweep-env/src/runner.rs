//! Delegated execution: run the teardown script from its own directory.

use anyhow::{Context, Result};
use std::path::Path;
use std::process::Command;
use std::time::Instant;

use fabsweep_core::observability;

use crate::guard::CwdGuard;

/// Outcome of the delegated subprocess. Stdout/stderr are inherited, so only
/// the exit status and timing are captured.
#[derive(Debug, Clone, Copy)]
pub struct ExecutionResult {
    pub exit_code: i32,
    pub duration_ms: u64,
}

impl ExecutionResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Invoke `<python> <script_name>` with no positional arguments from inside
/// `script_dir`. Configuration reaches the script through the inherited
/// process environment. The working directory is restored on every exit path.
pub fn run_delegated(python: &Path, script_dir: &Path, script_name: &str) -> Result<ExecutionResult> {
    let script = script_dir.join(script_name);
    if !script.exists() {
        anyhow::bail!("delegated script not found: {}", script.display());
    }

    let _cwd = CwdGuard::enter(script_dir)?;
    observability::audit_execution_started(
        script_name,
        &python.to_string_lossy(),
        &script_dir.to_string_lossy(),
    );
    tracing::info!(script = %script.display(), "invoking delegated teardown script");

    let started = Instant::now();
    let status = Command::new(python)
        .arg(script_name)
        .status()
        .with_context(|| format!("spawn {}", script.display()))?;
    let duration_ms = started.elapsed().as_millis() as u64;

    // Terminated by signal: no exit code to surface, use -1
    let exit_code = status.code().unwrap_or(-1);
    observability::audit_execution_completed(script_name, exit_code, duration_ms);
    tracing::info!(exit_code, duration_ms, "delegated script finished");

    Ok(ExecutionResult {
        exit_code,
        duration_ms,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TEST_ENV_LOCK;
    use std::fs;

    #[cfg(unix)]
    #[test]
    fn test_run_delegated_zero_exit() {
        let _lock = TEST_ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let tmp = tempfile::tempdir().expect("tempdir");
        fs::write(tmp.path().join("stub.py"), "exit 0\n").expect("write stub");

        let before = std::env::current_dir().expect("cwd");
        let result = run_delegated(Path::new("sh"), tmp.path(), "stub.py").expect("run");
        assert!(result.success());
        assert_eq!(result.exit_code, 0);
        assert_eq!(std::env::current_dir().expect("cwd"), before);
    }

    #[cfg(unix)]
    #[test]
    fn test_run_delegated_surfaces_nonzero_exit() {
        let _lock = TEST_ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let tmp = tempfile::tempdir().expect("tempdir");
        fs::write(tmp.path().join("stub.py"), "exit 2\n").expect("write stub");

        let before = std::env::current_dir().expect("cwd");
        let result = run_delegated(Path::new("sh"), tmp.path(), "stub.py").expect("run");
        assert!(!result.success());
        assert_eq!(result.exit_code, 2);
        // cwd restored even on failure
        assert_eq!(std::env::current_dir().expect("cwd"), before);
    }

    #[test]
    fn test_run_delegated_missing_script() {
        let _lock = TEST_ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let tmp = tempfile::tempdir().expect("tempdir");
        let err =
            run_delegated(Path::new("sh"), tmp.path(), "stub.py").expect_err("should fail");
        assert!(err.to_string().contains("delegated script not found"));
    }

    #[test]
    fn test_delegated_failure_message_includes_code() {
        let err = crate::EnvError::DelegatedFailure(2);
        assert!(err.to_string().contains("2"));
    }
}
