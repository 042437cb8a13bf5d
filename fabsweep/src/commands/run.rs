//! `fabsweep run`: the linear teardown flow.
//!
//! paths → interpreter → venv (optional) → dependencies (optional) → delegate.
//! Every piece of mutable process state is held by a guard so cleanup runs on
//! all exit paths.

use anyhow::Result;

use fabsweep_core::config::schema::interpreter_override;
use fabsweep_core::config::SetupFlags;
use fabsweep_core::paths::{TeardownPaths, DELETE_SCRIPT};
use fabsweep_env::builder;
use fabsweep_env::guard::VenvActivation;
use fabsweep_env::interpreter;
use fabsweep_env::runner;
use fabsweep_env::EnvError;

pub fn cmd_run(
    repo_root: Option<&str>,
    python_override: Option<&str>,
    flags: SetupFlags,
) -> Result<()> {
    let paths = TeardownPaths::resolve(repo_root)?;
    tracing::info!(
        repo_root = %paths.repo_root.display(),
        fabric_dir = %paths.fabric_dir.display(),
        "resolved repository paths"
    );

    let override_path = interpreter_override(python_override);
    let system_python = interpreter::resolve(override_path.as_deref())?;

    // The activation guard must outlive the delegated run; dropping it
    // deactivates the environment.
    let mut _activation: Option<VenvActivation> = None;
    let python = if flags.skip_venv {
        tracing::info!("virtual environment skipped");
        system_python
    } else {
        let venv = builder::ensure_venv(&paths.venv_dir, &system_python)?;
        _activation = Some(VenvActivation::activate(&venv));
        venv.python.clone()
    };

    if flags.skip_deps {
        tracing::info!("dependency installation skipped");
    } else {
        if !flags.skip_pip_upgrade {
            builder::upgrade_pip(&python);
        }
        builder::install_requirements(&python, &paths.manifest)?;
    }

    let result = runner::run_delegated(&python, &paths.fabric_dir, DELETE_SCRIPT)?;
    if !result.success() {
        return Err(EnvError::DelegatedFailure(result.exit_code).into());
    }

    eprintln!("✅ Workspace teardown completed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use std::sync::Mutex;

    // cmd_run changes the working directory; serialize the flow tests.
    static FLOW_LOCK: Mutex<()> = Mutex::new(());

    fn make_repo(root: &Path) -> std::path::PathBuf {
        let fabric = root.join("infra").join("scripts").join("fabric");
        fs::create_dir_all(&fabric).expect("create repo layout");
        fabric
    }

    fn skip_all() -> SetupFlags {
        SetupFlags::default().with_cli_overrides(true, true, true)
    }

    #[cfg(unix)]
    #[test]
    fn test_run_success_and_cwd_restored() {
        let _lock = FLOW_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let tmp = tempfile::tempdir().expect("tempdir");
        let fabric = make_repo(tmp.path());
        fs::write(fabric.join(DELETE_SCRIPT), "exit 0\n").expect("write stub");

        let before = std::env::current_dir().expect("cwd");
        let root = tmp.path().to_string_lossy().to_string();
        cmd_run(Some(&root), Some("sh"), skip_all()).expect("run should succeed");
        assert_eq!(std::env::current_dir().expect("cwd"), before);
        // All steps skipped: no venv side effects
        assert!(!tmp.path().join(".venv").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_run_nonzero_exit_surfaces_code() {
        let _lock = FLOW_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let tmp = tempfile::tempdir().expect("tempdir");
        let fabric = make_repo(tmp.path());
        fs::write(fabric.join(DELETE_SCRIPT), "exit 2\n").expect("write stub");

        let before = std::env::current_dir().expect("cwd");
        let root = tmp.path().to_string_lossy().to_string();
        let err = cmd_run(Some(&root), Some("sh"), skip_all()).expect_err("should fail");
        assert!(err.to_string().contains("exit code 2"));
        assert_eq!(std::env::current_dir().expect("cwd"), before);
    }

    #[test]
    fn test_missing_manifest_fails_before_delegation() {
        let _lock = FLOW_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let tmp = tempfile::tempdir().expect("tempdir");
        let fabric = make_repo(tmp.path());
        // The stub would leave a marker if delegation ever ran.
        fs::write(
            fabric.join(DELETE_SCRIPT),
            "echo ran > delegated.marker\nexit 0\n",
        )
        .expect("write stub");

        let root = tmp.path().to_string_lossy().to_string();
        let flags = SetupFlags::default().with_cli_overrides(true, false, true);
        let err = cmd_run(Some(&root), Some("sh"), flags).expect_err("should fail");
        assert!(err.to_string().contains("dependency manifest not found"));
        assert!(!fabric.join("delegated.marker").exists());
    }

    #[test]
    fn test_missing_fabric_dir_is_terminal() {
        let _lock = FLOW_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let tmp = tempfile::tempdir().expect("tempdir");
        let root = tmp.path().to_string_lossy().to_string();
        let err = cmd_run(Some(&root), Some("sh"), skip_all()).expect_err("should fail");
        assert!(err.to_string().contains("fabric scripts directory not found"));
    }
}
