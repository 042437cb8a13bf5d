//! RAII guards for process-global state.
//!
//! The working directory and the activation env vars are acquired through
//! these guards and restored in `Drop`, so every exit path (success, error,
//! unwind) releases them.

use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};

use fabsweep_core::config::{remove_env_var, set_env_var};

use crate::builder::Venv;

/// Changes the process working directory and restores the original on drop.
pub struct CwdGuard {
    original: PathBuf,
}

impl CwdGuard {
    pub fn enter(dir: &Path) -> Result<Self> {
        let original = env::current_dir().context("read current directory")?;
        env::set_current_dir(dir)
            .with_context(|| format!("change directory to {}", dir.display()))?;
        tracing::debug!(cwd = %dir.display(), "entered working directory");
        Ok(Self { original })
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        if let Err(e) = env::set_current_dir(&self.original) {
            tracing::warn!(
                original = %self.original.display(),
                error = %e,
                "failed to restore working directory"
            );
        }
    }
}

/// Activates a virtual environment for child processes: sets `VIRTUAL_ENV` and
/// prepends the venv binary directory to `PATH`. Drop restores both.
pub struct VenvActivation {
    prev_virtual_env: Option<String>,
    prev_path: Option<String>,
}

impl VenvActivation {
    pub fn activate(venv: &Venv) -> Self {
        let prev_virtual_env = env::var("VIRTUAL_ENV").ok();
        let prev_path = env::var("PATH").ok();

        set_env_var("VIRTUAL_ENV", &venv.dir.to_string_lossy());

        let mut entries = vec![venv.bin_dir.clone()];
        if let Some(ref old) = prev_path {
            entries.extend(env::split_paths(old));
        }
        if let Ok(joined) = env::join_paths(entries) {
            set_env_var("PATH", &joined.to_string_lossy());
        }
        tracing::debug!(venv = %venv.dir.display(), "activated virtual environment");
        Self {
            prev_virtual_env,
            prev_path,
        }
    }
}

impl Drop for VenvActivation {
    fn drop(&mut self) {
        match self.prev_virtual_env.take() {
            Some(v) => set_env_var("VIRTUAL_ENV", &v),
            None => remove_env_var("VIRTUAL_ENV"),
        }
        match self.prev_path.take() {
            Some(v) => set_env_var("PATH", &v),
            None => remove_env_var("PATH"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TEST_ENV_LOCK;

    #[test]
    fn test_cwd_guard_restores_on_drop() {
        let _lock = TEST_ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let before = env::current_dir().expect("cwd");
        let tmp = tempfile::tempdir().expect("tempdir");
        {
            let _guard = CwdGuard::enter(tmp.path()).expect("enter");
            let inside = env::current_dir().expect("cwd");
            assert_eq!(
                inside.canonicalize().expect("canonicalize"),
                tmp.path().canonicalize().expect("canonicalize")
            );
        }
        assert_eq!(env::current_dir().expect("cwd"), before);
    }

    #[test]
    fn test_cwd_guard_restores_across_panic() {
        let _lock = TEST_ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let before = env::current_dir().expect("cwd");
        let tmp = tempfile::tempdir().expect("tempdir");
        let tmp_path = tmp.path().to_path_buf();

        let result = std::panic::catch_unwind(move || {
            let _guard = CwdGuard::enter(&tmp_path).expect("enter");
            panic!("step failed mid-flight");
        });
        assert!(result.is_err());
        assert_eq!(env::current_dir().expect("cwd"), before);
    }

    #[test]
    fn test_venv_activation_restores_env() {
        let _lock = TEST_ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let tmp = tempfile::tempdir().expect("tempdir");
        let venv = Venv {
            dir: tmp.path().to_path_buf(),
            bin_dir: tmp.path().join("bin"),
            python: tmp.path().join("bin").join("python"),
            activate: tmp.path().join("bin").join("activate"),
        };

        let prev_virtual_env = env::var("VIRTUAL_ENV").ok();
        let prev_path = env::var("PATH").ok();
        {
            let _activation = VenvActivation::activate(&venv);
            assert_eq!(
                env::var("VIRTUAL_ENV").expect("VIRTUAL_ENV set"),
                tmp.path().to_string_lossy()
            );
            let path = env::var("PATH").expect("PATH set");
            let first = env::split_paths(&path).next().expect("non-empty PATH");
            assert_eq!(first, tmp.path().join("bin"));
        }
        assert_eq!(env::var("VIRTUAL_ENV").ok(), prev_virtual_env);
        assert_eq!(env::var("PATH").ok(), prev_path);
    }
}
