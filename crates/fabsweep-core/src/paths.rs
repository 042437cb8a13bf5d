//! Repository-relative path resolution for the teardown flow.
//!
//! The delegated script lives in `infra/scripts/fabric/` next to its manifest;
//! the virtual environment is created at `.venv` under the repository root.

use anyhow::{Context, Result};
use serde::Serialize;
use std::env;
use std::path::{Path, PathBuf};

use crate::config::env_keys;
use crate::config::loader::env_optional;

/// Directory under the repository root holding infrastructure scripts.
const SCRIPTS_SUBDIRS: [&str; 2] = ["infra", "scripts"];
/// Sibling directory containing the delegated teardown script.
const FABRIC_SUBDIR: &str = "fabric";
/// Dependency manifest consumed by pip.
const REQUIREMENTS_FILE: &str = "requirements.txt";
/// Virtual environment directory, fixed under the repository root.
const VENV_SUBDIR: &str = ".venv";
/// The delegated script, invoked with no positional arguments.
pub const DELETE_SCRIPT: &str = "fabric_delete_workspace.py";

/// Resolved filesystem locations for one teardown run.
#[derive(Debug, Clone, Serialize)]
pub struct TeardownPaths {
    pub repo_root: PathBuf,
    pub scripts_dir: PathBuf,
    pub fabric_dir: PathBuf,
    pub manifest: PathBuf,
    pub venv_dir: PathBuf,
}

impl TeardownPaths {
    /// Resolve all paths from a repository root.
    ///
    /// Root priority: CLI flag > `FABSWEEP_REPO_ROOT` > upward search from the
    /// current directory. Fails if the fabric scripts directory is missing.
    pub fn resolve(cli_root: Option<&str>) -> Result<Self> {
        let repo_root = match cli_root
            .map(String::from)
            .or_else(|| env_optional(env_keys::FABSWEEP_REPO_ROOT, &[]))
        {
            Some(root) => PathBuf::from(root),
            None => {
                let cwd = env::current_dir().context("read current directory")?;
                find_repo_root(&cwd)?
            }
        };
        Self::from_root(&repo_root)
    }

    /// Resolve all paths under an explicit repository root.
    pub fn from_root(repo_root: &Path) -> Result<Self> {
        let scripts_dir = repo_root.join(SCRIPTS_SUBDIRS[0]).join(SCRIPTS_SUBDIRS[1]);
        let fabric_dir = scripts_dir.join(FABRIC_SUBDIR);
        if !fabric_dir.is_dir() {
            anyhow::bail!(
                "fabric scripts directory not found: {} (pass --repo-root or set {})",
                fabric_dir.display(),
                env_keys::FABSWEEP_REPO_ROOT
            );
        }
        Ok(Self {
            repo_root: repo_root.to_path_buf(),
            manifest: fabric_dir.join(REQUIREMENTS_FILE),
            venv_dir: repo_root.join(VENV_SUBDIR),
            scripts_dir,
            fabric_dir,
        })
    }

    /// Full path of the delegated teardown script.
    pub fn delegated_script(&self) -> PathBuf {
        self.fabric_dir.join(DELETE_SCRIPT)
    }
}

/// Walk up from `start` to the first ancestor containing `infra/scripts/fabric`.
fn find_repo_root(start: &Path) -> Result<PathBuf> {
    for dir in start.ancestors() {
        if dir
            .join(SCRIPTS_SUBDIRS[0])
            .join(SCRIPTS_SUBDIRS[1])
            .join(FABRIC_SUBDIR)
            .is_dir()
        {
            return Ok(dir.to_path_buf());
        }
    }
    anyhow::bail!(
        "could not locate a repository root above {} (pass --repo-root or set {})",
        start.display(),
        env_keys::FABSWEEP_REPO_ROOT
    )
}
