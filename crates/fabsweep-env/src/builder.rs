//! Build and reuse the isolated Python environment, install dependencies.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::EnvError;

/// A located virtual environment: directory, per-OS binary dir, interpreter,
/// and activation entry point.
#[derive(Debug, Clone)]
pub struct Venv {
    pub dir: PathBuf,
    pub bin_dir: PathBuf,
    pub python: PathBuf,
    pub activate: PathBuf,
}

impl Venv {
    /// Locate an existing environment under `dir`. Checks the Unix layout
    /// first, then the Windows one, so behavior does not depend on compile
    /// target alone.
    pub fn locate(dir: &Path) -> Option<Self> {
        let unix = dir.join("bin");
        let windows = dir.join("Scripts");
        if unix.join("python").exists() {
            Some(Self {
                dir: dir.to_path_buf(),
                python: unix.join("python"),
                activate: unix.join("activate"),
                bin_dir: unix,
            })
        } else if windows.join("python.exe").exists() {
            Some(Self {
                dir: dir.to_path_buf(),
                python: windows.join("python.exe"),
                activate: windows.join("activate"),
                bin_dir: windows,
            })
        } else {
            None
        }
    }
}

/// Ensure a virtual environment exists at `venv_dir`, creating it with
/// `<system_python> -m venv` when absent. Idempotent: an existing environment
/// is reused without re-running venv. The activation entry point must exist
/// either way.
pub fn ensure_venv(venv_dir: &Path, system_python: &Path) -> Result<Venv> {
    if let Some(venv) = Venv::locate(venv_dir) {
        tracing::info!(venv = %venv_dir.display(), "reusing existing virtual environment");
        return check_activation(venv);
    }

    tracing::info!(venv = %venv_dir.display(), "creating virtual environment");
    fs::create_dir_all(venv_dir).context("create venv dir")?;

    let out = Command::new(system_python)
        .arg("-m")
        .arg("venv")
        .arg(venv_dir)
        .output()
        .context("create venv")?;
    if !out.status.success() {
        anyhow::bail!("venv creation failed: {}", String::from_utf8_lossy(&out.stderr));
    }

    let venv = Venv::locate(venv_dir).ok_or_else(|| {
        anyhow::anyhow!(
            "venv created but no interpreter found under {}",
            venv_dir.display()
        )
    })?;
    check_activation(venv)
}

fn check_activation(venv: Venv) -> Result<Venv> {
    if !venv.activate.exists() {
        return Err(EnvError::ActivationMissing(venv.activate.clone()).into());
    }
    Ok(venv)
}

/// Best-effort pip self-upgrade. Failure is a warning; the run continues with
/// whatever pip version is present.
pub fn upgrade_pip(python: &Path) {
    match Command::new(python)
        .args(["-m", "pip", "install", "--upgrade", "pip"])
        .output()
    {
        Ok(out) if out.status.success() => {
            tracing::debug!("pip upgraded");
        }
        Ok(out) => {
            tracing::warn!(
                stderr = %String::from_utf8_lossy(&out.stderr).trim(),
                "pip upgrade failed; continuing with existing pip"
            );
        }
        Err(e) => {
            tracing::warn!(error = %e, "pip upgrade failed; continuing with existing pip");
        }
    }
}

/// Install dependencies from the manifest. A missing manifest or a failed
/// install is terminal.
pub fn install_requirements(python: &Path, manifest: &Path) -> Result<()> {
    if !manifest.exists() {
        return Err(EnvError::ManifestMissing(manifest.to_path_buf()).into());
    }

    let content = fs::read_to_string(manifest).context("read requirements manifest")?;
    let requirements = parse_requirements(&content);
    if requirements.is_empty() {
        tracing::info!(manifest = %manifest.display(), "manifest lists no dependencies");
        return Ok(());
    }
    tracing::info!(
        count = requirements.len(),
        manifest = %manifest.display(),
        "installing dependencies"
    );

    let out = Command::new(python)
        .args(["-m", "pip", "install", "-r"])
        .arg(manifest)
        .output()
        .context("pip install")?;
    if !out.status.success() {
        anyhow::bail!(
            "pip install failed: {}",
            String::from_utf8_lossy(&out.stderr)
        );
    }
    Ok(())
}

/// Requirement lines with blanks and `#` comments removed.
fn parse_requirements(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(String::from)
        .collect()
}
