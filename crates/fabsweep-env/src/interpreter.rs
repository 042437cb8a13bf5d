//! System interpreter discovery.

use anyhow::Result;
use std::path::PathBuf;
use std::process::Command;

use crate::EnvError;

/// Candidate executable names, probed in order.
pub const CANDIDATES: &[&str] = &["python3", "python"];

/// Resolve the interpreter to use for setup and delegation.
///
/// An explicit override (CLI `--python` / `FABSWEEP_PYTHON`) is taken as-is;
/// otherwise the candidate list is probed.
pub fn resolve(override_path: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = override_path {
        tracing::debug!(interpreter = %path, "using explicit interpreter");
        return Ok(PathBuf::from(path));
    }
    probe(CANDIDATES)
}

/// Probe each candidate by invoking it with `--version`; the first that exits
/// successfully wins. No retries, no caching across runs.
pub fn probe(candidates: &[&str]) -> Result<PathBuf> {
    for name in candidates {
        let ok = matches!(
            Command::new(name).arg("--version").output(),
            Ok(out) if out.status.success()
        );
        if ok {
            if let Ok(abs) = which::which(name) {
                tracing::info!(interpreter = %abs.display(), "found system interpreter");
            }
            return Ok(PathBuf::from(name));
        }
    }
    Err(EnvError::MissingInterpreter {
        tried: candidates.join(", "),
    }
    .into())
}
