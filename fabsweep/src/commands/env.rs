//! Environment management: remove the cached virtual environment.
//!
//! The venv lives at `.venv` under the repository root and is recreated on the
//! next `fabsweep run`.

use anyhow::Result;
use std::fs;
use std::path::Path;

use fabsweep_core::paths::TeardownPaths;

/// `fabsweep clean-env`
pub fn cmd_clean(repo_root: Option<&str>, dry_run: bool, force: bool) -> Result<()> {
    let paths = TeardownPaths::resolve(repo_root)?;
    let venv_dir = &paths.venv_dir;

    if !venv_dir.exists() {
        eprintln!("No virtual environment found at {}", venv_dir.display());
        return Ok(());
    }

    let size = dir_size(venv_dir);
    eprintln!(
        "🗂  Virtual environment: {} ({})",
        venv_dir.display(),
        format_size(size)
    );

    if dry_run {
        eprintln!();
        eprintln!("(Dry run — no files removed. Remove --dry-run to delete.)");
        return Ok(());
    }

    if !force {
        eprint!("\nRemove the virtual environment? [y/N] ");
        let mut answer = String::new();
        std::io::stdin().read_line(&mut answer)?;
        if !matches!(answer.trim().to_lowercase().as_str(), "y" | "yes") {
            eprintln!("Cancelled.");
            return Ok(());
        }
    }

    fs::remove_dir_all(venv_dir)?;
    eprintln!("✓ Removed {}", venv_dir.display());
    Ok(())
}

/// Recursive directory size in bytes.
fn dir_size(path: &Path) -> u64 {
    let mut total = 0;
    if let Ok(entries) = fs::read_dir(path) {
        for entry in entries.flatten() {
            let p = entry.path();
            if p.is_dir() {
                total += dir_size(&p);
            } else if let Ok(meta) = entry.metadata() {
                total += meta.len();
            }
        }
    }
    total
}

fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
