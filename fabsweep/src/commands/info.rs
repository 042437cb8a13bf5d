//! Pre-flight report: resolved paths, interpreter, workspace env var status.
//!
//! Values of the `FABRIC_*` variables are never printed, only whether each is
//! set — they identify (and can select) the workspace about to be deleted.

use anyhow::Result;
use serde::Serialize;

use fabsweep_core::config::{env_keys, env_optional, schema};
use fabsweep_core::paths::TeardownPaths;
use fabsweep_env::builder::Venv;
use fabsweep_env::interpreter;

#[derive(Debug, Serialize)]
struct InfoReport {
    #[serde(flatten)]
    paths: TeardownPaths,
    venv_present: bool,
    delegated_script_present: bool,
    manifest_present: bool,
    interpreter: Option<String>,
    workspace_env: Vec<EnvVarStatus>,
}

#[derive(Debug, Serialize)]
struct EnvVarStatus {
    name: String,
    set: bool,
}

/// `fabsweep info`
pub fn cmd_info(repo_root: Option<&str>, python_override: Option<&str>, json: bool) -> Result<()> {
    let paths = TeardownPaths::resolve(repo_root)?;
    let override_path = schema::interpreter_override(python_override);
    let interpreter = interpreter::resolve(override_path.as_deref())
        .ok()
        .map(|p| p.to_string_lossy().to_string());

    let report = InfoReport {
        venv_present: Venv::locate(&paths.venv_dir).is_some(),
        delegated_script_present: paths.delegated_script().exists(),
        manifest_present: paths.manifest.exists(),
        interpreter,
        workspace_env: env_keys::fabric::ALL
            .iter()
            .map(|name| EnvVarStatus {
                name: (*name).to_string(),
                set: env_optional(name, &[]).is_some(),
            })
            .collect(),
        paths,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Repository root:   {}", report.paths.repo_root.display());
    println!("Fabric scripts:    {}", report.paths.fabric_dir.display());
    println!(
        "Delegated script:  {} ({})",
        report.paths.delegated_script().display(),
        present(report.delegated_script_present)
    );
    println!(
        "Manifest:          {} ({})",
        report.paths.manifest.display(),
        present(report.manifest_present)
    );
    println!(
        "Virtual env:       {} ({})",
        report.paths.venv_dir.display(),
        present(report.venv_present)
    );
    println!(
        "Interpreter:       {}",
        report.interpreter.as_deref().unwrap_or("not found")
    );
    println!();
    println!("Workspace selection (read by the delegated script):");
    for var in &report.workspace_env {
        println!(
            "  {:<26} {}",
            var.name,
            if var.set { "set" } else { "unset" }
        );
    }
    Ok(())
}

fn present(p: bool) -> &'static str {
    if p {
        "present"
    } else {
        "missing"
    }
}
