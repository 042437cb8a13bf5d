use clap::{Parser, Subcommand};

/// fabsweep - bootstrap a Python environment and tear down a Fabric workspace
#[derive(Parser, Debug)]
#[command(name = "fabsweep")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Set up the Python environment and run the workspace teardown script
    Run {
        /// Repository root (default: FABSWEEP_REPO_ROOT or upward search from cwd)
        #[arg(long, value_name = "DIR")]
        repo_root: Option<String>,

        /// Python interpreter to use, taken as-is (default: probe python3, python)
        #[arg(long, value_name = "PATH")]
        python: Option<String>,

        /// Skip the virtual environment and run with the system interpreter
        #[arg(long, default_value = "false")]
        skip_venv: bool,

        /// Skip dependency installation
        #[arg(long, default_value = "false")]
        skip_deps: bool,

        /// Skip the best-effort pip self-upgrade
        #[arg(long, default_value = "false")]
        skip_pip_upgrade: bool,
    },

    /// Show resolved paths, the interpreter, and workspace env var status
    Info {
        /// Repository root (default: FABSWEEP_REPO_ROOT or upward search from cwd)
        #[arg(long, value_name = "DIR")]
        repo_root: Option<String>,

        /// Python interpreter to report, taken as-is (default: probe python3, python)
        #[arg(long, value_name = "PATH")]
        python: Option<String>,

        /// Output as structured JSON
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Remove the cached virtual environment
    CleanEnv {
        /// Repository root (default: FABSWEEP_REPO_ROOT or upward search from cwd)
        #[arg(long, value_name = "DIR")]
        repo_root: Option<String>,

        /// List what would be removed without deleting anything
        #[arg(long, default_value = "false")]
        dry_run: bool,

        /// Remove without asking for confirmation
        #[arg(long, default_value = "false")]
        force: bool,
    },
}
