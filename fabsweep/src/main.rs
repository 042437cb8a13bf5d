mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

use fabsweep_core::config::{load_dotenv, SetupFlags};
use fabsweep_core::observability;

fn main() {
    load_dotenv();
    observability::init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            repo_root,
            python,
            skip_venv,
            skip_deps,
            skip_pip_upgrade,
        } => {
            let flags = SetupFlags::from_env().with_cli_overrides(
                skip_venv,
                skip_deps,
                skip_pip_upgrade,
            );
            commands::run::cmd_run(repo_root.as_deref(), python.as_deref(), flags)
        }
        Commands::Info {
            repo_root,
            python,
            json,
        } => commands::info::cmd_info(repo_root.as_deref(), python.as_deref(), json),
        Commands::CleanEnv {
            repo_root,
            dry_run,
            force,
        } => commands::env::cmd_clean(repo_root.as_deref(), dry_run, force),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {:#}", e);
        eprintln!();
        eprintln!("Troubleshooting:");
        eprintln!("  • Ensure you are logged in with the Azure CLI: az login");
        eprintln!("  • Verify you have permission to delete the target workspace");
        eprintln!(
            "  • Check FABRIC_WORKSPACE_SUFFIX / FABRIC_WORKSPACE_NAME / FABRIC_WORKSPACE_ID"
        );
        std::process::exit(1);
    }
}
