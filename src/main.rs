use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

use forgeup::install::{InstallContext, Orchestrator};
use forgeup::interaction::TerminalInteraction;
use forgeup::subprocess::SubprocessManager;
use forgeup::{hooks, interaction::UserInteraction};

/// Set up a project for the Forge developer toolkit
#[derive(Parser)]
#[command(name = "forgeup")]
#[command(about = "Set up a project for the Forge developer toolkit", long_about = None)]
struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the installation steps against a project
    Install {
        /// Project directory (defaults to the current directory)
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Prefer binaries from a local Forge checkout
        #[arg(long)]
        local: bool,

        /// Path to the local Forge checkout
        #[arg(long, requires = "local")]
        local_repo: Option<PathBuf>,
    },

    /// Internal hooks invoked by the editor integration
    #[command(hide = true)]
    Hook {
        #[command(subcommand)]
        command: HookCommands,
    },
}

#[derive(Subcommand)]
enum HookCommands {
    /// Remind the caller to continue an in-flight plan
    Continuation,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(cli.verbose >= 2)
        .init();

    debug!("forgeup started with verbosity level: {}", cli.verbose);

    let result = match cli.command {
        Some(Commands::Install {
            path,
            local,
            local_repo,
        }) => run_install(path, local, local_repo).await,
        Some(Commands::Hook {
            command: HookCommands::Continuation,
        }) => hooks::continuation::run(),
        None => run_install(None, false, None).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run_install(
    path: Option<PathBuf>,
    local: bool,
    local_repo: Option<PathBuf>,
) -> anyhow::Result<()> {
    let project_dir = match path {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    let ui: Arc<dyn UserInteraction> = Arc::new(TerminalInteraction::new());
    let mut ctx = InstallContext::new(project_dir, ui, SubprocessManager::production());
    if local {
        ctx = ctx.with_local_repo(local_repo);
    }

    let report = Orchestrator::standard().execute(&ctx).await?;

    ctx.ui.success(&format!(
        "Setup finished: {} step(s) applied, {} already satisfied",
        report.completed(),
        report.skipped()
    ));

    Ok(())
}
