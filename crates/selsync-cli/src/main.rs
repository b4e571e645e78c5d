//! selsync CLI
//!
//! The command-line interface for selective folder sync with cloud storage.

mod cli;
mod commands;
mod context;
mod error;

use clap::Parser;
use colored::Colorize;
use selsync_core::SyncAction;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cli::{Cli, Commands};
use context::AppContext;
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let Some(command) = cli.command else {
        // No command provided - show help hint
        println!("{} selective folder sync", "selsync".green().bold());
        println!();
        println!("Run {} for available commands.", "selsync --help".cyan());
        return Ok(());
    };

    let ctx = AppContext::load(cli.config_dir, cli.rclone)?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(execute_command(&ctx, command))
}

/// Log to stderr; `RUST_LOG` applies unless `--verbose` asks for everything
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"))
    };
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_ok() {
        tracing::debug!("Verbose mode enabled");
    }
}

async fn execute_command(ctx: &AppContext, command: Commands) -> Result<()> {
    match command {
        Commands::Remotes { json } => commands::run_remotes(ctx, json),
        Commands::Select { project } => commands::run_select(ctx, &project),
        Commands::Folders { json } => commands::run_folders(ctx, json),
        Commands::Register { name, path } => commands::run_register(ctx, &name, &path).await,
        Commands::Edit { name, rename, path } => {
            commands::run_edit(ctx, &name, rename.as_deref(), path.as_deref()).await
        }
        Commands::Deregister { name } => commands::run_deregister(ctx, &name).await,
        Commands::Create { folders } => commands::run_create(ctx, &folders),
        Commands::Delete { folders } => commands::run_delete(ctx, &folders),
        Commands::Push(args) => {
            commands::run_transfer(ctx, SyncAction::Push, &args.folders, args.dry_run, args.json)
                .await
        }
        Commands::Pull(args) => {
            commands::run_transfer(ctx, SyncAction::Pull, &args.folders, args.dry_run, args.json)
                .await
        }
        Commands::CopyIn(args) => {
            commands::run_transfer(ctx, SyncAction::CopyIn, &args.folders, args.dry_run, args.json)
                .await
        }
        Commands::Changes { json } => commands::run_changes(ctx, json).await,
        Commands::Backup { dry_run, json } => commands::run_backup(ctx, dry_run, json).await,
        Commands::RcloneConfig { path } => commands::run_rclone_config(ctx, path).await,
    }
}
