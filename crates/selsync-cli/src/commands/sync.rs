//! Transfer, change detection and backup commands
//!
//! Every batch prints one row per folder. A batch with any failed folder
//! ends in an error after all rows are shown, so the exit status reflects it.

use colored::Colorize;
use serde_json::json;

use selsync_core::{ActionOutcome, SyncAction};

use crate::context::AppContext;
use crate::error::{CliError, Result};

/// Run `action` over `folders`
pub async fn run_transfer(
    ctx: &AppContext,
    action: SyncAction,
    folders: &[String],
    dry_run: bool,
    json: bool,
) -> Result<()> {
    ctx.load_project()?;

    if !json {
        println!(
            "{} {} {} folder(s){}...",
            "=>".blue().bold(),
            verb(action),
            folders.len(),
            if dry_run { " (dry run)" } else { "" }
        );
    }

    let outcomes = ctx
        .orchestrator()
        .execute_action(folders.iter().cloned(), action, dry_run)
        .await;

    report(&outcomes, json, || {
        json!({
            "action": action,
            "dry_run": dry_run,
            "outcomes": outcomes,
        })
    })
}

/// Show folders with local changes not yet pushed
pub async fn run_changes(ctx: &AppContext, json: bool) -> Result<()> {
    ctx.load_project()?;
    let folders = ctx.manager().handle().active_project_folders();

    if !json {
        println!(
            "{} Checking {} folder(s) for changes...",
            "=>".blue().bold(),
            folders.len()
        );
    }

    let changed = ctx
        .orchestrator()
        .detect_changed_folders(folders.into_keys())
        .await;

    if json {
        println!("{}", serde_json::to_string_pretty(&json!({ "changed": changed }))?);
    } else if changed.is_empty() {
        println!("{} No pending local changes.", "OK".green().bold());
    } else {
        println!("{} Folders with pending changes:", "CHANGED".yellow().bold());
        for name in &changed {
            println!("   {} {}", "~".yellow(), name.cyan());
        }
        println!();
        println!("Run {} to upload them.", "selsync push <folders..>".cyan());
    }
    Ok(())
}

/// Pull the whole bucket into the backup directory
pub async fn run_backup(ctx: &AppContext, dry_run: bool, json: bool) -> Result<()> {
    ctx.load_project()?;

    if !json {
        println!(
            "{} Backing up the whole bucket{}...",
            "=>".blue().bold(),
            if dry_run { " (dry run)" } else { "" }
        );
    }

    let outcomes = ctx.orchestrator().execute_full_backup(dry_run).await;

    report(&outcomes, json, || {
        json!({
            "dry_run": dry_run,
            "outcomes": outcomes,
        })
    })
}

fn verb(action: SyncAction) -> &'static str {
    match action {
        SyncAction::Push => "Pushing",
        SyncAction::Pull => "Pulling",
        SyncAction::CopyIn => "Copying in",
    }
}

/// Print outcomes and turn any failure into an error
fn report(
    outcomes: &[ActionOutcome],
    json: bool,
    document: impl FnOnce() -> serde_json::Value,
) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&document())?);
    } else {
        for outcome in outcomes {
            print_outcome(outcome);
        }
    }

    let failed = outcomes.iter().filter(|o| !o.is_success()).count();
    if failed > 0 {
        return Err(CliError::user(format!(
            "{failed} of {} folder(s) failed",
            outcomes.len()
        )));
    }
    Ok(())
}

fn print_outcome(outcome: &ActionOutcome) {
    match outcome.error() {
        None => {
            println!("   {} {}", "OK".green().bold(), outcome.target_folder());
            let output = outcome.output().unwrap_or_default().trim();
            for line in output.lines() {
                println!("      {}", line.dimmed());
            }
        }
        Some(error) => {
            println!(
                "   {} {}: {}",
                "ERROR".red().bold(),
                outcome.target_folder(),
                error
            );
        }
    }
}
