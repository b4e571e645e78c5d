//! Remote selection and rclone config commands

use std::path::PathBuf;

use colored::Colorize;
use serde_json::json;

use selsync_core::locate_rclone_config;
use selsync_fs::NormalizedPath;

use crate::context::AppContext;
use crate::error::Result;

/// List configured remote connections, marking the selected one
///
/// Keys and account names are never printed.
pub fn run_remotes(ctx: &AppContext, json: bool) -> Result<()> {
    let global = ctx.manager().handle().global();

    if json {
        let remotes: Vec<_> = global
            .remotes
            .iter()
            .map(|(name, remote)| {
                json!({
                    "name": name,
                    "selected": *name == global.selected_project,
                    "remote_name": remote.remote_name,
                    "bucket_name": remote.bucket_name,
                    "type": remote.remote_type,
                    "local_path": remote.local_path,
                    "full_backup_path": remote.full_backup_path,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&remotes)?);
        return Ok(());
    }

    if global.remotes.is_empty() {
        println!(
            "No remotes configured. Add one to {}",
            ctx.manager().global_config_path().as_str().cyan()
        );
        return Ok(());
    }

    for (name, remote) in &global.remotes {
        let marker = if *name == global.selected_project {
            "*".green().bold()
        } else {
            " ".normal()
        };
        println!(
            "{} {} {} {}",
            marker,
            name.bold(),
            format!("{}:{}", remote.remote_name, remote.bucket_name).cyan(),
            remote.local_path.dimmed()
        );
    }
    Ok(())
}

/// Select a project and load its folder list
pub fn run_select(ctx: &AppContext, project: &str) -> Result<()> {
    let config = ctx.manager().select_project(project)?;
    println!(
        "{} Selected project {} ({} folders)",
        "OK".green().bold(),
        project.cyan(),
        config.folders.len()
    );
    Ok(())
}

/// Write rclone's config file for every configured remote
pub async fn run_rclone_config(ctx: &AppContext, path: Option<PathBuf>) -> Result<()> {
    let path = match path {
        Some(path) => NormalizedPath::new(path),
        None => locate_rclone_config(ctx.runner()).await?,
    };
    ctx.manager().write_rclone_config(&path)?;
    println!(
        "{} Wrote rclone config to {}",
        "OK".green().bold(),
        path.as_str().cyan()
    );
    Ok(())
}
