//! Folder registry and local folder commands

use std::collections::BTreeSet;

use colored::Colorize;
use serde_json::json;

use crate::context::AppContext;
use crate::error::{CliError, Result};

/// List the selected project's folders
pub fn run_folders(ctx: &AppContext, json: bool) -> Result<()> {
    ctx.load_project()?;
    let folders = ctx.manager().handle().active_project_folders();
    let present: BTreeSet<String> = ctx.folder_service().local_folders()?.into_iter().collect();

    if json {
        let rows: Vec<_> = folders
            .iter()
            .map(|(name, entry)| {
                json!({
                    "name": name,
                    "local_path": entry.local_path,
                    "remote_path": entry.remote_path,
                    "present": present.contains(name),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if folders.is_empty() {
        println!("No folders registered. Use {} to add one.", "selsync register".cyan());
        return Ok(());
    }

    for (name, entry) in &folders {
        let status = if present.contains(name) {
            "local".green()
        } else {
            "remote only".yellow()
        };
        println!("   {} {} [{}]", name.bold(), entry.local_path.dimmed(), status);
    }
    Ok(())
}

/// Register a folder and publish the project config
pub async fn run_register(ctx: &AppContext, name: &str, path: &str) -> Result<()> {
    ctx.load_project()?;
    let entry = ctx.folder_service().register_folder(name, path).await?;
    println!(
        "{} Registered {} at {}",
        "OK".green().bold(),
        name.cyan(),
        entry.local_path
    );
    Ok(())
}

/// Rename and/or re-point a folder and publish the project config
///
/// Whatever is not given keeps its current value.
pub async fn run_edit(
    ctx: &AppContext,
    name: &str,
    rename: Option<&str>,
    path: Option<&str>,
) -> Result<()> {
    if rename.is_none() && path.is_none() {
        return Err(CliError::user("Nothing to change. Pass --rename and/or --path."));
    }
    ctx.load_project()?;
    let current = ctx
        .manager()
        .handle()
        .folder(name)
        .ok_or_else(|| selsync_core::Error::FolderNotFound {
            name: name.to_string(),
        })?;

    let new_name = rename.unwrap_or(name);
    let path = path.unwrap_or(current.local_path.as_str());
    let entry = ctx.folder_service().edit_folder(name, new_name, path).await?;
    println!(
        "{} Updated {} -> {} at {}",
        "OK".green().bold(),
        name.cyan(),
        new_name.cyan(),
        entry.local_path
    );
    Ok(())
}

/// Deregister a folder and publish the project config
pub async fn run_deregister(ctx: &AppContext, name: &str) -> Result<()> {
    ctx.load_project()?;
    ctx.folder_service().deregister_folder(name).await?;
    println!("{} Deregistered {}", "OK".green().bold(), name.cyan());
    Ok(())
}

/// Create local directories for registered folders
pub fn run_create(ctx: &AppContext, folders: &[String]) -> Result<()> {
    ctx.load_project()?;
    for path in ctx.folder_service().create_local_folders(folders)? {
        println!("   {} {}", "+".green(), path);
    }
    Ok(())
}

/// Delete local directories of registered folders
pub fn run_delete(ctx: &AppContext, folders: &[String]) -> Result<()> {
    ctx.load_project()?;
    for path in ctx.folder_service().delete_local_folders(folders)? {
        println!("   {} {}", "-".red(), path);
    }
    Ok(())
}
