//! Fan-out/fan-in execution of one transfer per folder

use std::collections::BTreeSet;
use std::sync::Arc;

use selsync_fs::NormalizedPath;

use crate::config::ConfigHandle;
use crate::error::{Error, Result};
use crate::folders::folder_path;

use super::action::{ActionOutcome, SyncAction};
use super::command::TransferCommand;
use super::paths::ResolvedPaths;
use super::runner::TransferRunner;

/// Runs a sync action across many folders at once
///
/// Every requested folder gets its own task and its own transfer process.
/// Failures stay local to their folder: they are reported in that folder's
/// [`ActionOutcome`] and never cancel or delay the others.
///
/// There is no timeout. A transfer that hangs keeps its task, and the whole
/// batch, waiting.
#[derive(Clone)]
pub struct SyncOrchestrator {
    config: ConfigHandle,
    runner: Arc<dyn TransferRunner>,
}

impl SyncOrchestrator {
    pub fn new(config: ConfigHandle, runner: Arc<dyn TransferRunner>) -> Self {
        Self { config, runner }
    }

    pub fn config(&self) -> &ConfigHandle {
        &self.config
    }

    pub(crate) fn runner(&self) -> &dyn TransferRunner {
        self.runner.as_ref()
    }

    /// Execute `action` on every folder in `folders`
    ///
    /// Returns exactly one outcome per distinct folder identifier, sorted by
    /// identifier. The call returns only after every folder's task has
    /// finished. Every problem, including a missing project selection, is
    /// reported in the affected folder's outcome.
    pub async fn execute_action<I, S>(
        &self,
        folders: I,
        action: SyncAction,
        dry: bool,
    ) -> Vec<ActionOutcome>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let targets: BTreeSet<String> = folders.into_iter().map(Into::into).collect();

        tracing::info!(
            %action,
            dry,
            folders = targets.len(),
            project = %self.config.selected_project(),
            "Starting sync batch"
        );

        let handles: Vec<_> = targets
            .into_iter()
            .map(|target| {
                let config = self.config.clone();
                let runner = Arc::clone(&self.runner);
                let task_target = target.clone();
                let handle = tokio::spawn(async move {
                    run_folder(&config, runner.as_ref(), &task_target, action, dry).await
                });
                (target, handle)
            })
            .collect();

        // Join barrier: every task is awaited, in identifier order.
        let mut outcomes = Vec::with_capacity(handles.len());
        for (target, handle) in handles {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                Err(join_error) => {
                    tracing::warn!(folder = %target, error = %join_error, "Sync task aborted");
                    ActionOutcome::failure(target, format!("Sync task aborted: {join_error}"))
                }
            };
            outcomes.push(outcome);
        }

        let failed = outcomes.iter().filter(|o| !o.is_success()).count();
        tracing::info!(
            %action,
            dry,
            succeeded = outcomes.len() - failed,
            failed,
            "Sync batch finished"
        );
        outcomes
    }
}

/// One unit of work: look up, resolve, check, build, run
async fn run_folder(
    config: &ConfigHandle,
    runner: &dyn TransferRunner,
    target: &str,
    action: SyncAction,
    dry: bool,
) -> ActionOutcome {
    let paths = match resolve_folder(config, target) {
        Ok(paths) => paths,
        Err(err) => {
            tracing::warn!(folder = target, error = %err, "Skipping folder");
            return ActionOutcome::failure(target, err.to_string());
        }
    };
    run_resolved(runner, target, &paths, action, dry).await
}

fn resolve_folder(config: &ConfigHandle, target: &str) -> Result<ResolvedPaths> {
    let connection = config.active_connection()?;
    let folder = config.folder(target).ok_or_else(|| Error::FolderNotFound {
        name: target.to_string(),
    })?;
    folder_path(&folder.local_path)?;
    Ok(ResolvedPaths::for_folder(&connection, &folder))
}

/// Existence check, command build and run for already-resolved paths
///
/// Shared by per-folder syncs and the full backup.
pub(crate) async fn run_resolved(
    runner: &dyn TransferRunner,
    target: &str,
    paths: &ResolvedPaths,
    action: SyncAction,
    dry: bool,
) -> ActionOutcome {
    match transfer(runner, paths, action, dry).await {
        Ok(output) => {
            tracing::debug!(folder = target, "Transfer succeeded");
            ActionOutcome::success(target, output)
        }
        Err(err) => {
            tracing::warn!(folder = target, error = %err, "Transfer failed");
            ActionOutcome::failure(target, err.to_string())
        }
    }
}

async fn transfer(
    runner: &dyn TransferRunner,
    paths: &ResolvedPaths,
    action: SyncAction,
    dry: bool,
) -> Result<String> {
    if action.requires_local_folder() {
        ensure_local_exists(&paths.local)?;
    }
    let command = TransferCommand::build(&paths.remote, &paths.local, action, dry);
    runner.run(&command).await
}

fn ensure_local_exists(local: &NormalizedPath) -> Result<()> {
    match local.try_exists() {
        Ok(true) => Ok(()),
        Ok(false) => Err(Error::PathMissing {
            path: local.to_string(),
        }),
        Err(source) => Err(selsync_fs::Error::io(local.to_native(), source).into()),
    }
}
