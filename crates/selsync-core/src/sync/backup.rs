//! Whole-project backup from the bucket root

use crate::error::Error;

use super::action::{ActionOutcome, SyncAction};
use super::orchestrator::{SyncOrchestrator, run_resolved};
use super::paths::ResolvedPaths;

/// Target label reported for the full-backup outcome
pub const FULL_BACKUP_TARGET: &str = "<full backup>";

impl SyncOrchestrator {
    /// Mirror the entire bucket into the connection's backup root
    ///
    /// Always a pull: the remote is the source of truth for backups. The
    /// backup root must already exist. Returns a single outcome labelled
    /// [`FULL_BACKUP_TARGET`].
    pub async fn execute_full_backup(&self, dry: bool) -> Vec<ActionOutcome> {
        let connection = match self.config().active_connection() {
            Ok(connection) => connection,
            Err(err) => return vec![backup_failure(err)],
        };
        tracing::info!(dry, remote = %connection.remote_name, "Starting full backup");

        if connection.full_backup_path.trim().is_empty() {
            return vec![backup_failure(Error::BackupPathUnset {
                name: self.config().selected_project(),
            })];
        }

        let paths = ResolvedPaths::for_backup(&connection);
        let outcome = run_resolved(
            self.runner(),
            FULL_BACKUP_TARGET,
            &paths,
            SyncAction::Pull,
            dry,
        )
        .await;
        vec![outcome]
    }
}

fn backup_failure(err: Error) -> ActionOutcome {
    tracing::warn!(error = %err, "Full backup not started");
    ActionOutcome::failure(FULL_BACKUP_TARGET, err.to_string())
}
