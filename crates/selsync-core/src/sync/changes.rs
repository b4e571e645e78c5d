//! Pending-change detection from a dry-run push

use std::collections::BTreeSet;

use super::action::{ActionOutcome, SyncAction};
use super::orchestrator::SyncOrchestrator;

/// Text rclone prints for every transfer it skipped because of `--dry-run`
///
/// Appears in "Skipped copy as --dry-run is set" and "Skipped delete as
/// --dry-run is set" notices alike.
pub const DRY_RUN_CHANGE_MARKER: &str = "--dry-run is set";

impl ActionOutcome {
    /// Whether a dry-run transfer reported anything it would have changed
    pub fn has_pending_changes(&self) -> bool {
        self.output()
            .is_some_and(|output| output.contains(DRY_RUN_CHANGE_MARKER))
    }
}

impl SyncOrchestrator {
    /// Identifiers of folders whose local contents differ from the remote
    ///
    /// Runs a dry-run push over `folders`, so it only sees differences in
    /// the local-to-remote direction: a file changed only on the remote
    /// also shows up (push would delete or overwrite it), but a folder
    /// changed on both sides cannot be told apart from one changed locally.
    /// Folders whose dry run failed are not reported as changed.
    pub async fn detect_changed_folders<I, S>(&self, folders: I) -> BTreeSet<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let outcomes = self.execute_action(folders, SyncAction::Push, true).await;

        let changed = outcomes
            .into_iter()
            .filter(|outcome| {
                if let Some(error) = outcome.error() {
                    tracing::warn!(
                        folder = outcome.target_folder(),
                        error,
                        "Could not check folder for changes"
                    );
                }
                outcome.has_pending_changes()
            })
            .map(|outcome| outcome.target_folder().to_string())
            .collect::<BTreeSet<_>>();

        tracing::debug!(changed = changed.len(), "Change detection finished");
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_in_output_means_pending_changes() {
        let outcome = ActionOutcome::success(
            "audio",
            "2024/01/01 NOTICE: kick.wav: Skipped copy as --dry-run is set (size 1.2Mi)\n",
        );
        assert!(outcome.has_pending_changes());
    }

    #[test]
    fn clean_output_has_no_pending_changes() {
        let outcome = ActionOutcome::success("audio", "Transferred: 0 B / 0 B\n");
        assert!(!outcome.has_pending_changes());
    }

    #[test]
    fn failures_never_have_pending_changes() {
        let outcome = ActionOutcome::failure("audio", "Skipped copy as --dry-run is set");
        assert!(!outcome.has_pending_changes());
    }
}
