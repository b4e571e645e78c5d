//! Mapping of sync actions onto rclone invocations

use selsync_fs::NormalizedPath;

use super::action::SyncAction;

/// Executable name of the transfer tool
pub const RCLONE_PROGRAM: &str = "rclone";
/// Flag that turns any transfer into a simulation
pub const DRY_RUN_FLAG: &str = "--dry-run";

/// A fully specified external-process invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl TransferCommand {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Build the transfer for one folder
    ///
    /// | Action | Arguments |
    /// |---|---|
    /// | Push | `sync <local> <remote>` |
    /// | Pull | `sync <remote> <local>` |
    /// | CopyIn | `copy <remote> <local>` |
    ///
    /// `--dry-run` is appended after source and destination when `dry`.
    pub fn build(remote: &str, local: &NormalizedPath, action: SyncAction, dry: bool) -> Self {
        let local = local.as_str().to_string();
        let remote = remote.to_string();

        let mut args = match action {
            SyncAction::Push => vec!["sync".to_string(), local, remote],
            SyncAction::Pull => vec!["sync".to_string(), remote, local],
            SyncAction::CopyIn => vec!["copy".to_string(), remote, local],
        };

        if dry {
            args.push(DRY_RUN_FLAG.to_string());
        }

        Self::new(RCLONE_PROGRAM, args)
    }

    /// Upload a single file to an exact remote path (`copyto`)
    pub fn upload_file(local_file: &NormalizedPath, remote: &str) -> Self {
        Self::new(
            RCLONE_PROGRAM,
            vec![
                "copyto".to_string(),
                local_file.as_str().to_string(),
                remote.to_string(),
            ],
        )
    }

    /// `rclone config file`
    pub fn config_file() -> Self {
        Self::new(RCLONE_PROGRAM, vec!["config".to_string(), "file".to_string()])
    }

    /// Whether this invocation only simulates
    pub fn is_dry_run(&self) -> bool {
        self.args.iter().any(|arg| arg == DRY_RUN_FLAG)
    }
}

impl std::fmt::Display for TransferCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}
