//! Concurrent multi-folder sync orchestration
//!
//! This module provides:
//! - **paths**: resolve a folder entry to its local path and qualified remote path
//! - **command**: map an action and dry-run flag to an rclone invocation
//! - **runner**: launch the transfer tool and capture its merged output
//! - **orchestrator**: fan one transfer out per folder and join every outcome
//! - **changes**: classify folders with pending changes from a dry-run push
//! - **backup**: pull the whole bucket into the project's backup root

mod action;
mod backup;
mod changes;
mod command;
mod orchestrator;
mod paths;
mod runner;

pub use action::{ActionOutcome, SyncAction};
pub use backup::FULL_BACKUP_TARGET;
pub use changes::DRY_RUN_CHANGE_MARKER;
pub use command::{DRY_RUN_FLAG, RCLONE_PROGRAM, TransferCommand};
pub use orchestrator::SyncOrchestrator;
pub use paths::ResolvedPaths;
pub(crate) use paths::qualify_remote;
pub use runner::{ProcessRunner, TransferRunner};
