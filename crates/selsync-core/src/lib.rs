//! Core orchestration layer for selsync
//!
//! This crate drives `rclone` across the named subfolders of a project:
//!
//! - **Configuration**: global remote connections and per-project folder
//!   entries, held behind a shared [`ConfigHandle`]
//! - **Sync**: one concurrent transfer per folder, joined into per-folder
//!   [`ActionOutcome`]s
//! - **Change detection**: dry-run pushes classified by rclone's skip notices
//! - **Full backup**: the whole bucket pulled into a local backup root
//! - **Folder registry**: registering folders and managing their local copies
//!
//! # Architecture
//!
//! ```text
//!                  selsync-cli
//!                       |
//!                 selsync-core
//!                 /           \
//!          selsync-fs       rclone (child process)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use selsync_core::{ConfigManager, ProcessRunner, SyncAction, SyncOrchestrator};
//!
//! async fn push_audio() -> selsync_core::Result<()> {
//!     let manager = ConfigManager::new(ConfigManager::default_config_dir()?);
//!     manager.load_global()?;
//!     manager.load_project()?;
//!
//!     let orchestrator = SyncOrchestrator::new(manager.handle(), Arc::new(ProcessRunner::new()));
//!     for outcome in orchestrator.execute_action(["audio"], SyncAction::Push, false).await {
//!         println!("{}: {}", outcome.target_folder(), outcome.is_success());
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod folders;
pub mod sync;

pub use config::{
    ConfigHandle, ConfigManager, FolderEntry, GlobalConfig, ProjectConfig, RemoteConnection,
    locate_rclone_config, render_rclone_config,
};
pub use error::{Error, Result};
pub use folders::FolderService;
pub use sync::{
    ActionOutcome, DRY_RUN_CHANGE_MARKER, FULL_BACKUP_TARGET, ProcessRunner, ResolvedPaths,
    SyncAction, SyncOrchestrator, TransferCommand, TransferRunner,
};
