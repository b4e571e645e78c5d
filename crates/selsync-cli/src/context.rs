//! Per-invocation application context
//!
//! Resolves the config directory and rclone program from the global flags,
//! loads the global configuration and hands out the core services.

use std::path::PathBuf;
use std::sync::Arc;

use selsync_core::{
    ConfigManager, FolderService, ProcessRunner, RemoteConnection, SyncOrchestrator,
    TransferRunner,
};
use selsync_fs::NormalizedPath;

use crate::error::{CliError, Result};

pub struct AppContext {
    manager: ConfigManager,
    runner: Arc<dyn TransferRunner>,
}

impl AppContext {
    /// Load the global configuration from `config_dir` (or the platform
    /// default) and set up the runner for `rclone` (or `rclone` on PATH).
    pub fn load(config_dir: Option<PathBuf>, rclone: Option<String>) -> Result<Self> {
        let config_dir = match config_dir {
            Some(dir) => NormalizedPath::new(dir),
            None => ConfigManager::default_config_dir()?,
        };
        let manager = ConfigManager::new(config_dir);
        manager.load_global()?;

        let runner: Arc<dyn TransferRunner> = match rclone {
            Some(program) => Arc::new(ProcessRunner::with_program(program)),
            None => Arc::new(ProcessRunner::new()),
        };

        Ok(Self { manager, runner })
    }

    pub fn manager(&self) -> &ConfigManager {
        &self.manager
    }

    pub fn runner(&self) -> &dyn TransferRunner {
        self.runner.as_ref()
    }

    /// Load the selected project's folders
    ///
    /// Fails with a hint when no project is selected.
    pub fn load_project(&self) -> Result<RemoteConnection> {
        let connection = self.manager.handle().active_connection().map_err(|e| match e {
            selsync_core::Error::NoProjectSelected => CliError::user(
                "No project selected. Run `selsync select <project>` first.",
            ),
            other => other.into(),
        })?;
        self.manager.load_project()?;
        tracing::debug!(project = %self.manager.handle().selected_project(), "Project loaded");
        Ok(connection)
    }

    pub fn orchestrator(&self) -> SyncOrchestrator {
        SyncOrchestrator::new(self.manager.handle(), Arc::clone(&self.runner))
    }

    pub fn folder_service(&self) -> FolderService {
        FolderService::new(self.manager.clone(), Arc::clone(&self.runner))
    }
}
