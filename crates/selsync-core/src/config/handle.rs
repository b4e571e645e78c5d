//! Shared in-memory configuration holder

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{Error, Result};

use super::model::{FolderEntry, GlobalConfig, ProjectConfig, RemoteConnection};

#[derive(Debug, Default)]
struct ConfigState {
    global: GlobalConfig,
    project: ProjectConfig,
}

/// Reader/writer-locked holder for the loaded global and project configs
///
/// Cloning the handle shares the same state. Readers (one per in-flight
/// folder sync) never block each other; edits such as folder registration
/// take the write lock for the whole check-and-update.
///
/// Accessors return owned values so no guard is ever held across an await.
#[derive(Debug, Clone, Default)]
pub struct ConfigHandle {
    inner: Arc<RwLock<ConfigState>>,
}

impl ConfigHandle {
    /// Create a handle over already-loaded configuration
    pub fn new(global: GlobalConfig, project: ProjectConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ConfigState { global, project })),
        }
    }

    // A panic while holding the lock leaves plain data behind; keep serving it.
    fn read(&self) -> RwLockReadGuard<'_, ConfigState> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ConfigState> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the global configuration
    pub fn global(&self) -> GlobalConfig {
        self.read().global.clone()
    }

    /// Snapshot of the project configuration
    pub fn project(&self) -> ProjectConfig {
        self.read().project.clone()
    }

    /// Name of the selected project, empty when none is selected
    pub fn selected_project(&self) -> String {
        self.read().global.selected_project.clone()
    }

    /// Remote connection of the selected project
    ///
    /// # Errors
    ///
    /// `NoProjectSelected` when the selection is empty, `RemoteNotFound`
    /// when it names a connection that does not exist.
    pub fn active_connection(&self) -> Result<RemoteConnection> {
        let state = self.read();
        let selected = &state.global.selected_project;
        if selected.is_empty() {
            return Err(Error::NoProjectSelected);
        }
        state
            .global
            .remotes
            .get(selected)
            .cloned()
            .ok_or_else(|| Error::RemoteNotFound {
                name: selected.clone(),
            })
    }

    /// All folder entries of the selected project
    pub fn active_project_folders(&self) -> BTreeMap<String, FolderEntry> {
        self.read().project.folders.clone()
    }

    /// Single folder entry of the selected project
    pub fn folder(&self, name: &str) -> Option<FolderEntry> {
        self.read().project.folders.get(name).cloned()
    }

    /// Replace the global configuration
    pub fn set_global(&self, global: GlobalConfig) {
        self.write().global = global;
    }

    /// Replace the project configuration
    pub fn set_project(&self, project: ProjectConfig) {
        self.write().project = project;
    }

    /// Change the selected project without touching the loaded folders
    pub fn set_selected_project(&self, name: impl Into<String>) {
        self.write().global.selected_project = name.into();
    }

    /// Mutate the project configuration under the write lock
    pub fn update_project<R>(&self, f: impl FnOnce(&mut ProjectConfig) -> R) -> R {
        f(&mut self.write().project)
    }
}
