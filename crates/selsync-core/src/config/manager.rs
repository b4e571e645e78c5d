//! Loading and saving of the global and project configuration files

use selsync_fs::io::{self, FileAccess};
use selsync_fs::{ConfigStore, NormalizedPath};

use crate::error::{Error, Result};

use super::handle::ConfigHandle;
use super::model::{GlobalConfig, ProjectConfig};
use super::rclone::render_rclone_config;

/// File name of the global configuration inside the config directory
pub const GLOBAL_CONFIG_FILE: &str = "config.json";
/// File name of the project configuration inside a project root
pub const PROJECT_CONFIG_FILE: &str = "sync.json";

/// Application directory name under the platform config directory
const APP_DIR: &str = "selsync";

/// Owns the on-disk locations of both configuration layers and keeps the
/// shared [`ConfigHandle`] in step with them.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: NormalizedPath,
    store: ConfigStore,
    handle: ConfigHandle,
}

impl ConfigManager {
    /// Create a manager rooted at `config_dir` with empty configuration
    pub fn new(config_dir: NormalizedPath) -> Self {
        Self {
            config_dir,
            store: ConfigStore::new(),
            handle: ConfigHandle::default(),
        }
    }

    /// `<platform config dir>/selsync`
    pub fn default_config_dir() -> Result<NormalizedPath> {
        let base = dirs::config_dir().ok_or(Error::ConfigDirUnavailable)?;
        Ok(NormalizedPath::new(base).join(APP_DIR))
    }

    /// Shared configuration handle
    pub fn handle(&self) -> ConfigHandle {
        self.handle.clone()
    }

    pub fn config_dir(&self) -> &NormalizedPath {
        &self.config_dir
    }

    /// Path of the global `config.json`
    pub fn global_config_path(&self) -> NormalizedPath {
        self.config_dir.join(GLOBAL_CONFIG_FILE)
    }

    /// Path of the selected project's `sync.json`
    pub fn project_config_path(&self) -> Result<NormalizedPath> {
        let connection = self.handle.active_connection()?;
        Ok(NormalizedPath::new(&connection.local_path).join(PROJECT_CONFIG_FILE))
    }

    /// Load the global configuration, creating a default file when absent
    pub fn load_global(&self) -> Result<GlobalConfig> {
        let path = self.global_config_path();
        let (global, _created): (GlobalConfig, bool) = self.store.load_or_create(&path)?;
        tracing::debug!(path = %path, remotes = global.remotes.len(), "Loaded global config");
        self.handle.set_global(global.clone());
        Ok(global)
    }

    /// Write the in-memory global configuration to disk
    pub fn save_global(&self) -> Result<()> {
        self.store
            .save(&self.global_config_path(), &self.handle.global())?;
        Ok(())
    }

    /// Load the selected project's `sync.json`, creating a default when absent
    ///
    /// # Errors
    ///
    /// Fails when no project is selected, before touching the filesystem.
    pub fn load_project(&self) -> Result<ProjectConfig> {
        let path = self.project_config_path()?;
        let (project, _created): (ProjectConfig, bool) = self.store.load_or_create(&path)?;
        tracing::debug!(path = %path, folders = project.folders.len(), "Loaded project config");
        self.handle.set_project(project.clone());
        Ok(project)
    }

    /// Write the in-memory project configuration to the project's `sync.json`
    pub fn save_project(&self) -> Result<NormalizedPath> {
        let path = self.project_config_path()?;
        self.store.save(&path, &self.handle.project())?;
        Ok(path)
    }

    /// Select a project, persist the selection and load its folders
    pub fn select_project(&self, name: &str) -> Result<ProjectConfig> {
        if !self.handle.global().remotes.contains_key(name) {
            return Err(Error::RemoteNotFound {
                name: name.to_string(),
            });
        }
        self.handle.set_selected_project(name);
        self.save_global()?;
        tracing::info!(project = name, "Selected project");
        self.load_project()
    }

    /// Write rclone's credential file for every configured remote
    ///
    /// The file holds account keys, so it is readable by the owner only.
    pub fn write_rclone_config(&self, path: &NormalizedPath) -> Result<()> {
        let content = render_rclone_config(&self.handle.global());
        io::write_atomic(path, content.as_bytes(), FileAccess::OwnerOnly)?;
        tracing::info!(path = %path, "Rclone config written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FolderEntry, RemoteConnection};
    use tempfile::TempDir;

    fn manager_in(temp: &TempDir) -> ConfigManager {
        ConfigManager::new(NormalizedPath::new(temp.path().join("config")))
    }

    #[test]
    fn load_global_creates_default_file() {
        let temp = TempDir::new().unwrap();
        let manager = manager_in(&temp);

        let global = manager.load_global().unwrap();
        assert_eq!(global, GlobalConfig::default());
        assert!(manager.global_config_path().exists());
    }

    #[test]
    fn load_project_without_selection_fails() {
        let temp = TempDir::new().unwrap();
        let manager = manager_in(&temp);
        manager.load_global().unwrap();

        assert!(matches!(
            manager.load_project(),
            Err(Error::NoProjectSelected)
        ));
    }

    #[test]
    fn select_project_persists_and_loads_folders() {
        let temp = TempDir::new().unwrap();
        let project_root = temp.path().join("game");
        std::fs::create_dir_all(&project_root).unwrap();

        let manager = manager_in(&temp);
        let mut global = GlobalConfig::default();
        global.remotes.insert(
            "game".into(),
            RemoteConnection {
                remote_name: "b2".into(),
                bucket_name: "game-bucket".into(),
                local_path: project_root.to_string_lossy().into_owned(),
                ..Default::default()
            },
        );
        manager.handle().set_global(global);

        let project = manager.select_project("game").unwrap();
        assert!(project.folders.is_empty());
        assert!(project_root.join(PROJECT_CONFIG_FILE).exists());

        // Selection survives a reload from disk
        let reloaded = manager_in(&temp);
        assert_eq!(reloaded.load_global().unwrap().selected_project, "game");

        manager.handle().update_project(|p| {
            p.folders
                .insert("audio".into(), FolderEntry::mirrored("assets/audio"));
        });
        manager.save_project().unwrap();
        let project = reloaded.load_project().unwrap();
        assert!(project.folders.contains_key("audio"));
    }

    #[test]
    fn select_unknown_project_fails() {
        let temp = TempDir::new().unwrap();
        let manager = manager_in(&temp);
        manager.load_global().unwrap();

        let err = manager.select_project("missing").unwrap_err();
        assert!(matches!(err, Error::RemoteNotFound { .. }));
        assert_eq!(manager.handle().selected_project(), "");
    }

    #[cfg(unix)]
    #[test]
    fn rclone_config_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let manager = manager_in(&temp);
        let mut global = GlobalConfig::default();
        global.remotes.insert(
            "game".into(),
            RemoteConnection {
                remote_name: "b2".into(),
                bucket_name: "game-bucket".into(),
                key: "secret".into(),
                ..Default::default()
            },
        );
        manager.handle().set_global(global);

        let path = NormalizedPath::new(temp.path().join("rclone/rclone.conf"));
        manager.write_rclone_config(&path).unwrap();

        let metadata = std::fs::metadata(path.to_native()).unwrap();
        assert_eq!(metadata.permissions().mode() & 0o777, 0o600);
        assert!(std::fs::read_to_string(path.to_native()).unwrap().contains("key = secret"));
    }
}
