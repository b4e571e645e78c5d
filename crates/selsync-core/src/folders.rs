//! Folder registry: project folder entries and their local directories

use std::sync::Arc;

use selsync_fs::{NormalizedPath, escapes_root, normalize_relative};

use crate::config::{ConfigHandle, ConfigManager, FolderEntry, PROJECT_CONFIG_FILE, RemoteConnection};
use crate::error::{Error, Result};
use crate::sync::{TransferCommand, TransferRunner, qualify_remote};

/// Registers folders in the selected project and manages their local copies
///
/// Registry edits are persisted to the project's `sync.json` and the file is
/// then uploaded to the bucket root, so collaborators pulling the project
/// see the same folder list.
#[derive(Clone)]
pub struct FolderService {
    manager: ConfigManager,
    runner: Arc<dyn TransferRunner>,
}

impl FolderService {
    pub fn new(manager: ConfigManager, runner: Arc<dyn TransferRunner>) -> Self {
        Self { manager, runner }
    }

    fn config(&self) -> ConfigHandle {
        self.manager.handle()
    }

    /// Register `name` for the project-relative directory `local_path`
    ///
    /// The path is canonicalized (forward slashes, no empty or `.` segments,
    /// no leading or trailing slash) and used for the remote side as well.
    ///
    /// # Errors
    ///
    /// - `InvalidFolderPath` if the path is the project root or leaves it
    /// - `FolderExists` if `name` is taken
    /// - `PathCollision` if another entry already covers the same directory
    /// - `PathMissing` if the directory does not exist under the project root
    /// - any error from saving or uploading `sync.json`; the entry stays
    ///   registered locally in that case
    pub async fn register_folder(&self, name: &str, local_path: &str) -> Result<FolderEntry> {
        let connection = self.config().active_connection()?;
        let relative = folder_path(local_path)?;
        let full_path = NormalizedPath::new(&connection.local_path).join(&relative);
        let entry = FolderEntry::mirrored(relative.clone());

        self.config().update_project(|project| {
            if project.folders.contains_key(name) {
                return Err(Error::FolderExists {
                    name: name.to_string(),
                });
            }
            if project
                .folders
                .values()
                .any(|existing| normalize_relative(&existing.local_path) == relative)
            {
                return Err(Error::PathCollision {
                    path: relative.clone(),
                });
            }
            if !full_path.exists() {
                return Err(Error::PathMissing {
                    path: full_path.to_string(),
                });
            }
            project.folders.insert(name.to_string(), entry.clone());
            Ok(())
        })?;

        tracing::info!(folder = name, path = %relative, "Registered folder");
        self.publish_project_config(&connection).await?;
        Ok(entry)
    }

    /// Rename folder `name` to `new_name` and point it at `local_path`
    ///
    /// Either change may be a no-op: pass the current name or path to keep
    /// it. Validation matches [`register_folder`](Self::register_folder),
    /// except that the entry being edited never collides with itself.
    ///
    /// # Errors
    ///
    /// - `FolderNotFound` if `name` is not registered
    /// - `FolderExists` if `new_name` belongs to another entry
    /// - `InvalidFolderPath`, `PathCollision` or `PathMissing` for the path
    pub async fn edit_folder(
        &self,
        name: &str,
        new_name: &str,
        local_path: &str,
    ) -> Result<FolderEntry> {
        let connection = self.config().active_connection()?;
        let relative = folder_path(local_path)?;
        let full_path = NormalizedPath::new(&connection.local_path).join(&relative);
        let entry = FolderEntry::mirrored(relative.clone());

        self.config().update_project(|project| {
            if !project.folders.contains_key(name) {
                return Err(Error::FolderNotFound {
                    name: name.to_string(),
                });
            }
            if new_name != name && project.folders.contains_key(new_name) {
                return Err(Error::FolderExists {
                    name: new_name.to_string(),
                });
            }
            if project.folders.iter().any(|(other, existing)| {
                other != name && normalize_relative(&existing.local_path) == relative
            }) {
                return Err(Error::PathCollision {
                    path: relative.clone(),
                });
            }
            if !full_path.exists() {
                return Err(Error::PathMissing {
                    path: full_path.to_string(),
                });
            }
            project.folders.remove(name);
            project.folders.insert(new_name.to_string(), entry.clone());
            Ok(())
        })?;

        tracing::info!(folder = name, new_name, path = %relative, "Edited folder");
        self.publish_project_config(&connection).await?;
        Ok(entry)
    }

    /// Remove `name` from the project and publish the updated `sync.json`
    ///
    /// The local directory is left untouched.
    pub async fn deregister_folder(&self, name: &str) -> Result<FolderEntry> {
        let connection = self.config().active_connection()?;
        let removed = self
            .config()
            .update_project(|project| project.folders.remove(name))
            .ok_or_else(|| Error::FolderNotFound {
                name: name.to_string(),
            })?;

        tracing::info!(folder = name, "Deregistered folder");
        self.publish_project_config(&connection).await?;
        Ok(removed)
    }

    async fn publish_project_config(&self, connection: &RemoteConnection) -> Result<()> {
        let path = self.manager.save_project()?;
        let remote = qualify_remote(connection, PROJECT_CONFIG_FILE);
        let command = TransferCommand::upload_file(&path, &remote);
        self.runner.run(&command).await?;
        tracing::debug!(path = %path, remote = %remote, "Published project config");
        Ok(())
    }

    /// Create the local directory of each named folder
    ///
    /// Stops at the first failure; directories created before it are kept.
    ///
    /// # Errors
    ///
    /// `FolderNotFound` for an unregistered name, `PathExists` when the
    /// directory is already there.
    pub fn create_local_folders<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<NormalizedPath>> {
        let connection = self.config().active_connection()?;
        let mut created = Vec::with_capacity(names.len());

        for name in names {
            let path = self.local_path_of(&connection, name.as_ref())?;
            if path
                .try_exists()
                .map_err(|e| selsync_fs::Error::io(path.to_native(), e))?
            {
                return Err(Error::PathExists {
                    path: path.to_string(),
                });
            }
            std::fs::create_dir_all(path.to_native())
                .map_err(|e| selsync_fs::Error::io(path.to_native(), e))?;
            tracing::info!(folder = name.as_ref(), path = %path, "Created local folder");
            created.push(path);
        }

        Ok(created)
    }

    /// Delete the local directory tree of each named folder
    ///
    /// A directory that is already gone counts as deleted. The registry
    /// entries are kept, so the folders can be pulled again later.
    pub fn delete_local_folders<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<NormalizedPath>> {
        let connection = self.config().active_connection()?;
        let mut deleted = Vec::with_capacity(names.len());

        for name in names {
            let path = self.local_path_of(&connection, name.as_ref())?;
            match std::fs::remove_dir_all(path.to_native()) {
                Ok(()) => tracing::info!(folder = name.as_ref(), path = %path, "Deleted local folder"),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                    tracing::debug!(folder = name.as_ref(), path = %path, "Local folder already absent");
                }
                Err(e) => return Err(selsync_fs::Error::io(path.to_native(), e).into()),
            }
            deleted.push(path);
        }

        Ok(deleted)
    }

    /// Names of registered folders present on disk, sorted
    pub fn local_folders(&self) -> Result<Vec<String>> {
        let connection = self.config().active_connection()?;
        let root = NormalizedPath::new(&connection.local_path);
        let mut present = Vec::new();

        for (name, entry) in self.config().active_project_folders() {
            let path = root.join(&entry.local_path);
            let exists = path
                .try_exists()
                .map_err(|e| selsync_fs::Error::io(path.to_native(), e))?;
            if exists {
                present.push(name);
            } else {
                tracing::debug!(folder = %name, path = %path, "Folder not present locally");
            }
        }

        Ok(present)
    }

    /// Local directory of `name`; a hand-edited entry pointing at the
    /// project root or outside it is refused
    fn local_path_of(&self, connection: &RemoteConnection, name: &str) -> Result<NormalizedPath> {
        let entry = self.config().folder(name).ok_or_else(|| Error::FolderNotFound {
            name: name.to_string(),
        })?;
        let relative = folder_path(&entry.local_path)?;
        Ok(NormalizedPath::new(&connection.local_path).join(&relative))
    }
}

/// Canonical project-relative form of `local_path`
pub(crate) fn folder_path(local_path: &str) -> Result<String> {
    let relative = normalize_relative(local_path);
    if relative.is_empty() || escapes_root(&relative) {
        return Err(Error::InvalidFolderPath {
            path: local_path.to_string(),
        });
    }
    Ok(relative)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GlobalConfig;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingRunner {
        calls: Mutex<Vec<TransferCommand>>,
    }

    #[async_trait]
    impl TransferRunner for RecordingRunner {
        async fn run(&self, command: &TransferCommand) -> Result<String> {
            self.calls.lock().unwrap().push(command.clone());
            Ok(String::new())
        }
    }

    fn service(temp: &TempDir) -> (FolderService, Arc<RecordingRunner>) {
        let root = temp.path().join("project");
        std::fs::create_dir_all(&root).unwrap();

        let manager = ConfigManager::new(NormalizedPath::new(temp.path().join("config")));
        let mut global = GlobalConfig {
            selected_project: "game".into(),
            ..Default::default()
        };
        global.remotes.insert(
            "game".into(),
            RemoteConnection {
                remote_name: "r".into(),
                bucket_name: "b".into(),
                local_path: root.to_string_lossy().into_owned(),
                ..Default::default()
            },
        );
        manager.handle().set_global(global);

        let runner = Arc::new(RecordingRunner::default());
        (FolderService::new(manager, runner.clone()), runner)
    }

    #[tokio::test]
    async fn register_normalizes_and_publishes() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("project/assets/audio")).unwrap();
        let (service, runner) = service(&temp);

        let entry = service
            .register_folder("audio", "\\assets\\audio\\")
            .await
            .unwrap();

        assert_eq!(entry, FolderEntry::mirrored("assets/audio"));
        assert!(temp.path().join("project/sync.json").exists());

        let calls = runner.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].args[0], "copyto");
        assert_eq!(calls[0].args[2], "r:b/sync.json");
    }

    #[tokio::test]
    async fn register_rejects_colliding_path() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("project/art")).unwrap();
        let (service, _) = service(&temp);

        service.register_folder("art", "art").await.unwrap();
        let err = service.register_folder("art2", "/art/").await.unwrap_err();

        assert!(matches!(err, Error::PathCollision { ref path } if path == "art"));
    }

    #[tokio::test]
    async fn register_rejects_missing_directory_without_publishing() {
        let temp = TempDir::new().unwrap();
        let (service, runner) = service(&temp);

        let err = service.register_folder("ghost", "ghost").await.unwrap_err();

        assert!(matches!(err, Error::PathMissing { .. }));
        assert!(service.config().folder("ghost").is_none());
        assert!(runner.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn deregister_unknown_folder_fails() {
        let temp = TempDir::new().unwrap();
        let (service, _) = service(&temp);

        let err = service.deregister_folder("nope").await.unwrap_err();
        assert!(matches!(err, Error::FolderNotFound { .. }));
    }

    #[test]
    fn create_then_delete_local_folders() {
        let temp = TempDir::new().unwrap();
        let (service, _) = service(&temp);
        service.config().update_project(|p| {
            p.folders
                .insert("audio".into(), FolderEntry::mirrored("assets/audio"));
        });

        assert!(service.local_folders().unwrap().is_empty());

        service.create_local_folders(&["audio"]).unwrap();
        assert!(temp.path().join("project/assets/audio").is_dir());
        assert_eq!(service.local_folders().unwrap(), ["audio"]);

        let err = service.create_local_folders(&["audio"]).unwrap_err();
        assert!(matches!(err, Error::PathExists { .. }));

        service.delete_local_folders(&["audio"]).unwrap();
        assert!(!temp.path().join("project/assets/audio").exists());
        // Already gone is fine
        service.delete_local_folders(&["audio"]).unwrap();
    }

    #[test]
    fn folder_path_rejects_root_and_parent_segments() {
        assert_eq!(folder_path("./assets//audio/").unwrap(), "assets/audio");
        for path in ["", "/", ".", "./", "..", "assets/../.."] {
            assert!(
                matches!(folder_path(path), Err(Error::InvalidFolderPath { .. })),
                "{path:?} should be rejected"
            );
        }
    }

    #[test]
    fn delete_refuses_entry_pointing_at_project_root() {
        let temp = TempDir::new().unwrap();
        let (service, _) = service(&temp);
        service.config().update_project(|p| {
            p.folders.insert("everything".into(), FolderEntry::mirrored("."));
        });

        let err = service.delete_local_folders(&["everything"]).unwrap_err();

        assert!(matches!(err, Error::InvalidFolderPath { .. }));
        assert!(temp.path().join("project").is_dir());
    }
}
