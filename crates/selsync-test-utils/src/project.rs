//! [`TestProject`] builder for selsync test scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value, json};
use tempfile::TempDir;

/// Connection name used as the selected project
pub const PROJECT_NAME: &str = "game";
/// rclone remote name of the test connection
pub const REMOTE_NAME: &str = "testremote";
/// Bucket of the test connection
pub const BUCKET_NAME: &str = "test-bucket";

/// A temporary selsync setup: config dir, project root and backup root.
///
/// Nothing is written to the config files until [`TestProject::write_configs`]
/// is called, so tests can shape the configuration first.
///
/// # Example
///
/// ```rust,no_run
/// use selsync_test_utils::TestProject;
///
/// let project = TestProject::new()
///     .with_folder("audio", "assets/audio")
///     .with_folder("art", "assets/art");
/// project.create_dir("assets/audio");
/// project.write_configs();
/// project.assert_file_exists("project/sync.json");
/// ```
pub struct TestProject {
    temp_dir: TempDir,
    folders: Vec<(String, String)>,
    selected: bool,
    backup: bool,
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProject {
    /// Create the directory tree with an empty project root.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("project")).unwrap();
        fs::create_dir_all(temp_dir.path().join("config")).unwrap();
        Self {
            temp_dir,
            folders: Vec::new(),
            selected: true,
            backup: true,
        }
    }

    /// Register a folder whose remote path mirrors `local_path`.
    pub fn with_folder(mut self, name: &str, local_path: &str) -> Self {
        self.folders.push((name.to_string(), local_path.to_string()));
        self
    }

    /// Leave `selected_project` empty in the global config.
    pub fn unselected(mut self) -> Self {
        self.selected = false;
        self
    }

    /// Leave `full_backup_path` empty on the connection.
    pub fn without_backup_path(mut self) -> Self {
        self.backup = false;
        self
    }

    /// Root of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Directory holding the global `config.json`.
    pub fn config_dir(&self) -> PathBuf {
        self.root().join("config")
    }

    /// Local root of the test project.
    pub fn project_root(&self) -> PathBuf {
        self.root().join("project")
    }

    /// Local root for full backups.
    pub fn backup_root(&self) -> PathBuf {
        self.root().join("backup")
    }

    /// Create a directory under the project root.
    pub fn create_dir(&self, relative: &str) -> PathBuf {
        let path = self.project_root().join(relative);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Write a file under the project root, creating parent directories.
    pub fn write_file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.project_root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    /// The global configuration as JSON.
    pub fn global_json(&self) -> Value {
        let backup = if self.backup {
            self.backup_root().to_string_lossy().into_owned()
        } else {
            String::new()
        };
        let selected = if self.selected { PROJECT_NAME } else { "" };
        json!({
            "selected_project": selected,
            "remotes": {
                PROJECT_NAME: {
                    "remote_name": REMOTE_NAME,
                    "bucket_name": BUCKET_NAME,
                    "type": "b2",
                    "account": "test-account",
                    "key": "test-key",
                    "local_path": self.project_root().to_string_lossy().into_owned(),
                    "full_backup_path": backup,
                }
            }
        })
    }

    /// The project configuration as JSON.
    pub fn project_json(&self) -> Value {
        let folders: Map<String, Value> = self
            .folders
            .iter()
            .map(|(name, path)| {
                (
                    name.clone(),
                    json!({ "local_path": path, "remote_path": path }),
                )
            })
            .collect();
        json!({ "allow_global_sync": false, "folders": folders })
    }

    /// Write `config/config.json` and `project/sync.json`.
    pub fn write_configs(&self) {
        let global = serde_json::to_string_pretty(&self.global_json()).unwrap();
        fs::write(self.config_dir().join("config.json"), global).unwrap();
        let project = serde_json::to_string_pretty(&self.project_json()).unwrap();
        fs::write(self.project_root().join("sync.json"), project).unwrap();
    }

    /// Parse a JSON file relative to the root.
    ///
    /// # Panics
    /// Panics if the file is missing or not valid JSON.
    pub fn read_json(&self, path: &str) -> Value {
        let full_path = self.root().join(path);
        let content = fs::read_to_string(&full_path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full_path.display()));
        serde_json::from_str(&content)
            .unwrap_or_else(|e| panic!("Invalid JSON in {}: {e}", full_path.display()))
    }

    /// Assert that `path` (relative to the root) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `path` (relative to the root) does **not** exist.
    pub fn assert_file_not_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            !full_path.exists(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }
}
