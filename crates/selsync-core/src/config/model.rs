//! Serializable configuration types

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One cloud storage target and the local roots mirrored against it
///
/// Keyed by connection name in [`GlobalConfig::remotes`]; the key doubles as
/// the project name shown to the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConnection {
    /// rclone remote name (the part before `:` in a remote path)
    pub remote_name: String,
    /// Bucket or container name
    pub bucket_name: String,
    /// rclone backend type (e.g. "b2", "s3")
    #[serde(rename = "type")]
    pub remote_type: String,
    /// Account identifier
    pub account: String,
    /// Secret key
    pub key: String,
    /// Local project root
    pub local_path: String,
    /// Local root for full-project backups
    pub full_backup_path: String,
}

/// One syncable subfolder of a project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FolderEntry {
    /// Path relative to the bucket root
    pub remote_path: String,
    /// Path relative to the connection's local project root
    pub local_path: String,
}

impl FolderEntry {
    /// Folder whose remote path mirrors its local path
    pub fn mirrored(local_path: impl Into<String>) -> Self {
        let local_path = local_path.into();
        Self {
            remote_path: local_path.clone(),
            local_path,
        }
    }
}

/// Contents of the global `config.json`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    /// Name of the selected project (a key of `remotes`), empty when none
    pub selected_project: String,
    /// Remote connections by name
    pub remotes: BTreeMap<String, RemoteConnection>,
}

/// Contents of a project's `sync.json`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub allow_global_sync: bool,
    /// Folder entries by logical name
    pub folders: BTreeMap<String, FolderEntry>,
}
