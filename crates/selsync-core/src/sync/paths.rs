//! Local and remote path resolution

use selsync_fs::{NormalizedPath, normalize_relative};

use crate::config::{FolderEntry, RemoteConnection};

/// Absolute local path and fully qualified remote path of one transfer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub local: NormalizedPath,
    /// `<remote>:<bucket>[/<path>]`
    pub remote: String,
}

impl ResolvedPaths {
    /// Resolve a folder entry against its connection
    ///
    /// An empty remote name still yields a well-formed `:bucket/path`;
    /// callers check that a project is selected first.
    pub fn for_folder(connection: &RemoteConnection, folder: &FolderEntry) -> Self {
        Self {
            local: NormalizedPath::new(&connection.local_path).join(&folder.local_path),
            remote: qualify_remote(connection, &folder.remote_path),
        }
    }

    /// Resolve the full-backup location: backup root against the bucket root
    pub fn for_backup(connection: &RemoteConnection) -> Self {
        Self {
            local: NormalizedPath::new(&connection.full_backup_path),
            remote: qualify_remote(connection, ""),
        }
    }
}

pub(crate) fn qualify_remote(connection: &RemoteConnection, relative: &str) -> String {
    let relative = normalize_relative(relative);
    if relative.is_empty() {
        format!("{}:{}", connection.remote_name, connection.bucket_name)
    } else {
        format!(
            "{}:{}/{}",
            connection.remote_name, connection.bucket_name, relative
        )
    }
}
