//! Whole-file reads and crash-safe writes
//!
//! Writes land in a locked sibling temp file first and are renamed over the
//! target, so readers see either the old content or the new one.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::{Error, NormalizedPath, Result};

/// Who may read a file written by [`write_atomic`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileAccess {
    /// Default permissions from the process umask
    #[default]
    Shared,
    /// Readable and writable by the owner only (`0600` on unix).
    /// Used for files holding credentials.
    OwnerOnly,
}

/// Replace the file at `path` with `content`.
///
/// Parent directories are created as needed. The temp file is removed if
/// any step before the rename fails.
pub fn write_atomic(path: &NormalizedPath, content: &[u8], access: FileAccess) -> Result<()> {
    let target = path.to_native();
    if let Some(parent) = target.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let staging = staging_path(&target);
    let written = write_staged(&staging, &target, content, access)
        .and_then(|()| fs::rename(&staging, &target).map_err(|e| Error::io(&target, e)));
    if let Err(e) = written {
        if let Err(cleanup) = fs::remove_file(&staging)
            && cleanup.kind() != std::io::ErrorKind::NotFound
        {
            tracing::warn!(path = %staging.display(), error = %cleanup, "Could not remove temp file");
        }
        return Err(e);
    }

    tracing::debug!(path = %path, bytes = content.len(), ?access, "Wrote file");
    Ok(())
}

/// Read text content from a file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// `.<name>.<pid>.tmp` next to the target, so the rename stays on one filesystem
fn staging_path(target: &Path) -> PathBuf {
    let name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    target.with_file_name(format!(".{name}.{}.tmp", std::process::id()))
}

fn write_staged(staging: &Path, target: &Path, content: &[u8], access: FileAccess) -> Result<()> {
    let mut file = open_staging(staging, access)?;
    let lock_failed = || Error::LockFailed {
        path: target.to_path_buf(),
    };

    file.lock_exclusive().map_err(|_| lock_failed())?;
    file.write_all(content).map_err(|e| Error::io(staging, e))?;
    file.sync_all().map_err(|e| Error::io(staging, e))?;
    file.unlock().map_err(|_| lock_failed())
}

fn open_staging(staging: &Path, access: FileAccess) -> Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    if access == FileAccess::OwnerOnly {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let file = options.open(staging).map_err(|e| Error::io(staging, e))?;

    // A leftover temp file keeps its old mode when reopened
    #[cfg(unix)]
    if access == FileAccess::OwnerOnly {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))
            .map_err(|e| Error::io(staging, e))?;
    }

    Ok(file)
}
