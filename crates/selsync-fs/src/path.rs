//! Normalized path handling for cross-platform compatibility

use std::path::{Path, PathBuf};

/// A path normalized to use forward slashes internally.
///
/// Folder entries are stored with forward slashes so a `sync.json` written on
/// Windows stays valid on Unix. Paths are converted to platform-native form
/// only at I/O boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath {
    /// Internal representation always uses forward slashes
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    ///
    /// Converts backslashes to forward slashes for internal storage.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        let normalized = path_str.replace('\\', "/");
        Self { inner: normalized }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Join this path with a relative segment.
    ///
    /// The segment is normalized with [`normalize_relative`] first, so an
    /// empty segment (or one made only of slashes and dots) returns this path.
    pub fn join(&self, segment: &str) -> Self {
        let segment = normalize_relative(segment);
        if segment.is_empty() {
            return self.clone();
        }
        let joined = if self.inner.ends_with('/') || self.inner.is_empty() {
            format!("{}{}", self.inner, segment)
        } else {
            format!("{}/{}", self.inner, segment)
        };
        Self { inner: joined }
    }

    /// Check if this path exists on the filesystem.
    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }

    /// Check the path, distinguishing "missing" from other failures.
    ///
    /// Returns `Ok(false)` when nothing exists at the path and `Err` for
    /// anything else the OS reports (permission denied, broken mount, ...).
    pub fn try_exists(&self) -> std::io::Result<bool> {
        self.to_native().try_exists()
    }
}

/// Normalize a project-relative folder path.
///
/// Backslashes become forward slashes, then empty and `.` segments are
/// dropped, so `\\assets\\audio\\`, `./assets//audio` and `assets/audio`
/// compare equal. `..` segments are kept; callers that need the path to
/// stay below a root check it with [`escapes_root`].
pub fn normalize_relative(path: &str) -> String {
    path.replace('\\', "/")
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<_>>()
        .join("/")
}

/// Whether a relative path climbs out of the directory it is joined to
pub fn escapes_root(relative: &str) -> bool {
    relative.split(['/', '\\']).any(|segment| segment == "..")
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}
