//! Error types for selsync-core

/// Result type for selsync-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in selsync-core operations
///
/// Inside a batch sync these are rendered into per-folder outcomes; only
/// the configuration errors that prevent a batch from starting at all are
/// returned to the caller directly.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No project is selected in the global configuration
    #[error("No project selected")]
    NoProjectSelected,

    /// Selected project has no remote connection entry
    #[error("Remote configuration not found for project '{name}'")]
    RemoteNotFound { name: String },

    /// Folder identifier is not registered in the project configuration
    #[error("Target folder '{name}' configuration not found in project configuration")]
    FolderNotFound { name: String },

    /// Folder identifier is already registered
    #[error("A folder with the name '{name}' is already configured for the selected project")]
    FolderExists { name: String },

    /// Normalized local path collides with an existing folder entry
    #[error("A folder with the local path '{path}' is already configured for the selected project")]
    PathCollision { path: String },

    /// Folder path is empty or climbs out of the project root
    #[error("Folder path '{path}' must name a directory inside the project root")]
    InvalidFolderPath { path: String },

    /// Expected local path is missing
    #[error("Local path does not exist: {path}")]
    PathMissing { path: String },

    /// Local path exists where it was expected to be absent
    #[error("Local path '{path}' already exists")]
    PathExists { path: String },

    /// Remote connection has no backup location configured
    #[error("No full backup path is configured for remote '{name}'")]
    BackupPathUnset { name: String },

    /// Action string did not name a known sync action
    #[error("Unsupported action: {action}")]
    UnsupportedAction { action: String },

    /// Transfer tool exited with a non-zero status
    #[error("Command failed (exit code {code}). Output: {output}")]
    CommandFailed {
        /// Exit code, or -1 when the process was terminated by a signal
        code: i32,
        /// Combined stdout and stderr
        output: String,
    },

    /// Transfer tool could not be started
    #[error("Failed to launch '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Tool output did not have the expected shape
    #[error("Unexpected output from '{command}': {output}")]
    UnexpectedOutput { command: String, output: String },

    /// Platform configuration directory could not be determined
    #[error("Could not determine the user configuration directory")]
    ConfigDirUnavailable,

    /// Filesystem error from selsync-fs
    #[error(transparent)]
    Fs(#[from] selsync_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
