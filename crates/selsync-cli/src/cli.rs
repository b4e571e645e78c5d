//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// selsync - Selectively sync project folders with cloud storage through rclone
#[derive(Parser, Debug)]
#[command(name = "selsync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory holding the global config.json
    #[arg(long, global = true, env = "SELSYNC_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    /// rclone executable to run instead of the one on PATH
    #[arg(long, global = true, env = "SELSYNC_RCLONE")]
    pub rclone: Option<String>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Folders to transfer and how
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct TransferArgs {
    /// Folder names from the project's sync.json
    #[arg(required = true)]
    pub folders: Vec<String>,

    /// Report what would be transferred without changing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Output as JSON for scripting
    #[arg(long)]
    pub json: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List configured remote connections
    Remotes {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Select the project to work on
    Select {
        /// Remote connection name
        project: String,
    },

    /// List the selected project's folders and whether they exist locally
    Folders {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Register a project subfolder for syncing
    ///
    /// The path is relative to the project root and must already exist.
    /// The updated sync.json is uploaded to the bucket.
    ///
    /// Examples:
    ///   selsync register audio assets/audio
    ///   selsync register art 'assets\art'
    Register {
        /// Name for the folder
        name: String,

        /// Path relative to the project root
        path: String,
    },

    /// Rename a registered folder or point it at another directory
    ///
    /// The new path follows the same rules as `register`. The updated
    /// sync.json is uploaded to the bucket.
    ///
    /// Examples:
    ///   selsync edit audio --rename sounds
    ///   selsync edit audio --path assets/sfx
    Edit {
        /// Current folder name
        name: String,

        /// New folder name
        #[arg(long)]
        rename: Option<String>,

        /// New path relative to the project root
        #[arg(long)]
        path: Option<String>,
    },

    /// Remove a folder from the project (local files are kept)
    Deregister {
        /// Folder name
        name: String,
    },

    /// Create local directories for registered folders
    Create {
        /// Folder names
        #[arg(required = true)]
        folders: Vec<String>,
    },

    /// Delete the local directories of registered folders
    Delete {
        /// Folder names
        #[arg(required = true)]
        folders: Vec<String>,
    },

    /// Mirror local folders to the remote (deletes extra remote files)
    Push(TransferArgs),

    /// Mirror remote folders to local (deletes extra local files)
    Pull(TransferArgs),

    /// Copy remote folders to local without deleting anything
    CopyIn(TransferArgs),

    /// Show which folders have local changes not yet pushed
    Changes {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Pull the whole bucket into the project's backup directory
    Backup {
        /// Report what would be transferred without changing anything
        #[arg(long)]
        dry_run: bool,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Write rclone's config file for all configured remotes
    RcloneConfig {
        /// Target file (default: ask rclone where its config lives)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}
