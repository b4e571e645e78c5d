//! Configuration model, shared holder and persistence
//!
//! Two layers of configuration drive every sync:
//!
//! 1. **Global config** - `<config dir>/selsync/config.json`, the list of
//!    remote connections and the currently selected project
//! 2. **Project config** - `<project root>/sync.json`, the syncable folders
//!    of the selected project
//!
//! Both are loaded into a [`ConfigHandle`], a reader/writer-locked holder that
//! is cloned into the orchestrator and services instead of living in a global.
//!
//! # Example
//!
//! ```ignore
//! use selsync_core::config::ConfigManager;
//!
//! let manager = ConfigManager::new(ConfigManager::default_config_dir()?);
//! manager.load_global()?;
//! manager.load_project()?;
//! let connection = manager.handle().active_connection()?;
//! ```

mod handle;
mod manager;
mod model;
mod rclone;

pub use handle::ConfigHandle;
pub use manager::{ConfigManager, GLOBAL_CONFIG_FILE, PROJECT_CONFIG_FILE};
pub use model::{FolderEntry, GlobalConfig, ProjectConfig, RemoteConnection};
pub use rclone::{locate_rclone_config, parse_config_file_output, render_rclone_config};
