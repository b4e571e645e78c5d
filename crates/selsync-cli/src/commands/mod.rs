//! Command implementations for selsync-cli

pub mod config;
pub mod folders;
pub mod sync;

pub use config::{run_rclone_config, run_remotes, run_select};
pub use folders::{
    run_create, run_delete, run_deregister, run_edit, run_folders, run_register,
};
pub use sync::{run_backup, run_changes, run_transfer};
