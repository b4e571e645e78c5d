//! Shared test utilities for the selsync workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`project`] — [`TestProject`] builder: a temp config dir, project root
//!   and backup root with matching JSON configuration files
//! - [`rclone`] — a scripted stand-in for the `rclone` executable (unix)

pub mod project;
#[cfg(unix)]
pub mod rclone;

pub use project::TestProject;
