//! Filesystem abstraction for selsync
//!
//! Provides slash-normalized path handling and safe JSON configuration I/O.

pub mod config;
pub mod error;
pub mod io;
pub mod path;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use path::{NormalizedPath, escapes_root, normalize_relative};
