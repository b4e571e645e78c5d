//! Sync actions and per-folder outcomes

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Transfer direction and mode requested for a batch of folders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SyncAction {
    /// Mirror local to remote, deleting extraneous remote files
    #[serde(rename = "PUSH")]
    Push,
    /// Mirror remote to local, deleting extraneous local files
    #[serde(rename = "PULL")]
    Pull,
    /// Copy remote to local without deleting anything
    #[serde(rename = "COPY_PULL")]
    CopyIn,
}

impl SyncAction {
    /// Whether the local folder must exist before the transfer starts
    ///
    /// Copy-in may target a folder that has never been downloaded; rclone
    /// creates it.
    pub fn requires_local_folder(self) -> bool {
        !matches!(self, Self::CopyIn)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Push => "PUSH",
            Self::Pull => "PULL",
            Self::CopyIn => "COPY_PULL",
        }
    }
}

impl fmt::Display for SyncAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SyncAction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "PUSH" => Ok(Self::Push),
            "PULL" => Ok(Self::Pull),
            "COPY_PULL" | "COPY_IN" => Ok(Self::CopyIn),
            _ => Err(Error::UnsupportedAction {
                action: s.to_string(),
            }),
        }
    }
}

/// Result of one folder's transfer attempt
///
/// Exactly one of `command_output` / `command_error` is set; the
/// constructors are the only way to build one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionOutcome {
    target_folder: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    command_output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    command_error: Option<String>,
}

impl ActionOutcome {
    /// Successful transfer with the tool's captured output
    pub fn success(target_folder: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            target_folder: target_folder.into(),
            command_output: Some(output.into()),
            command_error: None,
        }
    }

    /// Failed transfer, or a folder that never reached the tool
    pub fn failure(target_folder: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            target_folder: target_folder.into(),
            command_output: None,
            command_error: Some(error.into()),
        }
    }

    pub fn target_folder(&self) -> &str {
        &self.target_folder
    }

    pub fn output(&self) -> Option<&str> {
        self.command_output.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.command_error.as_deref()
    }

    pub fn is_success(&self) -> bool {
        self.command_error.is_none()
    }
}
