//! External process execution for the transfer tool

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::error::{Error, Result};

use super::command::TransferCommand;

/// Launches a transfer command and waits for it to finish
///
/// Implementations return the combined stdout and stderr on a zero exit
/// status. Nothing is retried.
#[async_trait]
pub trait TransferRunner: Send + Sync {
    async fn run(&self, command: &TransferCommand) -> Result<String>;
}

/// Runs commands as child processes with no console window
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
    /// Replaces the command's program when set (e.g. a non-PATH rclone)
    program: Option<String>,
}

impl ProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every command through `program` instead of its own program name
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: Some(program.into()),
        }
    }

    fn program_for<'a>(&'a self, command: &'a TransferCommand) -> &'a str {
        self.program.as_deref().unwrap_or(&command.program)
    }
}

#[async_trait]
impl TransferRunner for ProcessRunner {
    async fn run(&self, command: &TransferCommand) -> Result<String> {
        let program = self.program_for(command);
        tracing::debug!(program, args = %command.args.join(" "), "Executing");

        let output = hidden_command(program)
            .args(&command.args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| Error::Launch {
                program: program.to_string(),
                source,
            })?;

        // rclone reports dry-run notices on stderr, so both streams matter
        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));

        if output.status.success() {
            Ok(text)
        } else {
            let code = output.status.code().unwrap_or(-1);
            tracing::debug!(program, code, "Command exited with failure");
            Err(Error::CommandFailed { code, output: text })
        }
    }
}

/// Command that does not flash a console window on Windows
#[cfg(windows)]
fn hidden_command(program: &str) -> Command {
    const CREATE_NO_WINDOW: u32 = 0x0800_0000;
    let mut cmd = Command::new(program);
    cmd.creation_flags(CREATE_NO_WINDOW);
    cmd
}

#[cfg(not(windows))]
fn hidden_command(program: &str) -> Command {
    Command::new(program)
}
