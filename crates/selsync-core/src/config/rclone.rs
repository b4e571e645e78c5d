//! rclone credential file rendering and discovery

use selsync_fs::NormalizedPath;

use crate::error::{Error, Result};
use crate::sync::{TransferCommand, TransferRunner};

use super::model::GlobalConfig;

/// Render rclone's INI credential file for every configured remote
///
/// Sections are emitted in connection-name order so the file is stable
/// across runs.
pub fn render_rclone_config(global: &GlobalConfig) -> String {
    global
        .remotes
        .values()
        .map(|remote| {
            format!(
                "[{}]\ntype = {}\naccount = {}\nkey = {}\n\n",
                remote.remote_name, remote.remote_type, remote.account, remote.key
            )
        })
        .collect()
}

/// Extract the path from the output of `rclone config file`
///
/// The tool prints a caption line followed by the path:
///
/// ```text
/// Configuration file is stored at:
/// /home/user/.config/rclone/rclone.conf
/// ```
pub fn parse_config_file_output(output: &str) -> Result<NormalizedPath> {
    output
        .lines()
        .nth(1)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(NormalizedPath::new)
        .ok_or_else(|| Error::UnexpectedOutput {
            command: "rclone config file".to_string(),
            output: output.to_string(),
        })
}

/// Ask rclone where its credential file lives
pub async fn locate_rclone_config(runner: &dyn TransferRunner) -> Result<NormalizedPath> {
    let output = runner.run(&TransferCommand::config_file()).await?;
    parse_config_file_output(&output)
}
