//! A shell-script stand-in for the `rclone` executable.
//!
//! The script behaves like rclone only as far as selsync looks at it:
//!
//! - every invocation is appended to `rclone.log` next to the script
//! - `config file` prints the two-line caption/path answer
//! - with `--dry-run`, a source directory that has any entries produces a
//!   "Skipped copy as --dry-run is set" notice on stderr
//! - when any argument is a directory holding a [`FAIL_MARKER`] file, the
//!   script prints an error and exits 1

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

/// File name of the invocation log written next to the script
pub const INVOCATION_LOG: &str = "rclone.log";
/// A directory containing this file makes every transfer touching it fail
pub const FAIL_MARKER: &str = ".rclone-fail";

/// Write an executable fake `rclone` into `dir` and return its path.
pub fn install_fake_rclone(dir: &Path) -> PathBuf {
    fs::create_dir_all(dir).unwrap();
    let script_path = dir.join("rclone");
    let log_path = dir.join(INVOCATION_LOG);
    let conf_path = dir.join("rclone.conf");

    let script = format!(
        r#"#!/bin/sh
echo "$*" >> '{log}'

for arg in "$@"; do
  if [ -f "$arg/{fail}" ]; then
    echo "ERROR : $arg: directory not found" >&2
    exit 1
  fi
done

if [ "$1" = "config" ] && [ "$2" = "file" ]; then
  echo "Configuration file is stored at:"
  echo '{conf}'
  exit 0
fi

for arg in "$@"; do
  if [ "$arg" = "--dry-run" ] && [ -d "$2" ] && [ -n "$(ls -A "$2")" ]; then
    for entry in $(ls -A "$2"); do
      echo "NOTICE: $entry: Skipped copy as --dry-run is set (size 1Ki)" >&2
    done
  fi
done

echo "Transferred: 0 B / 0 B, -, 0 B/s, ETA -"
exit 0
"#,
        log = log_path.display(),
        conf = conf_path.display(),
        fail = FAIL_MARKER,
    );

    fs::write(&script_path, script).unwrap();
    let mut permissions = fs::metadata(&script_path).unwrap().permissions();
    permissions.set_mode(0o755);
    fs::set_permissions(&script_path, permissions).unwrap();
    script_path
}

/// Argument lines recorded by the fake, in call order.
pub fn recorded_invocations(dir: &Path) -> Vec<String> {
    fs::read_to_string(dir.join(INVOCATION_LOG))
        .map(|log| log.lines().map(str::to_string).collect())
        .unwrap_or_default()
}
