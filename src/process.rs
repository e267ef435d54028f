//! External tool invocation helpers.
//!
//! Every invocation is awaited to completion before the pipeline moves on;
//! there is deliberately no overlap between subprocesses.

use crate::error::{ReleaseError, Result};
use std::ffi::OsStr;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

/// Checks whether `tool` can be executed at all.
///
/// The tool is probed with a benign argument; a nonzero exit is fine, only
/// failure to launch the executable counts as absent.
pub async fn tool_available(tool: &str) -> bool {
    if let Ok(path) = which::which(tool) {
        log::debug!("found {} at {}", tool, path.display());
    }

    match Command::new(tool)
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
    {
        Ok(_) => true,
        Err(e) => {
            log::debug!("probing {tool} failed: {e}");
            false
        }
    }
}

/// Runs a tool to completion with inherited stdio.
///
/// Returns `Ok(true)` on exit code zero, `Ok(false)` on a nonzero exit, and
/// an error only when the process cannot be launched.
pub async fn run_tool(
    tool: &str,
    args: &[&str],
    cwd: Option<&Path>,
    envs: &[(&str, &OsStr)],
) -> Result<bool> {
    let mut cmd = Command::new(tool);
    cmd.args(args);
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }
    for (key, value) in envs {
        cmd.env(key, value);
    }

    let status = cmd.status().await.map_err(|e| ReleaseError::CommandFailed {
        command: tool.to_string(),
        source: e,
    })?;
    Ok(status.success())
}

/// Runs a tool and captures its trimmed stdout.
///
/// A nonzero exit is an error here: callers use this for queries whose
/// output is meaningless on failure.
pub async fn tool_output(tool: &str, args: &[&str], envs: &[(&str, &OsStr)]) -> Result<String> {
    let mut cmd = Command::new(tool);
    cmd.args(args).stdin(Stdio::null());
    for (key, value) in envs {
        cmd.env(key, value);
    }

    let output = cmd.output().await.map_err(|e| ReleaseError::CommandFailed {
        command: tool.to_string(),
        source: e,
    })?;

    if !output.status.success() {
        return Err(ReleaseError::CommandStatus {
            command: format!("{tool} {}", args.join(" ")),
            code: output.status.code(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
