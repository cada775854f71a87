//! Child process helper shared by the daemon and sensor queries.

use crate::error::{FeedError, FeedResult};
use std::path::Path;
use tokio::process::Command;
use tracing::debug;

/// Short display name for a program path (`/usr/local/bin/qtum-cli` -> `qtum-cli`).
pub fn program_name(program: &Path) -> String {
    program
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| program.display().to_string())
}

/// Run `program args..` to completion and return its stdout.
///
/// A spawn failure or non-zero exit status is an error. No timeout is applied.
pub async fn run_command(program: &Path, args: &[&str]) -> FeedResult<String> {
    let name = program_name(program);
    debug!(command = %name, ?args, "Running command");

    let output = Command::new(program)
        .args(args)
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|e| FeedError::CommandFailed {
            command: name.clone(),
            reason: e.to_string(),
        })?;

    if !output.status.success() {
        let status = output
            .status
            .code()
            .map(|c| c.to_string())
            .unwrap_or_else(|| "signal".to_string());
        return Err(FeedError::NonZeroExit {
            command: name,
            status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    String::from_utf8(output.stdout)
        .map_err(|e| FeedError::ParseError(format!("{} wrote non-UTF-8 output: {}", name, e)))
}
