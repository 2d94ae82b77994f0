//! Process execution behind a narrow seam.
//!
//! Everything that actually touches the OS goes through [`ProcessExecutor`],
//! so the dispatcher can be driven by a fake that records command lines.

use crate::error::{DispatchError, DispatchResult};
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::warn;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// `None` when the process was ended by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

#[async_trait]
pub trait ProcessExecutor: Send + Sync {
    /// Run one shell command line to completion.
    ///
    /// A process that starts and exits non-zero is still `Ok`; `Err` means it
    /// could not be spawned or did not finish within `limit`.
    async fn run(&self, command_line: &str, limit: Option<Duration>)
        -> DispatchResult<ProcessOutput>;
}

/// Runs command lines through the host shell.
///
/// There is no sandboxing: whatever string reaches this executor runs with
/// the full privileges of the server process.
#[derive(Debug, Clone, Default)]
pub struct SystemShellExecutor;

impl SystemShellExecutor {
    pub fn new() -> Self {
        Self
    }

    #[cfg(unix)]
    fn shell_command(command_line: &str) -> Command {
        let mut cmd = Command::new("/bin/sh");
        cmd.arg("-c").arg(command_line);
        cmd
    }

    #[cfg(windows)]
    fn shell_command(command_line: &str) -> Command {
        let mut cmd = Command::new("cmd.exe");
        cmd.args(["/d", "/s", "/c"])
            .raw_arg(format!("\"{command_line}\""));
        cmd
    }
}

#[async_trait]
impl ProcessExecutor for SystemShellExecutor {
    async fn run(
        &self,
        command_line: &str,
        limit: Option<Duration>,
    ) -> DispatchResult<ProcessOutput> {
        let mut cmd = Self::shell_command(command_line);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = cmd
            .spawn()
            .map_err(|e| DispatchError::ExecutionFailed(format!("Failed to spawn command: {e}")))?;

        let output = match limit {
            Some(limit) => match timeout(limit, child.wait_with_output()).await {
                Ok(output) => output?,
                Err(_) => {
                    // The child is dropped with the future; kill_on_drop ends it.
                    warn!("Command timed out after {}ms", limit.as_millis());
                    return Err(DispatchError::Timeout(limit.as_millis() as u64));
                }
            },
            None => child.wait_with_output().await?,
        };

        Ok(ProcessOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}
