use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn, Instrument};
use uuid::Uuid;
use crate::action::{
    ActionKind, ActionRequest, ActionResult, ExecuteResponse, LogicalOperation, MediaOperation,
};
use crate::error::{DispatchError, DispatchResult};
use crate::executor::{ProcessExecutor, ProcessOutput, SystemShellExecutor};
use crate::keys::KeyName;
use crate::platform::{self, OsFamily, Platform};

/// Maps button actions to OS commands and runs them.
///
/// Holds no per-request state: concurrent dispatches share nothing but the
/// platform table and the executor, and are not coordinated with each other.
pub struct ActionDispatcher {
    platform: Arc<dyn Platform>,
    executor: Arc<dyn ProcessExecutor>,
    timeout: Option<Duration>,
}

impl ActionDispatcher {
    pub fn new(platform: Arc<dyn Platform>, executor: Arc<dyn ProcessExecutor>) -> Self {
        Self {
            platform,
            executor,
            timeout: None,
        }
    }

    pub fn for_family(family: OsFamily, executor: Arc<dyn ProcessExecutor>) -> Self {
        Self::new(platform::for_family(family), executor)
    }

    /// Dispatcher for the host OS using the real shell.
    pub fn system() -> DispatchResult<Self> {
        Ok(Self::for_family(
            OsFamily::detect()?,
            Arc::new(SystemShellExecutor::new()),
        ))
    }

    /// Bound how long a single command may run. `None` waits indefinitely.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn family(&self) -> OsFamily {
        self.platform.family()
    }

    /// Entry point for the HTTP layer: raw kind string plus parameters.
    pub async fn handle(&self, kind: &str, params: HashMap<String, String>) -> ExecuteResponse {
        match ActionRequest::parse(kind, params) {
            Ok(request) => self.dispatch(&request).await.into(),
            Err(err) => {
                warn!("Rejected action: {}", err);
                ActionResult::failed(&err).into()
            }
        }
    }

    pub async fn dispatch(&self, request: &ActionRequest) -> ActionResult {
        self.execute(request).await.into()
    }

    /// Validate, resolve and run `request`, spawning at most one process.
    pub async fn execute(&self, request: &ActionRequest) -> DispatchResult<Option<String>> {
        let span = tracing::info_span!(
            "dispatch",
            id = %Uuid::new_v4(),
            kind = %request.kind,
            platform = %self.platform.family()
        );

        async move {
            info!("Dispatching {} action", request.kind);

            // 1. Resolve to a command line; nothing has run yet
            let command_line = match self.resolve(request) {
                Ok(line) => line,
                Err(err) => {
                    warn!("Action not dispatched: {}", err);
                    return Err(err);
                }
            };
            debug!(command = %command_line, "Resolved command");

            // 2. Exactly one executor call, never retried
            let output = match self.executor.run(&command_line, self.timeout).await {
                Ok(output) => output,
                Err(err) => {
                    error!("Command could not run: {}", err);
                    return Err(err);
                }
            };

            // 3. Normalise
            if !output.success() {
                let err = DispatchError::ExecutionFailed(failure_message(&output));
                error!("Command failed: {}", err);
                return Err(err);
            }

            Ok(match request.kind {
                ActionKind::Command => Some(output.stdout),
                _ => None,
            })
        }
        .instrument(span)
        .await
    }

    fn resolve(&self, request: &ActionRequest) -> DispatchResult<String> {
        let value = request.require(request.kind.required_param())?;

        match request.kind {
            ActionKind::Application => {
                self.platform.command_for(LogicalOperation::OpenPath, Some(value))
            }
            ActionKind::Command => Ok(value.to_string()),
            ActionKind::Media => {
                let op = MediaOperation::parse(value).ok_or_else(|| {
                    DispatchError::Unsupported("Unsupported platform or action".to_string())
                })?;
                self.platform.command_for(LogicalOperation::Media(op), None)
            }
            ActionKind::Keystroke => {
                let key = KeyName::parse(value).ok_or_else(|| {
                    DispatchError::Unsupported(format!(
                        "Unsupported key: {} for {}",
                        value,
                        self.platform.family()
                    ))
                })?;
                self.platform.command_for(LogicalOperation::SendKey(key), None)
            }
        }
    }
}

fn failure_message(output: &ProcessOutput) -> String {
    let stderr = output.stderr.trim();
    if !stderr.is_empty() {
        return stderr.to_string();
    }
    match output.exit_code {
        Some(code) => format!("command exited with status {code}"),
        None => "command terminated by signal".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_message_prefers_stderr() {
        let output = ProcessOutput {
            exit_code: Some(1),
            stdout: String::new(),
            stderr: "  xdotool: command not found\n".into(),
        };
        assert_eq!(failure_message(&output), "xdotool: command not found");
    }

    #[test]
    fn test_failure_message_falls_back_to_status() {
        let output = ProcessOutput {
            exit_code: Some(3),
            ..Default::default()
        };
        assert_eq!(failure_message(&output), "command exited with status 3");

        let killed = ProcessOutput::default();
        assert_eq!(failure_message(&killed), "command terminated by signal");
    }
}
