//! Runs real shell commands; Unix only.
#![cfg(unix)]

use macro_deck_dispatch::*;
use std::sync::Arc;
use std::time::{Duration, Instant};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn host_dispatcher() -> ActionDispatcher {
    ActionDispatcher::for_family(OsFamily::Linux, Arc::new(SystemShellExecutor::new()))
}

#[tokio::test]
async fn test_echo_hello_succeeds_with_output() {
    init_tracing();
    let request = ActionRequest::new(ActionKind::Command).with_param("command", "echo hello");
    let result = host_dispatcher().dispatch(&request).await;

    assert!(result.success, "{:?}", result.error_message);
    assert!(result.output.unwrap().contains("hello"));
}

#[tokio::test]
async fn test_shell_features_are_available() {
    let request = ActionRequest::new(ActionKind::Command)
        .with_param("command", "printf 'a\\nb\\n' | wc -l");
    let output = host_dispatcher().execute(&request).await.unwrap().unwrap();
    assert_eq!(output.trim(), "2");
}

#[tokio::test]
async fn test_non_zero_exit_reports_failure() {
    init_tracing();
    let request = ActionRequest::new(ActionKind::Command).with_param("command", "exit 3");
    let err = host_dispatcher().execute(&request).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ExecutionFailure);
    assert_eq!(err.to_string(), "command exited with status 3");
}

#[tokio::test]
async fn test_stderr_becomes_error_message() {
    let request = ActionRequest::new(ActionKind::Command)
        .with_param("command", "echo broken >&2; exit 1");
    let response = host_dispatcher()
        .handle("command", request.params.clone())
        .await;

    assert_eq!(
        response,
        ExecuteResponse::Error {
            error: "broken".into()
        }
    );
}

#[tokio::test]
async fn test_missing_program_is_execution_failure() {
    let request = ActionRequest::new(ActionKind::Command)
        .with_param("command", "definitely-not-a-real-program-4821");
    let result = host_dispatcher().dispatch(&request).await;

    assert_eq!(result.error_kind, Some(ErrorKind::ExecutionFailure));
    assert!(!result.error_message.unwrap().is_empty());
}

#[tokio::test]
async fn test_timeout_stops_long_command() {
    let deck = host_dispatcher().with_timeout(Some(Duration::from_millis(200)));
    let request = ActionRequest::new(ActionKind::Command).with_param("command", "sleep 5");

    let started = Instant::now();
    let err = deck.execute(&request).await.unwrap_err();

    assert_eq!(err, DispatchError::Timeout(200));
    assert_eq!(err.kind(), ErrorKind::ExecutionFailure);
    assert!(started.elapsed() < Duration::from_secs(4));
}

#[tokio::test]
async fn test_executor_reports_exit_code() {
    let executor = SystemShellExecutor::new();
    let output = tokio_test::assert_ok!(executor.run("echo out; echo err >&2; exit 4", None).await);

    assert_eq!(output.exit_code, Some(4));
    assert!(!output.success());
    assert_eq!(output.stdout.trim(), "out");
    assert_eq!(output.stderr.trim(), "err");
}
