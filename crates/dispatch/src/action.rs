use crate::error::{DispatchError, DispatchResult, ErrorKind};
use crate::keys::KeyName;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Application,
    Command,
    Media,
    Keystroke,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Application => "application",
            ActionKind::Command => "command",
            ActionKind::Media => "media",
            ActionKind::Keystroke => "keystroke",
        }
    }

    /// The parameter a request of this kind cannot do without.
    pub fn required_param(&self) -> &'static str {
        match self {
            ActionKind::Application => "path",
            ActionKind::Command => "command",
            ActionKind::Media => "action",
            ActionKind::Keystroke => "key",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionKind {
    type Err = DispatchError;

    fn from_str(s: &str) -> DispatchResult<Self> {
        match s {
            "application" => Ok(ActionKind::Application),
            "command" => Ok(ActionKind::Command),
            "media" => Ok(ActionKind::Media),
            "keystroke" => Ok(ActionKind::Keystroke),
            other => Err(DispatchError::Validation(format!("Unknown action: {other}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaOperation {
    PlayPause,
    Next,
    Previous,
}

impl MediaOperation {
    pub const ALL: [MediaOperation; 3] = [
        MediaOperation::PlayPause,
        MediaOperation::Next,
        MediaOperation::Previous,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaOperation::PlayPause => "play_pause",
            MediaOperation::Next => "next",
            MediaOperation::Previous => "previous",
        }
    }

    pub fn parse(raw: &str) -> Option<MediaOperation> {
        MediaOperation::ALL
            .iter()
            .copied()
            .find(|op| op.as_str() == raw.trim())
    }
}

/// An abstract OS operation, independent of how any platform spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalOperation {
    OpenPath,
    Media(MediaOperation),
    SendKey(KeyName),
}

/// One button press as received from the front end.
///
/// Built fresh per request; the dispatcher never stores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRequest {
    pub kind: ActionKind,
    #[serde(default)]
    pub params: HashMap<String, String>,
}

impl ActionRequest {
    pub fn new(kind: ActionKind) -> Self {
        Self {
            kind,
            params: HashMap::new(),
        }
    }

    /// Build a request from the raw kind string sent by the caller.
    pub fn parse(kind: &str, params: HashMap<String, String>) -> DispatchResult<Self> {
        Ok(Self {
            kind: kind.parse()?,
            params,
        })
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Blank values count as missing.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.trim().is_empty())
    }

    pub(crate) fn require(&self, name: &str) -> DispatchResult<&str> {
        self.param(name).ok_or_else(|| {
            DispatchError::Validation(format!(
                "Missing required parameter '{}' for {} action",
                name, self.kind
            ))
        })
    }
}

/// Wire shape of `POST /execute`: `{"action": "...", "params": {...}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecuteRequest {
    pub action: String,
    #[serde(default)]
    pub params: HashMap<String, String>,
}

/// Normalised outcome of a single dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResult {
    pub success: bool,
    pub output: Option<String>,
    pub error_kind: Option<ErrorKind>,
    pub error_message: Option<String>,
}

impl ActionResult {
    pub fn ok(output: Option<String>) -> Self {
        Self {
            success: true,
            output,
            error_kind: None,
            error_message: None,
        }
    }

    pub fn failed(err: &DispatchError) -> Self {
        Self {
            success: false,
            output: None,
            error_kind: Some(err.kind()),
            error_message: Some(err.to_string()),
        }
    }
}

impl From<DispatchResult<Option<String>>> for ActionResult {
    fn from(outcome: DispatchResult<Option<String>>) -> Self {
        match outcome {
            Ok(output) => ActionResult::ok(output),
            Err(err) => ActionResult::failed(&err),
        }
    }
}

/// Payload handed back to the HTTP layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ExecuteResponse {
    Success {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        result: Option<String>,
    },
    Error {
        error: String,
    },
}

impl ExecuteResponse {
    pub fn is_success(&self) -> bool {
        matches!(self, ExecuteResponse::Success { .. })
    }
}

impl From<ActionResult> for ExecuteResponse {
    fn from(result: ActionResult) -> Self {
        if result.success {
            ExecuteResponse::Success {
                result: result.output,
            }
        } else {
            ExecuteResponse::Error {
                error: result
                    .error_message
                    .unwrap_or_else(|| "Action failed".to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_kind_is_validation_error() {
        let err = ActionRequest::parse("macro", HashMap::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(err.to_string().contains("macro"));
    }

    #[test]
    fn test_blank_param_counts_as_missing() {
        let request = ActionRequest::new(ActionKind::Command).with_param("command", "   ");
        assert_eq!(request.param("command"), None);
        assert!(matches!(
            request.require("command"),
            Err(DispatchError::Validation(_))
        ));
    }

    #[test]
    fn test_media_operation_names() {
        assert_eq!(MediaOperation::parse("play_pause"), Some(MediaOperation::PlayPause));
        assert_eq!(MediaOperation::parse("next"), Some(MediaOperation::Next));
        assert_eq!(MediaOperation::parse("previous"), Some(MediaOperation::Previous));
        assert_eq!(MediaOperation::parse("stop"), None);
    }

    #[test]
    fn test_execute_request_from_json() {
        let request: ExecuteRequest = serde_json::from_value(json!({
            "action": "media",
            "params": {"action": "next"}
        }))
        .unwrap();
        assert_eq!(request.action, "media");
        assert_eq!(request.params.get("action").map(String::as_str), Some("next"));
    }

    #[test]
    fn test_response_wire_format() {
        let success = ExecuteResponse::from(ActionResult::ok(Some("hello\n".into())));
        assert_eq!(
            serde_json::to_value(&success).unwrap(),
            json!({"status": "success", "result": "hello\n"})
        );

        let bare = ExecuteResponse::from(ActionResult::ok(None));
        assert_eq!(serde_json::to_value(&bare).unwrap(), json!({"status": "success"}));

        let err = DispatchError::Unsupported("Unsupported platform or action".into());
        let failure = ExecuteResponse::from(ActionResult::failed(&err));
        assert_eq!(
            serde_json::to_value(&failure).unwrap(),
            json!({"status": "error", "error": "Unsupported platform or action"})
        );
    }
}
