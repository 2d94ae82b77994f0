use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Unsupported(String),

    #[error("{0}")]
    ExecutionFailed(String),

    #[error("Command timed out after {0}ms")]
    Timeout(u64),
}

/// Classification reported back to the caller alongside the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    UnsupportedPlatformOrAction,
    ExecutionFailure,
}

impl DispatchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DispatchError::Validation(_) => ErrorKind::Validation,
            DispatchError::Unsupported(_) => ErrorKind::UnsupportedPlatformOrAction,
            DispatchError::ExecutionFailed(_) | DispatchError::Timeout(_) => {
                ErrorKind::ExecutionFailure
            }
        }
    }
}

impl From<std::io::Error> for DispatchError {
    fn from(err: std::io::Error) -> Self {
        DispatchError::ExecutionFailed(err.to_string())
    }
}

pub type DispatchResult<T> = Result<T, DispatchError>;
