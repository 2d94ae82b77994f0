//! Action dispatch for a local macro deck.
//!
//! A button press arrives as an action kind plus a string parameter bag. The
//! [`ActionDispatcher`] validates it, asks the injected [`Platform`] for the
//! matching command line and hands that line to a [`ProcessExecutor`].
//!
//! `command` and `application` actions run arbitrary programs on the host
//! with no sandbox. Anyone who can write button definitions can execute code
//! as the user running the server.

pub mod action;
pub mod dispatcher;
pub mod error;
pub mod executor;
pub mod keys;
pub mod platform;

pub use action::{
    ActionKind, ActionRequest, ActionResult, ExecuteRequest, ExecuteResponse, LogicalOperation,
    MediaOperation,
};
pub use dispatcher::ActionDispatcher;
pub use error::{DispatchError, DispatchResult, ErrorKind};
pub use executor::{ProcessExecutor, ProcessOutput, SystemShellExecutor};
pub use keys::KeyName;
pub use platform::{OsFamily, Platform};
