//! Per-platform command tables.
//!
//! Every supported OS family implements [`Platform`], turning a logical
//! operation into the exact shell command line that performs it:
//! - Linux: `xdg-open` and `xdotool`
//! - macOS: `open` and `osascript` (System Events)
//! - Windows: `start` and PowerShell `keybd_event`
//!
//! The family is detected once at startup and injected into the dispatcher,
//! so tests can exercise every table from a single binary.

pub mod linux;
pub mod macos;
pub mod windows;

use crate::action::{LogicalOperation, MediaOperation};
use crate::error::{DispatchError, DispatchResult};
use crate::keys::KeyName;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

pub use linux::LinuxPlatform;
pub use macos::MacOsPlatform;
pub use windows::WindowsPlatform;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OsFamily {
    #[serde(alias = "win32")]
    Windows,
    #[serde(alias = "darwin")]
    MacOs,
    Linux,
}

impl OsFamily {
    pub const ALL: [OsFamily; 3] = [OsFamily::Windows, OsFamily::MacOs, OsFamily::Linux];

    /// Identify the host. Called once; everything downstream takes the value.
    pub fn detect() -> DispatchResult<OsFamily> {
        Self::from_target(std::env::consts::OS)
    }

    fn from_target(os: &str) -> DispatchResult<OsFamily> {
        match os {
            "windows" => Ok(OsFamily::Windows),
            "macos" => Ok(OsFamily::MacOs),
            "linux" => Ok(OsFamily::Linux),
            other => Err(DispatchError::Unsupported(format!(
                "Unsupported platform: {other}"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OsFamily::Windows => "windows",
            OsFamily::MacOs => "macos",
            OsFamily::Linux => "linux",
        }
    }
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OsFamily {
    type Err = DispatchError;

    fn from_str(s: &str) -> DispatchResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "windows" | "win32" => Ok(OsFamily::Windows),
            "macos" | "darwin" => Ok(OsFamily::MacOs),
            "linux" => Ok(OsFamily::Linux),
            other => Err(DispatchError::Unsupported(format!(
                "Unsupported platform: {other}"
            ))),
        }
    }
}

/// Command construction for one OS family.
///
/// Implementations only build strings; running them is the executor's job.
pub trait Platform: Send + Sync {
    fn family(&self) -> OsFamily;

    /// Hand `path` to the OS default handler, as a double-click would.
    fn open_path(&self, path: &str) -> DispatchResult<String>;

    fn media_control(&self, op: MediaOperation) -> DispatchResult<String>;

    fn send_key(&self, key: KeyName) -> DispatchResult<String>;

    fn command_for(&self, op: LogicalOperation, path: Option<&str>) -> DispatchResult<String> {
        match op {
            LogicalOperation::OpenPath => {
                let path = path.ok_or_else(|| {
                    DispatchError::Validation("No path specified".to_string())
                })?;
                self.open_path(path)
            }
            LogicalOperation::Media(op) => self.media_control(op),
            LogicalOperation::SendKey(key) => self.send_key(key),
        }
    }
}

pub fn for_family(family: OsFamily) -> Arc<dyn Platform> {
    match family {
        OsFamily::Windows => Arc::new(WindowsPlatform),
        OsFamily::MacOs => Arc::new(MacOsPlatform),
        OsFamily::Linux => Arc::new(LinuxPlatform),
    }
}

/// Fail on the first logical operation the platform cannot express.
///
/// Run at startup so a table gap shows up before any button is pressed.
pub fn verify_coverage(platform: &dyn Platform) -> DispatchResult<()> {
    let operations = std::iter::once(LogicalOperation::OpenPath)
        .chain(MediaOperation::ALL.into_iter().map(LogicalOperation::Media))
        .chain(KeyName::ALL.into_iter().map(LogicalOperation::SendKey));

    for op in operations {
        let command = platform.command_for(op, Some("probe"))?;
        if command.trim().is_empty() {
            return Err(DispatchError::Unsupported(format!(
                "{:?} resolves to an empty command on {}",
                op,
                platform.family()
            )));
        }
    }
    Ok(())
}

/// Reject path characters no platform can pass through safely.
pub(crate) fn validate_path(path: &str) -> DispatchResult<()> {
    if path.contains('\0') || path.contains('\n') || path.contains('\r') {
        return Err(DispatchError::Validation(
            "path contains invalid control characters".to_string(),
        ));
    }
    Ok(())
}

/// Double-quote `raw` for a POSIX shell.
pub(crate) fn posix_quote(raw: &str) -> String {
    let mut quoted = String::with_capacity(raw.len() + 2);
    quoted.push('"');
    for ch in raw.chars() {
        if matches!(ch, '"' | '\\' | '$' | '`') {
            quoted.push('\\');
        }
        quoted.push(ch);
    }
    quoted.push('"');
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_from_str_accepts_aliases() {
        assert_eq!("darwin".parse::<OsFamily>().unwrap(), OsFamily::MacOs);
        assert_eq!("MacOS".parse::<OsFamily>().unwrap(), OsFamily::MacOs);
        assert_eq!("win32".parse::<OsFamily>().unwrap(), OsFamily::Windows);
        assert_eq!("linux".parse::<OsFamily>().unwrap(), OsFamily::Linux);
        assert!(matches!(
            "freebsd".parse::<OsFamily>(),
            Err(DispatchError::Unsupported(_))
        ));
    }

    #[test]
    fn test_unknown_target_is_unsupported() {
        assert!(matches!(
            OsFamily::from_target("haiku"),
            Err(DispatchError::Unsupported(_))
        ));
    }

    #[test]
    fn test_every_family_covers_every_operation() {
        for family in OsFamily::ALL {
            let platform = for_family(family);
            assert_eq!(platform.family(), family);
            verify_coverage(platform.as_ref()).unwrap();
        }
    }

    #[test]
    fn test_posix_quote_escapes_shell_metacharacters() {
        assert_eq!(posix_quote("/tmp/a b"), "\"/tmp/a b\"");
        assert_eq!(posix_quote("$HOME/`x`"), "\"\\$HOME/\\`x\\`\"");
        assert_eq!(posix_quote("say \"hi\""), "\"say \\\"hi\\\"\"");
    }

    #[test]
    fn test_validate_path_rejects_newlines() {
        assert!(validate_path("/Applications/Calculator.app").is_ok());
        assert!(validate_path("/tmp/a\nrm -rf ~").is_err());
        assert!(validate_path("C:\\x\0").is_err());
    }
}
