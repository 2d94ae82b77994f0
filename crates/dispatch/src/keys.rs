//! Canonical key names accepted by `keystroke` actions.
//!
//! Button definitions refer to keys by a fixed set of platform-neutral names
//! (`VOLUME_UP`, `F13`, ...). Each platform translates a [`KeyName`] into its
//! own key identifier; a name outside this set never reaches the OS layer.

use crate::error::{DispatchError, DispatchResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum KeyName {
    F13,
    F14,
    F15,
    F16,
    F17,
    F18,
    F19,
    MediaPlayPause,
    MediaNextTrack,
    MediaPrevTrack,
    VolumeUp,
    VolumeDown,
    VolumeMute,
    Home,
    End,
    #[serde(rename = "PAGEUP")]
    PageUp,
    #[serde(rename = "PAGEDOWN")]
    PageDown,
    Delete,
    Insert,
    #[serde(rename = "LWIN")]
    LWin,
    #[serde(rename = "RWIN")]
    RWin,
    #[serde(rename = "LALT")]
    LAlt,
    #[serde(rename = "RALT")]
    RAlt,
    #[serde(rename = "LCONTROL")]
    LControl,
    #[serde(rename = "RCONTROL")]
    RControl,
    #[serde(rename = "LSHIFT")]
    LShift,
    #[serde(rename = "RSHIFT")]
    RShift,
}

impl KeyName {
    pub const ALL: [KeyName; 27] = [
        KeyName::F13,
        KeyName::F14,
        KeyName::F15,
        KeyName::F16,
        KeyName::F17,
        KeyName::F18,
        KeyName::F19,
        KeyName::MediaPlayPause,
        KeyName::MediaNextTrack,
        KeyName::MediaPrevTrack,
        KeyName::VolumeUp,
        KeyName::VolumeDown,
        KeyName::VolumeMute,
        KeyName::Home,
        KeyName::End,
        KeyName::PageUp,
        KeyName::PageDown,
        KeyName::Delete,
        KeyName::Insert,
        KeyName::LWin,
        KeyName::RWin,
        KeyName::LAlt,
        KeyName::RAlt,
        KeyName::LControl,
        KeyName::RControl,
        KeyName::LShift,
        KeyName::RShift,
    ];

    /// Canonical (upper-case) spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyName::F13 => "F13",
            KeyName::F14 => "F14",
            KeyName::F15 => "F15",
            KeyName::F16 => "F16",
            KeyName::F17 => "F17",
            KeyName::F18 => "F18",
            KeyName::F19 => "F19",
            KeyName::MediaPlayPause => "MEDIA_PLAY_PAUSE",
            KeyName::MediaNextTrack => "MEDIA_NEXT_TRACK",
            KeyName::MediaPrevTrack => "MEDIA_PREV_TRACK",
            KeyName::VolumeUp => "VOLUME_UP",
            KeyName::VolumeDown => "VOLUME_DOWN",
            KeyName::VolumeMute => "VOLUME_MUTE",
            KeyName::Home => "HOME",
            KeyName::End => "END",
            KeyName::PageUp => "PAGEUP",
            KeyName::PageDown => "PAGEDOWN",
            KeyName::Delete => "DELETE",
            KeyName::Insert => "INSERT",
            KeyName::LWin => "LWIN",
            KeyName::RWin => "RWIN",
            KeyName::LAlt => "LALT",
            KeyName::RAlt => "RALT",
            KeyName::LControl => "LCONTROL",
            KeyName::RControl => "RCONTROL",
            KeyName::LShift => "LSHIFT",
            KeyName::RShift => "RSHIFT",
        }
    }

    /// Look up a key name, ignoring case and surrounding whitespace.
    pub fn parse(raw: &str) -> Option<KeyName> {
        let normalized = raw.trim().to_ascii_uppercase();
        KeyName::ALL
            .iter()
            .copied()
            .find(|key| key.as_str() == normalized)
    }
}

impl fmt::Display for KeyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyName {
    type Err = DispatchError;

    fn from_str(s: &str) -> DispatchResult<Self> {
        KeyName::parse(s).ok_or_else(|| DispatchError::Unsupported(format!("Unsupported key: {s}")))
    }
}
