use super::{posix_quote, validate_path, OsFamily, Platform};
use crate::action::MediaOperation;
use crate::error::DispatchResult;
use crate::keys::KeyName;

/// X11 desktops via `xdg-open` and `xdotool`.
pub struct LinuxPlatform;

/// xdotool keysym for each canonical key.
fn keysym(key: KeyName) -> &'static str {
    match key {
        KeyName::F13 => "F13",
        KeyName::F14 => "F14",
        KeyName::F15 => "F15",
        KeyName::F16 => "F16",
        KeyName::F17 => "F17",
        KeyName::F18 => "F18",
        KeyName::F19 => "F19",
        KeyName::MediaPlayPause => "XF86AudioPlay",
        KeyName::MediaNextTrack => "XF86AudioNext",
        KeyName::MediaPrevTrack => "XF86AudioPrev",
        KeyName::VolumeUp => "XF86AudioRaiseVolume",
        KeyName::VolumeDown => "XF86AudioLowerVolume",
        KeyName::VolumeMute => "XF86AudioMute",
        KeyName::Home => "Home",
        KeyName::End => "End",
        KeyName::PageUp => "Prior",
        KeyName::PageDown => "Next",
        KeyName::Delete => "Delete",
        KeyName::Insert => "Insert",
        KeyName::LWin => "Super_L",
        KeyName::RWin => "Super_R",
        KeyName::LAlt => "Alt_L",
        KeyName::RAlt => "Alt_R",
        KeyName::LControl => "Control_L",
        KeyName::RControl => "Control_R",
        KeyName::LShift => "Shift_L",
        KeyName::RShift => "Shift_R",
    }
}

impl Platform for LinuxPlatform {
    fn family(&self) -> OsFamily {
        OsFamily::Linux
    }

    fn open_path(&self, path: &str) -> DispatchResult<String> {
        validate_path(path)?;
        Ok(format!("xdg-open {}", posix_quote(path)))
    }

    fn media_control(&self, op: MediaOperation) -> DispatchResult<String> {
        let key = match op {
            MediaOperation::PlayPause => "XF86AudioPlay",
            MediaOperation::Next => "XF86AudioNext",
            MediaOperation::Previous => "XF86AudioPrev",
        };
        Ok(format!("xdotool key {key}"))
    }

    fn send_key(&self, key: KeyName) -> DispatchResult<String> {
        Ok(format!("xdotool key {}", keysym(key)))
    }
}
