use super::{validate_path, OsFamily, Platform};
use crate::action::MediaOperation;
use crate::error::{DispatchError, DispatchResult};
use crate::keys::KeyName;

/// `start` for paths; key input through a PowerShell `keybd_event` call.
///
/// `SendKeys` has no codes for media, F17-F19 or the modifier keys, so every
/// key goes out as its Win32 virtual-key code instead.
pub struct WindowsPlatform;

const KEYBD_EVENT: &str = "Add-Type -MemberDefinition '[DllImport(\\\"user32.dll\\\")] public static extern void keybd_event(byte vk, byte scan, uint flags, System.UIntPtr extra);' -Name Keyboard -Namespace MacroDeck -PassThru";

fn virtual_key(key: KeyName) -> u8 {
    match key {
        KeyName::F13 => 0x7C,
        KeyName::F14 => 0x7D,
        KeyName::F15 => 0x7E,
        KeyName::F16 => 0x7F,
        KeyName::F17 => 0x80,
        KeyName::F18 => 0x81,
        KeyName::F19 => 0x82,
        KeyName::MediaPlayPause => 0xB3,
        KeyName::MediaNextTrack => 0xB0,
        KeyName::MediaPrevTrack => 0xB1,
        KeyName::VolumeUp => 0xAF,
        KeyName::VolumeDown => 0xAE,
        KeyName::VolumeMute => 0xAD,
        KeyName::Home => 0x24,
        KeyName::End => 0x23,
        KeyName::PageUp => 0x21,
        KeyName::PageDown => 0x22,
        KeyName::Delete => 0x2E,
        KeyName::Insert => 0x2D,
        KeyName::LWin => 0x5B,
        KeyName::RWin => 0x5C,
        KeyName::LAlt => 0xA4,
        KeyName::RAlt => 0xA5,
        KeyName::LControl => 0xA2,
        KeyName::RControl => 0xA3,
        KeyName::LShift => 0xA0,
        KeyName::RShift => 0xA1,
    }
}

/// Key down followed by key up (`KEYEVENTF_KEYUP` = 2).
fn press(vk: u8) -> String {
    format!(
        "powershell -NoProfile -Command \"$k = {KEYBD_EVENT}; \
         $k::keybd_event(0x{vk:02X}, 0, 0, [System.UIntPtr]::Zero); \
         $k::keybd_event(0x{vk:02X}, 0, 2, [System.UIntPtr]::Zero)\""
    )
}

impl Platform for WindowsPlatform {
    fn family(&self) -> OsFamily {
        OsFamily::Windows
    }

    fn open_path(&self, path: &str) -> DispatchResult<String> {
        validate_path(path)?;
        if path.contains('"') {
            return Err(DispatchError::Validation(
                "path cannot contain '\"' on Windows".to_string(),
            ));
        }
        Ok(format!("start \"\" \"{path}\""))
    }

    fn media_control(&self, op: MediaOperation) -> DispatchResult<String> {
        let key = match op {
            MediaOperation::PlayPause => KeyName::MediaPlayPause,
            MediaOperation::Next => KeyName::MediaNextTrack,
            MediaOperation::Previous => KeyName::MediaPrevTrack,
        };
        Ok(press(virtual_key(key)))
    }

    fn send_key(&self, key: KeyName) -> DispatchResult<String> {
        Ok(press(virtual_key(key)))
    }
}
