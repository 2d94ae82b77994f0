use super::{posix_quote, validate_path, OsFamily, Platform};
use crate::action::MediaOperation;
use crate::error::DispatchResult;
use crate::keys::KeyName;

/// `open` for paths, System Events key codes through `osascript` for input.
pub struct MacOsPlatform;

fn key_code(key: KeyName) -> u16 {
    match key {
        KeyName::F13 => 105,
        KeyName::F14 => 107,
        KeyName::F15 => 113,
        KeyName::F16 => 106,
        KeyName::F17 => 64,
        KeyName::F18 => 79,
        KeyName::F19 => 80,
        KeyName::MediaPlayPause => 100,
        KeyName::MediaNextTrack => 101,
        KeyName::MediaPrevTrack => 98,
        KeyName::VolumeUp => 111,
        KeyName::VolumeDown => 103,
        KeyName::VolumeMute => 102,
        KeyName::Home => 115,
        KeyName::End => 119,
        KeyName::PageUp => 116,
        KeyName::PageDown => 121,
        KeyName::Delete => 117,
        KeyName::Insert => 114,
        KeyName::LWin => 55,
        KeyName::RWin => 54,
        KeyName::LAlt => 58,
        KeyName::RAlt => 61,
        KeyName::LControl => 59,
        KeyName::RControl => 62,
        KeyName::LShift => 56,
        KeyName::RShift => 60,
    }
}

fn system_events(script: &str) -> String {
    format!("osascript -e 'tell application \"System Events\" to {script}'")
}

impl Platform for MacOsPlatform {
    fn family(&self) -> OsFamily {
        OsFamily::MacOs
    }

    fn open_path(&self, path: &str) -> DispatchResult<String> {
        validate_path(path)?;
        Ok(format!("open {}", posix_quote(path)))
    }

    fn media_control(&self, op: MediaOperation) -> DispatchResult<String> {
        let code = match op {
            MediaOperation::PlayPause => 16,
            MediaOperation::Next => 17,
            MediaOperation::Previous => 18,
        };
        Ok(system_events(&format!("key code {code} using {{command down}}")))
    }

    fn send_key(&self, key: KeyName) -> DispatchResult<String> {
        Ok(system_events(&format!("key code {}", key_code(key))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_path_quotes_path() {
        assert_eq!(
            MacOsPlatform.open_path("/Applications/Calculator.app").unwrap(),
            "open \"/Applications/Calculator.app\""
        );
        assert_eq!(
            MacOsPlatform.open_path("/Applications/Visual Studio Code.app").unwrap(),
            "open \"/Applications/Visual Studio Code.app\""
        );
    }

    #[test]
    fn test_media_uses_command_modifier() {
        assert_eq!(
            MacOsPlatform.media_control(MediaOperation::Next).unwrap(),
            "osascript -e 'tell application \"System Events\" to key code 17 using {command down}'"
        );
    }

    #[test]
    fn test_send_key_uses_key_code() {
        assert_eq!(
            MacOsPlatform.send_key(KeyName::F13).unwrap(),
            "osascript -e 'tell application \"System Events\" to key code 105'"
        );
        assert_eq!(
            MacOsPlatform.send_key(KeyName::VolumeMute).unwrap(),
            "osascript -e 'tell application \"System Events\" to key code 102'"
        );
    }
}
