//! Translation from winit physical key codes to DOM-style `code` names, the
//! naming used by keyboard bindings.

use winit::keyboard::KeyCode;

pub fn key_code_name(key_code: KeyCode) -> Option<&'static str> {
    let name = match key_code {
        KeyCode::ArrowUp => "ArrowUp",
        KeyCode::ArrowRight => "ArrowRight",
        KeyCode::ArrowDown => "ArrowDown",
        KeyCode::ArrowLeft => "ArrowLeft",
        KeyCode::Enter => "Enter",
        KeyCode::NumpadEnter => "NumpadEnter",
        KeyCode::Backspace => "Backspace",
        KeyCode::Space => "Space",
        KeyCode::Escape => "Escape",
        KeyCode::Tab => "Tab",
        KeyCode::ShiftLeft => "ShiftLeft",
        KeyCode::ShiftRight => "ShiftRight",
        KeyCode::ControlLeft => "ControlLeft",
        KeyCode::ControlRight => "ControlRight",
        KeyCode::AltLeft => "AltLeft",
        KeyCode::AltRight => "AltRight",
        KeyCode::KeyA => "KeyA",
        KeyCode::KeyB => "KeyB",
        KeyCode::KeyC => "KeyC",
        KeyCode::KeyD => "KeyD",
        KeyCode::KeyE => "KeyE",
        KeyCode::KeyF => "KeyF",
        KeyCode::KeyG => "KeyG",
        KeyCode::KeyH => "KeyH",
        KeyCode::KeyI => "KeyI",
        KeyCode::KeyJ => "KeyJ",
        KeyCode::KeyK => "KeyK",
        KeyCode::KeyL => "KeyL",
        KeyCode::KeyM => "KeyM",
        KeyCode::KeyN => "KeyN",
        KeyCode::KeyO => "KeyO",
        KeyCode::KeyP => "KeyP",
        KeyCode::KeyQ => "KeyQ",
        KeyCode::KeyR => "KeyR",
        KeyCode::KeyS => "KeyS",
        KeyCode::KeyT => "KeyT",
        KeyCode::KeyU => "KeyU",
        KeyCode::KeyV => "KeyV",
        KeyCode::KeyW => "KeyW",
        KeyCode::KeyX => "KeyX",
        KeyCode::KeyY => "KeyY",
        KeyCode::KeyZ => "KeyZ",
        KeyCode::Digit0 => "Digit0",
        KeyCode::Digit1 => "Digit1",
        KeyCode::Digit2 => "Digit2",
        KeyCode::Digit3 => "Digit3",
        KeyCode::Digit4 => "Digit4",
        KeyCode::Digit5 => "Digit5",
        KeyCode::Digit6 => "Digit6",
        KeyCode::Digit7 => "Digit7",
        KeyCode::Digit8 => "Digit8",
        KeyCode::Digit9 => "Digit9",
        _ => return None,
    };
    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_binding_keys_have_names() {
        assert_eq!(key_code_name(KeyCode::ArrowUp), Some("ArrowUp"));
        assert_eq!(key_code_name(KeyCode::KeyP), Some("KeyP"));
        assert_eq!(key_code_name(KeyCode::Enter), Some("Enter"));
        assert_eq!(key_code_name(KeyCode::Backspace), Some("Backspace"));
        assert_eq!(key_code_name(KeyCode::Space), Some("Space"));
    }

    #[test]
    fn names_match_winit_debug_names() {
        for code in [KeyCode::KeyZ, KeyCode::Digit7, KeyCode::ShiftLeft, KeyCode::Tab] {
            assert_eq!(key_code_name(code), Some(format!("{code:?}").as_str()));
        }
    }

    #[test]
    fn unsupported_keys_are_skipped() {
        assert_eq!(key_code_name(KeyCode::F13), None);
        assert_eq!(key_code_name(KeyCode::MediaPlayPause), None);
    }
}
