//! Logical → physical binding tables, one per device class.
//!
//! Both tables are total over [`NormalizedInput`], so a lookup can never miss.
//! Defaults can be overridden per entry from a JSON bindings file:
//!
//! ```json
//! { "keyboard": { "shoot": "KeyZ" }, "gamepad": { "ok": "y" } }
//! ```

use crate::input::{GamepadButton, InputDevice, NormalizedInput, PhysicalInput};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub struct InputBindings {
    keyboard: [String; NormalizedInput::COUNT],
    gamepad: [GamepadButton; NormalizedInput::COUNT],
}

impl Default for InputBindings {
    fn default() -> Self {
        let mut keyboard: [String; NormalizedInput::COUNT] = Default::default();
        let mut gamepad = [GamepadButton::A; NormalizedInput::COUNT];
        for input in NormalizedInput::ALL {
            let (code, button) = default_binding(input);
            keyboard[input.slot()] = code.to_string();
            gamepad[input.slot()] = button;
        }
        Self { keyboard, gamepad }
    }
}

fn default_binding(input: NormalizedInput) -> (&'static str, GamepadButton) {
    match input {
        NormalizedInput::Up => ("ArrowUp", GamepadButton::Up),
        NormalizedInput::Right => ("ArrowRight", GamepadButton::Right),
        NormalizedInput::Down => ("ArrowDown", GamepadButton::Down),
        NormalizedInput::Left => ("ArrowLeft", GamepadButton::Left),
        NormalizedInput::Pause => ("KeyP", GamepadButton::Start),
        NormalizedInput::Ok => ("Enter", GamepadButton::A),
        NormalizedInput::Cancel => ("Backspace", GamepadButton::B),
        NormalizedInput::Shoot => ("Space", GamepadButton::X),
    }
}

impl InputBindings {
    pub fn keyboard(&self, input: NormalizedInput) -> &str {
        &self.keyboard[input.slot()]
    }

    pub fn gamepad(&self, input: NormalizedInput) -> GamepadButton {
        self.gamepad[input.slot()]
    }

    pub fn set_keyboard(&mut self, input: NormalizedInput, code: impl Into<String>) {
        self.keyboard[input.slot()] = code.into();
    }

    pub fn set_gamepad(&mut self, input: NormalizedInput, button: GamepadButton) {
        self.gamepad[input.slot()] = button;
    }

    /// Physical input bound to `input` on `device`.
    pub fn physical_for(&self, device: InputDevice, input: NormalizedInput) -> PhysicalInput {
        match device {
            InputDevice::Keyboard => PhysicalInput::key(self.keyboard(input)),
            InputDevice::Gamepad => PhysicalInput::button(self.gamepad(input)),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct BindingsFile {
    #[serde(default)]
    keyboard: BindingOverrides,
    #[serde(default)]
    gamepad: BindingOverrides,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct BindingOverrides {
    up: Option<String>,
    right: Option<String>,
    down: Option<String>,
    left: Option<String>,
    pause: Option<String>,
    ok: Option<String>,
    cancel: Option<String>,
    shoot: Option<String>,
}

impl BindingOverrides {
    fn get(&self, input: NormalizedInput) -> Option<&str> {
        let value = match input {
            NormalizedInput::Up => &self.up,
            NormalizedInput::Right => &self.right,
            NormalizedInput::Down => &self.down,
            NormalizedInput::Left => &self.left,
            NormalizedInput::Pause => &self.pause,
            NormalizedInput::Ok => &self.ok,
            NormalizedInput::Cancel => &self.cancel,
            NormalizedInput::Shoot => &self.shoot,
        };
        value.as_deref()
    }
}

pub fn load_bindings_from_path(path: &Path) -> Result<InputBindings, String> {
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read bindings file {}: {e}", path.display()))?;
    parse_bindings(&raw)
        .map_err(|e| format!("Failed to load bindings {}: {e}", path.display()))
}

pub fn parse_bindings(raw: &str) -> Result<InputBindings, String> {
    let file: BindingsFile =
        serde_json::from_str(raw).map_err(|e| format!("invalid bindings JSON: {e}"))?;

    let mut bindings = InputBindings::default();
    for input in NormalizedInput::ALL {
        if let Some(code) = file.keyboard.get(input) {
            if code.trim().is_empty() {
                return Err(format!("keyboard binding for '{input}' is empty"));
            }
            bindings.set_keyboard(input, code);
        }
        if let Some(name) = file.gamepad.get(input) {
            let button = GamepadButton::from_name(&name.to_ascii_lowercase()).ok_or_else(|| {
                format!("gamepad binding for '{input}' names unknown button '{name}'")
            })?;
            bindings.set_gamepad(input, button);
        }
    }
    Ok(bindings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tables_match_shipping_layout() {
        let b = InputBindings::default();
        assert_eq!(b.keyboard(NormalizedInput::Up), "ArrowUp");
        assert_eq!(b.keyboard(NormalizedInput::Pause), "KeyP");
        assert_eq!(b.keyboard(NormalizedInput::Ok), "Enter");
        assert_eq!(b.keyboard(NormalizedInput::Cancel), "Backspace");
        assert_eq!(b.keyboard(NormalizedInput::Shoot), "Space");
        assert_eq!(b.gamepad(NormalizedInput::Pause), GamepadButton::Start);
        assert_eq!(b.gamepad(NormalizedInput::Ok), GamepadButton::A);
        assert_eq!(b.gamepad(NormalizedInput::Cancel), GamepadButton::B);
        assert_eq!(b.gamepad(NormalizedInput::Shoot), GamepadButton::X);
        assert_eq!(b.gamepad(NormalizedInput::Left), GamepadButton::Left);
    }

    #[test]
    fn physical_for_uses_device_table() {
        let b = InputBindings::default();
        assert_eq!(
            b.physical_for(InputDevice::Keyboard, NormalizedInput::Down),
            PhysicalInput::key("ArrowDown")
        );
        assert_eq!(
            b.physical_for(InputDevice::Gamepad, NormalizedInput::Down),
            PhysicalInput::Button(13)
        );
    }

    #[test]
    fn overrides_replace_only_named_entries() {
        let b = parse_bindings(r#"{ "keyboard": { "shoot": "KeyZ" }, "gamepad": { "ok": "Y" } }"#)
            .expect("bindings should parse");
        assert_eq!(b.keyboard(NormalizedInput::Shoot), "KeyZ");
        assert_eq!(b.keyboard(NormalizedInput::Up), "ArrowUp");
        assert_eq!(b.gamepad(NormalizedInput::Ok), GamepadButton::Y);
        assert_eq!(b.gamepad(NormalizedInput::Cancel), GamepadButton::B);
    }

    #[test]
    fn empty_file_yields_defaults() {
        let b = parse_bindings("{}").expect("empty object is valid");
        assert_eq!(b, InputBindings::default());
    }

    #[test]
    fn unknown_logical_name_is_rejected() {
        let err = parse_bindings(r#"{ "keyboard": { "jump": "KeyJ" } }"#).unwrap_err();
        assert!(err.contains("jump"), "unexpected error: {err}");
    }

    #[test]
    fn unknown_button_is_rejected() {
        let err = parse_bindings(r#"{ "gamepad": { "ok": "home" } }"#).unwrap_err();
        assert!(err.contains("home"));
    }

    #[test]
    fn empty_key_code_is_rejected() {
        let err = parse_bindings(r#"{ "keyboard": { "ok": " " } }"#).unwrap_err();
        assert!(err.contains("empty"));
    }

    #[test]
    fn load_reports_missing_file_path() {
        let path = std::env::temp_dir().join("stg_bindings_missing_does_not_exist.json");
        let err = load_bindings_from_path(&path).unwrap_err();
        assert!(err.contains("stg_bindings_missing_does_not_exist"));
    }
}
