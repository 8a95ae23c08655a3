use gilrs::{Button, EventType, Gilrs};
use stg_core::{PhysicalInput, RawInputEvent};

/// Standard gamepad mapping index for a gilrs button. Stick clicks map to the
/// reserved indices 10 and 11, which no binding uses. Buttons outside the
/// 0..=15 layout (Mode, C, Z) are dropped.
pub fn button_index(button: Button) -> Option<u8> {
    let index = match button {
        Button::South => 0,
        Button::East => 1,
        Button::West => 2,
        Button::North => 3,
        Button::LeftTrigger => 4,
        Button::RightTrigger => 5,
        Button::LeftTrigger2 => 6,
        Button::RightTrigger2 => 7,
        Button::Select => 8,
        Button::Start => 9,
        Button::LeftThumb => 10,
        Button::RightThumb => 11,
        Button::DPadUp => 12,
        Button::DPadDown => 13,
        Button::DPadLeft => 14,
        Button::DPadRight => 15,
        _ => return None,
    };
    Some(index)
}

/// Drains gilrs events into raw button events. Runs without gamepads when
/// gilrs cannot be initialized.
pub struct GamepadPoller {
    gilrs: Option<Gilrs>,
}

impl GamepadPoller {
    pub fn new() -> Self {
        let gilrs = match Gilrs::new() {
            Ok(gilrs) => {
                for (_, gamepad) in gilrs.gamepads() {
                    log::info!("Gamepad available: {}", gamepad.name());
                }
                Some(gilrs)
            }
            Err(err) => {
                log::warn!("Gamepad support unavailable: {err}");
                None
            }
        };
        Self { gilrs }
    }

    pub fn poll(&mut self) -> Vec<RawInputEvent> {
        let Some(gilrs) = self.gilrs.as_mut() else {
            return Vec::new();
        };

        let mut events = Vec::new();
        while let Some(event) = gilrs.next_event() {
            match event.event {
                EventType::ButtonPressed(button, _) => {
                    if let Some(index) = button_index(button) {
                        events.push(RawInputEvent::down(PhysicalInput::Button(index)));
                    }
                }
                EventType::ButtonReleased(button, _) => {
                    if let Some(index) = button_index(button) {
                        events.push(RawInputEvent::up(PhysicalInput::Button(index)));
                    }
                }
                EventType::Connected => {
                    log::info!("Gamepad connected: {}", gilrs.gamepad(event.id).name());
                }
                EventType::Disconnected => {
                    log::info!("Gamepad disconnected: {:?}", event.id);
                }
                _ => {}
            }
        }
        events
    }
}
