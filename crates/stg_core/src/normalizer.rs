//! Device-agnostic input state.
//!
//! `InputNormalizer` records one [`InputEdge`] per physical input per device
//! class and answers queries about logical inputs on whichever device sent the
//! most recent event.
//!
//! - **Level queries** (`Pressed` / `Released`) look only at the last reported
//!   state, however old it is.
//! - **Edge queries** (`JustPressed` / `JustReleased`) additionally require the
//!   transition to be no older than `now - forgiveness`. Only the latest
//!   transition per input is kept, so a fast press/release/press inside the
//!   window shows up as a single press.
//!
//! A game owns exactly one normalizer for its whole run so input state survives
//! scene changes. Timestamps and `now` must come from the same clock.

use crate::bindings::InputBindings;
use crate::input::{InputDevice, InputEdge, InputState, NormalizedInput, PhysicalInput};
use std::collections::HashMap;

pub struct InputNormalizer {
    active_device: InputDevice,
    keyboard_edges: HashMap<String, InputEdge>,
    gamepad_edges: HashMap<u8, InputEdge>,
    bindings: InputBindings,
}

impl InputNormalizer {
    pub fn new() -> Self {
        Self::with_bindings(InputBindings::default())
    }

    pub fn with_bindings(bindings: InputBindings) -> Self {
        Self {
            active_device: InputDevice::Keyboard,
            keyboard_edges: HashMap::new(),
            gamepad_edges: HashMap::new(),
            bindings,
        }
    }

    pub fn active_device(&self) -> InputDevice {
        self.active_device
    }

    pub fn bindings(&self) -> &InputBindings {
        &self.bindings
    }

    /// Record a hardware event. The sending device becomes active even when the
    /// event repeats the stored state (key autorepeat).
    pub fn ingest(&mut self, input: &PhysicalInput, pressed: bool, timestamp: f64) {
        self.active_device = input.device();

        let stored = match input {
            PhysicalInput::Key(code) => self.keyboard_edges.get_mut(code.as_str()),
            PhysicalInput::Button(index) => self.gamepad_edges.get_mut(index),
        };

        match stored {
            Some(edge) if edge.pressed != pressed => {
                edge.pressed = pressed;
                edge.timestamp = timestamp;
                log::debug!("{input}: pressed={pressed} at {timestamp:.1}ms");
            }
            Some(_) => {}
            None => {
                let edge = InputEdge { pressed, timestamp };
                match input {
                    PhysicalInput::Key(code) => {
                        self.keyboard_edges.insert(code.clone(), edge);
                    }
                    PhysicalInput::Button(index) => {
                        self.gamepad_edges.insert(*index, edge);
                    }
                }
                log::debug!("{input}: first seen, pressed={pressed} at {timestamp:.1}ms");
            }
        }
    }

    /// Recorded edge for a physical input, if it was ever observed.
    pub fn edge(&self, input: &PhysicalInput) -> Option<&InputEdge> {
        match input {
            PhysicalInput::Key(code) => self.keyboard_edges.get(code.as_str()),
            PhysicalInput::Button(index) => self.gamepad_edges.get(index),
        }
    }

    /// Whether `input`, as bound on the active device, is in `state`.
    /// Inputs never observed are `false` for every state.
    pub fn query(
        &self,
        input: NormalizedInput,
        state: InputState,
        forgiveness: f64,
        now: f64,
    ) -> bool {
        let physical = self.bindings.physical_for(self.active_device, input);
        let Some(edge) = self.edge(&physical) else {
            return false;
        };

        let recent = edge.timestamp >= now - forgiveness;
        match state {
            InputState::Pressed => edge.pressed,
            InputState::Released => !edge.pressed,
            InputState::JustPressed => edge.pressed && recent,
            InputState::JustReleased => !edge.pressed && recent,
        }
    }
}

impl Default for InputNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
