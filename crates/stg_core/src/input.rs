//! Vocabulary shared by the input normalizer.
//!
//! Game logic speaks in [`NormalizedInput`]s. Hardware speaks in
//! [`PhysicalInput`]s: keyboard codes (DOM `code` naming, e.g. `"ArrowUp"`) or
//! gamepad button indices from the standard gamepad mapping.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NormalizedInput {
    Up,
    Right,
    Down,
    Left,
    Pause,
    Ok,
    Cancel,
    Shoot,
}

impl NormalizedInput {
    pub const COUNT: usize = 8;

    /// All logical inputs in table order.
    pub const ALL: [NormalizedInput; Self::COUNT] = [
        Self::Up,
        Self::Right,
        Self::Down,
        Self::Left,
        Self::Pause,
        Self::Ok,
        Self::Cancel,
        Self::Shoot,
    ];

    /// Position in binding tables.
    pub fn slot(self) -> usize {
        self as usize
    }

    /// Lowercase name used in binding files and logs.
    pub fn label(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Right => "right",
            Self::Down => "down",
            Self::Left => "left",
            Self::Pause => "pause",
            Self::Ok => "ok",
            Self::Cancel => "cancel",
            Self::Shoot => "shoot",
        }
    }
}

impl fmt::Display for NormalizedInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputDevice {
    #[default]
    Keyboard,
    Gamepad,
}

impl fmt::Display for InputDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Keyboard => "keyboard",
            Self::Gamepad => "gamepad",
        })
    }
}

/// The condition a query asks about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputState {
    Pressed,
    Released,
    JustPressed,
    JustReleased,
}

/// Buttons of the standard gamepad mapping. Indices 10 and 11 (stick clicks)
/// are left out on purpose and never bound.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamepadButton {
    A = 0,
    B = 1,
    X = 2,
    Y = 3,
    L1 = 4,
    R1 = 5,
    L2 = 6,
    R2 = 7,
    Select = 8,
    Start = 9,
    Up = 12,
    Down = 13,
    Left = 14,
    Right = 15,
}

impl GamepadButton {
    pub const ALL: [GamepadButton; 14] = [
        Self::A,
        Self::B,
        Self::X,
        Self::Y,
        Self::L1,
        Self::R1,
        Self::L2,
        Self::R2,
        Self::Select,
        Self::Start,
        Self::Up,
        Self::Down,
        Self::Left,
        Self::Right,
    ];

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.index() == index)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::A => "a",
            Self::B => "b",
            Self::X => "x",
            Self::Y => "y",
            Self::L1 => "l1",
            Self::R1 => "r1",
            Self::L2 => "l2",
            Self::R2 => "r2",
            Self::Select => "select",
            Self::Start => "start",
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.name() == name)
    }
}

/// One physical input on one device class.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PhysicalInput {
    Key(String),
    Button(u8),
}

impl PhysicalInput {
    pub fn key(code: impl Into<String>) -> Self {
        Self::Key(code.into())
    }

    pub fn button(button: GamepadButton) -> Self {
        Self::Button(button.index())
    }

    pub fn device(&self) -> InputDevice {
        match self {
            Self::Key(_) => InputDevice::Keyboard,
            Self::Button(_) => InputDevice::Gamepad,
        }
    }
}

impl fmt::Display for PhysicalInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(code) => write!(f, "key {code}"),
            Self::Button(index) => match GamepadButton::from_index(*index) {
                Some(button) => write!(f, "button {} ({index})", button.name()),
                None => write!(f, "button {index}"),
            },
        }
    }
}

/// Last recorded transition of a physical input. `timestamp` is the scene
/// clock time (ms) of the most recent state change, not of the latest event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputEdge {
    pub pressed: bool,
    pub timestamp: f64,
}
