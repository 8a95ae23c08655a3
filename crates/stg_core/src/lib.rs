pub mod bindings;
pub mod config;
pub mod events;
pub mod input;
pub mod manifest;
pub mod normalizer;
pub mod splash;
pub mod time;

pub use bindings::InputBindings;
pub use config::GameConfig;
pub use events::{InputEventHub, RawInputEvent, SubscriptionId};
pub use input::{GamepadButton, InputDevice, InputEdge, InputState, NormalizedInput, PhysicalInput};
pub use normalizer::InputNormalizer;
pub use splash::Splash;
pub use time::{ClockHandle, SceneClock};
