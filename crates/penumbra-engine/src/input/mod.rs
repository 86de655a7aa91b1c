//! Platform-agnostic input.
//!
//! The runtime translates winit events into `InputEvent`s; `InputState` keeps
//! what is held and `InputFrame` what changed since the last redraw (key
//! edges, pointer motion, wheel lines). Camera controls read both.

mod frame;
mod state;
mod types;

pub use frame::InputFrame;
pub use state::InputState;
pub use types::{
    InputEvent, Key, KeyState, Modifiers, MouseButton, MouseButtonState, MouseWheelDelta,
    PointerButtonEvent, PointerMoveEvent,
};
