use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{
    InputEvent,
    Key,
    KeyState,
    Modifiers,
    MouseButton,
    MouseButtonState,
    PointerButtonEvent,
    PointerMoveEvent,
};

/// Current input state for a single window.
///
/// Holds "is down" information and current pointer position.
/// Per-frame transitions and motion are recorded into an `InputFrame`.
#[derive(Debug, Default)]
pub struct InputState {
    /// Current modifier state.
    pub modifiers: Modifiers,

    /// Whether the window is focused.
    pub focused: bool,

    /// Pointer position in logical pixels.
    pub pointer_pos: Option<(f32, f32)>,

    /// Set of currently held keys.
    pub keys_down: HashSet<Key>,

    /// Set of currently held mouse buttons.
    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Applies a platform-agnostic input event to the current state and writes deltas to `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::ModifiersChanged(m) => {
                self.modifiers = *m;
            }

            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // On focus loss, clear "down" sets so the camera does not keep drifting.
                    self.keys_down.clear();
                    self.buttons_down.clear();
                }
            }

            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                // The first sample after entering the window has no delta.
                if let Some((px, py)) = self.pointer_pos {
                    frame.pointer_delta.0 += x - px;
                    frame.pointer_delta.1 += y - py;
                }
                self.pointer_pos = Some((*x, *y));
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
            }

            InputEvent::Key {
                key,
                state,
                modifiers,
                ..
            } => {
                self.modifiers = *modifiers;

                match state {
                    KeyState::Pressed => {
                        if self.keys_down.insert(*key) {
                            frame.keys_pressed.insert(*key);
                        }
                    }
                    KeyState::Released => {
                        if self.keys_down.remove(key) {
                            frame.keys_released.insert(*key);
                        }
                    }
                }
            }

            InputEvent::PointerButton(PointerButtonEvent {
                button,
                state,
                x,
                y,
                modifiers,
            }) => {
                self.pointer_pos = Some((*x, *y));
                self.modifiers = *modifiers;

                match state {
                    MouseButtonState::Pressed => {
                        if self.buttons_down.insert(*button) {
                            frame.buttons_pressed.insert(*button);
                        }
                    }
                    MouseButtonState::Released => {
                        if self.buttons_down.remove(button) {
                            frame.buttons_released.insert(*button);
                        }
                    }
                }
            }

            InputEvent::MouseWheel { delta, modifiers } => {
                self.modifiers = *modifiers;
                frame.wheel_lines += delta.lines_y();
            }
        }

        frame.push_event(ev);
    }

    /// Helper queries
    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::MouseWheelDelta;

    fn key(key: Key, state: KeyState) -> InputEvent {
        InputEvent::Key {
            key,
            state,
            modifiers: Modifiers::default(),
            repeat: false,
        }
    }

    fn moved(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerMoved(PointerMoveEvent { x, y })
    }

    #[test]
    fn press_and_release_are_recorded_once() {
        let mut s = InputState::default();
        let mut f = InputFrame::default();

        s.apply_event(&mut f, key(Key::W, KeyState::Pressed));
        s.apply_event(&mut f, key(Key::W, KeyState::Pressed)); // repeat
        assert!(s.key_down(Key::W));
        assert!(f.key_pressed(Key::W));
        assert_eq!(f.events.len(), 2);

        f.clear();
        s.apply_event(&mut f, key(Key::W, KeyState::Released));
        assert!(!s.key_down(Key::W));
        assert!(f.keys_released.contains(&Key::W));
        assert!(f.keys_pressed.is_empty());
    }

    #[test]
    fn pointer_motion_accumulates_delta() {
        let mut s = InputState::default();
        let mut f = InputFrame::default();

        s.apply_event(&mut f, moved(10.0, 10.0));
        assert_eq!(f.pointer_delta, (0.0, 0.0));

        s.apply_event(&mut f, moved(15.0, 8.0));
        s.apply_event(&mut f, moved(20.0, 12.0));
        assert_eq!(f.pointer_delta, (10.0, 2.0));

        f.clear();
        assert_eq!(f.pointer_delta, (0.0, 0.0));
    }

    #[test]
    fn leaving_the_window_resets_the_delta_origin() {
        let mut s = InputState::default();
        let mut f = InputFrame::default();

        s.apply_event(&mut f, moved(10.0, 10.0));
        s.apply_event(&mut f, InputEvent::PointerLeft);
        s.apply_event(&mut f, moved(500.0, 500.0));
        assert_eq!(f.pointer_delta, (0.0, 0.0));
        assert_eq!(s.pointer_pos, Some((500.0, 500.0)));
    }

    #[test]
    fn focus_loss_releases_everything() {
        let mut s = InputState::default();
        let mut f = InputFrame::default();

        s.apply_event(&mut f, key(Key::A, KeyState::Pressed));
        s.apply_event(
            &mut f,
            InputEvent::PointerButton(PointerButtonEvent {
                button: MouseButton::Left,
                state: MouseButtonState::Pressed,
                x: 1.0,
                y: 2.0,
                modifiers: Modifiers::default(),
            }),
        );
        assert!(s.button_down(MouseButton::Left));

        s.apply_event(&mut f, InputEvent::Focused(false));
        assert!(s.keys_down.is_empty());
        assert!(s.buttons_down.is_empty());
    }

    #[test]
    fn wheel_accumulates_lines() {
        let mut s = InputState::default();
        let mut f = InputFrame::default();
        let wheel = |y| InputEvent::MouseWheel {
            delta: MouseWheelDelta::Line { x: 0.0, y },
            modifiers: Modifiers::default(),
        };

        s.apply_event(&mut f, wheel(1.0));
        s.apply_event(&mut f, wheel(2.0));
        assert_eq!(f.wheel_lines, 3.0);
    }
}
