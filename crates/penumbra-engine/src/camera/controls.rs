use crate::input::{InputFrame, InputState, Key, MouseButton};

/// Camera intent for one frame.
///
/// Digital flags come from held keys; `look` is the pointer drag in logical
/// pixels and `zoom` the wheel motion in lines.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct CameraInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub look: (f32, f32),
    pub zoom: f32,
}

impl CameraInput {
    /// Reads the default bindings.
    ///
    /// - `W`/`ArrowUp`, `S`/`ArrowDown`: forward, backward
    /// - `A`/`ArrowLeft`, `D`/`ArrowRight`: strafe
    /// - `Space`/`E`: up, `Shift`/`Q`: down
    /// - left-button drag: look, wheel: zoom
    pub fn from_input(state: &InputState, frame: &InputFrame) -> Self {
        let held = |a: Key, b: Key| state.key_down(a) || state.key_down(b);

        let look = if state.button_down(MouseButton::Left) {
            frame.pointer_delta
        } else {
            (0.0, 0.0)
        };

        Self {
            forward: held(Key::W, Key::ArrowUp),
            backward: held(Key::S, Key::ArrowDown),
            left: held(Key::A, Key::ArrowLeft),
            right: held(Key::D, Key::ArrowRight),
            up: held(Key::Space, Key::E),
            down: held(Key::Shift, Key::Q),
            look,
            zoom: frame.wheel_lines,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{
        InputEvent, KeyState, Modifiers, MouseButtonState, PointerButtonEvent, PointerMoveEvent,
    };

    fn press(s: &mut InputState, f: &mut InputFrame, key: Key) {
        s.apply_event(
            f,
            InputEvent::Key {
                key,
                state: KeyState::Pressed,
                modifiers: Modifiers::default(),
                repeat: false,
            },
        );
    }

    #[test]
    fn keys_map_to_directions() {
        let mut s = InputState::default();
        let mut f = InputFrame::default();
        press(&mut s, &mut f, Key::W);
        press(&mut s, &mut f, Key::ArrowLeft);
        press(&mut s, &mut f, Key::Q);

        let c = CameraInput::from_input(&s, &f);
        assert!(c.forward && c.left && c.down);
        assert!(!c.backward && !c.right && !c.up);
    }

    #[test]
    fn pointer_motion_only_looks_while_dragging() {
        let mut s = InputState::default();
        let mut f = InputFrame::default();
        let mv = |x, y| InputEvent::PointerMoved(PointerMoveEvent { x, y });

        s.apply_event(&mut f, mv(0.0, 0.0));
        s.apply_event(&mut f, mv(4.0, 3.0));
        assert_eq!(CameraInput::from_input(&s, &f).look, (0.0, 0.0));

        s.apply_event(
            &mut f,
            InputEvent::PointerButton(PointerButtonEvent {
                button: MouseButton::Left,
                state: MouseButtonState::Pressed,
                x: 4.0,
                y: 3.0,
                modifiers: Modifiers::default(),
            }),
        );
        assert_eq!(CameraInput::from_input(&s, &f).look, (4.0, 3.0));
    }
}
