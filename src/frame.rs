//! Per-frame input push that precedes `imgui::Context::new_frame`.

use std::time::Duration;

use winit::keyboard::KeyCode;

use crate::input::InputBridge;
use crate::io::{GuiIo, Modifiers};
use crate::window::Window;

/// Push display size, cursor, buttons, modifiers and `delta` into `io`.
///
/// `delta` is forwarded as seconds without clamping, so a zero delta reaches
/// imgui as `0.0`.
pub fn prepare_frame<I, W>(io: &mut I, window: &W, input: &InputBridge, delta: Duration)
where
    I: GuiIo + ?Sized,
    W: Window + ?Sized,
{
    let mouse = window.mouse_position();
    let size = window.size();

    io.set_display_size(size, framebuffer_scale(size, window.framebuffer_size()));
    io.set_mouse_position(mouse);
    for (index, down) in input.mouse_pressed().into_iter().enumerate() {
        io.set_mouse_button(index, down);
    }
    io.set_modifiers(held_modifiers(window));
    io.set_delta_time(delta.as_secs_f32());
}

/// Modifier groups as held on the physical keyboard right now.
pub fn held_modifiers<W: Window + ?Sized>(window: &W) -> Modifiers {
    let either = |left, right| window.is_key_pressed(left) || window.is_key_pressed(right);
    Modifiers {
        ctrl: either(KeyCode::ControlLeft, KeyCode::ControlRight),
        alt: either(KeyCode::AltLeft, KeyCode::AltRight),
        shift: either(KeyCode::ShiftLeft, KeyCode::ShiftRight),
        super_key: either(KeyCode::SuperLeft, KeyCode::SuperRight),
    }
}

/// Physical pixels per logical pixel on each axis; `1.0` for an empty axis.
#[expect(clippy::cast_precision_loss)]
pub(crate) fn framebuffer_scale(size: [f32; 2], framebuffer: [u32; 2]) -> [f32; 2] {
    let axis = |logical: f32, physical: u32| {
        if logical > 0.0 {
            physical as f32 / logical
        } else {
            1.0
        }
    };
    [axis(size[0], framebuffer[0]), axis(size[1], framebuffer[1])]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::event::Event;
    use crate::testing::{FakeWindow, RecordingIo};

    #[test]
    fn pushes_window_state_into_io() {
        let window = FakeWindow {
            size: [800.0, 600.0],
            framebuffer: [1600, 1200],
            mouse: [12.5, 40.0],
            ..FakeWindow::default()
        };
        let mut bridge = InputBridge::new(true);
        let mut io = RecordingIo::default();
        bridge.handle_event(&mut io, &Event::MouseButtonPressed(1));

        prepare_frame(&mut io, &window, &bridge, Duration::from_millis(16));

        assert_eq!(io.display_size, Some(([800.0, 600.0], [2.0, 2.0])));
        assert_eq!(io.mouse_position, Some([12.5, 40.0]));
        assert_eq!(io.mouse_buttons, [(0, false), (1, true), (2, false)]);
        assert_eq!(io.modifiers, Some(Modifiers::default()));
        let delta = io.delta_time.unwrap();
        assert!((delta - 0.016).abs() < 1e-6);
    }

    #[test]
    fn either_side_sets_a_modifier() {
        let window = FakeWindow::default()
            .holding(KeyCode::ControlRight)
            .holding(KeyCode::ShiftLeft)
            .holding(KeyCode::SuperRight);
        assert_eq!(
            held_modifiers(&window),
            Modifiers {
                ctrl: true,
                alt: false,
                shift: true,
                super_key: true,
            }
        );

        let window = FakeWindow::default().holding(KeyCode::AltLeft);
        assert!(held_modifiers(&window).alt);
    }

    #[test]
    fn zero_delta_is_passed_through() {
        let mut io = RecordingIo::default();
        prepare_frame(&mut io, &FakeWindow::default(), &InputBridge::new(true), Duration::ZERO);
        assert_eq!(io.delta_time, Some(0.0));
    }

    #[test]
    fn empty_window_keeps_unit_scale() {
        assert_eq!(framebuffer_scale([0.0, 0.0], [0, 0]), [1.0, 1.0]);
        assert_eq!(framebuffer_scale([100.0, 50.0], [200, 100]), [2.0, 2.0]);
    }
}
