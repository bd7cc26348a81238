//! The input bridge: window events in, imgui input state out.

use crate::event::Event;
use crate::io::GuiIo;

/// Number of mouse buttons whose state is carried between frames.
pub const MOUSE_BUTTONS: usize = 3;

/// Input state carried between events and frames.
///
/// Focus gates everything: while the window is unfocused only focus events
/// are processed and everything else is dropped.
#[derive(Debug, Clone, Default)]
pub struct InputBridge {
    has_focus: bool,
    mouse_moved: bool,
    mouse_pressed: [bool; MOUSE_BUTTONS],
}

impl InputBridge {
    /// A bridge starting with the given focus state and no buttons held.
    #[must_use]
    pub fn new(has_focus: bool) -> Self {
        Self {
            has_focus,
            ..Self::default()
        }
    }

    /// Apply one event.
    pub fn handle_event<I: GuiIo + ?Sized>(&mut self, io: &mut I, event: &Event) {
        if self.has_focus {
            match *event {
                Event::MouseMoved { .. } => self.mouse_moved = true,
                Event::MouseButtonPressed(button) => self.set_button(button, true),
                Event::MouseButtonReleased(button) => self.set_button(button, false),
                Event::MouseWheelMoved(delta) => io.add_mouse_wheel(delta),
                Event::KeyPressed(code) => io.set_key(code, true),
                Event::KeyReleased(code) => io.set_key(code, false),
                Event::TextEntered(c) => {
                    if !is_control(c) {
                        io.add_input_characters(c.encode_utf8(&mut [0; 4]));
                    }
                }
                Event::Closed | Event::GainedFocus | Event::LostFocus => {}
            }
        }

        match event {
            Event::LostFocus => self.has_focus = false,
            Event::GainedFocus => self.has_focus = true,
            _ => {}
        }
    }

    /// Whether the window currently has input focus.
    #[must_use]
    pub fn has_focus(&self) -> bool {
        self.has_focus
    }

    /// Whether the cursor has moved since the bridge was created.
    #[must_use]
    pub fn mouse_moved(&self) -> bool {
        self.mouse_moved
    }

    /// Down-state of the left, right and middle buttons.
    #[must_use]
    pub fn mouse_pressed(&self) -> [bool; MOUSE_BUTTONS] {
        self.mouse_pressed
    }

    fn set_button(&mut self, button: u32, down: bool) {
        if let Some(slot) = usize::try_from(button)
            .ok()
            .and_then(|i| self.mouse_pressed.get_mut(i))
        {
            *slot = down;
        }
    }
}

/// C0 controls and DEL never reach imgui's text queue.
fn is_control(c: char) -> bool {
    c < ' ' || c == '\u{7f}'
}
