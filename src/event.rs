//! Window events in the shape the input bridge consumes.

use winit::event::{ElementState, Ime, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// A window event relevant to imgui input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// The window was asked to close.
    Closed,
    /// The window received input focus.
    GainedFocus,
    /// The window lost input focus.
    LostFocus,
    /// The cursor moved to a logical position inside the window.
    MouseMoved {
        /// Horizontal position, logical pixels.
        x: f32,
        /// Vertical position, logical pixels.
        y: f32,
    },
    /// A mouse button went down. `0` is left, `1` right, `2` middle.
    MouseButtonPressed(u32),
    /// A mouse button went up.
    MouseButtonReleased(u32),
    /// The vertical wheel moved by this many lines.
    MouseWheelMoved(f32),
    /// A physical key went down.
    KeyPressed(KeyCode),
    /// A physical key went up.
    KeyReleased(KeyCode),
    /// A character was typed.
    TextEntered(char),
}

impl Event {
    /// Translate one winit window event.
    ///
    /// `scale_factor` converts physical cursor positions to logical ones.
    /// A key press carrying text yields the key event followed by one
    /// [`Event::TextEntered`] per character; events imgui does not care about
    /// yield nothing.
    #[must_use]
    pub fn from_winit(event: &WindowEvent, scale_factor: f64) -> Vec<Event> {
        match event {
            WindowEvent::CloseRequested => vec![Event::Closed],
            WindowEvent::Focused(true) => vec![Event::GainedFocus],
            WindowEvent::Focused(false) => vec![Event::LostFocus],
            WindowEvent::CursorMoved { position, .. } => {
                let logical = position.to_logical::<f32>(scale_factor);
                vec![Event::MouseMoved {
                    x: logical.x,
                    y: logical.y,
                }]
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let index = button_index(*button);
                match state {
                    ElementState::Pressed => vec![Event::MouseButtonPressed(index)],
                    ElementState::Released => vec![Event::MouseButtonReleased(index)],
                }
            }
            WindowEvent::MouseWheel { delta, .. } => vec![Event::MouseWheelMoved(wheel_lines(*delta))],
            WindowEvent::KeyboardInput { event, .. } => {
                let mut out = Vec::new();
                if let PhysicalKey::Code(code) = event.physical_key {
                    out.push(match event.state {
                        ElementState::Pressed => Event::KeyPressed(code),
                        ElementState::Released => Event::KeyReleased(code),
                    });
                }
                if event.state == ElementState::Pressed {
                    if let Some(text) = &event.text {
                        out.extend(text.chars().map(Event::TextEntered));
                    }
                }
                out
            }
            WindowEvent::Ime(Ime::Commit(text)) => text.chars().map(Event::TextEntered).collect(),
            _ => Vec::new(),
        }
    }
}

/// Button numbering shared by imgui and the bridge's button array.
fn button_index(button: MouseButton) -> u32 {
    match button {
        MouseButton::Left => 0,
        MouseButton::Right => 1,
        MouseButton::Middle => 2,
        MouseButton::Back => 3,
        MouseButton::Forward => 4,
        MouseButton::Other(n) => u32::from(n),
    }
}

/// Vertical wheel motion in lines. Pixel deltas only contribute their sign.
#[expect(clippy::cast_possible_truncation)]
fn wheel_lines(delta: MouseScrollDelta) -> f32 {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => y,
        MouseScrollDelta::PixelDelta(pos) => {
            if pos.y > 0.0 {
                1.0
            } else if pos.y < 0.0 {
                -1.0
            } else {
                pos.y as f32
            }
        }
    }
}
