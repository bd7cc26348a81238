//! The imgui-side input surface the bridge and frame adapter write into.

use winit::keyboard::KeyCode;

use crate::keymap;

/// Held state of the four modifier groups. Each is true if either the left
/// or the right key of the group is down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    /// Either control key.
    pub ctrl: bool,
    /// Either alt key.
    pub alt: bool,
    /// Either shift key.
    pub shift: bool,
    /// Either super (logo/command) key.
    pub super_key: bool,
}

/// The GUI library's current-frame input object.
///
/// Implemented for [`imgui::Io`]; the bridge and the frame adapter only talk
/// to imgui through this trait.
pub trait GuiIo {
    /// Add vertical wheel motion, consumed at the next frame begin.
    fn add_mouse_wheel(&mut self, delta: f32);

    /// Record a physical key going down or up.
    fn set_key(&mut self, code: KeyCode, down: bool);

    /// Append typed text to the input-character queue.
    fn add_input_characters(&mut self, text: &str);

    /// Logical display size and the framebuffer-to-logical ratio.
    fn set_display_size(&mut self, size: [f32; 2], framebuffer_scale: [f32; 2]);

    /// Cursor position in logical pixels.
    fn set_mouse_position(&mut self, position: [f32; 2]);

    /// Down-state of mouse button `index` (0 left, 1 right, 2 middle).
    fn set_mouse_button(&mut self, index: usize, down: bool);

    /// Modifier-key state for the coming frame.
    fn set_modifiers(&mut self, modifiers: Modifiers);

    /// Time since the previous frame, in seconds.
    fn set_delta_time(&mut self, seconds: f32);
}

impl GuiIo for imgui::Io {
    fn add_mouse_wheel(&mut self, delta: f32) {
        self.add_mouse_wheel_event([0.0, delta]);
    }

    fn set_key(&mut self, code: KeyCode, down: bool) {
        if let Some(key) = keymap::imgui_key(code) {
            self.add_key_event(key, down);
        }
    }

    fn add_input_characters(&mut self, text: &str) {
        for c in text.chars() {
            self.add_input_character(c);
        }
    }

    fn set_display_size(&mut self, size: [f32; 2], framebuffer_scale: [f32; 2]) {
        self.display_size = size;
        self.display_framebuffer_scale = framebuffer_scale;
    }

    fn set_mouse_position(&mut self, position: [f32; 2]) {
        self.add_mouse_pos_event(position);
    }

    fn set_mouse_button(&mut self, index: usize, down: bool) {
        let button = match index {
            0 => imgui::MouseButton::Left,
            1 => imgui::MouseButton::Right,
            2 => imgui::MouseButton::Middle,
            _ => return,
        };
        self.add_mouse_button_event(button, down);
    }

    fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.add_key_event(imgui::Key::ModCtrl, modifiers.ctrl);
        self.add_key_event(imgui::Key::ModAlt, modifiers.alt);
        self.add_key_event(imgui::Key::ModShift, modifiers.shift);
        self.add_key_event(imgui::Key::ModSuper, modifiers.super_key);
    }

    fn set_delta_time(&mut self, seconds: f32) {
        self.delta_time = seconds;
    }
}
