//! What the frame adapter needs to know about the window it draws into.

use std::collections::HashSet;
use std::sync::Arc;

use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Window-side queries made once per frame.
pub trait Window {
    /// Logical size of the drawable area.
    fn size(&self) -> [f32; 2];

    /// Size of the drawable area in physical pixels.
    fn framebuffer_size(&self) -> [u32; 2];

    /// Whether the window currently has input focus.
    fn has_focus(&self) -> bool;

    /// Cursor position in logical pixels, relative to the drawable area.
    fn mouse_position(&self) -> [f32; 2];

    /// Whether a physical key is held down.
    fn is_key_pressed(&self, code: KeyCode) -> bool;

    /// Make this window's rendering context current on the calling thread.
    fn set_active(&self) {}
}

/// Cursor and held-key state reconstructed from the event stream.
///
/// winit reports both only as events, so they are tracked here for the
/// per-frame queries.
#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    cursor: [f32; 2],
    keys_down: HashSet<KeyCode>,
}

impl InputTracker {
    /// Fold one winit event into the tracked state.
    pub fn observe(&mut self, event: &WindowEvent, scale_factor: f64) {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                let logical = position.to_logical::<f32>(scale_factor);
                self.cursor = [logical.x, logical.y];
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    match event.state {
                        ElementState::Pressed => self.press(code),
                        ElementState::Released => self.release(code),
                    }
                }
            }
            // Releases that happen while unfocused are never delivered.
            WindowEvent::Focused(false) => self.keys_down.clear(),
            _ => {}
        }
    }

    /// Mark a key as held.
    pub fn press(&mut self, code: KeyCode) {
        self.keys_down.insert(code);
    }

    /// Mark a key as released.
    pub fn release(&mut self, code: KeyCode) {
        self.keys_down.remove(&code);
    }

    /// Last reported cursor position, logical pixels.
    #[must_use]
    pub fn cursor(&self) -> [f32; 2] {
        self.cursor
    }

    /// Whether `code` is currently held.
    #[must_use]
    pub fn is_pressed(&self, code: KeyCode) -> bool {
        self.keys_down.contains(&code)
    }
}

/// A winit window plus the tracked state [`Window`] needs.
pub struct WinitWindow {
    window: Arc<winit::window::Window>,
    tracker: InputTracker,
    activate: Option<Box<dyn Fn()>>,
}

impl WinitWindow {
    /// Wrap a window. The cursor starts at the origin with no keys held.
    #[must_use]
    pub fn new(window: Arc<winit::window::Window>) -> Self {
        Self {
            window,
            tracker: InputTracker::default(),
            activate: None,
        }
    }

    /// Run `activate` whenever the platform needs the rendering context
    /// current, typically `make_current` on the caller's GL context.
    #[must_use]
    pub fn with_activation(mut self, activate: impl Fn() + 'static) -> Self {
        self.activate = Some(Box::new(activate));
        self
    }

    /// The wrapped window.
    #[must_use]
    pub fn window(&self) -> &winit::window::Window {
        &self.window
    }

    /// Physical pixels per logical pixel.
    #[must_use]
    pub fn scale_factor(&self) -> f64 {
        self.window.scale_factor()
    }

    /// Update cursor and key tracking from an event addressed to this window.
    pub fn observe(&mut self, event: &WindowEvent) {
        let scale_factor = self.scale_factor();
        self.tracker.observe(event, scale_factor);
    }
}

impl Window for WinitWindow {
    fn size(&self) -> [f32; 2] {
        let size = self
            .window
            .inner_size()
            .to_logical::<f32>(self.window.scale_factor());
        [size.width, size.height]
    }

    fn framebuffer_size(&self) -> [u32; 2] {
        let size = self.window.inner_size();
        [size.width, size.height]
    }

    fn has_focus(&self) -> bool {
        self.window.has_focus()
    }

    fn mouse_position(&self) -> [f32; 2] {
        self.tracker.cursor()
    }

    fn is_key_pressed(&self, code: KeyCode) -> bool {
        self.tracker.is_pressed(code)
    }

    fn set_active(&self) {
        if let Some(activate) = &self.activate {
            activate();
        }
    }
}
