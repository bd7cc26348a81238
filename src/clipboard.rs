//! System clipboard access for imgui text widgets.

use arboard::Clipboard;

/// [`imgui::ClipboardBackend`] over the system clipboard.
pub struct ClipboardSupport(Clipboard);

impl ClipboardSupport {
    /// Connect to the system clipboard, or `None` if there is none (headless
    /// sessions, missing display server).
    #[must_use]
    pub fn new() -> Option<Self> {
        match Clipboard::new() {
            Ok(clipboard) => Some(Self(clipboard)),
            Err(e) => {
                log::warn!("Failed to initialize clipboard support: {e}");
                None
            }
        }
    }
}

impl imgui::ClipboardBackend for ClipboardSupport {
    fn get(&mut self) -> Option<String> {
        match self.0.get_text() {
            Ok(text) => Some(text),
            Err(e) => {
                log::debug!("Clipboard read failed: {e}");
                None
            }
        }
    }

    fn set(&mut self, value: &str) {
        if let Err(e) = self.0.set_text(value) {
            log::warn!("Clipboard write failed: {e}");
        }
    }
}
