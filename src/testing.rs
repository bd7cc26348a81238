//! Test doubles for the GUI, window and GPU seams.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use imgui::{DrawIdx, DrawVert, TextureId};
use winit::keyboard::KeyCode;

use crate::error::TextureError;
use crate::io::{GuiIo, Modifiers};
use crate::render::{RenderBackend, ScissorRect};
use crate::window::Window;

/// `count` white vertices at the origin and the indices `0..count`.
pub(crate) fn vertices(count: usize) -> (Vec<DrawVert>, Vec<DrawIdx>) {
    let verts = (0..count)
        .map(|_| DrawVert {
            pos: [0.0, 0.0],
            uv: [0.0, 0.0],
            col: [255; 4],
        })
        .collect();
    let indices = (0..count)
        .map(|i| DrawIdx::try_from(i).unwrap_or(DrawIdx::MAX))
        .collect();
    (verts, indices)
}

/// Dear ImGui keeps one global current context, so tests take turns.
static IMGUI: Mutex<()> = Mutex::new(());

/// Run `f` against a fresh headless imgui context with a built font atlas,
/// a 200x100 display and a 60 Hz frame time.
pub(crate) fn with_imgui<R>(f: impl FnOnce(&mut imgui::Context) -> R) -> R {
    let _guard = IMGUI.lock().unwrap_or_else(PoisonError::into_inner);
    let mut ctx = imgui::Context::create();
    ctx.set_ini_filename(None);
    let io = ctx.io_mut();
    io.display_size = [200.0, 100.0];
    io.delta_time = 1.0 / 60.0;
    io.config_input_trickle_event_queue = false;
    let _ = ctx.fonts().build_rgba32_texture();
    f(&mut ctx)
}

/// Everything pushed into the GUI side.
#[derive(Debug, Default)]
pub(crate) struct RecordingIo {
    pub wheel: f32,
    pub keys: Vec<(KeyCode, bool)>,
    pub text: String,
    pub display_size: Option<([f32; 2], [f32; 2])>,
    pub mouse_position: Option<[f32; 2]>,
    pub mouse_buttons: Vec<(usize, bool)>,
    pub modifiers: Option<Modifiers>,
    pub delta_time: Option<f32>,
}

impl RecordingIo {
    pub fn is_untouched(&self) -> bool {
        self.wheel == 0.0
            && self.keys.is_empty()
            && self.text.is_empty()
            && self.display_size.is_none()
            && self.mouse_position.is_none()
            && self.mouse_buttons.is_empty()
            && self.modifiers.is_none()
            && self.delta_time.is_none()
    }
}

impl GuiIo for RecordingIo {
    fn add_mouse_wheel(&mut self, delta: f32) {
        self.wheel += delta;
    }

    fn set_key(&mut self, code: KeyCode, down: bool) {
        self.keys.push((code, down));
    }

    fn add_input_characters(&mut self, text: &str) {
        self.text.push_str(text);
    }

    fn set_display_size(&mut self, size: [f32; 2], framebuffer_scale: [f32; 2]) {
        self.display_size = Some((size, framebuffer_scale));
    }

    fn set_mouse_position(&mut self, position: [f32; 2]) {
        self.mouse_position = Some(position);
    }

    fn set_mouse_button(&mut self, index: usize, down: bool) {
        self.mouse_buttons.push((index, down));
    }

    fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.modifiers = Some(modifiers);
    }

    fn set_delta_time(&mut self, seconds: f32) {
        self.delta_time = Some(seconds);
    }
}

/// A window with fixed answers.
#[derive(Debug, Default)]
pub(crate) struct FakeWindow {
    pub size: [f32; 2],
    pub framebuffer: [u32; 2],
    pub focused: bool,
    pub mouse: [f32; 2],
    pub held: HashSet<KeyCode>,
    pub activations: std::cell::Cell<usize>,
}

impl FakeWindow {
    pub fn holding(mut self, code: KeyCode) -> Self {
        self.held.insert(code);
        self
    }
}

impl Window for FakeWindow {
    fn size(&self) -> [f32; 2] {
        self.size
    }

    fn framebuffer_size(&self) -> [u32; 2] {
        self.framebuffer
    }

    fn has_focus(&self) -> bool {
        self.focused
    }

    fn mouse_position(&self) -> [f32; 2] {
        self.mouse
    }

    fn is_key_pressed(&self, code: KeyCode) -> bool {
        self.held.contains(&code)
    }

    fn set_active(&self) {
        self.activations.set(self.activations.get() + 1);
    }
}

/// One recorded backend call.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    SaveState,
    Setup {
        framebuffer_size: [u32; 2],
        projection: [f32; 16],
    },
    BindBuffers {
        vertices: usize,
        indices: usize,
    },
    BindTexture(TextureId),
    Scissor(ScissorRect),
    DrawElements {
        count: usize,
        offset: usize,
    },
    RestoreState,
    CreateTexture {
        size: [u32; 2],
        bytes: usize,
    },
    UpdateTexture {
        texture: TextureId,
        origin: [u32; 2],
        size: [u32; 2],
    },
    DeleteTexture(TextureId),
}

/// Records every call; hands out texture ids counting up from 1.
#[derive(Debug, Default)]
pub(crate) struct RecordingBackend {
    pub calls: Vec<Call>,
    pub fail_texture_creation: bool,
    next_texture: usize,
}

impl RenderBackend for RecordingBackend {
    fn save_state(&mut self) {
        self.calls.push(Call::SaveState);
    }

    fn setup_render_state(&mut self, framebuffer_size: [u32; 2], projection: &[f32; 16]) {
        self.calls.push(Call::Setup {
            framebuffer_size,
            projection: *projection,
        });
    }

    fn bind_buffers(&mut self, vertices: &[DrawVert], indices: &[DrawIdx]) {
        self.calls.push(Call::BindBuffers {
            vertices: vertices.len(),
            indices: indices.len(),
        });
    }

    fn bind_texture(&mut self, texture: TextureId) {
        self.calls.push(Call::BindTexture(texture));
    }

    fn set_scissor(&mut self, rect: ScissorRect) {
        self.calls.push(Call::Scissor(rect));
    }

    fn draw_elements(&mut self, count: usize, index_offset: usize) {
        self.calls.push(Call::DrawElements {
            count,
            offset: index_offset,
        });
    }

    fn restore_state(&mut self) {
        self.calls.push(Call::RestoreState);
    }

    fn create_texture(&mut self, size: [u32; 2], rgba: &[u8]) -> Result<TextureId, TextureError> {
        if self.fail_texture_creation {
            return Err(TextureError::Create("out of texture names".to_owned()));
        }
        self.calls.push(Call::CreateTexture {
            size,
            bytes: rgba.len(),
        });
        self.next_texture += 1;
        Ok(TextureId::new(self.next_texture))
    }

    fn update_texture(
        &mut self,
        texture: TextureId,
        origin: [u32; 2],
        size: [u32; 2],
        _rgba: &[u8],
    ) -> Result<(), TextureError> {
        self.calls.push(Call::UpdateTexture {
            texture,
            origin,
            size,
        });
        Ok(())
    }

    fn delete_texture(&mut self, texture: TextureId) {
        self.calls.push(Call::DeleteTexture(texture));
    }
}
