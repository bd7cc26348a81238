//! The draw-list renderer: walks a [`FrameData`] and drives a
//! [`RenderBackend`].
//!
//! The walk itself is backend-agnostic. It owns the ordering guarantees:
//! lists and commands are drawn exactly in the order given, and each draw
//! gets its texture and scissor set immediately before it.

use std::mem::size_of;

use imgui::{DrawIdx, DrawVert, TextureId};

use crate::draw::{Command, FrameData};
use crate::error::TextureError;

/// Size in bytes of one entry of a list's index buffer.
pub const INDEX_SIZE: usize = size_of::<DrawIdx>();

/// A scissor box in framebuffer pixels, bottom-left origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScissorRect {
    /// Left edge.
    pub x: i32,
    /// Bottom edge, measured up from the bottom of the framebuffer.
    pub y: i32,
    /// Width.
    pub width: i32,
    /// Height.
    pub height: i32,
}

impl ScissorRect {
    /// Convert a framebuffer-space clip rect `[x0, y0, x1, y1]` with top-left
    /// origin into a GL scissor box for a framebuffer `framebuffer_height`
    /// pixels tall.
    #[must_use]
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn from_clip_rect(clip_rect: [f32; 4], framebuffer_height: u32) -> Self {
        let [x0, y0, x1, y1] = clip_rect;
        Self {
            x: x0 as i32,
            y: framebuffer_height as i32 - y1 as i32,
            width: (x1 - x0).max(0.0) as i32,
            height: (y1 - y0).max(0.0) as i32,
        }
    }
}

/// The GPU operations the renderer and texture code need.
///
/// [`GlowBackend`](crate::GlowBackend) implements this over OpenGL. Every
/// method is infallible except texture creation and update.
pub trait RenderBackend {
    /// Snapshot the GL state the renderer is about to change.
    fn save_state(&mut self);

    /// Blending, culling, depth, scissor, viewport and projection for imgui
    /// drawing. `projection` is a column-major 4x4 matrix.
    fn setup_render_state(&mut self, framebuffer_size: [u32; 2], projection: &[f32; 16]);

    /// Make `vertices` and `indices` the source of the following draws.
    fn bind_buffers(&mut self, vertices: &[DrawVert], indices: &[DrawIdx]);

    /// Bind the texture sampled by the next draw.
    fn bind_texture(&mut self, texture: TextureId);

    /// Set the scissor box for the next draw.
    fn set_scissor(&mut self, rect: ScissorRect);

    /// Draw `count` indices as triangles, starting `index_offset` bytes into
    /// the bound index buffer.
    fn draw_elements(&mut self, count: usize, index_offset: usize);

    /// Put back the state captured by [`save_state`](Self::save_state).
    fn restore_state(&mut self);

    /// Create an RGBA8 texture of `size` pixels filled with `rgba`.
    ///
    /// `rgba` holds exactly `width * height * 4` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`TextureError::Create`] if the driver refuses the texture.
    fn create_texture(&mut self, size: [u32; 2], rgba: &[u8]) -> Result<TextureId, TextureError>;

    /// Replace a `size` region at `origin` of an existing texture.
    ///
    /// # Errors
    ///
    /// Returns [`TextureError::TooLarge`] if the region does not fit the
    /// driver's size type.
    fn update_texture(
        &mut self,
        texture: TextureId,
        origin: [u32; 2],
        size: [u32; 2],
        rgba: &[u8],
    ) -> Result<(), TextureError>;

    /// Release a texture created by [`create_texture`](Self::create_texture).
    fn delete_texture(&mut self, texture: TextureId);
}

/// Orthographic projection mapping `(0, 0)-(width, height)` with y pointing
/// down onto clip space, near `-1`, far `1`. Column-major.
#[must_use]
#[rustfmt::skip]
pub fn orthographic_projection([width, height]: [f32; 2]) -> [f32; 16] {
    [
        2.0 / width, 0.0, 0.0, 0.0,
        0.0, -2.0 / height, 0.0, 0.0,
        0.0, 0.0, -1.0, 0.0,
        -1.0, 1.0, 0.0, 1.0,
    ]
}

/// Scale a logical clip rect into framebuffer pixels.
fn scale_clip_rect([x0, y0, x1, y1]: [f32; 4], [sx, sy]: [f32; 2]) -> [f32; 4] {
    [x0 * sx, y0 * sy, x1 * sx, y1 * sy]
}

/// Draws imgui frames through a [`RenderBackend`].
pub struct Renderer<B> {
    backend: B,
}

impl<B: RenderBackend> Renderer<B> {
    /// Wrap a backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// The wrapped backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The wrapped backend, mutably. Texture creation goes through here.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Give the backend back.
    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Draw `frame` into a framebuffer of `framebuffer_size` physical pixels.
    ///
    /// Clip rects are scaled by framebuffer size over `frame.display_size`,
    /// so a high-DPI surface is scissored in physical pixels while the
    /// projection stays in logical units. An empty framebuffer or display
    /// draws nothing and leaves GL untouched.
    #[expect(clippy::cast_precision_loss)]
    pub fn render(&mut self, frame: &FrameData<'_>, framebuffer_size: [u32; 2]) {
        let [fb_width, fb_height] = framebuffer_size;
        let [display_width, display_height] = frame.display_size;
        if fb_width == 0 || fb_height == 0 || !(display_width > 0.0 && display_height > 0.0) {
            return;
        }

        let scale = [
            fb_width as f32 / display_width,
            fb_height as f32 / display_height,
        ];
        let projection = orthographic_projection(frame.display_size);

        self.backend.save_state();
        self.backend.setup_render_state(framebuffer_size, &projection);

        for list in &frame.lists {
            self.backend.bind_buffers(list.vertices, list.indices);

            let mut index_offset = 0;
            for command in &list.commands {
                match command {
                    Command::Callback(callback) => callback(list),
                    Command::ResetRenderState => {
                        self.backend.setup_render_state(framebuffer_size, &projection);
                        self.backend.bind_buffers(list.vertices, list.indices);
                    }
                    Command::Draw(draw) => {
                        let clip_rect = scale_clip_rect(draw.clip_rect, scale);
                        self.backend.bind_texture(draw.texture_id);
                        self.backend
                            .set_scissor(ScissorRect::from_clip_rect(clip_rect, fb_height));
                        self.backend.draw_elements(draw.element_count, index_offset);
                        index_offset += draw.element_count * INDEX_SIZE;
                    }
                }
            }
        }

        self.backend.restore_state();

        log::trace!(
            "rendered {} lists / {} commands at {fb_width}x{fb_height}",
            frame.lists.len(),
            frame.command_count()
        );
    }
}
