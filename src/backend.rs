//! [`RenderBackend`] over OpenGL through glow.

use std::mem::{offset_of, size_of};
use std::num::NonZeroU32;
use std::sync::Arc;

use glow::{HasContext, PixelUnpackData};
use imgui::{DrawIdx, DrawVert, TextureId};

use crate::error::{InitError, TextureError};
use crate::render::{RenderBackend, ScissorRect};
use crate::shaders;
use crate::state::GlStateBackup;

/// GL internal format for RGBA8 textures, pre-cast to the `i32` that
/// `tex_image_2d` expects.
#[expect(clippy::cast_possible_wrap)]
const RGBA8_INTERNAL_FORMAT: i32 = glow::RGBA8 as i32;

/// Element type matching imgui's index width.
const INDEX_TYPE: u32 = if size_of::<DrawIdx>() == 2 {
    glow::UNSIGNED_SHORT
} else {
    glow::UNSIGNED_INT
};

/// Convert a count or offset to the `i32` GL takes.
///
/// # Panics
///
/// Panics if `value > i32::MAX`. A frame that large cannot be drawn anyway.
fn gl_int(value: usize) -> i32 {
    i32::try_from(value).expect("draw size exceeds i32::MAX")
}

fn gl_dim(value: u32) -> Result<i32, TextureError> {
    i32::try_from(value).map_err(|_| TextureError::TooLarge(value))
}

/// The GL texture an imgui texture id names, if any.
fn native_texture(id: TextureId) -> Option<glow::Texture> {
    u32::try_from(id.id())
        .ok()
        .and_then(NonZeroU32::new)
        .map(glow::NativeTexture)
}

/// The imgui program, its vertex stream objects, and the state snapshot
/// taken around each frame.
pub struct GlowBackend {
    gl: Arc<glow::Context>,
    program: glow::Program,
    proj_mtx: glow::UniformLocation,
    texture_unit: glow::UniformLocation,
    position: u32,
    uv: u32,
    color: u32,
    vao: glow::VertexArray,
    vbo: glow::Buffer,
    ebo: glow::Buffer,
    saved: Option<GlStateBackup>,
}

impl GlowBackend {
    /// Compile the imgui program and create the vertex stream objects.
    ///
    /// # Safety
    ///
    /// The `gl` context must be current, and must be current whenever any
    /// method of the returned backend runs. Call [`destroy`](Self::destroy)
    /// before the context goes away.
    ///
    /// # Errors
    ///
    /// Returns an [`InitError`] if shader compilation, linking, location
    /// lookup or object creation fails. Nothing is leaked on failure.
    pub unsafe fn new(gl: Arc<glow::Context>) -> Result<Self, InitError> {
        let program =
            unsafe { shaders::compile_program(&gl, shaders::VERTEX_SRC, shaders::FRAGMENT_SRC)? };

        let locations = unsafe { Self::locations(&gl, program) };
        let (proj_mtx, texture_unit, position, uv, color) = match locations {
            Ok(locations) => locations,
            Err(e) => {
                unsafe { gl.delete_program(program) };
                return Err(e);
            }
        };

        let objects = unsafe {
            (
                gl.create_vertex_array(),
                gl.create_buffer(),
                gl.create_buffer(),
            )
        };
        let (vao, vbo, ebo) = match objects {
            (Ok(vao), Ok(vbo), Ok(ebo)) => (vao, vbo, ebo),
            (vao, vbo, ebo) => {
                let mut reason = String::new();
                unsafe {
                    gl.delete_program(program);
                    match vao {
                        Ok(vao) => gl.delete_vertex_array(vao),
                        Err(e) => reason = e,
                    }
                    match vbo {
                        Ok(vbo) => gl.delete_buffer(vbo),
                        Err(e) => reason = e,
                    }
                    match ebo {
                        Ok(ebo) => gl.delete_buffer(ebo),
                        Err(e) => reason = e,
                    }
                }
                return Err(InitError::CreateObject(reason));
            }
        };

        log::debug!("imgui GL backend ready (program {:?})", program);

        Ok(Self {
            gl,
            program,
            proj_mtx,
            texture_unit,
            position,
            uv,
            color,
            vao,
            vbo,
            ebo,
            saved: None,
        })
    }

    #[expect(clippy::type_complexity)]
    unsafe fn locations(
        gl: &glow::Context,
        program: glow::Program,
    ) -> Result<(glow::UniformLocation, glow::UniformLocation, u32, u32, u32), InitError> {
        unsafe {
            let uniform = |name: &'static str| {
                gl.get_uniform_location(program, name)
                    .ok_or(InitError::MissingUniform(name))
            };
            let attrib = |name: &'static str| {
                gl.get_attrib_location(program, name)
                    .ok_or(InitError::MissingAttribute(name))
            };
            Ok((
                uniform("ProjMtx")?,
                uniform("Texture")?,
                attrib("Position")?,
                attrib("UV")?,
                attrib("Color")?,
            ))
        }
    }

    /// The GL context this backend draws with.
    #[must_use]
    pub fn gl(&self) -> &Arc<glow::Context> {
        &self.gl
    }

    /// Release the program and buffer objects.
    ///
    /// # Safety
    ///
    /// Must be called with the creating context current, exactly once.
    pub unsafe fn destroy(&self) {
        let gl = &self.gl;
        unsafe {
            gl.delete_program(self.program);
            gl.delete_vertex_array(self.vao);
            gl.delete_buffer(self.vbo);
            gl.delete_buffer(self.ebo);
        }
    }

    /// Describe the interleaved `DrawVert` layout to the bound vertex array.
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    unsafe fn set_vertex_layout(&self) {
        let gl = &self.gl;
        // DrawVert is 20 bytes, so the stride and offsets all fit in i32.
        let stride = size_of::<DrawVert>() as i32;
        unsafe {
            gl.enable_vertex_attrib_array(self.position);
            gl.enable_vertex_attrib_array(self.uv);
            gl.enable_vertex_attrib_array(self.color);
            gl.vertex_attrib_pointer_f32(
                self.position,
                2,
                glow::FLOAT,
                false,
                stride,
                offset_of!(DrawVert, pos) as i32,
            );
            gl.vertex_attrib_pointer_f32(
                self.uv,
                2,
                glow::FLOAT,
                false,
                stride,
                offset_of!(DrawVert, uv) as i32,
            );
            gl.vertex_attrib_pointer_f32(
                self.color,
                4,
                glow::UNSIGNED_BYTE,
                true,
                stride,
                offset_of!(DrawVert, col) as i32,
            );
        }
    }

    /// Set default texture filtering and wrapping parameters.
    // GL constant values are small enough that the cast is always safe.
    #[expect(clippy::cast_possible_wrap)]
    unsafe fn set_default_tex_params(gl: &glow::Context) {
        unsafe {
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, glow::LINEAR as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::LINEAR as i32);
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_S,
                glow::CLAMP_TO_EDGE as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_T,
                glow::CLAMP_TO_EDGE as i32,
            );
        }
    }
}

/// View the vertex slice as raw bytes for upload.
fn vertex_bytes(vertices: &[DrawVert]) -> &[u8] {
    // SAFETY: DrawVert is a #[repr(C)] mirror of ImDrawVert holding only
    // f32 and u8 fields, so every byte is initialized.
    unsafe {
        std::slice::from_raw_parts(vertices.as_ptr().cast::<u8>(), std::mem::size_of_val(vertices))
    }
}

impl RenderBackend for GlowBackend {
    fn save_state(&mut self) {
        self.saved = Some(unsafe { GlStateBackup::capture(&self.gl) });
    }

    fn setup_render_state(&mut self, framebuffer_size: [u32; 2], projection: &[f32; 16]) {
        let [width, height] = framebuffer_size.map(|v| i32::try_from(v).unwrap_or(i32::MAX));
        let gl = &self.gl;
        unsafe {
            gl.active_texture(glow::TEXTURE0);
            gl.enable(glow::BLEND);
            gl.blend_equation(glow::FUNC_ADD);
            gl.blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);
            gl.disable(glow::CULL_FACE);
            gl.disable(glow::DEPTH_TEST);
            gl.enable(glow::SCISSOR_TEST);

            gl.viewport(0, 0, width, height);

            gl.use_program(Some(self.program));
            gl.uniform_1_i32(Some(&self.texture_unit), 0);
            gl.uniform_matrix_4_f32_slice(Some(&self.proj_mtx), false, projection);

            gl.bind_vertex_array(Some(self.vao));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.vbo));
            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(self.ebo));
            self.set_vertex_layout();
        }
    }

    fn bind_buffers(&mut self, vertices: &[DrawVert], indices: &[DrawIdx]) {
        let gl = &self.gl;
        unsafe {
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.vbo));
            gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, vertex_bytes(vertices), glow::STREAM_DRAW);

            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(self.ebo));
            gl.buffer_data_u8_slice(
                glow::ELEMENT_ARRAY_BUFFER,
                bytemuck::cast_slice(indices),
                glow::STREAM_DRAW,
            );
        }
    }

    fn bind_texture(&mut self, texture: TextureId) {
        unsafe { self.gl.bind_texture(glow::TEXTURE_2D, native_texture(texture)) };
    }

    fn set_scissor(&mut self, rect: ScissorRect) {
        unsafe { self.gl.scissor(rect.x, rect.y, rect.width, rect.height) };
    }

    fn draw_elements(&mut self, count: usize, index_offset: usize) {
        unsafe {
            self.gl.draw_elements(
                glow::TRIANGLES,
                gl_int(count),
                INDEX_TYPE,
                gl_int(index_offset),
            );
        }
    }

    fn restore_state(&mut self) {
        if let Some(saved) = self.saved.take() {
            unsafe { saved.restore(&self.gl) };
        }
    }

    fn create_texture(&mut self, size: [u32; 2], rgba: &[u8]) -> Result<TextureId, TextureError> {
        let width = gl_dim(size[0])?;
        let height = gl_dim(size[1])?;
        let gl = &self.gl;

        let texture = unsafe { gl.create_texture() }.map_err(TextureError::Create)?;
        unsafe {
            gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            Self::set_default_tex_params(gl);
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                RGBA8_INTERNAL_FORMAT,
                width,
                height,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                PixelUnpackData::Slice(Some(rgba)),
            );
            gl.bind_texture(glow::TEXTURE_2D, None);
        }

        Ok(TextureId::new(texture.0.get() as usize))
    }

    fn update_texture(
        &mut self,
        texture: TextureId,
        origin: [u32; 2],
        size: [u32; 2],
        rgba: &[u8],
    ) -> Result<(), TextureError> {
        let [x, y] = [gl_dim(origin[0])?, gl_dim(origin[1])?];
        let [width, height] = [gl_dim(size[0])?, gl_dim(size[1])?];
        let gl = &self.gl;
        unsafe {
            gl.bind_texture(glow::TEXTURE_2D, native_texture(texture));
            gl.tex_sub_image_2d(
                glow::TEXTURE_2D,
                0,
                x,
                y,
                width,
                height,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                PixelUnpackData::Slice(Some(rgba)),
            );
            gl.bind_texture(glow::TEXTURE_2D, None);
        }
        Ok(())
    }

    fn delete_texture(&mut self, texture: TextureId) {
        if let Some(texture) = native_texture(texture) {
            unsafe { self.gl.delete_texture(texture) };
        }
    }
}
