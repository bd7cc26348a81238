//! Snapshot of the GL state the imgui pass changes.

use std::num::NonZeroU32;

use glow::HasContext;

/// GL state captured before drawing imgui and put back afterwards.
///
/// Covers the enable bits, blend setup and transform-related state
/// (viewport, scissor box) plus the bindings the programmable path touches.
#[derive(Debug, Clone, Copy)]
pub struct GlStateBackup {
    blend: bool,
    cull_face: bool,
    depth_test: bool,
    scissor_test: bool,
    blend_src_rgb: u32,
    blend_dst_rgb: u32,
    blend_src_alpha: u32,
    blend_dst_alpha: u32,
    blend_equation_rgb: u32,
    blend_equation_alpha: u32,
    viewport: [i32; 4],
    scissor_box: [i32; 4],
    active_texture: u32,
    program: Option<NonZeroU32>,
    texture: Option<NonZeroU32>,
    array_buffer: Option<NonZeroU32>,
    vertex_array: Option<NonZeroU32>,
}

impl GlStateBackup {
    /// Read the current state.
    ///
    /// # Safety
    ///
    /// Requires a valid, current OpenGL context.
    pub unsafe fn capture(gl: &glow::Context) -> Self {
        unsafe {
            let mut viewport = [0; 4];
            gl.get_parameter_i32_slice(glow::VIEWPORT, &mut viewport);
            let mut scissor_box = [0; 4];
            gl.get_parameter_i32_slice(glow::SCISSOR_BOX, &mut scissor_box);
            let (active_texture, texture) = capture_unit0(gl);

            Self {
                blend: gl.is_enabled(glow::BLEND),
                cull_face: gl.is_enabled(glow::CULL_FACE),
                depth_test: gl.is_enabled(glow::DEPTH_TEST),
                scissor_test: gl.is_enabled(glow::SCISSOR_TEST),
                blend_src_rgb: get_enum(gl, glow::BLEND_SRC_RGB),
                blend_dst_rgb: get_enum(gl, glow::BLEND_DST_RGB),
                blend_src_alpha: get_enum(gl, glow::BLEND_SRC_ALPHA),
                blend_dst_alpha: get_enum(gl, glow::BLEND_DST_ALPHA),
                blend_equation_rgb: get_enum(gl, glow::BLEND_EQUATION_RGB),
                blend_equation_alpha: get_enum(gl, glow::BLEND_EQUATION_ALPHA),
                viewport,
                scissor_box,
                active_texture,
                program: get_name(gl, glow::CURRENT_PROGRAM),
                texture,
                array_buffer: get_name(gl, glow::ARRAY_BUFFER_BINDING),
                vertex_array: get_name(gl, glow::VERTEX_ARRAY_BINDING),
            }
        }
    }

    /// Put the captured state back.
    ///
    /// # Safety
    ///
    /// Requires the context [`capture`](Self::capture) read from to be
    /// current.
    pub unsafe fn restore(&self, gl: &glow::Context) {
        unsafe {
            gl.use_program(self.program.map(glow::NativeProgram));
            restore_unit0(gl, self.active_texture, self.texture);
            gl.bind_vertex_array(self.vertex_array.map(glow::NativeVertexArray));
            gl.bind_buffer(glow::ARRAY_BUFFER, self.array_buffer.map(glow::NativeBuffer));

            gl.blend_equation_separate(self.blend_equation_rgb, self.blend_equation_alpha);
            gl.blend_func_separate(
                self.blend_src_rgb,
                self.blend_dst_rgb,
                self.blend_src_alpha,
                self.blend_dst_alpha,
            );
            set_enabled(gl, glow::BLEND, self.blend);
            set_enabled(gl, glow::CULL_FACE, self.cull_face);
            set_enabled(gl, glow::DEPTH_TEST, self.depth_test);
            set_enabled(gl, glow::SCISSOR_TEST, self.scissor_test);

            let [x, y, w, h] = self.viewport;
            gl.viewport(x, y, w, h);
            let [x, y, w, h] = self.scissor_box;
            gl.scissor(x, y, w, h);
        }
    }
}

/// Texture unit selection and the 2D binding on the selected unit.
///
/// The renderer only ever draws from unit 0, so that is the binding saved.
trait TextureUnits {
    unsafe fn current_unit(&self) -> u32;
    unsafe fn select_unit(&self, unit: u32);
    unsafe fn unit_binding(&self) -> Option<NonZeroU32>;
    unsafe fn bind_unit(&self, texture: Option<NonZeroU32>);
}

impl TextureUnits for glow::Context {
    unsafe fn current_unit(&self) -> u32 {
        unsafe { get_enum(self, glow::ACTIVE_TEXTURE) }
    }

    unsafe fn select_unit(&self, unit: u32) {
        unsafe { HasContext::active_texture(self, unit) };
    }

    unsafe fn unit_binding(&self) -> Option<NonZeroU32> {
        unsafe { get_name(self, glow::TEXTURE_BINDING_2D) }
    }

    unsafe fn bind_unit(&self, texture: Option<NonZeroU32>) {
        let texture = texture.map(glow::NativeTexture);
        unsafe { HasContext::bind_texture(self, glow::TEXTURE_2D, texture) };
    }
}

/// The caller's active unit and the texture bound on unit 0.
unsafe fn capture_unit0<T: TextureUnits + ?Sized>(gl: &T) -> (u32, Option<NonZeroU32>) {
    unsafe {
        let active = gl.current_unit();
        gl.select_unit(glow::TEXTURE0);
        let texture = gl.unit_binding();
        gl.select_unit(active);
        (active, texture)
    }
}

unsafe fn restore_unit0<T: TextureUnits + ?Sized>(
    gl: &T,
    active: u32,
    texture: Option<NonZeroU32>,
) {
    unsafe {
        gl.select_unit(glow::TEXTURE0);
        gl.bind_unit(texture);
        gl.select_unit(active);
    }
}

#[expect(clippy::cast_sign_loss)]
unsafe fn get_enum(gl: &glow::Context, parameter: u32) -> u32 {
    unsafe { gl.get_parameter_i32(parameter) as u32 }
}

#[expect(clippy::cast_sign_loss)]
unsafe fn get_name(gl: &glow::Context, parameter: u32) -> Option<NonZeroU32> {
    NonZeroU32::new(unsafe { gl.get_parameter_i32(parameter) } as u32)
}

unsafe fn set_enabled(gl: &glow::Context, capability: u32, enabled: bool) {
    unsafe {
        if enabled {
            gl.enable(capability);
        } else {
            gl.disable(capability);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;

    use super::*;

    /// Per-unit 2D bindings and an active unit selector.
    #[derive(Default)]
    struct Units {
        active: Cell<u32>,
        bound: RefCell<HashMap<u32, NonZeroU32>>,
    }

    impl Units {
        fn holding(active: u32, bound: &[(u32, u32)]) -> Self {
            let units = Self::default();
            units.active.set(active);
            for &(unit, texture) in bound {
                units.bound.borrow_mut().insert(unit, NonZeroU32::new(texture).unwrap());
            }
            units
        }

        fn on(&self, unit: u32) -> Option<NonZeroU32> {
            self.bound.borrow().get(&unit).copied()
        }
    }

    impl TextureUnits for Units {
        unsafe fn current_unit(&self) -> u32 {
            self.active.get()
        }

        unsafe fn select_unit(&self, unit: u32) {
            self.active.set(unit);
        }

        unsafe fn unit_binding(&self) -> Option<NonZeroU32> {
            self.on(self.active.get())
        }

        unsafe fn bind_unit(&self, texture: Option<NonZeroU32>) {
            let mut bound = self.bound.borrow_mut();
            match texture {
                Some(texture) => bound.insert(self.active.get(), texture),
                None => bound.remove(&self.active.get()),
            };
        }
    }

    #[test]
    fn unit0_binding_survives_a_non_zero_active_unit() {
        let [a, b, font] = [1, 2, 3].map(NonZeroU32::new);
        let units = Units::holding(glow::TEXTURE1, &[(glow::TEXTURE1, 1), (glow::TEXTURE0, 2)]);

        let (active, texture) = unsafe { capture_unit0(&units) };
        assert_eq!(active, glow::TEXTURE1);
        assert_eq!(texture, b);
        assert_eq!(units.active.get(), glow::TEXTURE1);

        // Drawing selects unit 0 and binds the font atlas there.
        unsafe {
            units.select_unit(glow::TEXTURE0);
            units.bind_unit(font);
            restore_unit0(&units, active, texture);
        }

        assert_eq!(units.active.get(), glow::TEXTURE1);
        assert_eq!(units.on(glow::TEXTURE0), b);
        assert_eq!(units.on(glow::TEXTURE1), a);
    }

    #[test]
    fn empty_unit0_is_restored_empty() {
        let units = Units::holding(glow::TEXTURE0, &[]);

        let (active, texture) = unsafe { capture_unit0(&units) };
        unsafe {
            units.bind_unit(NonZeroU32::new(7));
            restore_unit0(&units, active, texture);
        }

        assert_eq!(units.on(glow::TEXTURE0), None);
    }
}
