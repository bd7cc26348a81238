//! GLSL source for the imgui program and compilation helpers.
//!
//! The program reproduces the fixed-function path imgui's classic OpenGL
//! renderer relies on: an orthographic projection, and vertex color modulating
//! the sampled texture. GLSL 1.40 (OpenGL 3.1).

use glow::HasContext;

use crate::error::InitError;

/// Vertex shader.
///
/// # Inputs
///
/// | Name       | Type   | Source                          |
/// |------------|--------|---------------------------------|
/// | `Position` | `vec2` | `DrawVert::pos`, logical pixels |
/// | `UV`       | `vec2` | `DrawVert::uv`                  |
/// | `Color`    | `vec4` | `DrawVert::col`, normalized     |
///
/// # Uniforms
///
/// | Name      | Type   | Description                        |
/// |-----------|--------|------------------------------------|
/// | `ProjMtx` | `mat4` | Orthographic display projection    |
pub const VERTEX_SRC: &str = r"#version 140

in vec2 Position;
in vec2 UV;
in vec4 Color;

uniform mat4 ProjMtx;

out vec2 Frag_UV;
out vec4 Frag_Color;

void main() {
    Frag_UV = UV;
    Frag_Color = Color;
    gl_Position = ProjMtx * vec4(Position.xy, 0.0, 1.0);
}
";

/// Fragment shader: texture modulated by vertex color.
///
/// # Uniforms
///
/// | Name      | Type        | Description                     |
/// |-----------|-------------|---------------------------------|
/// | `Texture` | `sampler2D` | Texture unit index (always 0)   |
pub const FRAGMENT_SRC: &str = r"#version 140

in vec2 Frag_UV;
in vec4 Frag_Color;

uniform sampler2D Texture;

out vec4 Out_Color;

void main() {
    Out_Color = Frag_Color * texture(Texture, Frag_UV.st);
}
";

/// Compile and link a program from vertex and fragment source.
///
/// The shader objects are detached and deleted once the program links.
///
/// # Safety
///
/// Requires a valid, current OpenGL context.
///
/// # Errors
///
/// [`InitError::Compile`] or [`InitError::Link`] with the driver's log.
pub unsafe fn compile_program(
    gl: &glow::Context,
    vertex_src: &str,
    fragment_src: &str,
) -> Result<glow::Program, InitError> {
    let program = unsafe { gl.create_program() }.map_err(InitError::CreateObject)?;

    let vs = match unsafe { compile_shader(gl, glow::VERTEX_SHADER, vertex_src) } {
        Ok(vs) => vs,
        Err(e) => {
            unsafe { gl.delete_program(program) };
            return Err(e);
        }
    };
    let fs = match unsafe { compile_shader(gl, glow::FRAGMENT_SHADER, fragment_src) } {
        Ok(fs) => fs,
        Err(e) => {
            unsafe {
                gl.delete_shader(vs);
                gl.delete_program(program);
            }
            return Err(e);
        }
    };

    unsafe {
        gl.attach_shader(program, vs);
        gl.attach_shader(program, fs);
        gl.link_program(program);

        if !gl.get_program_link_status(program) {
            let log = gl.get_program_info_log(program);
            gl.delete_program(program);
            gl.delete_shader(vs);
            gl.delete_shader(fs);
            return Err(InitError::Link(log));
        }

        gl.detach_shader(program, vs);
        gl.detach_shader(program, fs);
        gl.delete_shader(vs);
        gl.delete_shader(fs);
    }

    Ok(program)
}

/// Compile a single shader stage.
///
/// # Safety
///
/// Requires a valid, current OpenGL context.
unsafe fn compile_shader(
    gl: &glow::Context,
    shader_type: u32,
    source: &str,
) -> Result<glow::Shader, InitError> {
    unsafe {
        let shader = gl.create_shader(shader_type).map_err(InitError::CreateObject)?;
        gl.shader_source(shader, source);
        gl.compile_shader(shader);

        if !gl.get_shader_compile_status(shader) {
            let log = gl.get_shader_info_log(shader);
            gl.delete_shader(shader);
            return Err(InitError::Compile(log));
        }

        Ok(shader)
    }
}
