//! Glue between [Dear ImGui] (via [imgui-rs]), a [winit] window and an
//! OpenGL renderer built on [glow].
//!
//! [`ImguiPlatform`] owns the three pieces an imgui integration needs:
//!
//! - an input bridge translating window [`Event`]s into imgui input,
//!   dropped while the window is unfocused;
//! - a frame adapter pushing display size, cursor, buttons, modifiers and
//!   delta time before each `new_frame`;
//! - a [`Renderer`] walking imgui's draw lists in order, scissoring each
//!   command in framebuffer pixels and restoring the caller's GL state
//!   afterwards.
//!
//! It also manages the font atlas texture. [`Texture`], [`Sprite`] and the
//! [`widgets`] module put user images on screen.
//!
//! # Usage
//!
//! ```no_run
//! # use std::sync::Arc;
//! # use std::time::Instant;
//! # use imgui_glow_platform::{glow, imgui, winit, ImguiPlatform, PlatformConfig, WinitWindow};
//! # fn run(gl: Arc<glow::Context>, window: Arc<winit::window::Window>)
//! #     -> Result<(), imgui_glow_platform::InitError> {
//! let mut ctx = imgui::Context::create();
//! let mut window = WinitWindow::new(window);
//! // SAFETY: `gl` is current on this thread for the platform's lifetime.
//! let mut platform =
//!     unsafe { ImguiPlatform::init_glow(&mut ctx, gl, &window, &PlatformConfig::default())? };
//!
//! let mut last = Instant::now();
//! // For every winit `WindowEvent`:
//! //     platform.handle_winit_event(ctx.io_mut(), &mut window, &event);
//! // Once per redraw:
//! let now = Instant::now();
//! let ui = platform.new_frame(&mut ctx, &window, now - last);
//! last = now;
//! ui.text("hello");
//! platform.render(&mut ctx, &window);
//! # Ok(())
//! # }
//! ```
//!
//! # Backends
//!
//! Rendering goes through the [`RenderBackend`] trait. With the default
//! `glow` feature, [`GlowBackend`] implements it over an OpenGL 3.1 context.
//! Creating and using a [`GlowBackend`] requires that context to be current,
//! which is why its constructor is `unsafe`.
//!
//! [Dear ImGui]: https://github.com/ocornut/imgui
//! [imgui-rs]: https://docs.rs/imgui
//! [winit]: https://docs.rs/winit
//! [glow]: https://docs.rs/glow

mod clipboard;
mod conv;
mod draw;
mod error;
mod event;
mod frame;
mod input;
mod io;
mod keymap;
mod platform;
mod render;
mod texture;
pub mod widgets;
mod window;

#[cfg(feature = "glow")]
mod backend;
#[cfg(feature = "glow")]
mod shaders;
#[cfg(feature = "glow")]
mod state;

#[cfg(test)]
mod testing;

pub use clipboard::ClipboardSupport;
pub use conv::{color_to_vec4, sprite_draw_size, texture_rect_uvs, Color, IntRect};
pub use draw::{Callback, Command, CommandList, DrawCommand, FrameData};
pub use error::{InitError, TextureError};
pub use event::Event;
pub use frame::{held_modifiers, prepare_frame};
pub use input::{InputBridge, MOUSE_BUTTONS};
pub use io::{GuiIo, Modifiers};
pub use keymap::imgui_key;
pub use platform::{ImguiPlatform, PlatformConfig};
pub use render::{orthographic_projection, RenderBackend, Renderer, ScissorRect, INDEX_SIZE};
pub use texture::{Sprite, Texture};
pub use window::{InputTracker, Window, WinitWindow};

#[cfg(feature = "glow")]
pub use backend::GlowBackend;

pub use imgui;
pub use winit;
#[cfg(feature = "glow")]
pub use glow;
